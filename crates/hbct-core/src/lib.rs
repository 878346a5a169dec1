//! # hbct-core
//!
//! The rule engine for the Health Behavior Change Tracker - THE LOGIC.
//!
//! A session collects three answer sets (self-efficacy score, stage of
//! change, exercise frequency and duration) and derives an ordered list of
//! recommendations from them using fixed threshold rules.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Holds session state as an explicit [`AssessmentState`] value, never a global
//! - Is closed: the rules are hand-authored and not configurable
//! - Validates only at the form boundary ([`forms`]); the store trusts its input
//! - Has NO async, NO network, NO logging dependencies (pure Rust)
//!
//! ## Example
//!
//! ```
//! use hbct_core::{AssessmentState, Advisory, StageOfChange, derive_recommendations};
//! use hbct_core::forms::Submission;
//!
//! let mut state = AssessmentState::new();
//! for submission in [
//!     Submission::self_efficacy(3),
//!     Submission::stage("Contemplation"),
//!     Submission::exercise(2, 20),
//! ] {
//!     submission.expect("valid input").apply(&mut state);
//! }
//!
//! let advisories = derive_recommendations(&state);
//! assert_eq!(advisories.len(), 5);
//! assert_eq!(advisories[1], Advisory::Stage(StageOfChange::Contemplation));
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod engine;
pub mod forms;
pub mod pages;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Category, DURATION_MAX, DURATION_MIN, ExerciseAnswer, FREQUENCY_MAX, FREQUENCY_MIN, HbctError,
    SELF_EFFICACY_MAX, SELF_EFFICACY_MIN, SelfEfficacyAnswer, StageOfChange,
};

// =============================================================================
// RE-EXPORTS: Store, Engine, Views
// =============================================================================

pub use engine::{
    Advisory, Completeness, LOW_CONFIDENCE_THRESHOLD, MIN_DURATION_MINUTES, MIN_FREQUENCY_DAYS,
    completeness, derive_recommendation_lines, derive_recommendations,
};
pub use forms::Submission;
pub use pages::{APP_TITLE, Page, ResultsView};
pub use session::AssessmentState;
