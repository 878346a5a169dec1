//! # Core Type Definitions
//!
//! This module contains the answer types collected by the questionnaire:
//! - Answer records (`SelfEfficacyAnswer`, `StageOfChange`, `ExerciseAnswer`)
//! - Assessment categories (`Category`)
//! - Error types (`HbctError`)
//!
//! ## Range Guarantees
//!
//! Answer types carry plain integers. Range checks live at the input
//! boundary (`forms`), so a value that reaches the store has already been
//! accepted by a form.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// INPUT BOUNDS
// =============================================================================

/// Lowest self-efficacy score a form accepts.
pub const SELF_EFFICACY_MIN: u8 = 1;

/// Highest self-efficacy score a form accepts.
pub const SELF_EFFICACY_MAX: u8 = 10;

/// Lowest number of exercise days per week.
pub const FREQUENCY_MIN: u8 = 0;

/// Highest number of exercise days per week.
pub const FREQUENCY_MAX: u8 = 7;

/// Lowest number of minutes per exercise session.
pub const DURATION_MIN: u8 = 0;

/// Highest number of minutes per exercise session.
pub const DURATION_MAX: u8 = 120;

// =============================================================================
// SELF-EFFICACY
// =============================================================================

/// Confidence in making a lasting health behavior change (Bandura, 1986).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelfEfficacyAnswer {
    /// Score in `[SELF_EFFICACY_MIN, SELF_EFFICACY_MAX]`.
    pub score: u8,
}

impl SelfEfficacyAnswer {
    /// Create a new answer. No range check is performed here.
    #[must_use]
    pub const fn new(score: u8) -> Self {
        Self { score }
    }

    /// Get the raw score.
    #[must_use]
    pub const fn score(self) -> u8 {
        self.score
    }
}

// =============================================================================
// STAGES OF CHANGE
// =============================================================================

/// Readiness for behavior change (Prochaska et al., 1992).
///
/// The set is closed: every `match` on it is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageOfChange {
    Precontemplation,
    Contemplation,
    Preparation,
    Action,
    Maintenance,
}

impl StageOfChange {
    /// All stages in model order.
    pub const ALL: [StageOfChange; 5] = [
        StageOfChange::Precontemplation,
        StageOfChange::Contemplation,
        StageOfChange::Preparation,
        StageOfChange::Action,
        StageOfChange::Maintenance,
    ];

    /// Get the stage label as shown to the user.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            StageOfChange::Precontemplation => "Precontemplation",
            StageOfChange::Contemplation => "Contemplation",
            StageOfChange::Preparation => "Preparation",
            StageOfChange::Action => "Action",
            StageOfChange::Maintenance => "Maintenance",
        }
    }
}

impl std::fmt::Display for StageOfChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StageOfChange {
    type Err = HbctError;

    /// Parse a stage label, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        StageOfChange::ALL
            .into_iter()
            .find(|stage| stage.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| HbctError::UnknownStage(trimmed.to_string()))
    }
}

// =============================================================================
// EXERCISE VITAL SIGN
// =============================================================================

/// Exercise Vital Sign answer. Both numbers are always submitted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExerciseAnswer {
    /// Days per week of moderate or strenuous exercise.
    pub frequency_days_per_week: u8,
    /// Average minutes per session.
    pub duration_minutes_per_session: u8,
}

impl ExerciseAnswer {
    /// Create a new answer. No range check is performed here.
    #[must_use]
    pub const fn new(frequency_days_per_week: u8, duration_minutes_per_session: u8) -> Self {
        Self {
            frequency_days_per_week,
            duration_minutes_per_session,
        }
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// The three answer categories, in questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    SelfEfficacy,
    StageOfChange,
    PhysicalActivity,
}

impl Category {
    /// All categories in questionnaire order.
    pub const ALL: [Category; 3] = [
        Category::SelfEfficacy,
        Category::StageOfChange,
        Category::PhysicalActivity,
    ];

    /// Name of the assessment that fills this category.
    #[must_use]
    pub fn assessment_name(&self) -> &'static str {
        match self {
            Category::SelfEfficacy => "Self-Efficacy",
            Category::StageOfChange => "Stages of Change",
            Category::PhysicalActivity => "Physical Activity",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.assessment_name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the tracker.
///
/// An unanswered category is NOT an error; it produces a completion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HbctError {
    /// A numeric input fell outside its form bounds.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u8,
        max: u8,
    },

    /// A stage label outside the five known stages.
    #[error("Unknown stage of change: {0}")]
    UnknownStage(String),

    /// A page label outside the known pages.
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Input that could not be parsed at all.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No session with the given id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The session registry is full.
    #[error("Session limit reached ({0} active sessions)")]
    SessionLimit(usize),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration file or variable could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_parse_is_case_insensitive() {
        assert_eq!(
            "contemplation".parse::<StageOfChange>(),
            Ok(StageOfChange::Contemplation)
        );
        assert_eq!(
            "  MAINTENANCE ".parse::<StageOfChange>(),
            Ok(StageOfChange::Maintenance)
        );
    }

    #[test]
    fn stage_parse_rejects_unknown_label() {
        assert_eq!(
            "Relapse".parse::<StageOfChange>(),
            Err(HbctError::UnknownStage("Relapse".to_string()))
        );
    }

    #[test]
    fn stage_labels_round_trip_through_display() {
        for stage in StageOfChange::ALL {
            assert_eq!(stage.to_string().parse::<StageOfChange>(), Ok(stage));
        }
    }


    #[test]
    fn category_order_matches_questionnaire() {
        let names: Vec<_> = Category::ALL.iter().map(Category::assessment_name).collect();
        assert_eq!(
            names,
            vec!["Self-Efficacy", "Stages of Change", "Physical Activity"]
        );
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = HbctError::OutOfRange {
            field: "Self-efficacy score",
            value: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Self-efficacy score must be between 1 and 10, got 11"
        );
    }
}
