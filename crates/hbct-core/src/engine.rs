//! # Recommendation Engine
//!
//! Derives the ordered advisory list for a session.
//!
//! ## Rules
//!
//! | Step | Condition | Advisory |
//! |------|-----------|----------|
//! | 0 | category unanswered | completion prompt for that category |
//! | 1 | score < 5 | build confidence |
//! | 2 | always | one line for the stage of change |
//! | 3 | frequency < 3 days | increase frequency |
//! | 4 | duration < 30 minutes | increase duration |
//! | 5 | always | closing encouragement |
//!
//! Steps 1 to 5 run only when every category is answered. Steps 1, 3 and 4
//! are independent of each other, so zero to three of them fire per call.
//! Output order is user visible and must not change.

use crate::{AssessmentState, Category, ExerciseAnswer, SelfEfficacyAnswer, StageOfChange};
use serde::{Deserialize, Serialize};

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Scores below this trigger the confidence-building advisory.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 5;

/// Fewer exercise days per week than this trigger the frequency advisory.
pub const MIN_FREQUENCY_DAYS: u8 = 3;

/// Shorter sessions than this (in minutes) trigger the duration advisory.
pub const MIN_DURATION_MINUTES: u8 = 30;

// =============================================================================
// ADVISORY
// =============================================================================

/// One line of recommendation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "subject", rename_all = "snake_case")]
pub enum Advisory {
    /// The category has not been answered yet.
    CompleteAssessment(Category),
    /// Self-efficacy score is low.
    BuildConfidence,
    /// Stage-specific guidance.
    Stage(StageOfChange),
    /// Too few exercise days per week.
    IncreaseFrequency,
    /// Exercise sessions are too short.
    IncreaseDuration,
    /// Always closes a full recommendation list.
    Closing,
}

impl Advisory {
    /// The user-visible text of this advisory.
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Advisory::CompleteAssessment(category) => completion_prompt(*category),
            Advisory::BuildConfidence => {
                "Consider focusing on building confidence in your ability to engage in health \
                 behaviors. Small, consistent actions can improve self-efficacy over time."
            }
            Advisory::Stage(stage) => stage_advice(*stage),
            Advisory::IncreaseFrequency => {
                "Physical Activity: You may benefit from increasing your exercise frequency to \
                 3-5 days per week for optimal health benefits."
            }
            Advisory::IncreaseDuration => {
                "Physical Activity: Aim for at least 150 minutes of moderate exercise per week \
                 (30 minutes on most days). Consider increasing your session duration."
            }
            Advisory::Closing => {
                "Keep up the great work, and continue striving for health behavior change!"
            }
        }
    }

    /// Whether the line is listed as a bullet under "Recommendations".
    ///
    /// Completion prompts and the closing line stand on their own.
    #[must_use]
    pub fn is_bullet(&self) -> bool {
        !matches!(self, Advisory::CompleteAssessment(_) | Advisory::Closing)
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

fn completion_prompt(category: Category) -> &'static str {
    match category {
        Category::SelfEfficacy => "Please complete the Self-Efficacy assessment first.",
        Category::StageOfChange => "Please complete the Stages of Change assessment first.",
        Category::PhysicalActivity => "Please complete the Physical Activity assessment first.",
    }
}

fn stage_advice(stage: StageOfChange) -> &'static str {
    match stage {
        StageOfChange::Precontemplation => {
            "Precontemplation: You may not yet be considering behavior change. Reflect on why a \
             health change is important for you."
        }
        StageOfChange::Contemplation => {
            "Contemplation: You're thinking about change but not yet committed. Consider setting \
             small, achievable goals to move forward."
        }
        StageOfChange::Preparation => {
            "Preparation: You're getting ready to make a change. Develop a clear action plan and \
             set a start date."
        }
        StageOfChange::Action => {
            "Action: You're actively working on change. Keep track of your progress and \
             celebrate small wins."
        }
        StageOfChange::Maintenance => {
            "Maintenance: You're maintaining your changes. Keep up the good work and consider \
             ways to prevent relapse."
        }
    }
}

// =============================================================================
// COMPLETENESS
// =============================================================================

/// Per-category answer presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Completeness {
    pub self_efficacy: bool,
    pub stage_of_change: bool,
    pub physical_activity: bool,
}

impl Completeness {
    /// True when every category is answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.self_efficacy && self.stage_of_change && self.physical_activity
    }
}

/// Report which categories of the session are answered.
#[must_use]
pub fn completeness(state: &AssessmentState) -> Completeness {
    Completeness {
        self_efficacy: state.has(Category::SelfEfficacy),
        stage_of_change: state.has(Category::StageOfChange),
        physical_activity: state.has(Category::PhysicalActivity),
    }
}

// =============================================================================
// DERIVATION
// =============================================================================

/// Derive the ordered advisory list for a session.
///
/// Pure: the same state always yields the same list.
#[must_use]
pub fn derive_recommendations(state: &AssessmentState) -> Vec<Advisory> {
    match (state.self_efficacy(), state.stage(), state.exercise()) {
        (Some(confidence), Some(stage), Some(exercise)) => {
            combined_recommendations(confidence, stage, exercise)
        }
        _ => state.missing().map(Advisory::CompleteAssessment).collect(),
    }
}

/// Same as [`derive_recommendations`], rendered to text lines.
#[must_use]
pub fn derive_recommendation_lines(state: &AssessmentState) -> Vec<String> {
    derive_recommendations(state)
        .iter()
        .map(|advisory| advisory.text().to_string())
        .collect()
}

fn combined_recommendations(
    confidence: SelfEfficacyAnswer,
    stage: StageOfChange,
    exercise: ExerciseAnswer,
) -> Vec<Advisory> {
    let mut advisories = Vec::with_capacity(5);

    if confidence.score() < LOW_CONFIDENCE_THRESHOLD {
        advisories.push(Advisory::BuildConfidence);
    }

    advisories.push(Advisory::Stage(stage));

    if exercise.frequency_days_per_week < MIN_FREQUENCY_DAYS {
        advisories.push(Advisory::IncreaseFrequency);
    }
    if exercise.duration_minutes_per_session < MIN_DURATION_MINUTES {
        advisories.push(Advisory::IncreaseDuration);
    }

    advisories.push(Advisory::Closing);
    advisories
}

// =============================================================================
// TESTS
// =============================================================================
