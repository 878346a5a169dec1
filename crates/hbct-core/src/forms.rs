//! # Forms
//!
//! The input-collection boundary. Every answer enters the store through a
//! [`Submission`], and every submission is range-checked here, so the store
//! itself never validates.
//!
//! Each numeric field carries its question wording, bounds and default.
//! Empty input selects the default, mirroring a slider left untouched.

use crate::{
    AssessmentState, DURATION_MAX, DURATION_MIN, ExerciseAnswer, FREQUENCY_MAX, FREQUENCY_MIN,
    HbctError, SELF_EFFICACY_MAX, SELF_EFFICACY_MIN, SelfEfficacyAnswer, StageOfChange,
};

// =============================================================================
// NUMERIC FIELDS
// =============================================================================

/// A bounded integer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberField {
    /// Short name used in error messages.
    pub name: &'static str,
    /// Question shown next to the input.
    pub question: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl NumberField {
    /// Accept `value` if it lies within the bounds.
    pub fn check(&self, value: i64) -> Result<u8, HbctError> {
        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(HbctError::OutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        u8::try_from(value).map_err(|_| HbctError::OutOfRange {
            field: self.name,
            value,
            min: self.min,
            max: self.max,
        })
    }

    /// Parse typed input. Blank input selects the default.
    pub fn parse(&self, input: &str) -> Result<u8, HbctError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(self.default);
        }
        let value: i64 = trimmed.parse().map_err(|_| {
            HbctError::InvalidInput(format!("{} must be a whole number, got '{}'", self.name, trimmed))
        })?;
        self.check(value)
    }
}

/// Self-efficacy slider, 1 to 10, default 5.
pub const CONFIDENCE_FIELD: NumberField = NumberField {
    name: "Self-efficacy score",
    question: "On a scale from 1 to 10, how confident are you in your ability to make a lasting \
               change in your health behaviors?",
    min: SELF_EFFICACY_MIN,
    max: SELF_EFFICACY_MAX,
    default: 5,
};

/// Exercise days per week, 0 to 7, default 3.
pub const FREQUENCY_FIELD: NumberField = NumberField {
    name: "Exercise frequency",
    question: "How many days per week do you engage in moderate or strenuous exercise?",
    min: FREQUENCY_MIN,
    max: FREQUENCY_MAX,
    default: 3,
};

/// Minutes per exercise session, 0 to 120, default 30.
pub const DURATION_FIELD: NumberField = NumberField {
    name: "Exercise duration",
    question: "On average, how many minutes per session do you engage in moderate or strenuous \
               exercise?",
    min: DURATION_MIN,
    max: DURATION_MAX,
    default: 30,
};

/// Question for the stage-of-change choice.
pub const STAGE_QUESTION: &str =
    "Which of the following best describes your current stage of behavior change?";

/// Parse a stage choice given as a 1-based option number or a label.
pub fn parse_stage_choice(input: &str) -> Result<StageOfChange, HbctError> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| StageOfChange::ALL.get(i).copied())
            .ok_or(HbctError::OutOfRange {
                field: "Stage option",
                value: i64::try_from(index).unwrap_or(i64::MAX),
                min: 1,
                max: StageOfChange::ALL.len() as u8,
            });
    }
    trimmed.parse()
}

// =============================================================================
// SUBMISSIONS
// =============================================================================

/// A validated form submission, ready to write into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    SelfEfficacy(SelfEfficacyAnswer),
    Stage(StageOfChange),
    Exercise(ExerciseAnswer),
}

impl Submission {
    /// Validate a self-efficacy score.
    pub fn self_efficacy(score: i64) -> Result<Self, HbctError> {
        let score = CONFIDENCE_FIELD.check(score)?;
        Ok(Self::SelfEfficacy(SelfEfficacyAnswer::new(score)))
    }

    /// Validate a stage label.
    pub fn stage(label: &str) -> Result<Self, HbctError> {
        Ok(Self::Stage(label.parse()?))
    }

    /// Validate both exercise numbers. Nothing is accepted unless both are.
    pub fn exercise(frequency: i64, duration: i64) -> Result<Self, HbctError> {
        let frequency = FREQUENCY_FIELD.check(frequency)?;
        let duration = DURATION_FIELD.check(duration)?;
        Ok(Self::Exercise(ExerciseAnswer::new(frequency, duration)))
    }

    /// Write the answer into the session, overwriting the previous one.
    pub fn apply(&self, state: &mut AssessmentState) {
        match *self {
            Submission::SelfEfficacy(answer) => state.set_self_efficacy(answer),
            Submission::Stage(stage) => state.set_stage(stage),
            Submission::Exercise(answer) => state.set_exercise(answer),
        }
    }

    /// Confirmation shown after a successful submit.
    #[must_use]
    pub fn confirmation(&self) -> String {
        match self {
            Submission::SelfEfficacy(answer) => format!(
                "Your self-efficacy score is: {}. Higher scores indicate greater confidence in \
                 making health changes.",
                answer.score()
            ),
            Submission::Stage(stage) => format!("Your current stage of change is: {}.", stage),
            Submission::Exercise(answer) => format!(
                "You engage in exercise {} days per week for an average of {} minutes per session.",
                answer.frequency_days_per_week, answer.duration_minutes_per_session
            ),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_forms() {
        assert_eq!(CONFIDENCE_FIELD.default, 5);
        assert_eq!(FREQUENCY_FIELD.default, 3);
        assert_eq!(DURATION_FIELD.default, 30);
    }

    #[test]
    fn blank_input_selects_default() {
        assert_eq!(CONFIDENCE_FIELD.parse(""), Ok(5));
        assert_eq!(DURATION_FIELD.parse("   "), Ok(30));
    }

    #[test]
    fn parse_rejects_out_of_range_and_garbage() {
        assert!(matches!(
            CONFIDENCE_FIELD.parse("0"),
            Err(HbctError::OutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            FREQUENCY_FIELD.parse("8"),
            Err(HbctError::OutOfRange { value: 8, .. })
        ));
        assert!(matches!(
            DURATION_FIELD.parse("-1"),
            Err(HbctError::OutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            DURATION_FIELD.parse("half an hour"),
            Err(HbctError::InvalidInput(_))
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(CONFIDENCE_FIELD.check(1), Ok(1));
        assert_eq!(CONFIDENCE_FIELD.check(10), Ok(10));
        assert_eq!(FREQUENCY_FIELD.check(0), Ok(0));
        assert_eq!(DURATION_FIELD.check(120), Ok(120));
    }

    #[test]
    fn submissions_are_only_built_from_checked_values() {
        assert!(matches!(
            Submission::self_efficacy(200),
            Err(HbctError::OutOfRange { value: 200, .. })
        ));
        assert!(matches!(
            Submission::stage("Relapse"),
            Err(HbctError::UnknownStage(_))
        ));
        assert_eq!(
            Submission::self_efficacy(10),
            Ok(Submission::SelfEfficacy(SelfEfficacyAnswer::new(10)))
        );
    }

    #[test]
    fn stage_choice_accepts_number_or_label() {
        assert_eq!(parse_stage_choice("1"), Ok(StageOfChange::Precontemplation));
        assert_eq!(parse_stage_choice("5"), Ok(StageOfChange::Maintenance));
        assert_eq!(parse_stage_choice("action"), Ok(StageOfChange::Action));
        assert!(parse_stage_choice("0").is_err());
        assert!(parse_stage_choice("6").is_err());
        assert!(parse_stage_choice("someday").is_err());
    }

    #[test]
    fn exercise_submission_is_all_or_nothing() {
        let mut state = AssessmentState::new();
        assert!(Submission::exercise(3, 500).is_err());
        assert!(Submission::exercise(9, 30).is_err());
        assert!(!state.has_exercise());

        Submission::exercise(3, 45).map(|s| s.apply(&mut state)).ok();
        assert_eq!(state.exercise(), Some(ExerciseAnswer::new(3, 45)));
    }

    #[test]
    fn confirmations_echo_the_answer() {
        let submission = Submission::self_efficacy(7).ok();
        assert_eq!(
            submission.map(|s| s.confirmation()),
            Some(
                "Your self-efficacy score is: 7. Higher scores indicate greater confidence in \
                 making health changes."
                    .to_string()
            )
        );

        assert_eq!(
            Submission::Stage(StageOfChange::Action).confirmation(),
            "Your current stage of change is: Action."
        );
        assert_eq!(
            Submission::Exercise(ExerciseAnswer::new(2, 20)).confirmation(),
            "You engage in exercise 2 days per week for an average of 20 minutes per session."
        );
    }
}
