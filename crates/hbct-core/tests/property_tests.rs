//! # Property-Based Tests
//!
//! Rule invariants of the recommendation engine, checked with proptest
//! over the full input ranges of every form.

use hbct_core::{
    Advisory, AssessmentState, Category, ExerciseAnswer, ResultsView, SelfEfficacyAnswer,
    StageOfChange, derive_recommendations,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn stage() -> impl Strategy<Value = StageOfChange> {
    prop::sample::select(StageOfChange::ALL.to_vec())
}

fn complete_state(score: u8, stage: StageOfChange, freq: u8, dur: u8) -> AssessmentState {
    let mut state = AssessmentState::new();
    state.set_self_efficacy(SelfEfficacyAnswer::new(score));
    state.set_stage(stage);
    state.set_exercise(ExerciseAnswer::new(freq, dur));
    state
}

/// Any state, each category independently present or absent.
fn any_state() -> impl Strategy<Value = AssessmentState> {
    (
        prop::option::of(1u8..=10),
        prop::option::of(stage()),
        prop::option::of((0u8..=7, 0u8..=120)),
    )
        .prop_map(|(score, stage, exercise)| {
            let mut state = AssessmentState::new();
            if let Some(score) = score {
                state.set_self_efficacy(SelfEfficacyAnswer::new(score));
            }
            if let Some(stage) = stage {
                state.set_stage(stage);
            }
            if let Some((freq, dur)) = exercise {
                state.set_exercise(ExerciseAnswer::new(freq, dur));
            }
            state
        })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// The confidence advisory appears exactly when the score is below 5.
    #[test]
    fn confidence_advisory_iff_low_score(score in 1u8..=10, stage in stage()) {
        let state = complete_state(score, stage, 4, 40);
        let advisories = derive_recommendations(&state);
        prop_assert_eq!(advisories.contains(&Advisory::BuildConfidence), score < 5);
    }

    /// Exactly one stage line, and it is the submitted stage.
    #[test]
    fn exactly_one_matching_stage_line(
        score in 1u8..=10,
        stage in stage(),
        freq in 0u8..=7,
        dur in 0u8..=120
    ) {
        let state = complete_state(score, stage, freq, dur);
        let stage_lines: Vec<_> = derive_recommendations(&state)
            .into_iter()
            .filter(|a| matches!(a, Advisory::Stage(_)))
            .collect();
        prop_assert_eq!(stage_lines, vec![Advisory::Stage(stage)]);
    }

    /// Frequency and duration advisories fire independently.
    #[test]
    fn exercise_advisories_are_independent(
        stage in stage(),
        freq in 0u8..=7,
        dur in 0u8..=120
    ) {
        let state = complete_state(7, stage, freq, dur);
        let advisories = derive_recommendations(&state);
        prop_assert_eq!(advisories.contains(&Advisory::IncreaseFrequency), freq < 3);
        prop_assert_eq!(advisories.contains(&Advisory::IncreaseDuration), dur < 30);
    }

    /// Complete sessions keep the fixed order and always close.
    #[test]
    fn complete_output_keeps_fixed_order(
        score in 1u8..=10,
        stage in stage(),
        freq in 0u8..=7,
        dur in 0u8..=120
    ) {
        let state = complete_state(score, stage, freq, dur);
        let advisories = derive_recommendations(&state);

        let mut expected = Vec::new();
        if score < 5 {
            expected.push(Advisory::BuildConfidence);
        }
        expected.push(Advisory::Stage(stage));
        if freq < 3 {
            expected.push(Advisory::IncreaseFrequency);
        }
        if dur < 30 {
            expected.push(Advisory::IncreaseDuration);
        }
        expected.push(Advisory::Closing);

        prop_assert_eq!(advisories, expected);
    }

    /// Incomplete sessions get one prompt per missing category and nothing else.
    #[test]
    fn incomplete_state_only_prompts(state in any_state()) {
        prop_assume!(!state.is_complete());

        let advisories = derive_recommendations(&state);
        let expected: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| !state.has(*c))
            .map(Advisory::CompleteAssessment)
            .collect();
        prop_assert_eq!(advisories, expected);
    }

    /// Same state, same output.
    #[test]
    fn derivation_is_idempotent(state in any_state()) {
        let first = derive_recommendations(&state);
        let second = derive_recommendations(&state);
        prop_assert_eq!(first, second);
        prop_assert_eq!(ResultsView::from_state(&state), ResultsView::from_state(&state));
    }

    /// The Results view always has one summary line per category.
    #[test]
    fn results_view_summarizes_every_category(state in any_state()) {
        let view = ResultsView::from_state(&state);
        prop_assert_eq!(view.summary.len(), 3);
        prop_assert_eq!(view.complete, state.is_complete());
        prop_assert_eq!(view.recommendations.is_empty(), !state.is_complete());
    }
}

// =============================================================================
// END-TO-END EXAMPLES
// =============================================================================

#[test]
fn struggling_contemplator_gets_five_lines() {
    let state = complete_state(3, StageOfChange::Contemplation, 2, 20);
    let lines: Vec<_> = derive_recommendations(&state)
        .iter()
        .map(|a| a.text())
        .collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Consider focusing on building confidence"));
    assert!(lines[1].starts_with("Contemplation:"));
    assert!(lines[2].contains("exercise frequency"));
    assert!(lines[3].contains("session duration"));
    assert!(lines[4].starts_with("Keep up the great work"));
}

#[test]
fn active_maintainer_gets_two_lines() {
    let state = complete_state(8, StageOfChange::Maintenance, 5, 45);
    let lines: Vec<_> = derive_recommendations(&state)
        .iter()
        .map(|a| a.text())
        .collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Maintenance:"));
    assert!(lines[1].starts_with("Keep up the great work"));
}
