//! # Session Module
//!
//! The assessment store for one questionnaire session.
//!
//! - State is session-local and volatile
//! - Never written to disk
//! - Re-submission overwrites; no history is kept
//! - Cleared on session reset
//!
//! The store is a plain value. Callers own one per session and pass it by
//! reference to the recommendation engine.

use crate::{Category, ExerciseAnswer, SelfEfficacyAnswer, StageOfChange};
use serde::Serialize;

/// The answers collected so far in one session.
///
/// Each category is either fully absent or fully present. The exercise
/// answer holds both numbers, so a half-submitted exercise form cannot be
/// represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentState {
    self_efficacy: Option<SelfEfficacyAnswer>,
    stage: Option<StageOfChange>,
    exercise: Option<ExerciseAnswer>,
}

impl AssessmentState {
    /// Create an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Record the self-efficacy answer, replacing any earlier one.
    pub fn set_self_efficacy(&mut self, answer: SelfEfficacyAnswer) {
        self.self_efficacy = Some(answer);
    }

    /// Record the stage of change, replacing any earlier one.
    pub fn set_stage(&mut self, stage: StageOfChange) {
        self.stage = Some(stage);
    }

    /// Record the exercise answer, replacing any earlier one.
    pub fn set_exercise(&mut self, answer: ExerciseAnswer) {
        self.exercise = Some(answer);
    }

    /// Forget every answer.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn has_self_efficacy(&self) -> bool {
        self.self_efficacy.is_some()
    }

    #[must_use]
    pub fn has_stage(&self) -> bool {
        self.stage.is_some()
    }

    #[must_use]
    pub fn has_exercise(&self) -> bool {
        self.exercise.is_some()
    }

    #[must_use]
    pub fn self_efficacy(&self) -> Option<SelfEfficacyAnswer> {
        self.self_efficacy
    }

    #[must_use]
    pub fn stage(&self) -> Option<StageOfChange> {
        self.stage
    }

    #[must_use]
    pub fn exercise(&self) -> Option<ExerciseAnswer> {
        self.exercise
    }

    /// Check whether a category has been answered.
    #[must_use]
    pub fn has(&self, category: Category) -> bool {
        match category {
            Category::SelfEfficacy => self.has_self_efficacy(),
            Category::StageOfChange => self.has_stage(),
            Category::PhysicalActivity => self.has_exercise(),
        }
    }

    /// Check whether all three categories have been answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|c| self.has(*c))
    }

    /// Categories not yet answered, in questionnaire order.
    pub fn missing(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| !self.has(*c))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = AssessmentState::new();
        assert!(!state.has_self_efficacy());
        assert!(!state.has_stage());
        assert!(!state.has_exercise());
        assert!(!state.is_complete());
        assert_eq!(state.missing().count(), 3);
    }

    #[test]
    fn setters_populate_each_category() {
        let mut state = AssessmentState::new();

        state.set_self_efficacy(SelfEfficacyAnswer::new(7));
        assert_eq!(state.self_efficacy(), Some(SelfEfficacyAnswer::new(7)));
        assert!(!state.is_complete());

        state.set_stage(StageOfChange::Action);
        assert_eq!(state.stage(), Some(StageOfChange::Action));

        state.set_exercise(ExerciseAnswer::new(4, 45));
        assert_eq!(state.exercise(), Some(ExerciseAnswer::new(4, 45)));
        assert!(state.is_complete());
        assert_eq!(state.missing().count(), 0);
    }

    #[test]
    fn resubmission_overwrites() {
        let mut state = AssessmentState::new();
        state.set_stage(StageOfChange::Precontemplation);
        state.set_stage(StageOfChange::Maintenance);
        assert_eq!(state.stage(), Some(StageOfChange::Maintenance));

        state.set_exercise(ExerciseAnswer::new(1, 10));
        state.set_exercise(ExerciseAnswer::new(5, 60));
        assert_eq!(state.exercise(), Some(ExerciseAnswer::new(5, 60)));
    }

    #[test]
    fn missing_preserves_questionnaire_order() {
        let mut state = AssessmentState::new();
        state.set_stage(StageOfChange::Preparation);

        let missing: Vec<_> = state.missing().collect();
        assert_eq!(
            missing,
            vec![Category::SelfEfficacy, Category::PhysicalActivity]
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = AssessmentState::new();
        state.set_self_efficacy(SelfEfficacyAnswer::new(2));
        state.set_stage(StageOfChange::Contemplation);
        state.set_exercise(ExerciseAnswer::new(2, 20));

        state.clear();
        assert_eq!(state, AssessmentState::new());
    }
}
