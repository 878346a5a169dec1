//! Integration tests for tracker CLI commands.
//!
//! The interactive questionnaire is driven with in-memory input and output;
//! tempfile is used for config-file tests.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use hbct::cli::{Questionnaire, build_state, render_pages, render_results};
use hbct::config::{Config, LogFormat};
use hbct_core::{ExerciseAnswer, HbctError, ResultsView, SelfEfficacyAnswer, StageOfChange};
use std::io::Cursor;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Run the questionnaire on scripted input; return the final state and transcript.
fn run_script(lines: &[&str]) -> (hbct_core::AssessmentState, String) {
    let input = Cursor::new(lines.join("\n") + "\n");
    let mut questionnaire = Questionnaire::new(input, Vec::new());
    questionnaire.run().unwrap();
    let state = questionnaire.state().clone();
    let transcript = String::from_utf8(questionnaire.into_output()).unwrap();
    (state, transcript)
}

// =============================================================================
// INTERACTIVE QUESTIONNAIRE TESTS
// =============================================================================

#[test]
fn test_full_walkthrough_produces_recommendations() {
    let (state, transcript) = run_script(&[
        "2", "3", "", // Self-Efficacy: score 3, submit
        "3", "2", "y", // Stages of Change: Contemplation, submit
        "4", "2", "20", "", // Physical Activity: 2 days, 20 minutes, submit
        "5", // Results
        "quit",
    ]);

    assert_eq!(state.self_efficacy(), Some(SelfEfficacyAnswer::new(3)));
    assert_eq!(state.stage(), Some(StageOfChange::Contemplation));
    assert_eq!(state.exercise(), Some(ExerciseAnswer::new(2, 20)));

    assert!(transcript.contains("Your self-efficacy score is: 3."));
    assert!(transcript.contains("Your current stage of change is: Contemplation."));
    assert!(transcript.contains(
        "You engage in exercise 2 days per week for an average of 20 minutes per session."
    ));
    assert!(transcript.contains("Recommendations:"));
    assert!(transcript.contains("- Consider focusing on building confidence"));
    assert!(transcript.contains("- Contemplation:"));
    assert!(transcript.trim_end().ends_with("Goodbye."));
}

#[test]
fn test_blank_answers_take_defaults() {
    let (state, _) = run_script(&["Self-Efficacy", "", "", "physical activity", "", "", ""]);

    assert_eq!(state.self_efficacy(), Some(SelfEfficacyAnswer::new(5)));
    assert_eq!(state.exercise(), Some(ExerciseAnswer::new(3, 30)));
}

#[test]
fn test_out_of_range_input_is_asked_again() {
    let (state, transcript) = run_script(&["2", "11", "abc", "9", "y"]);

    assert_eq!(state.self_efficacy(), Some(SelfEfficacyAnswer::new(9)));
    assert!(transcript.contains("Self-efficacy score must be between 1 and 10, got 11"));
    assert!(transcript.contains("must be a whole number"));
}

#[test]
fn test_declined_submit_stores_nothing() {
    let (state, transcript) = run_script(&["3", "Action", "n", "quit"]);

    assert!(!state.has_stage());
    assert!(transcript.contains("Not submitted."));
}

#[test]
fn test_unclear_confirmation_is_asked_again() {
    let (state, transcript) = run_script(&["3", "Action", "maybe", "n", "quit"]);

    assert!(!state.has_stage());
    assert!(transcript.contains("Please answer 'y' or 'n'."));
    assert_eq!(transcript.matches("Submit Stage of Change? [Y/n]: ").count(), 2);
    assert!(transcript.contains("Not submitted."));
}

#[test]
fn test_unclear_confirmation_keeps_previous_answer() {
    let (state, _) = run_script(&["3", "Action", "y", "3", "Maintenance", "ok", "no", "quit"]);

    assert_eq!(state.stage(), Some(StageOfChange::Action));
}

#[test]
fn test_results_before_answers_show_prompts() {
    let (_, transcript) = run_script(&["Results", "quit"]);

    assert!(transcript.contains("Please complete the Self-Efficacy assessment first."));
    assert!(transcript.contains("Please complete the Stages of Change assessment first."));
    assert!(transcript.contains("Please complete the Physical Activity assessment first."));
    assert!(!transcript.contains("Recommendations:"));
}

#[test]
fn test_reset_clears_session() {
    let (state, transcript) = run_script(&["2", "8", "", "reset", "quit"]);

    assert!(!state.has_self_efficacy());
    assert!(transcript.contains("Session cleared."));
}

#[test]
fn test_unknown_page_keeps_menu_running() {
    let (_, transcript) = run_script(&["Settings", "1", "quit"]);

    assert!(transcript.contains("Unknown page: Settings"));
    assert!(transcript.contains("Welcome to the Health Behavior Change Tracker"));
}

#[test]
fn test_end_of_input_mid_form_exits_cleanly() {
    let input = Cursor::new("4\n2\n");
    let mut questionnaire = Questionnaire::new(input, Vec::new());

    assert!(questionnaire.run().is_ok());
    assert!(!questionnaire.state().has_exercise());
}

// =============================================================================
// RESULTS COMMAND TESTS
// =============================================================================

#[test]
fn test_build_state_from_flags() {
    let state = build_state(Some(8), Some("5"), Some(5), Some(45)).unwrap();

    assert_eq!(state.stage(), Some(StageOfChange::Maintenance));
    assert!(state.is_complete());
}

#[test]
fn test_build_state_rejects_bad_flags() {
    assert!(matches!(
        build_state(Some(0), None, None, None),
        Err(HbctError::OutOfRange { .. })
    ));
    assert!(matches!(
        build_state(None, Some("later"), None, None),
        Err(HbctError::UnknownStage(_))
    ));
    assert!(matches!(
        build_state(None, None, Some(3), None),
        Err(HbctError::InvalidInput(_))
    ));
}

#[test]
fn test_render_results_text_and_json() {
    let state = build_state(Some(3), Some("Contemplation"), Some(2), Some(20)).unwrap();
    let view = ResultsView::from_state(&state);

    let text = render_results(&view, false);
    assert!(text.starts_with("Health Behavior Change Results"));
    assert!(text.contains("Self-Efficacy Score: 3"));

    let json: serde_json::Value = serde_json::from_str(&render_results(&view, true)).unwrap();
    assert_eq!(json["complete"], true);
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 5);
}

#[test]
fn test_render_results_partial() {
    let state = build_state(None, Some("Action"), None, None).unwrap();
    let view = ResultsView::from_state(&state);

    let json: serde_json::Value = serde_json::from_str(&render_results(&view, true)).unwrap();
    assert_eq!(json["complete"], false);
    assert_eq!(json["summary"][1], "Stage of Change: Action");
    assert!(json["recommendations"].as_array().unwrap().is_empty());
}

#[test]
fn test_render_pages() {
    let text = render_pages(false);
    assert!(text.contains("3. Stages of Change"));

    let json: serde_json::Value = serde_json::from_str(&render_pages(true)).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 5);
    assert_eq!(json[0]["label"], "Home");
}

// =============================================================================
// CONFIG FILE TESTS
// =============================================================================

#[test]
fn test_config_file_is_loaded() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hbct.toml");
    std::fs::write(
        &path,
        "[server]\nhost = \"0.0.0.0\"\nport = 9090\nmax_sessions = 5\nsession_ttl_secs = 120\n\n[log]\nformat = \"json\"\n",
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    assert_eq!(config.server.max_sessions, 5);
    assert_eq!(config.server.session_ttl_secs, 120);
    assert_eq!(config.log.format, LogFormat::Json);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = Config::from_file(&temp.path().join("absent.toml"));
    assert!(matches!(result, Err(HbctError::ConfigError(_))));
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    assert!(matches!(
        Config::from_file(&path),
        Err(HbctError::ConfigError(_))
    ));
}
