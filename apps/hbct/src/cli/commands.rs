//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::Questionnaire;
use crate::{api, config::Config};
use hbct_core::{AssessmentState, HbctError, Page, ResultsView, Submission, forms};

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Run the interactive questionnaire on stdin/stdout.
pub fn cmd_run() -> Result<(), HbctError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut questionnaire = Questionnaire::new(stdin.lock(), stdout.lock());
    questionnaire.run()?;

    tracing::debug!(
        complete = questionnaire.state().is_complete(),
        "Questionnaire session ended"
    );
    Ok(())
}

// =============================================================================
// RESULTS COMMAND
// =============================================================================

/// Build a session from command-line answers.
///
/// Every given answer goes through the same form validation as the
/// interactive pages. Frequency and duration must be given together.
pub fn build_state(
    confidence: Option<i64>,
    stage: Option<&str>,
    frequency: Option<i64>,
    duration: Option<i64>,
) -> Result<AssessmentState, HbctError> {
    let mut state = AssessmentState::new();

    if let Some(score) = confidence {
        Submission::self_efficacy(score)?.apply(&mut state);
    }
    if let Some(stage) = stage {
        Submission::Stage(forms::parse_stage_choice(stage)?).apply(&mut state);
    }
    match (frequency, duration) {
        (Some(frequency), Some(duration)) => {
            Submission::exercise(frequency, duration)?.apply(&mut state);
        }
        (None, None) => {}
        _ => {
            return Err(HbctError::InvalidInput(
                "frequency and duration must be given together".to_string(),
            ));
        }
    }

    Ok(state)
}

/// Render the Results page as text or pretty JSON.
pub fn render_results(view: &ResultsView, json_mode: bool) -> String {
    if json_mode {
        let output = serde_json::json!({
            "complete": view.complete,
            "summary": view.summary,
            "recommendations": view.recommendation_lines(),
        });
        serde_json::to_string_pretty(&output).unwrap_or_default()
    } else {
        view.to_string()
    }
}

/// Show the Results page for the given answers.
pub fn cmd_results(
    json_mode: bool,
    confidence: Option<i64>,
    stage: Option<&str>,
    frequency: Option<i64>,
    duration: Option<i64>,
) -> Result<(), HbctError> {
    let state = build_state(confidence, stage, frequency, duration)?;
    let view = ResultsView::from_state(&state);

    tracing::debug!(complete = view.complete, "Rendering results");
    print!("{}", render_results(&view, json_mode));
    if json_mode {
        println!();
    }
    Ok(())
}

// =============================================================================
// PAGES COMMAND
// =============================================================================

/// Render the page list as text or pretty JSON.
pub fn render_pages(json_mode: bool) -> String {
    if json_mode {
        let pages: Vec<_> = Page::ALL
            .iter()
            .map(|page| {
                serde_json::json!({
                    "label": page.label(),
                    "header": page.header(),
                })
            })
            .collect();
        return serde_json::to_string_pretty(&pages).unwrap_or_default();
    }

    let mut out = String::from("Navigation\n==========\n");
    for (i, page) in Page::ALL.iter().enumerate() {
        out.push_str(&format!("{}. {:<18} {}\n", i + 1, page.label(), page.header()));
    }
    out
}

/// List the questionnaire pages.
pub fn cmd_pages(json_mode: bool) -> Result<(), HbctError> {
    println!("{}", render_pages(json_mode).trim_end());
    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server. Flags override the config.
pub async fn cmd_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), HbctError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("Health Behavior Change Tracker Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:         {}", config.server.host);
    println!("  Port:         {}", config.server.port);
    println!("  Rate limit:   {}/s", config.server.rate_limit);
    println!("  Max sessions: {}", config.server.max_sessions);
    println!("  Session TTL:  {}s", config.server.session_ttl_secs);
    println!();
    println!("Endpoints:");
    println!("  POST   /sessions                    - Open a session");
    println!("  PUT    /sessions/{{id}}/self-efficacy - Submit self-efficacy");
    println!("  PUT    /sessions/{{id}}/stage         - Submit stage of change");
    println!("  PUT    /sessions/{{id}}/exercise      - Submit physical activity");
    println!("  GET    /sessions/{{id}}/results       - Results page");
    println!("  DELETE /sessions/{{id}}               - End a session");
    println!("  GET    /health                      - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config.bind_addr(), &config.server).await
}
