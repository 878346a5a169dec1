//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ApiError, ExerciseRequest, HealthResponse, PagesResponse, ResultsResponse,
        SelfEfficacyRequest, SessionCreatedResponse, SessionResponse, StageRequest,
        SubmitResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use hbct_core::{HbctError, ResultsView, Submission};
use uuid::Uuid;

/// Parse a session id from the URL path.
fn parse_session_id(raw: &str) -> Result<Uuid, HbctError> {
    Uuid::parse_str(raw).map_err(|_| HbctError::InvalidInput(format!("Bad session id: {}", raw)))
}

// =============================================================================
// HEALTH / PAGES
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// List the questionnaire pages.
pub async fn pages_handler() -> impl IntoResponse {
    Json(PagesResponse::default())
}

// =============================================================================
// SESSION LIFECYCLE
// =============================================================================

/// Open a new session.
pub async fn create_session_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreatedResponse>), ApiError> {
    let mut sessions = state.sessions.write().await;
    let id = sessions.create().inspect_err(|e| {
        tracing::warn!("Session rejected: {}", e);
    })?;
    tracing::info!(session = %id, open = sessions.len(), "Session created");

    Ok((
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id: id.to_string(),
        }),
    ))
}

/// Get a session's current answers.
pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&raw_id)?;
    let mut sessions = state.sessions.write().await;
    let store = sessions.get(&id)?;
    Ok(Json(SessionResponse::from_state(id.to_string(), store)))
}

/// End a session and drop its answers.
pub async fn delete_session_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&raw_id)?;
    let mut sessions = state.sessions.write().await;
    sessions.remove(&id)?;
    tracing::info!(session = %id, open = sessions.len(), "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// FORM SUBMISSIONS
// =============================================================================

/// Validate and apply a submission to one session.
async fn submit(
    state: &AppState,
    raw_id: &str,
    submission: Result<Submission, HbctError>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let id = parse_session_id(raw_id)?;
    let submission = submission.inspect_err(|e| {
        tracing::warn!(session = %id, "Submission rejected: {}", e);
    })?;

    let mut sessions = state.sessions.write().await;
    let store = sessions.get_mut(&id)?;
    submission.apply(store);
    tracing::debug!(session = %id, ?submission, "Answer recorded");

    Ok(Json(SubmitResponse::success(submission.confirmation())))
}

/// Submit the Self-Efficacy form.
pub async fn self_efficacy_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(request): Json<SelfEfficacyRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(&state, &raw_id, request.to_submission()).await
}

/// Submit the Stages of Change form.
pub async fn stage_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(request): Json<StageRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(&state, &raw_id, request.to_submission()).await
}

/// Submit the Physical Activity form.
pub async fn exercise_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(request): Json<ExerciseRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(&state, &raw_id, request.to_submission()).await
}

// =============================================================================
// RESULTS
// =============================================================================

/// Results page: echoed answers, completion prompts and recommendations.
pub async fn results_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let id = parse_session_id(&raw_id)?;
    let mut sessions = state.sessions.write().await;
    let view = ResultsView::from_state(sessions.get(&id)?);
    Ok(Json(ResultsResponse::from_view(id.to_string(), &view)))
}
