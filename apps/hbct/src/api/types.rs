//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use axum::{Json, http::StatusCode, response::IntoResponse};
use hbct_core::{
    AssessmentState, Completeness, HbctError, Page, ResultsView, StageOfChange, Submission,
    completeness,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// PAGES RESPONSE
// =============================================================================

/// One entry of the page selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub label: String,
    pub header: String,
    pub intro: Option<String>,
}

impl From<Page> for PageInfo {
    fn from(page: Page) -> Self {
        Self {
            label: page.label().to_string(),
            header: page.header().to_string(),
            intro: page.intro().map(str::to_string),
        }
    }
}

/// Page selector listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesResponse {
    pub pages: Vec<PageInfo>,
}

impl Default for PagesResponse {
    fn default() -> Self {
        Self {
            pages: Page::ALL.into_iter().map(PageInfo::from).collect(),
        }
    }
}

// =============================================================================
// SESSION RESPONSES
// =============================================================================

/// Returned when a session is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

/// Exercise answer as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseJson {
    pub frequency: u8,
    pub duration: u8,
}

/// Current answers of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub self_efficacy: Option<u8>,
    pub stage: Option<StageOfChange>,
    pub exercise: Option<ExerciseJson>,
    pub completeness: Completeness,
}

impl SessionResponse {
    /// Snapshot a session's store.
    #[must_use]
    pub fn from_state(session_id: String, state: &AssessmentState) -> Self {
        Self {
            session_id,
            self_efficacy: state.self_efficacy().map(|a| a.score()),
            stage: state.stage(),
            exercise: state.exercise().map(|a| ExerciseJson {
                frequency: a.frequency_days_per_week,
                duration: a.duration_minutes_per_session,
            }),
            completeness: completeness(state),
        }
    }
}

// =============================================================================
// SUBMISSION REQUESTS/RESPONSE
// =============================================================================

/// Self-efficacy form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfEfficacyRequest {
    pub score: i64,
}

impl SelfEfficacyRequest {
    pub fn to_submission(&self) -> Result<Submission, HbctError> {
        Submission::self_efficacy(self.score)
    }
}

/// Stages of Change form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRequest {
    pub stage: String,
}

impl StageRequest {
    pub fn to_submission(&self) -> Result<Submission, HbctError> {
        Submission::stage(&self.stage)
    }
}

/// Physical Activity form body. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRequest {
    pub frequency: i64,
    pub duration: i64,
}

impl ExerciseRequest {
    pub fn to_submission(&self) -> Result<Submission, HbctError> {
        Submission::exercise(self.frequency, self.duration)
    }
}

/// Accepted form submission. Rejections are reported as [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    /// Confirmation text for the stored answer.
    pub message: String,
}

impl SubmitResponse {
    #[must_use]
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

// =============================================================================
// RESULTS RESPONSE
// =============================================================================

/// The Results page for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub session_id: String,
    pub complete: bool,
    pub summary: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ResultsResponse {
    #[must_use]
    pub fn from_view(session_id: String, view: &ResultsView) -> Self {
        Self {
            session_id,
            complete: view.complete,
            summary: view.summary.clone(),
            recommendations: view.recommendation_lines(),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error body for every 4xx and 5xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An `HbctError` rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub HbctError);

impl ApiError {
    /// HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        status_for(&self.0)
    }
}

impl From<HbctError> for ApiError {
    fn from(err: HbctError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Map a tracker error to an HTTP status.
#[must_use]
pub fn status_for(err: &HbctError) -> StatusCode {
    match err {
        HbctError::OutOfRange { .. }
        | HbctError::UnknownStage(_)
        | HbctError::UnknownPage(_)
        | HbctError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        HbctError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        HbctError::SessionLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
        HbctError::IoError(_) | HbctError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
