//! # Tracker HTTP API Module
//!
//! This module implements the HTTP REST API server using axum. Each client
//! session gets its own assessment store, held in memory only.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /pages` - Page selector listing
//! - `POST /sessions` - Open a session
//! - `GET /sessions/{id}` - Current answers and completeness
//! - `DELETE /sessions/{id}` - End a session
//! - `PUT /sessions/{id}/self-efficacy` - Submit the Self-Efficacy form
//! - `PUT /sessions/{id}/stage` - Submit the Stages of Change form
//! - `PUT /sessions/{id}/exercise` - Submit the Physical Activity form
//! - `GET /sessions/{id}/results` - Results page
//!
//! ## Configuration
//!
//! See [`crate::config::ServerConfig`]: CORS origins, rate limit and
//! session cap.

mod handlers;
mod middleware;
mod registry;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use registry::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL_SECS, SessionRegistry};
// Re-export handlers and types for integration tests (via `hbct::api::*`)
pub use handlers::{
    create_session_handler, delete_session_handler, exercise_handler, get_session_handler,
    health_handler, pages_handler, results_handler, self_efficacy_handler, stage_handler,
};
pub use types::{
    ApiError, ErrorResponse, ExerciseJson, ExerciseRequest, HealthResponse, PageInfo,
    PagesResponse, ResultsResponse, SelfEfficacyRequest, SessionCreatedResponse, SessionResponse,
    StageRequest, SubmitResponse, status_for,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use hbct_core::HbctError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the open sessions.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<SessionRegistry>>,
}

impl AppState {
    /// Create app state with the session cap and idle TTL from `config`.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionRegistry::new(
                config.max_sessions,
                Duration::from_secs(config.session_ttl_secs),
            ))),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from configuration.
///
/// - `"*"`: allows all origins (development only)
/// - `None`: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = [
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - protects against floods (if enabled)
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config.cors_origins.as_deref());

    let rate_limiter = if config.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
        Some(create_rate_limiter(config.rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/pages", get(handlers::pages_handler))
        .route("/sessions", post(handlers::create_session_handler))
        .route(
            "/sessions/{id}",
            get(handlers::get_session_handler).delete(handlers::delete_session_handler),
        )
        .route(
            "/sessions/{id}/self-efficacy",
            put(handlers::self_efficacy_handler),
        )
        .route("/sessions/{id}/stage", put(handlers::stage_handler))
        .route("/sessions/{id}/exercise", put(handlers::exercise_handler))
        .route("/sessions/{id}/results", get(handlers::results_handler));

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::extract::DefaultBodyLimit::max(16 * 1024)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, config: &ServerConfig) -> Result<(), HbctError> {
    let state = AppState::new(config);
    let router = create_router(state, config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HbctError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Tracker HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HbctError::IoError(format!("Server error: {}", e)))
}

/// Resolve on Ctrl+C. Open sessions are dropped with the process.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested, discarding open sessions");
}
