//! Health check endpoints.

use super::method_not_allowed;
use crate::models::HealthStatus;
use crate::state::AppState;
use axum::{Json, Router, extract::State, routing::get};

/// Registers liveness and readiness routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route("/ready", get(readiness_check).fallback(method_not_allowed))
}

/// Liveness probe: the process is up and answering HTTP.
async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(&state.config.service.name))
}

/// Readiness probe. There are no dependencies to wait on, so this is
/// identical to the liveness probe apart from the status string.
async fn readiness_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::ready(&state.config.service.name))
}
