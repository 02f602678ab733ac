//! HTTP route definitions and handlers.
//!
//! Liveness and readiness probes live in `health_routes`, the root greeting
//! in `greeting_routes`. Unmatched paths fall through to a JSON 404, other
//! methods on known paths get a JSON 405.

mod greeting_routes;
mod health_routes;
mod request_span;

use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;
use axum::http::StatusCode;
use axum::http::header::ALLOW;
use axum::response::IntoResponse;
use axum::{Router, middleware};

pub use request_span::{request_span_layer, REQUEST_ID_HEADER};

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes::routes())
        .merge(greeting_routes::routes())
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_span_layer))
}

async fn not_found() -> HTTPError {
    HTTPError::from_status(StatusCode::NOT_FOUND)
}

/// Method fallback for the known paths, which all serve `GET` only.
async fn method_not_allowed() -> impl IntoResponse {
    (
        [(ALLOW, "GET, HEAD")],
        HTTPError::from_status(StatusCode::METHOD_NOT_ALLOWED),
    )
}
