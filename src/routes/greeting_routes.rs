//! Root greeting endpoint.

use super::method_not_allowed;
use crate::models::Greeting;
use crate::state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use tracing::debug;

/// Registers the root route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(greet).fallback(method_not_allowed))
}

/// Returns the configured greeting stamped with the current time.
async fn greet(State(state): State<AppState>) -> Json<Greeting> {
    let greeting = Greeting::now(&state.config.service);
    debug!(timestamp = %greeting.timestamp, "Serving greeting");
    Json(greeting)
}
