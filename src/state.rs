//! Shared application state.

use crate::config::AppConfig;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the configuration is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        AppState { config }
    }
}
