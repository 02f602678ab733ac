//! Application startup and server initialization.
//!
//! Binds the listener described by the configuration and serves the router
//! until the process is terminated.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error during execution.
pub async fn run(
    config: Arc<AppConfig>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|e| format!("Could not bind to {}: {}", bind_address, e))?;

    serve(listener, config).await
}

/// Serves the application on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    config: Arc<AppConfig>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let local_addr = listener.local_addr()?;
    info!(
        address = %local_addr,
        service = %config.service.name,
        version = %config.service.version,
        "Listening on http://{}",
        local_addr
    );

    let app = routes::create_router(AppState::new(config));
    axum::serve(listener, app).await?;

    Ok(())
}
