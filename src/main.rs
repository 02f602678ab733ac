use std::sync::Arc;

use greeter::config::{self, DEFAULT_CONFIG_PATH};
use greeter::startup;
use greeter::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    if std::env::args().skip(1).any(|arg| arg == "--print-schema") {
        if let Err(e) = config::print_schema() {
            eprintln!("Error printing configuration schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let resolved = match config::resolve_config(DEFAULT_CONFIG_PATH) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&resolved.config.logging, &resolved.config.service) {
        eprintln!("Error initializing logging: {}", e);
        std::process::exit(1);
    }
    resolved.report_rejected_port();

    if let Err(e) = startup::run(Arc::new(resolved.config)).await {
        error!("Server terminated: {}", e);
        std::process::exit(1);
    }
}
