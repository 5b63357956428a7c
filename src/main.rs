//! viridata-backend server entry point.
//!
//! Loads configuration, initializes logging, and runs the Axum HTTP server
//! until a shutdown signal arrives.

use tracing_subscriber::EnvFilter;

use viridata_backend::config::{LogFormat, ServerConfig};
use viridata_backend::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        db = %config.database.name,
        "starting viridata-backend"
    );

    server::run(config).await
}
