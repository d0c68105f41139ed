//! Serve command - Starts the read-only HTTP API.

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Backend, Config};
use crate::errors::{AppError, AppResult};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // The API reads the JSON stores unless API_USE_DB is set.
    let backend = if config.api_use_db {
        Backend::Sql
    } else {
        Backend::Json
    };
    let persistence = super::open_backend(backend, &config).await?;
    tracing::info!(?backend, "Property store ready");

    let app = create_router(AppState::from_persistence(&persistence));

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
