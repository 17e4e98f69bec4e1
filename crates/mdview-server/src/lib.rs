//! Local development server for markdown preview.
//!
//! Serves the host-boundary document endpoint
//! (`GET /api/markdown/{name}` returning `{"content": "..."}`), a
//! server-rendered preview page per document, and a document index.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use mdview_diagrams::KrokiEngine;
use mdview_pipeline::RenderPipeline;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the markdown documents.
    pub docs_dir: PathBuf,
    /// Kroki server URL for diagram rendering.
    pub kroki_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            docs_dir: PathBuf::from("docs"),
            kroki_url: "https://kroki.io".to_owned(),
        }
    }
}

/// Run the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = RenderPipeline::new(Box::new(KrokiEngine::new(config.kroki_url.clone())));
    let state = Arc::new(AppState::new(config.docs_dir.clone(), pipeline));

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
