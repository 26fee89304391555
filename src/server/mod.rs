// src/server/mod.rs
//! Cookbook HTTP API
//!
//! Read-only endpoints over the recipe store:
//! - `GET /api/health`
//! - `GET /api/US_recipes?page&limit` - rating-ordered listing
//! - `GET /api/US_recipes/search?title&cuisine&total_time&rating&calories`
//!
//! The only shared state is immutable configuration. Each request opens its
//! own SQLite connection on a blocking thread and drops it before responding.

pub mod config;
mod handlers;
mod routes;

pub use config::ApiConfig;
pub use handlers::ApiError;
pub use routes::create_router;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the recipe database
    pub db_path: PathBuf,
    /// CORS allowed origins (empty = any origin)
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5678)),
            db_path: PathBuf::from(crate::db::DEFAULT_DB_PATH),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

/// Shared server state handle passed to handlers
pub type SharedState = Arc<ServerState>;

/// Start the API server and run until Ctrl+C / SIGTERM
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting cookbook API on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);

    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS: any origin");
    } else {
        tracing::info!("CORS: {:?}", config.cors_allowed_origins);
    }

    crate::db::init(&config.db_path)
        .with_context(|| format!("Failed to initialize database {:?}", config.db_path))?;

    let bind_addr = config.bind_addr;
    let state = Arc::new(ServerState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    tracing::info!("Cookbook API is ready to serve");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
