//! HTTP surface for the score simulator
//!
//! `GET /api/configurations` lists the catalog and `POST /api/run` simulates
//! the requested ids in order. CORS is permissive so the browser UI can be
//! served from anywhere.

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::error::{BenchError, BenchResult};
use crate::simulator::ScoreSimulator;

pub use handlers::{parse_configs, ApiError};

#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<ScoreSimulator>,
}

impl AppState {
    pub fn new(simulator: ScoreSimulator) -> Self {
        Self {
            simulator: Arc::new(simulator),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/configurations", get(handlers::list_configurations))
        .route("/api/run", post(handlers::run_benchmarks))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, state: AppState) -> BenchResult<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| BenchError::Server {
            message: format!("failed to bind {}:{}: {}", config.host, config.port, e),
        })?;

    let local = listener.local_addr().map_err(|e| BenchError::Server {
        message: e.to_string(),
    })?;
    log::info!("🚀 Benchmark server listening on http://{}", local);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BenchError::Server {
            message: e.to_string(),
        })?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
