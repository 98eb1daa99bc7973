//! Dashboard HTTP surface
//!
//! Three read-only JSON endpoints over the analytics engine:
//!
//! - `GET /api/analytics` - snapshot of recent activity
//! - `GET /api/network-stats` - cached throughput banner
//! - `GET /api/account/{address}` - balance and ownership of one account

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::analysis::AnalyticsEngine;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};

/// Router with every dashboard route and permissive CORS
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analytics", get(routes::analytics::get_analytics))
        .route("/api/network-stats", get(routes::network::get_network_stats))
        .route("/api/account/{address}", get(routes::account::get_account))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind_address` (or the configured one) and serve until Ctrl-C
pub async fn serve(config: &AppConfig, bind_address: Option<&str>) -> AppResult<()> {
    let engine = AnalyticsEngine::from_config(config)?;
    let app = build_router(Arc::new(AppState::new(engine)));

    let addr = bind_address.unwrap_or(&config.server.bind_address);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn not_found() -> ApiError {
    ApiError::not_found("No such endpoint")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
