//! # System Handlers
//!
//! Graceful shutdown and health endpoints.

use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::web::response_types::{HealthResponse, ShutdownResponse};
use crate::web::state::AppState;

/// Drain and stop the batcher: POST /shutdown
///
/// Responds only after every outstanding job has reached a terminal
/// state. Subsequent submissions are rejected; status queries keep
/// working. Safe to call more than once.
pub async fn shutdown<T, R>(State(state): State<AppState<T, R>>) -> Json<ShutdownResponse>
where
    T: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    info!("shutdown requested via API");
    state.batcher.shutdown().await;

    Json(ShutdownResponse {
        message: "System shut down successfully".to_string(),
    })
}

/// Liveness check: GET /health
pub async fn health<T, R>(State(_state): State<AppState<T, R>>) -> Json<HealthResponse>
where
    T: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
