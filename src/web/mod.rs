//! # HTTP Transport
//!
//! Thin axum layer over the batching engine. The wire contract mirrors the
//! engine's operations one-to-one; all behavior lives in
//! [`MicroBatcher`](crate::batching::MicroBatcher).

pub mod handlers;
pub mod response_types;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use response_types::{ApiError, ApiResult};
pub use state::AppState;

/// Build the application router over a batcher handle.
pub fn create_router<T, R>(state: AppState<T, R>) -> Router
where
    T: DeserializeOwned + Send + 'static,
    R: Serialize + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/submit-job", post(handlers::jobs::submit_job::<T, R>))
        .route("/job-status/:job_id", get(handlers::jobs::job_status::<T, R>))
        .route("/shutdown", post(handlers::system::shutdown::<T, R>))
        .route("/health", get(handlers::system::health::<T, R>))
        .with_state(state)
}
