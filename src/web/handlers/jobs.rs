//! # Job Submission and Status Handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::web::response_types::{ApiError, ApiResult, JobStatusResponse, SubmissionEnvelope};
use crate::web::state::AppState;

/// Submit one job: POST /submit-job
///
/// The request body is the opaque job payload. The job is queued and the
/// response returns immediately; processing happens in a later batch.
pub async fn submit_job<T, R>(
    State(state): State<AppState<T, R>>,
    Json(job): Json<T>,
) -> ApiResult<Json<SubmissionEnvelope>>
where
    T: DeserializeOwned + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    let result = state.batcher.submit(job)?;
    Ok(Json(SubmissionEnvelope::accepted(result)))
}

/// Query a job's lifecycle state: GET /job-status/{jobId}
///
/// A syntactically invalid job id is indistinguishable from an unknown
/// one: both respond 404.
pub async fn job_status<T, R>(
    State(state): State<AppState<T, R>>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobStatusResponse>>
where
    T: Send + 'static,
    R: Serialize + Clone + Send + Sync + 'static,
{
    debug!(%job_id, "job status requested");

    let job_id = Uuid::parse_str(&job_id)
        .map_err(|_| ApiError::not_found(format!("Job with ID {job_id} not found")))?;

    let view = state.batcher.job_status(job_id)?;
    Ok(Json(JobStatusResponse::from_view(view)?))
}
