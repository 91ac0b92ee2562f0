//! # Web API Error and Response Types
//!
//! HTTP envelopes for the submit/status/shutdown endpoints, and the
//! mapping from engine errors to status codes. The two failure shapes
//! differ by endpoint: submission failures carry an `error` field with
//! status 500, status-lookup misses carry a `message` field with 404.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::batching::types::{JobOutcome, JobStatus, JobStatusView, JobSubmissionResponse};
use crate::error::BatcherError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{error}")]
    Internal { error: String },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl From<BatcherError> for ApiError {
    fn from(err: BatcherError) -> Self {
        match err {
            BatcherError::JobNotFound(_) => ApiError::NotFound {
                message: err.to_string(),
            },
            other => ApiError::Internal {
                error: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { message } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Internal { error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": error })),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Successful submission envelope.
#[derive(Debug, Serialize)]
pub struct SubmissionEnvelope {
    pub success: bool,
    pub result: JobSubmissionResponse,
}

impl SubmissionEnvelope {
    pub fn accepted(result: JobSubmissionResponse) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Status query response. `result` holds the sink's result for completed
/// jobs and the error description for failed ones; it is absent while the
/// job is still pending or processing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl JobStatusResponse {
    pub fn from_view<R: Serialize>(view: JobStatusView<R>) -> ApiResult<Self> {
        let result = match view.outcome {
            Some(JobOutcome::Success(value)) => {
                Some(serde_json::to_value(value).map_err(|e| ApiError::Internal {
                    error: format!("failed to serialize job result: {e}"),
                })?)
            }
            Some(JobOutcome::Error(message)) => Some(Value::String(message)),
            None => None,
        };

        Ok(Self {
            job_id: view.job_id,
            status: view.status,
            result,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ShutdownResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_job_result_is_error_text() {
        let view = JobStatusView::<String> {
            job_id: Uuid::new_v4(),
            status: JobStatus::Failed,
            outcome: Some(JobOutcome::Error("sink down".to_string())),
        };

        let response = JobStatusResponse::from_view(view).unwrap();
        assert_eq!(response.result, Some(Value::String("sink down".to_string())));
    }

    #[test]
    fn test_pending_job_omits_result_field() {
        let view = JobStatusView::<String> {
            job_id: Uuid::new_v4(),
            status: JobStatus::Pending,
            outcome: None,
        };

        let response = JobStatusResponse::from_view(view).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(json["status"], "pending");
    }
}
