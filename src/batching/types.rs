//! # Core Job Types
//!
//! Shared data model for the batching engine: job lifecycle states, queued
//! records, registry entries, and the submission acknowledgement returned to
//! callers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a submitted job.
///
/// Transitions are strictly forward: `Pending` → `Processing` →
/// `Completed` or `Failed`. Only the flush path performs transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// A job together with its identity, as held by the queue until extraction.
#[derive(Debug, Clone)]
pub struct JobRecord<T> {
    pub job_id: Uuid,
    pub job: T,
    pub submitted_at: DateTime<Utc>,
}

impl<T> JobRecord<T> {
    pub fn new(job_id: Uuid, job: T) -> Self {
        Self {
            job_id,
            job,
            submitted_at: Utc::now(),
        }
    }
}

/// Terminal payload of a finished job: the sink's result on success, the
/// error description on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome<R> {
    Success(R),
    Error(String),
}

/// Registry entry for one job. Entries are created `Pending` at submission
/// and are never evicted for the lifetime of the registry.
#[derive(Debug, Clone)]
pub struct JobStatusEntry<R> {
    pub status: JobStatus,
    pub outcome: Option<JobOutcome<R>>,
}

impl<R> JobStatusEntry<R> {
    pub fn pending() -> Self {
        Self {
            status: JobStatus::Pending,
            outcome: None,
        }
    }
}

/// Read-only view of a job's current state, as returned by status queries.
#[derive(Debug, Clone)]
pub struct JobStatusView<R> {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub outcome: Option<JobOutcome<R>>,
}

/// Acknowledgement returned synchronously by `submit`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmissionResponse {
    pub job_id: Uuid,
    pub message: String,
}

pub const ACCEPTED_MESSAGE: &str = "Job accepted and will be processed in the next batch.";

impl JobSubmissionResponse {
    pub fn accepted(job_id: Uuid) -> Self {
        Self {
            job_id,
            message: ACCEPTED_MESSAGE.to_string(),
        }
    }
}

/// What a single flush call did. `Skipped` is only ever produced while
/// holding the flush lock with an empty queue, which makes it the drain
/// loop's termination proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlushOutcome {
    Skipped,
    Completed(usize),
    Failed(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&JobStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(JobStatus::Processing.to_string(), "processing");
        assert_eq!(JobStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_submission_response_carries_fixed_message() {
        let job_id = Uuid::new_v4();
        let response = JobSubmissionResponse::accepted(job_id);
        assert_eq!(response.job_id, job_id);
        assert_eq!(response.message, ACCEPTED_MESSAGE);
    }

    #[test]
    fn test_submission_response_uses_camel_case_keys() {
        let response = JobSubmissionResponse::accepted(Uuid::new_v4());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("jobId").is_some());
        assert!(json.get("message").is_some());
    }
}
