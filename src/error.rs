//! # Structured Error Handling
//!
//! Error taxonomy for the micro-batching engine. Submission and status
//! lookups surface errors synchronously; batch sink failures are recorded
//! against the affected jobs and only ever observed through status queries.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatcherError {
    /// Shutdown has been initiated; no further submissions are accepted.
    #[error("System is shutting down, cannot accept new jobs")]
    ShuttingDown,

    /// Status query for a job id that was never submitted.
    #[error("Job with ID {0} not found")]
    JobNotFound(Uuid),

    /// The injected batch sink rejected an entire batch.
    #[error("Batch sink failure: {0}")]
    SinkFailure(String),

    /// Invalid settings at construction or environment-load time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database-level failure inside a sink implementation.
    #[error("Database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, BatcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let job_id = Uuid::new_v4();
        assert_eq!(
            BatcherError::ShuttingDown.to_string(),
            "System is shutting down, cannot accept new jobs"
        );
        assert_eq!(
            BatcherError::JobNotFound(job_id).to_string(),
            format!("Job with ID {job_id} not found")
        );
        assert_eq!(
            BatcherError::SinkFailure("connection reset".to_string()).to_string(),
            "Batch sink failure: connection reset"
        );
    }
}
