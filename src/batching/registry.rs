//! # Job Status Registry
//!
//! Concurrent map from job id to lifecycle entry; the single source of
//! truth for status queries. Writes after insertion come exclusively from
//! the flush path, which owns each extracted job id until it reaches a
//! terminal state.

use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use crate::batching::types::{JobOutcome, JobStatus, JobStatusEntry};

pub struct JobStatusRegistry<R> {
    entries: DashMap<Uuid, JobStatusEntry<R>>,
}

impl<R: Clone> JobStatusRegistry<R> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register a freshly submitted job as `Pending`.
    pub fn insert_pending(&self, job_id: Uuid) {
        self.entries.insert(job_id, JobStatusEntry::pending());
    }

    /// Remove an entry. Only used when a submission loses the race with
    /// shutdown: its id was never returned to the caller, so the entry must
    /// not linger as a permanently pending ghost.
    pub fn remove(&self, job_id: Uuid) {
        self.entries.remove(&job_id);
    }

    pub fn mark_processing(&self, job_id: Uuid) {
        self.transition(job_id, JobStatus::Processing, None);
    }

    pub fn complete(&self, job_id: Uuid, result: R) {
        self.transition(job_id, JobStatus::Completed, Some(JobOutcome::Success(result)));
    }

    pub fn fail(&self, job_id: Uuid, error: String) {
        self.transition(job_id, JobStatus::Failed, Some(JobOutcome::Error(error)));
    }

    pub fn get(&self, job_id: Uuid) -> Option<JobStatusEntry<R>> {
        self.entries.get(&job_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn transition(&self, job_id: Uuid, status: JobStatus, outcome: Option<JobOutcome<R>>) {
        match self.entries.get_mut(&job_id) {
            Some(mut entry) => {
                entry.status = status;
                entry.outcome = outcome;
            }
            None => {
                // Unreachable while the queue invariant holds: every queued
                // job has an entry before it can be extracted.
                warn!(%job_id, %status, "status transition for unknown job");
            }
        }
    }
}

impl<R: Clone> Default for JobStatusRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_job_is_pending() {
        let registry: JobStatusRegistry<String> = JobStatusRegistry::new();
        let job_id = Uuid::new_v4();
        registry.insert_pending(job_id);

        let entry = registry.get(job_id).unwrap();
        assert_eq!(entry.status, JobStatus::Pending);
        assert!(entry.outcome.is_none());
    }

    #[test]
    fn test_completion_stores_aligned_result() {
        let registry = JobStatusRegistry::new();
        let job_id = Uuid::new_v4();
        registry.insert_pending(job_id);
        registry.mark_processing(job_id);
        registry.complete(job_id, "r1".to_string());

        let entry = registry.get(job_id).unwrap();
        assert_eq!(entry.status, JobStatus::Completed);
        assert_eq!(entry.outcome, Some(JobOutcome::Success("r1".to_string())));
    }

    #[test]
    fn test_failure_stores_error_text() {
        let registry: JobStatusRegistry<String> = JobStatusRegistry::new();
        let job_id = Uuid::new_v4();
        registry.insert_pending(job_id);
        registry.fail(job_id, "connection reset".to_string());

        let entry = registry.get(job_id).unwrap();
        assert_eq!(entry.status, JobStatus::Failed);
        assert_eq!(
            entry.outcome,
            Some(JobOutcome::Error("connection reset".to_string()))
        );
    }

    #[test]
    fn test_unknown_job_is_absent() {
        let registry: JobStatusRegistry<String> = JobStatusRegistry::new();
        assert!(registry.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_remove_discards_entry() {
        let registry: JobStatusRegistry<String> = JobStatusRegistry::new();
        let job_id = Uuid::new_v4();
        registry.insert_pending(job_id);
        registry.remove(job_id);
        assert!(registry.get(job_id).is_none());
        assert!(registry.is_empty());
    }
}
