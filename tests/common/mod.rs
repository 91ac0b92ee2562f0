//! Shared test helpers: a recording batch sink and status polling.
#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use microbatch_core::{
    BatchSink, BatcherError, BatcherSettings, JobStatus, JobStatusView, MicroBatcher, Result,
};

/// Batch sink that records every call. Successful batches map each job to
/// `processed:<job>`; a failing sink rejects every batch with a fixed
/// message; an optional delay simulates sink latency.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<Vec<String>>>,
    fail_with: Option<String>,
    delay: Option<Duration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl BatchSink<String, String> for RecordingSink {
    async fn process(&self, jobs: Vec<String>) -> Result<Vec<String>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.lock().push(jobs.clone());

        if let Some(message) = &self.fail_with {
            return Err(BatcherError::SinkFailure(message.clone()));
        }

        Ok(jobs
            .into_iter()
            .map(|job| format!("processed:{job}"))
            .collect())
    }
}

pub fn settings(batch_size: usize, batch_frequency_ms: u64) -> BatcherSettings {
    BatcherSettings {
        batch_size,
        batch_frequency_ms,
    }
}

/// Poll a job's status until it reaches a terminal state.
pub async fn wait_for_terminal(
    batcher: &MicroBatcher<String, String>,
    job_id: Uuid,
    timeout: Duration,
) -> JobStatusView<String> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let view = batcher.job_status(job_id).unwrap();
        if matches!(view.status, JobStatus::Completed | JobStatus::Failed) {
            return view;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "job {job_id} never reached a terminal state (last seen: {})",
            view.status
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
