//! # MicroBatcher Orchestrator
//!
//! Composes the job queue, status registry, flush scheduler, and injected
//! batch sink. Accepts submissions, decides when to flush (size threshold
//! or timer), executes flushes, and drains everything on shutdown.
//!
//! Two independent triggers can initiate a flush: the periodic scheduler
//! and the size-threshold check inside `submit`. Both funnel through one
//! async mutex, so at most one flush is draining the queue and writing
//! registry state at any instant. Submissions never take that lock; they
//! are accepted and queued while a batch is in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::batching::queue::JobQueue;
use crate::batching::registry::JobStatusRegistry;
use crate::batching::scheduler::FlushScheduler;
use crate::batching::sink::BatchSink;
use crate::batching::types::{
    FlushOutcome, JobRecord, JobStatusView, JobSubmissionResponse,
};
use crate::config::BatcherSettings;
use crate::error::{BatcherError, Result};

/// Handle to a running micro-batching engine. Cheap to clone; all clones
/// share the same queue, registry, and scheduler.
pub struct MicroBatcher<T, R> {
    inner: Arc<BatcherInner<T, R>>,
}

impl<T, R> Clone for MicroBatcher<T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct BatcherInner<T, R> {
    settings: BatcherSettings,
    sink: Arc<dyn BatchSink<T, R>>,
    queue: JobQueue<T>,
    registry: JobStatusRegistry<R>,
    /// Serializes flush execution across both triggers. Held across
    /// extraction, the sink call, and the registry update.
    flush_gate: Mutex<()>,
    scheduler: FlushScheduler,
}

impl<T, R> MicroBatcher<T, R>
where
    T: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Create a batcher and start its flush scheduler.
    ///
    /// Must be called from within a Tokio runtime: the scheduler task is
    /// spawned immediately, and `submit` spawns threshold-triggered
    /// flushes.
    pub fn new<S>(settings: BatcherSettings, sink: Arc<S>) -> Result<Self>
    where
        S: BatchSink<T, R> + 'static,
    {
        settings.validate()?;

        let sink: Arc<dyn BatchSink<T, R>> = sink;
        let period = Duration::from_millis(settings.batch_frequency_ms);
        let inner = Arc::new(BatcherInner {
            settings,
            sink,
            queue: JobQueue::new(),
            registry: JobStatusRegistry::new(),
            flush_gate: Mutex::new(()),
            scheduler: FlushScheduler::new(period),
        });

        // The ticking task holds only a weak reference, so dropping the
        // last handle stops the scheduler even without a shutdown call.
        let weak = Arc::downgrade(&inner);
        inner.scheduler.start(move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => {
                        inner.flush().await;
                        true
                    }
                    None => false,
                }
            }
        });

        Ok(Self { inner })
    }

    /// Accept a job for batched processing.
    ///
    /// Returns immediately with the job's id and a fixed acceptance
    /// message. If the queue has reached the batch size, a flush is
    /// initiated in the background; the caller never waits on it.
    pub fn submit(&self, job: T) -> Result<JobSubmissionResponse> {
        if self.inner.queue.is_closed() {
            return Err(BatcherError::ShuttingDown);
        }

        let job_id = Uuid::new_v4();

        // Registry entry first: anything in the queue must already be
        // queryable as pending.
        self.inner.registry.insert_pending(job_id);
        let queued = match self.inner.queue.push(JobRecord::new(job_id, job)) {
            Ok(queued) => queued,
            Err(err) => {
                self.inner.registry.remove(job_id);
                return Err(err);
            }
        };

        info!(%job_id, queued, "job submitted");

        if queued >= self.inner.settings.batch_size {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                inner.flush().await;
            });
        }

        Ok(JobSubmissionResponse::accepted(job_id))
    }

    /// Look up a job's current lifecycle state. Never blocks on in-flight
    /// flushes and never mutates state.
    pub fn job_status(&self, job_id: Uuid) -> Result<JobStatusView<R>> {
        let entry = self
            .inner
            .registry
            .get(job_id)
            .ok_or(BatcherError::JobNotFound(job_id))?;

        Ok(JobStatusView {
            job_id,
            status: entry.status,
            outcome: entry.outcome,
        })
    }

    /// Stop accepting submissions, cancel the scheduler, and process every
    /// outstanding job. Returns once the queue is empty and all previously
    /// accepted jobs are in a terminal state. Idempotent.
    pub async fn shutdown(&self) {
        if self.inner.queue.close() {
            let remaining = self.inner.queue.len();
            if remaining > 0 {
                info!(remaining, "shutting down, processing remaining jobs");
            }
        } else {
            debug!("shutdown already initiated");
        }

        self.inner.scheduler.stop().await;

        // Drain until a flush observes an empty queue while holding the
        // flush gate: that single observation proves there is neither a
        // queued job nor an in-flight batch left.
        loop {
            match self.inner.flush().await {
                FlushOutcome::Skipped => break,
                FlushOutcome::Completed(count) | FlushOutcome::Failed(count) => {
                    debug!(count, "drained batch during shutdown");
                }
            }
        }

        info!("shutdown complete, all jobs processed");
    }

    /// Number of jobs currently waiting for a flush.
    pub fn queued_jobs(&self) -> usize {
        self.inner.queue.len()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.inner.queue.is_closed()
    }

    pub fn settings(&self) -> &BatcherSettings {
        &self.inner.settings
    }
}

impl<T, R> BatcherInner<T, R>
where
    T: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Execute one flush: extract up to `batch_size` of the oldest jobs,
    /// mark them processing, hand them to the sink, and record the
    /// per-job outcomes.
    async fn flush(&self) -> FlushOutcome {
        let _gate = self.flush_gate.lock().await;

        let queued = self.queue.len();
        if queued == 0 {
            debug!("batch processing skipped, no jobs in queue");
            return FlushOutcome::Skipped;
        }

        info!(queued, "batch processing started");

        let batch = self.queue.take_up_to(self.settings.batch_size);
        let oldest_wait_ms = batch
            .first()
            .map(|record| (chrono::Utc::now() - record.submitted_at).num_milliseconds())
            .unwrap_or(0);
        let mut job_ids = Vec::with_capacity(batch.len());
        let mut jobs = Vec::with_capacity(batch.len());
        for record in batch {
            self.registry.mark_processing(record.job_id);
            job_ids.push(record.job_id);
            jobs.push(record.job);
        }

        match self.sink.process(jobs).await {
            Ok(results) if results.len() == job_ids.len() => {
                for (job_id, result) in job_ids.iter().zip(results) {
                    self.registry.complete(*job_id, result);
                }
                info!(
                    processed = job_ids.len(),
                    oldest_wait_ms, "batch processing completed"
                );
                FlushOutcome::Completed(job_ids.len())
            }
            Ok(results) => {
                // Sink contract violation: results must align one-to-one
                // with the submitted jobs. Treated as a whole-batch failure.
                let message = format!(
                    "batch sink returned {} results for {} jobs",
                    results.len(),
                    job_ids.len()
                );
                error!(%message, "batch sink violated its contract");
                for job_id in &job_ids {
                    self.registry.fail(*job_id, message.clone());
                }
                FlushOutcome::Failed(job_ids.len())
            }
            Err(err) => {
                error!(error = %err, failed = job_ids.len(), "failed to process the batch");
                let message = err.to_string();
                for job_id in &job_ids {
                    self.registry.fail(*job_id, message.clone());
                }
                FlushOutcome::Failed(job_ids.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NoopSink;

    #[async_trait]
    impl BatchSink<String, String> for NoopSink {
        async fn process(&self, jobs: Vec<String>) -> Result<Vec<String>> {
            Ok(jobs)
        }
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_settings() {
        let settings = BatcherSettings {
            batch_size: 0,
            ..Default::default()
        };
        let result = MicroBatcher::new(settings, Arc::new(NoopSink));
        assert!(matches!(result, Err(BatcherError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let batcher = MicroBatcher::new(
            BatcherSettings {
                batch_size: 100,
                batch_frequency_ms: 60_000,
            },
            Arc::new(NoopSink),
        )
        .unwrap();

        let clone = batcher.clone();
        batcher.submit("job".to_string()).unwrap();
        assert_eq!(clone.queued_jobs(), 1);

        clone.shutdown().await;
        assert!(batcher.is_shutting_down());
    }
}
