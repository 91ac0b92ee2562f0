//! # Job Queue
//!
//! FIFO queue of jobs awaiting a flush. Insertion order is the processing
//! order. The queue is unbounded: admission control is a deliberate
//! non-goal, so `push` only fails once the queue has been closed for
//! shutdown.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::batching::types::JobRecord;
use crate::error::{BatcherError, Result};

struct QueueState<T> {
    records: VecDeque<JobRecord<T>>,
    closed: bool,
}

/// Ordered, mutable sequence of pending jobs with atomic prefix extraction.
///
/// The close flag lives inside the same mutex as the records so that a
/// `push` racing with shutdown either lands before the drain begins (and is
/// drained) or observes the closed queue and is rejected. No accepted job
/// can slip past the final drain.
pub struct JobQueue<T> {
    state: Mutex<QueueState<T>>,
}

impl<T> JobQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                records: VecDeque::new(),
                closed: false,
            }),
        }
    }

    /// Append a record, returning the new queue length. Fails with
    /// [`BatcherError::ShuttingDown`] once the queue has been closed.
    pub fn push(&self, record: JobRecord<T>) -> Result<usize> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BatcherError::ShuttingDown);
        }
        state.records.push_back(record);
        Ok(state.records.len())
    }

    /// Remove and return up to `n` of the oldest records, preserving
    /// insertion order.
    pub fn take_up_to(&self, n: usize) -> Vec<JobRecord<T>> {
        let mut state = self.state.lock();
        let count = n.min(state.records.len());
        state.records.drain(..count).collect()
    }

    /// Close the queue to further pushes. Returns `true` if this call
    /// performed the open → closed transition.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock();
        let was_open = !state.closed;
        state.closed = true;
        was_open
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }
}

impl<T> Default for JobQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn record(job: u32) -> JobRecord<u32> {
        JobRecord::new(Uuid::new_v4(), job)
    }

    #[test]
    fn test_push_reports_new_length() {
        let queue = JobQueue::new();
        assert_eq!(queue.push(record(1)).unwrap(), 1);
        assert_eq!(queue.push(record(2)).unwrap(), 2);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_take_up_to_preserves_fifo_order() {
        let queue = JobQueue::new();
        for job in 0..5 {
            queue.push(record(job)).unwrap();
        }

        let batch: Vec<u32> = queue.take_up_to(3).into_iter().map(|r| r.job).collect();
        assert_eq!(batch, vec![0, 1, 2]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_take_up_to_allows_partial_batches() {
        let queue = JobQueue::new();
        queue.push(record(7)).unwrap();

        let batch = queue.take_up_to(10);
        assert_eq!(batch.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_take_up_to_on_empty_queue_returns_nothing() {
        let queue: JobQueue<u32> = JobQueue::new();
        assert!(queue.take_up_to(3).is_empty());
    }

    #[test]
    fn test_closed_queue_rejects_push() {
        let queue = JobQueue::new();
        assert!(queue.close());
        assert_eq!(queue.push(record(1)), Err(BatcherError::ShuttingDown));
        assert!(queue.is_closed());
    }

    #[test]
    fn test_close_is_idempotent() {
        let queue: JobQueue<u32> = JobQueue::new();
        assert!(queue.close());
        assert!(!queue.close());
    }

    #[test]
    fn test_closed_queue_still_drains() {
        let queue = JobQueue::new();
        queue.push(record(1)).unwrap();
        queue.close();
        assert_eq!(queue.take_up_to(5).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_chunked_extraction_preserves_order(
            jobs in proptest::collection::vec(any::<u32>(), 0..64),
            chunk in 1usize..8,
        ) {
            let queue = JobQueue::new();
            let mut expected_ids = Vec::new();
            for job in &jobs {
                let record = JobRecord::new(Uuid::new_v4(), *job);
                expected_ids.push(record.job_id);
                queue.push(record).unwrap();
            }

            let mut drained_jobs = Vec::new();
            let mut drained_ids = Vec::new();
            loop {
                let batch = queue.take_up_to(chunk);
                if batch.is_empty() {
                    break;
                }
                prop_assert!(batch.len() <= chunk);
                for record in batch {
                    drained_ids.push(record.job_id);
                    drained_jobs.push(record.job);
                }
            }

            prop_assert_eq!(drained_jobs, jobs);
            prop_assert_eq!(drained_ids, expected_ids);
            prop_assert!(queue.is_empty());
        }
    }
}
