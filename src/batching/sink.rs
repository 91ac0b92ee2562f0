//! # Batch Sink Contract
//!
//! The capability the engine flushes into. Implementations turn an ordered
//! batch of jobs into an ordered batch of results.

use async_trait::async_trait;

use crate::error::Result;

/// Processes one extracted batch of jobs.
///
/// Contract: the returned sequence has the same length and order as the
/// input, so `results[i]` belongs to `jobs[i]`. An `Err` means the entire
/// batch failed; there is no partial-success signaling. Implementations
/// are never retried.
#[async_trait]
pub trait BatchSink<T, R>: Send + Sync {
    async fn process(&self, jobs: Vec<T>) -> Result<Vec<R>>;
}
