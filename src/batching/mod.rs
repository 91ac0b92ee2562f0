//! # Micro-Batching Engine
//!
//! The core of the crate: jobs are submitted one at a time, accumulated in
//! a FIFO queue, and flushed to a pluggable [`BatchSink`] whenever the
//! queue reaches the configured batch size or the flush interval elapses,
//! whichever comes first.
//!
//! - [`MicroBatcher`] - the orchestrator callers interact with
//! - [`JobQueue`] - FIFO queue with atomic prefix extraction
//! - [`JobStatusRegistry`] - per-job lifecycle state, queryable at any time
//! - [`FlushScheduler`] - cancellable repeating flush trigger
//! - [`BatchSink`] - the injected batch-processing capability

pub mod batcher;
pub mod queue;
pub mod registry;
pub mod scheduler;
pub mod sink;
pub mod types;

pub use batcher::MicroBatcher;
pub use queue::JobQueue;
pub use registry::JobStatusRegistry;
pub use scheduler::FlushScheduler;
pub use sink::BatchSink;
pub use types::{
    JobOutcome, JobRecord, JobStatus, JobStatusEntry, JobStatusView, JobSubmissionResponse,
    ACCEPTED_MESSAGE,
};
