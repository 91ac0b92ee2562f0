#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Microbatch Core
//!
//! A micro-batching engine: jobs are submitted individually, accumulated
//! in an in-memory FIFO queue, and flushed to a pluggable batch sink
//! whenever a size threshold or a time interval is reached, whichever
//! occurs first. Every job's lifecycle (pending → processing →
//! completed/failed) is queryable at any time, and shutdown drains all
//! outstanding jobs before stopping.
//!
//! ## Architecture
//!
//! The engine is an explicit value with no global state. A
//! [`MicroBatcher`] is constructed from [`BatcherSettings`] and an
//! injected [`BatchSink`], and handles to it are cloned into whatever
//! exposes it (this crate ships an axum HTTP transport and a PostgreSQL
//! payment sink as the production wiring).
//!
//! Two triggers initiate flushes (the size threshold inside `submit` and
//! a periodic scheduler), and both are serialized through a single flush
//! lock, so at most one flush drains the queue at any instant while
//! submissions continue to be accepted.
//!
//! ## Module Organization
//!
//! - [`batching`] - the engine: batcher, queue, registry, scheduler, sink trait
//! - [`sinks`] - concrete sink implementations (PostgreSQL payment batch insert)
//! - [`web`] - axum transport exposing submit / status / shutdown
//! - [`config`] - environment-driven configuration
//! - [`error`] - structured error handling
//! - [`logging`] - tracing initialization for binaries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use microbatch_core::{BatchSink, BatcherSettings, MicroBatcher, Result};
//!
//! struct EchoSink;
//!
//! #[async_trait]
//! impl BatchSink<String, String> for EchoSink {
//!     async fn process(&self, jobs: Vec<String>) -> Result<Vec<String>> {
//!         Ok(jobs)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let batcher = MicroBatcher::new(BatcherSettings::default(), Arc::new(EchoSink))?;
//!
//!     let accepted = batcher.submit("hello".to_string())?;
//!     println!("queued job {}", accepted.job_id);
//!
//!     batcher.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod batching;
pub mod config;
pub mod error;
pub mod logging;
pub mod sinks;
pub mod web;

pub use batching::{
    BatchSink, FlushScheduler, JobOutcome, JobQueue, JobRecord, JobStatus, JobStatusEntry,
    JobStatusRegistry, JobStatusView, JobSubmissionResponse, MicroBatcher, ACCEPTED_MESSAGE,
};
pub use config::{AppConfig, BatcherSettings, DatabaseSettings, ServerSettings};
pub use error::{BatcherError, Result};
pub use sinks::{PaymentBatchSink, PaymentRecord, PaymentTransaction};
