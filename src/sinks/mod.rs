//! # Batch Sink Implementations
//!
//! Concrete [`BatchSink`](crate::batching::BatchSink) implementations the
//! server binary wires in.

pub mod postgres;

pub use postgres::{PaymentBatchSink, PaymentRecord, PaymentTransaction};
