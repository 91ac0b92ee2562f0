//! # Payment Transaction Sink
//!
//! Batch sink that persists payment transactions to PostgreSQL. All rows of
//! one batch are inserted inside a single transaction, so a batch either
//! lands completely or not at all, matching the engine's whole-batch
//! failure semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use crate::batching::sink::BatchSink;
use crate::error::{BatcherError, Result};

/// A caller-submitted payment, as accepted by the submit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
}

/// A persisted payment row, returned to the caller through status queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct PaymentBatchSink {
    pool: PgPool,
}

impl PaymentBatchSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchSink<PaymentTransaction, PaymentRecord> for PaymentBatchSink {
    async fn process(&self, jobs: Vec<PaymentTransaction>) -> Result<Vec<PaymentRecord>> {
        debug!(batch_size = jobs.len(), "inserting payment batch");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BatcherError::Database(e.to_string()))?;

        let mut inserted = Vec::with_capacity(jobs.len());
        for job in &jobs {
            let record = sqlx::query_as::<_, PaymentRecord>(
                "INSERT INTO payment_transactions (user_id, amount, status) \
                 VALUES ($1, $2, $3) \
                 RETURNING id, user_id, amount, status, created_at",
            )
            .bind(job.user_id)
            .bind(job.amount)
            .bind(&job.status)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| BatcherError::Database(e.to_string()))?;

            inserted.push(record);
        }

        tx.commit()
            .await
            .map_err(|e| BatcherError::Database(e.to_string()))?;

        Ok(inserted)
    }
}
