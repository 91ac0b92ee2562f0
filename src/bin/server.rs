//! Micro-batching HTTP server.
//!
//! Wires environment configuration, the PostgreSQL payment sink, and one
//! batcher instance into the axum transport. Ctrl-C drains outstanding
//! jobs before the process exits; the POST /shutdown endpoint drains the
//! batcher while leaving the server responding.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

use microbatch_core::web::{self, AppState};
use microbatch_core::{
    logging, AppConfig, MicroBatcher, PaymentBatchSink, PaymentRecord, PaymentTransaction,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.connect_url())
        .await?;
    sqlx::migrate!().run(&pool).await?;

    let sink = Arc::new(PaymentBatchSink::new(pool));
    let batcher: MicroBatcher<PaymentTransaction, PaymentRecord> =
        MicroBatcher::new(config.batcher.clone(), sink)?;

    let app = web::create_router(AppState::new(batcher.clone()));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(batcher))
        .await?;

    Ok(())
}

async fn shutdown_signal(batcher: MicroBatcher<PaymentTransaction, PaymentRecord>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        return;
    }

    info!("interrupt received, draining outstanding jobs");
    batcher.shutdown().await;
}
