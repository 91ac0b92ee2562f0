//! # Flush Scheduler
//!
//! Cancellable repeating task that drives timer-based flushes. The
//! scheduler knows nothing about queue contents; it fires its callback
//! unconditionally on a fixed period and the callback decides whether
//! there is anything to do.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct FlushScheduler {
    period: Duration,
    running: Arc<AtomicBool>,
    shutdown_notify: Arc<Notify>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl FlushScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_notify: Arc::new(Notify::new()),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the ticking task. The first firing happens one full period
    /// after `start`, and firings continue until [`stop`](Self::stop) or
    /// until the callback returns `false` (its owner is gone). Calling
    /// `start` on a scheduler that is already running is a no-op.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F, Fut>(&self, callback: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        if self.running.swap(true, Ordering::AcqRel) {
            debug!("scheduler already running, start ignored");
            return;
        }

        let running = Arc::clone(&self.running);
        let shutdown_notify = Arc::clone(&self.shutdown_notify);
        let period = self.period;

        let handle = tokio::spawn(async move {
            while running.load(Ordering::Acquire) {
                tokio::select! {
                    _ = tokio::time::sleep(period) => {
                        if !callback().await {
                            debug!("scheduler callback gone, stopping");
                            running.store(false, Ordering::Release);
                            break;
                        }
                    }
                    _ = shutdown_notify.notified() => break,
                }
            }
            debug!("scheduler task exiting");
        });

        *self.handle.lock() = Some(handle);
    }

    /// Cancel future firings and wait for the ticking task to exit.
    /// Idempotent, and safe to call on a scheduler that was never started.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        self.shutdown_notify.notify_waiters();

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(error = %err, "scheduler task terminated abnormally");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
