//! # Web API Application State
//!
//! Shared state handed to every handler: a handle to the one batcher
//! instance this process exposes. No global singletons; the batcher is
//! constructed in the binary and passed in.

use crate::batching::MicroBatcher;

pub struct AppState<T, R> {
    pub batcher: MicroBatcher<T, R>,
}

impl<T, R> AppState<T, R> {
    pub fn new(batcher: MicroBatcher<T, R>) -> Self {
        Self { batcher }
    }
}

impl<T, R> Clone for AppState<T, R> {
    fn clone(&self) -> Self {
        Self {
            batcher: self.batcher.clone(),
        }
    }
}
