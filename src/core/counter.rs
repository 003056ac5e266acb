//! Error occurrence counting

use std::sync::atomic::{AtomicU64, Ordering};

use super::value::ErrorValue;

/// Capability contract for counting logged errors.
///
/// A counter is shared by reference across every logger configured with it
/// and outlives any single logger; the logger only ever increments, exactly
/// once per logged error value, independent of whether the record itself
/// made it to a sink.
pub trait ErrorCounter: Send + Sync {
    fn inc(&self, err: &ErrorValue);
}

/// [`ErrorCounter`] backed by an atomic integer.
#[derive(Debug, Default)]
pub struct SimpleErrorCounter {
    count: AtomicU64,
}

impl SimpleErrorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl ErrorCounter for SimpleErrorCounter {
    fn inc(&self, _err: &ErrorValue) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
