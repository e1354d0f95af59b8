//! Clock Module
//!
//! Time source used to stamp writes and evaluate expiry.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Source of the current Unix time in seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

// == System Clock ==
/// Wall-clock time via chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

// == Manual Clock ==
/// A settable clock. Clones share the same instant, so a test can keep a
/// handle while the cache owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
