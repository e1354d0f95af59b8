//! Cache Statistics Module
//!
//! Shape of the statistics a cache may report. Database-backed caches do not
//! track these, so `Cache::get_stats` on [`crate::cache::CacheStore`] always
//! returns `None`.

use serde::Serialize;

// == Cache Stats ==
/// Server statistics as exposed by caches that track them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of keys that have been requested and found present
    pub hits: u64,
    /// Number of items that have been requested and not found
    pub misses: u64,
    /// Time that the server has been running, in seconds
    pub uptime: u64,
    /// Memory used to store items, in bytes
    pub memory_usage: u64,
    /// Memory allowed for storage, in bytes (None = unbounded)
    pub memory_available: Option<u64>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
