//! Cache Module
//!
//! The cache contract and its record-store-backed implementation with lazy
//! expiry.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, NewCacheEntry};
pub use stats::CacheStats;
pub use store::CacheStore;

use serde_json::Value;

// == Public Constants ==
/// Lifetime meaning "never expires by time".
pub const DEFAULT_LIFETIME: u64 = 0;

// == Cache Contract ==
/// Uniform key-value cache contract.
///
/// Failures never surface as errors: lookups report absence and writes
/// report `false`.
pub trait Cache {
    /// Returns the cached data for `id`, or None if absent or expired.
    fn fetch(&mut self, id: &str) -> Option<Value>;

    /// Tests if a live entry exists for `id`.
    fn contains(&mut self, id: &str) -> bool;

    /// Puts data into the cache. A `lifetime` of 0 never expires.
    fn save(&mut self, id: &str, data: Value, lifetime: u64) -> bool;

    /// Deletes every entry for `id`. Deleting a missing entry succeeds.
    fn delete(&mut self, id: &str) -> bool;

    /// Retrieves statistics, if the cache tracks any.
    fn get_stats(&self) -> Option<CacheStats>;
}
