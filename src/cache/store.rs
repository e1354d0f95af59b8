//! Cache Store Module
//!
//! Implements the cache contract over an injected record store: look up the
//! newest row for a key, check expiry, delete on expiry, append on write.

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{Cache, CacheEntry, CacheStats, Clock, NewCacheEntry, SystemClock};
use crate::records::RecordStore;

// == Cache Store ==
/// Cache facade over a [`RecordStore`].
///
/// Holds no cached state of its own. Writes append rows, so older rows for
/// the same key stay in storage, shadowed, until the key is deleted.
#[derive(Debug)]
pub struct CacheStore<S, C = SystemClock> {
    /// Row storage
    records: S,
    /// Time source for stamping and expiry
    clock: C,
}

impl<S: RecordStore> CacheStore<S> {
    // == Constructor ==
    /// Creates a new CacheStore over `records`, using wall-clock time.
    pub fn new(records: S) -> Self {
        Self::with_clock(records, SystemClock)
    }
}

impl<S: RecordStore, C: Clock> CacheStore<S, C> {
    /// Creates a new CacheStore with an explicit time source.
    pub fn with_clock(records: S, clock: C) -> Self {
        Self { records, clock }
    }

    /// Borrows the underlying record store.
    pub fn records(&self) -> &S {
        &self.records
    }

    /// Consumes the cache, returning the record store.
    pub fn into_records(self) -> S {
        self.records
    }

    // == Lookup ==
    /// Returns the newest live row for `id`.
    ///
    /// An expired row triggers a delete of every row for `id`. Lookup
    /// failures are logged and treated as absence.
    fn lookup(&mut self, id: &str) -> Option<CacheEntry> {
        let entry = match self.records.find_latest(id) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("Cache miss: {}", id);
                return None;
            }
            Err(e) => {
                warn!("Cache lookup failed for {}: {}", id, e);
                return None;
            }
        };

        if entry.is_expired_at(self.clock.now()) {
            debug!("Cache entry expired: {} (row {})", id, entry.id);
            self.delete(id);
            return None;
        }

        debug!("Cache hit: {} (row {})", id, entry.id);
        Some(entry)
    }
}

impl<S: RecordStore, C: Clock> Cache for CacheStore<S, C> {
    // == Fetch ==
    fn fetch(&mut self, id: &str) -> Option<Value> {
        self.lookup(id).map(|entry| entry.data)
    }

    // == Contains ==
    fn contains(&mut self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    // == Save ==
    fn save(&mut self, id: &str, data: Value, lifetime: u64) -> bool {
        let entry = NewCacheEntry {
            label: id.to_string(),
            data,
            lifetime,
            created_at: self.clock.now(),
        };

        match self.records.insert(entry) {
            Ok(row_id) => {
                debug!("Cache save: {} (row {}, lifetime {}s)", id, row_id, lifetime);
                true
            }
            Err(e) => {
                warn!("Cache save failed for {}: {}", id, e);
                false
            }
        }
    }

    // == Delete ==
    fn delete(&mut self, id: &str) -> bool {
        match self.records.delete_where(id) {
            Ok(removed) => {
                debug!("Cache delete: {} ({} rows)", id, removed);
                true
            }
            Err(e) => {
                warn!("Cache delete failed for {}: {}", id, e);
                false
            }
        }
    }

    // == Stats ==
    fn get_stats(&self) -> Option<CacheStats> {
        None
    }
}
