//! In-memory record store.

use crate::cache::{CacheEntry, NewCacheEntry};
use crate::error::Result;
use crate::records::RecordStore;

/// A `Vec`-backed, append-only record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rows: Vec<CacheEntry>,
    last_id: i64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored rows across all labels.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn find_latest(&self, label: &str) -> Result<Option<CacheEntry>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.label == label)
            .max_by_key(|row| row.id)
            .cloned())
    }

    fn insert(&mut self, entry: NewCacheEntry) -> Result<i64> {
        self.last_id += 1;
        let id = self.last_id;
        self.rows.push(entry.with_id(id));
        Ok(id)
    }

    fn delete_where(&mut self, label: &str) -> Result<usize> {
        let before = self.rows.len();
        self.rows.retain(|row| row.label != label);
        Ok(before - self.rows.len())
    }

    fn count(&self, label: &str) -> Result<usize> {
        Ok(self.rows.iter().filter(|row| row.label == label).count())
    }
}
