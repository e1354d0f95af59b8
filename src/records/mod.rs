//! Record Store Module
//!
//! The row-oriented persistence collaborator behind the cache, plus its
//! SQLite and in-memory implementations.

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::cache::{CacheEntry, NewCacheEntry};
use crate::error::Result;

/// Row storage consumed by [`crate::cache::CacheStore`].
///
/// Rows are append-only and keyed by a non-unique label. Implementations
/// assign increasing ids on insert.
pub trait RecordStore {
    /// Returns the row with the greatest id for `label`, if any.
    fn find_latest(&self, label: &str) -> Result<Option<CacheEntry>>;

    /// Appends a row and returns its assigned id.
    fn insert(&mut self, entry: NewCacheEntry) -> Result<i64>;

    /// Removes every row for `label`, returning how many were removed.
    fn delete_where(&mut self, label: &str) -> Result<usize>;

    /// Counts the rows stored for `label`, shadowed ones included.
    fn count(&self, label: &str) -> Result<usize>;
}
