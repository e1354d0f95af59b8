//! SQL Cache - A key-value cache facade over a relational record store
//!
//! Rows are looked up newest-first by key, checked for expiry, and deleted
//! lazily when a read finds them expired. Writes append a new row.

pub mod cache;
pub mod config;
pub mod error;
pub mod records;

pub use cache::{Cache, CacheStats, CacheStore, DEFAULT_LIFETIME};
pub use config::Config;
pub use error::{CacheError, Result};
pub use records::{MemoryRecordStore, RecordStore, SqliteRecordStore};
