//! Error types for the cache
//!
//! Provides unified error handling using thiserror. These errors stay inside
//! the crate's storage layer: the `Cache` contract reports failures as
//! `false` / `None` after logging the cause.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for record stores and configuration.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The underlying SQLite database reported an error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A payload could not be encoded to or decoded from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lifetime does not fit in the store's integer column
    #[error("Invalid lifetime: {0} seconds")]
    InvalidLifetime(u64),

    /// Configuration value rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal invariant violated
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
