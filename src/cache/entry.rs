//! Cache Entry Module
//!
//! Defines the persisted row shape and the lazy expiry rule.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A single stored row, as returned by a record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Store-assigned id, increasing with every insert
    pub id: i64,
    /// The cache key (not unique: the greatest id wins)
    pub label: String,
    /// The cached payload
    pub data: Value,
    /// Lifetime in seconds, 0 = never expires
    pub lifetime: u64,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
}

impl CacheEntry {
    // == Expiration ==
    /// Returns the Unix second at which the entry expires, or None if it never does.
    pub fn expires_at(&self) -> Option<i64> {
        if self.lifetime == 0 {
            return None;
        }
        let lifetime = i64::try_from(self.lifetime).unwrap_or(i64::MAX);
        Some(self.created_at.saturating_add(lifetime))
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: once `now` reaches `created_at + lifetime` the entry
    /// is expired. A zero lifetime never expires.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.expires_at() {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Inverse of [`CacheEntry::is_expired_at`].
    pub fn is_live_at(&self, now: i64) -> bool {
        !self.is_expired_at(now)
    }

    /// Remaining lifetime in seconds at `now`, or None if the entry never expires.
    pub fn ttl_remaining_at(&self, now: i64) -> Option<u64> {
        self.expires_at()
            .map(|expires| u64::try_from(expires.saturating_sub(now)).unwrap_or(0))
    }
}

// == New Cache Entry ==
/// Insert payload for a record store; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCacheEntry {
    pub label: String,
    pub data: Value,
    pub lifetime: u64,
    pub created_at: i64,
}

impl NewCacheEntry {
    /// Attaches a store-assigned id, producing the persisted row.
    pub fn with_id(self, id: i64) -> CacheEntry {
        CacheEntry {
            id,
            label: self.label,
            data: self.data,
            lifetime: self.lifetime,
            created_at: self.created_at,
        }
    }
}
