//! Configuration Module
//!
//! Handles loading the record store settings from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Path that opens a private in-memory SQLite database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Record store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_path: String,
    /// Name of the table holding cache rows
    pub table_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DATABASE_PATH` - SQLite database path (default: cache.db)
    /// - `CACHE_TABLE` - Table holding cache rows (default: cache_entries)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_path: env::var("CACHE_DATABASE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_path),
            table_name: env::var("CACHE_TABLE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.table_name),
        }
    }

    /// Returns true if the database lives in memory only.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_PATH
    }

    /// Checks that the table name is a plain SQL identifier.
    ///
    /// The name is interpolated into statements, so only ASCII letters,
    /// digits and underscores are accepted, and it may not start with a digit.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.table_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "cache.db".to_string(),
            table_name: "cache_entries".to_string(),
        }
    }
}

pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidConfig(format!(
            "table name '{}' is not a plain SQL identifier",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.database_path, "cache.db");
        assert_eq!(config.table_name, "cache_entries");
        assert!(!config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_DATABASE_PATH");
        env::remove_var("CACHE_TABLE");

        let config = Config::from_env();
        assert_eq!(config.database_path, "cache.db");
        assert_eq!(config.table_name, "cache_entries");
    }

    #[test]
    fn test_in_memory_path() {
        let config = Config {
            database_path: IN_MEMORY_PATH.to_string(),
            ..Config::default()
        };
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_validate_rejects_unsafe_table_names() {
        for name in ["", "1cache", "cache entries", "cache;DROP TABLE x", "caché"] {
            let config = Config {
                table_name: name.to_string(),
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(CacheError::InvalidConfig(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_accepts_identifiers() {
        for name in ["kv_cache", "_cache", "Cache2"] {
            assert!(validate_identifier(name).is_ok(), "{:?} should be accepted", name);
        }
    }
}
