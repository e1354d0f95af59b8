//! SQLite record store.
//!
//! One table, `{id, label, data, lifetime, created_at}`, with `data` held as
//! JSON text. The table is created on open if it does not exist.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::cache::{CacheEntry, NewCacheEntry};
use crate::config::{validate_identifier, Config};
use crate::error::{CacheError, Result};
use crate::records::RecordStore;

// == SQLite Record Store ==
/// Record store backed by a single SQLite table.
#[derive(Debug)]
pub struct SqliteRecordStore {
    conn: Connection,
    table: String,
}

impl SqliteRecordStore {
    // == Constructors ==
    /// Opens the database named by `config` and ensures the table exists.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.database_path)?
        };
        info!(
            "Opened SQLite record store: path={}, table={}",
            config.database_path, config.table_name
        );
        Self::with_connection(conn, &config.table_name)
    }

    /// Opens (or creates) a database file using the given table.
    pub fn open(path: impl AsRef<Path>, table: &str) -> Result<Self> {
        validate_identifier(table)?;
        let conn = Connection::open(path)?;
        Self::with_connection(conn, table)
    }

    /// Opens a private in-memory database using the given table.
    pub fn open_in_memory(table: &str) -> Result<Self> {
        validate_identifier(table)?;
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    /// Wraps an existing connection, creating the table if needed.
    pub fn with_connection(conn: Connection, table: &str) -> Result<Self> {
        validate_identifier(table)?;
        let store = Self {
            conn,
            table: table.to_string(),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                label TEXT NOT NULL,
                data TEXT NOT NULL,
                lifetime INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            )",
            self.table
        ))?;
        Ok(())
    }

    /// Name of the table holding cache rows.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for SqliteRecordStore {
    fn find_latest(&self, label: &str) -> Result<Option<CacheEntry>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT id, label, data, lifetime, created_at FROM {}
                     WHERE label = ?1 ORDER BY id DESC LIMIT 1",
                    self.table
                ),
                params![label],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, label, data, lifetime, created_at)) = row else {
            return Ok(None);
        };

        let lifetime = u64::try_from(lifetime).map_err(|_| {
            CacheError::Internal(format!("row {} has negative lifetime {}", id, lifetime))
        })?;

        Ok(Some(CacheEntry {
            id,
            label,
            data: serde_json::from_str(&data)?,
            lifetime,
            created_at,
        }))
    }

    fn insert(&mut self, entry: NewCacheEntry) -> Result<i64> {
        let lifetime =
            i64::try_from(entry.lifetime).map_err(|_| CacheError::InvalidLifetime(entry.lifetime))?;
        let data = serde_json::to_string(&entry.data)?;

        self.conn.execute(
            &format!(
                "INSERT INTO {} (label, data, lifetime, created_at) VALUES (?1, ?2, ?3, ?4)",
                self.table
            ),
            params![entry.label, data, lifetime, entry.created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_where(&mut self, label: &str) -> Result<usize> {
        let removed = self.conn.execute(
            &format!("DELETE FROM {} WHERE label = ?1", self.table),
            params![label],
        )?;
        Ok(removed)
    }

    fn count(&self, label: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE label = ?1", self.table),
            params![label],
            |row| row.get(0),
        )?;
        usize::try_from(count)
            .map_err(|_| CacheError::Internal(format!("negative row count {}", count)))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_entry(label: &str, data: serde_json::Value, lifetime: u64) -> NewCacheEntry {
        NewCacheEntry {
            label: label.to_string(),
            data,
            lifetime,
            created_at: 1_700_000_000,
        }
    }

    fn store() -> SqliteRecordStore {
        SqliteRecordStore::open_in_memory("cache_entries").unwrap()
    }

    #[test]
    fn test_insert_and_find_latest() {
        let mut store = store();

        let id = store
            .insert(new_entry("key", json!({"n": 42, "tags": ["a"]}), 30))
            .unwrap();
        let row = store.find_latest("key").unwrap().unwrap();

        assert_eq!(row.id, id);
        assert_eq!(row.label, "key");
        assert_eq!(row.data, json!({"n": 42, "tags": ["a"]}));
        assert_eq!(row.lifetime, 30);
        assert_eq!(row.created_at, 1_700_000_000);
    }

    #[test]
    fn test_find_latest_missing() {
        let store = store();
        assert!(store.find_latest("missing").unwrap().is_none());
    }

    #[test]
    fn test_find_latest_orders_by_id_desc() {
        let mut store = store();

        store.insert(new_entry("key", json!("old"), 0)).unwrap();
        store.insert(new_entry("key", json!("new"), 0)).unwrap();

        let row = store.find_latest("key").unwrap().unwrap();
        assert_eq!(row.data, json!("new"));
        assert_eq!(store.count("key").unwrap(), 2);
    }

    #[test]
    fn test_delete_where() {
        let mut store = store();

        store.insert(new_entry("key", json!(1), 0)).unwrap();
        store.insert(new_entry("key", json!(2), 0)).unwrap();
        store.insert(new_entry("other", json!(3), 0)).unwrap();

        assert_eq!(store.delete_where("key").unwrap(), 2);
        assert_eq!(store.delete_where("key").unwrap(), 0);
        assert_eq!(store.count("other").unwrap(), 1);
    }

    #[test]
    fn test_insert_rejects_unrepresentable_lifetime() {
        let mut store = store();

        let result = store.insert(new_entry("key", json!(1), u64::MAX));
        assert!(matches!(result, Err(CacheError::InvalidLifetime(v)) if v == u64::MAX));
        assert_eq!(store.count("key").unwrap(), 0);
    }

    #[test]
    fn test_open_rejects_unsafe_table() {
        let result = SqliteRecordStore::open_in_memory("x; DROP TABLE y");
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_config_in_memory() {
        let config = Config {
            database_path: crate::config::IN_MEMORY_PATH.to_string(),
            table_name: "kv_cache".to_string(),
        };

        let store = SqliteRecordStore::from_config(&config).unwrap();
        assert_eq!(store.table(), "kv_cache");
        assert_eq!(store.count("anything").unwrap(), 0);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let mut store = store();
        store.insert(new_entry("key", json!(true), 0)).unwrap();

        store.ensure_schema().unwrap();
        assert_eq!(store.count("key").unwrap(), 1);
    }

    #[test]
    fn test_corrupt_payload_is_an_error() {
        let store = store();
        store
            .connection()
            .execute(
                "INSERT INTO cache_entries (label, data, lifetime, created_at)
                 VALUES ('bad', '{not json', 0, 0)",
                [],
            )
            .unwrap();

        assert!(matches!(
            store.find_latest("bad"),
            Err(CacheError::Serialization(_))
        ));
    }
}
