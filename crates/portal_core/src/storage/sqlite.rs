//! SQLite-backed durable storage.
//!
//! # Invariants
//! - One row per key in `kv_store`; writes are upserts.
//! - `updated_at` is epoch milliseconds of the last write.

use super::{LocalStorage, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable key/value storage over a migrated SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (creating if needed) the storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection that already went through `open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl LocalStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_store ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStorage;
    use crate::storage::LocalStorage;

    #[test]
    fn upsert_get_remove_cycle() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(storage.get_item("user").unwrap().is_none());

        storage.set_item("user", "{\"id\":\"1\"}").unwrap();
        storage.set_item("user", "{\"id\":\"2\"}").unwrap();
        assert_eq!(
            storage.get_item("user").unwrap().as_deref(),
            Some("{\"id\":\"2\"}")
        );

        storage.set_item("darkTheme", "true").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["darkTheme", "user"]);

        storage.remove_item("user").unwrap();
        assert!(storage.get_item("user").unwrap().is_none());
        assert_eq!(storage.keys().unwrap(), vec!["darkTheme"]);
    }
}
