//! Key/value local storage backends.
//!
//! # Responsibility
//! - Provide the string-keyed, string-valued storage every store persists into.
//! - Centralize JSON encode/decode of stored blobs.
//!
//! # Invariants
//! - `set_item` fully replaces the previous value of a key.
//! - A key that was never written reads as `None`, never as an error.
//! - Decode failures surface as `StorageError::Malformed` carrying the key.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod keys;
mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Non-SQLite backend failure.
    Backend(String),
    /// Stored blob could not be decoded.
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    /// Value could not be encoded.
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend error: {message}"),
            Self::Malformed { key, source } => {
                write!(f, "malformed value under storage key `{key}`: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode storage value: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key/value storage, the persistence seam for every store.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
    /// Lists stored keys in ascending order.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

impl<T: LocalStorage + ?Sized> LocalStorage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

/// Reads and decodes a JSON value stored under `key`.
pub fn read_json<T: DeserializeOwned>(
    storage: &impl LocalStorage,
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &impl LocalStorage,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(StorageError::Encode)?;
    storage.set_item(key, &raw)
}
