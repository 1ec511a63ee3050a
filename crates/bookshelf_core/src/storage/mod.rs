//! Persistence boundary consumed by the collection store.
//!
//! # Responsibility
//! - Define the key/value `StoragePort` the store reads and writes through.
//! - Provide in-memory and SQLite-backed implementations.
//! - Encode/decode the collection as structured text.
//!
//! # Invariants
//! - A port stores opaque text; it never interprets collection contents.
//! - `set` either stores the whole value or fails without partial writes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite failure from `SqliteStorage`.
    Db(rusqlite::Error),
    /// Write rejected because the value exceeds the backend's capacity.
    QuotaExceeded { limit: usize, requested: usize },
    /// Failure from a custom backend.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded { limit, requested } => write!(
                f,
                "storage quota exceeded: {requested} bytes requested, limit is {limit}"
            ),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

/// Key/value text store holding the serialized collection.
pub trait StoragePort {
    /// Returns the value stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: StoragePort + ?Sized> StoragePort for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
