//! Core book-collection logic for Bookshelf.
//! This crate owns the book record invariants, the persisted collection store
//! and the in-memory query engine.

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod storage;

pub use config::{ConfigError, CoreConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::book::{
    Book, BookId, BookPatch, BookValidationError, NewBook, ReadingStatus, PLACEHOLDER_IMAGE_URL,
};
pub use query::filter::filter_books;
pub use query::sort::{sort_books, sort_by_field, SortDirection, SortField, UnknownSortField};
pub use query::view::BookListView;
pub use service::book_store::BookStore;
pub use service::envelope::Envelope;
pub use storage::{MemoryStorage, SqliteStorage, StorageError, StoragePort, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens an SQLite-backed store as described by `config`.
///
/// Uses `config.db_path` when set, otherwise a private in-memory database.
pub fn open_store(config: &CoreConfig) -> StorageResult<BookStore<SqliteStorage>> {
    let storage = match &config.db_path {
        Some(path) => SqliteStorage::open(path)?,
        None => SqliteStorage::open_in_memory()?,
    };
    Ok(BookStore::with_config(storage, config))
}

#[cfg(test)]
mod tests {
    use super::{core_version, open_store, CoreConfig, StoragePort};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn default_config_opens_empty_in_memory_store() {
        let store = open_store(&CoreConfig::default()).unwrap();
        assert_eq!(store.storage_key(), "book_list");
        assert_eq!(store.storage().get("book_list").unwrap(), None);
        assert!(store.fetch_all().into_data().unwrap().is_empty());
    }
}
