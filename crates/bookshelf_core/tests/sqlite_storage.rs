use bookshelf_core::{
    open_store, CoreConfig, NewBook, ReadingStatus, SqliteStorage, StorageError, StoragePort,
};
use rusqlite::Connection;

fn kv_table_count(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries';",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn open_in_memory_creates_kv_table() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(kv_table_count(storage.connection()), 1);
}

#[test]
fn from_connection_prepares_raw_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(kv_table_count(&conn), 0);

    let storage = SqliteStorage::from_connection(conn).unwrap();
    assert_eq!(kv_table_count(storage.connection()), 1);
    storage.set("book_list", "[]").unwrap();
    assert_eq!(storage.get("book_list").unwrap().as_deref(), Some("[]"));
}

#[test]
fn reopening_file_keeps_existing_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.sqlite3");
    SqliteStorage::open(&path)
        .unwrap()
        .set("book_list", "[]")
        .unwrap();

    let reopened = SqliteStorage::open(&path).unwrap();
    assert_eq!(reopened.get("book_list").unwrap().as_deref(), Some("[]"));
}

#[test]
fn unopenable_path_reports_db_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("books.sqlite3");

    let err = SqliteStorage::open(&path).err().unwrap();
    assert!(matches!(err, StorageError::Db(_)));
}

#[test]
fn sqlite_storage_get_and_set_roundtrip() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.get("book_list").unwrap(), None);

    storage.set("book_list", "[]").unwrap();
    assert_eq!(storage.get("book_list").unwrap().as_deref(), Some("[]"));

    storage.set("book_list", "[{\"a\":1}]").unwrap();
    assert_eq!(
        storage.get("book_list").unwrap().as_deref(),
        Some("[{\"a\":1}]")
    );

    let rows: i64 = storage
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig {
        db_path: Some(dir.path().join("books.sqlite3")),
        ..CoreConfig::default()
    };

    let created = {
        let store = open_store(&config).unwrap();
        store
            .create(NewBook::new("Dune", "Frank Herbert", ReadingStatus::Read, 412))
            .into_data()
            .unwrap()
    };

    let reopened = open_store(&config).unwrap();
    assert_eq!(reopened.fetch_all().into_data().unwrap(), vec![created]);
}

#[test]
fn config_file_drives_store_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("bookshelf.json");
    let db_path = dir.path().join("shelf.sqlite3");
    let text = serde_json::json!({
        "storage_key": "my_shelf",
        "db_path": db_path,
    })
    .to_string();
    std::fs::write(&config_path, text).unwrap();

    let config = CoreConfig::from_file(&config_path).unwrap();
    let store = open_store(&config).unwrap();
    store.create(NewBook::new("Dune", "Frank Herbert", ReadingStatus::Read, 412));

    assert_eq!(store.storage_key(), "my_shelf");
    assert!(store.storage().get("my_shelf").unwrap().is_some());
    assert!(db_path.exists());
}

#[test]
fn missing_config_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CoreConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
