use rusqlite::Connection;
use tasklist_core::repo::sqlite_store::SCHEMA_VERSION;
use tasklist_core::{
    encode_tasks, SqliteTaskStore, StoreError, Task, TaskStatus, TaskStore, TASKS_ENTRY_KEY,
};

#[test]
fn reopened_file_keeps_tasks_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.sqlite3");
    let payload =
        encode_tasks(&[Task::with_id("1", "buy milk", TaskStatus::Done).unwrap()]).unwrap();

    {
        let store = SqliteTaskStore::open(&path).unwrap();
        store.write_entry(TASKS_ENTRY_KEY, &payload).unwrap();
    }

    let reopened = SqliteTaskStore::open(&path).unwrap();
    assert_eq!(
        reopened.read_entry(TASKS_ENTRY_KEY).unwrap().as_deref(),
        Some(payload.as_str())
    );
    assert!(reopened.updated_at(TASKS_ENTRY_KEY).unwrap().unwrap() > 0);
}

#[test]
fn fresh_file_is_stamped_with_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sqlite3");

    let store = SqliteTaskStore::open(&path).unwrap();
    assert_eq!(store.read_entry(TASKS_ENTRY_KEY).unwrap(), None);
    drop(store);

    let conn = Connection::open(&path).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);
}

#[test]
fn file_from_newer_build_is_refused_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqliteTaskStore::open(&path) {
        Err(StoreError::UnsupportedSchemaVersion { found, supported }) => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema was accepted"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(user_version(&conn), 999);
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'storage_entries';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
