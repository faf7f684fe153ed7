//! SQLite-backed named-entry store.
//!
//! # Responsibility
//! - Open the database file and prepare the `storage_entries` table.
//! - Persist entries as one row per key.
//!
//! # Invariants
//! - Entries are never read or written before the schema is in place.
//! - Writes upsert and refresh `updated_at` (unix milliseconds).
//! - A file stamped with a newer `user_version` is refused, not rewritten.

use crate::repo::task_store::{StoreError, StoreResult, TaskStore};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS storage_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Named-entry store owning its SQLite connection.
pub struct SqliteTaskStore {
    conn: Connection,
}

impl SqliteTaskStore {
    /// Opens (creating if needed) the database file at `path`.
    ///
    /// # Errors
    /// - `Sqlite` when the file cannot be opened or the schema cannot be created.
    /// - `UnsupportedSchemaVersion` when the file was written by a newer build.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a private in-memory database; contents vanish on drop.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    /// Milliseconds timestamp of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> StoreResult<Option<i64>> {
        let stamp = self
            .conn
            .query_row(
                "SELECT updated_at FROM storage_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(stamp)
    }

    fn open_with(
        mode: &'static str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=repo status=start mode={mode}");

        let result = connect()
            .map_err(StoreError::from)
            .and_then(|conn| prepare_schema(&conn).map(|()| conn));
        match result {
            Ok(conn) => {
                info!(
                    "event=store_open module=repo status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn prepare_schema(conn: &Connection) -> StoreResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!("event=store_schema module=repo status=ok from_version={found} to_version={SCHEMA_VERSION}");
    Ok(())
}

impl TaskStore for SqliteTaskStore {
    fn read_entry(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_entry(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO storage_entries (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteTaskStore;
    use crate::repo::task_store::TaskStore;

    #[test]
    fn missing_entry_reads_as_none() {
        let store = SqliteTaskStore::open_in_memory().unwrap();
        assert_eq!(store.read_entry("tasks").unwrap(), None);
        assert_eq!(store.updated_at("tasks").unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_value_in_one_row() {
        let store = SqliteTaskStore::open_in_memory().unwrap();

        store.write_entry("tasks", "[]").unwrap();
        store.write_entry("tasks", "[1]").unwrap();

        assert_eq!(store.read_entry("tasks").unwrap().as_deref(), Some("[1]"));
        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM storage_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn overwrite_refreshes_updated_at() {
        let store = SqliteTaskStore::open_in_memory().unwrap();
        store.write_entry("tasks", "[]").unwrap();
        store
            .conn
            .execute("UPDATE storage_entries SET updated_at = 0 WHERE key = 'tasks';", [])
            .unwrap();
        assert_eq!(store.updated_at("tasks").unwrap(), Some(0));

        store.write_entry("tasks", "[]").unwrap();

        let refreshed = store.updated_at("tasks").unwrap().unwrap();
        assert!(refreshed > 0, "updated_at was not refreshed: {refreshed}");
    }

    #[test]
    fn entries_are_independent_per_key() {
        let store = SqliteTaskStore::open_in_memory().unwrap();
        store.write_entry("tasks", "[]").unwrap();
        store.write_entry("other", "x").unwrap();

        assert_eq!(store.read_entry("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.read_entry("other").unwrap().as_deref(), Some("x"));
    }
}
