//! Durable named-entry storage contract.
//!
//! # Responsibility
//! - Read and write whole string values under a fixed key.
//!
//! # Invariants
//! - `write_entry` replaces the previous value for the key atomically.
//! - `read_entry` returns `None` when nothing was ever written for the key.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task collection.
pub const TASKS_ENTRY_KEY: &str = "tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reading from or writing to durable storage.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The database file was stamped by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Backend refused the operation (quota, read-only medium, ...).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key/value style durable storage.
pub trait TaskStore {
    fn read_entry(&self, key: &str) -> StoreResult<Option<String>>;
    fn write_entry(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn read_entry(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read_entry(key)
    }

    fn write_entry(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write_entry(key, value)
    }
}
