//! Process-local store for embedding and tests.

use crate::repo::task_store::{StoreResult, TaskStore};
use std::cell::RefCell;
use std::collections::HashMap;

/// Non-durable named-entry store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Returns a copy of the current value under `key`.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl TaskStore for MemoryTaskStore {
    fn read_entry(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entry(key))
    }

    fn write_entry(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
