//! Core domain logic for the task list.
//! This crate is the single source of truth for task invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    ParseVocabularyError, Task, TaskFilter, TaskId, TaskStatus, TaskValidationError,
};
pub use repo::codec::{decode_tasks, encode_tasks, CodecError};
pub use repo::memory_store::MemoryTaskStore;
pub use repo::sqlite_store::SqliteTaskStore;
pub use repo::task_store::{StoreError, StoreResult, TaskStore, TASKS_ENTRY_KEY};
pub use service::task_list::{TaskListController, TaskListError, VisibleTasks};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
