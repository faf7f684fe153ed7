//! Storage abstractions, backends and the persisted payload format.
//!
//! # Responsibility
//! - Define the durable named-entry contract used by the task list service.
//! - Isolate SQLite details from service orchestration.
//! - Own the encode/decode rules for the persisted task collection.
//!
//! # Invariants
//! - Stores move opaque strings; only `codec` knows the payload shape.
//! - A payload either decodes completely or is rejected as a whole.

pub mod codec;
pub mod memory_store;
pub mod sqlite_store;
pub mod task_store;
