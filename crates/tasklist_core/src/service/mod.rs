//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model rules and storage into use-case level APIs.
//! - Keep views decoupled from storage details.

pub mod task_list;
