//! Persisted payload format for the task collection.
//!
//! The whole collection is stored as one JSON array:
//!
//! ```json
//! [{"id":"…","text":"buy milk","status":"inProgress"}]
//! ```
//!
//! # Invariants
//! - There is no schema version; incompatible payloads are rejected whole.
//! - Decoded collections have unique ids and are sorted by text.

use crate::model::task::{sort_by_text, Task, TaskId, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payload could not be produced or understood.
#[derive(Debug)]
pub enum CodecError {
    /// Not JSON, or JSON of the wrong shape.
    Malformed(serde_json::Error),
    /// A record broke a task invariant.
    InvalidTask(TaskValidationError),
    /// Two records shared one id.
    DuplicateId(TaskId),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed task payload: {err}"),
            Self::InvalidTask(err) => write!(f, "invalid task record: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id `{id}`"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

impl From<TaskValidationError> for CodecError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

/// Serializes the full collection into the stored representation.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a stored payload back into a collection.
///
/// # Errors
/// - `Malformed` for non-JSON, non-array or mistyped records.
/// - `InvalidTask` when a record fails `Task::validate`.
/// - `DuplicateId` when ids repeat.
pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, CodecError> {
    let mut tasks: Vec<Task> = serde_json::from_str(payload)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        task.validate()?;
        if !seen.insert(&task.id) {
            return Err(CodecError::DuplicateId(task.id.clone()));
        }
    }

    sort_by_text(&mut tasks);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks, CodecError};
    use crate::model::task::{Task, TaskStatus, TaskValidationError};

    #[test]
    fn encode_uses_storage_field_names() {
        let task = Task::with_id("a1", "ship it", TaskStatus::InProgress).unwrap();
        let payload = encode_tasks(&[task]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{ "id": "a1", "text": "ship it", "status": "inProgress" }])
        );
    }

    #[test]
    fn decode_sorts_by_text_and_ignores_unknown_fields() {
        let payload = r#"[
            {"id":"2","text":"wash dishes","status":"done","color":"red"},
            {"id":"1","text":"buy milk","status":"undone"}
        ]"#;
        let tasks = decode_tasks(payload).unwrap();

        let texts: Vec<&str> = tasks.iter().map(|task| task.text.as_str()).collect();
        assert_eq!(texts, vec!["buy milk", "wash dishes"]);
        assert_eq!(tasks[1].status, TaskStatus::Done);
    }

    #[test]
    fn decode_accepts_empty_text_written_by_edits() {
        let tasks = decode_tasks(r#"[{"id":"1","text":"","status":"undone"}]"#).unwrap();
        assert_eq!(tasks[0].text, "");
    }

    #[test]
    fn decode_rejects_incompatible_payloads() {
        for payload in [
            "not json",
            "{}",
            r#"{"tasks":[]}"#,
            r#"[{"id":"1","text":"a"}]"#,
            r#"[{"id":"1","text":"a","status":"archived"}]"#,
            r#"[{"id":1,"text":"a","status":"done"}]"#,
        ] {
            let err = decode_tasks(payload).unwrap_err();
            assert!(matches!(err, CodecError::Malformed(_)), "payload {payload}");
        }
    }

    #[test]
    fn decode_rejects_empty_and_duplicate_ids() {
        let err = decode_tasks(r#"[{"id":"","text":"a","status":"done"}]"#).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidTask(TaskValidationError::EmptyId)
        ));

        let err = decode_tasks(
            r#"[{"id":"x","text":"a","status":"done"},{"id":"x","text":"b","status":"undone"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::DuplicateId(id) if id.as_str() == "x"));
    }
}
