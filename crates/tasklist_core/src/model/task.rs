//! Task domain model.
//!
//! # Responsibility
//! - Define the single record kept by the task list.
//! - Define the status and filter vocabularies shared by service and views.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another task.
//! - Newly created tasks carry trimmed, non-empty text.
//! - Status transitions are unrestricted: any status may move to any other.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable opaque identifier of a task.
///
/// Fresh ids are UUID v4 strings, but persisted ids are kept verbatim so
/// records written by other producers survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress state of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Not started.
    Undone,
    /// Work has started.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board order.
    pub const ALL: [TaskStatus; 3] = [Self::Undone, Self::InProgress, Self::Done];

    /// Storage spelling, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undone => "undone",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Human-readable group heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::Undone => "Undone",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseVocabularyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "undone" => Ok(Self::Undone),
            "inProgress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseVocabularyError {
                kind: "status",
                value: other.to_string(),
                expected: "undone|inProgress|done",
            }),
        }
    }
}

/// View-level predicate selecting which tasks are visible.
///
/// Filters never alter stored data and are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    /// Only `done` tasks.
    Completed,
    /// Only `inProgress` tasks.
    Pending,
    /// Only `undone` tasks.
    Undone,
}

impl TaskFilter {
    /// All filters in the order a filter bar shows them.
    pub const ALL: [TaskFilter; 4] = [Self::All, Self::Completed, Self::Pending, Self::Undone];

    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Completed => status == TaskStatus::Done,
            Self::Pending => status == TaskStatus::InProgress,
            Self::Undone => status == TaskStatus::Undone,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Undone => "undone",
        }
    }

    /// Human-readable filter control label.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Undone => "Undone",
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = ParseVocabularyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "undone" => Ok(Self::Undone),
            other => Err(ParseVocabularyError {
                kind: "filter",
                value: other.to_string(),
                expected: "all|completed|pending|undone",
            }),
        }
    }
}

/// Unknown status or filter spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVocabularyError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl Display for ParseVocabularyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported {} `{}`; expected {}",
            self.kind, self.value, self.expected
        )
    }
}

impl Error for ParseVocabularyError {}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Creation text was empty after trimming.
    EmptyText,
    /// A restored record had an empty id.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::EmptyId => write!(f, "task id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: TaskStatus,
}

impl Task {
    /// Creates an `undone` task with a generated id.
    ///
    /// # Errors
    /// - `EmptyText` when `raw_text` is empty or whitespace-only.
    pub fn new(raw_text: &str) -> Result<Self, TaskValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        Ok(Self {
            id: TaskId::generate(),
            text: text.to_string(),
            status: TaskStatus::Undone,
        })
    }

    /// Rebuilds a task from previously stored fields.
    ///
    /// Text is kept verbatim: edits may legitimately leave it empty.
    pub fn with_id(
        id: impl Into<TaskId>,
        text: impl Into<String>,
        status: TaskStatus,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: id.into(),
            text: text.into(),
            status,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks invariants that must hold for every stored record.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        Ok(())
    }
}

/// Display order of the list, approximating a root-locale `localeCompare`.
///
/// Texts compare case-insensitively first; texts differing only in case
/// order lowercase before uppercase at the first differing character, so
/// `apple < Banana < banana < cherry`.
pub fn compare_by_text(left: &Task, right: &Task) -> Ordering {
    compare_text(&left.text, &right.text)
}

/// String form of [`compare_by_text`].
pub fn compare_text(left: &str, right: &str) -> Ordering {
    let folded = left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| case_tiebreak(left, right))
        .then_with(|| left.cmp(right))
}

fn case_tiebreak(left: &str, right: &str) -> Ordering {
    let differing = left
        .chars()
        .zip(right.chars())
        .find(|(l, r)| l != r);
    match differing {
        Some((l, r)) if l.is_lowercase() && !r.is_lowercase() => Ordering::Less,
        Some((l, r)) if !l.is_lowercase() && r.is_lowercase() => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Stable in-place sort by `text`; equal texts keep their relative order.
pub fn sort_by_text(tasks: &mut [Task]) {
    tasks.sort_by(compare_by_text);
}

#[cfg(test)]
mod tests {
    use super::{compare_text, sort_by_text, Task, TaskFilter, TaskStatus, TaskValidationError};
    use std::cmp::Ordering;

    #[test]
    fn new_trims_text_and_starts_undone() {
        let task = Task::new("  buy milk \n").unwrap();
        assert_eq!(task.text, "buy milk");
        assert_eq!(task.status, TaskStatus::Undone);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn new_rejects_whitespace_only_text() {
        assert_eq!(Task::new("").unwrap_err(), TaskValidationError::EmptyText);
        assert_eq!(Task::new(" \t ").unwrap_err(), TaskValidationError::EmptyText);
    }

    #[test]
    fn generated_ids_differ() {
        let first = Task::new("a").unwrap();
        let second = Task::new("a").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn sort_interleaves_cases_like_locale_compare() {
        let mut tasks = vec![
            Task::with_id("1", "cherry", TaskStatus::Undone).unwrap(),
            Task::with_id("2", "Banana", TaskStatus::Undone).unwrap(),
            Task::with_id("3", "apple", TaskStatus::Undone).unwrap(),
        ];
        sort_by_text(&mut tasks);

        let texts: Vec<&str> = tasks.iter().map(|task| task.text.as_str()).collect();
        assert_eq!(texts, vec!["apple", "Banana", "cherry"]);
    }

    #[test]
    fn sort_puts_lowercase_first_on_case_only_difference_and_is_stable() {
        let mut tasks = vec![
            Task::with_id("3", "B", TaskStatus::Done).unwrap(),
            Task::with_id("1", "a", TaskStatus::Undone).unwrap(),
            Task::with_id("2", "b", TaskStatus::Undone).unwrap(),
            Task::with_id("4", "a", TaskStatus::InProgress).unwrap(),
        ];
        sort_by_text(&mut tasks);

        let ids: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4", "2", "3"]);
    }

    #[test]
    fn compare_text_orders_prefixes_and_case_variants() {
        assert_eq!(compare_text("buy", "Buy milk"), Ordering::Less);
        assert_eq!(compare_text("Buy milk", "apples"), Ordering::Greater);
        assert_eq!(compare_text("milk", "Milk"), Ordering::Less);
        assert_eq!(compare_text("Milk", "Milk"), Ordering::Equal);
        assert_eq!(compare_text("", "a"), Ordering::Less);
    }

    #[test]
    fn filter_matches_expected_statuses() {
        assert!(TaskFilter::All.matches(TaskStatus::Done));
        assert!(TaskFilter::Completed.matches(TaskStatus::Done));
        assert!(!TaskFilter::Completed.matches(TaskStatus::InProgress));
        assert!(TaskFilter::Pending.matches(TaskStatus::InProgress));
        assert!(!TaskFilter::Pending.matches(TaskStatus::Undone));
        assert!(TaskFilter::Undone.matches(TaskStatus::Undone));
        assert!(!TaskFilter::Undone.matches(TaskStatus::Done));
    }

    #[test]
    fn status_and_filter_parse_known_spellings() {
        assert_eq!("inProgress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("in-progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("started".parse::<TaskStatus>().is_err());
        assert_eq!(" Completed ".parse::<TaskFilter>(), Ok(TaskFilter::Completed));
        let err = "later".parse::<TaskFilter>().unwrap_err();
        assert!(err.to_string().contains("all|completed|pending|undone"));
    }
}
