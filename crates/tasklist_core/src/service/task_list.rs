//! Task list controller.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection and active filter.
//! - Apply add/edit/remove/reclassify mutations and re-sort after each.
//! - Persist the full collection after every accepted mutation.
//! - Derive the grouped, filtered projection views render.
//!
//! # Invariants
//! - Task ids in the collection are unique.
//! - The collection is sorted by text after every mutation.
//! - Storage failures are logged and never surfaced; memory stays authoritative.
//! - The active filter is view state and is never persisted.

use crate::model::task::{
    compare_by_text, sort_by_text, Task, TaskFilter, TaskId, TaskStatus, TaskValidationError,
};
use crate::repo::codec::{decode_tasks, encode_tasks};
use crate::repo::task_store::{TaskStore, TASKS_ENTRY_KEY};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced to callers of the controller.
///
/// Persistence failures are deliberately absent: they are logged only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    Validation(TaskValidationError),
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskListError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Filtered tasks split into the three board groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleTasks {
    pub undone: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl VisibleTasks {
    /// Returns the group holding tasks of `status`.
    pub fn group(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Undone => &self.undone,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.undone.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates all groups in board order (undone, in progress, done).
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.undone
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.done.iter())
    }
}

/// Controller owning the task collection and its durable mirror.
pub struct TaskListController<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
    filter: TaskFilter,
    synced: bool,
}

impl<S: TaskStore> TaskListController<S> {
    /// Loads the persisted collection from `store`.
    ///
    /// Never fails: a missing entry, an unreadable store or an incompatible
    /// payload all start an empty list.
    pub fn initialize(store: S) -> Self {
        let tasks = load_tasks(&store);
        Self {
            store,
            tasks,
            filter: TaskFilter::All,
            synced: true,
        }
    }

    /// Adds a new `undone` task with trimmed `raw_text`.
    ///
    /// # Errors
    /// - `Validation(EmptyText)` when the trimmed text is empty; nothing changes.
    pub fn add_task(&mut self, raw_text: &str) -> Result<TaskId, TaskListError> {
        let task = match Task::new(raw_text) {
            Ok(task) => task,
            Err(err) => {
                warn!("event=task_add module=service status=rejected reason={err}");
                return Err(err.into());
            }
        };

        let id = task.id.clone();
        info!(
            "event=task_add module=service status=ok task_id={id} text_len={}",
            task.text.chars().count()
        );
        self.tasks.push(task);
        self.commit();
        Ok(id)
    }

    /// Permanently removes the task with `id`.
    ///
    /// Confirmation is the caller's job. Returns `false` for unknown ids,
    /// which are a no-op.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_remove module=service status=noop task_id={id}");
            return false;
        }

        info!("event=task_remove module=service status=ok task_id={id}");
        self.commit();
        true
    }

    /// Replaces the text of the task with `id`.
    ///
    /// Unlike creation, the text is stored verbatim: no trimming and empty
    /// text is accepted.
    pub fn update_task_text(&mut self, id: &TaskId, new_text: impl Into<String>) -> bool {
        let Some(task) = self.find_mut(id) else {
            debug!("event=task_update_text module=service status=noop task_id={id}");
            return false;
        };

        task.text = new_text.into();
        info!(
            "event=task_update_text module=service status=ok task_id={id} text_len={}",
            task.text.chars().count()
        );
        self.commit();
        true
    }

    /// Moves the task with `id` to `status`. Any transition is allowed.
    pub fn set_task_status(&mut self, id: &TaskId, status: TaskStatus) -> bool {
        let Some(task) = self.find_mut(id) else {
            debug!("event=task_set_status module=service status=noop task_id={id}");
            return false;
        };

        let previous = task.status;
        task.status = status;
        info!(
            "event=task_set_status module=service status=ok task_id={id} from={previous} to={status}"
        );
        self.commit();
        true
    }

    /// Selects which statuses `visible_tasks` reports.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn active_filter(&self) -> TaskFilter {
        self.filter
    }

    /// Returns tasks matching the active filter, grouped by status.
    ///
    /// Each group is sorted by text.
    pub fn visible_tasks(&self) -> VisibleTasks {
        let mut visible = VisibleTasks::default();
        for task in self
            .tasks
            .iter()
            .filter(|task| self.filter.matches(task.status))
        {
            let group = match task.status {
                TaskStatus::Undone => &mut visible.undone,
                TaskStatus::InProgress => &mut visible.in_progress,
                TaskStatus::Done => &mut visible.done,
            };
            group.push(task.clone());
        }

        for group in [
            &mut visible.undone,
            &mut visible.in_progress,
            &mut visible.done,
        ] {
            group.sort_by(compare_by_text);
        }
        visible
    }

    /// Full collection in display order, ignoring the filter.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Whether durable storage reflects the in-memory collection.
    ///
    /// Turns `false` after a failed save and back to `true` after the next
    /// successful one.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Releases the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn find_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    /// Re-sorts then persists. Called after every accepted mutation.
    fn commit(&mut self) {
        sort_by_text(&mut self.tasks);
        self.synced = self.persist();
    }

    fn persist(&self) -> bool {
        let payload = match encode_tasks(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=tasks_save module=service status=error error_code=encode_failed error={err}"
                );
                return false;
            }
        };

        match self.store.write_entry(TASKS_ENTRY_KEY, &payload) {
            Ok(()) => {
                debug!(
                    "event=tasks_save module=service status=ok count={} bytes={}",
                    self.tasks.len(),
                    payload.len()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=service status=error error_code=write_failed count={} error={err}",
                    self.tasks.len()
                );
                false
            }
        }
    }
}

fn load_tasks<S: TaskStore>(store: &S) -> Vec<Task> {
    let payload = match store.read_entry(TASKS_ENTRY_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!("event=tasks_load module=service status=ok source=empty count=0");
            return Vec::new();
        }
        Err(err) => {
            error!(
                "event=tasks_load module=service status=error error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match decode_tasks(&payload) {
        Ok(tasks) => {
            info!(
                "event=tasks_load module=service status=ok source=store count={}",
                tasks.len()
            );
            tasks
        }
        Err(err) => {
            error!(
                "event=tasks_load module=service status=error error_code=decode_failed bytes={} error={err}",
                payload.len()
            );
            Vec::new()
        }
    }
}
