//! Command execution against a task list controller.
//!
//! # Responsibility
//! - Translate parsed CLI intents into controller calls.
//! - Obtain confirmation before removal and surface validation failures.
//! - Print the board after every command.
//!
//! # Invariants
//! - Storage is only reached through the controller.

use crate::render::render_board;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use tasklist_core::{
    Task, TaskFilter, TaskId, TaskListController, TaskListError, TaskStatus, TaskStore,
};

pub const VALIDATION_NOTICE: &str = "Please Enter Task!";
pub const REMOVE_PROMPT: &str = "Are you sure you want to delete this task?";

/// One user intent, already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add { text: String },
    List { filter: TaskFilter },
    Edit { id: String, text: String },
    SetStatus { id: String, status: TaskStatus },
    Remove { id: String, assume_yes: bool },
}

impl Intent {
    /// Stable name for logs; never includes task text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Edit { .. } => "edit",
            Self::SetStatus { .. } => "status",
            Self::Remove { .. } => "remove",
        }
    }
}

#[derive(Debug)]
pub enum CommandError {
    Validation(TaskListError),
    AmbiguousId { input: String, matches: usize },
    Io(io::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(_) => write!(f, "{VALIDATION_NOTICE}"),
            Self::AmbiguousId { input, matches } => write!(
                f,
                "id prefix `{input}` matches {matches} tasks; use more characters"
            ),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::AmbiguousId { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<TaskListError> for CommandError {
    fn from(value: TaskListError) -> Self {
        Self::Validation(value)
    }
}

impl From<io::Error> for CommandError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Resolves user input to a task id: exact match first, then unique prefix.
///
/// Unmatched input is passed through verbatim so the controller treats it as
/// a no-op.
pub fn resolve_id(tasks: &[Task], input: &str) -> Result<TaskId, CommandError> {
    let input = input.trim();
    if let Some(task) = tasks.iter().find(|task| task.id.as_str() == input) {
        return Ok(task.id.clone());
    }

    let mut matches = tasks
        .iter()
        .filter(|task| !input.is_empty() && task.id.as_str().starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id.clone()),
        (Some(_), Some(_)) => Err(CommandError::AmbiguousId {
            input: input.to_string(),
            matches: 2 + matches.count(),
        }),
        _ => Ok(TaskId::from(input)),
    }
}

/// Asks a yes/no question; anything but `y`/`yes` declines.
pub fn confirm(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Runs one intent, then prints and flushes the board.
pub fn execute<S: TaskStore>(
    controller: &mut TaskListController<S>,
    intent: Intent,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), CommandError> {
    match intent {
        Intent::Add { text } => {
            let id = controller.add_task(&text)?;
            writeln!(output, "Added {id}")?;
        }
        Intent::List { filter } => controller.set_filter(filter),
        Intent::Edit { id, text } => {
            let id = resolve_id(controller.tasks(), &id)?;
            report(output, controller.update_task_text(&id, text), &id, "Updated")?;
        }
        Intent::SetStatus { id, status } => {
            let id = resolve_id(controller.tasks(), &id)?;
            report(output, controller.set_task_status(&id, status), &id, "Updated")?;
        }
        Intent::Remove { id, assume_yes } => {
            let id = resolve_id(controller.tasks(), &id)?;
            if !assume_yes && !confirm(REMOVE_PROMPT, input, output)? {
                writeln!(output, "Kept {id}")?;
                output.flush()?;
                return Ok(());
            }
            report(output, controller.remove_task(&id), &id, "Removed")?;
        }
    }

    if !controller.is_synced() {
        writeln!(
            output,
            "warning: changes could not be saved and will be lost on exit"
        )?;
    }
    writeln!(output)?;
    write!(
        output,
        "{}",
        render_board(&controller.visible_tasks(), controller.active_filter())
    )?;
    output.flush()?;
    Ok(())
}

fn report(output: &mut impl Write, changed: bool, id: &TaskId, verb: &str) -> io::Result<()> {
    if changed {
        writeln!(output, "{verb} {id}")
    } else {
        writeln!(output, "No task matched `{id}`; nothing changed")
    }
}
