//! Plain-text board rendering.
//!
//! # Responsibility
//! - Draw the filter bar with the active filter highlighted.
//! - Draw the Undone / In Progress / Done groups with per-group empty states.

use std::fmt::Write;
use tasklist_core::{Task, TaskFilter, TaskStatus, VisibleTasks};

/// Number of id characters shown on the board.
pub const SHORT_ID_LEN: usize = 8;

const TITLE: &str = "TO-DO LIST";

pub fn empty_message(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Undone => "No undone tasks.",
        TaskStatus::InProgress => "No tasks in progress.",
        TaskStatus::Done => "No completed tasks.",
    }
}

pub fn short_id(task: &Task) -> String {
    task.id.as_str().chars().take(SHORT_ID_LEN).collect()
}

/// Renders the filter bar, e.g. `[All]  Completed  Pending  Undone`.
pub fn render_filter_bar(active: TaskFilter) -> String {
    TaskFilter::ALL
        .iter()
        .map(|filter| {
            if *filter == active {
                format!("[{}]", filter.label())
            } else {
                format!(" {} ", filter.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the whole board for the given projection.
pub fn render_board(visible: &VisibleTasks, active: TaskFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", render_filter_bar(active));

    for status in TaskStatus::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", status.label());
        let group = visible.group(status);
        if group.is_empty() {
            let _ = writeln!(out, "  {}", empty_message(status));
            continue;
        }
        for task in group {
            let text = if task.text.is_empty() {
                "<empty>"
            } else {
                task.text.as_str()
            };
            let _ = writeln!(out, "  {:<width$}  {text}", short_id(task), width = SHORT_ID_LEN);
        }
    }
    out
}
