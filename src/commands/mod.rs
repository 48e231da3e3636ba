//! Command implementations for `task-cli`.
//!
//! Each command runs against an open [`JsonStore`] and returns a result value
//! that can be printed either for humans or as JSON. Commands that target an
//! id wrap their result in [`Lookup`] so a missing task is reported softly
//! instead of failing the process.

use crate::models::{Task, TaskStatus};
use crate::storage::JsonStore;
use crate::{Result, table};
use chrono::Local;
use serde::Serialize;

/// Message printed when an id-based command targets a missing task.
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Message printed by `list` when there is nothing to show.
pub const NO_TASKS: &str = "No tasks found";

/// Column headers of the `list` table.
pub const LIST_HEADERS: [&str; 4] = ["Status", "ID", "Description", "Created At"];

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json_of<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

/// Result of an id-based command: either the command's own result or a
/// soft "not found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound(u64),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl<T: Output> Output for Lookup<T> {
    fn to_json(&self) -> String {
        match self {
            Lookup::Found(inner) => inner.to_json(),
            Lookup::NotFound(id) => {
                serde_json::json!({ "found": false, "id": id, "message": TASK_NOT_FOUND })
                    .to_string()
            }
        }
    }

    fn to_human(&self) -> String {
        match self {
            Lookup::Found(inner) => inner.to_human(),
            Lookup::NotFound(_) => TASK_NOT_FOUND.to_string(),
        }
    }
}

// === list ===

/// Result of `task-cli list`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskList {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    pub tasks: Vec<Task>,
}

impl Output for TaskList {
    fn to_json(&self) -> String {
        json_of(self)
    }

    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return NO_TASKS.to_string();
        }

        let rows: Vec<[String; 4]> = self.tasks.iter().map(list_row).collect();
        table::render(&LIST_HEADERS, &rows)
    }
}

fn list_row(task: &Task) -> [String; 4] {
    [
        task.status.glyph().to_string(),
        task.id.to_string(),
        task.description.clone(),
        task.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    ]
}

/// List all tasks, or only those with `status`.
pub fn task_list(store: &JsonStore, status: Option<TaskStatus>) -> TaskList {
    let tasks = match status {
        Some(status) => store.get_all_by_status(status),
        None => store.get_all(),
    };
    TaskList {
        count: tasks.len(),
        status,
        tasks,
    }
}

// === add ===

/// Result of `task-cli add`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskAdded {
    pub task: Task,
}

impl Output for TaskAdded {
    fn to_json(&self) -> String {
        json_of(&self.task)
    }

    fn to_human(&self) -> String {
        format!("Added task {}: {}", self.task.id, self.task.description)
    }
}

/// Add a new `todo` task.
pub fn task_add(store: &mut JsonStore, description: String) -> Result<TaskAdded> {
    let task = store.create(description)?;
    Ok(TaskAdded { task })
}

// === update ===

/// Result of `task-cli update`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskUpdated {
    pub task: Task,
}

impl Output for TaskUpdated {
    fn to_json(&self) -> String {
        json_of(&self.task)
    }

    fn to_human(&self) -> String {
        format!("Updated task {}", self.task.id)
    }
}

/// Replace the description of task `id`.
pub fn task_update(
    store: &mut JsonStore,
    id: u64,
    description: String,
) -> Result<Lookup<TaskUpdated>> {
    Ok(match store.update(id, Some(description), None)? {
        Some(task) => Lookup::Found(TaskUpdated { task }),
        None => Lookup::NotFound(id),
    })
}

// === mark-* ===

/// Result of `task-cli mark-todo|mark-in-progress|mark-done`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskMarked {
    pub task: Task,
}

impl Output for TaskMarked {
    fn to_json(&self) -> String {
        json_of(&self.task)
    }

    fn to_human(&self) -> String {
        format!("Marked task {} as {}", self.task.id, self.task.status.label())
    }
}

/// Set the status of task `id`.
pub fn task_mark(
    store: &mut JsonStore,
    id: u64,
    status: TaskStatus,
) -> Result<Lookup<TaskMarked>> {
    Ok(match store.update(id, None, Some(status))? {
        Some(task) => Lookup::Found(TaskMarked { task }),
        None => Lookup::NotFound(id),
    })
}

// === delete ===

/// Result of `task-cli delete`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDeleted {
    pub id: u64,
    pub deleted: bool,
}

impl Output for TaskDeleted {
    fn to_json(&self) -> String {
        json_of(self)
    }

    fn to_human(&self) -> String {
        format!("Deleted task {}", self.id)
    }
}

/// Delete task `id`.
pub fn task_delete(store: &mut JsonStore, id: u64) -> Result<Lookup<TaskDeleted>> {
    Ok(match store.delete(id)? {
        Some(_) => Lookup::Found(TaskDeleted { id, deleted: true }),
        None => Lookup::NotFound(id),
    })
}
