//! Storage layer for the task list.
//!
//! The whole document lives in memory and is mirrored to a single JSON file.
//! Every mutation rewrites the file in full: the new contents go to a
//! temporary file next to the target, which is then renamed over it.
//!
//! Loading is forgiving. A missing file, a file that is not JSON, or JSON of
//! the wrong shape all yield an empty document. Only genuine I/O failures
//! (permissions, unreadable directories) are reported as errors.

use crate::models::{Task, TaskDocument, TaskStatus};
use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default document location, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "todos.json";

/// Task store backed by a single JSON document.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    doc: TaskDocument,
}

impl JsonStore {
    /// Open the store at `path`, loading whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = load_document(&path)?;
        tracing::debug!(path = %path.display(), tasks = doc.todos.len(), "opened task store");
        Ok(Self { path, doc })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.doc.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.todos.is_empty()
    }

    /// Create a new `todo` task and persist it.
    pub fn create(&mut self, description: impl Into<String>) -> Result<Task> {
        let id = self.doc.next_id().ok_or_else(|| {
            Error::InvalidInput(format!("no task ids left after {}", u64::MAX))
        })?;
        let task = Task::new(id, description.into());

        self.doc.todos.insert(id, task.clone());
        self.doc.last_id = id;
        self.save()?;

        tracing::info!(id, "created task");
        Ok(task)
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.doc.todos.get(&id)
    }

    /// All tasks in insertion (ascending id) order.
    pub fn get_all(&self) -> Vec<Task> {
        self.doc.todos.values().cloned().collect()
    }

    /// Tasks whose status equals `status`, in insertion order.
    pub fn get_all_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.doc
            .todos
            .values()
            .filter(|task| task.status == status)
            .cloned()
            .collect()
    }

    /// Apply the provided fields to task `id` and persist.
    ///
    /// Returns `Ok(None)` without touching the file when `id` is unknown.
    pub fn update(
        &mut self,
        id: u64,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<Option<Task>> {
        let Some(task) = self.doc.todos.get_mut(&id) else {
            tracing::debug!(id, "update skipped: no such task");
            return Ok(None);
        };

        if let Some(description) = description {
            task.description = description;
        }
        if let Some(status) = status {
            task.status = status;
        }
        task.touch();

        let updated = task.clone();
        self.save()?;

        tracing::info!(id, status = %updated.status, "updated task");
        Ok(Some(updated))
    }

    /// Remove task `id` and persist. Unknown ids are a no-op.
    pub fn delete(&mut self, id: u64) -> Result<Option<Task>> {
        let Some(removed) = self.doc.todos.remove(&id) else {
            tracing::debug!(id, "delete skipped: no such task");
            return Ok(None);
        };

        self.save()?;

        tracing::info!(id, "deleted task");
        Ok(Some(removed))
    }

    /// Rewrite the whole document to disk.
    fn save(&self) -> Result<()> {
        write_document(&self.path, &self.doc)
    }
}

/// Read the document at `path`, recovering to an empty one when the file is
/// missing or unparseable.
fn load_document(path: &Path) -> Result<TaskDocument> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TaskDocument::default()),
        Err(e) => return Err(Error::Io(e)),
    };

    let mut doc: TaskDocument = match serde_json::from_slice(&contents) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "task file is not a valid task document; starting with an empty list"
            );
            return Ok(TaskDocument::default());
        }
    };

    // The map key is authoritative for the id.
    for (key, task) in doc.todos.iter_mut() {
        task.id = *key;
    }

    Ok(doc)
}

/// Serialize `doc` with 4-space indentation and atomically replace `path`.
fn write_document(path: &Path, doc: &TaskDocument) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    buf.push(b'\n');

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&buf)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!(path = %path.display(), bytes = buf.len(), "wrote task document");
    Ok(())
}
