//! Data models for the task list.
//!
//! - `Task` - a single to-do entry
//! - `TaskStatus` - lifecycle state of a task
//! - `TaskDocument` - the whole on-disk document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Task status in the workflow.
///
/// Any state can be reached from any other; there is no enforced order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses, in workflow order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Status glyph used in table output.
    pub fn glyph(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "🔴",
            TaskStatus::InProgress => "🟠",
            TaskStatus::Done => "🟢",
        }
    }

    /// Phrase used in "Marked task N as ..." messages.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(format!(
                "Unknown status: {} (expected todo, in-progress or done)",
                s
            )),
        }
    }
}

/// A single entry in the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Positive identifier, assigned once at creation
    pub id: u64,

    /// Free-form description
    pub description: String,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, never earlier than `created_at`
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new `todo` task stamped with the current time.
    pub fn new(id: u64, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            description,
            status: TaskStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` without letting it move backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

/// RFC 3339 timestamps on write; on read, also accepts naive ISO-8601
/// (`2024-05-01T10:00:00.123456`) interpreted as local time.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// The persisted document: `{"todos": {"<id>": Task, ...}, "last_id": N}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    /// Tasks keyed by id. Keys serialize as JSON strings.
    #[serde(default)]
    pub todos: BTreeMap<u64, Task>,

    /// Highest id ever handed out, so deleted ids are not reissued.
    #[serde(default)]
    pub last_id: u64,
}

impl TaskDocument {
    /// Next id to assign: one past the highest id ever seen.
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn next_id(&self) -> Option<u64> {
        let max_existing = self.todos.keys().next_back().copied().unwrap_or(0);
        max_existing.max(self.last_id).checked_add(1)
    }
}
