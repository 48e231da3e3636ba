//! CLI argument definitions for `task-cli` and `github-activity`.

use crate::models::TaskStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// task-cli - track what you need to do, what you're doing and what's done.
#[derive(Parser, Debug)]
#[command(name = "task-cli")]
#[command(author, version, long_version = crate::LONG_VERSION, about = "Manage a personal task list stored in a JSON file", long_about = None)]
pub struct TaskCli {
    /// Path of the task document [env: TASK_CLI_FILE] [default: todos.json]
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Print command results as JSON [env: TASK_CLI_OUTPUT=json]
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: TaskCommands,
}

/// task-cli subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommands {
    /// List tasks, optionally only those with the given status
    List {
        /// Filter by status
        #[arg(value_parser = parse_status)]
        status: Option<TaskStatus>,
    },

    /// Add a task
    Add {
        /// Description of the task
        description: String,
    },

    /// Change a task's description
    Update {
        /// ID of the task
        id: u64,

        /// New description
        description: String,
    },

    /// Mark a task as in progress
    MarkInProgress {
        /// ID of the task
        id: u64,
    },

    /// Mark a task as done
    MarkDone {
        /// ID of the task
        id: u64,
    },

    /// Mark a task as todo again
    MarkTodo {
        /// ID of the task
        id: u64,
    },

    /// Delete a task
    Delete {
        /// ID of the task
        id: u64,
    },
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    s.parse()
}

/// github-activity - show a GitHub user's recent public activity.
#[derive(Parser, Debug)]
#[command(name = "github-activity")]
#[command(author, version, long_version = crate::LONG_VERSION, about = "Show a GitHub user's recent public activity", long_about = None)]
pub struct ActivityCli {
    /// GitHub username
    pub username: String,

    /// GitHub API base URL [env: GITHUB_API_URL]
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Token for authenticated requests [env: GITHUB_TOKEN]
    #[arg(long = "token")]
    pub token: Option<String>,

    /// Connect/read timeout in seconds [env: GITHUB_ACTIVITY_TIMEOUT]
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,
}
