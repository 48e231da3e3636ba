//! Configuration for the devtrack binaries.
//!
//! Nothing is read from config files. Each setting comes from a CLI flag, an
//! environment variable, or a built-in default.
//!
//! ## task-cli
//!
//! - `TASK_CLI_FILE` - path of the task document (default `todos.json`)
//! - `TASK_CLI_OUTPUT` - `human` or `json` (default `human`)
//!
//! ## github-activity
//!
//! - `GITHUB_API_URL` - API base URL (default `https://api.github.com`)
//! - `GITHUB_TOKEN` - optional bearer token, raises the rate limit
//! - `GITHUB_ACTIVITY_TIMEOUT` - connect/read timeout in seconds (default 10)
//!
//! ## Precedence
//!
//! CLI flag > environment variable > built-in default
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ActivityOverrides, ActivitySettings, GITHUB_API_URL_ENV, GITHUB_TOKEN_ENV, Resolved,
    TIMEOUT_ENV, TASK_FILE_ENV, TASK_OUTPUT_ENV, TaskOverrides, TaskSettings, ValueSource,
    resolve_activity_settings, resolve_task_settings,
};
pub use schema::OutputFormat;
