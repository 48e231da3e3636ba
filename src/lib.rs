//! devtrack - a personal task list and a GitHub activity viewer.
//!
//! This library provides the core functionality for the `task-cli` and
//! `github-activity` binaries: the JSON-backed task store, the table
//! renderer, and the GitHub events client.

pub mod cli;
pub mod commands;
pub mod config;
pub mod github;
pub mod logging;
pub mod models;
pub mod storage;
pub mod table;


/// Library-level error type for devtrack operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for devtrack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Version string shown by `--version`, including the build commit.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DEVTRACK_GIT_COMMIT"),
    ", built ",
    env!("DEVTRACK_BUILD_TIMESTAMP"),
    ")"
);
