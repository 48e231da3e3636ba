//! Common test utilities for devtrack integration tests.
//!
//! Provides `TestEnv` for isolated test environments so no test touches a
//! `todos.json` in the real working directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with an isolated working directory.
///
/// The `task_cli()` method returns a `Command` that runs inside the temp
/// directory and clears the environment variables the binary reads, making
/// tests parallel-safe and independent of the developer's shell.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the task-cli binary in this environment.
    pub fn task_cli(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_task-cli"));
        cmd.current_dir(self.dir.path());
        cmd.env_remove("TASK_CLI_FILE");
        cmd.env_remove("TASK_CLI_OUTPUT");
        cmd.env_remove("DEVTRACK_LOG");
        cmd
    }

    /// Path of the default task document.
    pub fn store_path(&self) -> std::path::PathBuf {
        self.dir.path().join("todos.json")
    }

    /// Contents of the default task document.
    pub fn read_store(&self) -> String {
        std::fs::read_to_string(self.store_path()).unwrap()
    }

    /// Parsed contents of the default task document.
    pub fn store_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_store()).unwrap()
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Get a Command for the github-activity binary with a clean environment.
pub fn github_activity() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_github-activity"));
    cmd.env_remove("GITHUB_API_URL");
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env_remove("GITHUB_ACTIVITY_TIMEOUT");
    cmd.env_remove("DEVTRACK_LOG");
    cmd
}
