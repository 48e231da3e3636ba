//! Precedence resolution for both binaries' settings.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed in as overrides)
//! 2. Environment variables
//! 3. Built-in defaults
//!
//! Every resolved value remembers where it came from, which is logged at
//! debug level when a binary starts.

use crate::config::OutputFormat;
use crate::github::GITHUB_API_BASE;
use crate::storage::DEFAULT_STORE_FILE;
use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the task document.
pub const TASK_FILE_ENV: &str = "TASK_CLI_FILE";

/// Environment variable selecting `human` or `json` output.
pub const TASK_OUTPUT_ENV: &str = "TASK_CLI_OUTPUT";

/// Environment variable overriding the GitHub API base URL.
pub const GITHUB_API_URL_ENV: &str = "GITHUB_API_URL";

/// Environment variable holding an optional GitHub token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable for the HTTP timeout, in seconds.
pub const TIMEOUT_ENV: &str = "GITHUB_ACTIVITY_TIMEOUT";

/// Default HTTP connect/read timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from environment variable
    EnvVar(String),
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// CLI overrides for `task-cli`.
#[derive(Debug, Clone, Default)]
pub struct TaskOverrides {
    /// `--file`
    pub file: Option<PathBuf>,
    /// `--json`
    pub output_format: Option<OutputFormat>,
}

/// Resolved `task-cli` settings.
#[derive(Debug, Clone)]
pub struct TaskSettings {
    pub store_path: Resolved<PathBuf>,
    pub output_format: Resolved<OutputFormat>,
}

/// CLI overrides for `github-activity`.
#[derive(Debug, Clone, Default)]
pub struct ActivityOverrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--token`
    pub token: Option<String>,
    /// `--timeout`
    pub timeout_secs: Option<u64>,
}

/// Resolved `github-activity` settings.
#[derive(Debug, Clone)]
pub struct ActivitySettings {
    pub api_base: Resolved<String>,
    pub token: Option<Resolved<String>>,
    pub timeout: Resolved<Duration>,
}

impl ActivitySettings {
    /// Get the token value, if set.
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|r| r.value.as_str())
    }

    /// Get the masked token for display purposes.
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|r| {
            let chars: Vec<char> = r.value.chars().collect();
            let head: String = chars.iter().take(4).collect();
            if chars.len() <= 12 {
                format!("{}...", head)
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{}...{}", head, tail)
            }
        })
    }
}

/// Resolve `task-cli` settings from overrides and the process environment.
pub fn resolve_task_settings(overrides: &TaskOverrides) -> Result<TaskSettings> {
    resolve_task_settings_with_env(overrides, |key| std::env::var(key).ok())
}

/// Resolve `github-activity` settings from overrides and the process environment.
pub fn resolve_activity_settings(overrides: &ActivityOverrides) -> Result<ActivitySettings> {
    resolve_activity_settings_with_env(overrides, |key| std::env::var(key).ok())
}

/// Like [`resolve_task_settings`], with an injectable environment lookup.
pub fn resolve_task_settings_with_env<F>(overrides: &TaskOverrides, env: F) -> Result<TaskSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let store_path = match (&overrides.file, non_empty(&env, TASK_FILE_ENV)) {
        (Some(path), _) => Resolved::new(path.clone(), ValueSource::CliFlag),
        (None, Some(path)) => Resolved::new(PathBuf::from(path), env_source(TASK_FILE_ENV)),
        (None, None) => Resolved::new(PathBuf::from(DEFAULT_STORE_FILE), ValueSource::Default),
    };

    let output_format = match (overrides.output_format, non_empty(&env, TASK_OUTPUT_ENV)) {
        (Some(format), _) => Resolved::new(format, ValueSource::CliFlag),
        (None, Some(raw)) => {
            let format = OutputFormat::parse(&raw).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "{} must be 'human' or 'json', got: {}",
                    TASK_OUTPUT_ENV, raw
                ))
            })?;
            Resolved::new(format, env_source(TASK_OUTPUT_ENV))
        }
        (None, None) => Resolved::new(OutputFormat::default(), ValueSource::Default),
    };

    Ok(TaskSettings {
        store_path,
        output_format,
    })
}

/// Like [`resolve_activity_settings`], with an injectable environment lookup.
pub fn resolve_activity_settings_with_env<F>(
    overrides: &ActivityOverrides,
    env: F,
) -> Result<ActivitySettings>
where
    F: Fn(&str) -> Option<String>,
{
    let api_base = match (&overrides.api_url, non_empty(&env, GITHUB_API_URL_ENV)) {
        (Some(url), _) => Resolved::new(url.clone(), ValueSource::CliFlag),
        (None, Some(url)) => Resolved::new(url, env_source(GITHUB_API_URL_ENV)),
        (None, None) => Resolved::new(GITHUB_API_BASE.to_string(), ValueSource::Default),
    };

    let token = match (&overrides.token, non_empty(&env, GITHUB_TOKEN_ENV)) {
        (Some(token), _) => Some(Resolved::new(token.clone(), ValueSource::CliFlag)),
        (None, Some(token)) => Some(Resolved::new(token, env_source(GITHUB_TOKEN_ENV))),
        (None, None) => None,
    };

    let timeout = match (overrides.timeout_secs, non_empty(&env, TIMEOUT_ENV)) {
        (Some(secs), _) => Resolved::new(Duration::from_secs(secs), ValueSource::CliFlag),
        (None, Some(raw)) => {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::InvalidInput(format!(
                    "{} must be a whole number of seconds, got: {}",
                    TIMEOUT_ENV, raw
                ))
            })?;
            Resolved::new(Duration::from_secs(secs), env_source(TIMEOUT_ENV))
        }
        (None, None) => Resolved::new(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ValueSource::Default,
        ),
    };

    Ok(ActivitySettings {
        api_base,
        token,
        timeout,
    })
}

fn non_empty<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).filter(|value| !value.trim().is_empty())
}

fn env_source(key: &str) -> ValueSource {
    ValueSource::EnvVar(key.to_string())
}
