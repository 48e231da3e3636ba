//! GitHub API interactions for the activity viewer.
//!
//! This module provides:
//! - `ActivityClient`: a blocking client for `GET /users/<username>/events`
//! - `Event` / `EventKind`: the decoded event records
//! - `render_activity`: the one-line-per-event summary printed by `github-activity`

use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// GitHub API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User-Agent header required by GitHub API
const USER_AGENT: &str = concat!("devtrack/", env!("CARGO_PKG_VERSION"));

/// REST API version pinned in every request
const API_VERSION: &str = "2022-11-28";

/// Printed instead of an empty list.
pub const NO_ACTIVITY_MESSAGE: &str = "No recent activity found.";

/// Errors that can occur while fetching a user's activity.
///
/// The `Display` text of each variant is the line shown to the user.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// GitHub refused the request (403 Forbidden), almost always rate limiting
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// No such user (404 Not Found)
    #[error("User '{0}' not found.")]
    UserNotFound(String),

    /// Any other non-success status
    #[error("HTTP error {code}: {reason}")]
    Http { code: u16, reason: String },

    /// Connection, DNS, TLS or timeout failure
    #[error("Network error: could not reach GitHub ({0})")]
    Network(String),

    /// Response body was not the expected JSON
    #[error("Failed to parse GitHub response: {0}")]
    Parse(String),

    /// Anything else
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// Repository reference attached to every event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repo {
    /// `owner/name`
    pub name: String,
}

/// Event as it arrives on the wire, before the payload is interpreted.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    repo: Repo,
    #[serde(default = "empty_payload")]
    payload: serde_json::Value,
}

fn empty_payload() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(default)]
    commits: Option<Vec<serde_json::Value>>,
    /// Newer API responses drop `commits` and keep only the count.
    #[serde(default)]
    size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    action: String,
}

#[derive(Debug, Deserialize)]
struct CreatePayload {
    ref_type: String,
}

/// What happened, decoded from the event's type tag and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push { commits: usize },
    Issues { action: String },
    Watch,
    Fork,
    Create { ref_type: String },
    /// Any tag without a dedicated variant, e.g. `PullRequestEvent`
    Other { tag: String },
}

/// A single activity item for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    pub kind: EventKind,
    pub repo: String,
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "PushEvent" => {
                let payload: PushPayload = decode_payload(&raw.kind, raw.payload)?;
                let commits = match payload.commits {
                    Some(commits) => commits.len(),
                    None => payload.size.unwrap_or(0),
                };
                EventKind::Push { commits }
            }
            "IssuesEvent" => {
                let payload: IssuesPayload = decode_payload(&raw.kind, raw.payload)?;
                EventKind::Issues {
                    action: payload.action,
                }
            }
            "WatchEvent" => EventKind::Watch,
            "ForkEvent" => EventKind::Fork,
            "CreateEvent" => {
                let payload: CreatePayload = decode_payload(&raw.kind, raw.payload)?;
                EventKind::Create {
                    ref_type: payload.ref_type,
                }
            }
            _ => EventKind::Other { tag: raw.kind },
        };

        Ok(Event {
            kind,
            repo: raw.repo.name,
        })
    }
}

fn decode_payload<T>(tag: &str, payload: serde_json::Value) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(payload).map_err(|e| format!("{} payload: {}", tag, e))
}

impl Event {
    /// One-line human description, without the leading bullet.
    pub fn describe(&self) -> String {
        let repo = &self.repo;
        match &self.kind {
            EventKind::Push { commits } => format!("Pushed {} commit(s) to {}", commits, repo),
            EventKind::Issues { action } => {
                format!("{} an issue in {}", capitalize(action), repo)
            }
            EventKind::Watch => format!("Starred {}", repo),
            EventKind::Fork => format!("Forked {}", repo),
            EventKind::Create { ref_type } => format!("Created {} in {}", ref_type, repo),
            EventKind::Other { tag } => format!("{} in {}", tag.replace("Event", ""), repo),
        }
    }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Render the summary printed by `github-activity`.
pub fn render_activity(events: &[Event]) -> String {
    if events.is_empty() {
        return NO_ACTIVITY_MESSAGE.to_string();
    }

    events
        .iter()
        .map(|event| format!("- {}", event.describe()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a `/users/<username>/events` response body.
///
/// Failures while reading the body are network errors; anything the reader
/// delivers that is not the expected JSON (including invalid UTF-8) is a
/// parse error.
pub fn parse_events<R: Read>(body: R) -> Result<Vec<Event>, ActivityError> {
    serde_json::from_reader(body).map_err(|e| {
        if e.is_io() {
            ActivityError::Network(e.to_string())
        } else {
            ActivityError::Parse(e.to_string())
        }
    })
}

/// Blocking client for the GitHub events endpoint.
#[derive(Debug, Clone)]
pub struct ActivityClient {
    agent: ureq::Agent,
    api_base: String,
    token: Option<String>,
}

impl ActivityClient {
    /// Build a client against `api_base` (no trailing slash required).
    pub fn new(api_base: &str, token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .user_agent(USER_AGENT)
            .build();

        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// URL of the public events feed for `username`.
    pub fn events_url(&self, username: &str) -> String {
        format!("{}/users/{}/events", self.api_base, username)
    }

    /// Fetch and decode the recent public events of `username`.
    ///
    /// # Example
    /// ```ignore
    /// use devtrack::github::{ActivityClient, GITHUB_API_BASE, render_activity};
    ///
    /// let client = ActivityClient::new(GITHUB_API_BASE, None, Duration::from_secs(10));
    /// match client.fetch_events("octocat") {
    ///     Ok(events) => println!("{}", render_activity(&events)),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn fetch_events(&self, username: &str) -> Result<Vec<Event>, ActivityError> {
        let url = self.events_url(username);
        tracing::debug!(%url, "requesting events");

        let mut request = self
            .agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        match request.call() {
            Ok(resp) => {
                let events = parse_events(resp.into_reader())?;
                tracing::info!(username, count = events.len(), "fetched events");
                Ok(events)
            }
            Err(ureq::Error::Status(403, _)) => Err(ActivityError::RateLimited),
            Err(ureq::Error::Status(404, _)) => {
                Err(ActivityError::UserNotFound(username.to_string()))
            }
            Err(ureq::Error::Status(code, resp)) => Err(ActivityError::Http {
                code,
                reason: resp.status_text().to_string(),
            }),
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(error = %transport, "transport failure");
                match transport.kind() {
                    ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
                        Err(ActivityError::Unexpected(transport.to_string()))
                    }
                    _ => Err(ActivityError::Network(transport.to_string())),
                }
            }
        }
    }
}
