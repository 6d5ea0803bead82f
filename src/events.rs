//! Generation event log.
//!
//! Every `generate` run appends events to an NDJSON file (one JSON object per
//! line), by default `.textforge/events.ndjson`.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: `generate_start`, `generate_complete` or `generate_failed`
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `task`: Task slug (e.g., `social_media_post`)
//! - `details`: Freeform object with action-specific details
//!
//! ```no_run
//! use textforge::events::{Event, EventAction, append_event};
//! use serde_json::json;
//! use std::path::Path;
//!
//! let event = Event::new(EventAction::GenerateStart)
//!     .with_task("poem")
//!     .with_details(json!({"model_size": "small"}));
//! append_event(Path::new(".textforge/events.ndjson"), &event)?;
//! # Ok::<(), textforge::error::TextforgeError>(())
//! ```

use crate::error::{Result, TextforgeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Parameters validated, prompt built, backend about to be called
    GenerateStart,
    /// Backend returned text
    GenerateComplete,
    /// Request ended with an error
    GenerateFailed,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::GenerateStart => write!(f, "generate_start"),
            EventAction::GenerateComplete => write!(f, "generate_complete"),
            EventAction::GenerateFailed => write!(f, "generate_failed"),
        }
    }
}

/// An event record for the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// Who ran the command (e.g., `user@HOST`).
    pub actor: String,

    /// Task slug for the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action, stamped now.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            task: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            TextforgeError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the log at `path`.
///
/// Creates the file and its parent directory if needed. Each call appends
/// exactly one line.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            TextforgeError::UserError(format!(
                "failed to create event log directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            TextforgeError::UserError(format!(
                "failed to open event log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        TextforgeError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Append an event, printing a warning instead of failing.
///
/// Logging never changes the outcome of a request.
pub fn log_event(path: Option<&Path>, event: &Event) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = append_event(path, event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}

/// Read all events from the log at `path`.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path).map_err(|e| {
        TextforgeError::UserError(format!(
            "failed to read event log '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                TextforgeError::UserError(format!(
                    "invalid event on line {} of '{}': {}",
                    i + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
