//! Todo entity, status domain, and derived display logic.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Hour appended when a form submits a bare `YYYY-MM-DD` due date.
///
/// Directus stores datetimes; the original data was written with a fixed
/// 10:00 local time, so we keep that convention.
const DUE_DATE_DEFAULT_TIME: &str = "T10:00:00";

/// Task completion status. Exactly two values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl TodoStatus {
    /// Wire representation used in query strings and PATCH bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TodoStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TodoStatus::Pending),
            "completed" => Ok(TodoStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown todo status: {other}"
            ))),
        }
    }
}

/// Status filter selected on the list page (`?filter=` query parameter).
///
/// Unrecognized or absent values fall back to [`StatusFilter::All`] so a
/// hand-edited URL never breaks the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// Parse the raw query parameter value.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("pending") => StatusFilter::Pending,
            Some("completed") => StatusFilter::Completed,
            _ => StatusFilter::All,
        }
    }

    /// The concrete status this filter selects, if it selects one.
    pub fn as_status(self) -> Option<TodoStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(TodoStatus::Pending),
            StatusFilter::Completed => Some(TodoStatus::Completed),
        }
    }

    /// Value used in URLs and form controls.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }
}

/// A task as stored by the backend.
///
/// Field names follow the Directus collection: `date_created` and
/// `user_created` are system fields, `dueDate` is the user-defined column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub user_created: Option<String>,
}

impl Todo {
    /// Whether this task should be flagged overdue.
    ///
    /// A task is overdue when its due date parses to a moment before
    /// `now` and it has not been completed. Completed tasks are never
    /// overdue; tasks without a parseable due date are never overdue.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        if self.status == TodoStatus::Completed {
            return false;
        }
        match self.due_date.as_deref().and_then(parse_due_date) {
            Some(due) => due < now.naive_utc(),
            None => false,
        }
    }
}

/// Parse a stored due date, accepting both `YYYY-MM-DDTHH:MM:SS` and a
/// bare `YYYY-MM-DD` (treated as start of day).
fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Normalize a due date form field for storage.
///
/// Empty input becomes `None`; a bare date gets the fixed default time
/// appended; anything else is passed through unchanged.
pub fn normalize_due_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.contains('T') {
        return Some(format!("{trimmed}{DUE_DATE_DEFAULT_TIME}"));
    }
    Some(trimmed.to_string())
}

/// Sort tasks by due date ascending; tasks without a due date sort last.
pub fn sort_by_due_date(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        let da = a.due_date.as_deref().and_then(parse_due_date);
        let db = b.due_date.as_deref().and_then(parse_due_date);
        match (da, db) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

/// Payload for creating a task. New tasks always start out pending.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: TodoStatus,
}

impl CreateTodo {
    pub fn new(title: String, description: String, due_date: Option<String>) -> Self {
        Self {
            title,
            description,
            due_date,
            status: TodoStatus::Pending,
        }
    }
}

/// Partial update payload. Only populated fields appear in the PATCH body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TodoStatus>,
}

impl UpdateTodo {
    /// An update that only flips the status, leaving all other fields alone.
    pub fn status_only(status: TodoStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
