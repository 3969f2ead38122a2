//! Raw, unvalidated request payloads.
//!
//! Every field is optional so validation can report all missing or invalid
//! fields together instead of failing at deserialisation. Unknown fields
//! are ignored.

use serde::Deserialize;

/// Raw payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreTaskInput {
    /// Task title; required, at most 100 characters.
    pub title: Option<String>,
    /// Task description; required, at most 500 characters.
    pub description: Option<String>,
    /// Workflow status; defaults to `pending` when absent.
    pub status: Option<String>,
    /// Priority; defaults to `medium` when absent.
    pub priority: Option<String>,
    /// Due date; required, RFC 3339 or `YYYY-MM-DD`.
    pub due_date: Option<String>,
}

/// Raw payload for partially updating a task.
///
/// Absent fields leave the persisted values untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskInput {
    /// Replacement title, if supplied.
    pub title: Option<String>,
    /// Replacement description, if supplied.
    pub description: Option<String>,
    /// Replacement status, if supplied.
    pub status: Option<String>,
    /// Replacement priority, if supplied.
    pub priority: Option<String>,
    /// Replacement due date, if supplied.
    pub due_date: Option<String>,
}

/// Raw query parameters for listing and searching tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchInput {
    /// Page size, 1 to 100; absent returns the full collection.
    pub per_page: Option<u32>,
    /// 1-indexed page number; only honoured together with `per_page`.
    pub page: Option<u32>,
    /// Requested sort field; must be allow-listed when supplied.
    pub sort_by: Option<String>,
    /// Requested sort direction, `asc` or `desc`.
    pub sort_dir: Option<String>,
    /// Exact identifier criterion.
    pub id: Option<i64>,
    /// Title-contains criterion.
    pub title: Option<String>,
    /// Description-contains criterion.
    pub description: Option<String>,
    /// Exact status criterion.
    pub status: Option<String>,
    /// Exact priority criterion.
    pub priority: Option<String>,
    /// Inclusive lower due-date bound.
    pub due_date_from: Option<String>,
    /// Inclusive upper due-date bound.
    pub due_date_to: Option<String>,
    /// Inclusive lower creation bound.
    pub created_from: Option<String>,
    /// Inclusive upper creation bound.
    pub created_to: Option<String>,
    /// Inclusive lower update bound.
    pub updated_from: Option<String>,
    /// Inclusive upper update bound.
    pub updated_to: Option<String>,
}
