//! Filter criteria and the conjunction predicate they build.

use crate::task::domain::{Task, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// Optional search criteria combined as a conjunction.
///
/// Absent criteria impose no constraint; blank text criteria are normalised
/// to absent rather than rejected. The filter assumes pre-validated, typed
/// input and never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    id: Option<TaskId>,
    title_contains: Option<String>,
    description_contains: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date_from: Option<DateTime<Utc>>,
    due_date_to: Option<DateTime<Utc>>,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
    updated_from: Option<DateTime<Utc>>,
    updated_to: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Creates a filter with no criteria; it matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires an exact identifier match.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Requires the title to contain the given text, case-insensitively.
    ///
    /// A blank value is ignored.
    #[must_use]
    pub fn with_title_contains(mut self, text: impl Into<String>) -> Self {
        self.title_contains = normalise_text(text.into());
        self
    }

    /// Requires the description to contain the given text,
    /// case-insensitively.
    ///
    /// A blank value is ignored.
    #[must_use]
    pub fn with_description_contains(mut self, text: impl Into<String>) -> Self {
        self.description_contains = normalise_text(text.into());
        self
    }

    /// Requires an exact status match.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requires an exact priority match.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Requires the due date to be at or after the given instant.
    #[must_use]
    pub const fn with_due_date_from(mut self, bound: DateTime<Utc>) -> Self {
        self.due_date_from = Some(bound);
        self
    }

    /// Requires the due date to be at or before the given instant.
    #[must_use]
    pub const fn with_due_date_to(mut self, bound: DateTime<Utc>) -> Self {
        self.due_date_to = Some(bound);
        self
    }

    /// Requires the creation timestamp to be at or after the given instant.
    #[must_use]
    pub const fn with_created_from(mut self, bound: DateTime<Utc>) -> Self {
        self.created_from = Some(bound);
        self
    }

    /// Requires the creation timestamp to be at or before the given instant.
    #[must_use]
    pub const fn with_created_to(mut self, bound: DateTime<Utc>) -> Self {
        self.created_to = Some(bound);
        self
    }

    /// Requires the update timestamp to be at or after the given instant.
    #[must_use]
    pub const fn with_updated_from(mut self, bound: DateTime<Utc>) -> Self {
        self.updated_from = Some(bound);
        self
    }

    /// Requires the update timestamp to be at or before the given instant.
    #[must_use]
    pub const fn with_updated_to(mut self, bound: DateTime<Utc>) -> Self {
        self.updated_to = Some(bound);
        self
    }

    /// Returns the identifier criterion, if set.
    #[must_use]
    pub const fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns the title-contains criterion, if set.
    #[must_use]
    pub fn title_contains(&self) -> Option<&str> {
        self.title_contains.as_deref()
    }

    /// Returns the description-contains criterion, if set.
    #[must_use]
    pub fn description_contains(&self) -> Option<&str> {
        self.description_contains.as_deref()
    }

    /// Returns the status criterion, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority criterion, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the inclusive lower due-date bound, if set.
    #[must_use]
    pub const fn due_date_from(&self) -> Option<DateTime<Utc>> {
        self.due_date_from
    }

    /// Returns the inclusive upper due-date bound, if set.
    #[must_use]
    pub const fn due_date_to(&self) -> Option<DateTime<Utc>> {
        self.due_date_to
    }

    /// Returns the inclusive lower creation bound, if set.
    #[must_use]
    pub const fn created_from(&self) -> Option<DateTime<Utc>> {
        self.created_from
    }

    /// Returns the inclusive upper creation bound, if set.
    #[must_use]
    pub const fn created_to(&self) -> Option<DateTime<Utc>> {
        self.created_to
    }

    /// Returns the inclusive lower update bound, if set.
    #[must_use]
    pub const fn updated_from(&self) -> Option<DateTime<Utc>> {
        self.updated_from
    }

    /// Returns the inclusive upper update bound, if set.
    #[must_use]
    pub const fn updated_to(&self) -> Option<DateTime<Utc>> {
        self.updated_to
    }

    /// Returns `true` when no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title_contains.is_none()
            && self.description_contains.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date_from.is_none()
            && self.due_date_to.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
            && self.updated_from.is_none()
            && self.updated_to.is_none()
    }

    /// Returns `true` iff the task satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.id.is_none_or(|id| task.id() == id)
            && self
                .title_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(task.title().as_str(), needle))
            && self
                .description_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(task.description().as_str(), needle))
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .priority
                .is_none_or(|priority| task.priority() == priority)
            && self.due_date_from.is_none_or(|bound| task.due_date() >= bound)
            && self.due_date_to.is_none_or(|bound| task.due_date() <= bound)
            && self
                .created_from
                .is_none_or(|bound| task.created_at() >= bound)
            && self.created_to.is_none_or(|bound| task.created_at() <= bound)
            && self
                .updated_from
                .is_none_or(|bound| task.updated_at() >= bound)
            && self.updated_to.is_none_or(|bound| task.updated_at() <= bound)
    }
}

/// Treats blank criteria values as absent.
fn normalise_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Case-insensitive substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
