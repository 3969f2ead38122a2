//! Validation rules turning raw inputs into typed domain and query values.
//!
//! Rules are pure functions. Field checks push violations into a shared
//! collector so a single pass reports every problem.

use super::error::{ValidationErrors, ViolationCollector};
use super::input::{SearchInput, StoreTaskInput, UpdateTaskInput};
use crate::task::domain::{
    NewTaskData, TaskDescription, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle,
};
use crate::task::query::{PageRequest, PerPage, TaskFilter};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Validated search parameters ready for the query service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Typed filter criteria.
    pub filter: TaskFilter,
    /// Allow-list-checked sort key, if requested.
    pub sort_by: Option<String>,
    /// Checked sort direction, if requested.
    pub sort_dir: Option<String>,
    /// Pagination request; `None` returns the full collection.
    pub page: Option<PageRequest>,
}

/// Validates a task-creation payload.
///
/// Applies the `pending`/`medium` defaults when status or priority are
/// absent.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every field violation.
pub fn validate_store(input: &StoreTaskInput) -> Result<NewTaskData, ValidationErrors> {
    let mut collector = ViolationCollector::default();
    let title = checked_required(&mut collector, "title", input.title.as_deref(), parse_title);
    let description = checked_required(
        &mut collector,
        "description",
        input.description.as_deref(),
        parse_description,
    );
    let due_date = checked_required(
        &mut collector,
        "due_date",
        input.due_date.as_deref(),
        parse_datetime,
    );
    let status = checked(&mut collector, "status", input.status.as_deref(), parse_status);
    let priority = checked(
        &mut collector,
        "priority",
        input.priority.as_deref(),
        parse_priority,
    );

    if let (true, Some(new_title), Some(new_description), Some(new_due_date)) =
        (collector.is_empty(), title, description, due_date)
    {
        let mut data = NewTaskData::new(new_title, new_description, new_due_date);
        if let Some(value) = status {
            data = data.with_status(value);
        }
        if let Some(value) = priority {
            data = data.with_priority(value);
        }
        Ok(data)
    } else {
        Err(collector.into_errors())
    }
}

/// Validates a partial-update payload into a patch.
///
/// Absent (or blank) fields are left out of the patch; supplied fields must
/// be valid.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every field violation.
pub fn validate_update(input: &UpdateTaskInput) -> Result<TaskPatch, ValidationErrors> {
    let mut collector = ViolationCollector::default();
    let mut patch = TaskPatch::new();
    if let Some(value) = checked(&mut collector, "title", input.title.as_deref(), parse_title) {
        patch = patch.with_title(value);
    }
    if let Some(value) = checked(
        &mut collector,
        "description",
        input.description.as_deref(),
        parse_description,
    ) {
        patch = patch.with_description(value);
    }
    if let Some(value) = checked(&mut collector, "status", input.status.as_deref(), parse_status) {
        patch = patch.with_status(value);
    }
    if let Some(value) = checked(
        &mut collector,
        "priority",
        input.priority.as_deref(),
        parse_priority,
    ) {
        patch = patch.with_priority(value);
    }
    if let Some(value) = checked(
        &mut collector,
        "due_date",
        input.due_date.as_deref(),
        parse_datetime,
    ) {
        patch = patch.with_due_date(value);
    }

    if collector.is_empty() {
        Ok(patch)
    } else {
        Err(collector.into_errors())
    }
}

/// Validates search query parameters.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every field violation.
pub fn validate_search(input: &SearchInput) -> Result<SearchRequest, ValidationErrors> {
    let mut collector = ViolationCollector::default();
    let page = validate_page(&mut collector, input.per_page, input.page);
    let sort_by = checked(&mut collector, "sort_by", input.sort_by.as_deref(), parse_sort_by);
    let sort_dir = checked(
        &mut collector,
        "sort_dir",
        input.sort_dir.as_deref(),
        parse_sort_dir,
    );
    let filter = validate_filter(&mut collector, input);

    if collector.is_empty() {
        Ok(SearchRequest {
            filter,
            sort_by,
            sort_dir,
            page,
        })
    } else {
        Err(collector.into_errors())
    }
}

fn validate_filter(collector: &mut ViolationCollector, input: &SearchInput) -> TaskFilter {
    let mut filter = TaskFilter::new();
    if let Some(id) = input.id {
        if id >= 1 {
            filter = filter.with_id(TaskId::new(id));
        } else {
            collector.push("id", format!("id must be a positive integer, got {id}"));
        }
    }
    if let Some(text) = checked(collector, "title", input.title.as_deref(), |raw| {
        parse_filter_text(raw, TaskTitle::MAX_CHARS)
    }) {
        filter = filter.with_title_contains(text);
    }
    if let Some(text) = checked(collector, "description", input.description.as_deref(), |raw| {
        parse_filter_text(raw, TaskDescription::MAX_CHARS)
    }) {
        filter = filter.with_description_contains(text);
    }
    if let Some(status) = checked(collector, "status", input.status.as_deref(), parse_status) {
        filter = filter.with_status(status);
    }
    if let Some(priority) = checked(collector, "priority", input.priority.as_deref(), parse_priority)
    {
        filter = filter.with_priority(priority);
    }
    if let Some(bound) = checked(
        collector,
        "due_date_from",
        input.due_date_from.as_deref(),
        parse_datetime,
    ) {
        filter = filter.with_due_date_from(bound);
    }
    if let Some(bound) = checked(
        collector,
        "due_date_to",
        input.due_date_to.as_deref(),
        parse_datetime,
    ) {
        filter = filter.with_due_date_to(bound);
    }
    if let Some(bound) = checked(
        collector,
        "created_from",
        input.created_from.as_deref(),
        parse_datetime,
    ) {
        filter = filter.with_created_from(bound);
    }
    if let Some(bound) = checked(
        collector,
        "created_to",
        input.created_to.as_deref(),
        parse_datetime,
    ) {
        filter = filter.with_created_to(bound);
    }
    if let Some(bound) = checked(
        collector,
        "updated_from",
        input.updated_from.as_deref(),
        parse_datetime,
    ) {
        filter = filter.with_updated_from(bound);
    }
    if let Some(bound) = checked(
        collector,
        "updated_to",
        input.updated_to.as_deref(),
        parse_datetime,
    ) {
        filter = filter.with_updated_to(bound);
    }
    filter
}

/// Validates the pagination pair.
///
/// `page` is only honoured together with `per_page`; without a page size
/// the operation returns the full collection.
fn validate_page(
    collector: &mut ViolationCollector,
    per_page: Option<u32>,
    page: Option<u32>,
) -> Option<PageRequest> {
    let size = match per_page {
        None => {
            if page == Some(0) {
                collector.push("page", "page must be at least 1, got 0");
            }
            return None;
        }
        Some(value) => match PerPage::new(value) {
            Ok(valid) => Some(valid),
            Err(err) => {
                collector.push("per_page", err.to_string());
                None
            }
        },
    };
    let number = page.unwrap_or(1);
    match PageRequest::new(size?, number) {
        Ok(request) => Some(request),
        Err(err) => {
            collector.push("page", err.to_string());
            None
        }
    }
}

/// Treats blank values as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Runs a parser against an optional field, recording any violation.
fn checked<T>(
    collector: &mut ViolationCollector,
    field: &'static str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    let value = present(raw)?;
    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(message) => {
            collector.push(field, message);
            None
        }
    }
}

/// Runs a parser against a required field, recording absence as a violation.
fn checked_required<T>(
    collector: &mut ViolationCollector,
    field: &'static str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    match present(raw) {
        None => {
            collector.push(field, format!("{field} is required"));
            None
        }
        Some(value) => match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                collector.push(field, message);
                None
            }
        },
    }
}

fn parse_title(raw: &str) -> Result<TaskTitle, String> {
    TaskTitle::new(raw).map_err(|err| err.to_string())
}

fn parse_description(raw: &str) -> Result<TaskDescription, String> {
    TaskDescription::new(raw).map_err(|err| err.to_string())
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::try_from(raw)
        .map_err(|_| "status must be one of pending, in_progress, completed".to_owned())
}

fn parse_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::try_from(raw).map_err(|_| "priority must be one of low, medium, high".to_owned())
}

fn parse_sort_by(raw: &str) -> Result<String, String> {
    match raw {
        "id" | "title" | "created_at" | "updated_at" | "due_date" => Ok(raw.to_owned()),
        _ => Err("sort_by must be one of id, title, created_at, updated_at, due_date".to_owned()),
    }
}

fn parse_sort_dir(raw: &str) -> Result<String, String> {
    if raw.eq_ignore_ascii_case("asc") || raw.eq_ignore_ascii_case("desc") {
        Ok(raw.to_owned())
    } else {
        Err("sort_dir must be asc or desc".to_owned())
    }
}

fn parse_filter_text(raw: &str, max: usize) -> Result<String, String> {
    let actual = raw.chars().count();
    if actual > max {
        return Err(format!("must not exceed {max} characters, got {actual}"));
    }
    Ok(raw.to_owned())
}

fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| "must be an RFC 3339 datetime or a YYYY-MM-DD date".to_owned())
}
