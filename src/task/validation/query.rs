//! Parsing of list query-string parameters.

use super::{
    TaskValidationError,
    fields::{self, FieldErrors, PRIORITY_NOT_INTEGER},
};
use crate::task::{domain::Priority, services::TaskListFilters};
use chrono::{DateTime, Utc};

/// Parses the optional `priority`, `due_start` and `due_end` parameters.
///
/// Blank parameters count as absent. Due bounds accept `YYYY-MM-DD`
/// (midnight UTC) or an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`TaskValidationError`] when a supplied parameter does not parse.
pub fn parse_list_query(
    priority: Option<&str>,
    due_start: Option<&str>,
    due_end: Option<&str>,
) -> Result<TaskListFilters, TaskValidationError> {
    let mut errors = FieldErrors::default();
    let mut filters = TaskListFilters::new();

    if let Some(raw) = non_blank(priority)
        && let Some(priority) = parse_priority(raw, &mut errors)
    {
        filters = filters.with_priority(priority);
    }
    if let Some(start) = parse_bound("due_start", non_blank(due_start), &mut errors) {
        filters = filters.with_due_start(start);
    }
    if let Some(end) = parse_bound("due_end", non_blank(due_end), &mut errors) {
        filters = filters.with_due_end(end);
    }

    errors.into_result(filters).map_err(TaskValidationError::new)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}

fn parse_priority(raw: &str, errors: &mut FieldErrors) -> Option<Priority> {
    let Ok(value) = raw.parse::<i64>() else {
        errors.push(PRIORITY_NOT_INTEGER);
        return None;
    };
    match Priority::new(value) {
        Ok(priority) => Some(priority),
        Err(err) => {
            errors.push(err.to_string());
            None
        }
    }
}

fn parse_bound(name: &str, raw: Option<&str>, errors: &mut FieldErrors) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = fields::parse_iso8601(raw);
    if parsed.is_none() {
        errors.push(format!(
            "{name} must be a date (YYYY-MM-DD) or an ISO 8601 timestamp"
        ));
    }
    parsed
}
