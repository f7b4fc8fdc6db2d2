//! Field-level rules shared by payload and query parsing.
//!
//! Each rule reads one JSON field and pushes its failure messages onto a
//! shared list so that every problem in a payload is reported at once.

use crate::task::domain::{Priority, TaskTitle};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};

pub(super) const TITLE_NOT_STRING: &str = "Title must be a string";
pub(super) const TITLE_REQUIRED: &str = "Title is required";
pub(super) const DESCRIPTION_NOT_STRING: &str = "Description must be a string";
pub(super) const DUE_DATE_INVALID: &str = "Due date must be a valid ISO 8601 timestamp";
pub(super) const PRIORITY_NOT_NUMBER: &str = "Priority must be a number";
pub(super) const PRIORITY_NOT_INTEGER: &str = "Priority must be an integer";

/// Accumulates field failure messages for one payload.
#[derive(Debug, Default)]
pub(super) struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub(super) fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(super) fn into_result<T>(self, value: T) -> Result<T, Vec<String>> {
        if self.messages.is_empty() {
            Ok(value)
        } else {
            Err(self.messages)
        }
    }
}

/// Returns the field when present and not `null`.
pub(super) fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

/// Validates a title value, returning the raw text when it is acceptable.
pub(super) fn title(value: Option<&Value>, errors: &mut FieldErrors) -> Option<String> {
    let Some(value) = value else {
        errors.push(TITLE_REQUIRED);
        return None;
    };
    let Some(raw) = value.as_str() else {
        errors.push(TITLE_NOT_STRING);
        return None;
    };
    match TaskTitle::new(raw) {
        Ok(_) => Some(raw.to_owned()),
        Err(err) => {
            errors.push(err.to_string());
            None
        }
    }
}

/// Validates an optional description value.
pub(super) fn description(value: Option<&Value>, errors: &mut FieldErrors) -> Option<String> {
    let value = value?;
    if let Some(text) = value.as_str() {
        return Some(text.to_owned());
    }
    errors.push(DESCRIPTION_NOT_STRING);
    None
}

/// Validates an optional due date value.
pub(super) fn due_date(value: Option<&Value>, errors: &mut FieldErrors) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = value.as_str().and_then(parse_iso8601);
    if parsed.is_none() {
        errors.push(DUE_DATE_INVALID);
    }
    parsed
}

/// Validates a priority value.
pub(super) fn priority(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Priority> {
    let Some(Value::Number(number)) = value else {
        errors.push(PRIORITY_NOT_NUMBER);
        return None;
    };
    let Some(integer) = integer_value(number) else {
        errors.push(PRIORITY_NOT_INTEGER);
        return None;
    };
    match Priority::new(integer) {
        Ok(priority) => Some(priority),
        Err(err) => {
            errors.push(err.to_string());
            None
        }
    }
}

/// Local date-time layouts, with and without seconds.
const LOCAL_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
/// Offset date-time layouts, with and without seconds.
const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Parses a strict ISO 8601 instant.
///
/// Accepts a bare calendar date (midnight UTC) or a date and time joined by
/// `T`. Seconds and fractional seconds are optional. A missing offset is
/// read as UTC.
pub(super) fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }
    if trimmed.get(10..11) != Some("T") {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Some(local) = trimmed.strip_suffix(['Z', 'z']) {
        return parse_local(local);
    }
    OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(trimmed, layout).ok())
        .map(|instant| instant.with_timezone(&Utc))
        .or_else(|| parse_local(trimmed))
}

fn parse_local(raw: &str) -> Option<DateTime<Utc>> {
    LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|local| local.and_utc())
}

/// Returns the integral value of a JSON number, if it has one.
fn integer_value(number: &Number) -> Option<i64> {
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    if number.is_u64() {
        return Some(i64::MAX);
    }
    let float = number.as_f64()?;
    if float.fract() != 0.0 || !float.is_finite() {
        return None;
    }
    // Out-of-range floats saturate, which still fails the rank check.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is integral and saturates outside the i64 range"
    )]
    let integer = float as i64;
    Some(integer)
}
