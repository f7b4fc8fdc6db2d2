//! Parsing of JSON request bodies into service requests.

use super::{
    TaskValidationError,
    fields::{self, FieldErrors, present},
};
use crate::task::services::{CreateTaskRequest, TaskPriorityItem, UpdateTaskRequest};
use serde_json::{Map, Value};

/// Smallest accepted reorder batch.
pub const MIN_REORDER_ITEMS: usize = 1;
/// Largest accepted reorder batch.
pub const MAX_REORDER_ITEMS: usize = 100;

const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";
const REORDER_EMPTY: &str = "At least one task is required";
const REORDER_TOO_MANY: &str = "Cannot reorder more than 100 tasks at once";
const TASK_ID_REQUIRED: &str = "Task ID is required";
const REORDER_ITEM_NOT_OBJECT: &str = "Each task must be an object with id and priority";

/// Parses a task creation body.
///
/// # Errors
///
/// Returns [`TaskValidationError`] listing every field that failed.
pub fn parse_create_payload(body: &Value) -> Result<CreateTaskRequest, TaskValidationError> {
    let object = as_object(body)?;
    let mut errors = FieldErrors::default();

    let title = fields::title(present(object, "title"), &mut errors);
    let description = fields::description(present(object, "description"), &mut errors);
    let due_date = fields::due_date(present(object, "due_date"), &mut errors);
    let priority = fields::priority(present(object, "priority"), &mut errors);

    let request = match (title, priority) {
        (Some(title), Some(priority)) => {
            let mut request = CreateTaskRequest::new(title, i64::from(priority));
            if let Some(description) = description {
                request = request.with_description(description);
            }
            if let Some(due_date) = due_date {
                request = request.with_due_date(due_date);
            }
            Some(request)
        }
        _ => None,
    };
    finish(errors, request)
}

/// Parses a partial update body; every field is optional.
///
/// Unknown keys are ignored.
///
/// # Errors
///
/// Returns [`TaskValidationError`] listing every supplied field that failed.
pub fn parse_update_payload(body: &Value) -> Result<UpdateTaskRequest, TaskValidationError> {
    let object = as_object(body)?;
    let mut errors = FieldErrors::default();
    let mut request = UpdateTaskRequest::new();

    if let Some(value) = present(object, "title")
        && let Some(title) = fields::title(Some(value), &mut errors)
    {
        request = request.with_title(title);
    }
    if let Some(description) = fields::description(present(object, "description"), &mut errors) {
        request = request.with_description(description);
    }
    if let Some(due_date) = fields::due_date(present(object, "due_date"), &mut errors) {
        request = request.with_due_date(due_date);
    }
    if let Some(value) = present(object, "priority")
        && let Some(priority) = fields::priority(Some(value), &mut errors)
    {
        request = request.with_priority(i64::from(priority));
    }

    finish(errors, Some(request))
}

/// Parses a reorder body of the form `{"tasks": [{"id", "priority"}, ...]}`.
///
/// # Errors
///
/// Returns [`TaskValidationError`] when the list is missing, empty, longer
/// than [`MAX_REORDER_ITEMS`], or any entry is malformed.
pub fn parse_reorder_payload(body: &Value) -> Result<Vec<TaskPriorityItem>, TaskValidationError> {
    let object = as_object(body)?;
    let Some(Value::Array(entries)) = present(object, "tasks") else {
        return Err(TaskValidationError::single(REORDER_EMPTY));
    };
    if entries.len() < MIN_REORDER_ITEMS {
        return Err(TaskValidationError::single(REORDER_EMPTY));
    }
    if entries.len() > MAX_REORDER_ITEMS {
        return Err(TaskValidationError::single(REORDER_TOO_MANY));
    }

    let mut errors = FieldErrors::default();
    let mut items = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let mut entry_errors = FieldErrors::default();
        if let Some(item) = reorder_item(entry, &mut entry_errors) {
            items.push(item);
        }
        if let Err(messages) = entry_errors.into_result(()) {
            for message in messages {
                errors.push(format!("tasks[{index}]: {message}"));
            }
        }
    }
    finish(errors, Some(items))
}

fn reorder_item(entry: &Value, errors: &mut FieldErrors) -> Option<TaskPriorityItem> {
    let Some(object) = entry.as_object() else {
        errors.push(REORDER_ITEM_NOT_OBJECT);
        return None;
    };
    let id = present(object, "id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty());
    if id.is_none() {
        errors.push(TASK_ID_REQUIRED);
    }
    let priority = fields::priority(present(object, "priority"), errors);
    Some(TaskPriorityItem::new(id?, priority?))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, TaskValidationError> {
    body.as_object()
        .ok_or_else(|| TaskValidationError::single(BODY_NOT_OBJECT))
}

fn finish<T>(errors: FieldErrors, value: Option<T>) -> Result<T, TaskValidationError> {
    match (errors.into_result(()), value) {
        (Ok(()), Some(value)) => Ok(value),
        (Err(messages), _) => Err(TaskValidationError::new(messages)),
        (Ok(()), None) => Err(TaskValidationError::single("Request body is incomplete")),
    }
}
