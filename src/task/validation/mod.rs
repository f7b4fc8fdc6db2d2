//! Request validation ahead of the task management service.
//!
//! Raw JSON bodies and query strings are checked and converted into typed
//! service requests here, so the service only ever receives well-shaped
//! input. All failures for one request are collected into a single
//! [`TaskValidationError`].

mod fields;
mod payload;
mod query;

pub use payload::{
    MAX_REORDER_ITEMS, MIN_REORDER_ITEMS, parse_create_payload, parse_reorder_payload,
    parse_update_payload,
};
pub use query::parse_list_query;

use crate::task::services::{TaskErrorKind, TaskServiceError};
use thiserror::Error;

/// Request validation failure carrying one message per failed field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("request validation failed: {}", .messages.join("; "))]
pub struct TaskValidationError {
    messages: Vec<String>,
}

impl TaskValidationError {
    /// Creates an error from collected field messages.
    #[must_use]
    pub const fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    fn single(message: &str) -> Self {
        Self::new(vec![message.to_owned()])
    }

    /// Returns the field messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns the transport classification, always `InvalidInput`.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        TaskErrorKind::InvalidInput
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(err: TaskValidationError) -> Self {
        Self::InvalidInput(err.messages)
    }
}
