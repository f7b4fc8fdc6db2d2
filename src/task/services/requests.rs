//! Request payloads accepted by the task management service.

use crate::task::domain::Priority;
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) due_date: Option<DateTime<Utc>>,
    pub(super) priority: i64,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for a partial task update.
///
/// Only the fields that are set are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) priority: Option<i64>,
    pub(super) due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Optional filters for listing tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListFilters {
    /// Exact priority match.
    pub priority: Option<Priority>,
    /// Inclusive lower due-date bound.
    pub due_start: Option<DateTime<Utc>>,
    /// Inclusive upper due-date bound.
    pub due_end: Option<DateTime<Utc>>,
}

impl TaskListFilters {
    /// Creates filters that match every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to an exact priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the inclusive lower due-date bound.
    #[must_use]
    pub const fn with_due_start(mut self, due_start: DateTime<Utc>) -> Self {
        self.due_start = Some(due_start);
        self
    }

    /// Sets the inclusive upper due-date bound.
    #[must_use]
    pub const fn with_due_end(mut self, due_end: DateTime<Utc>) -> Self {
        self.due_end = Some(due_end);
        self
    }
}

/// One reorder entry: the task reference and its new priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPriorityItem {
    /// Task identifier as supplied by the caller.
    pub id: String,
    /// Priority to assign.
    pub priority: Priority,
}

impl TaskPriorityItem {
    /// Creates a reorder entry.
    #[must_use]
    pub fn new(id: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            priority,
        }
    }
}
