//! Partial update and reorder assignment types.

use super::{Priority, TaskId, TaskTitle};
use chrono::{DateTime, Utc};

/// Validated partial field replacement for a task.
///
/// Absent fields are left unchanged by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    priority: Option<Priority>,
    due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
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
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the replacement due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// One entry of a reorder batch: set the priority of `id` to `priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriorityAssignment {
    id: TaskId,
    priority: Priority,
}

impl PriorityAssignment {
    /// Creates an assignment.
    #[must_use]
    pub const fn new(id: TaskId, priority: Priority) -> Self {
        Self { id, priority }
    }

    /// Returns the target task identifier.
    #[must_use]
    pub const fn id(self) -> TaskId {
        self.id
    }

    /// Returns the priority to assign.
    #[must_use]
    pub const fn priority(self) -> Priority {
        self.priority
    }
}
