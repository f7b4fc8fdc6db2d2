//! Task record and creation draft types.

use super::{Priority, PriorityAssignment, TaskId, TaskPatch, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated task fields awaiting insertion.
///
/// The store assigns the identifier and timestamps when it persists the
/// draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates a draft with the required fields.
    #[must_use]
    pub const fn new(title: TaskTitle, priority: Priority) -> Self {
        Self {
            title,
            description: None,
            priority,
            due_date: None,
        }
    }

    /// Sets the task description.
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

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }
}

/// Stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materialises a draft as a stored record.
    ///
    /// Used by stores that assign identifiers and timestamps in-process.
    #[must_use]
    pub fn from_new(id: TaskId, draft: NewTask, timestamp: DateTime<Utc>) -> Self {
        let NewTask {
            title,
            description,
            priority,
            due_date,
        } = draft;
        Self {
            id,
            title,
            description,
            priority,
            due_date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the due date lies strictly before `now`.
    ///
    /// Tasks without a due date are never overdue.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    /// Replaces the fields present in `patch`.
    ///
    /// An empty patch leaves the task, including `updated_at`, untouched.
    pub fn apply_patch(&mut self, patch: &TaskPatch, timestamp: DateTime<Utc>) {
        if patch.is_empty() {
            return;
        }
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(description) = patch.description() {
            self.description = Some(description.to_owned());
        }
        if let Some(priority) = patch.priority() {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date() {
            self.due_date = Some(due_date);
        }
        self.updated_at = timestamp;
    }

    /// Applies a reorder assignment to this task.
    pub fn assign_priority(&mut self, assignment: PriorityAssignment, timestamp: DateTime<Utc>) {
        self.priority = assignment.priority();
        self.updated_at = timestamp;
    }
}
