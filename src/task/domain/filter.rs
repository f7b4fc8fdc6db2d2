//! Store-agnostic task query filters and orderings.

use super::{Priority, Task, TaskId};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Conjunctive task filter.
///
/// A fresh filter matches every task. Each builder call adds one clause and
/// narrows the match. Any due-date clause excludes tasks without a due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    priority: Option<Priority>,
    due_from: Option<DateTime<Utc>>,
    due_until: Option<DateTime<Utc>>,
    due_before: Option<DateTime<Utc>>,
    ids: Option<Vec<TaskId>>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts matches to an exact priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts matches to due dates at or after `start`.
    #[must_use]
    pub const fn due_on_or_after(mut self, start: DateTime<Utc>) -> Self {
        self.due_from = Some(start);
        self
    }

    /// Restricts matches to due dates at or before `end`.
    #[must_use]
    pub const fn due_on_or_before(mut self, end: DateTime<Utc>) -> Self {
        self.due_until = Some(end);
        self
    }

    /// Restricts matches to due dates strictly before `instant`.
    #[must_use]
    pub const fn due_before(mut self, instant: DateTime<Utc>) -> Self {
        self.due_before = Some(instant);
        self
    }

    /// Restricts matches to the given identifiers.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.ids = Some(ids.into_iter().collect());
        self
    }

    /// Returns the exact-priority clause, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the inclusive lower due-date bound, if any.
    #[must_use]
    pub const fn due_from(&self) -> Option<DateTime<Utc>> {
        self.due_from
    }

    /// Returns the inclusive upper due-date bound, if any.
    #[must_use]
    pub const fn due_until(&self) -> Option<DateTime<Utc>> {
        self.due_until
    }

    /// Returns the exclusive upper due-date bound, if any.
    #[must_use]
    pub const fn due_before_bound(&self) -> Option<DateTime<Utc>> {
        self.due_before
    }

    /// Returns the identifier clause, if any.
    #[must_use]
    pub fn ids(&self) -> Option<&[TaskId]> {
        self.ids.as_deref()
    }

    /// Returns `true` when the filter constrains the due date.
    #[must_use]
    pub const fn has_due_clause(&self) -> bool {
        self.due_from.is_some() || self.due_until.is_some() || self.due_before.is_some()
    }

    /// Evaluates the filter against a task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.priority.is_some_and(|priority| task.priority() != priority) {
            return false;
        }
        if let Some(ids) = &self.ids
            && !ids.contains(&task.id())
        {
            return false;
        }
        if !self.has_due_clause() {
            return true;
        }
        let Some(due) = task.due_date() else {
            return false;
        };
        self.due_from.is_none_or(|start| due >= start)
            && self.due_until.is_none_or(|end| due <= end)
            && self.due_before.is_none_or(|limit| task.is_overdue_at(limit))
    }
}

/// Result ordering requested from the store.
///
/// Every ordering breaks remaining ties by creation time so results are
/// stable across stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOrder {
    /// Due date ascending (missing due dates last), then priority descending.
    DueDateThenPriorityDesc,
    /// Due date ascending (missing due dates last).
    DueDateAsc,
    /// Priority ascending.
    PriorityAsc,
}

impl TaskOrder {
    /// Compares two tasks under this ordering.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let primary = match self {
            Self::DueDateThenPriorityDesc => compare_due_dates(left, right)
                .then_with(|| right.priority().cmp(&left.priority())),
            Self::DueDateAsc => compare_due_dates(left, right),
            Self::PriorityAsc => left.priority().cmp(&right.priority()),
        };
        primary.then_with(|| left.created_at().cmp(&right.created_at()))
    }
}

fn compare_due_dates(left: &Task, right: &Task) -> Ordering {
    match (left.due_date(), right.due_date()) {
        (Some(left_due), Some(right_due)) => left_due.cmp(&right_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
