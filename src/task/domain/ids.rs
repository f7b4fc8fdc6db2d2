//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a stored task record.
///
/// Identifiers are assigned by the task store when a task is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = TaskDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidTaskId(value.to_owned()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority rank in the inclusive range `1..=10`.
///
/// The rank carries no fixed urgency meaning; it is a sortable position
/// used to order tasks relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Priority(u8);

impl Priority {
    /// Lowest accepted rank.
    pub const MIN: u8 = 1;
    /// Highest accepted rank.
    pub const MAX: u8 = 10;

    /// Creates a validated priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PriorityTooLow`] or
    /// [`TaskDomainError::PriorityTooHigh`] when the value falls outside
    /// `1..=10`.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value < i64::from(Self::MIN) {
            return Err(TaskDomainError::PriorityTooLow(value));
        }
        if value > i64::from(Self::MAX) {
            return Err(TaskDomainError::PriorityTooHigh(value));
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| TaskDomainError::PriorityTooHigh(value))
    }

    /// Returns the numeric rank.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        Self::from(priority.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task title.
///
/// Titles must contain at least one non-whitespace character and only
/// ASCII letters, digits, whitespace and the punctuation `-_.,!?()`. The
/// submitted text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    const PUNCTUATION: &'static [char] = &['-', '_', '.', ',', '!', '?', '(', ')'];

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for empty input and
    /// [`TaskDomainError::InvalidTitle`] when a disallowed character is
    /// present.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if !raw.chars().all(Self::is_allowed) {
            return Err(TaskDomainError::InvalidTitle(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_allowed(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch.is_whitespace() || Self::PUNCTUATION.contains(&ch)
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
