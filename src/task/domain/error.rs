//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// The display form of each variant is the user-facing field message
/// reported back through `InvalidInput` failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is the empty string.
    #[error("Title is required")]
    EmptyTitle,

    /// The title contains characters outside the allowed set.
    #[error("Title can only contain alphanumeric characters, spaces, and basic punctuation")]
    InvalidTitle(String),

    /// The priority is below the lowest rank.
    #[error("Priority must be at least 1")]
    PriorityTooLow(i64),

    /// The priority is above the highest rank.
    #[error("Priority cannot be greater than 10")]
    PriorityTooHigh(i64),

    /// The value is not a well-formed task identifier.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),
}
