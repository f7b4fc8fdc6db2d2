//! Service-level error types and their transport classification.

use crate::task::ports::TaskRepositoryError;
use thiserror::Error;

/// Coarse failure class reported to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// Field-level validation failed.
    InvalidInput,
    /// A referenced task does not exist.
    NotFound,
    /// Unanticipated persistence failure.
    Internal,
}

impl TaskErrorKind {
    /// Returns the HTTP status code for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

/// Errors returned by [`super::TaskManagementService`].
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// One or more fields failed validation; one message per failure.
    #[error("invalid task input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    NotFound(String),

    /// The reorder batch was refused as a whole.
    ///
    /// Reported as [`TaskErrorKind::NotFound`]: a rejected batch is treated
    /// as a stale or unknown task reference, even when the underlying cause
    /// is an infrastructure fault.
    #[error("some tasks were not found")]
    ReorderRejected(#[source] TaskRepositoryError),

    /// Any other persistence failure, propagated unchanged.
    #[error(transparent)]
    Internal(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns the transport classification of this error.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::InvalidInput(_) => TaskErrorKind::InvalidInput,
            Self::NotFound(_) | Self::ReorderRejected(_) => TaskErrorKind::NotFound,
            Self::Internal(_) => TaskErrorKind::Internal,
        }
    }

    /// Returns the field messages carried by an `InvalidInput` error.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self {
            Self::InvalidInput(messages) => messages,
            _ => &[],
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
