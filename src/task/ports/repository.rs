//! Repository port for task persistence and lookup.

use crate::task::domain::{
    NewTask, PriorityAssignment, Task, TaskFilter, TaskId, TaskOrder, TaskPatch,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations own identifier and timestamp assignment. Each
/// single-task write is atomic; batches carry no cross-item isolation.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Validation`] when a store-level
    /// constraint rejects the record.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Returns every task matching `filter`, sorted by `order`.
    async fn find(&self, filter: &TaskFilter, order: TaskOrder) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Applies a partial update and returns the post-update record.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Validation`] when a store-level
    /// constraint rejects the new values.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task and returns the removed record.
    ///
    /// Returns `None` when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Submits a batch of priority assignments as one request.
    ///
    /// Assignments whose identifier matches no record are silent no-ops;
    /// no per-item outcome is reported.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::BatchRejected`] when the batch as a
    /// whole is refused, including an empty batch.
    async fn assign_priorities(
        &self,
        assignments: &[PriorityAssignment],
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A store-level constraint rejected the record.
    #[error("task failed store validation: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A batch request was refused as a whole.
    #[error("batch rejected: {0}")]
    BatchRejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
