//! In-memory repository for task management tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, PriorityAssignment, Task, TaskFilter, TaskId, TaskOrder, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Assigns random identifiers and clock-based timestamps on insert. Sorting
/// places tasks without a due date after those with one.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository<C: Clock + Send + Sync> {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    clock: C,
}

impl<C: Clock + Send + Sync> InMemoryTaskRepository<C> {
    /// Creates an empty repository stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Returns the number of stored tasks.
    ///
    /// Counts through a poisoned lock rather than reporting an empty store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> TaskRepository for InMemoryTaskRepository<C> {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut tasks = self.write()?;
        let mut id = TaskId::new();
        while tasks.contains_key(&id) {
            id = TaskId::new();
        }
        let stored = Task::from_new(id, task.clone(), self.clock.utc());
        tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find(&self, filter: &TaskFilter, order: TaskOrder) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.read()?;
        let mut matched: Vec<Task> = tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        matched.sort_by(|left, right| order.compare(left, right));
        Ok(matched)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.read()?;
        Ok(tasks.get(&id).cloned())
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>> {
        let mut tasks = self.write()?;
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply_patch(patch, self.clock.utc());
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut tasks = self.write()?;
        Ok(tasks.remove(&id))
    }

    async fn assign_priorities(
        &self,
        assignments: &[PriorityAssignment],
    ) -> TaskRepositoryResult<()> {
        if assignments.is_empty() {
            return Err(TaskRepositoryError::BatchRejected(
                "batch must contain at least one assignment".to_owned(),
            ));
        }
        let mut tasks = self.write()?;
        let timestamp = self.clock.utc();
        for assignment in assignments {
            if let Some(task) = tasks.get_mut(&assignment.id()) {
                task.assign_priority(*assignment, timestamp);
            }
        }
        Ok(())
    }
}
