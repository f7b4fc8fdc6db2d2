//! Service layer for task creation, listing, updates and reordering.

use super::{
    error::{TaskServiceError, TaskServiceResult},
    requests::{CreateTaskRequest, TaskListFilters, TaskPriorityItem, UpdateTaskRequest},
};
use crate::task::{
    domain::{
        NewTask, Priority, PriorityAssignment, Task, TaskDomainError, TaskFilter, TaskId,
        TaskOrder, TaskPatch, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Task management orchestration service.
///
/// Holds no mutable state; every call is a self-contained round trip to the
/// repository.
#[derive(Clone)]
pub struct TaskManagementService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskManagementService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task management service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidInput`] carrying every failing
    /// field message when the request or a store constraint rejects the
    /// task, and [`TaskServiceError::Internal`] for other store failures.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let draft = new_task_from_request(request)?;
        let task = self
            .repository
            .insert(&draft)
            .await
            .map_err(classify_write_error)?;
        info!(task_id = %task.id(), priority = %task.priority(), "task created");
        Ok(task)
    }

    /// Lists tasks matching the optional filters.
    ///
    /// Results are ordered by due date ascending, then priority descending.
    /// Tasks without a due date sort after dated tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Internal`] when the store query fails.
    pub async fn find_all(&self, filters: TaskListFilters) -> TaskServiceResult<Vec<Task>> {
        let filter = build_filter(filters);
        let tasks = self
            .repository
            .find(&filter, TaskOrder::DueDateThenPriorityDesc)
            .await?;
        debug!(count = tasks.len(), ?filters, "listed tasks");
        Ok(tasks)
    }

    /// Returns tasks whose due date is strictly before the current instant.
    ///
    /// The boundary is read from the clock on every call. Results are
    /// ordered most overdue first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Internal`] when the store query fails.
    pub async fn overdue_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        let now = self.clock.utc();
        let tasks = self
            .repository
            .find(&TaskFilter::all().due_before(now), TaskOrder::DueDateAsc)
            .await?;
        debug!(count = tasks.len(), %now, "listed overdue tasks");
        Ok(tasks)
    }

    /// Applies a partial update and returns the post-update task.
    ///
    /// An empty update returns the stored task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when `id` names no task,
    /// [`TaskServiceError::InvalidInput`] when a supplied field is invalid,
    /// and [`TaskServiceError::Internal`] for other store failures.
    pub async fn update(&self, id: &str, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let task_id = parse_task_id(id)?;
        let patch = patch_from_request(request)?;
        let updated = self
            .repository
            .update(task_id, &patch)
            .await
            .map_err(classify_write_error)?
            .ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))?;
        if !patch.is_empty() {
            info!(task_id = %task_id, "task updated");
        }
        Ok(updated)
    }

    /// Deletes a task and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when `id` names no task and
    /// [`TaskServiceError::Internal`] for store failures.
    pub async fn remove(&self, id: &str) -> TaskServiceResult<Task> {
        let task_id = parse_task_id(id)?;
        let removed = self
            .repository
            .delete(task_id)
            .await?
            .ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))?;
        info!(task_id = %task_id, "task removed");
        Ok(removed)
    }

    /// Reassigns priorities for a set of tasks in one batch.
    ///
    /// Returns the referenced tasks that exist, ordered by ascending
    /// priority. Identifiers that match no task are dropped silently;
    /// callers detect partial application by comparing submitted and
    /// returned identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ReorderRejected`] (kind `NotFound`) when
    /// the batch fails as a whole, including malformed identifiers, and
    /// [`TaskServiceError::Internal`] when re-reading the tasks fails.
    pub async fn reorder_tasks(
        &self,
        items: &[TaskPriorityItem],
    ) -> TaskServiceResult<Vec<Task>> {
        let assignments = assignments_from_items(items)?;

        // Any batch-level failure is reported as not-found, including
        // infrastructure faults.
        if let Err(err) = self.repository.assign_priorities(&assignments).await {
            warn!(error = %err, items = items.len(), "reorder batch rejected");
            return Err(TaskServiceError::ReorderRejected(err));
        }

        let filter = TaskFilter::all().with_ids(assignments.iter().map(|item| item.id()));
        let tasks = self
            .repository
            .find(&filter, TaskOrder::PriorityAsc)
            .await?;
        info!(
            submitted = assignments.len(),
            applied = tasks.len(),
            "tasks reordered"
        );
        Ok(tasks)
    }
}

fn new_task_from_request(request: CreateTaskRequest) -> TaskServiceResult<NewTask> {
    let CreateTaskRequest {
        title,
        description,
        due_date,
        priority,
    } = request;

    let mut messages = Vec::new();
    let title = collect(TaskTitle::new(title), &mut messages);
    let priority = collect(Priority::new(priority), &mut messages);
    let (Some(title), Some(priority)) = (title, priority) else {
        return Err(TaskServiceError::InvalidInput(messages));
    };

    let mut draft = NewTask::new(title, priority);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }
    if let Some(due_date) = due_date {
        draft = draft.with_due_date(due_date);
    }
    Ok(draft)
}

fn patch_from_request(request: UpdateTaskRequest) -> TaskServiceResult<TaskPatch> {
    let UpdateTaskRequest {
        title,
        description,
        priority,
        due_date,
    } = request;

    let mut messages = Vec::new();
    let mut patch = TaskPatch::new();
    if let Some(valid) = title.and_then(|raw| collect(TaskTitle::new(raw), &mut messages)) {
        patch = patch.with_title(valid);
    }
    if let Some(valid) = priority.and_then(|raw| collect(Priority::new(raw), &mut messages)) {
        patch = patch.with_priority(valid);
    }
    if !messages.is_empty() {
        return Err(TaskServiceError::InvalidInput(messages));
    }
    if let Some(description) = description {
        patch = patch.with_description(description);
    }
    if let Some(due_date) = due_date {
        patch = patch.with_due_date(due_date);
    }
    Ok(patch)
}

/// Narrows a match-all filter by each supplied list filter.
fn build_filter(filters: TaskListFilters) -> TaskFilter {
    let mut filter = TaskFilter::all();
    if let Some(priority) = filters.priority {
        filter = filter.with_priority(priority);
    }
    if let Some(start) = filters.due_start {
        filter = filter.due_on_or_after(start);
    }
    if let Some(end) = filters.due_end {
        filter = filter.due_on_or_before(end);
    }
    filter
}

/// Converts reorder items into store assignments.
///
/// A malformed identifier makes the whole batch structurally invalid.
/// When an identifier is listed more than once, its last entry wins.
fn assignments_from_items(
    items: &[TaskPriorityItem],
) -> TaskServiceResult<Vec<PriorityAssignment>> {
    let parsed = items
        .iter()
        .map(|item| {
            item.id
                .parse::<TaskId>()
                .map(|id| PriorityAssignment::new(id, item.priority))
                .map_err(|err| {
                    warn!(task_id = %item.id, "reorder batch contains malformed task id");
                    TaskServiceError::ReorderRejected(TaskRepositoryError::BatchRejected(
                        err.to_string(),
                    ))
                })
        })
        .collect::<TaskServiceResult<Vec<_>>>()?;
    Ok(last_assignment_per_task(parsed))
}

/// Keeps the final assignment for each task, in submission order.
fn last_assignment_per_task(assignments: Vec<PriorityAssignment>) -> Vec<PriorityAssignment> {
    let submitted = assignments.len();
    let mut seen = HashSet::with_capacity(submitted);
    let mut kept: Vec<_> = assignments
        .into_iter()
        .rev()
        .filter(|assignment| seen.insert(assignment.id()))
        .collect();
    kept.reverse();
    if kept.len() < submitted {
        debug!(
            submitted,
            kept = kept.len(),
            "collapsed repeated task ids in reorder batch"
        );
    }
    kept
}

/// Maps store write failures; constraint violations become field messages.
fn classify_write_error(err: TaskRepositoryError) -> TaskServiceError {
    match err {
        TaskRepositoryError::Validation(messages) => TaskServiceError::InvalidInput(messages),
        other => TaskServiceError::Internal(other),
    }
}

/// Unparseable identifiers cannot name a stored task.
fn parse_task_id(id: &str) -> TaskServiceResult<TaskId> {
    id.parse::<TaskId>()
        .map_err(|_| TaskServiceError::NotFound(id.to_owned()))
}

fn collect<T>(result: Result<T, TaskDomainError>, messages: &mut Vec<String>) -> Option<T> {
    result.map_err(|err| messages.push(err.to_string())).ok()
}
