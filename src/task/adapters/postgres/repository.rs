//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::config::DatabaseConfig;
use crate::task::{
    domain::{
        NewTask, PersistedTaskData, Priority, PriorityAssignment, Task, TaskFilter, TaskId,
        TaskOrder, TaskPatch, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Array, SmallInt, Uuid as SqlUuid};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Constraint guarding the lower priority bound.
pub(super) const PRIORITY_MIN_CONSTRAINT: &str = "tasks_priority_min";
/// Constraint guarding the upper priority bound.
pub(super) const PRIORITY_MAX_CONSTRAINT: &str = "tasks_priority_max";
/// Constraint rejecting empty titles.
pub(super) const TITLE_NOT_EMPTY_CONSTRAINT: &str = "tasks_title_not_empty";

/// Repeated ids keep their last entry, matching ordered application.
const ASSIGN_PRIORITIES_SQL: &str = concat!(
    "UPDATE tasks AS t SET priority = batch.priority, updated_at = now() ",
    "FROM (SELECT DISTINCT ON (item.id) item.id, item.priority ",
    "FROM unnest($1::uuid[], $2::smallint[]) WITH ORDINALITY AS item(id, priority, position) ",
    "ORDER BY item.id, item.position DESC) AS batch ",
    "WHERE t.id = batch.id",
);

/// Builds a connection pool for the configured database.
///
/// Connections are opened lazily on first checkout.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool configuration
/// is rejected.
pub fn build_pool(config: &DatabaseConfig) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    Pool::builder()
        .max_size(config.pool_size)
        .min_idle(Some(0))
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result(connection)
                .map_err(map_write_error)?;
            row_to_task(row)
        })
        .await
    }

    async fn find(&self, filter: &TaskFilter, order: TaskOrder) -> TaskRepositoryResult<Vec<Task>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let rows = filtered_query(&filter, order)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let changeset = to_changeset(patch);
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set((&changeset, tasks::updated_at.eq(now)))
                .returning(TaskRow::as_returning())
                .get_result(connection)
                .optional()
                .map_err(map_write_error)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = diesel::delete(tasks::table.find(id.into_inner()))
                .returning(TaskRow::as_returning())
                .get_result(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
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
        let (ids, priorities): (Vec<uuid::Uuid>, Vec<i16>) = assignments
            .iter()
            .map(|assignment| {
                (
                    assignment.id().into_inner(),
                    i16::from(assignment.priority().value()),
                )
            })
            .unzip();

        self.run_blocking(move |connection| {
            diesel::sql_query(ASSIGN_PRIORITIES_SQL)
                .bind::<Array<SqlUuid>, _>(ids)
                .bind::<Array<SmallInt>, _>(priorities)
                .execute(connection)
                .map_err(|err| TaskRepositoryError::BatchRejected(err.to_string()))?;
            Ok(())
        })
        .await
    }
}

/// Builds the boxed select for a filter and ordering.
///
/// Starts from the whole table and adds one `WHERE` clause per present
/// filter field.
pub(super) fn filtered_query(
    filter: &TaskFilter,
    order: TaskOrder,
) -> tasks::BoxedQuery<'static, Pg> {
    let mut query = tasks::table.into_boxed();

    if let Some(priority) = filter.priority() {
        query = query.filter(tasks::priority.eq(i16::from(priority.value())));
    }
    if let Some(start) = filter.due_from() {
        query = query.filter(tasks::due_date.ge(start));
    }
    if let Some(end) = filter.due_until() {
        query = query.filter(tasks::due_date.le(end));
    }
    if let Some(limit) = filter.due_before_bound() {
        query = query.filter(tasks::due_date.lt(limit));
    }
    if let Some(ids) = filter.ids() {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        query = query.filter(tasks::id.eq_any(uuids));
    }

    match order {
        TaskOrder::DueDateThenPriorityDesc => query.order((
            tasks::due_date.asc().nulls_last(),
            tasks::priority.desc(),
            tasks::created_at.asc(),
        )),
        TaskOrder::DueDateAsc => {
            query.order((tasks::due_date.asc().nulls_last(), tasks::created_at.asc()))
        }
        TaskOrder::PriorityAsc => query.order((tasks::priority.asc(), tasks::created_at.asc())),
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: i16::from(task.priority().value()),
        due_date: task.due_date(),
    }
}

fn to_changeset(patch: &TaskPatch) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(|title| title.as_str().to_owned()),
        description: patch.description().map(str::to_owned),
        priority: patch.priority().map(|priority| i16::from(priority.value())),
        due_date: patch.due_date(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority,
        due_date,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?;
    let priority = Priority::new(i64::from(priority)).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        priority,
        due_date,
        created_at,
        updated_at,
    }))
}

fn map_write_error(err: DieselError) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, ref info) => {
            TaskRepositoryError::Validation(vec![check_violation_message(info.as_ref())])
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn check_violation_message(info: &dyn DatabaseErrorInformation) -> String {
    violation_message_for(info.constraint_name()).unwrap_or_else(|| info.message().to_owned())
}

/// Maps a `tasks` table check constraint to its field message.
pub(super) fn violation_message_for(constraint: Option<&str>) -> Option<String> {
    let message = match constraint? {
        PRIORITY_MIN_CONSTRAINT => "Priority must be at least 1",
        PRIORITY_MAX_CONSTRAINT => "Priority cannot be greater than 10",
        TITLE_NOT_EMPTY_CONSTRAINT => "Title is required",
        _ => return None,
    };
    Some(message.to_owned())
}
