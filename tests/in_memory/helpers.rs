//! Shared test helpers for in-memory repository integration tests.

use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use std::io;
use taskdeck::task::{
    adapters::memory::{InMemoryTaskRepository, ManualClock},
    domain::{NewTask, Priority, Task, TaskTitle},
    ports::TaskRepository,
};
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// In-memory repository paired with the clock that stamps its records.
pub struct Store {
    pub repo: InMemoryTaskRepository<ManualClock>,
    pub clock: ManualClock,
}

/// Provides a fresh repository whose clock starts at [`start`].
#[fixture]
pub fn store() -> Store {
    let clock = ManualClock::new(start());
    Store {
        repo: InMemoryTaskRepository::with_clock(clock.clone()),
        clock,
    }
}

/// Fixed instant the `store` fixture's clock starts from.
#[must_use]
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds a draft task.
///
/// # Errors
///
/// Returns an error if the title or priority is invalid.
pub fn draft(
    title: &str,
    priority: i64,
    due_date: Option<DateTime<Utc>>,
) -> Result<NewTask, Box<dyn std::error::Error + Send + Sync>> {
    let mut task = NewTask::new(TaskTitle::new(title)?, Priority::new(priority)?);
    if let Some(due) = due_date {
        task = task.with_due_date(due);
    }
    Ok(task)
}

/// Inserts a draft task and returns the stored record.
///
/// # Errors
///
/// Returns an error if the draft is invalid or the insert fails.
pub fn insert(
    rt: &Runtime,
    repo: &InMemoryTaskRepository<ManualClock>,
    title: &str,
    priority: i64,
    due_date: Option<DateTime<Utc>>,
) -> Result<Task, Box<dyn std::error::Error + Send + Sync>> {
    let task = draft(title, priority, due_date)?;
    Ok(rt.block_on(repo.insert(&task))?)
}
