//! Batch priority assignment tests for [`InMemoryTaskRepository`].

use crate::in_memory::helpers::{Store, insert, runtime, start, store};
use chrono::Duration;
use rstest::rstest;
use std::io;
use taskdeck::task::{
    domain::{Priority, PriorityAssignment, TaskFilter, TaskId, TaskOrder},
    ports::{TaskRepository, TaskRepositoryError},
};
use tokio::runtime::Runtime;

fn assignment(id: TaskId, priority: i64) -> PriorityAssignment {
    PriorityAssignment::new(id, Priority::new(priority).expect("valid priority"))
}

/// Tests that every listed task receives its new priority.
#[rstest]
fn batch_updates_every_listed_task(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let first = insert(&rt, &store.repo, "First", 1, None).expect("insert");
    let second = insert(&rt, &store.repo, "Second", 2, None).expect("insert");
    store.clock.advance(Duration::minutes(1));

    rt.block_on(store.repo.assign_priorities(&[
        assignment(first.id(), 2),
        assignment(second.id(), 1),
    ]))
    .expect("batch");

    let reordered = rt
        .block_on(store.repo.find(
            &TaskFilter::all().with_ids([first.id(), second.id()]),
            TaskOrder::PriorityAsc,
        ))
        .expect("find");
    let ids: Vec<TaskId> = reordered.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
    assert!(
        reordered
            .iter()
            .all(|task| task.updated_at() == start() + Duration::minutes(1))
    );
}

/// Tests that unknown identifiers are skipped without failing the batch.
#[rstest]
fn unknown_identifiers_are_skipped(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let known = insert(&rt, &store.repo, "Known", 5, None).expect("insert");

    rt.block_on(store.repo.assign_priorities(&[
        assignment(TaskId::new(), 1),
        assignment(known.id(), 7),
    ]))
    .expect("batch");

    let found = rt
        .block_on(store.repo.find_by_id(known.id()))
        .expect("lookup")
        .expect("task exists");
    assert_eq!(found.priority().value(), 7);
    assert_eq!(store.repo.len(), 1);
}

/// Tests that a task listed twice ends with its last assigned priority.
#[rstest]
fn repeated_identifier_keeps_last_priority(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let task = insert(&rt, &store.repo, "Repeated", 5, None).expect("insert");

    rt.block_on(store.repo.assign_priorities(&[
        assignment(task.id(), 2),
        assignment(task.id(), 9),
    ]))
    .expect("batch");

    let found = rt
        .block_on(store.repo.find_by_id(task.id()))
        .expect("lookup")
        .expect("task exists");
    assert_eq!(found.priority().value(), 9);
}

/// Tests that an empty batch is refused.
#[rstest]
fn empty_batch_is_rejected(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");

    let result = rt.block_on(store.repo.assign_priorities(&[]));

    assert!(matches!(result, Err(TaskRepositoryError::BatchRejected(_))));
}
