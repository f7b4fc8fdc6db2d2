//! Repository contract tests for [`InMemoryTaskRepository`].
//!
//! Covers identifier and timestamp assignment, filtered lookups, partial
//! updates and deletes.

use crate::in_memory::helpers::{Store, draft, insert, runtime, start, store};
use chrono::{Duration, TimeZone, Utc};
use rstest::rstest;
use std::io;
use taskdeck::task::{
    domain::{Priority, TaskFilter, TaskId, TaskOrder, TaskPatch, TaskTitle},
    ports::TaskRepository,
};
use tokio::runtime::Runtime;

/// Tests that inserts assign distinct identifiers and clock timestamps.
#[rstest]
fn insert_assigns_identifier_and_timestamps(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let task = draft("Write changelog", 3, None).expect("draft");

    let first = rt.block_on(store.repo.insert(&task)).expect("first insert");
    store.clock.advance(Duration::seconds(5));
    let second = rt.block_on(store.repo.insert(&task)).expect("second insert");

    assert_ne!(first.id(), second.id());
    assert_eq!(first.created_at(), start());
    assert_eq!(second.created_at(), start() + Duration::seconds(5));
    assert_eq!(store.repo.len(), 2);
}

/// Tests that a stored task is returned by identifier.
#[rstest]
fn find_by_id_returns_stored_task(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let stored = insert(&rt, &store.repo, "Lookup target", 2, None).expect("insert");

    let found = rt
        .block_on(store.repo.find_by_id(stored.id()))
        .expect("lookup");
    let missing = rt
        .block_on(store.repo.find_by_id(TaskId::new()))
        .expect("lookup");

    assert_eq!(found, Some(stored));
    assert_eq!(missing, None);
}

/// Tests that range filters are inclusive and skip undated tasks.
#[rstest]
fn find_applies_inclusive_due_range(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let day = |d: u32| {
        Utc.with_ymd_and_hms(2024, 12, d, 0, 0, 0)
            .single()
            .expect("valid date")
    };
    let on_start = insert(&rt, &store.repo, "On start", 1, Some(day(1))).expect("insert");
    let on_end = insert(&rt, &store.repo, "On end", 1, Some(day(5))).expect("insert");
    insert(&rt, &store.repo, "After", 1, Some(day(6))).expect("insert");
    insert(&rt, &store.repo, "Undated", 1, None).expect("insert");

    let filter = TaskFilter::all()
        .due_on_or_after(day(1))
        .due_on_or_before(day(5));
    let found = rt
        .block_on(store.repo.find(&filter, TaskOrder::DueDateAsc))
        .expect("find");

    assert_eq!(found, vec![on_start, on_end]);
}

/// Tests that undated tasks sort after dated ones.
#[rstest]
fn undated_tasks_sort_last(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let undated = insert(&rt, &store.repo, "Undated", 9, None).expect("insert");
    let dated = insert(&rt, &store.repo, "Dated", 1, Some(start())).expect("insert");

    let found = rt
        .block_on(
            store
                .repo
                .find(&TaskFilter::all(), TaskOrder::DueDateThenPriorityDesc),
        )
        .expect("find");

    assert_eq!(found, vec![dated, undated]);
}

/// Tests that updates replace supplied fields and refresh `updated_at`.
#[rstest]
fn update_applies_patch(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let stored = insert(&rt, &store.repo, "Draft", 4, None).expect("insert");
    store.clock.advance(Duration::minutes(10));

    let patch = TaskPatch::new()
        .with_title(TaskTitle::new("Final").expect("title"))
        .with_priority(Priority::new(8).expect("priority"))
        .with_description("Now with detail");
    let updated = rt
        .block_on(store.repo.update(stored.id(), &patch))
        .expect("update")
        .expect("task exists");

    assert_eq!(updated.title().as_str(), "Final");
    assert_eq!(updated.priority().value(), 8);
    assert_eq!(updated.description(), Some("Now with detail"));
    assert_eq!(updated.created_at(), stored.created_at());
    assert_eq!(updated.updated_at(), start() + Duration::minutes(10));
}

/// Tests that an empty patch leaves the stored record untouched.
#[rstest]
fn empty_patch_keeps_timestamp(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let stored = insert(&rt, &store.repo, "Stable", 4, None).expect("insert");
    store.clock.advance(Duration::hours(1));

    let updated = rt
        .block_on(store.repo.update(stored.id(), &TaskPatch::new()))
        .expect("update");

    assert_eq!(updated, Some(stored));
}

/// Tests that updating an unknown task reports absence.
#[rstest]
fn update_unknown_task_returns_none(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let patch = TaskPatch::new().with_priority(Priority::new(2).expect("priority"));

    let result = rt
        .block_on(store.repo.update(TaskId::new(), &patch))
        .expect("update");

    assert!(result.is_none());
}

/// Tests that deletes return the removed record exactly once.
#[rstest]
fn delete_returns_removed_task_once(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let stored = insert(&rt, &store.repo, "Disposable", 5, None).expect("insert");

    let first = rt.block_on(store.repo.delete(stored.id())).expect("delete");
    let second = rt.block_on(store.repo.delete(stored.id())).expect("delete");

    assert_eq!(first, Some(stored));
    assert_eq!(second, None);
    assert!(store.repo.is_empty());
}
