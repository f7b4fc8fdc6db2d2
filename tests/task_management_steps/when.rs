//! When steps for task management BDD scenarios.

use super::world::{TaskWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdeck::task::{
    domain::Priority,
    services::{CreateTaskRequest, TaskPriorityItem},
};

#[when(r#"a task "{title}" with priority {priority:u8} is created"#)]
fn create_task(world: &mut TaskWorld, title: String, priority: u8) {
    let result = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title.clone(), i64::from(priority))),
    );
    if let Ok(task) = &result {
        world.tasks_by_title.insert(title, task.clone());
    }
    world.record(result);
}

#[when(
    r#""{first}" is reordered to priority {first_priority:u8} and "{second}" to priority {second_priority:u8}"#
)]
fn reorder_pair(
    world: &mut TaskWorld,
    first: String,
    first_priority: u8,
    second: String,
    second_priority: u8,
) -> Result<(), eyre::Report> {
    let items = [
        TaskPriorityItem::new(
            world.task_titled(&first)?.id().to_string(),
            Priority::new(i64::from(first_priority)).wrap_err("first priority")?,
        ),
        TaskPriorityItem::new(
            world.task_titled(&second)?.id().to_string(),
            Priority::new(i64::from(second_priority)).wrap_err("second priority")?,
        ),
    ];
    world.last_outcome = Some(run_async(world.service.reorder_tasks(&items)));
    Ok(())
}

#[when(r#"a reorder names an unknown identifier "{id}""#)]
fn reorder_with_identifier(world: &mut TaskWorld, id: String) -> Result<(), eyre::Report> {
    let known = world
        .tasks_by_title
        .values()
        .next()
        .ok_or_else(|| eyre::eyre!("scenario needs at least one stored task"))?;
    let items = [
        TaskPriorityItem::new(known.id().to_string(), Priority::new(9).wrap_err("priority")?),
        TaskPriorityItem::new(id, Priority::new(1).wrap_err("priority")?),
    ];
    world.last_outcome = Some(run_async(world.service.reorder_tasks(&items)));
    Ok(())
}

#[when("overdue tasks are requested")]
fn request_overdue(world: &mut TaskWorld) {
    world.last_outcome = Some(run_async(world.service.overdue_tasks()));
}

#[when("the clock moves forward {days:i64} days")]
fn advance_clock(world: &mut TaskWorld, days: i64) {
    world.clock.advance(Duration::days(days));
}

#[when(r#""{title}" is removed"#)]
fn remove_task(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_titled(&title)?.id().to_string();
    let result = run_async(world.service.remove(&id));
    world.record(result);
    Ok(())
}
