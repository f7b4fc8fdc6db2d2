//! Given steps for task management BDD scenarios.

use super::world::{TaskWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use taskdeck::task::services::CreateTaskRequest;

#[given("an empty task board")]
fn empty_task_board(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    if !world.tasks_by_title.is_empty() {
        return Err(eyre::eyre!("scenario world should start without tasks"));
    }
    Ok(())
}

#[given(r#"a task "{title}" with priority {priority:u8}"#)]
fn task_with_priority(
    world: &mut TaskWorld,
    title: String,
    priority: u8,
) -> Result<(), eyre::Report> {
    store(world, CreateTaskRequest::new(title.clone(), i64::from(priority)), title)
}

#[given(r#"a task "{title}" with priority {priority:u8} due {days:i64} days ago"#)]
fn task_due_in_past(
    world: &mut TaskWorld,
    title: String,
    priority: u8,
    days: i64,
) -> Result<(), eyre::Report> {
    let due = world.clock.utc() - Duration::days(days);
    let request = CreateTaskRequest::new(title.clone(), i64::from(priority)).with_due_date(due);
    store(world, request, title)
}

#[given(r#"a task "{title}" with priority {priority:u8} due in {days:i64} days"#)]
fn task_due_in_future(
    world: &mut TaskWorld,
    title: String,
    priority: u8,
    days: i64,
) -> Result<(), eyre::Report> {
    let due = world.clock.utc() + Duration::days(days);
    let request = CreateTaskRequest::new(title.clone(), i64::from(priority)).with_due_date(due);
    store(world, request, title)
}

fn store(
    world: &mut TaskWorld,
    request: CreateTaskRequest,
    title: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(request))
        .wrap_err_with(|| format!("create scenario task '{title}'"))?;
    world.tasks_by_title.insert(title, created);
    Ok(())
}
