//! Then steps for task management BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskdeck::task::{
    domain::{Priority, Task},
    services::{TaskErrorKind, TaskListFilters},
};

#[then(r#"listing tasks with priority {priority:u8} returns "{title}""#)]
fn listing_by_priority_returns(
    world: &TaskWorld,
    priority: u8,
    title: String,
) -> Result<(), eyre::Report> {
    let filters = TaskListFilters::new()
        .with_priority(Priority::new(i64::from(priority)).wrap_err("listing priority")?);
    let found = run_async(world.service.find_all(filters))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;

    let titles = titles_of(&found);
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected only '{title}', found {titles:?}"));
    }
    Ok(())
}

#[then(r#"the returned tasks are "{titles}""#)]
fn returned_tasks_are(world: &TaskWorld, titles: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing outcome in scenario world"))?;
    let tasks = outcome
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected failure: {err}"))?;

    let expected: Vec<&str> = titles.split(", ").collect();
    let actual = titles_of(tasks);
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the request fails as invalid input with "{message}""#)]
fn fails_as_invalid_input(world: &TaskWorld, message: String) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if err.kind() != TaskErrorKind::InvalidInput {
        return Err(eyre::eyre!("expected invalid input, got {err:?}"));
    }
    if err.messages() != [message.clone()] {
        return Err(eyre::eyre!(
            "expected message '{message}', found {:?}",
            err.messages()
        ));
    }
    Ok(())
}

#[then("the request fails as not found")]
fn fails_as_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if err.kind().status_code() != 404 {
        return Err(eyre::eyre!("expected not found, got {err:?}"));
    }
    Ok(())
}

fn last_error(
    world: &TaskWorld,
) -> Result<&taskdeck::task::services::TaskServiceError, eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(tasks)) => Err(eyre::eyre!(
            "expected failure, got tasks {:?}",
            titles_of(tasks)
        )),
        None => Err(eyre::eyre!("missing outcome in scenario world")),
    }
}

fn titles_of(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}
