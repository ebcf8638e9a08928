//! Given steps for overdue scanning BDD scenarios.

use super::world::{TaskOverdueWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use fayol::task::{
    domain::UserId,
    services::{CreateTaskRequest, ReportStatusRequest},
};
use rstest_bdd_macros::given;

fn create_task(
    world: &mut TaskOverdueWorld,
    title: String,
    assignees: Vec<String>,
) -> Result<(), eyre::Report> {
    let mut assignee_ids = Vec::new();
    for name in assignees {
        assignee_ids.push(
            UserId::new(name).map_err(|err| eyre::eyre!("invalid assignee in scenario: {err}"))?,
        );
    }
    let created_by = UserId::new("people-ops")
        .map_err(|err| eyre::eyre!("invalid creator in scenario: {err}"))?;

    let request = CreateTaskRequest::new(title, created_by)
        .with_assignees(assignee_ids)
        .with_due_at(world.base + Duration::hours(1));
    let created =
        run_async(world.service.create_task(request)).wrap_err("create task for scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" assigned to {user:string} due in one hour"#)]
fn single_assignee_task(
    world: &mut TaskOverdueWorld,
    title: String,
    user: String,
) -> Result<(), eyre::Report> {
    create_task(world, title, vec![user])
}

#[given(r#"a task titled "{title}" assigned to "{first}" and "{second}" due in one hour"#)]
fn two_assignee_task(
    world: &mut TaskOverdueWorld,
    title: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    create_task(world, title, vec![first, second])
}

#[given(r#""{user}" has reported status "{status}""#)]
fn user_has_reported(
    world: &mut TaskOverdueWorld,
    user: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;
    let acting_user =
        UserId::new(user).map_err(|err| eyre::eyre!("invalid user in scenario: {err}"))?;

    let updated = run_async(world.service.report_status(ReportStatusRequest::new(
        task.id(),
        acting_user,
        status,
    )))
    .wrap_err("report status in scenario setup")?;
    world.task = Some(updated);
    Ok(())
}
