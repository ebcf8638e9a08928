//! Then steps for overdue scanning BDD scenarios.

use super::world::{TaskOverdueWorld, run_async};
use fayol::task::{
    domain::{Task, TaskStatus, UserId},
    ports::{NotificationKind, TaskRepository},
};
use rstest_bdd_macros::then;
use std::collections::BTreeSet;

fn stored_task(world: &TaskOverdueWorld) -> Result<Task, eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;
    run_async(world.repository.find_by_id(task.id()))
        .map_err(|err| eyre::eyre!("repository lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("task document missing from repository"))
}

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid expected status: {err}"))
}

fn overdue_recipients(world: &TaskOverdueWorld) -> Result<Vec<String>, eyre::Report> {
    let sent = world
        .notifier
        .sent()
        .map_err(|err| eyre::eyre!("notification recorder unreadable: {err}"))?;
    Ok(sent
        .iter()
        .filter(|n| n.kind() == NotificationKind::TaskOverdue)
        .map(|n| n.user_id().as_str().to_owned())
        .collect())
}

#[then("the latest scan counts {count:usize} updated")]
fn latest_scan_counts_updated(
    world: &TaskOverdueWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing scan report in scenario world"))?;

    if report.updated != count {
        return Err(eyre::eyre!(
            "expected {count} updated tasks, found {}",
            report.updated
        ));
    }
    Ok(())
}

#[then(r#"the task overall status is "{status}""#)]
fn task_overall_status_is(world: &TaskOverdueWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = stored_task(world)?;

    if task.overall_status() != expected {
        return Err(eyre::eyre!(
            "expected overall status {}, found {}",
            expected.as_str(),
            task.overall_status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the status of "{user}" is "{status}""#)]
fn status_of_user_is(
    world: &TaskOverdueWorld,
    user: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let user_id =
        UserId::new(user).map_err(|err| eyre::eyre!("invalid user in scenario: {err}"))?;
    let task = stored_task(world)?;

    let actual = task.effective_status(&user_id);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected {} for {}, found {}",
            expected.as_str(),
            user_id,
            actual.as_str()
        ));
    }
    Ok(())
}

#[then(r#""{user}" receives an overdue notification"#)]
fn user_receives_overdue_notification(
    world: &TaskOverdueWorld,
    user: String,
) -> Result<(), eyre::Report> {
    let recipients = overdue_recipients(world)?;

    if !recipients.iter().any(|recipient| recipient == &user) {
        return Err(eyre::eyre!(
            "no overdue notification dispatched to {user}; recipients: {recipients:?}"
        ));
    }
    Ok(())
}

#[then("no assignee is notified twice")]
fn no_assignee_is_notified_twice(world: &TaskOverdueWorld) -> Result<(), eyre::Report> {
    let recipients = overdue_recipients(world)?;
    let distinct: BTreeSet<&String> = recipients.iter().collect();

    if distinct.len() != recipients.len() {
        return Err(eyre::eyre!(
            "duplicate overdue notifications dispatched: {recipients:?}"
        ));
    }
    Ok(())
}
