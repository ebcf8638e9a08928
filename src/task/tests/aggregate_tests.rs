//! Tests for the pure aggregate status derivation.

use super::support::{base_time, user};
use crate::task::domain::{PerUserStatus, TaskStatus, UserId, derive_overall_status};
use rstest::rstest;
use std::collections::{BTreeMap, BTreeSet};

fn assignee_set(ids: &[&str]) -> BTreeSet<UserId> {
    ids.iter().map(|id| user(id)).collect()
}

fn status_map(entries: &[(&str, TaskStatus)]) -> BTreeMap<UserId, PerUserStatus> {
    entries
        .iter()
        .map(|(id, status)| (user(id), PerUserStatus::new(*status, base_time(), None)))
        .collect()
}

#[rstest]
#[case::empty_assignee_set(&[], &[], TaskStatus::Pending)]
#[case::no_reports_yet(&["u1", "u2"], &[], TaskStatus::Pending)]
#[case::unanimous_completion(
    &["u1", "u2"],
    &[("u1", TaskStatus::Completed), ("u2", TaskStatus::Completed)],
    TaskStatus::Completed
)]
#[case::partial_completion(
    &["u1", "u2"],
    &[("u1", TaskStatus::Completed)],
    TaskStatus::InProgress
)]
#[case::any_in_progress(
    &["u1", "u2"],
    &[("u1", TaskStatus::InProgress)],
    TaskStatus::InProgress
)]
#[case::in_progress_beats_completed(
    &["u1", "u2"],
    &[("u1", TaskStatus::InProgress), ("u2", TaskStatus::Completed)],
    TaskStatus::InProgress
)]
#[case::overdue_overrides_progress(
    &["u1", "u2"],
    &[("u1", TaskStatus::Overdue), ("u2", TaskStatus::InProgress)],
    TaskStatus::Overdue
)]
#[case::overdue_overrides_partial_completion(
    &["u1", "u2"],
    &[("u1", TaskStatus::Overdue), ("u2", TaskStatus::Completed)],
    TaskStatus::Overdue
)]
#[case::unanimous_rejection_is_still_active(
    &["u1", "u2"],
    &[("u1", TaskStatus::Rejected), ("u2", TaskStatus::Rejected)],
    TaskStatus::InProgress
)]
#[case::onhold_moves_out_of_pending(
    &["u1", "u2"],
    &[("u1", TaskStatus::OnHold)],
    TaskStatus::InProgress
)]
#[case::reopen_moves_out_of_pending(
    &["u1"],
    &[("u1", TaskStatus::Reopen)],
    TaskStatus::InProgress
)]
#[case::cancelled_and_pending_mix(
    &["u1", "u2"],
    &[("u1", TaskStatus::Cancelled)],
    TaskStatus::InProgress
)]
#[case::entries_for_non_assignees_are_ignored(
    &["u1"],
    &[("u9", TaskStatus::InProgress)],
    TaskStatus::Pending
)]
fn derive_overall_status_returns_expected(
    #[case] assignees: &[&str],
    #[case] entries: &[(&str, TaskStatus)],
    #[case] expected: TaskStatus,
) {
    let assignee_ids = assignee_set(assignees);
    let statuses = status_map(entries);

    assert_eq!(derive_overall_status(&assignee_ids, &statuses), expected);
}

#[rstest]
fn derivation_is_deterministic() {
    let assignee_ids = assignee_set(&["u1", "u2", "u3"]);
    let statuses = status_map(&[
        ("u1", TaskStatus::Completed),
        ("u2", TaskStatus::OnHold),
    ]);

    let first = derive_overall_status(&assignee_ids, &statuses);
    let second = derive_overall_status(&assignee_ids, &statuses);

    assert_eq!(first, second);
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::Approved)]
#[case(TaskStatus::Rejected)]
#[case(TaskStatus::OnHold)]
#[case(TaskStatus::Reopen)]
#[case(TaskStatus::Cancelled)]
#[case(TaskStatus::Overdue)]
fn completion_requires_unanimity(#[case] replacement: TaskStatus) {
    let assignee_ids = assignee_set(&["u1", "u2"]);
    let statuses = status_map(&[
        ("u1", TaskStatus::Completed),
        ("u2", replacement),
    ]);

    assert_ne!(
        derive_overall_status(&assignee_ids, &statuses),
        TaskStatus::Completed
    );
}
