//! Pure derivation of a task's aggregate status.

use super::{PerUserStatus, TaskStatus, UserId};
use std::collections::{BTreeMap, BTreeSet};

/// Derives the single aggregate status from the assignee set and the
/// per-user status map.
///
/// Assignees absent from the map are read as [`TaskStatus::Pending`].
/// The rules, in order:
///
/// 1. Every assignee `completed` → `completed`.
/// 2. Any assignee `overdue` → `overdue`; the system-assigned marker
///    holds until the last overdue assignee reports again.
/// 3. Any assignee `in-progress` → `in-progress`.
/// 4. Every assignee `pending` → `pending`.
/// 5. Any other combination → `in-progress`; the aggregate is never more
///    complete than the least-progressed assignee, and a single report
///    away from `pending` moves the whole task out of `pending`.
///
/// An empty assignee set yields `pending`. The function is deterministic
/// and side-effect free; callers persist the result.
#[must_use]
pub fn derive_overall_status(
    assignees: &BTreeSet<UserId>,
    status_by_user: &BTreeMap<UserId, PerUserStatus>,
) -> TaskStatus {
    if assignees.is_empty() {
        return TaskStatus::Pending;
    }

    let mut all_completed = true;
    let mut all_pending = true;
    let mut any_overdue = false;
    let mut any_in_progress = false;

    for user in assignees {
        let status = status_by_user
            .get(user)
            .map_or(TaskStatus::Pending, PerUserStatus::status);
        all_completed &= status == TaskStatus::Completed;
        all_pending &= status == TaskStatus::Pending;
        any_overdue |= status == TaskStatus::Overdue;
        any_in_progress |= status == TaskStatus::InProgress;
    }

    if all_completed {
        TaskStatus::Completed
    } else if any_overdue {
        TaskStatus::Overdue
    } else if any_in_progress {
        TaskStatus::InProgress
    } else if all_pending {
        TaskStatus::Pending
    } else {
        TaskStatus::InProgress
    }
}
