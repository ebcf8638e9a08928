//! Task aggregate root and related lifecycle types.

use super::{
    GroupId, PerUserStatus, StatusActor, StatusHistoryEntry, TaskDomainError, TaskId, TaskPriority,
    TaskStatus, TaskTitle, UserId, derive_overall_status,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Remarks recorded on the initial history entry of every task.
pub const CREATED_REMARKS: &str = "created";

/// Remarks written into a per-user entry forced to overdue.
pub const AUTO_OVERDUE_REMARKS: &str = "Automatically marked as overdue";

/// Reason recorded on the task for an automatic overdue episode.
pub const AUTO_OVERDUE_REASON: &str = "Automatic overdue detection";

/// Task aggregate root.
///
/// The task document owns the per-user status map, the append-only
/// status history, and the derived aggregate status. Every mutation that
/// touches a per-user status or the aggregate appends exactly one
/// history record. The serde representation is the persisted document;
/// repository adapters round-trip the whole aggregate through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    due_at: Option<DateTime<Utc>>,
    created_by: UserId,
    assignees: BTreeSet<UserId>,
    assigned_groups: BTreeSet<GroupId>,
    status_by_user: BTreeMap<UserId, PerUserStatus>,
    status_history: Vec<StatusHistoryEntry>,
    overall_status: TaskStatus,
    completion_date: Option<DateTime<Utc>>,
    marked_overdue_at: Option<DateTime<Utc>>,
    overdue_reason: Option<String>,
    overdue_notified: bool,
    is_active: bool,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated task title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Descriptive priority.
    pub priority: TaskPriority,
    /// Optional due date; absence means the task never becomes overdue.
    pub due_at: Option<DateTime<Utc>>,
    /// User creating the task.
    pub created_by: UserId,
    /// Snapshot of the resolved assignee set (direct and group-expanded,
    /// deduplicated).
    pub assignees: BTreeSet<UserId>,
    /// Groups named at creation time, retained for audit.
    pub assigned_groups: BTreeSet<GroupId>,
}

/// Metadata changes applied by a privileged editor.
///
/// `None` fields are left unchanged. Detail edits never touch per-user
/// statuses, the aggregate status, or the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement due date.
    pub due_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task with every assignee implicitly `pending`.
    ///
    /// Appends the initial history record attributed to the creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when the due date lies
    /// before the current clock time.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let now = clock.utc();
        if let Some(due_at) = data.due_at {
            if due_at < now {
                return Err(TaskDomainError::DueDateInPast(due_at));
            }
        }

        let history = vec![StatusHistoryEntry::new(
            TaskStatus::Pending,
            StatusActor::User(data.created_by.clone()),
            now,
            Some(CREATED_REMARKS.to_owned()),
        )];
        let status_by_user = BTreeMap::new();
        let overall_status = derive_overall_status(&data.assignees, &status_by_user);

        Ok(Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            priority: data.priority,
            due_at: data.due_at,
            created_by: data.created_by,
            assignees: data.assignees,
            assigned_groups: data.assigned_groups,
            status_by_user,
            status_history: history,
            overall_status,
            completion_date: None,
            marked_overdue_at: None,
            overdue_reason: None,
            overdue_notified: false,
            is_active: true,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the resolved assignee snapshot.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<UserId> {
        &self.assignees
    }

    /// Returns the groups named at creation or assignment time.
    #[must_use]
    pub const fn assigned_groups(&self) -> &BTreeSet<GroupId> {
        &self.assigned_groups
    }

    /// Returns the per-user status map.
    ///
    /// Assignees without an entry are implicitly `pending`; use
    /// [`Self::effective_status`] for the resolved view.
    #[must_use]
    pub const fn status_by_user(&self) -> &BTreeMap<UserId, PerUserStatus> {
        &self.status_by_user
    }

    /// Returns the append-only status history.
    #[must_use]
    pub fn status_history(&self) -> &[StatusHistoryEntry] {
        &self.status_history
    }

    /// Returns the derived aggregate status.
    #[must_use]
    pub const fn overall_status(&self) -> TaskStatus {
        self.overall_status
    }

    /// Returns when every assignee had completed the task, if that has
    /// happened.
    #[must_use]
    pub const fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    /// Returns when the current overdue episode started, if one is open.
    #[must_use]
    pub const fn marked_overdue_at(&self) -> Option<DateTime<Utc>> {
        self.marked_overdue_at
    }

    /// Returns the reason recorded for the current overdue episode.
    #[must_use]
    pub fn overdue_reason(&self) -> Option<&str> {
        self.overdue_reason.as_deref()
    }

    /// Returns whether the current overdue episode has been notified.
    #[must_use]
    pub const fn overdue_notified(&self) -> bool {
        self.overdue_notified
    }

    /// Returns the soft-delete flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the optimistic-concurrency document version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the given assignee's status, reading a missing entry as
    /// [`TaskStatus::Pending`].
    #[must_use]
    pub fn effective_status(&self, user: &UserId) -> TaskStatus {
        self.status_by_user
            .get(user)
            .map_or(TaskStatus::Pending, PerUserStatus::status)
    }

    /// Returns a copy of the task carrying the given document version.
    ///
    /// Intended for repository adapters persisting a new document
    /// revision.
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Records the acting assignee's reported status.
    ///
    /// Upserts the per-user entry, appends one history record,
    /// re-derives the aggregate status, records the completion date when
    /// the aggregate confirms unanimous completion, and closes the
    /// overdue episode when the aggregate leaves `overdue`. Any status is
    /// accepted from any current status; the engine intentionally
    /// enforces no terminal states, so `reopen` works even from
    /// `completed` or `cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when the acting user is
    /// not in the assignee set; the task is left unchanged.
    pub fn report_status(
        &mut self,
        user: &UserId,
        status: TaskStatus,
        remarks: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.assignees.contains(user) {
            return Err(TaskDomainError::NotAssignee {
                task_id: self.id,
                user_id: user.clone(),
            });
        }

        let now = clock.utc();
        self.status_by_user.insert(
            user.clone(),
            PerUserStatus::new(status, now, remarks.clone()),
        );
        self.status_history.push(StatusHistoryEntry::new(
            status,
            StatusActor::User(user.clone()),
            now,
            remarks,
        ));
        self.refresh_overall_status();
        if status == TaskStatus::Completed && self.overall_status == TaskStatus::Completed {
            self.completion_date = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Forces every open assignee to `overdue` when the due date has
    /// passed, returning the newly transitioned assignees.
    ///
    /// Assignees whose status is closed are left untouched; overdue
    /// marking never downgrades resolved work. When at least one
    /// assignee transitions, the aggregate is set to `overdue`, the
    /// episode markers are recorded once per episode, and exactly one
    /// system history record is appended. Repeat invocations with no
    /// open assignees left return an empty set and change nothing, so
    /// the operation is idempotent.
    pub fn check_and_mark_overdue(&mut self, now: DateTime<Utc>) -> Vec<UserId> {
        let Some(due_at) = self.due_at else {
            return Vec::new();
        };
        if due_at >= now {
            return Vec::new();
        }

        let newly_marked: Vec<UserId> = self
            .assignees
            .iter()
            .filter(|user| self.effective_status(user).is_open())
            .cloned()
            .collect();
        if newly_marked.is_empty() {
            return newly_marked;
        }

        for user in &newly_marked {
            self.status_by_user.insert(
                user.clone(),
                PerUserStatus::new(
                    TaskStatus::Overdue,
                    now,
                    Some(AUTO_OVERDUE_REMARKS.to_owned()),
                ),
            );
        }
        self.overall_status = TaskStatus::Overdue;
        if self.marked_overdue_at.is_none() {
            self.marked_overdue_at = Some(now);
            self.overdue_reason = Some(AUTO_OVERDUE_REASON.to_owned());
        }
        self.status_history.push(StatusHistoryEntry::new(
            TaskStatus::Overdue,
            StatusActor::System,
            now,
            Some(AUTO_OVERDUE_REASON.to_owned()),
        ));
        self.updated_at = now;
        newly_marked
    }

    /// Widens the assignee snapshot with the given users, returning the
    /// assignees that were actually new.
    ///
    /// New assignees read as implicit `pending`; groups named by the
    /// caller join the audit record. The aggregate status is re-derived;
    /// a history record attributed to `added_by` is appended only when
    /// the aggregate actually changes.
    pub fn add_assignees(
        &mut self,
        additions: &BTreeSet<UserId>,
        groups: &BTreeSet<GroupId>,
        added_by: &UserId,
        clock: &impl Clock,
    ) -> Vec<UserId> {
        let new_users: Vec<UserId> = additions
            .iter()
            .filter(|user| !self.assignees.contains(*user))
            .cloned()
            .collect();
        self.assigned_groups.extend(groups.iter().cloned());
        if new_users.is_empty() {
            return new_users;
        }

        self.assignees.extend(new_users.iter().cloned());
        let now = clock.utc();
        let previous_overall = self.overall_status;
        self.refresh_overall_status();
        if self.overall_status != previous_overall {
            self.status_history.push(StatusHistoryEntry::new(
                self.overall_status,
                StatusActor::User(added_by.clone()),
                now,
                Some("assignees added".to_owned()),
            ));
        }
        self.updated_at = now;
        new_users
    }

    /// Applies a privileged metadata edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when the replacement
    /// due date lies before the current clock time; the task is left
    /// unchanged.
    pub fn update_details(
        &mut self,
        update: TaskDetailsUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        if let Some(due_at) = update.due_at {
            if due_at < now {
                return Err(TaskDomainError::DueDateInPast(due_at));
            }
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_at) = update.due_at {
            self.due_at = Some(due_at);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Soft-deletes the task.
    ///
    /// Inactive tasks are excluded from default reads and overdue scans
    /// but retained for audit.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.is_active = false;
        self.updated_at = clock.utc();
    }

    /// Records that the current overdue episode has been notified.
    ///
    /// Set by the scanner after the first successful notification
    /// dispatch of the episode; guards against duplicate fan-out across
    /// scan runs.
    pub const fn mark_overdue_notified(&mut self) {
        self.overdue_notified = true;
    }

    /// Returns whether a batch scan should consider this task.
    ///
    /// True for active tasks past their due date whose aggregate is not
    /// closed. The check deliberately over-selects tasks that are
    /// already fully overdue; [`Self::check_and_mark_overdue`] is
    /// idempotent, so those become cheap no-ops.
    #[must_use]
    pub fn is_overdue_scan_candidate(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.due_at.is_some_and(|due_at| due_at < now)
            && !self.overall_status.is_closed()
    }

    /// Re-derives the aggregate status and closes the overdue episode
    /// when the aggregate leaves `overdue`.
    fn refresh_overall_status(&mut self) {
        let was_overdue = self.overall_status == TaskStatus::Overdue;
        self.overall_status = derive_overall_status(&self.assignees, &self.status_by_user);
        if was_overdue && self.overall_status != TaskStatus::Overdue {
            self.marked_overdue_at = None;
            self.overdue_reason = None;
            self.overdue_notified = false;
        }
    }
}
