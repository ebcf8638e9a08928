//! Service layer for task creation, status reporting, and maintenance.

use crate::task::{
    domain::{
        GroupId, NewTaskData, ParseTaskStatusError, Task, TaskDetailsUpdate, TaskDomainError,
        TaskId, TaskPriority, TaskStatus, TaskTitle, UserId,
    },
    ports::{
        GroupDirectory, GroupDirectoryError, Notification, NotificationKind, Notifier,
        TaskRepository, TaskRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    due_at: Option<DateTime<Utc>>,
    created_by: UserId,
    assignees: Vec<UserId>,
    groups: Vec<GroupId>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields and medium priority.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            due_at: None,
            created_by,
            assignees: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the directly named assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the assigned groups.
    #[must_use]
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }
}

/// Request payload for an assignee reporting their own status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStatusRequest {
    task_id: TaskId,
    acting_user: UserId,
    status: String,
    remarks: Option<String>,
}

impl ReportStatusRequest {
    /// Creates a request with required fields.
    ///
    /// The status arrives as the caller-supplied string and is validated
    /// against the status enumeration by the service.
    #[must_use]
    pub fn new(task_id: TaskId, acting_user: UserId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            acting_user,
            status: status.into(),
            remarks: None,
        }
    }

    /// Attaches remarks to the report.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

/// Request payload for widening a task's audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAssigneesRequest {
    task_id: TaskId,
    added_by: UserId,
    users: Vec<UserId>,
    groups: Vec<GroupId>,
}

impl AddAssigneesRequest {
    /// Creates an empty request for the given task.
    #[must_use]
    pub const fn new(task_id: TaskId, added_by: UserId) -> Self {
        Self {
            task_id,
            added_by,
            users: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Sets the users to add directly.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.users = users.into_iter().collect();
        self
    }

    /// Sets the groups whose members should be added.
    #[must_use]
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }
}

/// Request payload for a privileged metadata edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskDetailsRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_at: Option<DateTime<Utc>>,
}

impl UpdateTaskDetailsRequest {
    /// Creates an empty edit for the given task.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            priority: None,
            due_at: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The reported status is not a member of the status enumeration.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The task does not exist or is inactive.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Group resolution failed.
    #[error(transparent)]
    Directory(#[from] GroupDirectoryError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Owns task creation, self-status reporting, audience growth, metadata
/// edits, and soft deletion. Writes go through a single bounded retry of
/// the read-modify-write cycle when the store reports a stale version.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, N, C>
where
    R: TaskRepository,
    D: GroupDirectory,
    N: Notifier,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, D, N, C> TaskLifecycleService<R, D, N, C>
where
    R: TaskRepository,
    D: GroupDirectory,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            notifier,
            clock,
        }
    }

    /// Creates a task for the union of direct assignees and resolved
    /// group members.
    ///
    /// Every assignee starts as implicit `pending` and receives a
    /// best-effort assignment notification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the title is empty, the due
    /// date lies in the past, a group cannot be resolved (the error
    /// names the offending group), or the repository rejects
    /// persistence.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let mut assignees: BTreeSet<UserId> = request.assignees.into_iter().collect();
        let mut assigned_groups = BTreeSet::new();
        for group_id in request.groups {
            let members = self.directory.resolve_members(&group_id).await?;
            assignees.extend(members);
            assigned_groups.insert(group_id);
        }

        let task = Task::new(
            NewTaskData {
                title,
                description: request.description,
                priority: request.priority,
                due_at: request.due_at,
                created_by: request.created_by,
                assignees,
                assigned_groups,
            },
            &*self.clock,
        )?;
        self.repository.store(&task).await?;

        for user in task.assignees() {
            self.notify_assignment(&task, user).await;
        }
        Ok(task)
    }

    /// Retrieves an active task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does
    /// not exist or is inactive.
    pub async fn get_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_active(task_id).await
    }

    /// Records the acting assignee's reported status and re-derives the
    /// aggregate.
    ///
    /// The task creator receives a best-effort status-change
    /// notification; a notification failure is logged and never rolls
    /// back the transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the status string is unknown,
    /// the task is missing or inactive, the acting user is not an
    /// assignee, or persistence fails after the bounded retry.
    pub async fn report_status(&self, request: ReportStatusRequest) -> TaskLifecycleResult<Task> {
        let status = TaskStatus::try_from(request.status.as_str())?;
        let acting_user = request.acting_user;
        let remarks = request.remarks;

        let saved = self
            .persist_mutation(request.task_id, |task| {
                task.report_status(&acting_user, status, remarks.clone(), &*self.clock)
            })
            .await?;

        let notification = Notification::new(
            saved.created_by().clone(),
            NotificationKind::StatusChanged,
            "Task status updated",
            format!("{} set '{}' to {}", acting_user, saved.title(), status),
        )
        .with_related_task(saved.id());
        if let Err(err) = self.notifier.notify(&notification).await {
            tracing::warn!(
                task_id = %saved.id(),
                error = %err,
                "failed to dispatch status change notification"
            );
        }
        Ok(saved)
    }

    /// Widens a task's audience with users and resolved group members.
    ///
    /// Genuinely new assignees receive a best-effort assignment
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when a group cannot be resolved,
    /// the task is missing or inactive, or persistence fails after the
    /// bounded retry.
    pub async fn add_assignees(&self, request: AddAssigneesRequest) -> TaskLifecycleResult<Task> {
        let mut additions: BTreeSet<UserId> = request.users.into_iter().collect();
        for group_id in &request.groups {
            additions.extend(self.directory.resolve_members(group_id).await?);
        }
        let groups: BTreeSet<GroupId> = request.groups.into_iter().collect();
        let added_by = request.added_by;

        let mut task = self.load_active(request.task_id).await?;
        let new_users = task.add_assignees(&additions, &groups, &added_by, &*self.clock);
        let saved = match self.repository.update(&task).await {
            Ok(saved) => saved,
            Err(TaskRepositoryError::Conflict(_)) => {
                let mut fresh = self.load_active(request.task_id).await?;
                fresh.add_assignees(&additions, &groups, &added_by, &*self.clock);
                self.repository.update(&fresh).await?
            }
            Err(err) => return Err(err.into()),
        };

        for user in &new_users {
            self.notify_assignment(&saved, user).await;
        }
        Ok(saved)
    }

    /// Applies a privileged metadata edit.
    ///
    /// Detail edits never touch per-user statuses, the aggregate, or
    /// the history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when a replacement title is empty,
    /// a replacement due date lies in the past, the task is missing or
    /// inactive, or persistence fails after the bounded retry.
    pub async fn update_details(
        &self,
        request: UpdateTaskDetailsRequest,
    ) -> TaskLifecycleResult<Task> {
        let update = TaskDetailsUpdate {
            title: request.title.map(TaskTitle::new).transpose()?,
            description: request.description,
            priority: request.priority,
            due_at: request.due_at,
        };
        self.persist_mutation(request.task_id, |task| {
            task.update_details(update.clone(), &*self.clock)
        })
        .await
    }

    /// Soft-deletes a task, removing it from default reads and scans
    /// while retaining it for audit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing or
    /// already inactive, or persistence fails after the bounded retry.
    pub async fn deactivate(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.persist_mutation(task_id, |task| {
            task.deactivate(&*self.clock);
            Ok(())
        })
        .await
    }

    async fn load_active(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .filter(Task::is_active)
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    /// Loads, mutates, and saves a task, retrying the whole cycle once
    /// when the store rejects a stale version.
    async fn persist_mutation<F>(&self, task_id: TaskId, mutate: F) -> TaskLifecycleResult<Task>
    where
        F: Fn(&mut Task) -> Result<(), TaskDomainError>,
    {
        let mut task = self.load_active(task_id).await?;
        mutate(&mut task)?;
        match self.repository.update(&task).await {
            Ok(saved) => Ok(saved),
            Err(TaskRepositoryError::Conflict(_)) => {
                let mut fresh = self.load_active(task_id).await?;
                mutate(&mut fresh)?;
                Ok(self.repository.update(&fresh).await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn notify_assignment(&self, task: &Task, user: &UserId) {
        let notification = Notification::new(
            user.clone(),
            NotificationKind::TaskAssigned,
            "Task assigned",
            format!("You have been assigned to '{}'", task.title()),
        )
        .with_related_task(task.id());
        if let Err(err) = self.notifier.notify(&notification).await {
            tracing::warn!(
                task_id = %task.id(),
                user_id = %user,
                error = %err,
                "failed to dispatch assignment notification"
            );
        }
    }
}
