//! Error types for task domain validation and parsing.

use super::{TaskId, UserId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// A group identifier is empty after trimming.
    #[error("group identifier must not be empty")]
    EmptyGroupId,

    /// The supplied due date already lies in the past.
    #[error("due date {0} is already in the past")]
    DueDateInPast(DateTime<Utc>),

    /// The acting user is not an assignee of the task.
    ///
    /// Carries only the task and acting-user identifiers; nothing about
    /// the task's assignees or their statuses is disclosed.
    #[error("user {user_id} is not an assignee of task {task_id}")]
    NotAssignee {
        /// Task the status report targeted.
        task_id: TaskId,
        /// User who attempted the report.
        user_id: UserId,
    },
}

/// Error returned while parsing task statuses from the wire or storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from the wire or storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
