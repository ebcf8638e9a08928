//! Notifier port for user-facing notification dispatch.

use crate::task::domain::{TaskId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Category of a dispatched notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// An assignee reported a status change.
    StatusChanged,
    /// A user was assigned to a task.
    TaskAssigned,
    /// A task passed its due date with work still owed.
    TaskOverdue,
}

/// A notification addressed to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    user_id: UserId,
    kind: NotificationKind,
    title: String,
    message: String,
    related_task_id: Option<TaskId>,
}

impl Notification {
    /// Creates a notification without a related task.
    #[must_use]
    pub fn new(
        user_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            related_task_id: None,
        }
    }

    /// Attaches the task the notification refers to.
    #[must_use]
    pub const fn with_related_task(mut self, task_id: TaskId) -> Self {
        self.related_task_id = Some(task_id);
        self
    }

    /// Returns the addressee.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the notification category.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the short title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the related task, if any.
    #[must_use]
    pub const fn related_task_id(&self) -> Option<TaskId> {
        self.related_task_id
    }
}

/// Notification dispatch contract.
///
/// Dispatch is fire-and-forget from the engine's perspective: callers
/// log and swallow failures so that an otherwise valid task mutation
/// never rolls back over a notification problem.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatches a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the notification could
    /// not be handed to the delivery channel.
    async fn notify(&self, notification: &Notification) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The notification could not be delivered.
    #[error("notification delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
