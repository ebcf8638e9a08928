//! Tracing-backed notifier adapter.

use async_trait::async_trait;

use crate::task::ports::{Notification, Notifier, NotifierResult};

/// Notifier that emits each notification as a structured tracing event.
///
/// Delivery to users is a collaborator concern; deployments without a
/// delivery channel (and the overdue worker binary) use this sink so
/// that dispatched notifications still surface in the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates the notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: &Notification) -> NotifierResult<()> {
        tracing::info!(
            user_id = %notification.user_id(),
            kind = ?notification.kind(),
            related_task_id = ?notification.related_task_id(),
            title = notification.title(),
            message = notification.message(),
            "notification dispatched"
        );
        Ok(())
    }
}
