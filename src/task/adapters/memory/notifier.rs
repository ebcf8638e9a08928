//! Recording notifier for task lifecycle tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{Notification, Notifier, NotifierError, NotifierResult};

/// Notifier that records every dispatched notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates a recorder with no dispatched notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every notification dispatched so far, in
    /// dispatch order.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the recorder state is
    /// poisoned.
    pub fn sent(&self) -> NotifierResult<Vec<Notification>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> NotifierResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(notification.clone());
        Ok(())
    }
}
