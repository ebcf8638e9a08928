//! Per-user status records and the append-only status history.

use super::{TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An individual assignee's progress marker on a shared task.
///
/// Entries are created lazily: an assignee without a record is read as
/// [`TaskStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerUserStatus {
    status: TaskStatus,
    updated_at: DateTime<Utc>,
    remarks: Option<String>,
}

impl PerUserStatus {
    /// Creates a per-user status record.
    #[must_use]
    pub const fn new(status: TaskStatus, updated_at: DateTime<Utc>, remarks: Option<String>) -> Self {
        Self {
            status,
            updated_at,
            remarks,
        }
    }

    /// Returns the reported status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns when the status was last updated.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the remarks attached to the latest update, if any.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

/// Originator of a status-affecting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "changed_by_type", content = "changed_by", rename_all = "snake_case")]
pub enum StatusActor {
    /// A user reported the status themselves.
    User(UserId),
    /// The system applied the transition (automatic overdue marking).
    System,
}

/// One record in a task's append-only audit trail.
///
/// History records are never mutated or reordered once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    status: TaskStatus,
    #[serde(flatten)]
    actor: StatusActor,
    changed_at: DateTime<Utc>,
    remarks: Option<String>,
}

impl StatusHistoryEntry {
    /// Creates a history record.
    #[must_use]
    pub const fn new(
        status: TaskStatus,
        actor: StatusActor,
        changed_at: DateTime<Utc>,
        remarks: Option<String>,
    ) -> Self {
        Self {
            status,
            actor,
            changed_at,
            remarks,
        }
    }

    /// Returns the status recorded by the event.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns who caused the event.
    #[must_use]
    pub const fn actor(&self) -> &StatusActor {
        &self.actor
    }

    /// Returns when the event happened.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }

    /// Returns the remarks attached to the event, if any.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}
