//! Status and priority enumerations for the task domain.

use super::{ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-user and aggregate task status.
///
/// The same closed enumeration serves both an individual assignee's
/// progress marker and the derived aggregate status. The *open* statuses
/// (`pending`, `in-progress`, `reopen`, `onhold`) represent work still
/// owed; the *closed* statuses (`completed`, `approved`, `rejected`,
/// `cancelled`) represent resolved work. `overdue` belongs to neither
/// set: it is assigned by the system and exited by a user report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// No work reported yet; the implicit initial status.
    #[serde(rename = "pending")]
    Pending,
    /// The assignee is actively working on the task.
    #[serde(rename = "in-progress")]
    InProgress,
    /// The assignee considers their share of the work done.
    #[serde(rename = "completed")]
    Completed,
    /// The work has been reviewed and accepted.
    #[serde(rename = "approved")]
    Approved,
    /// The work has been reviewed and rejected.
    #[serde(rename = "rejected")]
    Rejected,
    /// The work is paused.
    #[serde(rename = "onhold")]
    OnHold,
    /// The task has been reopened after a resolution.
    #[serde(rename = "reopen")]
    Reopen,
    /// The task no longer requires work.
    #[serde(rename = "cancelled")]
    Cancelled,
    /// The due date passed while work was still owed.
    #[serde(rename = "overdue")]
    Overdue,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::OnHold => "onhold",
            Self::Reopen => "reopen",
            Self::Cancelled => "cancelled",
            Self::Overdue => "overdue",
        }
    }

    /// Returns `true` when the status represents work still owed.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(
            self,
            Self::Pending | Self::InProgress | Self::Reopen | Self::OnHold
        )
    }

    /// Returns `true` when the status represents resolved work.
    ///
    /// Overdue marking never touches an assignee whose status is closed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Approved | Self::Rejected | Self::Cancelled
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "onhold" => Ok(Self::OnHold),
            "reopen" => Ok(Self::Reopen),
            "cancelled" => Ok(Self::Cancelled),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Normal urgency; the default for new tasks.
    #[default]
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
