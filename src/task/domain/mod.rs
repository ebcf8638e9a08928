//! Domain model for task lifecycle management.
//!
//! The task domain models multi-assignee task creation, per-user status
//! reporting, aggregate status derivation, and automatic overdue marking
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod aggregate;
mod error;
mod history;
mod ids;
mod status;
mod task;

pub use aggregate::derive_overall_status;
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use history::{PerUserStatus, StatusActor, StatusHistoryEntry};
pub use ids::{GroupId, TaskId, TaskTitle, UserId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{
    AUTO_OVERDUE_REASON, AUTO_OVERDUE_REMARKS, CREATED_REMARKS, NewTaskData, Task,
    TaskDetailsUpdate,
};
