//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod directory;
pub mod notifier;
pub mod repository;

pub use directory::{GroupDirectory, GroupDirectoryError, GroupDirectoryResult};
pub use notifier::{Notification, NotificationKind, Notifier, NotifierError, NotifierResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
