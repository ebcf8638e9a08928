//! Repository port for task document persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task document persistence contract.
///
/// The store holds whole task documents; reads and writes move complete
/// aggregates. Writes are optimistic: `update` carries the version the
/// caller read and is rejected when the stored document has moved on.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces an existing task document, checking the caller's version.
    ///
    /// Returns the persisted snapshot carrying the bumped version.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::Conflict`] when the stored
    /// version differs from the version the caller read.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist. Inactive tasks are
    /// returned; visibility policy belongs to the caller.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns active tasks past their due date whose aggregate status
    /// is not closed.
    ///
    /// The result may over-select tasks that are already fully overdue;
    /// the overdue marking applied by the caller is idempotent.
    async fn find_overdue_candidates(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored document version differs from the version the caller
    /// read.
    #[error("stale write rejected for task: {0}")]
    Conflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
