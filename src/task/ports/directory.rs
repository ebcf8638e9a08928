//! Directory port resolving group identifiers to their member users.

use crate::task::domain::{GroupId, UserId};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for group directory operations.
pub type GroupDirectoryResult<T> = Result<T, GroupDirectoryError>;

/// Read-only lookup of group membership in the surrounding directory.
///
/// Membership is read at call time; the lifecycle service snapshots the
/// expansion onto the task, so later directory changes do not rewrite an
/// existing task's audience.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Resolves a group to its current member users.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDirectoryError::GroupNotFound`] when the group does
    /// not exist or the caller may not use it.
    async fn resolve_members(&self, group_id: &GroupId) -> GroupDirectoryResult<BTreeSet<UserId>>;
}

/// Errors returned by group directory implementations.
#[derive(Debug, Clone, Error)]
pub enum GroupDirectoryError {
    /// The group does not exist or is not usable by the caller.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// Directory lookup failure.
    #[error("directory lookup error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl GroupDirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
