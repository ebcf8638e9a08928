//! In-memory group directory for task lifecycle tests.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{GroupId, UserId},
    ports::{GroupDirectory, GroupDirectoryError, GroupDirectoryResult},
};

/// Thread-safe in-memory group directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupDirectory {
    groups: Arc<RwLock<HashMap<GroupId, BTreeSet<UserId>>>>,
}

impl InMemoryGroupDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a group's membership, replacing any previous members.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDirectoryError::Lookup`] when the directory state
    /// is poisoned.
    pub fn set_members(
        &self,
        group_id: GroupId,
        members: BTreeSet<UserId>,
    ) -> GroupDirectoryResult<()> {
        let mut groups = self
            .groups
            .write()
            .map_err(|err| GroupDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        groups.insert(group_id, members);
        Ok(())
    }
}

#[async_trait]
impl GroupDirectory for InMemoryGroupDirectory {
    async fn resolve_members(&self, group_id: &GroupId) -> GroupDirectoryResult<BTreeSet<UserId>> {
        let groups = self
            .groups
            .read()
            .map_err(|err| GroupDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| GroupDirectoryError::GroupNotFound(group_id.clone()))
    }
}
