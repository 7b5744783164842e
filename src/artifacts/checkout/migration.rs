//! Checkout migration
//!
//! Moves the working tree from the snapshot of the current commit to the snapshot of a
//! target commit:
//!
//! 1. Refuse if a file tracked by the target but not by the current commit already
//!    exists in the working tree (it would be overwritten without ever being saved)
//! 2. Plan the actions: write every file of the target, delete every file the current
//!    commit tracks and the target does not
//! 3. Load every blob the plan needs
//! 4. Apply the actions to the working tree
//!
//! Nothing is written before steps 1 to 3 succeed.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::BlobMap;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Delete a file the target does not track
    Delete,
    /// Create or overwrite a file with the target's content
    Write,
}

/// Set of planned actions grouped by type, deletions first
pub type ActionsSet = BTreeMap<ActionType, Vec<(String, Option<Bytes>)>>;

/// Checkout migration planner and executor
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files tracked by the current commit
    current: &'r BlobMap,
    /// Files tracked by the target commit
    target: &'r BlobMap,
    /// Planned working tree actions
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &'r BlobMap, target: &'r BlobMap) -> Self {
        Self {
            repository,
            current,
            target,
            actions: ActionsSet::new(),
        }
    }

    /// Files the target would overwrite although the current commit does not track them
    pub fn untracked_files_in_the_way(&self) -> Vec<&'r str> {
        self.target
            .keys()
            .filter(|name| !self.current.contains_key(*name))
            .filter(|name| self.repository.workspace().exists(name))
            .map(String::as_str)
            .collect()
    }

    /// Fail with `UntrackedFileConflict` if any untracked file is in the way
    pub fn check_untracked(&self) -> anyhow::Result<()> {
        let in_the_way = self.untracked_files_in_the_way();
        if in_the_way.is_empty() {
            return Ok(());
        }

        tracing::debug!(files = ?in_the_way, "untracked files in the way");
        Err(RepositoryError::UntrackedFileConflict.into())
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.update_workspace()
    }

    pub fn plan_changes(&mut self) -> anyhow::Result<()> {
        self.check_untracked()?;
        self.actions.clear();

        let deletions = self
            .current
            .keys()
            .filter(|name| !self.target.contains_key(*name))
            .map(|name| (name.clone(), None))
            .collect::<Vec<_>>();

        let writes = self
            .target
            .iter()
            .map(|(name, oid)| {
                let blob = self
                    .repository
                    .database()
                    .load_blob(oid)
                    .with_context(|| format!("Failed to load blob of {} for checkout", name))?;
                Ok((name.clone(), Some(blob.content().clone())))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        self.actions.insert(ActionType::Delete, deletions);
        self.actions.insert(ActionType::Write, writes);

        Ok(())
    }

    fn update_workspace(&self) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        for (action_type, actions) in &self.actions {
            for (name, content) in actions {
                match (action_type, content) {
                    (ActionType::Delete, None) => workspace.delete(name)?,
                    (ActionType::Write, Some(content)) => workspace.write(name, content)?,
                    _ => anyhow::bail!("Invalid action and content combination for {}", name),
                }
            }
        }

        tracing::debug!(
            deleted = self.actions.get(&ActionType::Delete).map_or(0, Vec::len),
            written = self.actions.get(&ActionType::Write).map_or(0, Vec::len),
            "migrated working tree"
        );

        Ok(())
    }
}
