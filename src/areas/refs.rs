//! Branch references and HEAD
//!
//! Branches are mutable names pointing at commits. HEAD names the active branch; the
//! commit that branch points to is the head commit.
//!
//! ## Storage
//!
//! - `refs/heads/<branch>`: the 40-character id of the branch tip
//! - `HEAD`: `ref: refs/heads/<branch>`

use crate::areas::store::{Partition, RepositoryStore};
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::rc::Rc;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Prefix of branch keys inside the refs partition
const HEADS_PREFIX: &str = "heads/";

#[derive(Debug)]
pub struct Refs {
    store: Rc<dyn RepositoryStore>,
}

impl Refs {
    pub fn new(store: Rc<dyn RepositoryStore>) -> Self {
        Refs { store }
    }

    fn branch_key(branch_name: &BranchName) -> String {
        format!("{HEADS_PREFIX}{}", branch_name.as_ref())
    }

    /// Name of the active branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = self
            .store
            .get(Partition::State, HEAD_REF_NAME)?
            .context("HEAD is missing")?;
        let content = String::from_utf8(content.to_vec()).context("HEAD is not valid UTF-8")?;
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .with_context(|| format!("HEAD does not name a branch: {:?}", content))?;

        BranchName::try_parse_sym_ref_name(&SymRefName::new(symref_match[1].to_string()))
    }

    /// Make `branch_name` the active branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let sym_ref = SymRefName::for_branch(branch_name);
        self.store.put(
            Partition::State,
            HEAD_REF_NAME,
            format!("ref: {}", sym_ref.as_ref_path()).as_bytes(),
        )?;
        tracing::debug!(branch = %branch_name, "switched HEAD");

        Ok(())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Id of the head commit
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_ref(&current_branch)?
            .with_context(|| format!("current branch {} points nowhere", current_branch))
    }

    /// Move the active branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current_branch = self.current_branch()?;
        self.update_ref(&current_branch, oid)
    }

    pub fn read_ref(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        match self
            .store
            .get(Partition::Refs, &Self::branch_key(branch_name))?
        {
            Some(content) => {
                let content = String::from_utf8(content.to_vec())
                    .with_context(|| format!("ref of branch {} is not valid UTF-8", branch_name))?;
                Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
            }
            None => Ok(None),
        }
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        self.store
            .exists(Partition::Refs, &Self::branch_key(branch_name))
    }

    /// Point a branch at `oid`, creating it if needed
    pub fn update_ref(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.store.put(
            Partition::Refs,
            &Self::branch_key(branch_name),
            oid.as_ref().as_bytes(),
        )?;
        tracing::debug!(branch = %branch_name, oid = %oid, "moved branch");

        Ok(())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name)? {
            return Err(RepositoryError::BranchExists.into());
        }

        self.update_ref(name, source_oid)
    }

    /// Delete a branch pointer, leaving its commits alone
    ///
    /// # Returns
    ///
    /// The id the branch pointed to
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_ref(name)?
            .ok_or(RepositoryError::NoSuchBranch)?;
        self.store
            .delete(Partition::Refs, &Self::branch_key(name))?;
        tracing::debug!(branch = %name, oid = %oid, "deleted branch");

        Ok(oid)
    }

    /// All branches, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        self.store
            .keys(Partition::Refs)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(HEADS_PREFIX).map(str::to_string))
            .map(BranchName::try_parse)
            .collect()
    }
}
