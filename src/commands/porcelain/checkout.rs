use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    /// Restore one file from the head commit, or from the commit `revision` names
    ///
    /// The staging area is left alone.
    pub async fn checkout_file(&mut self, revision: Option<&str>, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = match revision {
            Some(revision) => Revision::new(revision.to_string()).resolve(self)?,
            None => self.refs().read_head()?,
        };
        let commit = self.database().load_commit(&commit_oid)?;

        let blob_oid = commit
            .blob_oid(name)
            .ok_or(RepositoryError::FileNotInCommit)?;
        let blob = self
            .database()
            .load_blob(blob_oid)
            .with_context(|| format!("Failed to load {} from commit {}", name, commit_oid))?;

        self.workspace().write(name, blob.content())?;

        Ok(())
    }

    /// Switch to another branch, moving the working tree to its tip
    pub async fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchCheckoutBranch)?;
        let target_oid = self
            .refs()
            .read_ref(&branch_name)?
            .ok_or(RepositoryError::NoSuchCheckoutBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let mut migration = Migration::new(self, head_commit.blobs(), target_commit.blobs());
        migration.apply_changes()?;

        index.clear();
        index.write_updates()?;
        self.refs().set_head(&branch_name)?;

        Ok(())
    }
}
