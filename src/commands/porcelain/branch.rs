use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Point a new branch at the head commit, without switching to it
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub async fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch)?;
        if !self.refs().branch_exists(&branch_name)? {
            return Err(RepositoryError::NoSuchBranch.into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::CannotRemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
