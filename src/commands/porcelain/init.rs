use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.store().is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        self.store()
            .initialize()
            .context("Failed to create the repository directory")?;

        let root_oid = self
            .database()
            .store(&Commit::root())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .update_ref(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.clear();

        tracing::debug!(path = %self.path().display(), root = %root_oid, "initialized repository");

        Ok(())
    }
}
