use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch and the working tree to any commit
    pub async fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = Revision::new(revision.to_string()).resolve(self)?;
        let target_commit = self.database().load_commit(&target_oid)?;
        let (_, head_commit) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let mut migration = Migration::new(self, head_commit.blobs(), target_commit.blobs());
        migration.apply_changes()?;

        self.refs().update_head(&target_oid)?;
        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
