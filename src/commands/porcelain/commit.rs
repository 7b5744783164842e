use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, commit_timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let head_oid = self.refs().read_head()?;
        self.write_commit(&mut index, vec![head_oid], message.to_string())?;

        Ok(())
    }

    /// Snapshot the staging area on top of the head commit and move the current branch to it
    ///
    /// The first of `parents` must be the head commit. The staging area is cleared and
    /// persisted afterwards.
    pub(crate) fn write_commit(
        &self,
        index: &mut Index,
        parents: Vec<ObjectId>,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let (_, head_commit) = self.head_commit()?;
        let blobs = index.apply_to(head_commit.blobs());

        let commit = Commit::new(parents, commit_timestamp(), blobs, message);
        let commit_oid = self.database().store(&commit)?;
        self.refs().update_head(&commit_oid)?;

        index.clear();
        index.write_updates()?;

        tracing::debug!(
            oid = %commit_oid,
            files = commit.blobs().len(),
            merge = commit.is_merge(),
            "created commit"
        );

        Ok(commit_oid)
    }
}
