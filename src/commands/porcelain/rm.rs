use crate::areas::repository::Repository;
use crate::errors::RepositoryError;

impl Repository {
    pub async fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head_commit) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let is_tracked = head_commit.tracks(name);
        if !is_tracked && !index.is_staged(name) {
            return Err(RepositoryError::NothingToRemove.into());
        }

        if is_tracked {
            self.workspace().delete(name)?;
            index.mark_removed(name.to_string());
        } else {
            index.unstage(name);
        }

        index.write_updates()?;

        Ok(())
    }
}
