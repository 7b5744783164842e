use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    pub async fn add(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if name.contains(['\n', '\r']) {
            return Err(RepositoryError::InvalidFileName(name.to_string()).into());
        }
        if !self.workspace().exists(name) {
            return Err(RepositoryError::FileNotFound.into());
        }

        let content = self
            .workspace()
            .read(name)
            .with_context(|| format!("Failed to read {}", name))?;
        let blob = Blob::new(name.to_string(), content);
        let blob_oid = blob.object_id()?;

        let (_, head_commit) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        index.restore(name);
        if head_commit.blob_oid(name) == Some(&blob_oid) {
            // back to its committed state
            index.unstage(name);
        } else {
            self.database().store(&blob)?;
            index.stage(name.to_string(), blob_oid);
        }

        index.write_updates()?;

        Ok(())
    }
}
