use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// History of the current branch, following first parents down to the root commit
    pub async fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut curr_commit_oid = Some(self.refs().read_head()?);

        while let Some(commit_oid) = curr_commit_oid {
            let commit = self.database().load_commit(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;

            curr_commit_oid = commit.parent().cloned();
        }

        Ok(())
    }

    /// Every commit ever made, ordered by id
    pub async fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for commit_oid in self.database().commit_ids()? {
            let commit = self.database().load_commit(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Print the id of every commit whose message is exactly `message`
    pub async fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut found = false;
        for commit_oid in self.database().commit_ids()? {
            let commit = self.database().load_commit(&commit_oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_oid)?;
                found = true;
            }
        }

        if !found {
            return Err(RepositoryError::NoSuchCommitMessage.into());
        }

        Ok(())
    }

    fn display_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_oid)?;
        if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
