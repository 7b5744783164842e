use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// A commit named by its id or any non-empty prefix of it
///
/// # Resolution
///
/// The head commit is tried first, then every stored commit in id order; the first
/// commit whose id starts with the prefix wins. An empty prefix matches nothing.
///
/// ```ignore
/// let oid = Revision::new("a1b2c3".to_string()).resolve(&repository)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Revision(String);

impl Revision {
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        let prefix = self.0.as_str();
        if prefix.is_empty() {
            return Err(RepositoryError::NoSuchCommit.into());
        }

        let head_oid = repository.refs().read_head()?;
        if head_oid.matches_prefix(prefix) {
            return Ok(head_oid);
        }

        repository
            .database()
            .find_commits_by_prefix(prefix)?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::NoSuchCommit.into())
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
