use crate::areas::database::CommitCache;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::resolution::{Resolution, classify};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;

/// What a merge ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already contained in the current one
    GivenIsAncestor,
    /// The current branch only moved forward to the given commit
    FastForwarded(ObjectId),
    /// A merge commit was created
    Merged { oid: ObjectId, conflicted: bool },
}

/// Working tree and staging area change decided by the classification
enum MergeAction {
    Stage { oid: ObjectId, content: Bytes },
    Remove,
}

impl Repository {
    pub async fn merge(&mut self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if !index.is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let given_branch = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch)?;
        let given_oid = self
            .refs()
            .read_ref(&given_branch)?
            .ok_or(RepositoryError::NoSuchBranch)?;

        let current_branch = self.refs().current_branch()?;
        if given_branch == current_branch {
            return Err(RepositoryError::SelfMerge.into());
        }

        let (head_oid, head_commit) = self.head_commit()?;
        let given_commit = self.database().load_commit(&given_oid)?;

        Migration::new(self, head_commit.blobs(), given_commit.blobs()).check_untracked()?;

        let split_oid = self.find_split_point(&head_oid, &given_oid)?;
        tracing::debug!(head = %head_oid, given = %given_oid, split = %split_oid, "merging");

        if split_oid == given_oid {
            writeln!(self.writer(), "Given branch is an ancestor of the current branch.")?;
            return Ok(MergeOutcome::GivenIsAncestor);
        }

        if split_oid == head_oid {
            let mut migration = Migration::new(self, head_commit.blobs(), given_commit.blobs());
            migration.apply_changes()?;
            self.refs().update_head(&given_oid)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForwarded(given_oid));
        }

        let split_commit = self.database().load_commit(&split_oid)?;
        let (actions, conflicted) = self.plan_merge(&split_commit, &head_commit, &given_commit)?;
        self.apply_merge(&mut index, actions)?;

        if index.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let message = format!("Merged {} into {}.", given_branch, current_branch);
        let merge_oid = self.write_commit(&mut index, vec![head_oid, given_oid], message)?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Merged {
            oid: merge_oid,
            conflicted,
        })
    }

    fn find_split_point(&self, head_oid: &ObjectId, given_oid: &ObjectId) -> anyhow::Result<ObjectId> {
        let commit_cache = CommitCache::new();
        let database = self.database();

        let split_point_finder =
            SplitPointFinder::new(|oid| commit_cache.get_or_load_slim_commit(database, oid));

        split_point_finder
            .find_split_point(head_oid, given_oid)?
            .with_context(|| format!("no split point between {} and {}", head_oid, given_oid))
    }

    /// Decide every file's fate and load all content needed, before anything is written
    ///
    /// # Returns
    ///
    /// The actions keyed by file name, and whether any file conflicted
    fn plan_merge(
        &self,
        split: &Commit,
        head: &Commit,
        given: &Commit,
    ) -> anyhow::Result<(Vec<(String, MergeAction)>, bool)> {
        let resolutions = classify(split.blobs(), head.blobs(), given.blobs());
        let mut actions = Vec::new();
        let mut conflicted = false;

        for (name, resolution) in resolutions {
            tracing::trace!(file = %name, resolution = ?resolution, "classified");

            match resolution {
                Resolution::Unchanged | Resolution::TakeHead => {}
                Resolution::TakeGiven(oid) => {
                    let content = self.database().load_blob(&oid)?.content().clone();
                    actions.push((name, MergeAction::Stage { oid, content }));
                }
                Resolution::Delete => actions.push((name, MergeAction::Remove)),
                Resolution::Conflict { head, given } => {
                    let head_content = self.load_optional_blob(head.as_ref())?;
                    let given_content = self.load_optional_blob(given.as_ref())?;
                    let content =
                        conflict_content(head_content.as_deref(), given_content.as_deref());

                    let blob = Blob::new(name.clone(), content.clone());
                    let oid = self.database().store(&blob)?;
                    actions.push((name, MergeAction::Stage { oid, content }));
                    conflicted = true;
                }
            }
        }

        Ok((actions, conflicted))
    }

    fn load_optional_blob(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        match oid {
            Some(oid) => Ok(Some(self.database().load_blob(oid)?.content().clone())),
            None => Ok(None),
        }
    }

    fn apply_merge(&self, index: &mut Index, actions: Vec<(String, MergeAction)>) -> anyhow::Result<()> {
        for (name, action) in actions {
            match action {
                MergeAction::Stage { oid, content } => {
                    self.workspace().write(&name, &content)?;
                    index.stage(name, oid);
                }
                MergeAction::Remove => {
                    self.workspace().delete(&name)?;
                    index.mark_removed(name);
                }
            }
        }

        Ok(())
    }
}
