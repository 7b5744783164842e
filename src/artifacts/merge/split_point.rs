//! Split point finder for merge operations
//!
//! The split point of two commits is the common ancestor the three-way merge compares
//! both sides against.
//!
//! ## Algorithm
//!
//! 1. Walk the first-parent chain of the source commit, marking every commit as
//!    visited from the source and remembering its distance from the source.
//! 2. Walk the first-parent chain of the target commit, marking every commit as
//!    visited from the target.
//! 3. Among the commits visited from both sides, pick the one with the latest timestamp.
//!    Equal timestamps (commits made within the same second) go to the commit closest
//!    to the source, then to the smallest id.
//!
//! Second parents of merge commits are never followed, so a branch merged into the
//! other one through a merge commit's second parent does not move the split point.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

#[derive(Debug)]
struct Visit {
    state: VisitState,
    commit: Rc<SlimCommit>,
    /// Number of first-parent steps from the source, if reached from it
    source_distance: Option<usize>,
}

/// Finds the split point of two commits
///
/// The commit loader gives access to any stored commit; it is typically backed by a
/// [`crate::areas::database::CommitCache`].
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Rc<SlimCommit>>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Rc<SlimCommit>>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Mark every commit on the first-parent chain starting at `start`
    fn walk_first_parents(
        &self,
        start: &ObjectId,
        side: VisitState,
        visits: &mut HashMap<ObjectId, Visit>,
    ) -> anyhow::Result<()> {
        let mut next = Some(start.clone());
        let mut distance = 0;

        while let Some(oid) = next {
            let commit = (self.commit_loader)(&oid)?;
            next = commit.parent.clone();

            let visit = visits.entry(oid).or_insert_with(|| Visit {
                state: VisitState::NONE,
                commit,
                source_distance: None,
            });
            visit.state |= side;
            if side == VisitState::VISITED_FROM_SOURCE {
                visit.source_distance = Some(distance);
            }

            distance += 1;
        }

        Ok(())
    }

    /// Find the split point of `source` and `target`
    ///
    /// # Returns
    ///
    /// `None` if the two first-parent chains share no commit
    pub fn find_split_point(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut visits = HashMap::new();
        self.walk_first_parents(source, VisitState::VISITED_FROM_SOURCE, &mut visits)?;
        self.walk_first_parents(target, VisitState::VISITED_FROM_TARGET, &mut visits)?;

        let split_point = visits
            .values()
            .filter(|visit| visit.state.contains(VisitState::VISITED_FROM_BOTH))
            .max_by_key(|visit| {
                (
                    visit.commit.timestamp,
                    Reverse(visit.source_distance.unwrap_or(usize::MAX)),
                    Reverse(visit.commit.oid.clone()),
                )
            })
            .map(|visit| visit.commit.oid.clone());

        tracing::trace!(
            source = %source,
            target = %target,
            visited = visits.len(),
            split_point = ?split_point,
            "searched split point"
        );

        Ok(split_point)
    }
}
