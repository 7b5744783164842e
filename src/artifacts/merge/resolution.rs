//! Per-file merge classification
//!
//! Each file name in the union of the split point, head and given blob maps is compared
//! by blob id ("changed" means the id differs from the split point's, including a file
//! appearing or disappearing):
//!
//! | head      | given     | resolution |
//! |-----------|-----------|------------|
//! | unchanged | unchanged | `Unchanged` |
//! | changed the same way as given | | `Unchanged` |
//! | unchanged | changed, still present | `TakeGiven` |
//! | unchanged | deleted   | `Delete` |
//! | changed   | unchanged | `TakeHead` |
//! | changed   | changed differently | `Conflict` |

use crate::artifacts::objects::commit::BlobMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Neither side changed the file, or both changed it identically
    Unchanged,
    /// Only the given branch changed it: check out and stage its blob
    TakeGiven(ObjectId),
    /// Only the head changed it: keep the working tree as is
    TakeHead,
    /// The given branch deleted a file head left alone: remove and untrack it
    Delete,
    /// Both sides changed it differently; `None` marks a side that deleted it
    Conflict {
        head: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

fn resolve(split: Option<&ObjectId>, head: Option<&ObjectId>, given: Option<&ObjectId>) -> Resolution {
    let head_changed = head != split;
    let given_changed = given != split;

    match (head_changed, given_changed) {
        (false, false) => Resolution::Unchanged,
        _ if head == given => Resolution::Unchanged,
        (false, true) => match given {
            Some(given) => Resolution::TakeGiven(given.clone()),
            None => Resolution::Delete,
        },
        (true, false) => Resolution::TakeHead,
        (true, true) => Resolution::Conflict {
            head: head.cloned(),
            given: given.cloned(),
        },
    }
}

/// Classify every file tracked by any of the three snapshots
pub fn classify(split: &BlobMap, head: &BlobMap, given: &BlobMap) -> BTreeMap<String, Resolution> {
    let names = split
        .keys()
        .chain(head.keys())
        .chain(given.keys())
        .collect::<BTreeSet<_>>();

    names
        .into_iter()
        .map(|name| {
            let resolution = resolve(split.get(name), head.get(name), given.get(name));
            tracing::trace!(file = %name, resolution = ?resolution, "classified");
            (name.clone(), resolution)
        })
        .collect()
}
