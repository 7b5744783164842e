//! Commit object
//!
//! Commits are immutable snapshots of the tracked file set. They contain:
//! - Parent commit ID(s) (none for the root commit, two for merge commits)
//! - A timestamp (seconds resolution, UTC)
//! - The file name to blob ID map of every tracked file
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <unix-seconds>
//! parent <parent-sha>
//! parent <second-parent-sha>
//! blob <blob-sha> <file name>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Read};

/// Message of the commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "LIT_COMMIT_DATE";

/// Offset printed after every log date; it is part of the display format only
const DISPLAY_OFFSET: &str = "-0800";

/// Map of tracked file names to the blob holding their content
pub type BlobMap = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what the split point search needs: the first-parent link and the
/// timestamp used to pick the latest common ancestor.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parent: Option<ObjectId>,
    pub timestamp: DateTime<Utc>,
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    /// Creation time, truncated to whole seconds so it survives serialization
    timestamp: DateTime<Utc>,
    /// Tracked files of this snapshot
    blobs: BlobMap,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        timestamp: DateTime<Utc>,
        blobs: BlobMap,
        message: String,
    ) -> Self {
        Commit {
            parents,
            timestamp: truncate_to_seconds(timestamp),
            blobs,
            message,
        }
    }

    /// The parentless, empty commit created by `init`
    ///
    /// Its timestamp is the Unix epoch, so its id is the same in every repository.
    pub fn root() -> Self {
        Commit::new(
            Vec::new(),
            DateTime::<Utc>::UNIX_EPOCH,
            BlobMap::new(),
            ROOT_COMMIT_MESSAGE.to_string(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent().is_some()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn blobs(&self) -> &BlobMap {
        &self.blobs
    }

    pub fn blob_oid(&self, name: &str) -> Option<&ObjectId> {
        self.blobs.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }

    /// Format timestamp the way the log prints it
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 -0800"
    pub fn readable_timestamp(&self) -> String {
        format!(
            "{} {}",
            self.timestamp.format("%a %b %-d %H:%M:%S %Y"),
            DISPLAY_OFFSET
        )
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parent: self.parent().cloned(),
            timestamp: self.timestamp,
        }
    }
}

/// Timestamp for a commit created now
///
/// Honours `LIT_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) so histories can be
/// reproduced; falls back to the current time.
pub fn commit_timestamp() -> DateTime<Utc> {
    let timestamp = std::env::var(COMMIT_DATE_ENV).ok().and_then(|date_str| {
        DateTime::parse_from_rfc2822(&date_str)
            .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
            .ok()
    });

    match timestamp {
        Some(ts) => ts.with_timezone(&Utc),
        None => Utc::now(),
    }
}

fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.timestamp(), 0).unwrap_or(timestamp)
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!("timestamp {}", self.timestamp.timestamp())];
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        for (name, oid) in &self.blobs {
            anyhow::ensure!(
                !name.contains(['\n', '\r']),
                "file name {:?} cannot be recorded in a commit",
                name
            );
            lines.push(format!("blob {} {}", oid.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(frame(self.object_type(), lines.join("\n").as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;
        let timestamp = DateTime::from_timestamp(timestamp, 0)
            .context("Invalid commit object: timestamp out of range")?;

        let mut parents = Vec::new();
        let mut blobs = BlobMap::new();
        for line in lines {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("blob ") {
                let (oid, name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid blob line")?;
                blobs.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        Ok(Self::new(parents, timestamp, blobs, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
