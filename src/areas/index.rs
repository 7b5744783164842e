//! Staging area
//!
//! Records the changes the next commit will carry on top of the head commit:
//!
//! - `staged`: file name to blob id of every file added since the last commit
//! - `removed`: names that the next commit will stop tracking
//!
//! A name is never both staged and removed once an operation completes.
//!
//! The staging area is persisted under the `index` key of the state partition; see
//! [`crate::artifacts::index`] for the file format.

use crate::areas::store::{Partition, RepositoryStore};
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::commit::BlobMap;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use byteorder::{NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::rc::Rc;

/// Key of the staging area in the state partition
const INDEX_KEY: &str = "index";

/// Staging area
#[derive(Debug)]
pub struct Index {
    store: Rc<dyn RepositoryStore>,
    staged: BlobMap,
    removed: BTreeSet<String>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(store: Rc<dyn RepositoryStore>) -> Self {
        Index {
            store,
            staged: BlobMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn staged(&self) -> &BlobMap {
        &self.staged
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn staged_oid(&self, name: &str) -> Option<&ObjectId> {
        self.staged.get(name)
    }

    pub fn is_staged(&self, name: &str) -> bool {
        self.staged.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    /// Stage a blob for `name`, replacing any prior stage entry and pending removal
    pub fn stage(&mut self, name: String, oid: ObjectId) {
        self.removed.remove(&name);
        self.staged.insert(name, oid);
        self.changed = true;
    }

    /// Drop the stage entry for `name`
    ///
    /// # Returns
    ///
    /// Whether there was one
    pub fn unstage(&mut self, name: &str) -> bool {
        let was_staged = self.staged.remove(name).is_some();
        self.changed |= was_staged;
        was_staged
    }

    /// Clear a pending removal of `name`
    pub fn restore(&mut self, name: &str) {
        self.changed |= self.removed.remove(name);
    }

    /// Mark `name` for removal, dropping any stage entry it had
    pub fn mark_removed(&mut self, name: String) {
        self.staged.remove(&name);
        self.removed.insert(name);
        self.changed = true;
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.staged.clear();
        self.removed.clear();
    }

    /// The blob map of the next commit: `base` minus removed names, overlaid with staged entries
    pub fn apply_to(&self, base: &BlobMap) -> BlobMap {
        let mut blobs = base
            .iter()
            .filter(|(name, _)| !self.removed.contains(*name))
            .map(|(name, oid)| (name.clone(), oid.clone()))
            .collect::<BlobMap>();
        blobs.extend(
            self.staged
                .iter()
                .map(|(name, oid)| (name.clone(), oid.clone())),
        );

        blobs
    }

    /// Load the staging area from the store
    ///
    /// A missing index is an empty staging area. The trailing checksum is verified.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.staged.clear();
        self.removed.clear();
        self.changed = false;

        let Some(content) = self.store.get(Partition::State, INDEX_KEY)? else {
            return Ok(());
        };
        if content.is_empty() {
            return Ok(());
        }

        let mut reader = Checksum::new(Cursor::new(content));
        let header = self.parse_header(&mut reader)?;
        self.parse_staged(header.staged_count, &mut reader)?;
        self.parse_removed(header.removed_count, &mut reader)?;

        reader.verify().context("Staging area is corrupt")
    }

    fn parse_header(&self, reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(Cursor::new(header_bytes))?;
        header.validate()?;

        Ok(header)
    }

    fn parse_staged(
        &mut self,
        count: u32,
        reader: &mut Checksum<Cursor<Bytes>>,
    ) -> anyhow::Result<()> {
        for _ in 0..count {
            let oid_bytes = reader.read(OBJECT_ID_LENGTH / 2)?;
            let oid = ObjectId::read_h40_from(&mut oid_bytes.as_ref())?;
            let name = Self::read_name(reader)?;

            self.staged.insert(name, oid);
        }

        Ok(())
    }

    fn parse_removed(
        &mut self,
        count: u32,
        reader: &mut Checksum<Cursor<Bytes>>,
    ) -> anyhow::Result<()> {
        for _ in 0..count {
            let name = Self::read_name(reader)?;
            self.removed.insert(name);
        }

        Ok(())
    }

    fn read_name(reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<String> {
        let length = reader.read(2)?;
        let length = u16::from_be_bytes([length[0], length[1]]) as usize;
        let name = reader.read(length)?;

        String::from_utf8(name.to_vec()).context("Invalid file name in staging area")
    }

    fn write_name(buffer: &mut Vec<u8>, name: &str) -> anyhow::Result<()> {
        let length = u16::try_from(name.len())
            .with_context(|| format!("File name too long for the staging area: {}", name))?;
        buffer.write_u16::<NetworkEndian>(length)?;
        buffer.extend_from_slice(name.as_bytes());

        Ok(())
    }

    /// Persist the staging area if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut writer = Checksum::new(Vec::new());

        let header = IndexHeader::for_counts(self.staged.len(), self.removed.len())?;
        writer.write(&header.serialize()?)?;

        for (name, oid) in &self.staged {
            let mut entry = Vec::new();
            oid.write_h40_to(&mut entry)?;
            Self::write_name(&mut entry, name)?;
            writer.write(&entry)?;
        }

        for name in &self.removed {
            let mut entry = Vec::new();
            Self::write_name(&mut entry, name)?;
            writer.write(&entry)?;
        }

        writer.write_checksum()?;
        self.store
            .put(Partition::State, INDEX_KEY, &writer.into_inner())
            .context("Unable to write the staging area")?;
        self.changed = false;

        Ok(())
    }
}
