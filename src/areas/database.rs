//! Object database
//!
//! Content-addressed, append-only storage of blobs and commits. Objects are framed,
//! zlib-compressed and written under their id in the partition of their type; nothing
//! is ever updated or deleted.

use crate::areas::store::{Partition, RepositoryStore};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::rc::Rc;

#[derive(Debug)]
pub struct Database {
    store: Rc<dyn RepositoryStore>,
}

impl Database {
    pub fn new(store: Rc<dyn RepositoryStore>) -> Self {
        Database { store }
    }

    fn partition_of(object_type: ObjectType) -> Partition {
        match object_type {
            ObjectType::Blob => Partition::Blobs,
            ObjectType::Commit => Partition::Commits,
        }
    }

    /// Store an object unless it is already present
    ///
    /// # Returns
    ///
    /// The id of the object
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let partition = Self::partition_of(object.object_type());
        let key = object_id.to_key();

        if !self.store.exists(partition, &key)? {
            let object_content = Self::compress(object.serialize()?)?;
            self.store
                .put(partition, &key, &object_content)
                .with_context(|| format!("Unable to write object {}", object_id))?;
            tracing::trace!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;
        Blob::deserialize(object_reader).with_context(|| format!("Corrupt blob {}", object_id))
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        Commit::deserialize(object_reader)
            .with_context(|| format!("Corrupt commit {}", object_id))
    }

    /// Ids of every stored commit, sorted
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.store
            .keys(Partition::Commits)?
            .iter()
            .map(|key| ObjectId::try_from_key(key))
            .collect()
    }

    /// Find all commits whose id starts with the given prefix, sorted by id
    ///
    /// An empty prefix matches nothing.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .commit_ids()?
            .into_iter()
            .filter(|oid| oid.matches_prefix(prefix))
            .collect())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_content = self
            .store
            .get(Self::partition_of(expected_type), &object_id.to_key())?
            .with_context(|| format!("Missing {} object {}", expected_type, object_id))?;
        let object_content = Self::decompress(object_content)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {}, expected a {}",
                object_id,
                object_type,
                expected_type
            );
        }

        Ok(object_reader)
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}

/// Memoizes the slim form of commits during graph walks
#[derive(Debug, Default)]
pub struct CommitCache {
    cache: RefCell<HashMap<ObjectId, Rc<SlimCommit>>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        oid: &ObjectId,
    ) -> anyhow::Result<Rc<SlimCommit>> {
        if let Some(commit) = self.cache.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let commit = Rc::new(database.load_commit(oid)?.to_slim(oid.clone()));
        self.cache.borrow_mut().insert(oid.clone(), commit.clone());

        Ok(commit)
    }
}
