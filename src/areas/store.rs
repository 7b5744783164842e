//! Repository store
//!
//! Every piece of repository state is a byte value under a key in one of four
//! partitions. The object database, the refs and the staging area are all written in
//! terms of this trait, so the same engine runs against the on-disk layout below or
//! against the in-memory store used by the unit tests.
//!
//! ## On-disk layout
//!
//! ```text
//! .lit/
//!   HEAD                 state partition
//!   index                state partition
//!   blobs/ab/cdef...     blob partition
//!   commits/ab/cdef...   commit partition
//!   refs/heads/master    refs partition
//! ```
//!
//! Keys containing `/` map to nested paths.

use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use file_guard::Lock;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Prefix of the temporary files written before being renamed into place
const TEMP_FILE_PREFIX: &str = "tmp-";

/// Independent key spaces of a repository store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Partition {
    Blobs,
    Commits,
    Refs,
    State,
}

impl Partition {
    pub const ALL: [Partition; 4] = [
        Partition::Blobs,
        Partition::Commits,
        Partition::Refs,
        Partition::State,
    ];

    /// Directory of the partition relative to the repository directory
    fn dir_name(&self) -> Option<&'static str> {
        match self {
            Partition::Blobs => Some("blobs"),
            Partition::Commits => Some("commits"),
            Partition::Refs => Some("refs"),
            Partition::State => None,
        }
    }
}

/// Partitioned key-value byte store backing a repository
pub trait RepositoryStore: std::fmt::Debug {
    fn is_initialized(&self) -> bool;

    /// Create the (empty) partitions
    fn initialize(&self) -> anyhow::Result<()>;

    fn get(&self, partition: Partition, key: &str) -> anyhow::Result<Option<Bytes>>;

    /// Write `value` under `key`, replacing any previous value
    fn put(&self, partition: Partition, key: &str, value: &[u8]) -> anyhow::Result<()>;

    fn exists(&self, partition: Partition, key: &str) -> anyhow::Result<bool>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, partition: Partition, key: &str) -> anyhow::Result<()>;

    /// All keys of a partition, in ascending order
    fn keys(&self, partition: Partition) -> anyhow::Result<Vec<String>>;
}

fn validate_key(key: &str) -> anyhow::Result<()> {
    let path = Path::new(key);
    let is_plain = !key.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if !is_plain {
        anyhow::bail!("invalid store key {:?}", key);
    }

    Ok(())
}

/// Store kept in the repository directory (`.lit`)
#[derive(Debug)]
pub struct DiskStore {
    path: Box<Path>,
}

impl DiskStore {
    pub fn new(path: Box<Path>) -> Self {
        DiskStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn partition_path(&self, partition: Partition) -> PathBuf {
        match partition.dir_name() {
            Some(dir_name) => self.path.join(dir_name),
            None => self.path.to_path_buf(),
        }
    }

    fn key_path(&self, partition: Partition, key: &str) -> anyhow::Result<PathBuf> {
        validate_key(key)?;
        Ok(self.partition_path(partition).join(key))
    }

    fn generate_temp_name() -> String {
        format!("{TEMP_FILE_PREFIX}{}", rand::random::<u32>())
    }

    fn prune_empty_parent_dirs(&self, partition: Partition, path: &Path) -> anyhow::Result<()> {
        let partition_path = self.partition_path(partition);

        if let Some(parent) = path.parent()
            && parent != partition_path
            && parent.starts_with(&partition_path)
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("failed to remove empty directory at {:?}", parent))?;
            self.prune_empty_parent_dirs(partition, parent)?;
        }

        Ok(())
    }
}

impl RepositoryStore for DiskStore {
    fn is_initialized(&self) -> bool {
        self.path.is_dir()
    }

    fn initialize(&self) -> anyhow::Result<()> {
        for partition in Partition::ALL {
            let partition_path = self.partition_path(partition);
            std::fs::create_dir_all(&partition_path).with_context(|| {
                format!("Unable to create directory {}", partition_path.display())
            })?;
        }

        Ok(())
    }

    fn get(&self, partition: Partition, key: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.key_path(partition, key)?;
        if !path.is_file() {
            return Ok(None);
        }

        let mut file = std::fs::File::open(&path)
            .with_context(|| format!("Unable to open {}", path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)?;

        let mut content = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut content)
            .with_context(|| format!("Unable to read {}", path.display()))?;

        Ok(Some(Bytes::from(content)))
    }

    fn put(&self, partition: Partition, key: &str, value: &[u8]) -> anyhow::Result<()> {
        let path = self.key_path(partition, key)?;
        let dir = path
            .parent()
            .with_context(|| format!("Invalid store path {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Unable to create directory {}", dir.display()))?;

        let temp_path = dir.join(Self::generate_temp_name());
        {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Unable to open {}", temp_path.display()))?;
            let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

            lock.deref_mut()
                .write_all(value)
                .with_context(|| format!("Unable to write {}", temp_path.display()))?;
        }

        // atomic replace
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Unable to rename temp file to {}", path.display()))?;

        Ok(())
    }

    fn exists(&self, partition: Partition, key: &str) -> anyhow::Result<bool> {
        Ok(self.key_path(partition, key)?.is_file())
    }

    fn delete(&self, partition: Partition, key: &str) -> anyhow::Result<()> {
        let path = self.key_path(partition, key)?;
        if !path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("Unable to delete {}", path.display()))?;
        self.prune_empty_parent_dirs(partition, &path)
    }

    fn keys(&self, partition: Partition) -> anyhow::Result<Vec<String>> {
        let partition_path = self.partition_path(partition);
        if !partition_path.is_dir() {
            return Ok(Vec::new());
        }

        // the state partition is the repository directory itself, so only its own files count
        let max_depth = match partition {
            Partition::State => 1,
            _ => usize::MAX,
        };

        let mut keys = WalkDir::new(&partition_path)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                !entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(TEMP_FILE_PREFIX)
            })
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&partition_path).ok()?;
                let key = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                Some(key)
            })
            .collect::<Vec<_>>();
        keys.sort();

        Ok(keys)
    }
}

/// Store living entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    initialized: RefCell<bool>,
    entries: RefCell<BTreeMap<(Partition, String), Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryStore for MemoryStore {
    fn is_initialized(&self) -> bool {
        *self.initialized.borrow()
    }

    fn initialize(&self) -> anyhow::Result<()> {
        *self.initialized.borrow_mut() = true;
        Ok(())
    }

    fn get(&self, partition: Partition, key: &str) -> anyhow::Result<Option<Bytes>> {
        validate_key(key)?;
        Ok(self
            .entries
            .borrow()
            .get(&(partition, key.to_string()))
            .cloned())
    }

    fn put(&self, partition: Partition, key: &str, value: &[u8]) -> anyhow::Result<()> {
        validate_key(key)?;
        self.entries
            .borrow_mut()
            .insert((partition, key.to_string()), Bytes::copy_from_slice(value));
        Ok(())
    }

    fn exists(&self, partition: Partition, key: &str) -> anyhow::Result<bool> {
        validate_key(key)?;
        Ok(self
            .entries
            .borrow()
            .contains_key(&(partition, key.to_string())))
    }

    fn delete(&self, partition: Partition, key: &str) -> anyhow::Result<()> {
        validate_key(key)?;
        self.entries
            .borrow_mut()
            .remove(&(partition, key.to_string()));
        Ok(())
    }

    fn keys(&self, partition: Partition) -> anyhow::Result<Vec<String>> {
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|(key_partition, _)| *key_partition == partition)
            .map(|(_, key)| key.clone())
            .collect())
    }
}
