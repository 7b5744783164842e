use crate::REPOSITORY_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [REPOSITORY_DIR];

/// The user's files, addressed by names relative to the repository root
///
/// Names always use `/` as separator, whatever the platform.
pub trait WorkingTree: std::fmt::Debug {
    fn exists(&self, name: &str) -> bool;

    fn read(&self, name: &str) -> anyhow::Result<Bytes>;

    /// Create or overwrite a file, creating missing parent directories
    fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()>;

    /// Remove a file; removing a missing file is not an error
    fn delete(&self, name: &str) -> anyhow::Result<()>;

    /// Every file of the tree, sorted by name
    fn list(&self) -> anyhow::Result<Vec<String>>;
}

fn validate_name(name: &str) -> anyhow::Result<()> {
    let path = Path::new(name);
    let is_plain = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if !is_plain || is_ignored(path) {
        anyhow::bail!("invalid working tree file name {:?}", name);
    }

    Ok(())
}

fn is_ignored(path: &Path) -> bool {
    path.components().any(|component| {
        if let Component::Normal(name) = component {
            IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
        } else {
            false
        }
    })
}

/// Working tree rooted at a directory on disk
#[derive(Debug)]
pub struct DiskWorkspace {
    path: Box<Path>,
}

impl DiskWorkspace {
    pub fn new(path: Box<Path>) -> Self {
        DiskWorkspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        validate_name(name)?;
        Ok(self.path.join(name))
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}

impl WorkingTree for DiskWorkspace {
    fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_ok_and(|path| path.is_file())
    }

    fn read(&self, name: &str) -> anyhow::Result<Bytes> {
        let path = self.file_path(name)?;
        let content =
            std::fs::read(&path).with_context(|| format!("Failed to read file: {:?}", name))?;

        Ok(Bytes::from(content))
    }

    fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.file_path(name)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directories of: {:?}", name))?;
        }
        if path.is_dir() {
            anyhow::bail!("A directory is in the way of file: {:?}", name);
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {:?}", name))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", name))?;

        Ok(())
    }

    fn delete(&self, name: &str) -> anyhow::Result<()> {
        let path = self.file_path(name)?;
        if !path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&path).with_context(|| format!("Failed to remove file: {:?}", name))?;
        self.prune_empty_parent_dirs(&path)
    }

    fn list(&self) -> anyhow::Result<Vec<String>> {
        let mut names = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| !is_ignored(entry.path().strip_prefix(&self.path).unwrap_or(entry.path())))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&self.path).ok()?;
                Some(
                    relative_path
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/"),
                )
            })
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }
}

/// Working tree living entirely in memory
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    files: RefCell<BTreeMap<String, Bytes>>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkingTree for MemoryWorkspace {
    fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn read(&self, name: &str) -> anyhow::Result<Bytes> {
        self.files
            .borrow()
            .get(name)
            .cloned()
            .with_context(|| format!("Failed to read file: {:?}", name))
    }

    fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        validate_name(name)?;
        self.files
            .borrow_mut()
            .insert(name.to_string(), Bytes::copy_from_slice(content));
        Ok(())
    }

    fn delete(&self, name: &str) -> anyhow::Result<()> {
        self.files.borrow_mut().remove(name);
        Ok(())
    }

    fn list(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }
}
