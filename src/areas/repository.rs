use crate::REPOSITORY_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::store::{DiskStore, MemoryStore, RepositoryStore};
use crate::areas::workspace::{DiskWorkspace, MemoryWorkspace, WorkingTree};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    store: Rc<dyn RepositoryStore>,
    database: Database,
    workspace: Box<dyn WorkingTree>,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path`, whether it is initialized or not
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        let store: Rc<dyn RepositoryStore> =
            Rc::new(DiskStore::new(path.join(REPOSITORY_DIR).into_boxed_path()));
        let workspace = Box::new(DiskWorkspace::new(path.clone().into_boxed_path()));

        Ok(Self::with_areas(
            path.into_boxed_path(),
            store,
            workspace,
            writer,
        ))
    }

    /// Repository kept entirely in memory
    pub fn in_memory(writer: Box<dyn std::io::Write>) -> Self {
        Self::with_areas(
            Path::new(".").into(),
            Rc::new(MemoryStore::new()),
            Box::new(MemoryWorkspace::new()),
            writer,
        )
    }

    pub fn with_areas(
        path: Box<Path>,
        store: Rc<dyn RepositoryStore>,
        workspace: Box<dyn WorkingTree>,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Repository {
            path,
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(Index::new(store.clone()))),
            database: Database::new(store.clone()),
            refs: Refs::new(store.clone()),
            store,
            workspace,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn store(&self) -> &dyn RepositoryStore {
        self.store.as_ref()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &dyn WorkingTree {
        self.workspace.as_ref()
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Fail with `NotInitialized` unless `init` has run here
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.store.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::NotInitialized.into())
        }
    }

    /// The head commit together with its id
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let head_commit = self.database.load_commit(&head_oid)?;

        Ok((head_oid, head_commit))
    }
}
