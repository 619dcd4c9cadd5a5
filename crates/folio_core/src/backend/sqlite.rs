//! SQLite implementation of the persistence boundary.
//!
//! # Invariants
//! - One connection, guarded by a mutex; each command runs to completion
//!   before the next one starts.
//! - SQLite work runs on tokio's blocking pool, never on an executor thread.
//! - Write commands emit one metadata-only log event (no titles or bodies).

use crate::backend::{BackendError, BackendResult, ItemBackend};
use crate::config::CoreConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::document::{Document, DocumentForCreate, DocumentForUpdate};
use crate::model::folder::{
    DocumentsFolder, DocumentsFolderForCreate, DocumentsFolderForUpdate, DocumentsFolderTree,
};
use crate::model::item_id::ItemId;
use crate::model::query::{DocumentFilter, FolderFilter, ListOptions};
use crate::repo::item_repo::{RepoResult, SqliteItemRepository};
use async_trait::async_trait;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Item boundary backed by one SQLite connection.
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
    untitled_document_prefix: String,
    unnamed_folder_prefix: String,
}

impl SqliteBackend {
    /// Wraps a migrated connection, taking placeholder prefixes from `config`.
    pub fn new(conn: Connection, config: &CoreConfig) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            untitled_document_prefix: config.untitled_document_prefix.clone(),
            unnamed_folder_prefix: config.unnamed_folder_prefix.clone(),
        }
    }

    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, config: &CoreConfig) -> Result<Self, DbError> {
        Ok(Self::new(open_db(path)?, config))
    }

    pub fn open_in_memory(config: &CoreConfig) -> Result<Self, DbError> {
        Ok(Self::new(open_db_in_memory()?, config))
    }

    /// Opens `config.db_path`, or an in-memory database when it is unset.
    pub fn from_config(config: &CoreConfig) -> Result<Self, DbError> {
        match &config.db_path {
            Some(path) => Self::open(path, config),
            None => Self::open_in_memory(config),
        }
    }

    /// Runs `f` against the repository on the blocking pool.
    async fn read<T, F>(&self, f: F) -> BackendResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteItemRepository<'_>) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| BackendError::Rejected("storage lock poisoned".to_string()))?;
            let repo = SqliteItemRepository::try_new(&conn)?;
            f(&repo).map_err(BackendError::from)
        })
        .await
        .map_err(|err| BackendError::Rejected(format!("storage task failed: {err}")))?
    }

    async fn write<T, F>(&self, op: &'static str, f: F) -> BackendResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteItemRepository<'_>) -> RepoResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let result = self.read(f).await;
        match &result {
            Ok(_) => info!(
                "event=item_write module=backend op={op} status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=item_write module=backend op={op} status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

#[async_trait]
impl ItemBackend for SqliteBackend {
    async fn get_document(&self, id: &ItemId) -> BackendResult<Document> {
        let key = id.clone();
        self.read(move |repo| repo.get_document(&key))
            .await?
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn create_document(&self, data: DocumentForCreate) -> BackendResult<Document> {
        self.write("create_document", move |repo| repo.create_document(&data)).await
    }

    async fn create_untitled_document(&self) -> BackendResult<Document> {
        let prefix = self.untitled_document_prefix.clone();
        self.write("create_untitled_document", move |repo| {
            repo.create_untitled_document(&prefix)
        })
        .await
    }

    async fn update_document(
        &self,
        id: &ItemId,
        data: DocumentForUpdate,
    ) -> BackendResult<Document> {
        let id = id.clone();
        self.write("update_document", move |repo| repo.update_document(&id, &data)).await
    }

    async fn delete_document(&self, id: &ItemId) -> BackendResult<Document> {
        let id = id.clone();
        self.write("delete_document", move |repo| repo.delete_document(&id)).await
    }

    async fn list_documents(
        &self,
        filters: &[DocumentFilter],
        options: &ListOptions,
    ) -> BackendResult<Vec<Document>> {
        let filters = filters.to_vec();
        let options = options.clone();
        self.read(move |repo| repo.list_documents(&filters, &options)).await
    }

    async fn get_folder(&self, id: &ItemId) -> BackendResult<DocumentsFolder> {
        let key = id.clone();
        self.read(move |repo| repo.get_folder(&key))
            .await?
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn create_folder(
        &self,
        data: DocumentsFolderForCreate,
    ) -> BackendResult<DocumentsFolder> {
        self.write("create_folder", move |repo| repo.create_folder(&data)).await
    }

    async fn create_unnamed_folder(&self) -> BackendResult<DocumentsFolder> {
        let prefix = self.unnamed_folder_prefix.clone();
        self.write("create_unnamed_folder", move |repo| {
            repo.create_unnamed_folder(&prefix)
        })
        .await
    }

    async fn update_folder(
        &self,
        id: &ItemId,
        data: DocumentsFolderForUpdate,
    ) -> BackendResult<DocumentsFolder> {
        let id = id.clone();
        self.write("update_folder", move |repo| repo.update_folder(&id, &data)).await
    }

    async fn delete_folder(&self, id: &ItemId) -> BackendResult<DocumentsFolder> {
        let id = id.clone();
        self.write("delete_folder", move |repo| repo.delete_folder(&id)).await
    }

    async fn list_folders(
        &self,
        filters: &[FolderFilter],
        options: &ListOptions,
    ) -> BackendResult<Vec<DocumentsFolder>> {
        let filters = filters.to_vec();
        let options = options.clone();
        self.read(move |repo| repo.list_folders(&filters, &options)).await
    }

    async fn list_folders_tree(&self) -> BackendResult<DocumentsFolderTree> {
        self.read(|repo| repo.list_tree()).await
    }

    async fn add_item(&self, folder: &ItemId, item: &ItemId) -> BackendResult<DocumentsFolderTree> {
        let (folder, item) = (folder.clone(), item.clone());
        self.write("add_item", move |repo| {
            repo.add_item(&folder, &item)?;
            repo.list_tree()
        })
        .await
    }

    async fn remove_item(
        &self,
        folder: &ItemId,
        item: &ItemId,
    ) -> BackendResult<DocumentsFolderTree> {
        let (folder, item) = (folder.clone(), item.clone());
        self.write("remove_item", move |repo| {
            repo.remove_item(&folder, &item)?;
            repo.list_tree()
        })
        .await
    }

    async fn move_item(
        &self,
        item: &ItemId,
        from: Option<&ItemId>,
        to: Option<&ItemId>,
    ) -> BackendResult<DocumentsFolderTree> {
        let item = item.clone();
        let from = from.cloned();
        let to = to.cloned();
        self.write("move_item", move |repo| {
            repo.move_item(&item, from.as_ref(), to.as_ref())?;
            repo.list_tree()
        })
        .await
    }
}
