//! Persistence boundary consumed by the item store.
//!
//! # Responsibility
//! - Describe every command the store may issue to durable storage.
//! - Keep the store independent of how (and where) items are persisted.
//!
//! # Invariants
//! - The boundary is the sole authority for item state; the store re-reads
//!   it after every mutation.
//! - Relocation commands return the resulting forest.
//! - No retry or timeout policy is applied on either side of this trait.

use crate::model::document::{Document, DocumentForCreate, DocumentForUpdate};
use crate::model::folder::{
    DocumentsFolder, DocumentsFolderForCreate, DocumentsFolderForUpdate, DocumentsFolderTree,
};
use crate::model::item_id::ItemId;
use crate::model::query::{DocumentFilter, FolderFilter, ListOptions};
use crate::repo::item_repo::RepoError;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteBackend;

pub type BackendResult<T> = Result<T, BackendError>;

/// Rejection returned by a boundary command.
#[derive(Debug)]
pub enum BackendError {
    /// Target item does not exist.
    NotFound(ItemId),
    /// Title or name is blank.
    InvalidName,
    /// List filters/options were rejected.
    InvalidQuery(String),
    /// Storage-level failure or rule violation.
    Repo(RepoError),
    /// Opaque rejection from a non-SQLite boundary.
    Rejected(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::InvalidQuery(message) => write!(f, "invalid list query: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Rejected(message) => write!(f, "request rejected: {message}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BackendError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::InvalidName => Self::InvalidName,
            RepoError::InvalidQuery(message) => Self::InvalidQuery(message),
            other => Self::Repo(other),
        }
    }
}

/// Command surface for documents, folders, and the forest.
#[async_trait]
pub trait ItemBackend: Send + Sync {
    async fn get_document(&self, id: &ItemId) -> BackendResult<Document>;
    async fn create_document(&self, data: DocumentForCreate) -> BackendResult<Document>;
    /// Creates a document with a boundary-assigned placeholder title.
    async fn create_untitled_document(&self) -> BackendResult<Document>;
    async fn update_document(
        &self,
        id: &ItemId,
        data: DocumentForUpdate,
    ) -> BackendResult<Document>;
    async fn delete_document(&self, id: &ItemId) -> BackendResult<Document>;
    async fn list_documents(
        &self,
        filters: &[DocumentFilter],
        options: &ListOptions,
    ) -> BackendResult<Vec<Document>>;

    async fn get_folder(&self, id: &ItemId) -> BackendResult<DocumentsFolder>;
    async fn create_folder(&self, data: DocumentsFolderForCreate)
        -> BackendResult<DocumentsFolder>;
    /// Creates a folder with a boundary-assigned placeholder name.
    async fn create_unnamed_folder(&self) -> BackendResult<DocumentsFolder>;
    async fn update_folder(
        &self,
        id: &ItemId,
        data: DocumentsFolderForUpdate,
    ) -> BackendResult<DocumentsFolder>;
    /// Deletes a folder. What happens to its descendants is boundary policy.
    async fn delete_folder(&self, id: &ItemId) -> BackendResult<DocumentsFolder>;
    async fn list_folders(
        &self,
        filters: &[FolderFilter],
        options: &ListOptions,
    ) -> BackendResult<Vec<DocumentsFolder>>;

    async fn list_folders_tree(&self) -> BackendResult<DocumentsFolderTree>;
    async fn add_item(&self, folder: &ItemId, item: &ItemId) -> BackendResult<DocumentsFolderTree>;
    async fn remove_item(
        &self,
        folder: &ItemId,
        item: &ItemId,
    ) -> BackendResult<DocumentsFolderTree>;
    /// `from`/`to` of `None` mean root level.
    async fn move_item(
        &self,
        item: &ItemId,
        from: Option<&ItemId>,
        to: Option<&ItemId>,
    ) -> BackendResult<DocumentsFolderTree>;
}
