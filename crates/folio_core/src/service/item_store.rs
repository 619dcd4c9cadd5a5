//! Hierarchical item store.
//!
//! # Responsibility
//! - Hold the observable `tree`, `documents`, and `folders` views.
//! - Turn UI intents into boundary commands, then re-read affected views.
//!
//! # Invariants
//! - No local patching: after every mutation the views equal what the
//!   boundary reports, whether the mutation succeeded or not.
//! - Mutation + refresh cycles run one at a time, in issue order.
//! - A refresh never starts before the mutation it follows has resolved.
//! - A refresh is published as one snapshot replacement, after all of its reads.

use crate::backend::{BackendError, BackendResult, ItemBackend};
use crate::model::document::{Document, DocumentForCreate, DocumentForUpdate};
use crate::model::folder::{
    DocumentsFolder, DocumentsFolderChild, DocumentsFolderForCreate, DocumentsFolderForUpdate,
    DocumentsFolderNode, DocumentsFolderTree,
};
use crate::model::item_id::{ItemId, ItemKind};
use crate::model::query::ListOptions;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::{watch, Mutex};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The boundary rejected a command or a refresh read.
    Backend(BackendError),
    /// Update payload kind does not match the target id kind.
    PayloadKindMismatch { id: ItemId, payload: ItemKind },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "{err}"),
            Self::PayloadKindMismatch { id, payload } => {
                write!(f, "cannot apply a {payload} update to {id}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::PayloadKindMismatch { .. } => None,
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

/// Kind-tagged update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUpdate {
    Document(DocumentForUpdate),
    Folder(DocumentsFolderForUpdate),
}

impl ItemUpdate {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Document(_) => ItemKind::Document,
            Self::Folder(_) => ItemKind::DocumentsFolder,
        }
    }
}

/// Everything observers can see, replaced wholesale by refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub tree: DocumentsFolderTree,
    pub documents: Vec<Document>,
    pub folders: Vec<DocumentsFolder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Tree,
    Documents,
    Folders,
}

impl View {
    fn label(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Documents => "documents",
            Self::Folders => "folders",
        }
    }
}

const ALL_VIEWS: &[View] = &[View::Tree, View::Documents, View::Folders];
const DOCUMENT_VIEWS: &[View] = &[View::Tree, View::Documents];
const FOLDER_VIEWS: &[View] = &[View::Tree, View::Folders];
const TREE_VIEW: &[View] = &[View::Tree];

fn views_for(kind: ItemKind) -> &'static [View] {
    match kind {
        ItemKind::Document => DOCUMENT_VIEWS,
        ItemKind::DocumentsFolder => FOLDER_VIEWS,
    }
}

/// Observable store over one persistence boundary.
///
/// Construct once at application start and share by reference (or `Arc`).
pub struct ItemStore<B: ItemBackend> {
    backend: B,
    state: watch::Sender<StoreSnapshot>,
    // Tokio's mutex is fair, so queued operations run in issue order.
    op_lock: Mutex<()>,
}

impl<B: ItemBackend> ItemStore<B> {
    /// Creates a store with empty views. Call `refresh_all` to load them.
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            backend,
            state,
            op_lock: Mutex::new(()),
        }
    }

    /// Creates a store and loads all three views.
    pub async fn load(backend: B) -> StoreResult<Self> {
        let store = Self::new(backend);
        store.refresh_all().await?;
        Ok(store)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Receiver notified after every view replacement.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    pub fn tree(&self) -> DocumentsFolderTree {
        self.state.borrow().tree.clone()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.state.borrow().documents.clone()
    }

    pub fn folders(&self) -> Vec<DocumentsFolder> {
        self.state.borrow().folders.clone()
    }

    pub async fn refresh_all(&self) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        self.refresh(ALL_VIEWS).await
    }

    pub async fn refresh_tree(&self) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        self.refresh(TREE_VIEW).await
    }

    pub async fn refresh_documents(&self) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        self.refresh(&[View::Documents]).await
    }

    pub async fn refresh_folders(&self) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        self.refresh(&[View::Folders]).await
    }

    pub async fn create_folder(&self, name: impl Into<String>) -> StoreResult<DocumentsFolder> {
        let _guard = self.op_lock.lock().await;
        let data = DocumentsFolderForCreate { name: name.into() };
        let result = self.backend.create_folder(data).await;
        self.settle("create_folder", result, FOLDER_VIEWS).await
    }

    /// Creates a placeholder-named folder and returns it for inline rename.
    pub async fn create_unnamed_folder(&self) -> StoreResult<DocumentsFolder> {
        let _guard = self.op_lock.lock().await;
        let result = self.backend.create_unnamed_folder().await;
        self.settle("create_unnamed_folder", result, FOLDER_VIEWS).await
    }

    pub async fn create_document(&self, title: impl Into<String>) -> StoreResult<Document> {
        let _guard = self.op_lock.lock().await;
        let data = DocumentForCreate {
            title: title.into(),
        };
        let result = self.backend.create_document(data).await;
        self.settle("create_document", result, DOCUMENT_VIEWS).await
    }

    /// Creates a placeholder-titled document and returns it for inline rename.
    pub async fn create_untitled_document(&self) -> StoreResult<Document> {
        let _guard = self.op_lock.lock().await;
        let result = self.backend.create_untitled_document().await;
        self.settle("create_untitled_document", result, DOCUMENT_VIEWS).await
    }

    /// Applies `update` to `id`.
    ///
    /// # Errors
    /// - `PayloadKindMismatch` when the payload kind differs from the id kind;
    ///   nothing is sent and nothing is refreshed in that case.
    pub async fn update_item(&self, id: &ItemId, update: ItemUpdate) -> StoreResult<()> {
        if update.kind() != id.kind() {
            return Err(StoreError::PayloadKindMismatch {
                id: id.clone(),
                payload: update.kind(),
            });
        }

        let _guard = self.op_lock.lock().await;
        let result = match update {
            ItemUpdate::Document(data) => self.backend.update_document(id, data).await.map(drop),
            ItemUpdate::Folder(data) => self.backend.update_folder(id, data).await.map(drop),
        };
        self.settle("update_item", result, views_for(id.kind())).await
    }

    /// Renames a document (title) or folder (name) by id kind.
    pub async fn update_item_name(&self, id: &ItemId, name: impl Into<String>) -> StoreResult<()> {
        let name = name.into();
        let update = id.dispatch(
            || ItemUpdate::Document(DocumentForUpdate::title(name.clone())),
            || ItemUpdate::Folder(DocumentsFolderForUpdate::name(name.clone())),
        );
        self.update_item(id, update).await
    }

    /// Deletes an item. The post-delete tree shape is whatever the boundary reports.
    pub async fn delete_item(&self, id: &ItemId) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        let result = match id.kind() {
            ItemKind::Document => self.backend.delete_document(id).await.map(drop),
            ItemKind::DocumentsFolder => self.backend.delete_folder(id).await.map(drop),
        };
        self.settle("delete_item", result, views_for(id.kind())).await
    }

    pub async fn add_item_to_folder(
        &self,
        item_id: &ItemId,
        folder_id: &ItemId,
    ) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        let result = self.backend.add_item(folder_id, item_id).await;
        self.settle_relocation("add_item_to_folder", result).await
    }

    pub async fn remove_item_from_folder(
        &self,
        item_id: &ItemId,
        folder_id: &ItemId,
    ) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        let result = self.backend.remove_item(folder_id, item_id).await;
        self.settle_relocation("remove_item_from_folder", result).await
    }

    /// Relocates an item; `None` for `from` means "currently at root" and
    /// `None` for `to` means "move to root".
    pub async fn move_item_between_folders(
        &self,
        item_id: &ItemId,
        from: Option<&ItemId>,
        to: Option<&ItemId>,
    ) -> StoreResult<()> {
        let _guard = self.op_lock.lock().await;
        let result = self.backend.move_item(item_id, from, to).await;
        self.settle_relocation("move_item_between_folders", result).await
    }

    pub fn is_folder(&self, id: &ItemId) -> bool {
        id.is_folder()
    }

    /// Depth-first lookup in the current tree.
    pub fn find_node_by_id(&self, id: &ItemId) -> Option<DocumentsFolderChild> {
        self.state.borrow().tree.find_node_by_id(id).cloned()
    }

    /// Folder directly containing `id` in the current tree.
    pub fn find_parent_folder(&self, id: &ItemId) -> Option<DocumentsFolderNode> {
        self.state.borrow().tree.find_parent_folder(id).cloned()
    }

    /// Lookup in the flat document list.
    pub fn find_document_by_id(&self, id: &ItemId) -> Option<Document> {
        self.state
            .borrow()
            .documents
            .iter()
            .find(|document| document.id == *id)
            .cloned()
    }

    /// Lookup in the flat folder list.
    pub fn find_folder_by_id(&self, id: &ItemId) -> Option<DocumentsFolder> {
        self.state
            .borrow()
            .folders
            .iter()
            .find(|folder| folder.id == *id)
            .cloned()
    }

    async fn settle<T>(
        &self,
        op: &'static str,
        result: BackendResult<T>,
        views: &[View],
    ) -> StoreResult<T> {
        let refreshed = self.refresh(views).await;
        match result {
            Ok(value) => {
                debug!("event=store_mutation module=store op={op} status=ok");
                refreshed.map(|()| value)
            }
            Err(err) => {
                warn!("event=store_mutation module=store op={op} status=error error={err}");
                Err(err.into())
            }
        }
    }

    async fn settle_relocation(
        &self,
        op: &'static str,
        result: BackendResult<DocumentsFolderTree>,
    ) -> StoreResult<()> {
        match result {
            Ok(tree) => {
                debug!("event=store_mutation module=store op={op} status=ok");
                self.state.send_modify(|snapshot| snapshot.tree = tree);
                Ok(())
            }
            Err(err) => {
                warn!("event=store_mutation module=store op={op} status=error error={err}");
                // Result of the re-read is logged by `refresh`; the rejection wins.
                let _ = self.refresh(TREE_VIEW).await;
                Err(err.into())
            }
        }
    }

    /// Re-reads `views` in order, then publishes every view that loaded in one
    /// replacement. Every view is attempted; the first error is returned.
    async fn refresh(&self, views: &[View]) -> StoreResult<()> {
        let mut fetched = Fetched::default();
        let mut first_error = None;
        for view in views {
            let outcome = match view {
                View::Tree => self.backend.list_folders_tree().await.map(|tree| {
                    fetched.tree = Some(tree);
                }),
                View::Documents => {
                    let options = ListOptions::default();
                    let documents = self.backend.list_documents(&[], &options).await;
                    documents.map(|documents| fetched.documents = Some(documents))
                }
                View::Folders => {
                    let options = ListOptions::default();
                    let folders = self.backend.list_folders(&[], &options).await;
                    folders.map(|folders| fetched.folders = Some(folders))
                }
            };
            match outcome {
                Ok(()) => debug!(
                    "event=store_refresh module=store view={} status=ok",
                    view.label()
                ),
                Err(err) => {
                    warn!(
                        "event=store_refresh module=store view={} status=error error={err}",
                        view.label()
                    );
                    first_error.get_or_insert(err);
                }
            }
        }
        self.publish(fetched);
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn publish(&self, fetched: Fetched) {
        if fetched.is_empty() {
            return;
        }
        self.state.send_modify(|snapshot| {
            if let Some(tree) = fetched.tree {
                snapshot.tree = tree;
            }
            if let Some(documents) = fetched.documents {
                snapshot.documents = documents;
            }
            if let Some(folders) = fetched.folders {
                snapshot.folders = folders;
            }
        });
    }
}

/// Views read by one refresh, held back until all reads have finished.
#[derive(Default)]
struct Fetched {
    tree: Option<DocumentsFolderTree>,
    documents: Option<Vec<Document>>,
    folders: Option<Vec<DocumentsFolder>>,
}

impl Fetched {
    fn is_empty(&self) -> bool {
        self.tree.is_none() && self.documents.is_none() && self.folders.is_none()
    }
}
