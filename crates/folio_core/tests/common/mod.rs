#![allow(dead_code)]

use async_trait::async_trait;
use folio_core::{
    BackendError, BackendResult, Document, DocumentFilter, DocumentForCreate, DocumentForUpdate,
    DocumentsFolder, DocumentsFolderChild, DocumentsFolderForCreate, DocumentsFolderForUpdate,
    DocumentsFolderNode, DocumentsFolderTree, FolderFilter, ItemBackend, ItemId, ListOptions,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

pub const PLACEHOLDER: &str = "Untitled";

/// In-memory boundary with sequential ids, failure injection, and call recording.
///
/// Every command yields once before touching state so concurrent store
/// operations get a chance to interleave.
#[derive(Default)]
pub struct StubBackend {
    state: Mutex<StubState>,
}

#[derive(Default)]
struct StubState {
    next_document: u32,
    next_folder: u32,
    documents: Vec<Document>,
    folders: Vec<DocumentsFolder>,
    children: HashMap<ItemId, Vec<ItemId>>,
    failures: HashSet<&'static str>,
    calls: Vec<&'static str>,
}

pub fn id(value: &str) -> ItemId {
    ItemId::parse(value).unwrap()
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call to `op` reject.
    pub fn fail_next(&self, op: &'static str) {
        self.lock().failures.insert(op);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// What `list_folders_tree` would answer right now.
    pub fn current_tree(&self) -> DocumentsFolderTree {
        self.lock().tree()
    }

    pub fn current_documents(&self) -> Vec<Document> {
        self.lock().documents.clone()
    }

    pub fn current_folders(&self) -> Vec<DocumentsFolder> {
        self.lock().folders.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    async fn enter(&self, op: &'static str) -> BackendResult<()> {
        let rejected = {
            let mut state = self.lock();
            state.calls.push(op);
            state.failures.remove(op)
        };
        tokio::task::yield_now().await;
        if rejected {
            return Err(BackendError::Rejected(format!("{op} failed")));
        }
        Ok(())
    }
}

impl StubState {
    fn parent_of(&self, item: &ItemId) -> Option<ItemId> {
        self.children
            .iter()
            .find(|(_, children)| children.contains(item))
            .map(|(folder, _)| folder.clone())
    }

    fn exists(&self, item: &ItemId) -> bool {
        self.documents.iter().any(|document| document.id == *item)
            || self.folders.iter().any(|folder| folder.id == *item)
    }

    fn detach(&mut self, item: &ItemId) {
        for children in self.children.values_mut() {
            children.retain(|child| child != item);
        }
    }

    fn tree(&self) -> DocumentsFolderTree {
        let nested: HashSet<&ItemId> = self.children.values().flatten().collect();
        let mut roots = Vec::new();
        for folder in self.folders.iter().filter(|folder| !nested.contains(&folder.id)) {
            roots.push(DocumentsFolderChild::DocumentsFolder(self.node(folder)));
        }
        for document in self.documents.iter().filter(|doc| !nested.contains(&doc.id)) {
            roots.push(DocumentsFolderChild::Document(document.clone()));
        }
        DocumentsFolderTree::new(roots)
    }

    fn node(&self, folder: &DocumentsFolder) -> DocumentsFolderNode {
        let children = self
            .children
            .get(&folder.id)
            .into_iter()
            .flatten()
            .filter_map(|child| self.child(child))
            .collect();
        DocumentsFolderNode::new(folder.id.clone(), folder.name.clone()).with_children(children)
    }

    fn child(&self, id: &ItemId) -> Option<DocumentsFolderChild> {
        if let Some(document) = self.documents.iter().find(|document| document.id == *id) {
            return Some(DocumentsFolderChild::Document(document.clone()));
        }
        self.folders
            .iter()
            .find(|folder| folder.id == *id)
            .map(|folder| DocumentsFolderChild::DocumentsFolder(self.node(folder)))
    }

    fn insert_document(&mut self, title: String) -> Document {
        self.next_document += 1;
        let document = Document::new(id(&format!("document:{}", self.next_document)), title);
        self.documents.push(document.clone());
        document
    }

    fn insert_folder(&mut self, name: String) -> DocumentsFolder {
        self.next_folder += 1;
        let folder =
            DocumentsFolder::new(id(&format!("documentsFolder:{}", self.next_folder)), name);
        self.folders.push(folder.clone());
        folder
    }
}

#[async_trait]
impl ItemBackend for StubBackend {
    async fn get_document(&self, id: &ItemId) -> BackendResult<Document> {
        self.enter("get_document").await?;
        self.lock()
            .documents
            .iter()
            .find(|document| document.id == *id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn create_document(&self, data: DocumentForCreate) -> BackendResult<Document> {
        self.enter("create_document").await?;
        if data.title.trim().is_empty() {
            return Err(BackendError::InvalidName);
        }
        Ok(self.lock().insert_document(data.title))
    }

    async fn create_untitled_document(&self) -> BackendResult<Document> {
        self.enter("create_untitled_document").await?;
        Ok(self.lock().insert_document(PLACEHOLDER.to_string()))
    }

    async fn update_document(
        &self,
        id: &ItemId,
        data: DocumentForUpdate,
    ) -> BackendResult<Document> {
        self.enter("update_document").await?;
        let mut state = self.lock();
        let document = state
            .documents
            .iter_mut()
            .find(|document| document.id == *id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;
        if let Some(title) = data.title {
            document.title = title;
        }
        if data.body.is_some() {
            document.body = data.body;
        }
        if data.tags.is_some() {
            document.tags = data.tags;
        }
        if data.categories.is_some() {
            document.categories = data.categories;
        }
        Ok(document.clone())
    }

    async fn delete_document(&self, id: &ItemId) -> BackendResult<Document> {
        self.enter("delete_document").await?;
        let mut state = self.lock();
        let index = state
            .documents
            .iter()
            .position(|document| document.id == *id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;
        state.detach(id);
        Ok(state.documents.remove(index))
    }

    async fn list_documents(
        &self,
        _filters: &[DocumentFilter],
        _options: &ListOptions,
    ) -> BackendResult<Vec<Document>> {
        self.enter("list_documents").await?;
        Ok(self.lock().documents.clone())
    }

    async fn get_folder(&self, id: &ItemId) -> BackendResult<DocumentsFolder> {
        self.enter("get_folder").await?;
        self.lock()
            .folders
            .iter()
            .find(|folder| folder.id == *id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn create_folder(
        &self,
        data: DocumentsFolderForCreate,
    ) -> BackendResult<DocumentsFolder> {
        self.enter("create_folder").await?;
        if data.name.trim().is_empty() {
            return Err(BackendError::InvalidName);
        }
        Ok(self.lock().insert_folder(data.name))
    }

    async fn create_unnamed_folder(&self) -> BackendResult<DocumentsFolder> {
        self.enter("create_unnamed_folder").await?;
        Ok(self.lock().insert_folder(PLACEHOLDER.to_string()))
    }

    async fn update_folder(
        &self,
        id: &ItemId,
        data: DocumentsFolderForUpdate,
    ) -> BackendResult<DocumentsFolder> {
        self.enter("update_folder").await?;
        let mut state = self.lock();
        let folder = state
            .folders
            .iter_mut()
            .find(|folder| folder.id == *id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;
        if let Some(name) = data.name {
            folder.name = name;
        }
        Ok(folder.clone())
    }

    async fn delete_folder(&self, id: &ItemId) -> BackendResult<DocumentsFolder> {
        self.enter("delete_folder").await?;
        let mut state = self.lock();
        let index = state
            .folders
            .iter()
            .position(|folder| folder.id == *id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;
        state.detach(id);
        state.children.remove(id);
        Ok(state.folders.remove(index))
    }

    async fn list_folders(
        &self,
        _filters: &[FolderFilter],
        _options: &ListOptions,
    ) -> BackendResult<Vec<DocumentsFolder>> {
        self.enter("list_folders").await?;
        Ok(self.lock().folders.clone())
    }

    async fn list_folders_tree(&self) -> BackendResult<DocumentsFolderTree> {
        self.enter("list_folders_tree").await?;
        Ok(self.lock().tree())
    }

    async fn add_item(&self, folder: &ItemId, item: &ItemId) -> BackendResult<DocumentsFolderTree> {
        self.enter("add_item").await?;
        let mut state = self.lock();
        if !state.exists(folder) || !state.exists(item) {
            return Err(BackendError::Rejected("unknown item".to_string()));
        }
        if state.parent_of(item).is_some() {
            return Err(BackendError::Rejected("already nested".to_string()));
        }
        state
            .children
            .entry(folder.clone())
            .or_default()
            .push(item.clone());
        Ok(state.tree())
    }

    async fn remove_item(
        &self,
        folder: &ItemId,
        item: &ItemId,
    ) -> BackendResult<DocumentsFolderTree> {
        self.enter("remove_item").await?;
        let mut state = self.lock();
        if state.parent_of(item).as_ref() != Some(folder) {
            return Err(BackendError::Rejected("not in folder".to_string()));
        }
        state.detach(item);
        Ok(state.tree())
    }

    async fn move_item(
        &self,
        item: &ItemId,
        from: Option<&ItemId>,
        to: Option<&ItemId>,
    ) -> BackendResult<DocumentsFolderTree> {
        self.enter("move_item").await?;
        let mut state = self.lock();
        if !state.exists(item) || state.parent_of(item).as_ref() != from {
            return Err(BackendError::Rejected("stale source".to_string()));
        }
        if let Some(to) = to {
            if !state.exists(to) {
                return Err(BackendError::Rejected("unknown target".to_string()));
            }
        }
        state.detach(item);
        if let Some(to) = to {
            state
                .children
                .entry(to.clone())
                .or_default()
                .push(item.clone());
        }
        Ok(state.tree())
    }
}
