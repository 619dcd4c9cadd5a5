//! Folder model and the documents forest.
//!
//! # Responsibility
//! - Define flat folder records and their recursive tree-view counterparts.
//! - Provide read-only traversal over the forest returned by the boundary.
//!
//! # Invariants
//! - An item id appears at most once across `roots` and all nested children.
//!   The boundary owns this invariant; traversal does not re-check it.
//! - `roots` order is display order and traversal is pre-order over it.
//! - `children: None` traverses like an empty list but serializes as absent.

use crate::model::document::Document;
use crate::model::item_id::{ItemId, ItemKind};
use serde::{Deserialize, Serialize};

/// Flat folder record, owned by the folder list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsFolder {
    pub id: ItemId,
    #[serde(default)]
    pub ctime: String,
    pub name: String,
}

impl DocumentsFolder {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            ctime: String::new(),
            name: name.into(),
        }
    }
}

/// Folder as it appears inside the forest, with its subtree embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsFolderNode {
    pub id: ItemId,
    #[serde(default)]
    pub ctime: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocumentsFolderChild>>,
}

impl DocumentsFolderNode {
    /// Creates a node with an empty (present) child list.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            ctime: String::new(),
            name: name.into(),
            children: Some(Vec::new()),
        }
    }

    pub fn with_children(mut self, children: Vec<DocumentsFolderChild>) -> Self {
        self.children = Some(children);
        self
    }

    /// Child sequence; a missing list reads as empty.
    pub fn children(&self) -> &[DocumentsFolderChild] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Flat record view of this node, without children.
    pub fn to_folder(&self) -> DocumentsFolder {
        DocumentsFolder {
            id: self.id.clone(),
            ctime: self.ctime.clone(),
            name: self.name.clone(),
        }
    }
}

/// One entry in a folder's (or the forest's) ordered child sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentsFolderChild {
    Document(Document),
    DocumentsFolder(DocumentsFolderNode),
}

impl DocumentsFolderChild {
    pub fn id(&self) -> &ItemId {
        match self {
            Self::Document(document) => &document.id,
            Self::DocumentsFolder(folder) => &folder.id,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(document) => Some(document),
            Self::DocumentsFolder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&DocumentsFolderNode> {
        match self {
            Self::Document(_) => None,
            Self::DocumentsFolder(folder) => Some(folder),
        }
    }
}

/// Forest of root-level items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsFolderTree {
    pub roots: Vec<DocumentsFolderChild>,
}

impl DocumentsFolderTree {
    pub fn new(roots: Vec<DocumentsFolderChild>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of items across all depths.
    pub fn len(&self) -> usize {
        self.item_ids().len()
    }

    /// Finds an item by id with a depth-first, pre-order walk.
    ///
    /// Only nodes of the id's kind can match, but folders of either kind are
    /// descended into. Returns `None` for an empty forest or no match.
    pub fn find_node_by_id(&self, id: &ItemId) -> Option<&DocumentsFolderChild> {
        if self.roots.is_empty() {
            return None;
        }
        find_in(&self.roots, id)
    }

    /// Returns the folder that directly contains `id`.
    ///
    /// Root-level and unknown items yield `None`. A folder is never reported
    /// as its own parent.
    pub fn find_parent_folder(&self, id: &ItemId) -> Option<&DocumentsFolderNode> {
        if self.roots.is_empty() {
            return None;
        }
        self.roots
            .iter()
            .filter_map(DocumentsFolderChild::as_folder)
            .find_map(|folder| parent_in(folder, id))
    }

    /// Parent id of `id`, if it is nested.
    pub fn parent_of(&self, id: &ItemId) -> Option<&ItemId> {
        self.find_parent_folder(id).map(|folder| &folder.id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.find_node_by_id(id).is_some()
    }

    /// Every item id in pre-order.
    pub fn item_ids(&self) -> Vec<&ItemId> {
        let mut ids = Vec::new();
        collect_ids(&self.roots, &mut ids);
        ids
    }
}

fn find_in<'a>(
    children: &'a [DocumentsFolderChild],
    id: &ItemId,
) -> Option<&'a DocumentsFolderChild> {
    for child in children {
        match child {
            DocumentsFolderChild::Document(document) => {
                if id.kind() == ItemKind::Document && document.id == *id {
                    return Some(child);
                }
            }
            DocumentsFolderChild::DocumentsFolder(folder) => {
                if id.kind() == ItemKind::DocumentsFolder && folder.id == *id {
                    return Some(child);
                }
                if let Some(found) = find_in(folder.children(), id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn parent_in<'a>(folder: &'a DocumentsFolderNode, id: &ItemId) -> Option<&'a DocumentsFolderNode> {
    for child in folder.children() {
        if child.id() == id {
            return Some(folder);
        }
        if let DocumentsFolderChild::DocumentsFolder(nested) = child {
            if let Some(parent) = parent_in(nested, id) {
                return Some(parent);
            }
        }
    }
    None
}

fn collect_ids<'a>(children: &'a [DocumentsFolderChild], ids: &mut Vec<&'a ItemId>) {
    for child in children {
        ids.push(child.id());
        if let DocumentsFolderChild::DocumentsFolder(folder) = child {
            collect_ids(folder.children(), ids);
        }
    }
}

/// Create payload for folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsFolderForCreate {
    pub name: String,
}

/// Partial update payload for folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsFolderForUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DocumentsFolderForUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
