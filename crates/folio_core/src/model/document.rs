//! Document model and write payloads.
//!
//! # Invariants
//! - `Document::id` always has kind `ItemKind::Document`.
//! - `body` is opaque serialized editor content; core never inspects it.

use crate::model::item_id::ItemId;
use serde::{Deserialize, Serialize};

/// Leaf item in the documents workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: ItemId,
    /// Creation timestamp as reported by the boundary.
    #[serde(default)]
    pub ctime: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl Document {
    /// Creates a document with only identity and title populated.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            ctime: String::new(),
            title: title.into(),
            body: None,
            tags: None,
            categories: None,
        }
    }
}

/// Create payload for documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentForCreate {
    pub title: String,
}

/// Partial update payload for documents. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentForUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl DocumentForUpdate {
    /// Update that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tags.is_none()
            && self.categories.is_none()
    }
}
