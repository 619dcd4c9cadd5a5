//! Closed filter and paging options for flat list calls.
//!
//! # Invariants
//! - Filters combine with AND.
//! - `limit == Some(0)` is never a valid request.

use serde::{Deserialize, Serialize};

/// Predicate over documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DocumentFilter {
    /// Case-sensitive substring match on title.
    TitleContains(String),
    /// Case-sensitive substring match on body.
    BodyContains(String),
    /// Exact membership in `tags`.
    HasTag(String),
    /// Exact membership in `categories`.
    HasCategory(String),
}

/// Predicate over folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FolderFilter {
    NameContains(String),
}

/// Result ordering for list calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    #[default]
    CreatedAsc,
    CreatedDesc,
    /// Title for documents, name for folders.
    TitleAsc,
}

/// Paging and ordering for list calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub order: ListOrder,
}

impl ListOptions {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_order(mut self, order: ListOrder) -> Self {
        self.order = order;
        self
    }

    /// Checks the options before they reach storage.
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == Some(0) {
            return Err("list limit must be greater than zero".to_string());
        }
        Ok(())
    }
}
