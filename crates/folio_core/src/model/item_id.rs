//! Kind-tagged item identifiers.
//!
//! # Responsibility
//! - Parse and validate `"<kind>:<key>"` identifiers for documents and folders.
//! - Dispatch behavior by item kind without tree traversal.
//!
//! # Invariants
//! - The prefix before the first `:` is exactly `document` or `documentsFolder`.
//! - An `ItemId` value is always valid; invalid strings never become `ItemId`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const DOCUMENT_PREFIX: &str = "document";
const FOLDER_PREFIX: &str = "documentsFolder";

/// Item category encoded in the identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    /// Leaf item with a title and optional body.
    Document,
    /// Internal item that owns an ordered child sequence.
    DocumentsFolder,
}

impl ItemKind {
    /// Returns the identifier prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Document => DOCUMENT_PREFIX,
            Self::DocumentsFolder => FOLDER_PREFIX,
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Errors from identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemIdError {
    /// Identifier has no `:` separator.
    MissingSeparator(String),
    /// Prefix before the first `:` is not a known item kind.
    InvalidKind(String),
    /// Nothing follows the `:` separator.
    EmptyKey(String),
}

impl Display for ItemIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSeparator(value) => {
                write!(f, "item id `{value}` is missing the `<kind>:` prefix")
            }
            Self::InvalidKind(value) => write!(
                f,
                "item id `{value}` must be one of kinds `{DOCUMENT_PREFIX}` or `{FOLDER_PREFIX}`"
            ),
            Self::EmptyKey(value) => write!(f, "item id `{value}` has an empty key"),
        }
    }
}

impl Error for ItemIdError {}

/// Resolves the item kind from a raw identifier string.
///
/// # Errors
/// - `InvalidKind` when the prefix is neither `document` nor `documentsFolder`.
/// - `MissingSeparator` when there is no prefix at all.
pub fn kind_of(id: &str) -> Result<ItemKind, ItemIdError> {
    let Some((prefix, _)) = id.split_once(':') else {
        return Err(ItemIdError::MissingSeparator(id.to_string()));
    };
    match prefix {
        DOCUMENT_PREFIX => Ok(ItemKind::Document),
        FOLDER_PREFIX => Ok(ItemKind::DocumentsFolder),
        _ => Err(ItemIdError::InvalidKind(id.to_string())),
    }
}

/// Invokes the callback registered for the id's kind.
///
/// A missing callback for the matching kind is a no-op and yields `None`.
pub fn dispatch_by_kind<T, D, F>(
    id: &ItemId,
    on_document: Option<D>,
    on_folder: Option<F>,
) -> Option<T>
where
    D: FnOnce() -> T,
    F: FnOnce() -> T,
{
    match id.kind() {
        ItemKind::Document => on_document.map(|callback| callback()),
        ItemKind::DocumentsFolder => on_folder.map(|callback| callback()),
    }
}

/// Validated `"<kind>:<key>"` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId {
    raw: String,
    kind: ItemKind,
}

impl ItemId {
    /// Parses and validates an identifier.
    pub fn parse(value: impl Into<String>) -> Result<Self, ItemIdError> {
        let raw = value.into();
        let kind = kind_of(&raw)?;
        if raw.len() == kind.prefix().len() + 1 {
            return Err(ItemIdError::EmptyKey(raw));
        }
        Ok(Self { raw, kind })
    }

    /// Builds an identifier from a kind and a key.
    pub fn from_parts(kind: ItemKind, key: &str) -> Result<Self, ItemIdError> {
        Self::parse(format!("{}:{key}", kind.prefix()))
    }

    /// Mints a fresh document id with a random key.
    pub fn new_document() -> Self {
        Self::minted(ItemKind::Document)
    }

    /// Mints a fresh folder id with a random key.
    pub fn new_folder() -> Self {
        Self::minted(ItemKind::DocumentsFolder)
    }

    fn minted(kind: ItemKind) -> Self {
        Self {
            raw: format!("{}:{}", kind.prefix(), Uuid::new_v4().simple()),
            kind,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::DocumentsFolder
    }

    pub fn is_document(&self) -> bool {
        self.kind == ItemKind::Document
    }

    /// Part after the kind prefix.
    pub fn key(&self) -> &str {
        &self.raw[self.kind.prefix().len() + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Invokes exactly one of the two callbacks by kind and returns its result.
    pub fn dispatch<T>(
        &self,
        on_document: impl FnOnce() -> T,
        on_folder: impl FnOnce() -> T,
    ) -> T {
        match self.kind {
            ItemKind::Document => on_document(),
            ItemKind::DocumentsFolder => on_folder(),
        }
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ItemIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.raw
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

#[cfg(test)]
mod tests {
    use super::{dispatch_by_kind, kind_of, ItemId, ItemIdError, ItemKind};

    #[test]
    fn kind_of_splits_on_first_separator_only() {
        assert_eq!(
            kind_of("document:a:b").expect("nested colons stay in the key"),
            ItemKind::Document
        );
        let id = ItemId::parse("documentsFolder:x:y").expect("valid folder id");
        assert_eq!(id.key(), "x:y");
    }

    #[test]
    fn parse_rejects_case_variants_and_empty_keys() {
        assert!(matches!(
            ItemId::parse("Document:1"),
            Err(ItemIdError::InvalidKind(_))
        ));
        assert!(matches!(
            ItemId::parse("document:"),
            Err(ItemIdError::EmptyKey(_))
        ));
        assert!(matches!(
            ItemId::parse("document"),
            Err(ItemIdError::MissingSeparator(_))
        ));
    }

    #[test]
    fn dispatch_by_kind_skips_missing_callback() {
        let folder = ItemId::parse("documentsFolder:1").expect("valid folder id");
        let result: Option<&str> =
            dispatch_by_kind(&folder, Some(|| "doc"), None::<fn() -> &'static str>);
        assert_eq!(result, None);

        let doc = ItemId::parse("document:1").expect("valid document id");
        let result = dispatch_by_kind(&doc, Some(|| "doc"), Some(|| "folder"));
        assert_eq!(result, Some("doc"));
    }

    #[test]
    fn minted_ids_carry_their_kind() {
        let doc = ItemId::new_document();
        let folder = ItemId::new_folder();
        assert!(doc.as_str().starts_with("document:"));
        assert!(folder.is_folder());
        assert_ne!(doc.key(), folder.key());
    }

    #[test]
    fn serde_uses_plain_string_form() {
        let id = ItemId::parse("document:42").expect("valid document id");
        let json = serde_json::to_string(&id).expect("id should serialize");
        assert_eq!(json, "\"document:42\"");
        let err = serde_json::from_str::<ItemId>("\"tag:1\"").expect_err("bad kind");
        assert!(err.to_string().contains("must be one of kinds"));
    }
}
