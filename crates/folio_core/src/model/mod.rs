//! Domain model for the documents workspace.
//!
//! # Responsibility
//! - Define documents, folders, the forest view, and their write payloads.
//! - Keep identity parsing and kind dispatch in one place.
//!
//! # Invariants
//! - Every item is identified by a kind-tagged `ItemId`.
//! - Tree nodes are views over flat records with the same identity.

pub mod document;
pub mod folder;
pub mod item_id;
pub mod query;
