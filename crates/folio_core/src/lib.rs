//! Core domain logic for the Folio documents workspace.
//! This crate owns item identity, the folder forest, and the observable store.

pub mod backend;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use backend::{BackendError, BackendResult, ItemBackend, SqliteBackend};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::document::{Document, DocumentForCreate, DocumentForUpdate};
pub use model::folder::{
    DocumentsFolder, DocumentsFolderChild, DocumentsFolderForCreate, DocumentsFolderForUpdate,
    DocumentsFolderNode, DocumentsFolderTree,
};
pub use model::item_id::{dispatch_by_kind, kind_of, ItemId, ItemIdError, ItemKind};
pub use model::query::{DocumentFilter, FolderFilter, ListOptions, ListOrder};
pub use repo::item_repo::{RepoError, RepoResult, SqliteItemRepository};
pub use service::item_store::{ItemStore, ItemUpdate, StoreError, StoreResult, StoreSnapshot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
