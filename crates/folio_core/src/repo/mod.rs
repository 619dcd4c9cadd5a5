//! Repository layer over SQLite storage.
//!
//! # Responsibility
//! - Keep SQL details for documents, folders, and membership edges here.
//! - Return semantic errors (`NotFound`, `CycleDetected`) next to DB errors.
//!
//! # Invariants
//! - Names and titles are trimmed and non-blank before persistence.
//! - Read paths reject invalid persisted ids instead of masking them.

pub mod item_repo;
