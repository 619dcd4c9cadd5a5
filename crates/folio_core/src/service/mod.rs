//! Use-case services over the persistence boundary.
//!
//! # Responsibility
//! - Turn UI intents into boundary commands plus view refreshes.
//! - Keep presentation layers decoupled from storage details.

pub mod item_store;
