//! Core data types for the Reelgate gateway.
//!
//! This module provides the fundamental types exchanged between components:
//! - Normalized catalog DTOs shielding callers from upstream schema changes
//! - Request parameter enums for trending lookups
//! - The persisted credential slot

pub mod catalog;
pub mod credential;
pub mod media;

// Re-export all public types
pub use catalog::{CatalogItem, Page};
pub use credential::Credential;
pub use media::{MediaType, TimeWindow};
