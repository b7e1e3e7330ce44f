//! # reel-core
//!
//! Core types and errors shared across all Reelgate crates.
//!
//! This crate provides:
//! - Normalized catalog DTOs (`CatalogItem`, `Page`) that insulate callers
//!   from the upstream catalog schema
//! - `MediaType` and `TimeWindow` request parameters
//! - The `Credential` slot persisted by the CLI
//! - `GatewayError` for unified, value-based error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Normalized data types exchanged between components
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{GatewayError, GatewayResult};
pub use types::{CatalogItem, Credential, MediaType, Page, TimeWindow};
