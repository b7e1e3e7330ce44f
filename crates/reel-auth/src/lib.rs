//! Credential lifecycle management for Reelgate.
//!
//! This crate owns the single bearer-credential slot used by the CLI when
//! talking to the protected backend:
//!
//! - `store`: the persisted single-slot token file, overwritten wholesale on
//!   renewal and removed on deliberate invalidation
//! - `manager`: acquisition, empirical validation, transparent renewal with
//!   a retry-once-on-401 rule, and single-flight coordination so concurrent
//!   callers never race duplicate login exchanges

pub mod manager;
pub mod store;

// Re-export main types
pub use manager::{BackendSettings, CredentialManager};
pub use store::TokenStore;

pub use reel_core::error::{GatewayError, GatewayResult};
