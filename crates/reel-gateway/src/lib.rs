//! Resilient catalog gateway for Reelgate.
//!
//! This crate mediates every lookup against the rate-limited upstream movie
//! catalog. It layers four pieces, leaves first:
//!
//! - `normalize`: converts heterogeneous upstream payloads into the stable
//!   DTOs of `reel-core`
//! - `cache`: a concurrent TTL store consulted before and populated after
//!   upstream calls (cache-aside)
//! - `transport`: an HTTP client wrapper with bounded retry, exponential
//!   backoff and explicit rate-limit classification
//! - `catalog`: the gateway orchestrating the three for each logical
//!   operation (trending, recommendations, details, search)

pub mod api;
pub mod cache;
pub mod catalog;
pub mod normalize;
pub mod transport;

// Re-export main types
pub use cache::{CacheStats, CachedValue, CatalogCache};
pub use catalog::{CacheTtls, CatalogGateway, Fetch, WarmupReport};
pub use normalize::normalize;
pub use transport::{RetryPolicy, Transport};

pub use reel_core::error::{GatewayError, GatewayResult};
