//! Catalog gateway: cache-aside orchestration of transport + normalizer.
//!
//! Every operation follows the same shape: compute a deterministic cache
//! key, return a fresh cache hit without touching the transport, otherwise
//! fetch, normalize, cache the success and return. Errors propagate
//! unmodified and are never cached.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use reel_core::error::{GatewayError, GatewayResult};
use reel_core::types::{CatalogItem, MediaType, Page, TimeWindow};

use crate::api::{RawCatalogItem, RawPage};
use crate::cache::{CachedValue, CatalogCache};
use crate::normalize::normalize;
use crate::transport::Transport;

/// Seam between the gateway and the HTTP layer, so tests can substitute a
/// fake transport and count invocations.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Perform an upstream GET for `path` with extra query parameters
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> GatewayResult<Value>;
}

#[async_trait]
impl Fetch for Transport {
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> GatewayResult<Value> {
        Transport::get_json(self, path, params).await
    }
}

/// Operation-specific cache TTLs, a configuration input to the gateway
#[derive(Debug, Clone)]
pub struct CacheTtls {
    pub trending: Duration,
    pub recommendations: Duration,
    pub search: Duration,
    pub details: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            trending: Duration::from_secs(60),
            recommendations: Duration::from_secs(60),
            search: Duration::from_secs(60),
            details: Duration::from_secs(86_400),
        }
    }
}

/// Outcome summary of a cache warm-up run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmupReport {
    /// Operations that completed and populated the cache
    pub warmed: u32,
    /// Operations that failed; failures never abort the remaining steps
    pub failed: u32,
}

/// The catalog gateway.
///
/// Designed for concurrent use: multiple workers may share one gateway
/// through an `Arc`. The cache tolerates concurrent identical misses (at
/// most duplicate upstream calls, last write wins); nothing here blocks
/// other operations while one call backs off.
pub struct CatalogGateway<F: Fetch> {
    fetch: F,
    cache: CatalogCache,
    ttls: CacheTtls,
}

impl<F: Fetch> CatalogGateway<F> {
    /// Create a gateway over a transport with the given TTL configuration
    pub fn new(fetch: F, ttls: CacheTtls) -> Self {
        Self {
            fetch,
            cache: CatalogCache::new(),
            ttls,
        }
    }

    /// Access the underlying cache (stats, cleanup)
    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Trending titles for a media type and time window
    pub async fn trending(
        &self,
        media_type: MediaType,
        time_window: TimeWindow,
        page: u32,
    ) -> GatewayResult<Page> {
        let page = page.max(1);
        let key = keys::trending(media_type, time_window, page);
        if let Some(hit) = self.cached_page(&key) {
            return Ok(hit);
        }

        let payload = self
            .fetch
            .get_json(
                &format!("/trending/{}/{}", media_type, time_window),
                &[("page", page.to_string())],
            )
            .await?;
        let result = decode_page(payload, page)?;
        self.cache
            .set(key, CachedValue::Page(result.clone()), self.ttls.trending);
        Ok(result)
    }

    /// Recommendations for a given movie id
    pub async fn recommendations(&self, movie_id: i64, page: u32) -> GatewayResult<Page> {
        let page = page.max(1);
        let key = keys::recommendations(movie_id, page);
        if let Some(hit) = self.cached_page(&key) {
            return Ok(hit);
        }

        let payload = self
            .fetch
            .get_json(
                &format!("/movie/{}/recommendations", movie_id),
                &[("page", page.to_string())],
            )
            .await?;
        let result = decode_page(payload, page)?;
        self.cache.set(
            key,
            CachedValue::Page(result.clone()),
            self.ttls.recommendations,
        );
        Ok(result)
    }

    /// Full details for a single movie
    pub async fn details(&self, movie_id: i64) -> GatewayResult<CatalogItem> {
        let key = keys::details(movie_id);
        if let Some(CachedValue::Item(hit)) = self.cache.get(&key) {
            debug!(key, "cache hit");
            return Ok(hit);
        }

        let payload = self
            .fetch
            .get_json(&format!("/movie/{}", movie_id), &[])
            .await?;
        let result = decode_item(payload)?;
        self.cache
            .set(key, CachedValue::Item(result.clone()), self.ttls.details);
        Ok(result)
    }

    /// Title search. A blank query fails fast with `MissingQuery` before
    /// touching cache or network.
    pub async fn search(&self, query: &str, page: u32) -> GatewayResult<Page> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GatewayError::MissingQuery);
        }

        let page = page.max(1);
        let key = keys::search(query, page);
        if let Some(hit) = self.cached_page(&key) {
            return Ok(hit);
        }

        let payload = self
            .fetch
            .get_json(
                "/search/movie",
                &[
                    ("query", query.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        let result = decode_page(payload, page)?;
        self.cache
            .set(key, CachedValue::Page(result.clone()), self.ttls.search);
        Ok(result)
    }

    /// Pre-warm the trending cache for the first `pages` pages.
    ///
    /// Warm-up is an ordinary caller of the public operations: it goes
    /// through the same cache-aside path as foreground traffic, and a
    /// failing page never aborts the remaining ones.
    pub async fn warm_trending(
        &self,
        media_type: MediaType,
        time_window: TimeWindow,
        pages: u32,
    ) -> WarmupReport {
        let mut report = WarmupReport::default();
        for page in 1..=pages.max(1) {
            match self.trending(media_type, time_window, page).await {
                Ok(_) => {
                    info!(%media_type, %time_window, page, "warmed trending cache");
                    report.warmed += 1;
                }
                Err(error) => {
                    warn!(%media_type, %time_window, page, %error, "trending warm-up failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Pre-warm per-movie details for a list of ids
    pub async fn warm_details(&self, movie_ids: &[i64]) -> WarmupReport {
        let mut report = WarmupReport::default();
        for &movie_id in movie_ids {
            match self.details(movie_id).await {
                Ok(_) => {
                    info!(movie_id, "warmed details cache");
                    report.warmed += 1;
                }
                Err(error) => {
                    warn!(movie_id, %error, "details warm-up failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn cached_page(&self, key: &str) -> Option<Page> {
        match self.cache.get(key) {
            Some(CachedValue::Page(page)) => {
                debug!(key, "cache hit");
                Some(page)
            }
            _ => None,
        }
    }
}

/// Deterministic cache keys, collision-free across operations
mod keys {
    use reel_core::types::{MediaType, TimeWindow};

    pub fn trending(media_type: MediaType, time_window: TimeWindow, page: u32) -> String {
        format!("trending:{}:{}:page:{}", media_type, time_window, page)
    }

    pub fn recommendations(movie_id: i64, page: u32) -> String {
        format!("recommendations:{}:p{}", movie_id, page)
    }

    pub fn details(movie_id: i64) -> String {
        format!("movie:{}:details", movie_id)
    }

    pub fn search(query: &str, page: u32) -> String {
        format!("search:{}:p{}", query.trim().to_lowercase(), page)
    }
}

fn decode_page(payload: Value, request_page: u32) -> GatewayResult<Page> {
    let raw: RawPage = serde_json::from_value(payload)
        .map_err(|_| GatewayError::InvalidPayload { status: 200 })?;
    Ok(Page {
        page: raw.page.unwrap_or(request_page),
        total_pages: raw.total_pages.unwrap_or(1).max(1),
        results: raw.results.iter().map(normalize).collect(),
    })
}

fn decode_item(payload: Value) -> GatewayResult<CatalogItem> {
    let raw: RawCatalogItem = serde_json::from_value(payload)
        .map_err(|_| GatewayError::InvalidPayload { status: 200 })?;
    Ok(normalize(&raw))
}

#[cfg(test)]
mod tests;
