//! Raw upstream catalog payload types.
//!
//! These structs mirror what the upstream service actually sends and exist
//! only inside the gateway; nothing outside this crate sees them. Movie and
//! TV payloads spell some fields differently (`title`/`name`,
//! `release_date`/`first_air_date`), so both spellings are kept and the
//! normalizer resolves the fallbacks. Aliases also accept already-normalized
//! field names, which makes normalization idempotent over its own output.

use serde::Deserialize;

/// One raw catalog entry as upstream serializes it
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogItem {
    /// Upstream identifier, the only field required of any payload
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "poster")]
    pub poster_path: Option<String>,
    #[serde(default, alias = "backdrop")]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, alias = "score")]
    pub vote_average: Option<f64>,
}

/// One raw list payload (trending, recommendations, search)
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub results: Vec<RawCatalogItem>,
}
