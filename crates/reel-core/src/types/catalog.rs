//! Normalized catalog DTOs.
//!
//! These are the only shapes the gateway hands to its callers. They carry no
//! raw upstream-only fields, and a value that reaches a caller never encodes
//! a partial or error payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single normalized catalog entry (movie or TV item).
///
/// Produced only by the gateway's normalizer and immutable once built. The
/// `id` is the upstream identifier and is not unique across media types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub overview: String,
    pub score: f64,
}

/// One page of normalized catalog results, preserving upstream order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number, 1-based
    pub page: u32,
    /// Total pages reported by upstream, trusted as-is
    pub total_pages: u32,
    /// Results in upstream order
    pub results: Vec<CatalogItem>,
}

impl Page {
    /// Number of results on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check whether this page carries no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
