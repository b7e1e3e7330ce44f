//! Cache-aside store with TTL support.
//!
//! The gateway checks this store before every upstream call and populates it
//! after every successful one; errors are never cached. Concurrent `get`/
//! `set` are safe, writers are not serialized (last-write-wins on identical
//! keys), and concurrent identical misses may each reach upstream once —
//! accepted behavior, not deduplicated.

use std::time::{Duration, SystemTime};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use reel_core::types::{CatalogItem, Page};

/// A cached gateway value: one page of results or a single detail item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CachedValue {
    Page(Page),
    Item(CatalogItem),
}

/// Cache entry with TTL
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cached value
    pub value: CachedValue,
    /// When the entry was stored
    pub stored_at: SystemTime,
    /// Time-to-live duration
    pub ttl: Duration,
}

impl CacheEntry {
    /// Create a cache entry with the given TTL
    pub fn new(value: CachedValue, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: SystemTime::now(),
            ttl,
        }
    }

    /// Check if the entry is still fresh
    pub fn is_fresh(&self) -> bool {
        match self.stored_at.elapsed() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => false, // Clock went backwards, consider stale
        }
    }
}

/// Concurrent in-memory catalog cache with per-entry TTL.
///
/// Keys are deterministic functions of operation plus parameters, computed
/// by the gateway; the store itself never derives TTLs or keys.
#[derive(Debug, Default)]
pub struct CatalogCache {
    cache: DashMap<String, CacheEntry>,
}

impl CatalogCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Get a cached value if fresh; stale entries are dropped on read
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        let fresh = {
            let entry = self.cache.get(key)?;
            entry.is_fresh().then(|| entry.value.clone())
        };
        if fresh.is_none() {
            self.cache.remove(key);
        }
        fresh
    }

    /// Store a value under `key` for `ttl`, overwriting any prior entry
    pub fn set(&self, key: impl Into<String>, value: CachedValue, ttl: Duration) {
        self.cache.insert(key.into(), CacheEntry::new(value, ttl));
    }

    /// Check if a key is cached and fresh
    pub fn contains_fresh(&self, key: &str) -> bool {
        self.cache
            .get(key)
            .map(|entry| entry.is_fresh())
            .unwrap_or(false)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut fresh_entries = 0;
        let mut stale_entries = 0;

        for entry in self.cache.iter() {
            if entry.is_fresh() {
                fresh_entries += 1;
            } else {
                stale_entries += 1;
            }
        }

        CacheStats {
            total_entries: self.cache.len(),
            fresh_entries,
            stale_entries,
        }
    }

    /// Remove stale entries, returning how many were dropped
    pub fn cleanup(&self) -> usize {
        let mut removed = 0;
        self.cache.retain(|_, entry| {
            if entry.is_fresh() {
                true
            } else {
                removed += 1;
                false
            }
        });
        removed
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of fresh entries
    pub fresh_entries: usize,
    /// Number of stale entries
    pub stale_entries: usize,
}
