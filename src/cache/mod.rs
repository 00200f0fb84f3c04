// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Translation result cache
//!
//! A capacity- and TTL-bounded map from [`CacheKey`] to shared, immutable
//! [`TranslationResult`]s:
//!
//! - An entry is served only while `now - result.timestamp < ttl`; stale entries found by
//!   a lookup are deleted and reported as a miss
//! - Inserting a new key into a full cache evicts the least recently used entry first;
//!   overwriting an existing key never evicts
//! - A background sweep (see [`TranslationCache::spawn_sweeper`]) deletes every stale
//!   entry once per cleanup interval
//!
//! All operations take the same `tokio::sync::Mutex`, so a sweep and a lookup never
//! observe each other half-done.

mod sweep;

pub use sweep::SweepHandle;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::CacheConfig;
use crate::types::locale::{Currency, DetailLevel, Language};
use crate::types::translation::{EntityKind, TranslationOptions, TranslationResult};

/// Identity of one cached translation
///
/// Locale and the metadata flag are part of the key, so the same entity translated into
/// two languages, or with and without enrichment, never shares an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: EntityKind,
    /// Transaction hash or address
    pub identifier: String,
    pub detail_level: DetailLevel,
    pub language: Language,
    pub currency: Currency,
    pub include_metadata: bool,
}

impl CacheKey {
    pub fn new(kind: EntityKind, identifier: impl Into<String>, options: &TranslationOptions) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            detail_level: options.detail_level,
            language: options.language,
            currency: options.currency,
            include_metadata: options.include_metadata,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}{}",
            self.kind.key_prefix(),
            self.identifier,
            self.detail_level,
            self.language,
            self.currency,
            if self.include_metadata { "" } else { ":plain" }
        )
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that found nothing usable (absent or stale)
    pub misses: u64,
    /// Entries removed to make room
    pub evictions: u64,
    /// Stale entries removed by lookups or sweeps
    pub expirations: u64,
    /// Current number of entries
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}

#[derive(Debug)]
struct CacheEntry {
    result: Arc<TranslationResult>,
    /// Monotonic access counter for LRU ordering
    last_access: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
    next_access: u64,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        let seq = self.next_access;
        self.next_access += 1;
        seq
    }

    fn evict_lru(&mut self) {
        let lru_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(key = %key, "Evicting least recently used translation");
            self.entries.remove(&key);
            self.stats.evictions += 1;
        }
    }
}

/// Whether a result produced at `timestamp` may still be served at `now`
fn is_fresh(timestamp: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match now.signed_duration_since(timestamp).to_std() {
        Ok(age) => age < ttl,
        // Timestamp in the future: clock skew, treat as brand new
        Err(_) => true,
    }
}

/// Capacity- and TTL-bounded store of translation results
#[derive(Debug)]
pub struct TranslationCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl TranslationCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Fetch a fresh entry. Stale entries are deleted and count as a miss.
    ///
    /// Always `None` when caching is disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<TranslationResult>> {
        if !self.config.enabled {
            return None;
        }

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let now = Utc::now();
        let seq = state.tick();

        let freshness = state
            .entries
            .get(key)
            .map(|entry| is_fresh(entry.result.timestamp, now, self.config.ttl));

        let fresh = match freshness {
            Some(true) => state.entries.get_mut(key).map(|entry| {
                entry.last_access = seq;
                Arc::clone(&entry.result)
            }),
            Some(false) => {
                debug!(key = %key, "Cached translation expired");
                state.entries.remove(key);
                state.stats.expirations += 1;
                state.stats.entries = state.entries.len();
                None
            }
            None => None,
        };

        if fresh.is_some() {
            state.stats.hits += 1;
            debug!(key = %key, "Translation cache hit");
        } else {
            state.stats.misses += 1;
            debug!(key = %key, "Translation cache miss");
        }
        fresh
    }

    /// Store a result, evicting the least recently used entry if a new key needs room.
    ///
    /// No-op when caching is disabled.
    pub async fn put(&self, key: CacheKey, result: Arc<TranslationResult>) {
        if !self.config.enabled {
            return;
        }

        let mut state = self.state.lock().await;
        let seq = state.tick();

        if let Some(entry) = state.entries.get_mut(&key) {
            entry.result = result;
            entry.last_access = seq;
            return;
        }

        while state.entries.len() >= self.config.max_size && !state.entries.is_empty() {
            state.evict_lru();
        }

        debug!(key = %key, "Caching translation");
        state.entries.insert(
            key,
            CacheEntry {
                result,
                last_access: seq,
            },
        );
        state.stats.entries = state.entries.len();
    }

    /// Delete every stale entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let ttl = self.config.ttl;

        let before = state.entries.len();
        state
            .entries
            .retain(|_, entry| is_fresh(entry.result.timestamp, now, ttl));
        let removed = before - state.entries.len();

        state.stats.expirations += removed as u64;
        state.stats.entries = state.entries.len();
        removed
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing translation cache");
        state.entries.clear();
        state.stats.entries = 0;
    }

    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }
}
