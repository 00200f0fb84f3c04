// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Background removal of stale cache entries

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use super::TranslationCache;
use crate::spans;

/// Running sweep task. Dropping the handle without [`SweepHandle::shutdown`] leaves the
/// task running until the runtime shuts down.
#[derive(Debug)]
pub struct SweepHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Cancel the sweep and wait for the task to finish
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Cache sweep task did not shut down cleanly");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl TranslationCache {
    /// Spawn the periodic sweep on the current tokio runtime.
    ///
    /// Returns `None` when caching is disabled. The first sweep runs one full cleanup
    /// interval after spawning.
    pub fn spawn_sweeper(self: &Arc<Self>) -> Option<SweepHandle> {
        if !self.is_enabled() {
            debug!("Cache disabled; not starting sweep");
            return None;
        }

        let cache = Arc::clone(self);
        let token = CancellationToken::new();
        let child = token.clone();
        let interval = self.config.cleanup_interval;
        let span = spans::cache_sweep(interval);

        let task = tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // The first tick completes immediately
                ticker.tick().await;

                loop {
                    tokio::select! {
                        _ = child.cancelled() => {
                            info!("Cache sweep stopped");
                            break;
                        }
                        _ = ticker.tick() => {
                            let removed = cache.purge_expired().await;
                            if removed > 0 {
                                debug!(removed, "Swept expired translations");
                            }
                        }
                    }
                }
            }
            .instrument(span),
        );

        info!(interval = ?interval, "Cache sweep started");
        Some(SweepHandle { token, task })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use crate::config::CacheConfig;
    use crate::types::locale::{Currency, DetailLevel, Language};
    use crate::types::translation::{
        EntityKind, TranslationMetadata, TranslationOptions, TranslationResult,
    };
    use chrono::Utc;
    use std::time::Duration;

    fn stale_result() -> Arc<TranslationResult> {
        Arc::new(TranslationResult {
            summary: String::new(),
            description: String::new(),
            key_points: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            metadata: TranslationMetadata {
                translation_type: EntityKind::Contract,
                detail_level: DetailLevel::Detailed,
                language: Language::En,
                currency: Currency::Usd,
                confidence: 0.9,
                processing_time: Duration::ZERO,
                data_sources: Vec::new(),
                enrichment_applied: Vec::new(),
                category: None,
                risk_level: None,
                tags: Vec::new(),
            },
            related_items: Vec::new(),
            timestamp: Utc::now() - chrono::Duration::seconds(30),
        })
    }

    #[tokio::test]
    async fn test_sweep_removes_stale_entries() {
        let cache = Arc::new(TranslationCache::new(CacheConfig {
            enabled: true,
            max_size: 10,
            ttl: Duration::from_secs(1),
            cleanup_interval: Duration::from_millis(20),
        }));
        let key = CacheKey::new(EntityKind::Contract, "0x01", &TranslationOptions::default());
        cache.put(key, stale_result()).await;
        assert_eq!(cache.len().await, 1);

        let handle = cache.spawn_sweeper().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(cache.len().await, 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_task() {
        let cache = Arc::new(TranslationCache::new(CacheConfig {
            cleanup_interval: Duration::from_millis(10),
            ..CacheConfig::default()
        }));
        let handle = cache.spawn_sweeper().unwrap();
        assert!(!handle.is_finished());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_disabled_cache_has_no_sweep() {
        let cache = Arc::new(TranslationCache::new(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        }));
        assert!(cache.spawn_sweeper().is_none());
    }
}
