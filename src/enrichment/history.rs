// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, VecDeque};

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::EnrichmentEngine;
use crate::config::constants::{MAX_PRICE_SNAPSHOTS, MAX_RELATED_TXS_LIMIT};
use crate::config::{EnrichmentConfig, MarketConfig};
use crate::errors::EnrichmentError;
use crate::format::short_address;
use crate::types::locale::Currency;
use crate::types::metadata::PriceData;
use crate::types::translation::{
    RelatedItem, RelatedItemKind, TranslationPayload, TranslationRequest, TranslationResult,
};

const CONFIGURED_PRICE_SOURCE: &str = "configured";
const PRICE_RELEVANCE: f64 = 0.5;

/// Enrichment from recorded activity and price snapshots
///
/// Activity and prices are fed in by the caller through [`record_activity`] and
/// [`record_price`]. The native asset always has a price from the market configuration.
///
/// [`record_activity`]: HistoryEnrichmentEngine::record_activity
/// [`record_price`]: HistoryEnrichmentEngine::record_price
#[derive(Debug)]
pub struct HistoryEnrichmentEngine {
    config: EnrichmentConfig,
    market: MarketConfig,
    /// Snapshots per upper-cased symbol, oldest first
    prices: RwLock<HashMap<String, Vec<PriceData>>>,
    /// Hashes per address, newest first
    activity: RwLock<HashMap<Address, VecDeque<TxHash>>>,
}

impl HistoryEnrichmentEngine {
    pub fn new(config: EnrichmentConfig, market: MarketConfig) -> Self {
        Self {
            config,
            market,
            prices: RwLock::new(HashMap::new()),
            activity: RwLock::new(HashMap::new()),
        }
    }

    /// Record a price snapshot, keeping at most [`MAX_PRICE_SNAPSHOTS`] per symbol
    pub async fn record_price(&self, snapshot: PriceData) {
        let mut prices = self.prices.write().await;
        let series = prices.entry(snapshot.symbol.to_uppercase()).or_default();
        let at = series.partition_point(|p| p.timestamp <= snapshot.timestamp);
        series.insert(at, snapshot);
        if series.len() > MAX_PRICE_SNAPSHOTS {
            let excess = series.len() - MAX_PRICE_SNAPSHOTS;
            series.drain(..excess);
        }
    }

    /// Record that `hash` involved `address`
    pub async fn record_activity(&self, address: Address, hash: TxHash) {
        let mut activity = self.activity.write().await;
        let history = activity.entry(address).or_default();
        if history.contains(&hash) {
            return;
        }
        history.push_front(hash);
        history.truncate(MAX_RELATED_TXS_LIMIT);
    }

    /// Latest snapshot at or before `at`
    pub async fn get_price_at(
        &self,
        symbol: &str,
        currency: Currency,
        at: DateTime<Utc>,
    ) -> Result<PriceData, EnrichmentError> {
        let prices = self.prices.read().await;
        prices
            .get(&symbol.to_uppercase())
            .and_then(|series| {
                series
                    .iter()
                    .rev()
                    .find(|p| p.currency == currency && p.timestamp <= at)
            })
            .cloned()
            .ok_or_else(|| EnrichmentError::PriceUnavailable {
                symbol: symbol.to_string(),
            })
    }

    fn configured_price(&self, symbol: &str, currency: Currency) -> Option<PriceData> {
        if !symbol.eq_ignore_ascii_case(&self.market.native_symbol) {
            return None;
        }
        self.market.native_price_in(currency).map(|price| PriceData {
            symbol: self.market.native_symbol.clone(),
            price,
            currency,
            timestamp: Utc::now(),
            source: CONFIGURED_PRICE_SOURCE.to_string(),
        })
    }

    async fn price_item(&self, request: &TranslationRequest) -> Result<RelatedItem, EnrichmentError> {
        let symbol = self.market.native_symbol.as_str();
        let currency = request.options.currency;
        let block_time = match &request.payload {
            TranslationPayload::Transaction { transaction, .. } => transaction.block_timestamp,
            _ => None,
        };

        let snapshot = match block_time {
            Some(at) if self.config.include_historical_data => {
                match self.get_price_at(symbol, currency, at).await {
                    Ok(snapshot) => snapshot,
                    Err(_) => self.get_price_data(symbol, currency).await?,
                }
            }
            _ => self.get_price_data(symbol, currency).await?,
        };

        Ok(RelatedItem {
            kind: RelatedItemKind::PriceSnapshot,
            reference: snapshot.symbol.clone(),
            description: format!(
                "{} price: {:.2} {} ({})",
                snapshot.symbol,
                snapshot.price,
                snapshot.currency.code(),
                snapshot.source
            ),
            relevance: PRICE_RELEVANCE,
        })
    }

    async fn related_items(&self, request: &TranslationRequest) -> Vec<RelatedItem> {
        let (addresses, own_hash) = match &request.payload {
            TranslationPayload::Transaction { transaction, .. } => (
                std::iter::once(transaction.from)
                    .chain(transaction.to)
                    .collect::<Vec<_>>(),
                Some(transaction.hash),
            ),
            TranslationPayload::Address { address } | TranslationPayload::Contract { address } => {
                (vec![*address], None)
            }
        };

        let limit = self.config.max_related_txs;
        let mut seen = Vec::new();
        let mut items = Vec::new();
        for address in addresses {
            let hashes = match self.get_related_transactions(address, limit).await {
                Ok(hashes) => hashes,
                Err(e) => {
                    debug!(address = %address, error = %e, "No related transactions");
                    continue;
                }
            };
            for hash in hashes {
                if items.len() >= limit {
                    return items;
                }
                if Some(hash) == own_hash || seen.contains(&hash) {
                    continue;
                }
                seen.push(hash);
                items.push(RelatedItem {
                    kind: RelatedItemKind::Transaction,
                    reference: hash.to_string(),
                    description: format!("Recent transaction involving {}", short_address(address)),
                    relevance: 1.0 / (1.0 + items.len() as f64),
                });
            }
        }
        items
    }
}

#[async_trait]
impl EnrichmentEngine for HistoryEnrichmentEngine {
    async fn enrich_translation(
        &self,
        result: &mut TranslationResult,
        request: &TranslationRequest,
    ) -> Result<(), EnrichmentError> {
        if !request.options.include_metadata {
            return Ok(());
        }

        let mut failures = Vec::new();
        let mut attempted = 0;

        if self.config.include_related_txs && self.config.max_related_txs > 0 {
            attempted += 1;
            let items = self.related_items(request).await;
            if items.is_empty() {
                failures.push("no related transactions".to_string());
            } else {
                result.related_items.extend(items);
                result
                    .metadata
                    .enrichment_applied
                    .push("related_transactions".to_string());
            }
        }

        if self.config.include_price_data {
            attempted += 1;
            match self.price_item(request).await {
                Ok(item) => {
                    result.related_items.push(item);
                    result
                        .metadata
                        .enrichment_applied
                        .push("price_data".to_string());
                }
                Err(e) => failures.push(e.to_string()),
            }
        }

        if attempted > 0 && failures.len() == attempted {
            return Err(EnrichmentError::degraded(failures.join("; ")));
        }
        Ok(())
    }

    async fn get_price_data(
        &self,
        symbol: &str,
        currency: Currency,
    ) -> Result<PriceData, EnrichmentError> {
        let recorded = self
            .prices
            .read()
            .await
            .get(&symbol.to_uppercase())
            .and_then(|series| series.iter().rev().find(|p| p.currency == currency))
            .cloned();
        recorded
            .or_else(|| self.configured_price(symbol, currency))
            .ok_or_else(|| EnrichmentError::PriceUnavailable {
                symbol: symbol.to_string(),
            })
    }

    async fn get_related_transactions(
        &self,
        address: Address,
        limit: usize,
    ) -> Result<Vec<TxHash>, EnrichmentError> {
        let limit = limit.min(self.config.max_related_txs);
        Ok(self
            .activity
            .read()
            .await
            .get(&address)
            .map(|history| history.iter().take(limit).copied().collect())
            .unwrap_or_default())
    }
}
