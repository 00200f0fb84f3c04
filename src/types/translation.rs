// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Translation requests, situational context and results

use super::gas::GasPrice;
use super::locale::{Currency, DetailLevel, Language};
use super::metadata::RiskLevel;
use super::transaction::{RawReceipt, RawTransaction};
use alloy_primitives::{Address, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Kind of entity being translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Transaction,
    Address,
    Contract,
}

impl EntityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Transaction => "transaction",
            EntityKind::Address => "address",
            EntityKind::Contract => "contract",
        }
    }

    /// Short prefix used in cache keys
    pub const fn key_prefix(&self) -> &'static str {
        match self {
            EntityKind::Transaction => "tx",
            EntityKind::Address => "addr",
            EntityKind::Contract => "contract",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller preferences for one translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationOptions {
    pub detail_level: DetailLevel,
    pub language: Language,
    pub currency: Currency,
    /// Attach metadata and run enrichment
    pub include_metadata: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            detail_level: DetailLevel::Detailed,
            language: Language::En,
            currency: Currency::Usd,
            include_metadata: true,
        }
    }
}

impl TranslationOptions {
    pub fn with_detail_level(mut self, detail_level: DetailLevel) -> Self {
        self.detail_level = detail_level;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_metadata(mut self, include_metadata: bool) -> Self {
        self.include_metadata = include_metadata;
        self
    }
}

/// What is being translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TranslationPayload {
    Transaction {
        transaction: Box<RawTransaction>,
        receipt: RawReceipt,
    },
    Address {
        address: Address,
    },
    Contract {
        address: Address,
    },
}

impl TranslationPayload {
    pub fn kind(&self) -> EntityKind {
        match self {
            TranslationPayload::Transaction { .. } => EntityKind::Transaction,
            TranslationPayload::Address { .. } => EntityKind::Address,
            TranslationPayload::Contract { .. } => EntityKind::Contract,
        }
    }

    /// Transaction hash or address, as used in cache keys
    pub fn identifier(&self) -> String {
        match self {
            TranslationPayload::Transaction { transaction, .. } => transaction.hash.to_string(),
            TranslationPayload::Address { address } | TranslationPayload::Contract { address } => {
                address.to_string()
            }
        }
    }
}

/// A translation request with its payload, preferences and optional caller context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub payload: TranslationPayload,
    pub options: TranslationOptions,
    /// Context known to the caller; the context analyzer fills in the rest
    pub context: Option<TranslationContext>,
}

impl TranslationRequest {
    pub fn transaction(
        transaction: RawTransaction,
        receipt: RawReceipt,
        options: TranslationOptions,
    ) -> Self {
        Self {
            payload: TranslationPayload::Transaction {
                transaction: Box::new(transaction),
                receipt,
            },
            options,
            context: None,
        }
    }

    pub fn address(address: Address, options: TranslationOptions) -> Self {
        Self {
            payload: TranslationPayload::Address { address },
            options,
            context: None,
        }
    }

    pub fn contract(address: Address, options: TranslationOptions) -> Self {
        Self {
            payload: TranslationPayload::Contract { address },
            options,
            context: None,
        }
    }

    pub fn with_context(mut self, context: TranslationContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.payload.kind()
    }
}

/// Network congestion class derived from the prevailing gas price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl CongestionLevel {
    /// Classify by gas price: below 20 gwei low, below 50 medium, below 100 high, else extreme
    pub fn from_gas_price(price: GasPrice) -> Self {
        let gwei = price.as_gwei_f64();
        if gwei < 20.0 {
            CongestionLevel::Low
        } else if gwei < 50.0 {
            CongestionLevel::Medium
        } else if gwei < 100.0 {
            CongestionLevel::High
        } else {
            CongestionLevel::Extreme
        }
    }

    /// Rough share of block capacity in use at this congestion level
    pub const fn estimated_utilization(&self) -> f64 {
        match self {
            CongestionLevel::Low => 0.35,
            CongestionLevel::Medium => 0.6,
            CongestionLevel::High => 0.85,
            CongestionLevel::Extreme => 0.98,
        }
    }

    pub const fn is_elevated(&self) -> bool {
        matches!(self, CongestionLevel::High | CongestionLevel::Extreme)
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CongestionLevel::Low => "low",
            CongestionLevel::Medium => "medium",
            CongestionLevel::High => "high",
            CongestionLevel::Extreme => "extreme",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeContext {
    pub block_time: Option<DateTime<Utc>>,
    pub current_time: DateTime<Utc>,
    pub time_since_block: Option<Duration>,
    pub congestion: CongestionLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub native_symbol: String,
    /// Native-asset price in `currency`; `None` when no conversion rate is known
    pub native_price: Option<f64>,
    pub currency: Currency,
    pub gas_price: GasPrice,
    pub network_utilization: Option<f64>,
}

/// Situational context for narrative assembly
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslationContext {
    pub preferences: TranslationOptions,
    pub user_address: Option<Address>,
    pub related_transactions: Vec<TxHash>,
    pub time: Option<TimeContext>,
    pub market: Option<MarketContext>,
}

impl TranslationContext {
    /// Context carrying only the caller's preferences
    pub fn from_options(options: &TranslationOptions) -> Self {
        Self {
            preferences: options.clone(),
            ..Self::default()
        }
    }

    pub fn native_price(&self) -> Option<f64> {
        self.market.as_ref().and_then(|m| m.native_price)
    }
}

/// Kind of a related item attached by enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedItemKind {
    Transaction,
    PriceSnapshot,
    Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedItem {
    pub kind: RelatedItemKind,
    /// Hash, address or symbol the item points at
    pub reference: String,
    pub description: String,
    /// 0.0 to 1.0
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationMetadata {
    pub translation_type: EntityKind,
    pub detail_level: DetailLevel,
    pub language: Language,
    pub currency: Currency,
    /// 0.0 to 1.0, how much of the entity was recognized
    pub confidence: f64,
    pub processing_time: Duration,
    pub data_sources: Vec<String>,
    pub enrichment_applied: Vec<String>,
    pub category: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub tags: Vec<String>,
}

/// A finished translation. Shared immutably once cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub summary: String,
    pub description: String,
    pub key_points: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub metadata: TranslationMetadata,
    pub related_items: Vec<RelatedItem>,
    pub timestamp: DateTime<Utc>,
}

impl TranslationMetadata {
    /// Metadata for a fresh translation of `translation_type` under `options`
    pub fn new(translation_type: EntityKind, options: &TranslationOptions) -> Self {
        Self {
            translation_type,
            detail_level: options.detail_level,
            language: options.language,
            currency: options.currency,
            confidence: 0.0,
            processing_time: Duration::ZERO,
            data_sources: Vec::new(),
            enrichment_applied: Vec::new(),
            category: None,
            risk_level: None,
            tags: Vec::new(),
        }
    }
}

impl TranslationResult {
    pub fn new(
        summary: impl Into<String>,
        description: impl Into<String>,
        metadata: TranslationMetadata,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            key_points: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            metadata,
            related_items: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}
