// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain data translation
//!
//! `semioscribe` turns raw EVM data (transactions with their receipts, addresses and
//! contracts) into human-readable narratives. Every translation has a one-line summary, a
//! description at the requested [`DetailLevel`], key points, warnings and recommendations.
//! Summaries follow the requested [`Language`] and fiat figures the requested [`Currency`].
//!
//! # Pipeline
//!
//! [`Translator`] composes pluggable components, each behind a trait:
//!
//! - [`AddressResolver`] and [`ContractAnalyzer`] identify addresses and contracts
//! - [`TransactionParser`] and [`EventDecoder`] decode call data and logs
//! - [`ContextAnalyzer`] derives congestion and market context
//! - [`SentenceBuilder`], [`TemplateEngine`] and [`ValueFormatter`] write the narrative
//! - [`EnrichmentEngine`] and [`MetadataProvider`] attach related items and metadata
//!
//! Finished translations are shared through a TTL- and capacity-bounded
//! [`TranslationCache`] that a background task sweeps while the translator is started.
//!
//! # Example
//!
//! ```rust,no_run
//! use alloy_primitives::address;
//! use semioscribe::{DetailLevel, Translator, TranslatorConfig};
//!
//! # async fn run() -> Result<(), semioscribe::TranslationError> {
//! let translator = Translator::new(TranslatorConfig::default())?;
//! translator.start().await?;
//!
//! let options = translator
//!     .default_options()
//!     .with_detail_level(DetailLevel::Technical);
//! let dai = address!("6b175474e89094c44da98b954eedeac495271d0f");
//! let result = translator.translate_contract(dai, options).await?;
//! println!("{}\n{}", result.summary, result.description);
//!
//! translator.stop().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Offline defaults
//!
//! [`Translator::new`] wires components that need no network access: an [`AddressBook`]
//! of well-known and configured labels, an empty [`ContractRegistry`] backed by the
//! well-known ERC selector and topic tables, and a [`MarketContextAnalyzer`] quoting the
//! configured native-asset price. Use [`Translator::builder`] to inject RPC-backed
//! implementations.

pub mod cache;
pub mod config;
pub mod context;
pub mod enrichment;
pub mod errors;
pub mod events;
pub mod format;
pub mod narrative;
pub mod parser;
pub mod resolver;
mod spans;
mod translator;
pub mod types;

pub use cache::{CacheKey, CacheStats, SweepHandle, TranslationCache};
pub use config::{
    supported_currencies, supported_detail_levels, supported_languages, AddressResolverConfig,
    CacheConfig, ContractAnalyzerConfig, EnrichmentConfig, EventDecoderConfig, MarketConfig,
    TemplateEngineConfig, TransactionParserConfig, TranslatorConfig, TranslatorConfigBuilder,
    ValueFormatterConfig,
};
pub use context::{ContextAnalyzer, MarketContextAnalyzer};
pub use enrichment::{
    EnrichmentEngine, HistoryEnrichmentEngine, InMemoryMetadataProvider, MetadataProvider,
};
pub use errors::{
    ConfigError, ContextError, EnrichmentError, MetadataError, ParseError, ResolutionError,
    TemplateError, TranslationError, TranslationStep,
};
pub use events::{AbiEventDecoder, EventDecoder};
pub use format::{short_address, LocaleFormatter, ValueFormatter};
pub use narrative::{
    LocaleTemplateEngine, Narrated, NarrativeBuilder, SentenceBuilder, TemplateEngine,
};
pub use parser::{StandardTransactionParser, TransactionParser};
pub use resolver::{AddressBook, AddressResolver, ContractAnalyzer, ContractRegistry};
pub use translator::{FeatureFlags, Translator, TranslatorBuilder, TranslatorMetrics};
pub use types::address::{AddressInfo, AddressType};
pub use types::contract::{ContractInfo, ContractStandard, EventInfo, FunctionInfo, ParameterInfo};
pub use types::gas::{GasAnalysis, GasPrice};
pub use types::locale::{Currency, DetailLevel, Language};
pub use types::metadata::{
    AddressMetadata, ContractMetadata, PriceData, RiskLevel, TransactionMetadata,
};
pub use types::transaction::{
    DecodedEvent, MethodCall, ParsedTransaction, RawEventData, RawReceipt, RawTransaction,
    TokenInfo, TokenTransfer, TransactionKind, TransactionStatus,
};
pub use types::translation::{
    CongestionLevel, EntityKind, MarketContext, RelatedItem, RelatedItemKind, TimeContext,
    TranslationContext, TranslationMetadata, TranslationOptions, TranslationPayload,
    TranslationRequest, TranslationResult,
};
pub use types::wei::WeiAmount;
