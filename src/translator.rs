// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Translation orchestrator
//!
//! [`Translator`] runs one request through the pipeline:
//!
//! 1. Cache lookup; a hit returns the shared result without touching any component
//! 2. Resolution or parsing; failures abort the call and nothing is cached
//! 3. Context analysis, then summary, tiered description and key points
//! 4. Warning, recommendation and confidence rules
//! 5. Best-effort metadata and enrichment, bounded by the enrichment timeout
//! 6. Cache store
//!
//! Concurrent misses on the same key each run the full pipeline; the last store wins.
//!
//! # Examples
//!
//! ```rust,ignore
//! use semioscribe::{Translator, TranslatorConfig};
//!
//! let translator = Translator::new(TranslatorConfig::default())?;
//! translator.start().await?;
//!
//! let options = translator.default_options();
//! let result = translator.translate_address(address, options).await?;
//! println!("{}", result.summary);
//!
//! translator.stop().await;
//! ```

use std::sync::Arc;
use std::time::Instant;

use alloy_primitives::Address;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn, Instrument};

use crate::cache::{CacheKey, CacheStats, SweepHandle, TranslationCache};
use crate::config::TranslatorConfig;
use crate::context::{ContextAnalyzer, MarketContextAnalyzer};
use crate::enrichment::{EnrichmentEngine, HistoryEnrichmentEngine, MetadataProvider};
use crate::errors::{
    EnrichmentError, ParseError, ResolutionError, TranslationError, TranslationStep,
};
use crate::events::{AbiEventDecoder, EventDecoder};
use crate::format::{LocaleFormatter, ValueFormatter};
use crate::narrative::{
    rules, LocaleTemplateEngine, Narrated, NarrativeBuilder, SentenceBuilder, TemplateEngine,
};
use crate::parser::{StandardTransactionParser, TransactionParser};
use crate::resolver::{AddressBook, AddressResolver, ContractAnalyzer, ContractRegistry};
use crate::spans;
use crate::types::locale::{DetailLevel, Language};
use crate::types::transaction::{RawReceipt, RawTransaction};
use crate::types::translation::{
    EntityKind, TranslationContext, TranslationMetadata, TranslationOptions, TranslationPayload,
    TranslationRequest, TranslationResult,
};

const SOURCE_PARSER: &str = "transaction_parser";
const SOURCE_RESOLVER: &str = "address_resolver";
const SOURCE_ANALYZER: &str = "contract_analyzer";
const SOURCE_EVENTS: &str = "event_decoder";
const SOURCE_CONTEXT: &str = "context_analyzer";
const SOURCE_METADATA: &str = "metadata_provider";

#[derive(Debug, Default)]
struct Lifecycle {
    running: bool,
    sweeper: Option<SweepHandle>,
}

/// Which optional stages the translator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub cache: bool,
    pub enrichment: bool,
    pub ens_resolution: bool,
    pub abi_analysis: bool,
    pub input_decoding: bool,
    pub raw_event_data: bool,
    pub price_data: bool,
    pub related_transactions: bool,
}

/// Snapshot of translator state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatorMetrics {
    pub enabled: bool,
    pub running: bool,
    pub cache: CacheStats,
    pub language: Language,
    pub detail_level: DetailLevel,
    pub features: FeatureFlags,
}

/// Blockchain data translator
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Translator {
    config: TranslatorConfig,
    defaults: TranslationOptions,
    resolver: Arc<dyn AddressResolver>,
    analyzer: Arc<dyn ContractAnalyzer>,
    parser: Arc<dyn TransactionParser>,
    context: Arc<dyn ContextAnalyzer>,
    sentences: Arc<dyn SentenceBuilder>,
    enrichment: Arc<dyn EnrichmentEngine>,
    metadata: Option<Arc<dyn MetadataProvider>>,
    cache: Arc<TranslationCache>,
    lifecycle: Mutex<Lifecycle>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("config", &self.config)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Translator with the offline default components
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Config`] when the configuration does not validate
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslationError> {
        Self::builder(config).build()
    }

    /// Builder for injecting components
    #[must_use]
    pub fn builder(config: TranslatorConfig) -> TranslatorBuilder {
        TranslatorBuilder::new(config)
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Options seeded from the configuration's language, currency and detail level
    pub fn default_options(&self) -> TranslationOptions {
        self.defaults.clone()
    }

    /// Start the background cache sweep
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::AlreadyRunning`] when the translator is already started
    pub async fn start(&self) -> Result<(), TranslationError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.running {
            return Err(TranslationError::AlreadyRunning);
        }
        lifecycle.sweeper = self.cache.spawn_sweeper();
        lifecycle.running = true;
        info!(
            language = %self.defaults.language,
            detail_level = %self.defaults.detail_level,
            cache = self.cache.is_enabled(),
            "Translator started"
        );
        Ok(())
    }

    /// Stop the background sweep and wait for it to exit. A no-op when not running.
    pub async fn stop(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        if !lifecycle.running {
            debug!("Translator not running; nothing to stop");
            return;
        }
        lifecycle.running = false;
        if let Some(sweeper) = lifecycle.sweeper.take() {
            sweeper.shutdown().await;
        }
        info!("Translator stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.lifecycle.lock().await.running
    }

    pub async fn translate_transaction(
        &self,
        transaction: RawTransaction,
        receipt: RawReceipt,
        options: TranslationOptions,
    ) -> Result<Arc<TranslationResult>, TranslationError> {
        self.translate(TranslationRequest::transaction(transaction, receipt, options))
            .await
    }

    pub async fn translate_address(
        &self,
        address: Address,
        options: TranslationOptions,
    ) -> Result<Arc<TranslationResult>, TranslationError> {
        self.translate(TranslationRequest::address(address, options))
            .await
    }

    pub async fn translate_contract(
        &self,
        address: Address,
        options: TranslationOptions,
    ) -> Result<Arc<TranslationResult>, TranslationError> {
        self.translate(TranslationRequest::contract(address, options))
            .await
    }

    /// Translate any request
    ///
    /// # Errors
    ///
    /// - [`TranslationError::Disabled`] when the configuration is globally disabled
    /// - [`TranslationError::Resolution`] or [`TranslationError::Parse`] naming the failed
    ///   step; nothing is cached for a failed call
    pub async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<Arc<TranslationResult>, TranslationError> {
        let detail_level = request.options.detail_level;
        let span = match &request.payload {
            TranslationPayload::Transaction { transaction, .. } => {
                spans::translate_transaction(transaction.hash, detail_level)
            }
            TranslationPayload::Address { address } => {
                spans::translate_address(*address, detail_level)
            }
            TranslationPayload::Contract { address } => {
                spans::translate_contract(*address, detail_level)
            }
        };
        self.run(request).instrument(span).await
    }

    pub async fn metrics(&self) -> TranslatorMetrics {
        let enrichment = &self.config.enrichment;
        TranslatorMetrics {
            enabled: self.config.enabled,
            running: self.is_running().await,
            cache: self.cache.stats().await,
            language: self.defaults.language,
            detail_level: self.defaults.detail_level,
            features: FeatureFlags {
                cache: self.cache.is_enabled(),
                enrichment: enrichment.enabled,
                ens_resolution: self.config.address_resolver.resolve_ens,
                abi_analysis: self.config.contract_analyzer.analyze_abi,
                input_decoding: self.config.transaction_parser.decode_input_data,
                raw_event_data: self.config.event_decoder.include_raw_data,
                price_data: enrichment.include_price_data,
                related_transactions: enrichment.include_related_txs,
            },
        }
    }

    async fn run(
        &self,
        request: TranslationRequest,
    ) -> Result<Arc<TranslationResult>, TranslationError> {
        if !self.config.enabled {
            return Err(TranslationError::Disabled);
        }

        let started = Instant::now();
        let key = CacheKey::new(request.kind(), request.payload.identifier(), &request.options);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "Translation served from cache");
            return Ok(hit);
        }

        let context = self.analyze_context(&request).await;
        let mut result = match &request.payload {
            TranslationPayload::Transaction {
                transaction,
                receipt,
            } => self.narrate_transaction(transaction, receipt, &context).await?,
            TranslationPayload::Address { address } => {
                self.narrate_address(*address, &context).await?
            }
            TranslationPayload::Contract { address } => {
                self.narrate_contract(*address, &context).await?
            }
        };

        if request.options.include_metadata {
            self.attach_metadata(&mut result, &request).await;
        }
        let mut result = self.enrich(result, &request).await;
        result.metadata.processing_time = started.elapsed();

        let result = Arc::new(result);
        self.cache.put(key, Arc::clone(&result)).await;
        debug!(
            confidence = result.metadata.confidence,
            elapsed_ms = result.metadata.processing_time.as_millis() as u64,
            "Translation complete"
        );
        Ok(result)
    }

    async fn analyze_context(&self, request: &TranslationRequest) -> TranslationContext {
        let mut context = match self.context.analyze_context(request).await {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "Context analysis failed; using request preferences only");
                TranslationContext::from_options(&request.options)
            }
        };
        context.preferences = request.options.clone();
        context
    }

    fn narrate(
        &self,
        subject: Narrated<'_>,
        kind: EntityKind,
        context: &TranslationContext,
    ) -> TranslationResult {
        let mut result = TranslationResult::new(
            self.sentences.build_summary(subject, context),
            self.sentences.build_description(subject, context),
            TranslationMetadata::new(kind, &context.preferences),
        );
        result.key_points = self.sentences.build_key_points(subject, context);
        if context.time.is_some() || context.market.is_some() {
            result.metadata.data_sources.push(SOURCE_CONTEXT.to_string());
        }
        result
    }

    async fn narrate_transaction(
        &self,
        transaction: &RawTransaction,
        receipt: &RawReceipt,
        context: &TranslationContext,
    ) -> Result<TranslationResult, TranslationError> {
        let mut parsed = self
            .parser
            .parse_transaction(transaction, receipt, context.preferences.language)
            .await
            .map_err(parse_failure)?;
        if let Some(price) = context.native_price() {
            parsed.gas_analysis = parsed.gas_analysis.with_fiat_estimate(price);
        }

        let mut result = self.narrate(Narrated::Transaction(&parsed), EntityKind::Transaction, context);
        result.warnings = rules::transaction_warnings(&parsed);
        result.recommendations =
            rules::transaction_recommendations(&parsed, self.config.market.high_gas_price());
        result.metadata.confidence = rules::transaction_confidence(&parsed);

        let sources = &mut result.metadata.data_sources;
        sources.push(SOURCE_PARSER.to_string());
        sources.push(SOURCE_RESOLVER.to_string());
        if !parsed.events.is_empty() {
            sources.push(SOURCE_EVENTS.to_string());
        }
        Ok(result)
    }

    async fn narrate_address(
        &self,
        address: Address,
        context: &TranslationContext,
    ) -> Result<TranslationResult, TranslationError> {
        let info = self
            .resolver
            .resolve_address(address)
            .await
            .map_err(|e| TranslationError::resolution(TranslationStep::AddressResolution, e))?;

        let mut result = self.narrate(Narrated::Address(&info), EntityKind::Address, context);
        result.metadata.confidence = rules::address_confidence(&info);
        result.metadata.data_sources.push(SOURCE_RESOLVER.to_string());
        Ok(result)
    }

    async fn narrate_contract(
        &self,
        address: Address,
        context: &TranslationContext,
    ) -> Result<TranslationResult, TranslationError> {
        let info = self
            .analyzer
            .analyze_contract(address)
            .await
            .map_err(|e| TranslationError::resolution(TranslationStep::ContractAnalysis, e))?;

        let mut result = self.narrate(Narrated::Contract(&info), EntityKind::Contract, context);
        result.warnings = rules::contract_warnings(&info);
        result.recommendations = rules::contract_recommendations(&info);
        result.metadata.confidence = rules::contract_confidence(&info);
        result.metadata.data_sources.push(SOURCE_ANALYZER.to_string());
        Ok(result)
    }

    async fn attach_metadata(&self, result: &mut TranslationResult, request: &TranslationRequest) {
        let Some(provider) = &self.metadata else {
            return;
        };
        let lookup = match &request.payload {
            TranslationPayload::Transaction { transaction, .. } => provider
                .get_transaction_metadata(transaction.hash)
                .await
                .map(|m| (m.category, m.risk_level, m.tags)),
            TranslationPayload::Address { address } => provider
                .get_address_metadata(*address)
                .await
                .map(|m| (m.category, m.risk_level, m.tags)),
            TranslationPayload::Contract { address } => provider
                .get_contract_metadata(*address)
                .await
                .map(|m| (m.category, m.risk_level, m.tags)),
        };

        match lookup {
            Ok((category, risk_level, tags)) => {
                let metadata = &mut result.metadata;
                metadata.category = Some(category);
                metadata.risk_level = Some(risk_level);
                metadata.tags = tags;
                metadata.data_sources.push(SOURCE_METADATA.to_string());
            }
            Err(e) => debug!(error = %e, "No metadata for translation"),
        }
    }

    /// Enrich a copy of `result`, falling back to the original on error or timeout
    async fn enrich(
        &self,
        result: TranslationResult,
        request: &TranslationRequest,
    ) -> TranslationResult {
        if !self.config.enrichment.enabled || !request.options.include_metadata {
            return result;
        }

        let timeout = self.config.enrichment.timeout;
        let span = spans::enrich_translation(request.kind(), timeout);
        let mut enriched = result.clone();
        let outcome = tokio::time::timeout(
            timeout,
            self.enrichment.enrich_translation(&mut enriched, request),
        )
        .instrument(span)
        .await;

        match outcome {
            Ok(Ok(())) => enriched,
            Ok(Err(e)) => {
                warn!(error = %e, "Enrichment failed; returning unenriched translation");
                result
            }
            Err(_) => {
                let e = EnrichmentError::Timeout { after: timeout };
                warn!(error = %e, "Enrichment failed; returning unenriched translation");
                result
            }
        }
    }
}

fn parse_failure(error: ParseError) -> TranslationError {
    match error {
        ParseError::Resolution(source) => resolution_failure(source),
        other => TranslationError::parse(other),
    }
}

fn resolution_failure(source: ResolutionError) -> TranslationError {
    TranslationError::resolution(TranslationStep::AddressResolution, source)
}

/// Builder for [`Translator`]; unset components get the offline defaults
pub struct TranslatorBuilder {
    config: TranslatorConfig,
    resolver: Option<Arc<dyn AddressResolver>>,
    analyzer: Option<Arc<dyn ContractAnalyzer>>,
    parser: Option<Arc<dyn TransactionParser>>,
    events: Option<Arc<dyn EventDecoder>>,
    formatter: Option<Arc<dyn ValueFormatter>>,
    templates: Option<Arc<dyn TemplateEngine>>,
    context: Option<Arc<dyn ContextAnalyzer>>,
    sentences: Option<Arc<dyn SentenceBuilder>>,
    enrichment: Option<Arc<dyn EnrichmentEngine>>,
    metadata: Option<Arc<dyn MetadataProvider>>,
}

impl TranslatorBuilder {
    #[must_use]
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            resolver: None,
            analyzer: None,
            parser: None,
            events: None,
            formatter: None,
            templates: None,
            context: None,
            sentences: None,
            enrichment: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn AddressResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ContractAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn TransactionParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    #[must_use]
    pub fn with_event_decoder(mut self, events: Arc<dyn EventDecoder>) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn ValueFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: Arc<dyn TemplateEngine>) -> Self {
        self.templates = Some(templates);
        self
    }

    #[must_use]
    pub fn with_context_analyzer(mut self, context: Arc<dyn ContextAnalyzer>) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_sentence_builder(mut self, sentences: Arc<dyn SentenceBuilder>) -> Self {
        self.sentences = Some(sentences);
        self
    }

    #[must_use]
    pub fn with_enrichment(mut self, enrichment: Arc<dyn EnrichmentEngine>) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    #[must_use]
    pub fn with_metadata_provider(mut self, metadata: Arc<dyn MetadataProvider>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validate the configuration and wire the translator
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Config`] when the configuration does not validate
    pub fn build(self) -> Result<Translator, TranslationError> {
        let config = self.config;
        config.validate()?;
        let defaults = match config.default_options() {
            Ok(options) => options,
            Err(_) if !config.enabled => TranslationOptions::default(),
            Err(e) => return Err(e.into()),
        };

        let formatter = self
            .formatter
            .unwrap_or_else(|| Arc::new(LocaleFormatter::from_config(&config)));
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(AddressBook::new(&config.address_resolver)));
        let analyzer = self
            .analyzer
            .unwrap_or_else(|| Arc::new(ContractRegistry::new(config.contract_analyzer.clone())));
        let parser = match self.parser {
            Some(parser) => parser,
            None => {
                let events = self.events.unwrap_or_else(|| {
                    Arc::new(AbiEventDecoder::new(
                        config.event_decoder.clone(),
                        Arc::clone(&formatter),
                    ))
                });
                Arc::new(StandardTransactionParser::new(
                    config.transaction_parser.clone(),
                    Arc::clone(&resolver),
                    Arc::clone(&analyzer),
                    events,
                    Arc::clone(&formatter),
                ))
            }
        };
        let sentences = match self.sentences {
            Some(sentences) => sentences,
            None => {
                let templates = self
                    .templates
                    .unwrap_or_else(|| Arc::new(LocaleTemplateEngine::from_config(&config)));
                Arc::new(NarrativeBuilder::from_config(
                    &config,
                    Arc::clone(&formatter),
                    templates,
                ))
            }
        };
        let context = self
            .context
            .unwrap_or_else(|| Arc::new(MarketContextAnalyzer::new(config.market.clone())));
        let enrichment = self.enrichment.unwrap_or_else(|| {
            Arc::new(HistoryEnrichmentEngine::new(
                config.enrichment.clone(),
                config.market.clone(),
            ))
        });
        let cache = Arc::new(TranslationCache::new(config.cache.clone()));

        Ok(Translator {
            config,
            defaults,
            resolver,
            analyzer,
            parser,
            context,
            sentences,
            enrichment,
            metadata: self.metadata,
            cache,
            lifecycle: Mutex::new(Lifecycle::default()),
        })
    }
}
