// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the translator
//!
//! [`TranslatorConfig`] groups one sub-config per pipeline component plus cache, enrichment
//! and market settings. Language, detail level and currency are carried as plain codes so
//! that [`TranslatorConfig::validate`] can report unsupported values.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use semioscribe::TranslatorConfig;
//!
//! let config = TranslatorConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.cache.max_size, 10_000);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use semioscribe::TranslatorConfigBuilder;
//! use std::time::Duration;
//!
//! let config = TranslatorConfigBuilder::new()
//!     .language("de")
//!     .detail_level("technical")
//!     .cache_ttl(Duration::from_secs(600))
//!     .build();
//! assert_eq!(config.value_formatter.currency, "EUR");
//! ```
//!
//! # Example: Loading from JSON
//!
//! ```rust
//! use semioscribe::TranslatorConfig;
//!
//! let config = TranslatorConfig::from_json_str(r#"{ "language": "fr", "cache": { "ttl": 60.0 } }"#)
//!     .unwrap();
//! assert_eq!(config.language, "fr");
//! assert_eq!(config.cache.max_size, 10_000);
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::gas::GasPrice;
use crate::types::locale::{Currency, DetailLevel, Language};
use crate::types::translation::TranslationOptions;

pub mod constants;

use constants::{HIGH_GAS_PRICE_GWEI, MAX_DECIMAL_PLACES, MAX_RELATED_TXS_LIMIT};

/// Top-level translator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Master switch; a disabled translator rejects translate calls
    pub enabled: bool,
    /// Default language code (see [`Language`])
    pub language: String,
    /// Default detail level: basic, detailed or technical
    pub detail_level: String,
    /// Default for [`TranslationOptions::include_metadata`]
    pub include_metadata: bool,
    pub address_resolver: AddressResolverConfig,
    pub contract_analyzer: ContractAnalyzerConfig,
    pub transaction_parser: TransactionParserConfig,
    pub event_decoder: EventDecoderConfig,
    pub value_formatter: ValueFormatterConfig,
    pub template_engine: TemplateEngineConfig,
    pub enrichment: EnrichmentConfig,
    pub cache: CacheConfig,
    pub market: MarketConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressResolverConfig {
    /// Look up alias names
    pub resolve_ens: bool,
    /// Apply well-known and custom labels
    pub resolve_labels: bool,
    /// Address (hex) to label; applied on top of the well-known labels
    pub custom_labels: BTreeMap<String, String>,
    /// Refresh interval for resolvers backed by a remote label source
    #[serde(with = "duration_secs")]
    pub update_interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractAnalyzerConfig {
    /// Expose function and event catalogs
    pub analyze_abi: bool,
    /// Report token standards
    pub detect_standards: bool,
    /// Report proxy implementations
    pub resolve_proxies: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionParserConfig {
    /// Decode the function selector into a method call
    pub parse_method_calls: bool,
    /// Decode method parameters; when off only the function identity is kept
    pub decode_input_data: bool,
    /// Turn ERC-20 `Transfer` logs into token transfers
    pub extract_token_transfers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDecoderConfig {
    /// Decode parameters of matched events
    pub decode_known_events: bool,
    /// Fall back to well-known event signatures when the contract catalog has no match
    pub resolve_topics: bool,
    /// Keep raw topics and data on decoded events
    pub include_raw_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueFormatterConfig {
    /// Default fiat currency code (see [`Currency`])
    pub currency: String,
    /// Fraction digits for native and token amounts
    pub decimal_places: u32,
    pub use_thousands_separator: bool,
    /// Include fiat estimates in narratives when a price is known
    pub show_fiat_value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TemplateEngineConfig {
    /// Template name to template text, registered for the configured language
    pub custom_templates: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub include_price_data: bool,
    /// Use the price snapshot at block time instead of the latest one
    pub include_historical_data: bool,
    pub include_related_txs: bool,
    pub max_related_txs: usize,
    /// Upper bound on one enrichment pass
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_size: usize,
    #[serde(with = "duration_secs")]
    pub ttl: Duration,
    #[serde(with = "duration_secs")]
    pub cleanup_interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub native_symbol: String,
    pub native_decimals: u8,
    /// Native-asset price quoted in `quote_currency`
    pub native_price: f64,
    pub quote_currency: String,
    /// Units of a currency per unit of `quote_currency`
    pub exchange_rates: BTreeMap<String, f64>,
    /// Gas price (gwei) above which a cheaper-gas recommendation is emitted
    pub high_gas_price_gwei: u64,
    /// Gas price (gwei) assumed for congestion when the request has none
    pub reference_gas_price_gwei: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::default_preset()
    }
}

impl Default for AddressResolverConfig {
    fn default() -> Self {
        Self {
            resolve_ens: true,
            resolve_labels: true,
            custom_labels: BTreeMap::from([
                (Address::ZERO.to_string(), "Null Address".to_string()),
                (
                    "0x000000000000000000000000000000000000dEaD".to_string(),
                    "Burn Address".to_string(),
                ),
            ]),
            update_interval: Duration::from_secs(3600),
        }
    }
}

impl Default for ContractAnalyzerConfig {
    fn default() -> Self {
        Self {
            analyze_abi: true,
            detect_standards: true,
            resolve_proxies: true,
        }
    }
}

impl Default for TransactionParserConfig {
    fn default() -> Self {
        Self {
            parse_method_calls: true,
            decode_input_data: true,
            extract_token_transfers: true,
        }
    }
}

impl Default for EventDecoderConfig {
    fn default() -> Self {
        Self {
            decode_known_events: true,
            resolve_topics: true,
            include_raw_data: false,
        }
    }
}

impl Default for ValueFormatterConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Usd.code().to_string(),
            decimal_places: 4,
            use_thousands_separator: true,
            show_fiat_value: true,
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_price_data: true,
            include_historical_data: true,
            include_related_txs: true,
            max_related_txs: 5,
            timeout: Duration::from_secs(2),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: 10_000,
            ttl: Duration::from_secs(3600),
            cleanup_interval: Duration::from_secs(15 * 60),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            native_symbol: "ETH".to_string(),
            native_decimals: 18,
            native_price: 2000.0,
            quote_currency: Currency::Usd.code().to_string(),
            exchange_rates: BTreeMap::from([
                ("EUR".to_string(), 0.92),
                ("GBP".to_string(), 0.79),
                ("JPY".to_string(), 150.0),
                ("CNY".to_string(), 7.2),
            ]),
            high_gas_price_gwei: HIGH_GAS_PRICE_GWEI,
            reference_gas_price_gwei: 20,
        }
    }
}

impl MarketConfig {
    /// Threshold for the cheaper-gas recommendation
    pub fn high_gas_price(&self) -> GasPrice {
        GasPrice::from_gwei(self.high_gas_price_gwei)
    }

    /// Native-asset price converted into `currency`, when a rate is known
    pub fn native_price_in(&self, currency: Currency) -> Option<f64> {
        if currency.code().eq_ignore_ascii_case(&self.quote_currency) {
            return Some(self.native_price);
        }
        self.exchange_rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(currency.code()))
            .map(|(_, rate)| self.native_price * rate)
    }
}

impl TranslatorConfig {
    /// Balanced defaults: English, detailed tier, USD, 10 000-entry cache for one hour
    pub fn default_preset() -> Self {
        Self {
            enabled: true,
            language: Language::En.code().to_string(),
            detail_level: DetailLevel::Detailed.as_str().to_string(),
            include_metadata: true,
            address_resolver: AddressResolverConfig::default(),
            contract_analyzer: ContractAnalyzerConfig::default(),
            transaction_parser: TransactionParserConfig::default(),
            event_decoder: EventDecoderConfig::default(),
            value_formatter: ValueFormatterConfig::default(),
            template_engine: TemplateEngineConfig::default(),
            enrichment: EnrichmentConfig::default(),
            cache: CacheConfig::default(),
            market: MarketConfig::default(),
        }
    }

    /// Lightweight preset for end users: basic tier, no enrichment, small short-lived cache
    pub fn basic() -> Self {
        let mut config = Self::default_preset();
        config.detail_level = DetailLevel::Basic.as_str().to_string();
        config.include_metadata = false;
        config.contract_analyzer.analyze_abi = false;
        config.transaction_parser.decode_input_data = false;
        config.value_formatter.decimal_places = 2;
        config.enrichment.enabled = false;
        config.enrichment.include_price_data = false;
        config.enrichment.include_historical_data = false;
        config.enrichment.include_related_txs = false;
        config.cache.max_size = 1_000;
        config.cache.ttl = Duration::from_secs(30 * 60);
        config
    }

    /// Preset for developers and analysts: technical tier, raw data, large long-lived cache
    pub fn technical() -> Self {
        let mut config = Self::default_preset();
        config.detail_level = DetailLevel::Technical.as_str().to_string();
        config.event_decoder.include_raw_data = true;
        config.value_formatter.decimal_places = 8;
        config.value_formatter.use_thousands_separator = false;
        config.enrichment.max_related_txs = 10;
        config.cache.max_size = 50_000;
        config.cache.ttl = Duration::from_secs(4 * 3600);
        config
    }

    /// Default preset localized for a language, with that language's currency.
    ///
    /// Unsupported codes are kept as given so that [`Self::validate`] reports them.
    pub fn for_language(language: &str) -> Self {
        let mut config = Self::default_preset();
        config.language = language.to_string();
        if let Ok(parsed) = language.parse::<Language>() {
            config.language = parsed.code().to_string();
            config.value_formatter.currency = parsed.default_currency().code().to_string();
        }
        config
    }

    /// Preset for a named deployment: wallet, explorer, analytics or developer
    pub fn for_use_case(use_case: &str) -> Result<Self, ConfigError> {
        match use_case.trim().to_ascii_lowercase().as_str() {
            "wallet" => Ok(Self::basic()),
            "explorer" => Ok(Self::default_preset()),
            "analytics" => {
                let mut config = Self::technical();
                config.enrichment.max_related_txs = 25;
                Ok(config)
            }
            "developer" => {
                let mut config = Self::technical();
                config.enrichment.enabled = false;
                config.cache.enabled = false;
                Ok(config)
            }
            _ => Err(ConfigError::UnknownUseCase(use_case.to_string())),
        }
    }

    /// Parse a JSON configuration; missing fields take default-preset values
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check every value the translator depends on.
    ///
    /// A globally disabled configuration is always valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        self.language.parse::<Language>()?;
        self.detail_level.parse::<DetailLevel>()?;
        self.value_formatter.currency.parse::<Currency>()?;
        self.market.quote_currency.parse::<Currency>()?;

        if self.value_formatter.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::OutOfRange {
                field: "value_formatter.decimal_places",
                max: u64::from(MAX_DECIMAL_PLACES),
                value: u64::from(self.value_formatter.decimal_places),
            });
        }

        if self.address_resolver.update_interval.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "address_resolver.update_interval",
            });
        }
        for key in self.address_resolver.custom_labels.keys() {
            if key.parse::<Address>().is_err() {
                return Err(ConfigError::InvalidAddress {
                    field: "address_resolver.custom_labels",
                    value: key.clone(),
                });
            }
        }

        if self.enrichment.max_related_txs > MAX_RELATED_TXS_LIMIT {
            return Err(ConfigError::OutOfRange {
                field: "enrichment.max_related_txs",
                max: MAX_RELATED_TXS_LIMIT as u64,
                value: self.enrichment.max_related_txs as u64,
            });
        }
        if self.enrichment.enabled && self.enrichment.timeout.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "enrichment.timeout",
            });
        }

        if self.cache.max_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "cache.max_size",
            });
        }
        if self.cache.ttl.is_zero() {
            return Err(ConfigError::NonPositive { field: "cache.ttl" });
        }
        if self.cache.cleanup_interval.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "cache.cleanup_interval",
            });
        }

        if !self.market.native_price.is_finite() || self.market.native_price < 0.0 {
            return Err(ConfigError::InvalidNumber {
                field: "market.native_price",
            });
        }
        for (code, rate) in &self.market.exchange_rates {
            code.parse::<Currency>()?;
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(ConfigError::InvalidNumber {
                    field: "market.exchange_rates",
                });
            }
        }

        Ok(())
    }

    /// Per-request options seeded from this configuration
    pub fn default_options(&self) -> Result<TranslationOptions, ConfigError> {
        Ok(TranslationOptions {
            detail_level: self.detail_level.parse()?,
            language: self.language.parse()?,
            currency: self.value_formatter.currency.parse()?,
            include_metadata: self.include_metadata,
        })
    }

    /// The configured language, or English when the code is invalid
    pub fn language_or_default(&self) -> Language {
        self.language.parse().unwrap_or_default()
    }

    /// The configured currency, or USD when the code is invalid
    pub fn currency_or_default(&self) -> Currency {
        self.value_formatter.currency.parse().unwrap_or_default()
    }
}

/// Supported language codes with their names
pub fn supported_languages() -> Vec<(&'static str, &'static str)> {
    Language::ALL
        .iter()
        .map(|l| (l.code(), l.description()))
        .collect()
}

/// Supported currency codes
pub fn supported_currencies() -> Vec<&'static str> {
    Currency::ALL.iter().map(|c| c.code()).collect()
}

/// Detail levels with their audiences
pub fn supported_detail_levels() -> Vec<(&'static str, &'static str)> {
    DetailLevel::ALL
        .iter()
        .map(|d| (d.as_str(), d.description()))
        .collect()
}

/// Builder for [`TranslatorConfig`]
///
/// Starts from the default preset.
///
/// ```rust
/// use semioscribe::TranslatorConfigBuilder;
///
/// let config = TranslatorConfigBuilder::new()
///     .detail_level("basic")
///     .custom_label("0x742d35cc6634c0532925a3b8d4c9db96c4b5c8e1", "Treasury")
///     .disable_enrichment()
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfigBuilder {
    config: TranslatorConfig,
}

impl TranslatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Set the language and, for supported codes, its default currency
    pub fn language(mut self, language: &str) -> Self {
        self.config.language = language.to_string();
        if let Ok(parsed) = language.parse::<Language>() {
            self.config.value_formatter.currency = parsed.default_currency().code().to_string();
        }
        self
    }

    pub fn detail_level(mut self, detail_level: &str) -> Self {
        self.config.detail_level = detail_level.to_string();
        self
    }

    /// Override the currency; call after [`Self::language`] to keep it
    pub fn currency(mut self, currency: &str) -> Self {
        self.config.value_formatter.currency = currency.to_string();
        self
    }

    pub fn include_metadata(mut self, include: bool) -> Self {
        self.config.include_metadata = include;
        self
    }

    pub fn decimal_places(mut self, places: u32) -> Self {
        self.config.value_formatter.decimal_places = places;
        self
    }

    pub fn custom_label(mut self, address: &str, label: &str) -> Self {
        self.config
            .address_resolver
            .custom_labels
            .insert(address.to_string(), label.to_string());
        self
    }

    pub fn custom_template(mut self, name: &str, template: &str) -> Self {
        self.config
            .template_engine
            .custom_templates
            .insert(name.to_string(), template.to_string());
        self
    }

    pub fn cache_max_size(mut self, max_size: usize) -> Self {
        self.config.cache.max_size = max_size;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.ttl = ttl;
        self
    }

    pub fn cache_cleanup_interval(mut self, interval: Duration) -> Self {
        self.config.cache.cleanup_interval = interval;
        self
    }

    pub fn disable_cache(mut self) -> Self {
        self.config.cache.enabled = false;
        self
    }

    pub fn disable_enrichment(mut self) -> Self {
        self.config.enrichment.enabled = false;
        self
    }

    pub fn enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.config.enrichment.timeout = timeout;
        self
    }

    pub fn max_related_txs(mut self, max: usize) -> Self {
        self.config.enrichment.max_related_txs = max;
        self
    }

    pub fn include_raw_event_data(mut self, include: bool) -> Self {
        self.config.event_decoder.include_raw_data = include;
        self
    }

    pub fn native_price(mut self, price: f64) -> Self {
        self.config.market.native_price = price;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn build(self) -> TranslatorConfig {
        self.config
    }
}

/// Durations as fractional seconds in configuration files
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(duration.as_secs_f64())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
