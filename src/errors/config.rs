// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration validation and loading.

use std::path::PathBuf;

/// Errors produced by [`TranslatorConfig::validate`](crate::TranslatorConfig::validate)
/// and the configuration loaders.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Language code outside the supported set.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Detail level other than basic, detailed or technical.
    #[error("Unsupported detail level: {0}")]
    UnsupportedDetailLevel(String),

    /// Currency code outside the supported set.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// A size or duration that must be positive is zero.
    #[error("{field} must be positive")]
    NonPositive {
        /// Dotted path of the offending field
        field: &'static str,
    },

    /// A numeric field exceeds its allowed maximum.
    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange {
        /// Dotted path of the offending field
        field: &'static str,
        /// Largest accepted value
        max: u64,
        /// Value found in the configuration
        value: u64,
    },

    /// A custom label key is not a valid address.
    #[error("Invalid address in {field}: {value}")]
    InvalidAddress {
        /// Dotted path of the offending field
        field: &'static str,
        /// The text that failed to parse
        value: String,
    },

    /// A numeric field holds a negative, NaN or infinite value.
    #[error("{field} must be a finite, non-negative number")]
    InvalidNumber {
        /// Dotted path of the offending field
        field: &'static str,
    },

    /// `for_use_case` was given a name it does not know.
    #[error("Unknown use case: {0} (expected one of: wallet, explorer, analytics, developer)")]
    UnknownUseCase(String),

    /// The configuration file could not be read.
    #[error("Failed to read configuration from {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for [`TranslatorConfig`](crate::TranslatorConfig).
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
