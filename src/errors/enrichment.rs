// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the best-effort enrichment and metadata stages.
//!
//! The translator logs these and returns the unenriched result; they never abort a
//! translate call.

use std::time::Duration;

/// Errors from [`EnrichmentEngine`](crate::EnrichmentEngine) implementations.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    /// No price snapshot is available for the symbol.
    #[error("No price data available for {symbol}")]
    PriceUnavailable {
        /// Asset symbol
        symbol: String,
    },

    /// Every enrichment source failed; the result is left as it was.
    #[error("Enrichment degraded: {details}")]
    Degraded {
        /// Summary of the failed sources
        details: String,
    },

    /// Enrichment did not finish within the configured timeout.
    #[error("Enrichment timed out after {after:?}")]
    Timeout {
        /// The configured timeout
        after: Duration,
    },
}

impl EnrichmentError {
    /// Create a `Degraded` error.
    pub fn degraded(details: impl Into<String>) -> Self {
        EnrichmentError::Degraded {
            details: details.into(),
        }
    }
}

/// Errors from [`MetadataProvider`](crate::MetadataProvider) implementations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The provider has no metadata for the entity.
    #[error("No metadata for {entity}")]
    NotFound {
        /// Identifier of the entity (hash or address)
        entity: String,
    },

    /// The provider could not be reached.
    #[error("Metadata provider unavailable: {details}")]
    Unavailable {
        /// Details about the failure
        details: String,
    },
}

impl MetadataError {
    /// Create a `NotFound` error.
    pub fn not_found(entity: impl ToString) -> Self {
        MetadataError::NotFound {
            entity: entity.to_string(),
        }
    }
}
