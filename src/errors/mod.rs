// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the semioscribe library.
//!
//! Each pipeline concern owns a fine-grained error enum, and [`TranslationError`]
//! unifies the ones that can abort a translate call:
//!
//! - [`ResolutionError`] - address resolution and contract analysis
//! - [`ParseError`] - call data, log and transaction parsing
//! - [`ConfigError`] - configuration validation and loading
//! - [`TemplateError`] - template rendering
//! - [`EnrichmentError`], [`MetadataError`] and [`ContextError`] - best-effort stages whose
//!   failures are logged and never surface from the translator
//!
//! # Examples
//!
//! ```rust,ignore
//! use semioscribe::{TranslationError, TranslationStep, Translator};
//!
//! match translator.translate_address(address, options).await {
//!     Ok(result) => println!("{}", result.summary),
//!     Err(TranslationError::Resolution { step: TranslationStep::AddressResolution, source }) => {
//!         eprintln!("resolver failed: {source}");
//!     }
//!     Err(e) => eprintln!("translation failed: {e}"),
//! }
//! ```

mod config;
mod context;
mod enrichment;
mod parse;
mod resolution;
mod template;

pub use config::ConfigError;
pub use context::ContextError;
pub use enrichment::{EnrichmentError, MetadataError};
pub use parse::ParseError;
pub use resolution::ResolutionError;
pub use template::TemplateError;

use std::fmt;

/// Pipeline sub-step that failed during a translate call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationStep {
    /// Resolving an address into [`AddressInfo`](crate::AddressInfo)
    AddressResolution,
    /// Analyzing a contract into [`ContractInfo`](crate::ContractInfo)
    ContractAnalysis,
    /// Parsing a raw transaction and receipt
    TransactionParsing,
}

impl fmt::Display for TranslationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::AddressResolution => "address resolution",
            Self::ContractAnalysis => "contract analysis",
            Self::TransactionParsing => "transaction parsing",
        };
        f.write_str(step)
    }
}

/// Unified error type for translator operations
///
/// Resolution and parsing failures carry the [`TranslationStep`] that failed. Nothing is
/// cached when a translate call returns one of these.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// An address or contract lookup failed
    #[error("Translation failed during {step}: {source}")]
    Resolution {
        step: TranslationStep,
        #[source]
        source: ResolutionError,
    },

    /// The raw transaction could not be parsed
    #[error("Translation failed during {step}: {source}")]
    Parse {
        step: TranslationStep,
        #[source]
        source: ParseError,
    },

    /// Configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `start` was called on a translator that is already running
    #[error("Translator is already running; call stop() before starting it again")]
    AlreadyRunning,

    /// The translator is globally disabled by configuration
    #[error("Translator is disabled by configuration")]
    Disabled,
}

impl TranslationError {
    /// Wrap a resolution failure with the step it occurred in
    pub fn resolution(step: TranslationStep, source: ResolutionError) -> Self {
        Self::Resolution { step, source }
    }

    /// Wrap a parsing failure; parsing always happens in [`TranslationStep::TransactionParsing`]
    pub fn parse(source: ParseError) -> Self {
        Self::Parse {
            step: TranslationStep::TransactionParsing,
            source,
        }
    }

    /// The failing sub-step, when the error came from the pipeline
    pub fn step(&self) -> Option<TranslationStep> {
        match self {
            Self::Resolution { step, .. } | Self::Parse { step, .. } => Some(*step),
            _ => None,
        }
    }
}
