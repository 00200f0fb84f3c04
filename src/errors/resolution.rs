// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for address resolution and contract analysis.
//!
//! These errors come from [`AddressResolver`](crate::AddressResolver) and
//! [`ContractAnalyzer`](crate::ContractAnalyzer) implementations.

use alloy_primitives::Address;

/// Errors that can occur while resolving addresses or analyzing contracts.
///
/// # Examples
///
/// ```rust,ignore
/// use semioscribe::{ContractAnalyzer, ResolutionError};
///
/// match analyzer.resolve_proxy(address).await {
///     Ok(implementation) => println!("implementation: {implementation}"),
///     Err(ResolutionError::NotAProxy { .. }) => println!("not upgradeable"),
///     Err(e) => eprintln!("lookup failed: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// Nothing is known about the requested entity.
    #[error("No {entity} found for {address}")]
    NotFound {
        /// What was being looked up ("address", "contract", "alias", ...)
        entity: String,
        /// Address that was looked up
        address: Address,
    },

    /// A standard name could not be mapped to a supported token standard.
    #[error("Unsupported token standard: {standard}")]
    UnsupportedStandard {
        /// The unrecognized standard name
        standard: String,
    },

    /// The contract is a proxy but its implementation could not be determined.
    #[error("Failed to resolve proxy implementation for {address}: {details}")]
    ProxyResolutionFailed {
        /// Proxy contract address
        address: Address,
        /// Why the implementation is unknown
        details: String,
    },

    /// The contract is not a proxy.
    #[error("Contract {address} is not a proxy")]
    NotAProxy {
        /// Contract address
        address: Address,
    },

    /// Contract analysis failed for a reason other than absence.
    #[error("Contract analysis failed for {address}: {details}")]
    AnalysisFailed {
        /// Contract address
        address: Address,
        /// Details about the failure
        details: String,
    },

    /// The requested lookup is switched off in configuration.
    #[error("Feature disabled by configuration: {feature}")]
    FeatureDisabled {
        /// Configuration flag that disables the lookup
        feature: &'static str,
    },

    /// A backing service (RPC node, label API) failed.
    #[error("Backend failure during {operation}: {source}")]
    Backend {
        /// Operation that was in progress
        operation: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ResolutionError {
    /// Create a `NotFound` error.
    pub fn not_found(entity: impl Into<String>, address: Address) -> Self {
        ResolutionError::NotFound {
            entity: entity.into(),
            address,
        }
    }

    /// Create an `UnsupportedStandard` error.
    pub fn unsupported_standard(standard: impl Into<String>) -> Self {
        ResolutionError::UnsupportedStandard {
            standard: standard.into(),
        }
    }

    /// Create a `ProxyResolutionFailed` error.
    pub fn proxy_resolution_failed(address: Address, details: impl Into<String>) -> Self {
        ResolutionError::ProxyResolutionFailed {
            address,
            details: details.into(),
        }
    }

    /// Create an `AnalysisFailed` error.
    pub fn analysis_failed(address: Address, details: impl Into<String>) -> Self {
        ResolutionError::AnalysisFailed {
            address,
            details: details.into(),
        }
    }

    /// Create a `Backend` error from any error type.
    pub fn backend<E>(operation: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ResolutionError::Backend {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Whether the error only signals absence of data
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
