// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error type for situational context analysis.

/// Errors from [`ContextAnalyzer`](crate::ContextAnalyzer) implementations.
///
/// The translator falls back to a context built from the request options when analysis
/// fails.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// Market data could not be obtained.
    #[error("Market data unavailable: {details}")]
    MarketDataUnavailable {
        /// Details about the failure
        details: String,
    },

    /// The request does not carry enough information to build a context.
    #[error("Cannot analyze context: {details}")]
    Incomplete {
        /// What is missing
        details: String,
    },
}
