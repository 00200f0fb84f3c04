// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for transaction, call data and event log parsing.

use super::ResolutionError;
use alloy_primitives::{Selector, B256};

/// Errors that can occur while parsing raw transactions, call data or logs.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Call data is shorter than a function selector.
    #[error("Call data too short: expected at least {expected} bytes, got {actual}")]
    InsufficientData {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes available
        actual: usize,
    },

    /// No catalog knows the 4-byte selector.
    #[error("Unknown function selector {selector}")]
    UnknownSelector {
        /// The selector from the call data
        selector: Selector,
    },

    /// No catalog knows the event topic.
    #[error("Unknown event topic {topic}")]
    UnknownEvent {
        /// The leading topic of the log
        topic: B256,
    },

    /// The log carries no topics, so it cannot be matched to an event.
    #[error("Log has no topics (anonymous event)")]
    MissingTopic,

    /// ABI decoding failed.
    #[error("Failed to decode {item}: {details}")]
    DecodeFailed {
        /// What was being decoded
        item: String,
        /// Decoder message
        details: String,
    },

    /// A counterparty could not be resolved.
    #[error("Counterparty resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
}

impl ParseError {
    /// Create an `InsufficientData` error.
    pub fn insufficient_data(expected: usize, actual: usize) -> Self {
        ParseError::InsufficientData { expected, actual }
    }

    /// Create a `DecodeFailed` error.
    pub fn decode_failed(item: impl Into<String>, details: impl std::fmt::Display) -> Self {
        ParseError::DecodeFailed {
            item: item.into(),
            details: details.to_string(),
        }
    }
}
