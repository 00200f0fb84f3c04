// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for translator operations.
//!
//! Telemetry stays out of business logic: instead of `#[instrument]` attributes, each
//! instrumented operation has a span helper here and attaches it with
//! [`tracing::Instrument`] so the span is entered on every poll of the future.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use tracing::{Level, Span};

use crate::types::locale::DetailLevel;
use crate::types::translation::EntityKind;

/// Create span for translating one transaction.
///
/// Parent: None (root span for this operation)
/// Children: enrich_translation span
#[inline]
pub(crate) fn translate_transaction(hash: TxHash, detail_level: DetailLevel) -> Span {
    tracing::span!(
        Level::INFO,
        "semioscribe.translate_transaction",
        tx_hash = %hash,
        detail_level = %detail_level,
    )
}

/// Create span for translating one address.
///
/// Parent: None (root span for this operation)
/// Children: enrich_translation span
#[inline]
pub(crate) fn translate_address(address: Address, detail_level: DetailLevel) -> Span {
    tracing::span!(
        Level::INFO,
        "semioscribe.translate_address",
        address = %address,
        detail_level = %detail_level,
    )
}

/// Create span for translating one contract.
///
/// Parent: None (root span for this operation)
/// Children: enrich_translation span
#[inline]
pub(crate) fn translate_contract(address: Address, detail_level: DetailLevel) -> Span {
    tracing::span!(
        Level::INFO,
        "semioscribe.translate_contract",
        contract = %address,
        detail_level = %detail_level,
    )
}

/// Create span for the optional enrichment pass.
///
/// Parent: one of the translate_* spans
#[inline]
pub(crate) fn enrich_translation(kind: EntityKind, timeout: Duration) -> Span {
    tracing::debug_span!(
        "semioscribe.enrich_translation",
        kind = %kind,
        timeout_ms = timeout.as_millis() as u64,
    )
}

/// Create span for the background cache sweep task.
///
/// Parent: None (lives as long as the translator is running)
#[inline]
pub(crate) fn cache_sweep(interval: Duration) -> Span {
    tracing::debug_span!(
        "semioscribe.cache_sweep",
        interval_ms = interval.as_millis() as u64,
    )
}
