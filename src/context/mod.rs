// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Situational context for narrative assembly
//!
//! A [`TranslationContext`] carries the caller's preferences plus time and market
//! information: block time, congestion class, native-asset price and gas price.

mod market;

pub use market::MarketContextAnalyzer;

use async_trait::async_trait;

use crate::errors::ContextError;
use crate::types::translation::{TranslationContext, TranslationRequest};

#[async_trait]
pub trait ContextAnalyzer: Send + Sync {
    /// Build the context for a request, starting from any context the caller supplied
    async fn analyze_context(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationContext, ContextError>;

    /// Fill in market information a partial context lacks
    async fn enrich_context(&self, context: &mut TranslationContext) -> Result<(), ContextError>;
}
