// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::ContextAnalyzer;
use crate::config::MarketConfig;
use crate::errors::ContextError;
use crate::types::gas::GasPrice;
use crate::types::locale::Currency;
use crate::types::translation::{
    CongestionLevel, MarketContext, TimeContext, TranslationContext, TranslationPayload,
    TranslationRequest,
};

/// Context analyzer backed by the configured market snapshot
///
/// Congestion is classified from the transaction's gas price, or from the configured
/// reference gas price for address and contract requests.
#[derive(Debug, Clone)]
pub struct MarketContextAnalyzer {
    market: MarketConfig,
}

impl MarketContextAnalyzer {
    pub fn new(market: MarketConfig) -> Self {
        Self { market }
    }

    fn market_context(&self, currency: Currency, gas_price: GasPrice) -> MarketContext {
        MarketContext {
            native_symbol: self.market.native_symbol.clone(),
            native_price: self.market.native_price_in(currency),
            currency,
            gas_price,
            network_utilization: None,
        }
    }
}

impl Default for MarketContextAnalyzer {
    fn default() -> Self {
        Self::new(MarketConfig::default())
    }
}

#[async_trait]
impl ContextAnalyzer for MarketContextAnalyzer {
    async fn analyze_context(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationContext, ContextError> {
        let mut context = request
            .context
            .clone()
            .unwrap_or_else(|| TranslationContext::from_options(&request.options));
        context.preferences = request.options.clone();

        let (block_time, gas_price) = match &request.payload {
            TranslationPayload::Transaction {
                transaction,
                receipt,
            } => (
                transaction.block_timestamp,
                receipt.effective_gas_price.unwrap_or(transaction.gas_price),
            ),
            TranslationPayload::Address { .. } | TranslationPayload::Contract { .. } => (
                None,
                GasPrice::from_gwei(self.market.reference_gas_price_gwei),
            ),
        };

        if context.time.is_none() {
            let now = Utc::now();
            context.time = Some(TimeContext {
                block_time,
                current_time: now,
                time_since_block: block_time.and_then(|t| (now - t).to_std().ok()),
                congestion: CongestionLevel::from_gas_price(gas_price),
            });
        }
        if context.market.is_none() {
            context.market = Some(self.market_context(request.options.currency, gas_price));
        }

        self.enrich_context(&mut context).await?;
        Ok(context)
    }

    async fn enrich_context(&self, context: &mut TranslationContext) -> Result<(), ContextError> {
        let congestion = context
            .time
            .as_ref()
            .map(|time| time.congestion)
            .ok_or_else(|| ContextError::Incomplete {
                details: "no time context to derive congestion from".to_string(),
            })?;

        let currency = context.preferences.currency;
        let reference = GasPrice::from_gwei(self.market.reference_gas_price_gwei);
        let market = context
            .market
            .get_or_insert_with(|| self.market_context(currency, reference));
        if market.native_price.is_none() {
            market.native_price = self.market.native_price_in(market.currency);
        }
        if market.network_utilization.is_none() {
            market.network_utilization = Some(congestion.estimated_utilization());
        }
        if market.native_price.is_none() {
            debug!(currency = %market.currency.code(), "No conversion rate for native price");
        }
        Ok(())
    }
}
