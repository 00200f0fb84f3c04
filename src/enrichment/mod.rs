// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Best-effort enrichment of finished translations
//!
//! An [`EnrichmentEngine`] attaches related items such as recent transactions and price
//! snapshots; a [`MetadataProvider`] supplies category, risk and tag metadata. Neither can
//! fail a translate call: the translator logs their errors and keeps the unenriched result.

mod history;
mod metadata;

pub use history::HistoryEnrichmentEngine;
pub use metadata::InMemoryMetadataProvider;

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::errors::{EnrichmentError, MetadataError};
use crate::types::locale::Currency;
use crate::types::metadata::{AddressMetadata, ContractMetadata, PriceData, TransactionMetadata};
use crate::types::translation::{TranslationRequest, TranslationResult};

#[async_trait]
pub trait EnrichmentEngine: Send + Sync {
    /// Attach related items to `result`
    async fn enrich_translation(
        &self,
        result: &mut TranslationResult,
        request: &TranslationRequest,
    ) -> Result<(), EnrichmentError>;

    async fn get_price_data(
        &self,
        symbol: &str,
        currency: Currency,
    ) -> Result<PriceData, EnrichmentError>;

    /// Most recent transactions involving `address`, newest first
    async fn get_related_transactions(
        &self,
        address: Address,
        limit: usize,
    ) -> Result<Vec<TxHash>, EnrichmentError>;
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn get_transaction_metadata(
        &self,
        hash: TxHash,
    ) -> Result<TransactionMetadata, MetadataError>;

    async fn get_address_metadata(&self, address: Address)
        -> Result<AddressMetadata, MetadataError>;

    async fn get_contract_metadata(
        &self,
        address: Address,
    ) -> Result<ContractMetadata, MetadataError>;
}
