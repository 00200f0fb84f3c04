// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::MetadataProvider;
use crate::errors::MetadataError;
use crate::types::metadata::{AddressMetadata, ContractMetadata, TransactionMetadata};

/// Metadata provider backed by maps filled by the caller
#[derive(Debug, Default)]
pub struct InMemoryMetadataProvider {
    transactions: RwLock<HashMap<TxHash, TransactionMetadata>>,
    addresses: RwLock<HashMap<Address, AddressMetadata>>,
    contracts: RwLock<HashMap<Address, ContractMetadata>>,
}

impl InMemoryMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_transaction(&self, hash: TxHash, metadata: TransactionMetadata) {
        self.transactions.write().await.insert(hash, metadata);
    }

    pub async fn insert_address(&self, address: Address, metadata: AddressMetadata) {
        self.addresses.write().await.insert(address, metadata);
    }

    pub async fn insert_contract(&self, address: Address, metadata: ContractMetadata) {
        self.contracts.write().await.insert(address, metadata);
    }
}

#[async_trait]
impl MetadataProvider for InMemoryMetadataProvider {
    async fn get_transaction_metadata(
        &self,
        hash: TxHash,
    ) -> Result<TransactionMetadata, MetadataError> {
        self.transactions
            .read()
            .await
            .get(&hash)
            .cloned()
            .ok_or_else(|| MetadataError::not_found(hash))
    }

    async fn get_address_metadata(
        &self,
        address: Address,
    ) -> Result<AddressMetadata, MetadataError> {
        self.addresses
            .read()
            .await
            .get(&address)
            .cloned()
            .ok_or_else(|| MetadataError::not_found(address))
    }

    async fn get_contract_metadata(
        &self,
        address: Address,
    ) -> Result<ContractMetadata, MetadataError> {
        self.contracts
            .read()
            .await
            .get(&address)
            .cloned()
            .ok_or_else(|| MetadataError::not_found(address))
    }
}
