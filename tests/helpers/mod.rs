// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for semioscribe integration tests
//!
//! Provides mock resolvers and enrichment engines plus builders for raw transactions, so
//! the translator can be exercised without a node.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{address, keccak256, Address, Bytes, TxHash, U256};
use alloy_rpc_types::Log;
use alloy_sol_types::{sol, SolCall, SolEvent};
use async_trait::async_trait;
use chrono::Utc;
use semioscribe::events::Transfer;
use semioscribe::{
    AddressInfo, AddressResolver, AddressType, ContractRegistry, Currency, EnrichmentEngine,
    EnrichmentError, GasPrice, PriceData, RawReceipt, RawTransaction, RelatedItem,
    RelatedItemKind, ResolutionError, TranslationRequest, TranslationResult, Translator,
    TranslatorConfig,
};

sol! {
    function transfer(address to, uint256 amount) returns (bool);
}

/// Resolves to an exchange identity: alias, verified, tagged `exchange`
pub const EXCHANGE: Address = address!("28c6c06298d514db089934071355e5743bf21111");
/// Resolves to a labeled user wallet
pub const USER: Address = address!("742d35cc6634c0532925a3b8d4c9db96c4b52222");
/// Resolves to a labeled contract
pub const VAULT: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce36060000");
/// Resolves to nothing in particular
pub const STRANGER: Address = address!("5aeda56215b167893e80b4fe645ba6d5bab767de");

pub const DAI: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
pub const PROXY: Address = address!("4444444444444444444444444444444444444444");
pub const IMPLEMENTATION: Address = address!("5555555555555555555555555555555555555555");

pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

/// Resolver that classifies addresses by the last four hex digits
///
/// - `...1111`: exchange with alias `exchange.eth`, verified, tagged `exchange`
/// - `...2222`: labeled externally owned account
/// - `...0000`: labeled contract
/// - anything else: unlabeled
#[derive(Debug, Default)]
pub struct PatternResolver {
    failing: HashSet<Address>,
}

impl PatternResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every lookup of `address` fail with a backend error
    pub fn failing_for(mut self, address: Address) -> Self {
        self.failing.insert(address);
        self
    }
}

pub fn classify(address: Address) -> AddressInfo {
    let hex = address.to_string().to_lowercase();
    if hex.ends_with("1111") {
        AddressInfo::new(address, "Exchange Hot Wallet", AddressType::Exchange)
            .with_alias("exchange.eth")
            .with_tag("exchange")
            .verified()
    } else if hex.ends_with("2222") {
        AddressInfo::new(address, "User Wallet", AddressType::Eoa)
    } else if hex.ends_with("0000") {
        AddressInfo::new(address, "Yield Vault", AddressType::Contract)
    } else {
        AddressInfo::unlabeled(address)
    }
}

#[async_trait]
impl AddressResolver for PatternResolver {
    async fn resolve_address(&self, address: Address) -> Result<AddressInfo, ResolutionError> {
        if self.failing.contains(&address) {
            return Err(ResolutionError::backend(
                "resolve_address",
                std::io::Error::other("label service unreachable"),
            ));
        }
        Ok(classify(address))
    }

    async fn resolve_ens(&self, address: Address) -> Result<String, ResolutionError> {
        classify(address)
            .alias
            .ok_or_else(|| ResolutionError::not_found("alias", address))
    }

    fn address_label(&self, address: Address) -> String {
        classify(address).display_name()
    }
}

/// Wraps a resolver and counts `resolve_address` calls
#[derive(Debug, Default)]
pub struct CountingResolver {
    inner: PatternResolver,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(inner: PatternResolver) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for CountingResolver {
    async fn resolve_address(&self, address: Address) -> Result<AddressInfo, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_address(address).await
    }

    async fn resolve_ens(&self, address: Address) -> Result<String, ResolutionError> {
        self.inner.resolve_ens(address).await
    }

    fn address_label(&self, address: Address) -> String {
        self.inner.address_label(address)
    }
}

/// Resolves every address to an account carrying the current label
#[derive(Debug)]
pub struct RelabelingResolver {
    label: Mutex<String>,
}

impl RelabelingResolver {
    pub fn new(label: &str) -> Self {
        Self {
            label: Mutex::new(label.to_string()),
        }
    }

    pub fn relabel(&self, label: &str) {
        *self.label.lock().unwrap() = label.to_string();
    }

    fn current(&self, address: Address) -> AddressInfo {
        let label = self.label.lock().unwrap().clone();
        AddressInfo::new(address, &label, AddressType::Eoa)
    }
}

#[async_trait]
impl AddressResolver for RelabelingResolver {
    async fn resolve_address(&self, address: Address) -> Result<AddressInfo, ResolutionError> {
        Ok(self.current(address))
    }

    async fn resolve_ens(&self, address: Address) -> Result<String, ResolutionError> {
        Err(ResolutionError::not_found("alias", address))
    }

    fn address_label(&self, address: Address) -> String {
        self.current(address).label
    }
}

/// Enrichment engine whose every source is down
#[derive(Debug, Default)]
pub struct FailingEnrichment;

#[async_trait]
impl EnrichmentEngine for FailingEnrichment {
    async fn enrich_translation(
        &self,
        result: &mut TranslationResult,
        _request: &TranslationRequest,
    ) -> Result<(), EnrichmentError> {
        // Partial writes must not leak into the returned translation
        result.related_items.push(related("partial"));
        Err(EnrichmentError::degraded("price feed offline"))
    }

    async fn get_price_data(
        &self,
        symbol: &str,
        _currency: Currency,
    ) -> Result<PriceData, EnrichmentError> {
        Err(EnrichmentError::PriceUnavailable {
            symbol: symbol.to_string(),
        })
    }

    async fn get_related_transactions(
        &self,
        _address: Address,
        _limit: usize,
    ) -> Result<Vec<TxHash>, EnrichmentError> {
        Err(EnrichmentError::degraded("history offline"))
    }
}

/// Enrichment engine that takes `delay` before attaching one related item
#[derive(Debug)]
pub struct SlowEnrichment {
    pub delay: Duration,
}

#[async_trait]
impl EnrichmentEngine for SlowEnrichment {
    async fn enrich_translation(
        &self,
        result: &mut TranslationResult,
        _request: &TranslationRequest,
    ) -> Result<(), EnrichmentError> {
        tokio::time::sleep(self.delay).await;
        result.related_items.push(related("slow"));
        result.metadata.enrichment_applied.push("slow".to_string());
        Ok(())
    }

    async fn get_price_data(
        &self,
        symbol: &str,
        currency: Currency,
    ) -> Result<PriceData, EnrichmentError> {
        tokio::time::sleep(self.delay).await;
        Ok(PriceData {
            symbol: symbol.to_string(),
            price: 1.0,
            currency,
            timestamp: Utc::now(),
            source: "slow".to_string(),
        })
    }

    async fn get_related_transactions(
        &self,
        _address: Address,
        _limit: usize,
    ) -> Result<Vec<TxHash>, EnrichmentError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

fn related(reference: &str) -> RelatedItem {
    RelatedItem {
        kind: RelatedItemKind::Transaction,
        reference: reference.to_string(),
        description: "test item".to_string(),
        relevance: 1.0,
    }
}

/// Registry with DAI as ERC-20 and a proxy with a known implementation
pub fn registry() -> ContractRegistry {
    let mut registry = ContractRegistry::default();
    registry.register_erc20(DAI, "Dai Stablecoin", "DAI", 18);
    registry.register_proxy(PROXY, "Vault Proxy", Some(IMPLEMENTATION));
    registry
}

/// Translator wired with the pattern resolver and the test registry
pub fn translator(config: TranslatorConfig) -> Translator {
    Translator::builder(config)
        .with_resolver(Arc::new(PatternResolver::new()))
        .with_analyzer(Arc::new(registry()))
        .build()
        .unwrap()
}

fn tx_hash(from: Address, to: Option<Address>, nonce: u64) -> TxHash {
    let mut preimage = from.to_vec();
    preimage.extend_from_slice(to.unwrap_or_default().as_slice());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    keccak256(preimage)
}

/// Native transfer with gas used equal to the 21 000 limit
pub fn eth_transfer(
    from: Address,
    to: Address,
    wei: u128,
    gwei: u64,
) -> (RawTransaction, RawReceipt) {
    contract_call(from, to, Bytes::new(), wei, 21_000, 21_000, gwei, true, Vec::new())
}

#[allow(clippy::too_many_arguments)]
pub fn contract_call(
    from: Address,
    to: Address,
    input: Bytes,
    wei: u128,
    gas_limit: u64,
    gas_used: u64,
    gwei: u64,
    success: bool,
    logs: Vec<Log>,
) -> (RawTransaction, RawReceipt) {
    let transaction = RawTransaction {
        hash: tx_hash(from, Some(to), gas_limit ^ gas_used ^ gwei),
        from,
        to: Some(to),
        value: U256::from(wei),
        input,
        nonce: 7,
        gas_limit,
        gas_price: GasPrice::from_gwei(gwei),
        block_number: Some(19_000_000),
        block_timestamp: Some(Utc::now()),
    };
    let receipt = RawReceipt {
        success,
        gas_used,
        effective_gas_price: None,
        logs,
    };
    (transaction, receipt)
}

/// ERC-20 `transfer` call on DAI with its `Transfer` log
pub fn dai_transfer(from: Address, to: Address, amount: U256) -> (RawTransaction, RawReceipt) {
    let input = transferCall { to, amount }.abi_encode();
    let log = Log {
        inner: alloy_primitives::Log {
            address: DAI,
            data: Transfer {
                from,
                to,
                value: amount,
            }
            .encode_log_data(),
        },
        log_index: Some(0),
        ..Default::default()
    };
    contract_call(from, DAI, input.into(), 0, 60_000, 51_000, 30, true, vec![log])
}

/// Opt-in log output: `RUST_LOG=semioscribe=debug cargo test`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
