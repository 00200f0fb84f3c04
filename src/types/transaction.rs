// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw and parsed transaction types
//!
//! [`RawTransaction`] and [`RawReceipt`] are the hand-off types from whatever RPC client
//! fetched the data; [`ParsedTransaction`] is what the parser produces from them.

use super::address::AddressInfo;
use super::contract::{EventInfo, FunctionInfo};
use super::gas::{GasAnalysis, GasPrice};
use super::wei::WeiAmount;
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_rpc_types::Log;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A transaction as fetched from a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub hash: TxHash,
    pub from: Address,
    /// `None` for contract creation
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: GasPrice,
    pub block_number: Option<u64>,
    pub block_timestamp: Option<DateTime<Utc>>,
}

/// Outcome of executing a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReceipt {
    pub success: bool,
    pub gas_used: u64,
    /// Price actually paid; falls back to the transaction's gas price when absent
    pub effective_gas_price: Option<GasPrice>,
    pub logs: Vec<Log>,
}

/// What a transaction does at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Plain native-value transfer with empty call data
    ValueTransfer,
    /// Call into a contract
    ContractInteraction,
    /// Deployment; the transaction has no recipient
    ContractCreation,
}

impl TransactionKind {
    pub fn classify(to: Option<Address>, input: &[u8]) -> Self {
        match to {
            None => TransactionKind::ContractCreation,
            Some(_) if input.is_empty() => TransactionKind::ValueTransfer,
            Some(_) => TransactionKind::ContractInteraction,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::ValueTransfer => "value_transfer",
            TransactionKind::ContractInteraction => "contract_interaction",
            TransactionKind::ContractCreation => "contract_creation",
        }
    }
}

/// Execution status from the receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn from_receipt(receipt: &RawReceipt) -> Self {
        if receipt.success {
            TransactionStatus::Success
        } else {
            TransactionStatus::Failed
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
        })
    }
}

/// A decoded function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub function: FunctionInfo,
    /// Parameter name to canonical value (decimal integers, checksummed addresses)
    pub raw_parameters: BTreeMap<String, String>,
    /// Parameter name to display value
    pub formatted_parameters: BTreeMap<String, String>,
    pub description: String,
}

/// Token metadata attached to a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// An ERC-20 `Transfer` observed in the receipt logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub from: Address,
    pub to: Address,
    pub token: TokenInfo,
    pub amount: U256,
    /// Amount formatted with the token's decimals and symbol
    pub formatted_amount: String,
}

/// Raw topics and data kept alongside a decoded event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventData {
    pub topics: Vec<String>,
    pub data: String,
}

/// A log matched against an event catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    pub event: EventInfo,
    /// Contract that emitted the log
    pub contract: Address,
    pub raw_parameters: BTreeMap<String, String>,
    pub formatted_parameters: BTreeMap<String, String>,
    pub description: String,
    pub log_index: Option<u64>,
    /// Present when raw-data inclusion is enabled
    pub raw: Option<RawEventData>,
}

/// A transaction after parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub hash: TxHash,
    pub kind: TransactionKind,
    pub from: AddressInfo,
    /// `None` for contract creation
    pub to: Option<AddressInfo>,
    pub value: WeiAmount,
    pub method_call: Option<MethodCall>,
    pub token_transfers: Vec<TokenTransfer>,
    pub events: Vec<DecodedEvent>,
    pub gas_analysis: GasAnalysis,
    pub status: TransactionStatus,
    pub block_number: Option<u64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ParsedTransaction {
    pub fn is_failed(&self) -> bool {
        self.status == TransactionStatus::Failed
    }

    /// Whether the recipient is known to hold code
    pub fn targets_contract(&self) -> bool {
        self.to
            .as_ref()
            .is_some_and(|to| to.address_type.is_contract())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_transaction_kind() {
        let to = Some(Address::ZERO);
        assert_eq!(
            TransactionKind::classify(to, &[]),
            TransactionKind::ValueTransfer
        );
        assert_eq!(
            TransactionKind::classify(to, &[0xa9, 0x05, 0x9c, 0xbb]),
            TransactionKind::ContractInteraction
        );
        assert_eq!(
            TransactionKind::classify(None, &[0x60, 0x80]),
            TransactionKind::ContractCreation
        );
    }

    #[test]
    fn test_status_from_receipt() {
        let receipt = RawReceipt {
            success: false,
            gas_used: 21_000,
            effective_gas_price: None,
            logs: Vec::new(),
        };
        assert_eq!(
            TransactionStatus::from_receipt(&receipt),
            TransactionStatus::Failed
        );
    }
}
