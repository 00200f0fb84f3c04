// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction parsing
//!
//! Turns a [`RawTransaction`] and its [`RawReceipt`] into a [`ParsedTransaction`]: resolved
//! counterparties, decoded method call, token transfers, decoded events and gas analysis.

mod standard;

pub use standard::StandardTransactionParser;

use async_trait::async_trait;

use crate::errors::ParseError;
use crate::types::contract::ContractInfo;
use crate::types::gas::GasAnalysis;
use crate::types::locale::Language;
use crate::types::transaction::{MethodCall, ParsedTransaction, RawReceipt, RawTransaction};

#[async_trait]
pub trait TransactionParser: Send + Sync {
    /// Parse a transaction, formatting amounts for `language`. Counterparty resolution
    /// failures abort with [`ParseError::Resolution`]; undecodable call data and logs do not.
    async fn parse_transaction(
        &self,
        transaction: &RawTransaction,
        receipt: &RawReceipt,
        language: Language,
    ) -> Result<ParsedTransaction, ParseError>;

    /// Decode call data against `contract`'s catalog, then the well-known selectors.
    ///
    /// Fails with [`ParseError::InsufficientData`] below 4 bytes and
    /// [`ParseError::UnknownSelector`] when no catalog has the selector.
    async fn decode_method_call(
        &self,
        input: &[u8],
        contract: Option<&ContractInfo>,
        language: Language,
    ) -> Result<MethodCall, ParseError>;

    fn analyze_gas_usage(&self, transaction: &RawTransaction, receipt: &RawReceipt) -> GasAnalysis;
}
