// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Deterministic warning, recommendation and confidence rules

use crate::config::constants::LOW_GAS_EFFICIENCY;
use crate::types::address::AddressInfo;
use crate::types::contract::{ContractInfo, ContractStandard};
use crate::types::gas::GasPrice;
use crate::types::transaction::{ParsedTransaction, TransactionKind};

pub const FAILED_TRANSACTION_WARNING: &str = "This transaction failed and consumed gas";
pub const LOW_GAS_EFFICIENCY_WARNING: &str =
    "This transaction used less than half of its gas limit";
pub const UNRECOGNIZED_METHOD_WARNING: &str =
    "Contract interaction without a recognized method call";
pub const UNKNOWN_IMPLEMENTATION_WARNING: &str =
    "Proxy implementation is unknown; the contract's behavior can change with an upgrade";

pub const HIGH_GAS_PRICE_RECOMMENDATION: &str =
    "Consider using a lower gas price during off-peak hours";
pub const UNVERIFIED_CONTRACT_RECOMMENDATION: &str =
    "Be cautious when interacting with unverified contracts";

pub fn transaction_warnings(tx: &ParsedTransaction) -> Vec<String> {
    let mut warnings = Vec::new();
    if tx.is_failed() {
        warnings.push(FAILED_TRANSACTION_WARNING.to_string());
    }
    if tx.gas_analysis.efficiency < LOW_GAS_EFFICIENCY {
        warnings.push(LOW_GAS_EFFICIENCY_WARNING.to_string());
    }
    if tx.targets_contract() && tx.method_call.is_none() {
        warnings.push(UNRECOGNIZED_METHOD_WARNING.to_string());
    }
    warnings
}

/// Recommendations; `high_gas_price` is exclusive
pub fn transaction_recommendations(tx: &ParsedTransaction, high_gas_price: GasPrice) -> Vec<String> {
    let mut recommendations = Vec::new();
    if tx.gas_analysis.gas_price > high_gas_price {
        recommendations.push(HIGH_GAS_PRICE_RECOMMENDATION.to_string());
    }
    if tx.to.as_ref().is_some_and(|to| to.address_type.is_contract() && !to.verified) {
        recommendations.push(UNVERIFIED_CONTRACT_RECOMMENDATION.to_string());
    }
    recommendations
}

pub fn contract_warnings(info: &ContractInfo) -> Vec<String> {
    let mut warnings = Vec::new();
    if info.is_proxy && info.implementation.is_none() {
        warnings.push(UNKNOWN_IMPLEMENTATION_WARNING.to_string());
    }
    warnings
}

pub fn contract_recommendations(info: &ContractInfo) -> Vec<String> {
    if info.standard == ContractStandard::Unknown && info.functions.is_empty() {
        vec![UNVERIFIED_CONTRACT_RECOMMENDATION.to_string()]
    } else {
        Vec::new()
    }
}

/// Share of the transaction the pipeline recognized, 0.5 to 1.0
pub fn transaction_confidence(tx: &ParsedTransaction) -> f64 {
    let understood_call = match tx.kind {
        TransactionKind::ValueTransfer | TransactionKind::ContractCreation => true,
        TransactionKind::ContractInteraction => tx.method_call.is_some(),
    };
    let labeled = tx.from.is_labeled() || tx.to.as_ref().is_some_and(AddressInfo::is_labeled);
    let has_logs = !tx.events.is_empty() || !tx.token_transfers.is_empty();
    tenths(5 + 3 * u8::from(understood_call) + u8::from(labeled) + u8::from(has_logs))
}

pub fn address_confidence(info: &AddressInfo) -> f64 {
    tenths(
        5 + 2 * u8::from(info.is_labeled())
            + 2 * u8::from(info.verified)
            + u8::from(info.alias.is_some()),
    )
}

pub fn contract_confidence(info: &ContractInfo) -> f64 {
    let has_catalog = !info.functions.is_empty() || !info.events.is_empty();
    let implementation_known = !info.is_proxy || info.implementation.is_some();
    tenths(
        5 + 2 * u8::from(info.standard != ContractStandard::Unknown)
            + 2 * u8::from(has_catalog)
            + u8::from(implementation_known),
    )
}

fn tenths(points: u8) -> f64 {
    f64::from(points.min(10)) / 10.0
}
