// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known addresses, signatures and thresholds
//!
//! Centralizes the tables the offline resolvers and the narrative rules are seeded from.

use crate::types::address::AddressType;
use alloy_primitives::{address, Address};

/// Gas price above which a recommendation to wait for cheaper gas is emitted
pub const HIGH_GAS_PRICE_GWEI: u64 = 50;

/// Gas efficiency below which a transaction is flagged for over-reserving gas
pub const LOW_GAS_EFFICIENCY: f64 = 0.5;

/// Largest accepted `enrichment.max_related_txs`
pub const MAX_RELATED_TXS_LIMIT: usize = 100;

/// Price snapshots kept per symbol; older ones are dropped first
pub const MAX_PRICE_SNAPSHOTS: usize = 1_000;

/// Largest accepted `value_formatter.decimal_places`
pub const MAX_DECIMAL_PLACES: u32 = 18;

/// A labeled address shipped with the crate
#[derive(Debug, Clone, Copy)]
pub struct WellKnownAddress {
    pub address: Address,
    pub label: &'static str,
    pub address_type: AddressType,
    pub tags: &'static [&'static str],
}

/// Labels applied before any custom label from configuration
pub const COMMON_LABELS: &[WellKnownAddress] = &[
    WellKnownAddress {
        address: Address::ZERO,
        label: "Null Address",
        address_type: AddressType::Eoa,
        tags: &["system"],
    },
    WellKnownAddress {
        address: address!("000000000000000000000000000000000000dead"),
        label: "Burn Address",
        address_type: AddressType::Eoa,
        tags: &["burn"],
    },
    WellKnownAddress {
        address: address!("dac17f958d2ee523a2206206994597c13d831ec7"),
        label: "Tether USD (USDT)",
        address_type: AddressType::Contract,
        tags: &["token", "stablecoin"],
    },
    WellKnownAddress {
        address: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
        label: "USD Coin (USDC)",
        address_type: AddressType::Contract,
        tags: &["token", "stablecoin"],
    },
    WellKnownAddress {
        address: address!("6b175474e89094c44da98b954eedeac495271d0f"),
        label: "Dai Stablecoin (DAI)",
        address_type: AddressType::Contract,
        tags: &["token", "stablecoin"],
    },
    WellKnownAddress {
        address: address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984"),
        label: "Uniswap (UNI)",
        address_type: AddressType::Contract,
        tags: &["token", "governance"],
    },
    WellKnownAddress {
        address: address!("7a250d5630b4cf539739df2c5dacb4c659f2488d"),
        label: "Uniswap V2: Router 2",
        address_type: AddressType::Defi,
        tags: &["defi", "dex"],
    },
    WellKnownAddress {
        address: address!("4ddc2d193948926d02f9b1fe9e1daa0718270ed5"),
        label: "Compound Ether (cETH)",
        address_type: AddressType::Defi,
        tags: &["defi", "lending"],
    },
    WellKnownAddress {
        address: address!("5d3a536e4d6dbd6114cc1ead35777bab948e3643"),
        label: "Compound Dai (cDAI)",
        address_type: AddressType::Defi,
        tags: &["defi", "lending"],
    },
];

/// Canonical event signatures of the token standards
pub mod event_signatures {
    pub const TRANSFER: &str = "Transfer(address,address,uint256)";
    pub const APPROVAL: &str = "Approval(address,address,uint256)";
    pub const APPROVAL_FOR_ALL: &str = "ApprovalForAll(address,address,bool)";
    pub const TRANSFER_SINGLE: &str = "TransferSingle(address,address,address,uint256,uint256)";
    pub const TRANSFER_BATCH: &str =
        "TransferBatch(address,address,address,uint256[],uint256[])";
}

/// Canonical function signatures of the token standards
pub mod method_signatures {
    pub const TRANSFER: &str = "transfer(address,uint256)";
    pub const TRANSFER_FROM: &str = "transferFrom(address,address,uint256)";
    pub const APPROVE: &str = "approve(address,uint256)";
    pub const BALANCE_OF: &str = "balanceOf(address)";
    pub const TOTAL_SUPPLY: &str = "totalSupply()";
    pub const NAME: &str = "name()";
    pub const SYMBOL: &str = "symbol()";
    pub const DECIMALS: &str = "decimals()";
    pub const OWNER_OF: &str = "ownerOf(uint256)";
    pub const SAFE_TRANSFER_FROM: &str = "safeTransferFrom(address,address,uint256)";
    pub const SAFE_TRANSFER_FROM_WITH_DATA: &str =
        "safeTransferFrom(address,address,uint256,bytes)";
    pub const SET_APPROVAL_FOR_ALL: &str = "setApprovalForAll(address,bool)";
    pub const SAFE_TRANSFER_FROM_1155: &str =
        "safeTransferFrom(address,address,uint256,uint256,bytes)";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_common_labels_are_unique() {
        let unique: HashSet<Address> = COMMON_LABELS.iter().map(|l| l.address).collect();
        assert_eq!(unique.len(), COMMON_LABELS.len());
    }

    #[test]
    fn test_usdt_label() {
        let usdt = COMMON_LABELS
            .iter()
            .find(|l| l.address == address!("dac17f958d2ee523a2206206994597c13d831ec7"))
            .unwrap();
        assert!(usdt.label.contains("USDT"));
        assert!(usdt.tags.contains(&"stablecoin"));
    }
}
