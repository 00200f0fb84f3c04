// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Function and event catalogs of the token standards
//!
//! Used to seed registered contracts and as the well-known fallback tables when a
//! contract's own catalog has no match.

use std::sync::LazyLock;

use alloy_primitives::{Selector, B256};

use crate::config::constants::{event_signatures as ev, method_signatures as m};
use crate::types::contract::{EventInfo, FunctionInfo};

pub fn erc20_functions() -> Vec<FunctionInfo> {
    vec![
        FunctionInfo::from_signature(m::TRANSFER, &["to", "amount"], "Transfer tokens to an address"),
        FunctionInfo::from_signature(
            m::TRANSFER_FROM,
            &["from", "to", "amount"],
            "Transfer tokens on behalf of another address",
        ),
        FunctionInfo::from_signature(
            m::APPROVE,
            &["spender", "amount"],
            "Allow a spender to move tokens",
        ),
        FunctionInfo::from_signature(m::BALANCE_OF, &["owner"], "Read the token balance of an address"),
        FunctionInfo::from_signature(m::TOTAL_SUPPLY, &[], "Read the total token supply"),
        FunctionInfo::from_signature(m::NAME, &[], "Read the token name"),
        FunctionInfo::from_signature(m::SYMBOL, &[], "Read the token symbol"),
        FunctionInfo::from_signature(m::DECIMALS, &[], "Read the token decimals"),
    ]
}

pub fn erc20_events() -> Vec<EventInfo> {
    vec![
        EventInfo::from_signature(
            ev::TRANSFER,
            &[("from", true), ("to", true), ("value", false)],
            "Tokens moved between addresses",
        ),
        EventInfo::from_signature(
            ev::APPROVAL,
            &[("owner", true), ("spender", true), ("value", false)],
            "Spending allowance changed",
        ),
    ]
}

pub fn erc721_functions() -> Vec<FunctionInfo> {
    vec![
        FunctionInfo::from_signature(
            m::TRANSFER_FROM,
            &["from", "to", "tokenId"],
            "Transfer an NFT on behalf of its owner",
        ),
        FunctionInfo::from_signature(
            m::SAFE_TRANSFER_FROM,
            &["from", "to", "tokenId"],
            "Safely transfer an NFT",
        ),
        FunctionInfo::from_signature(
            m::SAFE_TRANSFER_FROM_WITH_DATA,
            &["from", "to", "tokenId", "data"],
            "Safely transfer an NFT with extra data",
        ),
        FunctionInfo::from_signature(m::APPROVE, &["approved", "tokenId"], "Approve an address for one NFT"),
        FunctionInfo::from_signature(
            m::SET_APPROVAL_FOR_ALL,
            &["operator", "approved"],
            "Allow or revoke an operator for all NFTs",
        ),
        FunctionInfo::from_signature(m::OWNER_OF, &["tokenId"], "Read the owner of an NFT"),
        FunctionInfo::from_signature(m::BALANCE_OF, &["owner"], "Read how many NFTs an address holds"),
    ]
}

pub fn erc721_events() -> Vec<EventInfo> {
    vec![
        EventInfo::from_signature(
            ev::TRANSFER,
            &[("from", true), ("to", true), ("tokenId", true)],
            "NFT moved between addresses",
        ),
        EventInfo::from_signature(
            ev::APPROVAL,
            &[("owner", true), ("approved", true), ("tokenId", true)],
            "NFT approval changed",
        ),
        EventInfo::from_signature(
            ev::APPROVAL_FOR_ALL,
            &[("owner", true), ("operator", true), ("approved", false)],
            "Operator approval changed",
        ),
    ]
}

pub fn erc1155_functions() -> Vec<FunctionInfo> {
    vec![
        FunctionInfo::from_signature(
            m::SAFE_TRANSFER_FROM_1155,
            &["from", "to", "id", "amount", "data"],
            "Safely transfer multi-token units",
        ),
        FunctionInfo::from_signature(
            m::SET_APPROVAL_FOR_ALL,
            &["operator", "approved"],
            "Allow or revoke an operator for all tokens",
        ),
    ]
}

pub fn erc1155_events() -> Vec<EventInfo> {
    vec![
        EventInfo::from_signature(
            ev::TRANSFER_SINGLE,
            &[
                ("operator", true),
                ("from", true),
                ("to", true),
                ("id", false),
                ("value", false),
            ],
            "Multi-token units moved",
        ),
        EventInfo::from_signature(
            ev::TRANSFER_BATCH,
            &[
                ("operator", true),
                ("from", true),
                ("to", true),
                ("ids", false),
                ("values", false),
            ],
            "Batch of multi-token units moved",
        ),
        EventInfo::from_signature(
            ev::APPROVAL_FOR_ALL,
            &[("account", true), ("operator", true), ("approved", false)],
            "Operator approval changed",
        ),
    ]
}

static WELL_KNOWN_FUNCTIONS: LazyLock<Vec<FunctionInfo>> = LazyLock::new(|| {
    let mut functions: Vec<FunctionInfo> = Vec::new();
    for function in erc20_functions()
        .into_iter()
        .chain(erc721_functions())
        .chain(erc1155_functions())
    {
        // ERC-20 names win for selectors shared with ERC-721
        if !functions.iter().any(|f| f.selector == function.selector) {
            functions.push(function);
        }
    }
    functions
});

static WELL_KNOWN_EVENTS: LazyLock<Vec<EventInfo>> = LazyLock::new(|| {
    let mut events: Vec<EventInfo> = Vec::new();
    for event in erc20_events()
        .into_iter()
        .chain(erc721_events())
        .chain(erc1155_events())
    {
        let duplicate = events
            .iter()
            .any(|e| e.topic == event.topic && e.indexed_count() == event.indexed_count());
        if !duplicate {
            events.push(event);
        }
    }
    events
});

/// Look up a selector in the token-standard tables
pub fn well_known_function(selector: Selector) -> Option<&'static FunctionInfo> {
    WELL_KNOWN_FUNCTIONS.iter().find(|f| f.selector == selector)
}

/// First well-known event with this topic, whatever its indexing
pub fn well_known_event_by_topic(topic: B256) -> Option<&'static EventInfo> {
    WELL_KNOWN_EVENTS.iter().find(|e| e.topic == topic)
}

/// Look up an event topic in the token-standard tables.
///
/// ERC-20 and ERC-721 share `Transfer` and `Approval` topics and differ only in how many
/// parameters are indexed, so the number of topics after the first picks the variant.
pub fn well_known_event(topic: B256, indexed_count: usize) -> Option<&'static EventInfo> {
    let mut candidates = WELL_KNOWN_EVENTS.iter().filter(|e| e.topic == topic);
    let first = candidates.clone().next();
    candidates
        .find(|e| e.indexed_count() == indexed_count)
        .or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::definitions::{Approval, Transfer};
    use alloy_sol_types::{sol, SolCall, SolEvent};

    sol! {
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    #[test]
    fn test_selectors_match_sol_bindings() {
        let functions = erc20_functions();
        assert_eq!(functions[0].selector, Selector::from(transferCall::SELECTOR));
        assert_eq!(functions[1].selector, Selector::from(transferFromCall::SELECTOR));
        assert_eq!(functions[2].selector, Selector::from(approveCall::SELECTOR));
    }

    #[test]
    fn test_event_topics_match_sol_bindings() {
        let events = erc20_events();
        assert_eq!(events[0].topic, Transfer::SIGNATURE_HASH);
        assert_eq!(events[1].topic, Approval::SIGNATURE_HASH);
    }

    #[test]
    fn test_shared_selector_resolves_to_erc20_names() {
        let transfer_from = well_known_function(Selector::from(transferFromCall::SELECTOR)).unwrap();
        assert_eq!(transfer_from.parameters[2].name, "amount");
    }

    #[test]
    fn test_transfer_variant_chosen_by_indexed_count() {
        let erc20 = well_known_event(Transfer::SIGNATURE_HASH, 2).unwrap();
        assert_eq!(erc20.parameters[2].name, "value");

        let erc721 = well_known_event(Transfer::SIGNATURE_HASH, 3).unwrap();
        assert_eq!(erc721.parameters[2].name, "tokenId");

        // Unexpected topic count falls back to the first variant
        let fallback = well_known_event(Transfer::SIGNATURE_HASH, 0).unwrap();
        assert_eq!(fallback.parameters[2].name, "value");
    }

    #[test]
    fn test_unknown_selector() {
        assert!(well_known_function(Selector::from([0xde, 0xad, 0xbe, 0xef])).is_none());
    }
}
