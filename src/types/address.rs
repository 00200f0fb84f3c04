// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Resolved address identities

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Label used when nothing is known about an address
pub const UNKNOWN_ADDRESS_LABEL: &str = "Unknown Address";

/// Role of an address on chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    /// Externally owned account controlled by a private key
    #[default]
    Eoa,
    /// Smart contract
    Contract,
    /// Custodial exchange wallet
    Exchange,
    /// DeFi protocol contract
    Defi,
}

impl AddressType {
    /// Short machine name
    pub const fn as_str(&self) -> &'static str {
        match self {
            AddressType::Eoa => "eoa",
            AddressType::Contract => "contract",
            AddressType::Exchange => "exchange",
            AddressType::Defi => "defi",
        }
    }

    /// Human-readable name
    pub const fn display_name(&self) -> &'static str {
        match self {
            AddressType::Eoa => "externally owned account",
            AddressType::Contract => "smart contract",
            AddressType::Exchange => "exchange",
            AddressType::Defi => "DeFi protocol",
        }
    }

    /// Whether code lives at addresses of this type
    pub const fn is_contract(&self) -> bool {
        matches!(self, AddressType::Contract | AddressType::Defi)
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Everything a resolver knows about an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: Address,
    pub label: String,
    pub address_type: AddressType,
    /// ENS-style alias name
    pub alias: Option<String>,
    pub verified: bool,
    pub tags: BTreeSet<String>,
    pub description: Option<String>,
}

impl AddressInfo {
    /// Info for an address nothing is known about
    pub fn unlabeled(address: Address) -> Self {
        Self {
            address,
            label: UNKNOWN_ADDRESS_LABEL.to_string(),
            address_type: AddressType::Eoa,
            alias: None,
            verified: false,
            tags: BTreeSet::new(),
            description: None,
        }
    }

    /// Labeled info of the given type
    pub fn new(address: Address, label: impl Into<String>, address_type: AddressType) -> Self {
        Self {
            label: label.into(),
            address_type,
            ..Self::unlabeled(address)
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// Whether the resolver had a real label for this address
    pub fn is_labeled(&self) -> bool {
        !self.label.is_empty() && self.label != UNKNOWN_ADDRESS_LABEL
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether this address is an exchange by type or by tag
    pub fn is_exchange(&self) -> bool {
        self.address_type == AddressType::Exchange || self.has_tag("exchange")
    }

    /// Whether this address belongs to a DeFi protocol by type or by tag
    pub fn is_defi(&self) -> bool {
        self.address_type == AddressType::Defi || self.has_tag("defi")
    }

    /// Best display name: alias, then label, then the checksummed address
    pub fn display_name(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        if self.is_labeled() {
            return self.label.clone();
        }
        self.address.to_checksum(None)
    }
}
