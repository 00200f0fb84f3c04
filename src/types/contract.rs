// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract identities and their function/event catalogs
//!
//! Function selectors and event topics are derived from canonical signatures with
//! keccak-256, so a catalog entry built from `"transfer(address,uint256)"` carries the
//! same selector the EVM dispatches on.

use crate::errors::ResolutionError;
use alloy_primitives::{keccak256, Address, Selector, B256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token or upgradeability standard a contract implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContractStandard {
    #[serde(rename = "ERC20")]
    Erc20,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    Erc1155,
    Proxy,
    #[default]
    Unknown,
}

impl ContractStandard {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContractStandard::Erc20 => "ERC20",
            ContractStandard::Erc721 => "ERC721",
            ContractStandard::Erc1155 => "ERC1155",
            ContractStandard::Proxy => "Proxy",
            ContractStandard::Unknown => "Unknown",
        }
    }

    /// Whether the standard describes a token contract
    pub const fn is_token(&self) -> bool {
        matches!(
            self,
            ContractStandard::Erc20 | ContractStandard::Erc721 | ContractStandard::Erc1155
        )
    }
}

impl fmt::Display for ContractStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStandard {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "ERC20" => Ok(ContractStandard::Erc20),
            "ERC721" => Ok(ContractStandard::Erc721),
            "ERC1155" => Ok(ContractStandard::Erc1155),
            "PROXY" => Ok(ContractStandard::Proxy),
            "UNKNOWN" => Ok(ContractStandard::Unknown),
            _ => Err(ResolutionError::unsupported_standard(s)),
        }
    }
}

/// One function or event parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    /// Solidity type, e.g. `uint256`
    #[serde(rename = "type")]
    pub ty: String,
    pub description: Option<String>,
    /// Only meaningful for event parameters
    pub indexed: bool,
}

/// Catalog entry for a contract function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub signature: String,
    pub selector: Selector,
    pub description: String,
    pub parameters: Vec<ParameterInfo>,
}

impl FunctionInfo {
    /// Build a catalog entry from a canonical signature.
    ///
    /// `names` labels the parameters in order; missing names become `arg0`, `arg1`, ...
    ///
    /// ```
    /// use semioscribe::FunctionInfo;
    ///
    /// let transfer = FunctionInfo::from_signature(
    ///     "transfer(address,uint256)",
    ///     &["to", "amount"],
    ///     "Transfer tokens to an address",
    /// );
    /// assert_eq!(transfer.selector.to_string(), "0xa9059cbb");
    /// assert_eq!(transfer.parameters[1].ty, "uint256");
    /// ```
    pub fn from_signature(signature: &str, names: &[&str], description: &str) -> Self {
        let (name, types) = split_signature(signature);
        let hash = keccak256(signature.as_bytes());
        Self {
            name,
            signature: signature.to_string(),
            selector: Selector::from_slice(&hash[..4]),
            description: description.to_string(),
            parameters: name_parameters(&types, names.iter().map(|n| (*n, false))),
        }
    }

    /// Solidity types of the parameters, in order
    pub fn parameter_types(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.ty.as_str()).collect()
    }
}

/// Catalog entry for a contract event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    /// keccak-256 of the signature; the first log topic of non-anonymous events
    pub topic: B256,
    pub description: String,
    pub parameters: Vec<ParameterInfo>,
}

impl EventInfo {
    /// Build a catalog entry from a canonical signature.
    ///
    /// `params` gives each parameter's name and whether it is indexed.
    pub fn from_signature(signature: &str, params: &[(&str, bool)], description: &str) -> Self {
        let (name, types) = split_signature(signature);
        Self {
            name,
            signature: signature.to_string(),
            topic: keccak256(signature.as_bytes()),
            description: description.to_string(),
            parameters: name_parameters(&types, params.iter().copied()),
        }
    }

    /// Number of parameters carried in topics
    pub fn indexed_count(&self) -> usize {
        self.parameters.iter().filter(|p| p.indexed).count()
    }
}

/// Everything an analyzer knows about a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub address: Address,
    pub name: String,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub standard: ContractStandard,
    pub is_proxy: bool,
    /// Implementation behind a proxy; a reference only, never dereferenced
    pub implementation: Option<Address>,
    pub functions: Vec<FunctionInfo>,
    pub events: Vec<EventInfo>,
}

impl ContractInfo {
    pub fn new(address: Address, name: impl Into<String>, standard: ContractStandard) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: None,
            decimals: None,
            standard,
            is_proxy: standard == ContractStandard::Proxy,
            implementation: None,
            functions: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn with_functions(mut self, functions: impl IntoIterator<Item = FunctionInfo>) -> Self {
        self.functions.extend(functions);
        self
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = EventInfo>) -> Self {
        self.events.extend(events);
        self
    }

    /// Mark the contract as a proxy, optionally pointing at its implementation
    pub fn with_proxy(mut self, implementation: Option<Address>) -> Self {
        self.is_proxy = true;
        self.implementation = implementation;
        self
    }

    pub fn function_by_selector(&self, selector: Selector) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.selector == selector)
    }

    pub fn event_by_topic(&self, topic: B256) -> Option<&EventInfo> {
        self.events.iter().find(|e| e.topic == topic)
    }
}

/// Split `name(type1,type2,...)` into the name and top-level parameter types.
///
/// Commas inside tuple types do not split.
pub(crate) fn split_signature(signature: &str) -> (String, Vec<String>) {
    let Some(open) = signature.find('(') else {
        return (signature.to_string(), Vec::new());
    };
    let name = signature[..open].to_string();
    let inner = signature[open + 1..]
        .strip_suffix(')')
        .unwrap_or(&signature[open + 1..]);

    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                types.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        types.push(last.to_string());
    }
    (name, types)
}

fn name_parameters<'a>(
    types: &[String],
    names: impl Iterator<Item = (&'a str, bool)>,
) -> Vec<ParameterInfo> {
    let mut names = names;
    types
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            let (name, indexed) = names
                .next()
                .map(|(n, indexed)| (n.to_string(), indexed))
                .unwrap_or_else(|| (format!("arg{i}"), false));
            ParameterInfo {
                name,
                ty: ty.clone(),
                description: None,
                indexed,
            }
        })
        .collect()
}
