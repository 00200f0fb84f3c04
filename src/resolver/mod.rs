// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address resolution and contract analysis
//!
//! The traits are the seams where live implementations (label APIs, ENS, bytecode
//! analysis) plug in. The crate ships offline implementations:
//!
//! - [`AddressBook`]: well-known labels, custom labels from configuration and
//!   registered entries
//! - [`ContractRegistry`]: registered contracts with standard function/event catalogs

mod book;
pub mod catalog;
mod registry;

pub use book::AddressBook;
pub use registry::ContractRegistry;

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::errors::ResolutionError;
use crate::types::address::AddressInfo;
use crate::types::contract::{ContractInfo, ContractStandard};

/// Resolves addresses into labeled identities
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Everything known about an address
    async fn resolve_address(&self, address: Address) -> Result<AddressInfo, ResolutionError>;

    /// Alias name (ENS-style) for an address; `NotFound` when it has none
    async fn resolve_ens(&self, address: Address) -> Result<String, ResolutionError>;

    /// Label for display; never fails and never blocks
    fn address_label(&self, address: Address) -> String;
}

/// Analyzes contracts into catalogs and standards
#[async_trait]
pub trait ContractAnalyzer: Send + Sync {
    async fn analyze_contract(&self, address: Address) -> Result<ContractInfo, ResolutionError>;

    async fn detect_standard(&self, address: Address) -> Result<ContractStandard, ResolutionError>;

    /// Implementation address behind a proxy; `NotAProxy` for plain contracts
    async fn resolve_proxy(&self, address: Address) -> Result<Address, ResolutionError>;
}
