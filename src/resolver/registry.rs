// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Offline contract analyzer

use std::collections::HashMap;

use alloy_primitives::Address;
use async_trait::async_trait;

use super::catalog;
use super::ContractAnalyzer;
use crate::config::ContractAnalyzerConfig;
use crate::errors::ResolutionError;
use crate::types::contract::{ContractInfo, ContractStandard};

/// Registry of known contracts
///
/// Token contracts registered through the `register_erc*` helpers get the standard's
/// function and event catalogs. Analysis of unregistered addresses fails with `NotFound`.
///
/// ```
/// use alloy_primitives::address;
/// use semioscribe::{ContractRegistry, ContractStandard};
///
/// let dai = address!("6b175474e89094c44da98b954eedeac495271d0f");
/// let mut registry = ContractRegistry::default();
/// registry.register_erc20(dai, "Dai Stablecoin", "DAI", 18);
/// assert_eq!(registry.get(dai).unwrap().standard, ContractStandard::Erc20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<Address, ContractInfo>,
    config: ContractAnalyzerConfig,
}

impl ContractRegistry {
    pub fn new(config: ContractAnalyzerConfig) -> Self {
        Self {
            contracts: HashMap::new(),
            config,
        }
    }

    /// Register or replace a contract
    pub fn register(&mut self, info: ContractInfo) {
        self.contracts.insert(info.address, info);
    }

    pub fn with_contract(mut self, info: ContractInfo) -> Self {
        self.register(info);
        self
    }

    pub fn register_erc20(&mut self, address: Address, name: &str, symbol: &str, decimals: u8) {
        self.register(
            ContractInfo::new(address, name, ContractStandard::Erc20)
                .with_symbol(symbol)
                .with_decimals(decimals)
                .with_functions(catalog::erc20_functions())
                .with_events(catalog::erc20_events()),
        );
    }

    pub fn register_erc721(&mut self, address: Address, name: &str, symbol: &str) {
        self.register(
            ContractInfo::new(address, name, ContractStandard::Erc721)
                .with_symbol(symbol)
                .with_decimals(0)
                .with_functions(catalog::erc721_functions())
                .with_events(catalog::erc721_events()),
        );
    }

    pub fn register_erc1155(&mut self, address: Address, name: &str) {
        self.register(
            ContractInfo::new(address, name, ContractStandard::Erc1155)
                .with_functions(catalog::erc1155_functions())
                .with_events(catalog::erc1155_events()),
        );
    }

    /// Register an upgradeable proxy; `implementation` is `None` when it is not known
    pub fn register_proxy(&mut self, address: Address, name: &str, implementation: Option<Address>) {
        self.register(
            ContractInfo::new(address, name, ContractStandard::Proxy).with_proxy(implementation),
        );
    }

    /// Registered info, unfiltered by configuration
    pub fn get(&self, address: Address) -> Option<&ContractInfo> {
        self.contracts.get(&address)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    fn lookup(&self, address: Address) -> Result<&ContractInfo, ResolutionError> {
        self.contracts
            .get(&address)
            .ok_or_else(|| ResolutionError::not_found("contract", address))
    }
}

#[async_trait]
impl ContractAnalyzer for ContractRegistry {
    async fn analyze_contract(&self, address: Address) -> Result<ContractInfo, ResolutionError> {
        let mut info = self.lookup(address)?.clone();
        if !self.config.analyze_abi {
            info.functions.clear();
            info.events.clear();
        }
        if !self.config.detect_standards && info.standard != ContractStandard::Proxy {
            info.standard = ContractStandard::Unknown;
        }
        if !self.config.resolve_proxies {
            info.implementation = None;
        }
        Ok(info)
    }

    async fn detect_standard(&self, address: Address) -> Result<ContractStandard, ResolutionError> {
        if !self.config.detect_standards {
            return Err(ResolutionError::FeatureDisabled {
                feature: "contract_analyzer.detect_standards",
            });
        }
        Ok(self.lookup(address)?.standard)
    }

    async fn resolve_proxy(&self, address: Address) -> Result<Address, ResolutionError> {
        if !self.config.resolve_proxies {
            return Err(ResolutionError::FeatureDisabled {
                feature: "contract_analyzer.resolve_proxies",
            });
        }
        let info = self.lookup(address)?;
        if !info.is_proxy {
            return Err(ResolutionError::NotAProxy { address });
        }
        info.implementation.ok_or_else(|| {
            ResolutionError::proxy_resolution_failed(address, "implementation slot is not known")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const TOKEN: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
    const PROXY: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const IMPLEMENTATION: Address = address!("1234567890123456789012345678901234567890");

    fn registry(config: ContractAnalyzerConfig) -> ContractRegistry {
        let mut registry = ContractRegistry::new(config);
        registry.register_erc20(TOKEN, "Dai Stablecoin", "DAI", 18);
        registry.register_proxy(PROXY, "USD Coin", Some(IMPLEMENTATION));
        registry
    }

    #[tokio::test]
    async fn test_erc20_has_catalogs() {
        let info = registry(ContractAnalyzerConfig::default())
            .analyze_contract(TOKEN)
            .await
            .unwrap();
        assert_eq!(info.symbol.as_deref(), Some("DAI"));
        assert_eq!(info.decimals, Some(18));
        assert!(!info.functions.is_empty());
        assert!(!info.events.is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_contract_not_found() {
        let err = registry(ContractAnalyzerConfig::default())
            .analyze_contract(Address::ZERO)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_proxy_resolution() {
        let registry = registry(ContractAnalyzerConfig::default());
        assert_eq!(registry.resolve_proxy(PROXY).await.unwrap(), IMPLEMENTATION);
        assert!(matches!(
            registry.resolve_proxy(TOKEN).await,
            Err(ResolutionError::NotAProxy { .. })
        ));
    }

    #[tokio::test]
    async fn test_proxy_without_implementation() {
        let mut registry = ContractRegistry::default();
        registry.register_proxy(PROXY, "Opaque proxy", None);
        assert!(matches!(
            registry.resolve_proxy(PROXY).await,
            Err(ResolutionError::ProxyResolutionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_toggles_filter_analysis() {
        let registry = registry(ContractAnalyzerConfig {
            analyze_abi: false,
            detect_standards: false,
            resolve_proxies: false,
        });
        let token = registry.analyze_contract(TOKEN).await.unwrap();
        assert!(token.functions.is_empty());
        assert_eq!(token.standard, ContractStandard::Unknown);

        let proxy = registry.analyze_contract(PROXY).await.unwrap();
        assert!(proxy.is_proxy);
        assert_eq!(proxy.implementation, None);
        assert!(registry.detect_standard(TOKEN).await.is_err());
    }
}
