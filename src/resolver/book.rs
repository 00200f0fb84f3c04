// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Offline address resolver

use std::collections::HashMap;

use alloy_primitives::Address;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::AddressResolver;
use crate::config::constants::COMMON_LABELS;
use crate::config::AddressResolverConfig;
use crate::errors::ResolutionError;
use crate::types::address::{AddressInfo, AddressType, UNKNOWN_ADDRESS_LABEL};

/// In-memory address book
///
/// Seeded with the well-known labels, then the custom labels from configuration (which
/// override well-known ones), then any entries registered with [`AddressBook::insert`].
/// Unknown addresses resolve to an unlabeled externally owned account.
///
/// ```
/// use alloy_primitives::address;
/// use semioscribe::{AddressBook, AddressInfo, AddressType, AddressResolver};
///
/// # tokio_test_block_on(async {
/// let exchange = address!("28c6c06298d514db089934071355e5743bf21d60");
/// let book = AddressBook::empty().with_entry(
///     AddressInfo::new(exchange, "Binance 14", AddressType::Exchange).verified(),
/// );
/// let info = book.resolve_address(exchange).await.unwrap();
/// assert!(info.is_exchange());
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AddressBook {
    entries: HashMap<Address, AddressInfo>,
    resolve_ens: bool,
    resolve_labels: bool,
}

impl AddressBook {
    /// Book seeded from the well-known table and the configured custom labels
    pub fn new(config: &AddressResolverConfig) -> Self {
        let mut book = Self {
            entries: HashMap::new(),
            resolve_ens: config.resolve_ens,
            resolve_labels: config.resolve_labels,
        };

        for known in COMMON_LABELS {
            let mut info = AddressInfo::new(known.address, known.label, known.address_type).verified();
            info.tags = known.tags.iter().map(|t| t.to_string()).collect();
            book.insert(info);
        }

        for (raw, label) in &config.custom_labels {
            match raw.parse::<Address>() {
                Ok(address) => {
                    let info = match book.entries.remove(&address) {
                        Some(mut existing) => {
                            existing.label = label.clone();
                            existing
                        }
                        None => AddressInfo::new(address, label.clone(), AddressType::Eoa),
                    };
                    book.insert(info);
                }
                Err(e) => warn!(address = %raw, error = %e, "Skipping custom label with invalid address"),
            }
        }

        debug!(entries = book.entries.len(), "Address book loaded");
        book
    }

    /// Book with no entries and every lookup enabled
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            resolve_ens: true,
            resolve_labels: true,
        }
    }

    /// Register or replace an entry
    pub fn insert(&mut self, info: AddressInfo) {
        self.entries.insert(info.address, info);
    }

    pub fn with_entry(mut self, info: AddressInfo) -> Self {
        self.insert(info);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new(&AddressResolverConfig::default())
    }
}

#[async_trait]
impl AddressResolver for AddressBook {
    async fn resolve_address(&self, address: Address) -> Result<AddressInfo, ResolutionError> {
        let Some(entry) = self.entries.get(&address) else {
            return Ok(AddressInfo::unlabeled(address));
        };

        let mut info = entry.clone();
        if !self.resolve_labels {
            info.label = UNKNOWN_ADDRESS_LABEL.to_string();
        }
        if !self.resolve_ens {
            info.alias = None;
        }
        Ok(info)
    }

    async fn resolve_ens(&self, address: Address) -> Result<String, ResolutionError> {
        if !self.resolve_ens {
            return Err(ResolutionError::FeatureDisabled {
                feature: "address_resolver.resolve_ens",
            });
        }
        self.entries
            .get(&address)
            .and_then(|info| info.alias.clone())
            .ok_or_else(|| ResolutionError::not_found("alias", address))
    }

    fn address_label(&self, address: Address) -> String {
        match self.entries.get(&address) {
            Some(info) if self.resolve_labels => info.label.clone(),
            _ => UNKNOWN_ADDRESS_LABEL.to_string(),
        }
    }
}
