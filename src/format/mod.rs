// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Value formatting
//!
//! [`ValueFormatter`] turns raw amounts, gas, timestamps and addresses into display
//! strings. Numbers follow the decimal mark and digit grouping of the language passed with
//! each call, so one formatter serves every request locale:
//!
//! ```
//! use alloy_primitives::U256;
//! use semioscribe::{GasPrice, Language, LocaleFormatter, ValueFormatter};
//!
//! let formatter = LocaleFormatter::new(4, true);
//! let amount = U256::from(1_234_000_000_000_000_000_000u128);
//! assert_eq!(formatter.format_value(Language::En, amount, 18, "ETH"), "1,234.0000 ETH");
//! assert_eq!(formatter.format_value(Language::De, amount, 18, "ETH"), "1.234,0000 ETH");
//! assert_eq!(
//!     formatter.format_gas(Language::En, 21_000, GasPrice::from_gwei(20)),
//!     "0.000420 ETH (20.0 gwei)"
//! );
//! ```

pub mod abi;
mod number;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};

use crate::config::TranslatorConfig;
use crate::types::address::AddressInfo;
use crate::types::contract::ContractInfo;
use crate::types::gas::GasPrice;
use crate::types::locale::{Currency, Language};

pub(crate) use number::{fixed, localize, scale_u256};

/// Formats values for narratives
pub trait ValueFormatter: Send + Sync {
    /// Raw integer `amount` with `decimals` fraction digits, followed by `symbol`
    fn format_value(&self, language: Language, amount: U256, decimals: u8, symbol: &str)
        -> String;

    /// Fee for `gas_used` units at `gas_price`, in native units and gwei
    fn format_gas(&self, language: Language, gas_used: u64, gas_price: GasPrice) -> String;

    fn format_time(&self, timestamp: DateTime<Utc>) -> String;

    /// Address with its best known name, when one is known
    fn format_address(&self, address: Address, info: Option<&AddressInfo>) -> String;

    /// Fiat amount with the currency's symbol and minor units
    fn format_fiat(&self, language: Language, amount: f64, currency: Currency) -> String;
}

/// `0x742d...c8e1` form of an address
pub fn short_address(address: Address) -> String {
    let checksum = address.to_checksum(None);
    format!("{}...{}", &checksum[..6], &checksum[checksum.len() - 4..])
}

/// Display text for a decoded call or event parameter.
///
/// `amount` and `value` integers are token amounts when the contract declares decimals and
/// a symbol.
pub(crate) fn display_parameter(
    formatter: &dyn ValueFormatter,
    language: Language,
    name: &str,
    value: &DynSolValue,
    contract: Option<&ContractInfo>,
) -> String {
    if let (DynSolValue::Uint(amount, _), Some(contract)) = (value, contract) {
        if let ("value" | "amount", Some(decimals), Some(symbol)) =
            (name, contract.decimals, &contract.symbol)
        {
            return formatter.format_value(language, *amount, decimals, symbol);
        }
    }
    abi::display_value(language, value)
}

/// Formatter following each language's number conventions
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    decimal_places: u32,
    thousands_separator: bool,
    native_symbol: String,
}

impl LocaleFormatter {
    pub fn new(decimal_places: u32, thousands_separator: bool) -> Self {
        Self {
            decimal_places,
            thousands_separator,
            native_symbol: "ETH".to_string(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(
            config.value_formatter.decimal_places,
            config.value_formatter.use_thousands_separator,
        )
        .with_native_symbol(&config.market.native_symbol)
    }

    pub fn with_native_symbol(mut self, symbol: &str) -> Self {
        self.native_symbol = symbol.to_string();
        self
    }

    fn localized(&self, language: Language, plain: &str) -> String {
        let group = self
            .thousands_separator
            .then(|| language.group_separator());
        localize(plain, language.decimal_mark(), group)
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new(4, true)
    }
}

impl ValueFormatter for LocaleFormatter {
    fn format_value(
        &self,
        language: Language,
        amount: U256,
        decimals: u8,
        symbol: &str,
    ) -> String {
        let scaled = scale_u256(amount, decimals);
        let number = self.localized(language, &fixed(&scaled, self.decimal_places));
        if symbol.is_empty() {
            number
        } else {
            format!("{number} {symbol}")
        }
    }

    fn format_gas(&self, language: Language, gas_used: u64, gas_price: GasPrice) -> String {
        let cost = scale_u256(gas_price.cost_of(gas_used).as_u256(), 18);
        let gwei = scale_u256(gas_price.as_u256(), 9);
        format!(
            "{} {} ({} gwei)",
            self.localized(language, &fixed(&cost, 6)),
            self.native_symbol,
            self.localized(language, &fixed(&gwei, 1))
        )
    }

    fn format_time(&self, timestamp: DateTime<Utc>) -> String {
        timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    fn format_address(&self, address: Address, info: Option<&AddressInfo>) -> String {
        let short = short_address(address);
        match info {
            Some(info) if info.alias.is_some() || info.is_labeled() => {
                format!("{} ({short})", info.display_name())
            }
            _ => short,
        }
    }

    fn format_fiat(&self, language: Language, amount: f64, currency: Currency) -> String {
        let plain = format!("{:.*}", currency.minor_units() as usize, amount);
        format!("{}{}", currency.symbol(), self.localized(language, &plain))
    }
}
