// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas pricing and per-transaction gas analysis

use super::wei::{ratio, WeiAmount, WEI_PER_GWEI};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Gas price in wei per unit of gas
///
/// ```
/// use semioscribe::GasPrice;
///
/// let price = GasPrice::from_gwei(20);
/// assert_eq!(price.as_gwei_f64(), 20.0);
/// assert_eq!(price.to_string(), "20.00 gwei");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GasPrice(U256);

impl GasPrice {
    pub const fn new(price_wei: U256) -> Self {
        Self(price_wei)
    }

    pub fn from_gwei(gwei: u64) -> Self {
        Self(U256::from(gwei).saturating_mul(U256::from(WEI_PER_GWEI)))
    }

    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Price in gwei, keeping fractional gwei (lossy, for display and thresholds)
    pub fn as_gwei_f64(&self) -> f64 {
        ratio(self.0, WEI_PER_GWEI as f64)
    }

    /// Cost of `gas` units at this price, saturating on overflow
    pub fn cost_of(&self, gas: u64) -> WeiAmount {
        WeiAmount::new(self.0.saturating_mul(U256::from(gas)))
    }
}

impl From<u64> for GasPrice {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for GasPrice {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for GasPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gwei = self.as_gwei_f64();
        if gwei >= 0.01 {
            write!(f, "{gwei:.2} gwei")
        } else {
            write!(f, "{} wei", self.0)
        }
    }
}

/// Gas usage of one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasAnalysis {
    pub gas_limit: u64,
    pub gas_used: u64,
    pub gas_price: GasPrice,
    /// `gas_used × gas_price`
    pub gas_cost: WeiAmount,
    /// `gas_used / gas_limit`, clamped to `[0, 1]`
    pub efficiency: f64,
    /// Gas cost in the request currency, when a native-asset price is known
    pub estimated_fiat_cost: Option<f64>,
}

impl GasAnalysis {
    /// Analyze gas usage. A zero gas limit counts as fully efficient.
    ///
    /// ```
    /// use semioscribe::{GasAnalysis, GasPrice};
    ///
    /// let gas = GasAnalysis::new(21_000, 21_000, GasPrice::from_gwei(20));
    /// assert_eq!(gas.efficiency, 1.0);
    /// assert!((gas.gas_cost.to_ether() - 0.00042).abs() < 1e-12);
    /// ```
    pub fn new(gas_limit: u64, gas_used: u64, gas_price: GasPrice) -> Self {
        let efficiency = if gas_limit == 0 {
            1.0
        } else {
            (gas_used as f64 / gas_limit as f64).clamp(0.0, 1.0)
        };
        Self {
            gas_limit,
            gas_used,
            gas_price,
            gas_cost: gas_price.cost_of(gas_used),
            efficiency,
            estimated_fiat_cost: None,
        }
    }

    /// Fill in the fiat estimate from a native-asset price
    pub fn with_fiat_estimate(mut self, native_price: f64) -> Self {
        let estimate = self.gas_cost.to_ether() * native_price;
        self.estimated_fiat_cost = estimate.is_finite().then_some(estimate);
        self
    }

    /// Share of the gas limit that was used, in percent
    pub fn utilization_percent(&self) -> f64 {
        self.efficiency * 100.0
    }
}
