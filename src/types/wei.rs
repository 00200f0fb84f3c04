// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Native currency amounts
//!
//! [`WeiAmount`] keeps native-asset values (transaction value, gas cost) apart from ERC-20
//! token amounts, which carry their own decimals.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Wei per gwei
pub const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Wei per whole native unit (ETH, MATIC, ...)
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Amount of native currency in wei
///
/// ```
/// use alloy_primitives::U256;
/// use semioscribe::WeiAmount;
///
/// let value = WeiAmount::from_ether(1);
/// assert_eq!(value.as_u256(), U256::from(10u64).pow(U256::from(18)));
/// assert!((value.to_ether() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Whole native units, saturating on overflow
    pub fn from_ether(ether: u64) -> Self {
        Self(U256::from(ether).saturating_mul(U256::from(WEI_PER_ETHER)))
    }

    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lossy conversion to gwei for display
    pub fn to_gwei(&self) -> f64 {
        ratio(self.0, WEI_PER_GWEI as f64)
    }

    /// Lossy conversion to whole native units for display and fiat estimates
    pub fn to_ether(&self) -> f64 {
        ratio(self.0, WEI_PER_ETHER as f64)
    }
}

/// `value / divisor` as f64; U256 values above f64 range saturate to infinity
pub(crate) fn ratio(value: U256, divisor: f64) -> f64 {
    let value: f64 = value.to_string().parse().unwrap_or(f64::INFINITY);
    value / divisor
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for WeiAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ether_scales_by_1e18() {
        let amount = WeiAmount::from_ether(2);
        assert_eq!(
            amount.as_u256(),
            U256::from(2_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_fractional_gwei_is_preserved() {
        let amount = WeiAmount::from(1_500_000_000u64);
        assert!((amount.to_gwei() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_addition_saturates() {
        let sum = WeiAmount::new(U256::MAX) + WeiAmount::from(1u64);
        assert_eq!(sum.as_u256(), U256::MAX);
    }

    #[test]
    fn test_display_is_exact() {
        assert_eq!(WeiAmount::from(420u64).to_string(), "420 wei");
    }
}
