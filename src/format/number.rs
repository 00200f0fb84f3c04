// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point scaling and digit grouping

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::{BigDecimal, RoundingMode};

/// Scale a raw integer amount by `10^decimals` without going through floating point
pub(crate) fn scale_u256(value: U256, decimals: u8) -> BigDecimal {
    // U256 always renders as plain decimal digits, so parsing only fails on a bug
    BigDecimal::from_str(&format!("{value}e-{decimals}")).unwrap_or_default()
}

/// Render with exactly `places` fraction digits, rounding half up
pub(crate) fn fixed(value: &BigDecimal, places: u32) -> String {
    value
        .with_scale_round(i64::from(places), RoundingMode::HalfUp)
        .to_plain_string()
}

/// Apply a decimal mark and optional digit grouping to a plain `1234.5678` string
pub(crate) fn localize(plain: &str, decimal_mark: char, group: Option<char>) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(plain.len() + integer.len() / 3 + 1);
    out.push_str(sign);
    match group {
        Some(separator) => {
            for (i, digit) in integer.chars().enumerate() {
                if i > 0 && (integer.len() - i) % 3 == 0 {
                    out.push(separator);
                }
                out.push(digit);
            }
        }
        None => out.push_str(integer),
    }
    if let Some(fraction) = fraction {
        out.push(decimal_mark);
        out.push_str(fraction);
    }
    out
}
