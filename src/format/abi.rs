// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rendering of decoded ABI values

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::hex;

use super::number::localize;
use super::short_address;
use crate::types::locale::Language;

/// Canonical text of a decoded value: decimal integers, checksummed addresses, 0x-hex bytes
pub fn raw_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::Uint(n, _) => n.to_string(),
        DynSolValue::Int(n, _) => n.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            format!("[{}]", join(items, raw_value))
        }
        DynSolValue::Tuple(items) => format!("({})", join(items, raw_value)),
        other => format!("{other:?}"),
    }
}

/// Display text of a decoded value: shortened addresses, integers grouped for `language`
pub fn display_value(language: Language, value: &DynSolValue) -> String {
    let group = Some(language.group_separator());
    match value {
        DynSolValue::Address(address) => short_address(*address),
        DynSolValue::Uint(n, _) => localize(&n.to_string(), language.decimal_mark(), group),
        DynSolValue::Int(n, _) => localize(&n.to_string(), language.decimal_mark(), group),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            format!("[{}]", join(items, |item| display_value(language, item)))
        }
        DynSolValue::Tuple(items) => {
            format!("({})", join(items, |item| display_value(language, item)))
        }
        other => raw_value(other),
    }
}

fn join(items: &[DynSolValue], render: impl Fn(&DynSolValue) -> String) -> String {
    items.iter().map(render).collect::<Vec<_>>().join(", ")
}
