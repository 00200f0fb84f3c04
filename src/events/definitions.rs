// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed ERC-20 event definitions
//!
//! The parser turns `Transfer` logs into token transfers with these definitions; generic
//! catalog-driven decoding lives in [`super::AbiEventDecoder`].
//!
//! ```rust,ignore
//! use alloy_sol_types::SolEvent;
//! use semioscribe::events::Transfer;
//!
//! if let Ok(event) = Transfer::decode_log(&log.inner) {
//!     println!("{} -> {}: {}", event.from, event.to, event.value);
//! }
//! ```
//!
//! `sol!` generates `SIGNATURE` and `SIGNATURE_HASH` for each event, so topic comparisons
//! need no runtime hashing.

use std::fmt::Debug;

use alloy_sol_types::sol;

sol! {
    /// ERC-20 Transfer event
    ///
    /// Minting has `from = 0x0`, burning has `to = 0x0`. `value` is raw, not adjusted for
    /// decimals.
    event Transfer(address indexed from, address indexed to, uint256 value);
}

impl Debug for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transfer(from: {}, to: {}, value: {})",
            self.from, self.to, self.value
        )
    }
}

sol! {
    /// ERC-20 Approval event
    ///
    /// `value` is the allowance granted to `spender`, raw.
    event Approval(address indexed owner, address indexed spender, uint256 value);
}

impl Debug for Approval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Approval(owner: {}, spender: {}, value: {})",
            self.owner, self.spender, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::event_signatures;
    use alloy_primitives::keccak256;
    use alloy_sol_types::SolEvent;

    #[test]
    fn test_signature_hashes_match_catalog_signatures() {
        assert_eq!(Transfer::SIGNATURE, event_signatures::TRANSFER);
        assert_eq!(
            Transfer::SIGNATURE_HASH,
            keccak256(event_signatures::TRANSFER.as_bytes())
        );
        assert_eq!(
            Approval::SIGNATURE_HASH,
            keccak256(event_signatures::APPROVAL.as_bytes())
        );
    }
}
