// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Event log decoding.
//!
//! This module handles:
//! - Typed ERC-20 `Transfer` and `Approval` definitions
//! - Matching log topics against contract and well-known event catalogs
//! - Decoding indexed and non-indexed parameters into raw and display maps

mod decoder;
pub mod definitions;

pub use decoder::AbiEventDecoder;
pub use definitions::{Approval, Transfer};

use alloy_primitives::B256;
use alloy_rpc_types::Log;
use async_trait::async_trait;

use crate::errors::ParseError;
use crate::types::contract::{ContractInfo, EventInfo};
use crate::types::locale::Language;
use crate::types::transaction::DecodedEvent;

/// Decodes receipt logs into [`DecodedEvent`]s
#[async_trait]
pub trait EventDecoder: Send + Sync {
    /// Decode one log. `contract` is the emitter's catalog, when known. Display values
    /// follow `language`.
    ///
    /// Logs whose topic matches no catalog fail with [`ParseError::UnknownEvent`]; callers
    /// skip them.
    async fn decode_event(
        &self,
        log: &Log,
        contract: Option<&ContractInfo>,
        language: Language,
    ) -> Result<DecodedEvent, ParseError>;

    /// Event definition for a topic hash from the well-known tables
    async fn resolve_event_signature(&self, topic: B256) -> Result<EventInfo, ParseError>;
}
