// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Data model shared by every pipeline stage.
//!
//! - Address and contract identities with their catalogs
//! - Raw and parsed transactions, gas analysis and native amounts
//! - Locale enums (language, currency, detail level)
//! - Translation requests, context and results
//! - Enrichment metadata

pub mod address;
pub mod contract;
pub mod gas;
pub mod locale;
pub mod metadata;
pub mod transaction;
pub mod translation;
pub mod wei;

// Note: Public types are re-exported from lib.rs, not here
