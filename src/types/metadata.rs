// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Descriptive metadata supplied by enrichment sources

use super::locale::Currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price of an asset at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub symbol: String,
    pub price: f64,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

/// Coarse risk assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub category: String,
    pub subcategory: Option<String>,
    pub risk_level: RiskLevel,
    /// 1 (simple transfer) to 10 (multi-protocol interaction)
    pub complexity: u8,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressMetadata {
    pub category: String,
    /// 0.0 (known bad actor) to 1.0 (well-established)
    pub reputation: f64,
    pub risk_level: RiskLevel,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMetadata {
    pub category: String,
    /// 0.0 to 1.0, higher means audited and battle-tested
    pub security_score: f64,
    pub risk_level: RiskLevel,
    pub tags: Vec<String>,
}
