// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tracing::warn;

use super::templates::{
    self, CONTRACT_CALL, CONTRACT_CREATION, FAILED_TX, SIMPLE_TRANSFER, TOKEN_TRANSFER,
};
use super::{Narrated, SentenceBuilder, TemplateEngine};
use crate::config::TranslatorConfig;
use crate::format::ValueFormatter;
use crate::types::address::{AddressInfo, AddressType};
use crate::types::contract::{ContractInfo, ContractStandard};
use crate::types::locale::{DetailLevel, Language};
use crate::types::transaction::{ParsedTransaction, TransactionKind, TransactionStatus};
use crate::types::translation::TranslationContext;
use crate::types::wei::WeiAmount;

const UNRECOGNIZED_METHOD: &str = "an unrecognized method";
const UNKNOWN_CONTRACT: &str = "an unknown contract";

/// Methods whose summary is phrased as a token transfer
const TOKEN_TRANSFER_METHODS: [&str; 2] = ["transfer", "transferFrom"];

/// Builds narratives with a [`ValueFormatter`] and a [`TemplateEngine`]
///
/// Descriptions compose by tier: the detailed text is the basic text plus a detail section,
/// and the technical text is the detailed text plus a technical section.
pub struct NarrativeBuilder {
    formatter: Arc<dyn ValueFormatter>,
    templates: Arc<dyn TemplateEngine>,
    show_fiat: bool,
    native_symbol: String,
}

impl NarrativeBuilder {
    pub fn new(formatter: Arc<dyn ValueFormatter>, templates: Arc<dyn TemplateEngine>) -> Self {
        Self {
            formatter,
            templates,
            show_fiat: true,
            native_symbol: "ETH".to_string(),
        }
    }

    pub fn from_config(
        config: &TranslatorConfig,
        formatter: Arc<dyn ValueFormatter>,
        templates: Arc<dyn TemplateEngine>,
    ) -> Self {
        Self {
            show_fiat: config.value_formatter.show_fiat_value,
            native_symbol: config.market.native_symbol.clone(),
            ..Self::new(formatter, templates)
        }
    }

    /// Whether gas costs carry a fiat estimate when a native price is known
    pub fn with_fiat(mut self, show_fiat: bool) -> Self {
        self.show_fiat = show_fiat;
        self
    }

    fn render(&self, language: Language, name: &str, variables: &BTreeMap<&str, String>) -> String {
        match self.templates.render_template(language, name, variables) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    template = name,
                    language = language.code(),
                    error = %e,
                    "Template rendering failed, using built-in English"
                );
                templates::render_builtin(name, variables).unwrap_or_else(|| name.to_string())
            }
        }
    }

    fn party(&self, info: &AddressInfo) -> String {
        self.formatter.format_address(info.address, Some(info))
    }

    /// Formats an address, using the transaction's resolved counterparties when they match
    fn known_party(&self, address: Address, tx: &ParsedTransaction) -> String {
        let info = std::iter::once(&tx.from)
            .chain(tx.to.as_ref())
            .find(|info| info.address == address);
        self.formatter.format_address(address, info)
    }

    fn native_value(&self, value: WeiAmount, language: Language) -> String {
        self.formatter
            .format_value(language, value.as_u256(), 18, &self.native_symbol)
    }

    fn gas_cost(&self, tx: &ParsedTransaction, context: &TranslationContext) -> String {
        let gas = &tx.gas_analysis;
        let language = context.preferences.language;
        let mut text = self.formatter.format_gas(language, gas.gas_used, gas.gas_price);
        if self.show_fiat {
            let fiat = gas
                .estimated_fiat_cost
                .or_else(|| context.native_price().map(|p| gas.gas_cost.to_ether() * p));
            if let Some(fiat) = fiat {
                let currency = context.preferences.currency;
                let fiat = self.formatter.format_fiat(language, fiat, currency);
                text.push_str(&format!(" (≈ {fiat})"));
            }
        }
        text
    }

    fn transaction_summary(&self, tx: &ParsedTransaction, context: &TranslationContext) -> String {
        let language = context.preferences.language;
        let from = self.party(&tx.from);
        let to = tx.to.as_ref().map(|to| self.party(to));

        let (name, variables) = match tx.kind {
            TransactionKind::ContractCreation => {
                (CONTRACT_CREATION, BTreeMap::from([("from", from)]))
            }
            TransactionKind::ContractInteraction => match (&tx.method_call, tx.token_transfers.first()) {
                (Some(call), Some(transfer))
                    if TOKEN_TRANSFER_METHODS.contains(&call.function.name.as_str()) =>
                {
                    let amount = self.formatter.format_value(
                        language,
                        transfer.amount,
                        transfer.token.decimals,
                        "",
                    );
                    (
                        TOKEN_TRANSFER,
                        BTreeMap::from([
                            ("amount", amount),
                            ("token", transfer.token.symbol.clone()),
                            ("from", self.known_party(transfer.from, tx)),
                            ("to", self.known_party(transfer.to, tx)),
                        ]),
                    )
                }
                (call, _) => {
                    let method = call
                        .as_ref()
                        .map(|call| call.function.name.clone())
                        .unwrap_or_else(|| UNRECOGNIZED_METHOD.to_string());
                    (
                        CONTRACT_CALL,
                        BTreeMap::from([
                            ("from", from),
                            ("method", method),
                            ("contract", to.unwrap_or_else(|| UNKNOWN_CONTRACT.to_string())),
                        ]),
                    )
                }
            },
            TransactionKind::ValueTransfer => (
                SIMPLE_TRANSFER,
                BTreeMap::from([
                    ("from", from),
                    ("to", to.unwrap_or_default()),
                    ("value", self.native_value(tx.value, language)),
                ]),
            ),
        };

        let summary = self.render(language, name, &variables);
        if tx.status == TransactionStatus::Failed {
            return self.render(language, FAILED_TX, &BTreeMap::from([("reason", summary)]));
        }
        summary
    }

    fn basic_transaction(&self, tx: &ParsedTransaction, context: &TranslationContext) -> String {
        let to = match (&tx.to, tx.kind) {
            (_, TransactionKind::ContractCreation) | (None, _) => "a new contract".to_string(),
            (Some(to), _) => self.party(to),
        };
        format!(
            "Transaction from {} to {to}, transferring {}, with a gas cost of {}. Status: {}.",
            self.party(&tx.from),
            self.native_value(tx.value, context.preferences.language),
            self.gas_cost(tx, context),
            tx.status
        )
    }

    fn transaction_details(&self, text: &mut String, tx: &ParsedTransaction) {
        line(text, format!("Type: {}", kind_name(tx.kind)));
        if let Some(call) = &tx.method_call {
            line(text, format!("Called method: {}", call.function.name));
            if !call.description.is_empty() {
                line(text, &call.description);
            }
        }
        if !tx.token_transfers.is_empty() {
            line(text, "Token transfers:");
            for transfer in &tx.token_transfers {
                line(
                    text,
                    format!(
                        "- {} from {} to {}",
                        transfer.formatted_amount,
                        self.known_party(transfer.from, tx),
                        self.known_party(transfer.to, tx)
                    ),
                );
            }
        }
        if !tx.events.is_empty() {
            line(text, "Events emitted:");
            for event in &tx.events {
                if event.description.is_empty() {
                    line(text, format!("- {}", event.event.name));
                } else {
                    line(text, format!("- {}: {}", event.event.name, event.description));
                }
            }
        }
    }

    fn transaction_internals(
        &self,
        text: &mut String,
        tx: &ParsedTransaction,
        context: &TranslationContext,
    ) {
        let gas = &tx.gas_analysis;
        line(text, "");
        line(text, "Technical details:");
        line(text, format!("- Transaction hash: {}", tx.hash));
        if let Some(block) = tx.block_number {
            line(text, format!("- Block number: {block}"));
        }
        let timestamp = tx
            .timestamp
            .map(|ts| self.formatter.format_time(ts))
            .unwrap_or_else(|| "unknown".to_string());
        line(text, format!("- Block timestamp: {timestamp}"));
        line(text, format!("- Gas limit: {}", gas.gas_limit));
        line(
            text,
            format!("- Gas used: {} ({:.1}%)", gas.gas_used, gas.utilization_percent()),
        );
        line(
            text,
            format!("- Gas price: {:.2} gwei", gas.gas_price.as_gwei_f64()),
        );
        if let Some(time) = &context.time {
            line(text, format!("- Network congestion: {}", time.congestion));
            if let Some(elapsed) = time.time_since_block {
                line(text, format!("- Time since block: {}", elapsed_text(elapsed)));
            }
        }
        if let Some(utilization) = context.market.as_ref().and_then(|m| m.network_utilization) {
            line(
                text,
                format!("- Network utilization: {:.0}%", utilization * 100.0),
            );
        }
        if let Some(call) = &tx.method_call {
            line(text, format!("- Function signature: {}", call.function.signature));
            line(text, format!("- Selector: {}", call.function.selector));
            if !call.raw_parameters.is_empty() {
                line(text, "- Parameters:");
                for (name, value) in &call.raw_parameters {
                    line(text, format!("  - {name}: {value}"));
                }
            }
        }
    }

    fn transaction_key_points(
        &self,
        tx: &ParsedTransaction,
        context: &TranslationContext,
    ) -> Vec<String> {
        let mut points = Vec::new();
        match tx.kind {
            TransactionKind::ContractCreation => points.push("Deployed a new contract".to_string()),
            TransactionKind::ContractInteraction => match &tx.method_call {
                Some(call) => points.push(format!("Called {} on a smart contract", call.function.name)),
                None => points.push("Interacted with a smart contract".to_string()),
            },
            TransactionKind::ValueTransfer => {}
        }
        if !tx.value.is_zero() {
            points.push(format!(
                "Transferred {}",
                self.native_value(tx.value, context.preferences.language)
            ));
        }
        for transfer in &tx.token_transfers {
            points.push(format!("Moved {}", transfer.formatted_amount));
        }
        if !tx.events.is_empty() {
            points.push(format!("Emitted {} event(s)", tx.events.len()));
        }
        if tx.to.as_ref().is_some_and(AddressInfo::is_exchange) {
            points.push("The recipient is a cryptocurrency exchange".to_string());
        }
        points.push(format!(
            "Used {:.1}% of the gas limit",
            tx.gas_analysis.utilization_percent()
        ));
        if tx.is_failed() {
            points.push("The transaction failed".to_string());
        }
        if let Some(time) = context.time.as_ref().filter(|t| t.congestion.is_elevated()) {
            points.push(format!(
                "Network congestion was {} at {:.2} gwei",
                time.congestion,
                tx.gas_analysis.gas_price.as_gwei_f64()
            ));
        }
        points
    }

    fn basic_address(&self, info: &AddressInfo) -> String {
        let mut text = format!("Address: {}", info.address.to_checksum(None));
        if info.is_labeled() {
            line(&mut text, format!("Label: {}", info.label));
        }
        if let Some(alias) = &info.alias {
            line(&mut text, format!("Alias: {alias}"));
        }
        line(&mut text, format!("Type: {}", capitalized(info.address_type.display_name())));
        text
    }

    fn address_details(text: &mut String, info: &AddressInfo) {
        line(text, format!("Verified: {}", yes_no(info.verified)));
        if !info.tags.is_empty() {
            let tags: Vec<&str> = info.tags.iter().map(String::as_str).collect();
            line(text, format!("Tags: {}", tags.join(", ")));
        }
        if let Some(description) = &info.description {
            line(text, format!("Description: {description}"));
        }
    }

    fn address_internals(text: &mut String, info: &AddressInfo) {
        line(text, "");
        line(text, "Technical details:");
        line(text, format!("- Lowercase address: {:#x}", info.address));
        line(text, format!("- Type code: {}", info.address_type.as_str()));
        line(text, format!("- Holds code: {}", yes_no(info.address_type.is_contract())));
    }

    fn basic_contract(info: &ContractInfo) -> String {
        let mut text = format!("Contract address: {}", info.address.to_checksum(None));
        if !info.name.is_empty() {
            line(&mut text, format!("Name: {}", info.name));
        }
        if let Some(symbol) = &info.symbol {
            line(&mut text, format!("Symbol: {symbol}"));
        }
        line(&mut text, format!("Standard: {}", info.standard));
        text
    }

    fn contract_details(text: &mut String, info: &ContractInfo) {
        if let Some(decimals) = info.decimals {
            line(text, format!("Decimals: {decimals}"));
        }
        line(text, format!("Proxy: {}", yes_no(info.is_proxy)));
        if let Some(implementation) = info.implementation {
            line(text, format!("Implementation: {}", implementation.to_checksum(None)));
        }
    }

    fn contract_internals(text: &mut String, info: &ContractInfo) {
        line(text, "");
        line(text, "Technical details:");
        line(text, format!("- Functions: {}", info.functions.len()));
        for function in &info.functions {
            line(text, format!("  - {} ({})", function.signature, function.selector));
        }
        line(text, format!("- Events: {}", info.events.len()));
        for event in &info.events {
            line(text, format!("  - {}", event.signature));
        }
    }
}

impl SentenceBuilder for NarrativeBuilder {
    fn build_summary(&self, subject: Narrated<'_>, context: &TranslationContext) -> String {
        match subject {
            Narrated::Transaction(tx) => self.transaction_summary(tx, context),
            Narrated::Address(info) => {
                let kind = info.address_type.display_name();
                if info.is_labeled() {
                    format!("{} ({kind})", info.label)
                } else if let Some(alias) = &info.alias {
                    format!("{alias} ({kind})")
                } else {
                    format!("{} address", capitalized(kind))
                }
            }
            Narrated::Contract(info) => match (&info.symbol, info.name.is_empty()) {
                (_, true) => format!("{} smart contract", info.standard),
                (Some(symbol), false) => {
                    format!("{} ({symbol}) - {} contract", info.name, info.standard)
                }
                (None, false) => format!("{} - {} contract", info.name, info.standard),
            },
        }
    }

    fn build_description(&self, subject: Narrated<'_>, context: &TranslationContext) -> String {
        let level = context.preferences.detail_level;
        match subject {
            Narrated::Transaction(tx) => tiered(
                level,
                self.basic_transaction(tx, context),
                |text| self.transaction_details(text, tx),
                |text| self.transaction_internals(text, tx, context),
            ),
            Narrated::Address(info) => tiered(
                level,
                self.basic_address(info),
                |text| Self::address_details(text, info),
                |text| Self::address_internals(text, info),
            ),
            Narrated::Contract(info) => tiered(
                level,
                Self::basic_contract(info),
                |text| Self::contract_details(text, info),
                |text| Self::contract_internals(text, info),
            ),
        }
    }

    fn build_key_points(
        &self,
        subject: Narrated<'_>,
        context: &TranslationContext,
    ) -> Vec<String> {
        match subject {
            Narrated::Transaction(tx) => self.transaction_key_points(tx, context),
            Narrated::Address(info) => address_key_points(info),
            Narrated::Contract(info) => contract_key_points(info),
        }
    }
}

/// Grows `base` through the tiers up to `level`
fn tiered(
    level: DetailLevel,
    base: String,
    detailed: impl FnOnce(&mut String),
    technical: impl FnOnce(&mut String),
) -> String {
    let mut text = base;
    if level >= DetailLevel::Detailed {
        detailed(&mut text);
    }
    if level >= DetailLevel::Technical {
        technical(&mut text);
    }
    text
}

fn line(text: &mut String, content: impl AsRef<str>) {
    text.push('\n');
    text.push_str(content.as_ref());
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// `3d 4h`, `2h 5m`, `5m 12s` or `42s`
fn elapsed_text(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (days, hours) = (secs / 86_400, secs / 3_600 % 24);
    let (minutes, seconds) = (secs / 60 % 60, secs % 60);
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn kind_name(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::ValueTransfer => "Value transfer",
        TransactionKind::ContractInteraction => "Contract interaction",
        TransactionKind::ContractCreation => "Contract creation",
    }
}

fn address_key_points(info: &AddressInfo) -> Vec<String> {
    let mut points = Vec::new();
    if info.address_type.is_contract() {
        points.push("This is a smart contract address".to_string());
    } else if info.address_type == AddressType::Eoa {
        points.push("This is an externally owned account (EOA)".to_string());
    }
    if info.verified {
        points.push("Address is verified and trusted".to_string());
    }
    if info.is_exchange() {
        points.push("This address belongs to a cryptocurrency exchange".to_string());
    }
    if info.is_defi() {
        points.push("This address is associated with DeFi protocols".to_string());
    }
    points
}

fn contract_key_points(info: &ContractInfo) -> Vec<String> {
    let mut points = Vec::new();
    match info.standard {
        ContractStandard::Erc20 => points.push("This is a fungible token contract".to_string()),
        ContractStandard::Erc721 => {
            points.push("This is an NFT (Non-Fungible Token) contract".to_string())
        }
        ContractStandard::Erc1155 => points.push("This is a multi-token contract".to_string()),
        ContractStandard::Proxy | ContractStandard::Unknown => {}
    }
    if info.is_proxy {
        points.push("Contract uses proxy pattern for upgradability".to_string());
        if let Some(implementation) = info.implementation {
            points.push(format!(
                "Implementation contract: {}",
                implementation.to_checksum(None)
            ));
        }
    }
    points
}
