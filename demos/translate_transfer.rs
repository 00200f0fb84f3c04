// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Translate an ERC-20 transfer and its counterparties at every detail level
///
/// Everything runs offline: labels come from the configuration and DAI is registered in a
/// local contract registry.
///
/// Run with:
/// ```bash
/// cargo run --example translate_transfer
/// ```
///
/// Optional environment (also read from `.env`):
/// - `SEMIOSCRIBE_CONFIG`: path to a JSON translator configuration
/// - `SEMIOSCRIBE_LANGUAGE`: language code such as `es` or `ja`
use std::sync::Arc;

use alloy_primitives::{address, keccak256, U256};
use alloy_rpc_types::Log;
use alloy_sol_types::{sol, SolCall, SolEvent};
use anyhow::{Context, Result};
use chrono::Utc;
use semioscribe::events::Transfer;
use semioscribe::{
    ContractRegistry, DetailLevel, GasPrice, Language, RawReceipt, RawTransaction, Translator,
    TranslatorConfig, TranslatorConfigBuilder,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

sol! {
    function transfer(address to, uint256 amount) returns (bool);
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    dotenvy::dotenv().ok();

    let sender = address!("742d35cc6634c0532925a3b8d4c9db96c4b5c8e1");
    let recipient = address!("28c6c06298d514db089934071355e5743bf21d60");
    let dai = address!("6b175474e89094c44da98b954eedeac495271d0f");

    let base = match std::env::var("SEMIOSCRIBE_CONFIG") {
        Ok(path) => TranslatorConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        Err(_) => TranslatorConfig::default(),
    };
    let mut builder = TranslatorConfigBuilder::from_config(base)
        .custom_label(&sender.to_string(), "Alice")
        .custom_label(&recipient.to_string(), "Binance 14");
    if let Ok(language) = std::env::var("SEMIOSCRIBE_LANGUAGE") {
        builder = builder.language(&language);
    }
    let config = builder.build();

    let mut registry = ContractRegistry::new(config.contract_analyzer.clone());
    registry.register_erc20(dai, "Dai Stablecoin", "DAI", 18);

    let translator = Translator::builder(config)
        .with_analyzer(Arc::new(registry))
        .build()
        .context("Invalid translator configuration")?;
    translator.start().await?;

    let amount = U256::from(1_250u64) * U256::from(10u64).pow(U256::from(18u64));
    let transaction = RawTransaction {
        hash: keccak256(b"semioscribe demo transfer"),
        from: sender,
        to: Some(dai),
        value: U256::ZERO,
        input: transferCall {
            to: recipient,
            amount,
        }
        .abi_encode()
        .into(),
        nonce: 42,
        gas_limit: 65_000,
        gas_price: GasPrice::from_gwei(35),
        block_number: Some(19_250_000),
        block_timestamp: Some(Utc::now()),
    };
    let receipt = RawReceipt {
        success: true,
        gas_used: 51_234,
        effective_gas_price: None,
        logs: vec![Log {
            inner: alloy_primitives::Log {
                address: dai,
                data: Transfer {
                    from: sender,
                    to: recipient,
                    value: amount,
                }
                .encode_log_data(),
            },
            log_index: Some(0),
            ..Default::default()
        }],
    };

    let defaults = translator.default_options();
    for level in [DetailLevel::Basic, DetailLevel::Detailed, DetailLevel::Technical] {
        let result = translator
            .translate_transaction(
                transaction.clone(),
                receipt.clone(),
                defaults.clone().with_detail_level(level),
            )
            .await?;
        println!("\n=== Transaction ({level}) ===");
        println!("{}", result.summary);
        println!("\n{}", result.description);
        for point in &result.key_points {
            println!("  * {point}");
        }
        for warning in &result.warnings {
            println!("  ! {warning}");
        }
        for recommendation in &result.recommendations {
            println!("  > {recommendation}");
        }
    }

    let exchange = translator
        .translate_address(recipient, defaults.clone())
        .await?;
    println!("\n=== Recipient ===");
    println!("{}", exchange.summary);
    println!("{}", exchange.description);

    let token = translator.translate_contract(dai, defaults.clone()).await?;
    println!("\n=== Token contract ===");
    println!("{}", token.summary);
    println!("{}", token.description);

    if defaults.language != Language::En {
        let english = translator
            .translate_transaction(transaction, receipt, defaults.with_language(Language::En))
            .await?;
        println!("\nIn English: {}", english.summary);
    }

    let metrics = translator.metrics().await;
    println!("\n=== Metrics ===");
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    translator.stop().await;
    Ok(())
}
