// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end translator tests against mock resolvers
//!
//! Run with logs: `RUST_LOG=semioscribe=debug cargo test --test translator_tests`

mod helpers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy_primitives::{Bytes, TxHash, U256};
use helpers::*;
use semioscribe::narrative::rules::{
    FAILED_TRANSACTION_WARNING, HIGH_GAS_PRICE_RECOMMENDATION, LOW_GAS_EFFICIENCY_WARNING,
    UNRECOGNIZED_METHOD_WARNING, UNVERIFIED_CONTRACT_RECOMMENDATION,
};
use semioscribe::{
    ContractMetadata, DetailLevel, EntityKind, InMemoryMetadataProvider, Language, RiskLevel,
    TranslationError, TranslationOptions, TranslationRequest, TranslationStep, Translator,
    TranslatorConfig, TranslatorConfigBuilder,
};

fn options() -> TranslationOptions {
    TranslationOptions::default()
}

#[tokio::test]
async fn test_plain_ether_transfer() {
    init_tracing();
    let translator = translator(TranslatorConfig::default());
    let (tx, receipt) = eth_transfer(USER, STRANGER, ONE_ETHER, 20);

    let result = translator
        .translate_transaction(tx, receipt, options())
        .await
        .unwrap();

    assert!(result.summary.contains("1.0000 ETH"), "{}", result.summary);
    assert!(result.summary.contains("User Wallet"));
    assert!(result.description.contains("ETH"));
    assert!(result.description.contains("gwei"));
    assert!(result.key_points.contains(&"Used 100.0% of the gas limit".to_string()));
    assert!(result.warnings.is_empty());
    assert!(!result
        .recommendations
        .contains(&HIGH_GAS_PRICE_RECOMMENDATION.to_string()));
    assert_eq!(result.metadata.translation_type, EntityKind::Transaction);
    assert!(result.metadata.confidence >= 0.5 && result.metadata.confidence <= 1.0);
}

#[tokio::test]
async fn test_exchange_address_key_points() {
    let translator = translator(TranslatorConfig::default());

    let result = translator.translate_address(EXCHANGE, options()).await.unwrap();

    assert!(result.summary.contains("Exchange Hot Wallet"));
    assert!(result
        .key_points
        .contains(&"This address belongs to a cryptocurrency exchange".to_string()));
    assert!(result
        .key_points
        .contains(&"Address is verified and trusted".to_string()));
    assert_eq!(result.metadata.confidence, 1.0);

    let detailed = translator
        .translate_address(EXCHANGE, options().with_detail_level(DetailLevel::Detailed))
        .await
        .unwrap();
    assert!(detailed.description.contains("Type: Exchange"), "{}", detailed.description);
    assert!(detailed.description.contains("Alias: exchange.eth"));
    assert!(detailed.description.contains("Verified: yes"));
    assert!(detailed.description.contains("Tags: exchange"));
}

#[tokio::test]
async fn test_erc20_and_proxy_contracts() {
    let translator = translator(TranslatorConfig::default());

    let dai = translator.translate_contract(DAI, options()).await.unwrap();
    assert!(dai.summary.contains("DAI"));
    assert!(dai
        .key_points
        .contains(&"This is a fungible token contract".to_string()));

    let proxy = translator.translate_contract(PROXY, options()).await.unwrap();
    assert!(proxy
        .key_points
        .contains(&"Contract uses proxy pattern for upgradability".to_string()));
    assert!(proxy.key_points.contains(&format!(
        "Implementation contract: {}",
        IMPLEMENTATION.to_checksum(None)
    )));
    assert!(proxy.warnings.is_empty());
}

#[tokio::test]
async fn test_unknown_contract_is_an_analysis_error() {
    let translator = translator(TranslatorConfig::default());

    let err = translator
        .translate_contract(STRANGER, options())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(TranslationStep::ContractAnalysis));
    assert_eq!(translator.metrics().await.cache.entries, 0);
}

#[tokio::test]
async fn test_token_transfer_summary() {
    let translator = translator(TranslatorConfig::default());
    let amount = U256::from(250u64) * U256::from(10u64).pow(U256::from(18u64));
    let (tx, receipt) = dai_transfer(USER, STRANGER, amount);

    let result = translator
        .translate_transaction(tx, receipt, options())
        .await
        .unwrap();

    assert!(result.summary.contains("250.0000 DAI"), "{}", result.summary);
    assert!(result.key_points.contains(&"Called transfer on a smart contract".to_string()));
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_repeated_request_is_served_from_cache() {
    let resolver = Arc::new(CountingResolver::new(PatternResolver::new()));
    let translator = Translator::builder(TranslatorConfig::default())
        .with_resolver(resolver.clone())
        .with_analyzer(Arc::new(registry()))
        .build()
        .unwrap();
    let (tx, receipt) = eth_transfer(USER, STRANGER, ONE_ETHER, 20);

    let first = translator
        .translate_transaction(tx.clone(), receipt.clone(), options())
        .await
        .unwrap();
    let calls = resolver.calls();
    let second = translator
        .translate_transaction(tx, receipt, options())
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.calls(), calls);
    let stats = translator.metrics().await.cache;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 1);
}

#[tokio::test]
async fn test_language_variants_are_cached_separately() {
    let translator = translator(TranslatorConfig::default());
    let (tx, receipt) = eth_transfer(USER, STRANGER, ONE_ETHER, 20);

    let english = translator
        .translate_transaction(tx.clone(), receipt.clone(), options())
        .await
        .unwrap();
    let spanish = translator
        .translate_transaction(tx, receipt, options().with_language(Language::Es))
        .await
        .unwrap();

    assert!(!Arc::ptr_eq(&english, &spanish));
    assert!(spanish.summary.contains("envió"), "{}", spanish.summary);
    assert_eq!(spanish.metadata.language, Language::Es);
    assert_eq!(translator.metrics().await.cache.entries, 2);
}

#[tokio::test]
async fn test_request_language_sets_number_style() {
    let translator = translator(TranslatorConfig::default());
    let (tx, receipt) = eth_transfer(USER, STRANGER, 1234 * ONE_ETHER, 20);

    let german = translator
        .translate_transaction(
            tx.clone(),
            receipt.clone(),
            options().with_language(Language::De),
        )
        .await
        .unwrap();
    assert!(german.summary.contains("1.234,0000"), "{}", german.summary);
    assert!(german.description.contains("1.234,0000 ETH"));

    let english = translator
        .translate_transaction(tx, receipt, options())
        .await
        .unwrap();
    assert!(english.summary.contains("1,234.0000 ETH"), "{}", english.summary);

    let amount = U256::from(250u64) * U256::from(ONE_ETHER);
    let (tx, receipt) = dai_transfer(USER, EXCHANGE, amount);
    let french = translator
        .translate_transaction(
            tx,
            receipt,
            options()
                .with_language(Language::Fr)
                .with_detail_level(DetailLevel::Detailed),
        )
        .await
        .unwrap();
    assert!(french.description.contains("- 250,0000 DAI from"), "{}", french.description);
    assert!(french.key_points.contains(&"Moved 250,0000 DAI".to_string()));
}

#[tokio::test]
async fn test_congested_network_in_technical_tier() {
    let translator = translator(TranslatorConfig::default());
    let technical = options().with_detail_level(DetailLevel::Technical);

    let (tx, receipt) = eth_transfer(USER, STRANGER, ONE_ETHER, 250);
    let result = translator
        .translate_transaction(tx, receipt, technical.clone())
        .await
        .unwrap();
    assert!(
        result.description.contains("- Network congestion: extreme"),
        "{}",
        result.description
    );
    assert!(result.description.contains("- Time since block: "));
    assert!(result.description.contains("- Network utilization: 98%"));
    assert!(result
        .key_points
        .contains(&"Network congestion was extreme at 250.00 gwei".to_string()));

    let (tx, receipt) = eth_transfer(USER, STRANGER, ONE_ETHER, 10);
    let calm = translator
        .translate_transaction(tx, receipt, technical)
        .await
        .unwrap();
    assert!(calm.description.contains("- Network congestion: low"));
    assert!(calm.key_points.iter().all(|point| !point.contains("congestion")));
}

#[tokio::test]
async fn test_failed_wasteful_call_warnings() {
    let translator = translator(TranslatorConfig::default());
    let (tx, receipt) = contract_call(
        USER,
        VAULT,
        Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
        0,
        100_000,
        30_000,
        60,
        false,
        Vec::new(),
    );

    let result = translator
        .translate_transaction(tx, receipt, options())
        .await
        .unwrap();

    assert_eq!(
        result.warnings,
        vec![
            FAILED_TRANSACTION_WARNING.to_string(),
            LOW_GAS_EFFICIENCY_WARNING.to_string(),
            UNRECOGNIZED_METHOD_WARNING.to_string(),
        ]
    );
    assert_eq!(
        result.recommendations,
        vec![
            HIGH_GAS_PRICE_RECOMMENDATION.to_string(),
            UNVERIFIED_CONTRACT_RECOMMENDATION.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_resolver_failure_is_reported_and_not_cached() {
    let translator = Translator::builder(TranslatorConfig::default())
        .with_resolver(Arc::new(PatternResolver::new().failing_for(STRANGER)))
        .with_analyzer(Arc::new(registry()))
        .build()
        .unwrap();

    let err = translator
        .translate_address(STRANGER, options())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Resolution { .. }));
    assert_eq!(err.step(), Some(TranslationStep::AddressResolution));

    let (tx, receipt) = eth_transfer(USER, STRANGER, ONE_ETHER, 20);
    let err = translator
        .translate_transaction(tx, receipt, options())
        .await
        .unwrap_err();
    assert_eq!(err.step(), Some(TranslationStep::AddressResolution));

    assert_eq!(translator.metrics().await.cache.entries, 0);
}

#[tokio::test]
async fn test_translate_request_dispatch() {
    let translator = translator(TranslatorConfig::default());
    let request = TranslationRequest::address(USER, options().with_detail_level(DetailLevel::Basic));

    let result = translator.translate(request).await.unwrap();

    assert_eq!(result.metadata.translation_type, EntityKind::Address);
    assert_eq!(result.metadata.detail_level, DetailLevel::Basic);
    assert!(result.summary.contains("User Wallet"));
}

#[tokio::test]
async fn test_expired_entries_are_recomputed() {
    let config = TranslatorConfigBuilder::new()
        .cache_ttl(Duration::from_millis(50))
        .build();
    let resolver = Arc::new(RelabelingResolver::new("Old Wallet"));
    let translator = Translator::builder(config)
        .with_resolver(resolver.clone())
        .with_analyzer(Arc::new(registry()))
        .build()
        .unwrap();

    let first = translator.translate_address(USER, options()).await.unwrap();
    resolver.relabel("New Wallet");
    let cached = translator.translate_address(USER, options()).await.unwrap();
    assert!(cached.summary.contains("Old Wallet"));

    tokio::time::sleep(Duration::from_millis(150)).await;
    let second = translator.translate_address(USER, options()).await.unwrap();

    assert!(first.summary.contains("Old Wallet"), "{}", first.summary);
    assert!(second.summary.contains("New Wallet"), "{}", second.summary);
    assert!(!Arc::ptr_eq(&first, &second));
    let stats = translator.metrics().await.cache;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.expirations, 1);
}

#[tokio::test]
async fn test_started_translator_sweeps_expired_entries() {
    let config = TranslatorConfigBuilder::new()
        .cache_ttl(Duration::from_millis(30))
        .cache_cleanup_interval(Duration::from_millis(20))
        .build();
    let translator = translator(config);
    translator.start().await.unwrap();

    translator.translate_address(USER, options()).await.unwrap();
    translator.translate_address(EXCHANGE, options()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(translator.metrics().await.cache.entries, 0);
    translator.stop().await;
    assert!(!translator.is_running().await);
}

#[tokio::test]
async fn test_disabled_cache_always_recomputes() {
    let translator = translator(TranslatorConfigBuilder::new().disable_cache().build());

    let first = translator.translate_address(USER, options()).await.unwrap();
    let second = translator.translate_address(USER, options()).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    let metrics = translator.metrics().await;
    assert!(!metrics.features.cache);
    assert_eq!(metrics.cache.entries, 0);
}

#[tokio::test]
async fn test_failed_enrichment_keeps_unenriched_result() {
    let translator = Translator::builder(TranslatorConfig::default())
        .with_resolver(Arc::new(PatternResolver::new()))
        .with_enrichment(Arc::new(FailingEnrichment))
        .build()
        .unwrap();

    let result = translator.translate_address(USER, options()).await.unwrap();

    assert!(result.related_items.is_empty());
    assert!(result.metadata.enrichment_applied.is_empty());
}

#[tokio::test]
async fn test_enrichment_timeout_is_bounded() {
    let config = TranslatorConfigBuilder::new()
        .enrichment_timeout(Duration::from_millis(50))
        .build();
    let translator = Translator::builder(config)
        .with_resolver(Arc::new(PatternResolver::new()))
        .with_enrichment(Arc::new(SlowEnrichment {
            delay: Duration::from_secs(2),
        }))
        .build()
        .unwrap();

    let started = Instant::now();
    let result = translator.translate_address(USER, options()).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(result.related_items.is_empty());
}

#[tokio::test]
async fn test_enrichment_within_timeout_is_applied() {
    let translator = Translator::builder(TranslatorConfig::default())
        .with_resolver(Arc::new(PatternResolver::new()))
        .with_enrichment(Arc::new(SlowEnrichment {
            delay: Duration::from_millis(1),
        }))
        .build()
        .unwrap();

    let result = translator.translate_address(USER, options()).await.unwrap();
    assert_eq!(result.related_items.len(), 1);
    assert_eq!(result.metadata.enrichment_applied, vec!["slow"]);

    let without = translator
        .translate_address(USER, options().with_metadata(false))
        .await
        .unwrap();
    assert!(without.related_items.is_empty());
}

#[tokio::test]
async fn test_default_enrichment_adds_price_snapshot() {
    let translator = translator(TranslatorConfig::default());

    let result = translator.translate_address(USER, options()).await.unwrap();

    assert!(result
        .metadata
        .enrichment_applied
        .contains(&"price_data".to_string()));
    assert!(result
        .related_items
        .iter()
        .any(|item| item.description.starts_with("ETH price: 2000.00 USD")));
}

#[tokio::test]
async fn test_metadata_provider_fills_category_and_risk() {
    let provider = Arc::new(InMemoryMetadataProvider::new());
    provider
        .insert_contract(
            DAI,
            ContractMetadata {
                category: "stablecoin".to_string(),
                security_score: 0.95,
                risk_level: RiskLevel::Low,
                tags: vec!["erc20".to_string()],
            },
        )
        .await;
    let translator = Translator::builder(TranslatorConfig::default())
        .with_resolver(Arc::new(PatternResolver::new()))
        .with_analyzer(Arc::new(registry()))
        .with_metadata_provider(provider)
        .build()
        .unwrap();

    let dai = translator.translate_contract(DAI, options()).await.unwrap();
    assert_eq!(dai.metadata.category.as_deref(), Some("stablecoin"));
    assert_eq!(dai.metadata.risk_level, Some(RiskLevel::Low));
    assert_eq!(dai.metadata.tags, vec!["erc20"]);

    let proxy = translator.translate_contract(PROXY, options()).await.unwrap();
    assert_eq!(proxy.metadata.category, None);
}

#[tokio::test]
async fn test_config_file_round_trip() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        r#"{ "language": "fr", "detail_level": "technical", "cache": { "max_size": 2 } }"#,
    )
    .unwrap();

    let config = TranslatorConfig::from_json_file(file.path()).unwrap();
    let translator = translator(config);

    let defaults = translator.default_options();
    assert_eq!(defaults.language, Language::Fr);
    assert_eq!(defaults.detail_level, DetailLevel::Technical);

    for address in [USER, EXCHANGE, VAULT] {
        translator.translate_address(address, defaults.clone()).await.unwrap();
    }
    let stats = translator.metrics().await.cache;
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.evictions, 1);
}

#[tokio::test]
async fn test_invalid_config_file_is_rejected() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"{ "language": "xx" }"#).unwrap();

    let config = TranslatorConfig::from_json_file(file.path()).unwrap();
    let err = Translator::new(config).unwrap_err();

    assert!(matches!(err, TranslationError::Config(_)));
}

#[tokio::test]
async fn test_concurrent_translations_share_one_translator() {
    let translator = Arc::new(translator(TranslatorConfig::default()));
    translator.start().await.unwrap();

    let handles: Vec<_> = (0..16u64)
        .map(|i| {
            let translator = Arc::clone(&translator);
            tokio::spawn(async move {
                let (mut tx, receipt) =
                    eth_transfer(USER, STRANGER, u128::from(i + 1) * ONE_ETHER, 20);
                tx.hash = TxHash::with_last_byte(i as u8);
                translator.translate_transaction(tx, receipt, options()).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(translator.metrics().await.cache.entries, 16);
    translator.stop().await;
}
