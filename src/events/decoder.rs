// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Catalog-driven event decoder

use std::collections::BTreeMap;
use std::sync::Arc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, B256};
use alloy_rpc_types::Log;
use async_trait::async_trait;

use super::EventDecoder;
use crate::config::EventDecoderConfig;
use crate::errors::ParseError;
use crate::format::abi::raw_value;
use crate::format::{display_parameter, short_address, ValueFormatter};
use crate::resolver::catalog;
use crate::types::contract::{ContractInfo, EventInfo};
use crate::types::locale::Language;
use crate::types::transaction::{DecodedEvent, RawEventData};

/// Decodes logs against the emitting contract's event catalog, falling back to the
/// well-known token events when `resolve_topics` is set.
pub struct AbiEventDecoder {
    config: EventDecoderConfig,
    formatter: Arc<dyn ValueFormatter>,
}

impl AbiEventDecoder {
    pub fn new(config: EventDecoderConfig, formatter: Arc<dyn ValueFormatter>) -> Self {
        Self { config, formatter }
    }

    fn lookup(
        &self,
        topic: B256,
        indexed_count: usize,
        contract: Option<&ContractInfo>,
    ) -> Option<EventInfo> {
        if let Some(event) = contract.and_then(|c| c.event_by_topic(topic)) {
            return Some(event.clone());
        }
        if !self.config.resolve_topics {
            return None;
        }
        catalog::well_known_event(topic, indexed_count).cloned()
    }
}

/// Indexed dynamic values are stored as their keccak hash, which cannot be decoded
fn topic_holds_hash(ty: &DynSolType) -> bool {
    matches!(
        ty,
        DynSolType::String
            | DynSolType::Bytes
            | DynSolType::Array(_)
            | DynSolType::FixedArray(..)
            | DynSolType::Tuple(_)
    )
}

/// Decode every parameter of `event`, in declaration order
fn decode_parameters(
    event: &EventInfo,
    indexed: &[B256],
    data: &[u8],
) -> Result<Vec<DynSolValue>, ParseError> {
    if indexed.len() != event.indexed_count() {
        return Err(ParseError::decode_failed(
            format!("{} topics", event.name),
            format!(
                "expected {} indexed topics, got {}",
                event.indexed_count(),
                indexed.len()
            ),
        ));
    }

    let types = event
        .parameters
        .iter()
        .map(|p| {
            DynSolType::parse(&p.ty)
                .map_err(|e| ParseError::decode_failed(format!("{} parameter {}", event.name, p.name), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let body_types: Vec<DynSolType> = event
        .parameters
        .iter()
        .zip(&types)
        .filter(|(p, _)| !p.indexed)
        .map(|(_, ty)| ty.clone())
        .collect();
    let body = DynSolType::Tuple(body_types)
        .abi_decode_sequence(data)
        .map_err(|e| ParseError::decode_failed(format!("{} data", event.name), e))?;
    let mut body = match body {
        DynSolValue::Tuple(values) => values.into_iter(),
        other => vec![other].into_iter(),
    };
    let mut topics = indexed.iter();

    let mut values = Vec::with_capacity(event.parameters.len());
    for (param, ty) in event.parameters.iter().zip(&types) {
        let value = if param.indexed {
            let topic = topics
                .next()
                .ok_or_else(|| ParseError::decode_failed(&param.name, "missing topic"))?;
            if topic_holds_hash(ty) {
                DynSolValue::FixedBytes(*topic, 32)
            } else {
                ty.abi_decode(topic.as_slice())
                    .map_err(|e| ParseError::decode_failed(&param.name, e))?
            }
        } else {
            body.next()
                .ok_or_else(|| ParseError::decode_failed(&param.name, "missing data word"))?
        };
        values.push(value);
    }
    Ok(values)
}

fn describe(event: &EventInfo, contract: &str, formatted: &BTreeMap<String, String>) -> String {
    let param = |name: &str| formatted.get(name).map(String::as_str);
    match event.name.as_str() {
        "Transfer" => {
            let amount = param("value")
                .map(str::to_string)
                .or_else(|| param("tokenId").map(|id| format!("token #{id}")));
            match (amount, param("from"), param("to")) {
                (Some(amount), Some(from), Some(to)) => {
                    format!("Transfer of {amount} from {from} to {to}")
                }
                _ => format!("Transfer emitted by {contract}"),
            }
        }
        "Approval" => match (param("owner"), param("spender"), param("value")) {
            (Some(owner), Some(spender), Some(value)) => {
                format!("{owner} approved {spender} to spend {value}")
            }
            _ => format!("Approval emitted by {contract}"),
        },
        _ if formatted.is_empty() => format!("{} emitted by {contract}", event.name),
        _ => {
            let params = formatted
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} emitted by {contract} ({params})", event.name)
        }
    }
}

#[async_trait]
impl EventDecoder for AbiEventDecoder {
    async fn decode_event(
        &self,
        log: &Log,
        contract: Option<&ContractInfo>,
        language: Language,
    ) -> Result<DecodedEvent, ParseError> {
        let topics = log.inner.data.topics();
        let data = &log.inner.data.data;
        let Some((&topic0, indexed)) = topics.split_first() else {
            return Err(ParseError::MissingTopic);
        };
        let event = self
            .lookup(topic0, indexed.len(), contract)
            .ok_or(ParseError::UnknownEvent { topic: topic0 })?;
        let emitter = log.inner.address;

        let mut raw_parameters = BTreeMap::new();
        let mut formatted_parameters = BTreeMap::new();
        if self.config.decode_known_events {
            let values = decode_parameters(&event, indexed, data)?;
            for (param, value) in event.parameters.iter().zip(&values) {
                raw_parameters.insert(param.name.clone(), raw_value(value));
                formatted_parameters.insert(
                    param.name.clone(),
                    display_parameter(
                        self.formatter.as_ref(),
                        language,
                        &param.name,
                        value,
                        contract,
                    ),
                );
            }
        }

        let contract_name = contract
            .map(|c| c.name.clone())
            .unwrap_or_else(|| short_address(emitter));
        let raw = self.config.include_raw_data.then(|| RawEventData {
            topics: topics.iter().map(|t| t.to_string()).collect(),
            data: hex::encode_prefixed(data),
        });

        Ok(DecodedEvent {
            description: describe(&event, &contract_name, &formatted_parameters),
            event,
            contract: emitter,
            raw_parameters,
            formatted_parameters,
            log_index: log.log_index,
            raw,
        })
    }

    async fn resolve_event_signature(&self, topic: B256) -> Result<EventInfo, ParseError> {
        if !self.config.resolve_topics {
            return Err(ParseError::UnknownEvent { topic });
        }
        catalog::well_known_event_by_topic(topic)
            .cloned()
            .ok_or(ParseError::UnknownEvent { topic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::definitions::{Approval, Transfer};
    use crate::format::LocaleFormatter;
    use crate::types::contract::ContractStandard;
    use alloy_primitives::{address, Address, Bytes, LogData, U256};
    use alloy_sol_types::SolEvent;

    const TOKEN: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
    const ALICE: Address = address!("1111111111111111111111111111111111111111");
    const BOB: Address = address!("2222222222222222222222222222222222222222");

    fn decoder(config: EventDecoderConfig) -> AbiEventDecoder {
        AbiEventDecoder::new(config, Arc::new(LocaleFormatter::default()))
    }

    fn dai() -> ContractInfo {
        ContractInfo::new(TOKEN, "Dai Stablecoin", ContractStandard::Erc20)
            .with_symbol("DAI")
            .with_decimals(18)
            .with_events(catalog::erc20_events())
    }

    fn log(topics: Vec<B256>, data: Vec<u8>) -> Log {
        Log {
            inner: alloy_primitives::Log {
                address: TOKEN,
                data: LogData::new_unchecked(topics, Bytes::from(data)),
            },
            log_index: Some(7),
            ..Default::default()
        }
    }

    fn word(value: u128) -> Vec<u8> {
        U256::from(value).to_be_bytes::<32>().to_vec()
    }

    #[tokio::test]
    async fn test_decodes_erc20_transfer_with_token_decimals() {
        let log = log(
            vec![Transfer::SIGNATURE_HASH, ALICE.into_word(), BOB.into_word()],
            word(1_500_000_000_000_000_000),
        );
        let event = decoder(EventDecoderConfig::default())
            .decode_event(&log, Some(&dai()), Language::En)
            .await
            .unwrap();

        assert_eq!(event.event.name, "Transfer");
        assert_eq!(event.contract, TOKEN);
        assert_eq!(event.log_index, Some(7));
        assert_eq!(event.raw_parameters["from"], ALICE.to_checksum(None));
        assert_eq!(event.raw_parameters["value"], "1500000000000000000");
        assert_eq!(event.formatted_parameters["value"], "1.5000 DAI");
        assert!(event.description.starts_with("Transfer of 1.5000 DAI"));
        assert!(event.raw.is_none());

        let german = decoder(EventDecoderConfig::default())
            .decode_event(&log, Some(&dai()), Language::De)
            .await
            .unwrap();
        assert_eq!(german.formatted_parameters["value"], "1,5000 DAI");
        assert!(german.description.starts_with("Transfer of 1,5000 DAI"));
    }

    #[tokio::test]
    async fn test_erc721_transfer_falls_back_to_well_known() {
        let log = log(
            vec![
                Transfer::SIGNATURE_HASH,
                ALICE.into_word(),
                BOB.into_word(),
                B256::from(U256::from(42u64).to_be_bytes::<32>()),
            ],
            Vec::new(),
        );
        let event = decoder(EventDecoderConfig::default())
            .decode_event(&log, None, Language::En)
            .await
            .unwrap();
        assert_eq!(event.raw_parameters["tokenId"], "42");
        assert!(event.description.contains("token #42"));
    }

    #[tokio::test]
    async fn test_unknown_topic_is_rejected() {
        let topic = B256::repeat_byte(0xab);
        let err = decoder(EventDecoderConfig::default())
            .decode_event(&log(vec![topic], Vec::new()), None, Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownEvent { topic: t } if t == topic));
    }

    #[tokio::test]
    async fn test_log_without_topics() {
        let err = decoder(EventDecoderConfig::default())
            .decode_event(&log(Vec::new(), Vec::new()), None, Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingTopic));
    }

    #[tokio::test]
    async fn test_well_known_fallback_can_be_disabled() {
        let config = EventDecoderConfig {
            resolve_topics: false,
            ..EventDecoderConfig::default()
        };
        let log = log(
            vec![Approval::SIGNATURE_HASH, ALICE.into_word(), BOB.into_word()],
            word(10),
        );
        let decoder = decoder(config);
        assert!(decoder.decode_event(&log, None, Language::En).await.is_err());
        // The contract catalog is still consulted
        assert!(decoder.decode_event(&log, Some(&dai()), Language::En).await.is_ok());
        assert!(decoder
            .resolve_event_signature(Approval::SIGNATURE_HASH)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_raw_data_and_skipped_parameters() {
        let config = EventDecoderConfig {
            decode_known_events: false,
            include_raw_data: true,
            ..EventDecoderConfig::default()
        };
        let log = log(
            vec![Approval::SIGNATURE_HASH, ALICE.into_word(), BOB.into_word()],
            word(10),
        );
        let event = decoder(config)
            .decode_event(&log, Some(&dai()), Language::En)
            .await
            .unwrap();
        assert!(event.raw_parameters.is_empty());
        let raw = event.raw.unwrap();
        assert_eq!(raw.topics.len(), 3);
        assert!(raw.data.ends_with("0a"));
    }

    #[tokio::test]
    async fn test_resolve_event_signature() {
        let event = decoder(EventDecoderConfig::default())
            .resolve_event_signature(Transfer::SIGNATURE_HASH)
            .await
            .unwrap();
        assert_eq!(event.signature, "Transfer(address,address,uint256)");
    }
}
