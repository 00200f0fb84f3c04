// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, Selector};
use alloy_rpc_types::Log;
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use tracing::debug;

use super::TransactionParser;
use crate::config::TransactionParserConfig;
use crate::errors::ParseError;
use crate::events::{EventDecoder, Transfer};
use crate::format::abi::raw_value;
use crate::format::{display_parameter, short_address, ValueFormatter};
use crate::resolver::{catalog, AddressResolver, ContractAnalyzer};
use crate::types::contract::{ContractInfo, FunctionInfo};
use crate::types::gas::GasAnalysis;
use crate::types::locale::Language;
use crate::types::transaction::{
    MethodCall, ParsedTransaction, RawReceipt, RawTransaction, TokenInfo, TokenTransfer,
    TransactionKind, TransactionStatus,
};
use crate::types::wei::WeiAmount;

/// Symbol shown for transfers of tokens the analyzer does not know
const UNKNOWN_TOKEN_SYMBOL: &str = "TOKEN";
/// Decimals assumed for tokens that do not declare them
const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Contract lookups made while parsing one transaction
type ContractLookups = HashMap<Address, Option<ContractInfo>>;

/// Parser built from the leaf components
///
/// Counterparties are resolved concurrently. Contract info for the target and for every
/// log emitter is best-effort and looked up once per transaction.
pub struct StandardTransactionParser {
    config: TransactionParserConfig,
    resolver: Arc<dyn AddressResolver>,
    analyzer: Arc<dyn ContractAnalyzer>,
    events: Arc<dyn EventDecoder>,
    formatter: Arc<dyn ValueFormatter>,
}

impl StandardTransactionParser {
    pub fn new(
        config: TransactionParserConfig,
        resolver: Arc<dyn AddressResolver>,
        analyzer: Arc<dyn ContractAnalyzer>,
        events: Arc<dyn EventDecoder>,
        formatter: Arc<dyn ValueFormatter>,
    ) -> Self {
        Self {
            config,
            resolver,
            analyzer,
            events,
            formatter,
        }
    }

    async fn contract(&self, lookups: &mut ContractLookups, address: Address) -> Option<ContractInfo> {
        if let Some(known) = lookups.get(&address) {
            return known.clone();
        }
        let info = match self.analyzer.analyze_contract(address).await {
            Ok(info) => Some(info),
            Err(e) => {
                debug!(address = %address, error = %e, "No contract info");
                None
            }
        };
        lookups.insert(address, info.clone());
        info
    }

    /// ERC-20 `Transfer` logs carry exactly three topics; ERC-721 transfers index the token id too
    fn token_transfer(
        &self,
        log: &Log,
        contract: Option<&ContractInfo>,
        language: Language,
    ) -> Option<TokenTransfer> {
        let topics = log.inner.data.topics();
        if topics.len() != 3 || topics[0] != Transfer::SIGNATURE_HASH {
            return None;
        }
        let decoded = match Transfer::decode_log(&log.inner) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(token = %log.inner.address, error = %e, "Malformed Transfer log");
                return None;
            }
        };

        let token = token_info(log.inner.address, contract);
        let amount = decoded.data.value;
        Some(TokenTransfer {
            from: decoded.data.from,
            to: decoded.data.to,
            formatted_amount: self
                .formatter
                .format_value(language, amount, token.decimals, &token.symbol),
            token,
            amount,
        })
    }
}

fn token_info(address: Address, contract: Option<&ContractInfo>) -> TokenInfo {
    match contract {
        Some(contract) => TokenInfo {
            address,
            name: contract.name.clone(),
            symbol: contract
                .symbol
                .clone()
                .unwrap_or_else(|| UNKNOWN_TOKEN_SYMBOL.to_string()),
            decimals: contract.decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS),
        },
        None => TokenInfo {
            address,
            name: short_address(address),
            symbol: UNKNOWN_TOKEN_SYMBOL.to_string(),
            decimals: DEFAULT_TOKEN_DECIMALS,
        },
    }
}

fn decode_arguments(function: &FunctionInfo, data: &[u8]) -> Result<Vec<DynSolValue>, ParseError> {
    let types = function
        .parameters
        .iter()
        .map(|p| {
            DynSolType::parse(&p.ty).map_err(|e| {
                ParseError::decode_failed(format!("{} parameter {}", function.name, p.name), e)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let decoded = DynSolType::Tuple(types)
        .abi_decode_params(data)
        .map_err(|e| ParseError::decode_failed(format!("{} call data", function.name), e))?;
    Ok(match decoded {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    })
}

fn describe_call(
    function: &FunctionInfo,
    formatted: &BTreeMap<String, String>,
    contract: Option<&ContractInfo>,
) -> String {
    let p = |name: &str| formatted.get(name).map(String::as_str);
    let action = match function.name.as_str() {
        "transfer" => match (p("amount"), p("to")) {
            (Some(amount), Some(to)) => Some(format!("Transfer {amount} to {to}")),
            _ => None,
        },
        "transferFrom" | "safeTransferFrom" => {
            match (p("amount").or(p("tokenId")), p("from"), p("to")) {
                (Some(amount), Some(from), Some(to)) => {
                    Some(format!("Transfer {amount} from {from} to {to}"))
                }
                _ => None,
            }
        }
        "approve" => match (p("spender").or(p("approved")), p("amount").or(p("tokenId"))) {
            (Some(spender), Some(amount)) => Some(format!("Approve {spender} to spend {amount}")),
            _ => None,
        },
        _ => None,
    };
    let action = action.unwrap_or_else(|| function.description.clone());
    match contract {
        Some(contract) => format!("{action} on {}", contract.name),
        None => action,
    }
}

#[async_trait]
impl TransactionParser for StandardTransactionParser {
    async fn parse_transaction(
        &self,
        transaction: &RawTransaction,
        receipt: &RawReceipt,
        language: Language,
    ) -> Result<ParsedTransaction, ParseError> {
        let kind = TransactionKind::classify(transaction.to, &transaction.input);

        let recipient = async {
            match transaction.to {
                Some(to) => self.resolver.resolve_address(to).await.map(Some),
                None => Ok(None),
            }
        };
        let (from, to) =
            futures::try_join!(self.resolver.resolve_address(transaction.from), recipient)?;

        let mut lookups = ContractLookups::new();
        let target = match (kind, transaction.to) {
            (TransactionKind::ContractInteraction, Some(to)) => self.contract(&mut lookups, to).await,
            _ => None,
        };

        let method_call = if self.config.parse_method_calls
            && kind == TransactionKind::ContractInteraction
        {
            match self
                .decode_method_call(&transaction.input, target.as_ref(), language)
                .await {
                Ok(call) => Some(call),
                Err(e) => {
                    debug!(tx_hash = %transaction.hash, error = %e, "Method call left undecoded");
                    None
                }
            }
        } else {
            None
        };

        let mut token_transfers = Vec::new();
        let mut events = Vec::new();
        for log in &receipt.logs {
            let emitter = self.contract(&mut lookups, log.inner.address).await;
            if self.config.extract_token_transfers {
                token_transfers.extend(self.token_transfer(log, emitter.as_ref(), language));
            }
            match self.events.decode_event(log, emitter.as_ref(), language).await {
                Ok(event) => events.push(event),
                Err(e) => debug!(
                    tx_hash = %transaction.hash,
                    log_index = ?log.log_index,
                    error = %e,
                    "Skipping undecoded log"
                ),
            }
        }

        debug!(
            tx_hash = %transaction.hash,
            kind = kind.as_str(),
            events = events.len(),
            token_transfers = token_transfers.len(),
            "Parsed transaction"
        );

        Ok(ParsedTransaction {
            hash: transaction.hash,
            kind,
            from,
            to,
            value: WeiAmount::new(transaction.value),
            method_call,
            token_transfers,
            events,
            gas_analysis: self.analyze_gas_usage(transaction, receipt),
            status: TransactionStatus::from_receipt(receipt),
            block_number: transaction.block_number,
            timestamp: transaction.block_timestamp,
        })
    }

    async fn decode_method_call(
        &self,
        input: &[u8],
        contract: Option<&ContractInfo>,
        language: Language,
    ) -> Result<MethodCall, ParseError> {
        if input.len() < 4 {
            return Err(ParseError::insufficient_data(4, input.len()));
        }
        let selector = Selector::from_slice(&input[..4]);
        let function = contract
            .and_then(|c| c.function_by_selector(selector))
            .or_else(|| catalog::well_known_function(selector))
            .cloned()
            .ok_or(ParseError::UnknownSelector { selector })?;

        let mut raw_parameters = BTreeMap::new();
        let mut formatted_parameters = BTreeMap::new();
        if self.config.decode_input_data {
            match decode_arguments(&function, &input[4..]) {
                Ok(values) => {
                    for (param, value) in function.parameters.iter().zip(&values) {
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
                Err(e) => debug!(function = %function.signature, error = %e, "Keeping call without parameters"),
            }
        }

        Ok(MethodCall {
            description: describe_call(&function, &formatted_parameters, contract),
            function,
            raw_parameters,
            formatted_parameters,
        })
    }

    fn analyze_gas_usage(&self, transaction: &RawTransaction, receipt: &RawReceipt) -> GasAnalysis {
        let price = receipt.effective_gas_price.unwrap_or(transaction.gas_price);
        GasAnalysis::new(transaction.gas_limit, receipt.gas_used, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventDecoderConfig;
    use crate::errors::ResolutionError;
    use crate::events::AbiEventDecoder;
    use crate::format::LocaleFormatter;
    use crate::resolver::{AddressBook, ContractRegistry};
    use crate::types::address::AddressInfo;
    use crate::types::gas::GasPrice;
    use alloy_primitives::{address, b256, Bytes, LogData, U256};
    use alloy_sol_types::{sol, SolCall};

    sol! {
        function transfer(address to, uint256 amount) external returns (bool);
    }

    const DAI: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
    const ALICE: Address = address!("1111111111111111111111111111111111111111");
    const BOB: Address = address!("2222222222222222222222222222222222222222");
    const ONE_AND_HALF: u128 = 1_500_000_000_000_000_000;

    struct FailingResolver;

    #[async_trait]
    impl AddressResolver for FailingResolver {
        async fn resolve_address(&self, address: Address) -> Result<AddressInfo, ResolutionError> {
            Err(ResolutionError::not_found("address", address))
        }

        async fn resolve_ens(&self, address: Address) -> Result<String, ResolutionError> {
            Err(ResolutionError::not_found("alias", address))
        }

        fn address_label(&self, _address: Address) -> String {
            String::new()
        }
    }

    fn parser_with(config: TransactionParserConfig, resolver: Arc<dyn AddressResolver>) -> StandardTransactionParser {
        let formatter: Arc<dyn ValueFormatter> = Arc::new(LocaleFormatter::default());
        let mut registry = ContractRegistry::default();
        registry.register_erc20(DAI, "Dai Stablecoin", "DAI", 18);
        StandardTransactionParser::new(
            config,
            resolver,
            Arc::new(registry),
            Arc::new(AbiEventDecoder::new(EventDecoderConfig::default(), formatter.clone())),
            formatter,
        )
    }

    fn parser() -> StandardTransactionParser {
        parser_with(TransactionParserConfig::default(), Arc::new(AddressBook::empty()))
    }

    fn raw(to: Option<Address>, input: Vec<u8>) -> RawTransaction {
        RawTransaction {
            hash: b256!("00000000000000000000000000000000000000000000000000000000000000aa"),
            from: ALICE,
            to,
            value: U256::ZERO,
            input: Bytes::from(input),
            nonce: 3,
            gas_limit: 60_000,
            gas_price: GasPrice::from_gwei(20),
            block_number: Some(19_000_000),
            block_timestamp: None,
        }
    }

    fn receipt(logs: Vec<Log>) -> RawReceipt {
        RawReceipt {
            success: true,
            gas_used: 45_000,
            effective_gas_price: None,
            logs,
        }
    }

    fn transfer_log() -> Log {
        let data = U256::from(ONE_AND_HALF).to_be_bytes::<32>().to_vec();
        Log {
            inner: alloy_primitives::Log {
                address: DAI,
                data: LogData::new_unchecked(
                    vec![Transfer::SIGNATURE_HASH, ALICE.into_word(), BOB.into_word()],
                    Bytes::from(data),
                ),
            },
            ..Default::default()
        }
    }

    fn transfer_input() -> Vec<u8> {
        transferCall {
            to: BOB,
            amount: U256::from(ONE_AND_HALF),
        }
        .abi_encode()
    }

    #[tokio::test]
    async fn test_value_transfer() {
        let mut tx = raw(Some(BOB), Vec::new());
        tx.value = U256::from(10u64).pow(U256::from(18));
        let parsed = parser()
            .parse_transaction(&tx, &receipt(Vec::new()), Language::En)
            .await
            .unwrap();

        assert_eq!(parsed.kind, TransactionKind::ValueTransfer);
        assert!(parsed.method_call.is_none());
        assert_eq!(parsed.to.unwrap().address, BOB);
        assert_eq!(parsed.status, TransactionStatus::Success);
        assert!((parsed.value.to_ether() - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_erc20_transfer_call() {
        let tx = raw(Some(DAI), transfer_input());
        let parsed = parser()
            .parse_transaction(&tx, &receipt(vec![transfer_log()]), Language::En)
            .await
            .unwrap();

        assert_eq!(parsed.kind, TransactionKind::ContractInteraction);
        let call = parsed.method_call.unwrap();
        assert_eq!(call.function.name, "transfer");
        assert_eq!(call.raw_parameters["amount"], ONE_AND_HALF.to_string());
        assert_eq!(call.raw_parameters["to"], BOB.to_checksum(None));
        assert_eq!(call.formatted_parameters["amount"], "1.5000 DAI");
        assert!(call.description.starts_with("Transfer 1.5000 DAI to"));
        assert!(call.description.ends_with("on Dai Stablecoin"));

        assert_eq!(parsed.token_transfers.len(), 1);
        let transfer = &parsed.token_transfers[0];
        assert_eq!(transfer.token.symbol, "DAI");
        assert_eq!(transfer.formatted_amount, "1.5000 DAI");
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].event.name, "Transfer");
    }

    #[tokio::test]
    async fn test_amounts_follow_requested_language() {
        let tx = raw(Some(DAI), transfer_input());
        let parsed = parser()
            .parse_transaction(&tx, &receipt(vec![transfer_log()]), Language::De)
            .await
            .unwrap();

        let call = parsed.method_call.unwrap();
        assert_eq!(call.formatted_parameters["amount"], "1,5000 DAI");
        assert!(call.description.starts_with("Transfer 1,5000 DAI to"));
        assert_eq!(parsed.token_transfers[0].formatted_amount, "1,5000 DAI");

        let bare = parser()
            .decode_method_call(&transfer_input(), None, Language::Fr)
            .await
            .unwrap();
        assert_eq!(bare.formatted_parameters["amount"], "1 500 000 000 000 000 000");
    }

    #[tokio::test]
    async fn test_short_call_data_leaves_method_absent() {
        let tx = raw(Some(DAI), vec![0xa9, 0x05]);
        let parsed = parser()
            .parse_transaction(&tx, &receipt(Vec::new()), Language::En)
            .await
            .unwrap();
        assert_eq!(parsed.kind, TransactionKind::ContractInteraction);
        assert!(parsed.method_call.is_none());

        let err = parser()
            .decode_method_call(&[0xa9], None, Language::En)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::InsufficientData {
                expected: 4,
                actual: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_unknown_selector_leaves_method_absent() {
        let tx = raw(Some(ALICE), vec![0xde, 0xad, 0xbe, 0xef, 0x00]);
        let parsed = parser()
            .parse_transaction(&tx, &receipt(Vec::new()), Language::En)
            .await
            .unwrap();
        assert!(parsed.method_call.is_none());
    }

    #[tokio::test]
    async fn test_well_known_selector_without_contract_info() {
        let tx = raw(Some(BOB), transfer_input());
        let parsed = parser()
            .parse_transaction(&tx, &receipt(Vec::new()), Language::En)
            .await
            .unwrap();
        let call = parsed.method_call.unwrap();
        assert_eq!(call.function.name, "transfer");
        // Without token metadata the amount stays a grouped integer
        assert_eq!(call.formatted_parameters["amount"], "1,500,000,000,000,000,000");
    }

    #[tokio::test]
    async fn test_input_decoding_disabled_keeps_identity() {
        let config = TransactionParserConfig {
            decode_input_data: false,
            ..TransactionParserConfig::default()
        };
        let parser = parser_with(config, Arc::new(AddressBook::empty()));
        let tx = raw(Some(DAI), transfer_input());
        let call = parser
            .parse_transaction(&tx, &receipt(Vec::new()), Language::En)
            .await
            .unwrap()
            .method_call
            .unwrap();
        assert_eq!(call.function.name, "transfer");
        assert!(call.raw_parameters.is_empty());
    }

    #[tokio::test]
    async fn test_contract_creation() {
        let tx = raw(None, vec![0x60, 0x80, 0x60, 0x40]);
        let parsed = parser()
            .parse_transaction(&tx, &receipt(Vec::new()), Language::En)
            .await
            .unwrap();
        assert_eq!(parsed.kind, TransactionKind::ContractCreation);
        assert!(parsed.to.is_none());
        assert!(parsed.method_call.is_none());
    }

    #[tokio::test]
    async fn test_resolver_failure_propagates() {
        let parser = parser_with(TransactionParserConfig::default(), Arc::new(FailingResolver));
        let err = parser
            .parse_transaction(&raw(Some(BOB), Vec::new()), &receipt(Vec::new()), Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::Resolution(_)));
    }

    #[test]
    fn test_gas_uses_effective_price() {
        let tx = raw(Some(BOB), Vec::new());
        let mut receipt = receipt(Vec::new());
        receipt.effective_gas_price = Some(GasPrice::from_gwei(12));
        let gas = parser().analyze_gas_usage(&tx, &receipt);
        assert_eq!(gas.gas_price, GasPrice::from_gwei(12));
        assert_eq!(gas.efficiency, 0.75);
    }
}
