// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Locale types: supported languages, fiat currencies and detail tiers
//!
//! Configuration carries these as plain strings so that unsupported values can be
//! reported by validation; the translator works with the parsed enums.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output language of narratives
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Ja,
    Ko,
    Zh,
    Ar,
    Hi,
}

impl Language {
    /// Every supported language
    pub const ALL: [Language; 12] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ru,
        Language::Ja,
        Language::Ko,
        Language::Zh,
        Language::Ar,
        Language::Hi,
    ];

    /// ISO 639-1 code
    pub const fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Ar => "ar",
            Language::Hi => "hi",
        }
    }

    /// English name of the language
    pub const fn description(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
            Language::Ru => "Russian",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Zh => "Chinese",
            Language::Ar => "Arabic",
            Language::Hi => "Hindi",
        }
    }

    /// Currency a preset picks for this language
    pub const fn default_currency(&self) -> Currency {
        match self {
            Language::Es | Language::Fr | Language::De | Language::It | Language::Pt => {
                Currency::Eur
            }
            Language::Ja => Currency::Jpy,
            Language::Zh => Currency::Cny,
            Language::Ko => Currency::Krw,
            Language::Ru => Currency::Rub,
            Language::Hi => Currency::Inr,
            Language::En | Language::Ar => Currency::Usd,
        }
    }

    /// Decimal mark used when formatting numbers
    pub const fn decimal_mark(&self) -> char {
        match self {
            Language::Es | Language::Fr | Language::De | Language::It | Language::Pt
            | Language::Ru => ',',
            _ => '.',
        }
    }

    /// Digit-group separator paired with [`Self::decimal_mark`]
    pub const fn group_separator(&self) -> char {
        match self {
            Language::Es | Language::De | Language::It | Language::Pt => '.',
            Language::Fr | Language::Ru => ' ',
            _ => ',',
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| ConfigError::UnsupportedLanguage(s.to_string()))
    }
}

/// Fiat currency used for value estimates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Krw,
    Cad,
    Aud,
    Chf,
    Sek,
    Nok,
    Dkk,
    Pln,
    Czk,
    Huf,
    Rub,
    Brl,
    Mxn,
    Inr,
    Sgd,
}

impl Currency {
    /// Every supported currency
    pub const ALL: [Currency; 20] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cny,
        Currency::Krw,
        Currency::Cad,
        Currency::Aud,
        Currency::Chf,
        Currency::Sek,
        Currency::Nok,
        Currency::Dkk,
        Currency::Pln,
        Currency::Czk,
        Currency::Huf,
        Currency::Rub,
        Currency::Brl,
        Currency::Mxn,
        Currency::Inr,
        Currency::Sgd,
    ];

    /// ISO 4217 code
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Krw => "KRW",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
            Currency::Pln => "PLN",
            Currency::Czk => "CZK",
            Currency::Huf => "HUF",
            Currency::Rub => "RUB",
            Currency::Brl => "BRL",
            Currency::Mxn => "MXN",
            Currency::Inr => "INR",
            Currency::Sgd => "SGD",
        }
    }

    /// Symbol placed before formatted amounts
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy | Currency::Cny => "¥",
            Currency::Krw => "₩",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
            Currency::Chf => "CHF ",
            Currency::Sek | Currency::Nok | Currency::Dkk => "kr ",
            Currency::Pln => "zł ",
            Currency::Czk => "Kč ",
            Currency::Huf => "Ft ",
            Currency::Rub => "₽",
            Currency::Brl => "R$",
            Currency::Mxn => "MX$",
            Currency::Inr => "₹",
            Currency::Sgd => "S$",
        }
    }

    /// Number of minor-unit digits shown for this currency
    pub const fn minor_units(&self) -> u32 {
        match self {
            Currency::Jpy | Currency::Krw | Currency::Huf => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| ConfigError::UnsupportedCurrency(s.to_string()))
    }
}

/// Narrative detail tier
///
/// Tiers are ordered: every `Detailed` description contains the `Basic` one and every
/// `Technical` description contains the `Detailed` one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Parties, value, fee and status
    Basic,
    /// Adds method calls, token transfers and events
    #[default]
    Detailed,
    /// Adds hashes, block data, gas breakdown and raw parameters
    Technical,
}

impl DetailLevel {
    /// Every detail level, lowest first
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Basic,
        DetailLevel::Detailed,
        DetailLevel::Technical,
    ];

    /// Configuration name of the tier
    pub const fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Basic => "basic",
            DetailLevel::Detailed => "detailed",
            DetailLevel::Technical => "technical",
        }
    }

    /// Who the tier is written for
    pub const fn description(&self) -> &'static str {
        match self {
            DetailLevel::Basic => "Simple, non-technical explanations for general users",
            DetailLevel::Detailed => "Comprehensive explanations with context for informed users",
            DetailLevel::Technical => {
                "Full technical details with raw data for developers and analysts"
            }
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(DetailLevel::Basic),
            "detailed" => Ok(DetailLevel::Detailed),
            "technical" => Ok(DetailLevel::Technical),
            _ => Err(ConfigError::UnsupportedDetailLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trips_through_code() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
        }
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn test_unsupported_language_rejected() {
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLanguage(code) if code == "xx"));
    }

    #[test]
    fn test_currency_parsing_is_case_insensitive() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_detail_levels_are_ordered() {
        assert!(DetailLevel::Basic < DetailLevel::Detailed);
        assert!(DetailLevel::Detailed < DetailLevel::Technical);
        assert!("verbose".parse::<DetailLevel>().is_err());
    }

    #[test]
    fn test_language_currency_defaults() {
        assert_eq!(Language::De.default_currency(), Currency::Eur);
        assert_eq!(Language::Ja.default_currency(), Currency::Jpy);
        assert_eq!(Language::Zh.default_currency(), Currency::Cny);
        assert_eq!(Language::En.default_currency(), Currency::Usd);
    }
}
