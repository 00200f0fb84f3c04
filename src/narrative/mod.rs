// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Narrative assembly
//!
//! A [`SentenceBuilder`] turns parsed entities into summaries, tiered descriptions and key
//! points. Summaries go through a [`TemplateEngine`] so they follow the request language;
//! descriptions are built as strict supersets across [`DetailLevel`] tiers.
//!
//! [`DetailLevel`]: crate::types::locale::DetailLevel

mod builder;
pub mod rules;
pub mod templates;

pub use builder::NarrativeBuilder;
pub use templates::LocaleTemplateEngine;

use std::collections::BTreeMap;

use crate::errors::TemplateError;
use crate::types::address::AddressInfo;
use crate::types::contract::ContractInfo;
use crate::types::locale::Language;
use crate::types::transaction::ParsedTransaction;
use crate::types::translation::TranslationContext;

/// The entity a narrative is written about
#[derive(Debug, Clone, Copy)]
pub enum Narrated<'a> {
    Transaction(&'a ParsedTransaction),
    Address(&'a AddressInfo),
    Contract(&'a ContractInfo),
}

pub trait SentenceBuilder: Send + Sync {
    /// One-sentence summary in the context's language
    fn build_summary(&self, subject: Narrated<'_>, context: &TranslationContext) -> String;

    /// Description at the context's detail level
    fn build_description(&self, subject: Narrated<'_>, context: &TranslationContext) -> String;

    fn build_key_points(&self, subject: Narrated<'_>, context: &TranslationContext)
        -> Vec<String>;
}

/// Named `{{placeholder}}` templates per language
pub trait TemplateEngine: Send + Sync {
    fn render_template(
        &self,
        language: Language,
        name: &str,
        variables: &BTreeMap<&str, String>,
    ) -> Result<String, TemplateError>;

    fn register_template(
        &self,
        language: Language,
        name: &str,
        template: &str,
    ) -> Result<(), TemplateError>;

    /// Template names available for `language`, including English fallbacks
    fn list_templates(&self, language: Language) -> Vec<String>;
}
