// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Locale template packs and `{{placeholder}}` rendering

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use tracing::{debug, warn};

use super::TemplateEngine;
use crate::config::TranslatorConfig;
use crate::errors::TemplateError;
use crate::types::locale::Language;

pub const SIMPLE_TRANSFER: &str = "simple_transfer";
pub const CONTRACT_CALL: &str = "contract_call";
pub const CONTRACT_CREATION: &str = "contract_creation";
pub const FAILED_TX: &str = "failed_tx";
pub const TOKEN_TRANSFER: &str = "token_transfer";

const EN: &[(&str, &str)] = &[
    (SIMPLE_TRANSFER, "{{from}} sent {{value}} to {{to}}"),
    (CONTRACT_CALL, "{{from}} called {{method}} on {{contract}}"),
    (CONTRACT_CREATION, "{{from}} deployed a new contract"),
    (FAILED_TX, "Transaction failed: {{reason}}"),
    (TOKEN_TRANSFER, "{{amount}} {{token}} transferred from {{from}} to {{to}}"),
];

const ES: &[(&str, &str)] = &[
    (SIMPLE_TRANSFER, "{{from}} envió {{value}} a {{to}}"),
    (CONTRACT_CALL, "{{from}} llamó {{method}} en {{contract}}"),
    (CONTRACT_CREATION, "{{from}} desplegó un nuevo contrato"),
    (FAILED_TX, "Transacción fallida: {{reason}}"),
    (TOKEN_TRANSFER, "{{amount}} {{token}} transferido de {{from}} a {{to}}"),
];

const FR: &[(&str, &str)] = &[
    (SIMPLE_TRANSFER, "{{from}} a envoyé {{value}} à {{to}}"),
    (CONTRACT_CALL, "{{from}} a appelé {{method}} sur {{contract}}"),
    (CONTRACT_CREATION, "{{from}} a déployé un nouveau contrat"),
    (FAILED_TX, "Transaction échouée : {{reason}}"),
    (TOKEN_TRANSFER, "{{amount}} {{token}} transféré de {{from}} à {{to}}"),
];

const DE: &[(&str, &str)] = &[
    (SIMPLE_TRANSFER, "{{from}} hat {{value}} an {{to}} gesendet"),
    (CONTRACT_CALL, "{{from}} hat {{method}} auf {{contract}} aufgerufen"),
    (CONTRACT_CREATION, "{{from}} hat einen neuen Vertrag bereitgestellt"),
    (FAILED_TX, "Transaktion fehlgeschlagen: {{reason}}"),
    (TOKEN_TRANSFER, "{{amount}} {{token}} von {{from}} an {{to}} übertragen"),
];

const JA: &[(&str, &str)] = &[
    (SIMPLE_TRANSFER, "{{from}}が{{to}}に{{value}}を送信しました"),
    (CONTRACT_CALL, "{{from}}が{{contract}}で{{method}}を呼び出しました"),
    (CONTRACT_CREATION, "{{from}}が新しいコントラクトをデプロイしました"),
    (FAILED_TX, "トランザクションが失敗しました: {{reason}}"),
    (TOKEN_TRANSFER, "{{amount}} {{token}}が{{from}}から{{to}}に転送されました"),
];

const ZH: &[(&str, &str)] = &[
    (SIMPLE_TRANSFER, "{{from}}向{{to}}发送了{{value}}"),
    (CONTRACT_CALL, "{{from}}在{{contract}}上调用了{{method}}"),
    (CONTRACT_CREATION, "{{from}}部署了一个新合约"),
    (FAILED_TX, "交易失败: {{reason}}"),
    (TOKEN_TRANSFER, "{{amount}} {{token}}从{{from}}转移到{{to}}"),
];

/// Built-in pack for a language; languages without one use English
fn builtin_pack(language: Language) -> Option<&'static [(&'static str, &'static str)]> {
    match language {
        Language::En => Some(EN),
        Language::Es => Some(ES),
        Language::Fr => Some(FR),
        Language::De => Some(DE),
        Language::Ja => Some(JA),
        Language::Zh => Some(ZH),
        _ => None,
    }
}

/// Render a built-in English template, for use when a registered template fails
pub(crate) fn render_builtin(name: &str, variables: &BTreeMap<&str, String>) -> Option<String> {
    let template = EN.iter().find(|(n, _)| *n == name).map(|(_, t)| *t)?;
    fill(name, template, variables).ok()
}

/// Substitute `{{name}}` placeholders
fn fill(name: &str, template: &str, variables: &BTreeMap<&str, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| TemplateError::Malformed {
            name: name.to_string(),
        })?;
        let variable = after[..end].trim();
        let value = variables
            .get(variable)
            .ok_or_else(|| TemplateError::MissingVariable {
                template: name.to_string(),
                variable: variable.to_string(),
            })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Every `{{` has a closing `}}`
fn check_placeholders(name: &str, template: &str) -> Result<(), TemplateError> {
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| TemplateError::Malformed {
            name: name.to_string(),
        })?;
        rest = &after[end + 2..];
    }
    Ok(())
}

/// Template engine with built-in packs for en, es, fr, de, ja and zh
///
/// Lookups try the requested language first, then English. Registered templates shadow
/// built-in ones of the same name.
///
/// ```
/// use std::collections::BTreeMap;
/// use semioscribe::{Language, LocaleTemplateEngine, TemplateEngine};
///
/// let engine = LocaleTemplateEngine::new();
/// let vars = BTreeMap::from([
///     ("from", "Alice".to_string()),
///     ("to", "Bob".to_string()),
///     ("value", "1.0000 ETH".to_string()),
/// ]);
/// let text = engine.render_template(Language::Es, "simple_transfer", &vars).unwrap();
/// assert_eq!(text, "Alice envió 1.0000 ETH a Bob");
/// ```
#[derive(Debug)]
pub struct LocaleTemplateEngine {
    templates: RwLock<HashMap<Language, BTreeMap<String, String>>>,
}

impl LocaleTemplateEngine {
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        for language in Language::ALL {
            if let Some(pack) = builtin_pack(language) {
                let pack = pack
                    .iter()
                    .map(|(name, text)| (name.to_string(), text.to_string()))
                    .collect();
                templates.insert(language, pack);
            }
        }
        Self {
            templates: RwLock::new(templates),
        }
    }

    /// Built-in packs plus the configured custom templates for the configured language
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let engine = Self::new();
        let language = config.language_or_default();
        for (name, template) in &config.template_engine.custom_templates {
            if let Err(e) = engine.register_template(language, name, template) {
                warn!(template = %name, error = %e, "Ignoring custom template");
            }
        }
        engine
    }

    fn lookup(&self, language: Language, name: &str) -> Option<String> {
        let templates = self
            .templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        templates
            .get(&language)
            .and_then(|pack| pack.get(name))
            .or_else(|| templates.get(&Language::En).and_then(|pack| pack.get(name)))
            .cloned()
    }
}

impl Default for LocaleTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for LocaleTemplateEngine {
    fn render_template(
        &self,
        language: Language,
        name: &str,
        variables: &BTreeMap<&str, String>,
    ) -> Result<String, TemplateError> {
        let template = self.lookup(language, name).ok_or_else(|| TemplateError::NotFound {
            name: name.to_string(),
        })?;
        fill(name, &template, variables)
    }

    fn register_template(
        &self,
        language: Language,
        name: &str,
        template: &str,
    ) -> Result<(), TemplateError> {
        check_placeholders(name, template)?;
        self.templates
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(language)
            .or_default()
            .insert(name.to_string(), template.to_string());
        debug!(language = language.code(), template = name, "Registered template");
        Ok(())
    }

    fn list_templates(&self, language: Language) -> Vec<String> {
        let templates = self
            .templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut names: Vec<String> = templates
            .get(&Language::En)
            .into_iter()
            .chain(templates.get(&language))
            .flat_map(|pack| pack.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_every_pack_has_every_template() {
        for pack in [EN, ES, FR, DE, JA, ZH] {
            let names: Vec<&str> = pack.iter().map(|(name, _)| *name).collect();
            assert_eq!(
                names,
                [SIMPLE_TRANSFER, CONTRACT_CALL, CONTRACT_CREATION, FAILED_TX, TOKEN_TRANSFER]
            );
        }
    }

    #[test]
    fn test_unsupported_pack_falls_back_to_english() {
        let engine = LocaleTemplateEngine::new();
        let text = engine
            .render_template(
                Language::Ko,
                CONTRACT_CREATION,
                &vars(&[("from", "0xabc")]),
            )
            .unwrap();
        assert_eq!(text, "0xabc deployed a new contract");
    }

    #[test]
    fn test_missing_variable() {
        let engine = LocaleTemplateEngine::new();
        let err = engine
            .render_template(Language::En, SIMPLE_TRANSFER, &vars(&[("from", "a")]))
            .unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable { ref variable, .. } if variable == "value" || variable == "to"));
    }

    #[test]
    fn test_register_overrides_and_lists() {
        let engine = LocaleTemplateEngine::new();
        engine
            .register_template(Language::Fr, "greeting", "Bonjour {{name}}")
            .unwrap();
        let text = engine
            .render_template(Language::Fr, "greeting", &vars(&[("name", "Alice")]))
            .unwrap();
        assert_eq!(text, "Bonjour Alice");
        assert!(engine.list_templates(Language::Fr).contains(&"greeting".to_string()));
        assert!(!engine.list_templates(Language::En).contains(&"greeting".to_string()));
    }

    #[test]
    fn test_malformed_template_rejected() {
        let engine = LocaleTemplateEngine::new();
        let err = engine
            .register_template(Language::En, "broken", "Hello {{name")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn test_unknown_template() {
        let engine = LocaleTemplateEngine::new();
        assert!(matches!(
            engine.render_template(Language::En, "nope", &BTreeMap::new()),
            Err(TemplateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_custom_templates_from_config() {
        let mut config = TranslatorConfig::for_language("de");
        config
            .template_engine
            .custom_templates
            .insert(SIMPLE_TRANSFER.to_string(), "{{from}} -> {{to}}: {{value}}".to_string());
        let engine = LocaleTemplateEngine::from_config(&config);
        let text = engine
            .render_template(
                Language::De,
                SIMPLE_TRANSFER,
                &vars(&[("from", "A"), ("to", "B"), ("value", "1")]),
            )
            .unwrap();
        assert_eq!(text, "A -> B: 1");
    }
}
