// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for template rendering.

/// Errors from [`TemplateEngine`](crate::TemplateEngine) implementations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template with this name exists for the language or the English fallback.
    #[error("Template not found: {name}")]
    NotFound {
        /// Template name
        name: String,
    },

    /// The template references a placeholder the caller did not supply.
    #[error("Template {template} requires variable {variable}")]
    MissingVariable {
        /// Template name
        template: String,
        /// Placeholder name
        variable: String,
    },

    /// The template text has an unterminated placeholder.
    #[error("Template {name} is malformed: unterminated placeholder")]
    Malformed {
        /// Template name
        name: String,
    },
}
