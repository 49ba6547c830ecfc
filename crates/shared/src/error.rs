use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required field was left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{label} is required")]
pub struct ValidationError {
    pub field_name: String,
    pub label: String,
}

impl ValidationError {
    pub fn new(field_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            label: label.into(),
        }
    }
}

/// Problems found in a catalog that still loads and renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CatalogIssue {
    #[error("form key '{key}' is defined {count} times")]
    DuplicateFormKey { key: String, count: usize },
    #[error("form '{form_key}' declares field name '{field_name}' more than once")]
    DuplicateFieldName {
        form_key: String,
        field_name: String,
    },
    #[error("select field '{field_name}' in form '{form_key}' has no options")]
    SelectWithoutOptions {
        form_key: String,
        field_name: String,
    },
    #[error("form '{form_key}' submits via {mode} but has no submit target")]
    MissingSubmitTarget { form_key: String, mode: String },
    #[error("form '{form_key}' has an unparseable messaging url '{target}'")]
    InvalidMessagingUrl { form_key: String, target: String },
    #[error("form '{form_key}' has a mailto target with '?' or '&': '{target}'")]
    MailtoTargetHasQuery { form_key: String, target: String },
    #[error("active form '{form_key}' has no fields")]
    NoFields { form_key: String },
}
