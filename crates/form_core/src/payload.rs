use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared::domain::{FieldDefinition, FormDefinition};

use crate::input::InputState;

const EMPTY_VALUE: &str = "-";

/// Caller-supplied key/value pairs appended after the form's own fields.
///
/// Iteration follows insertion order. These values never take part in
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraPayload(IndexMap<String, String>);

impl ExtraPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Builds the canonical submission text: title, a blank line, one
/// `label: value` line per sequenced field, then one `key: value` line per
/// extra entry. Blank values print as `-`.
pub fn build(
    form: &FormDefinition,
    fields: &[FieldDefinition],
    state: &InputState,
    extra: &ExtraPayload,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 + fields.len() + extra.len());
    lines.push(form.display_title().to_string());
    lines.push(String::new());

    for field in fields {
        let value = state.get(&field.name).unwrap_or_default();
        lines.push(line(&field.label, value));
    }
    for (key, value) in extra.iter() {
        lines.push(line(key, value));
    }

    lines
}

pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

fn line(label: &str, value: &str) -> String {
    let value = if value.is_empty() { EMPTY_VALUE } else { value };
    format!("{label}: {value}")
}
