use std::collections::HashMap;

use shared::domain::FieldDefinition;

/// Current value of every field in the resolved form, keyed by field name.
///
/// The key set always equals the names of the fields it was built from;
/// `set` never introduces a new key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    values: HashMap<String, String>,
}

impl InputState {
    pub fn initialize(fields: &[FieldDefinition]) -> Self {
        Self {
            values: fields
                .iter()
                .map(|field| (field.name.clone(), String::new()))
                .collect(),
        }
    }

    /// Returns `false` when `name` is not a field of the current form.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Brings the key set in line with `fields` after the same form's field
    /// list was refreshed: surviving names keep their values, new names start
    /// empty, removed names are dropped.
    pub fn reconcile(&mut self, fields: &[FieldDefinition]) {
        let mut next = Self::initialize(fields);
        for (name, value) in next.values.iter_mut() {
            if let Some(previous) = self.values.remove(name) {
                *value = previous;
            }
        }
        *self = next;
    }

    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }
}
