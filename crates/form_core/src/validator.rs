use shared::{domain::FieldDefinition, error::ValidationError};

use crate::input::InputState;

/// First field, in render order, that is required but blank after trimming.
pub fn validate<'a>(
    fields: &'a [FieldDefinition],
    state: &InputState,
) -> Option<&'a FieldDefinition> {
    fields.iter().find(|field| {
        field.required
            && state
                .get(&field.name)
                .map_or(true, |value| value.trim().is_empty())
    })
}

pub fn check(fields: &[FieldDefinition], state: &InputState) -> Result<(), ValidationError> {
    match validate(fields, state) {
        None => Ok(()),
        Some(field) => {
            let label = if field.label.trim().is_empty() {
                field.name.as_str()
            } else {
                field.label.as_str()
            };
            Err(ValidationError::new(&field.name, label))
        }
    }
}
