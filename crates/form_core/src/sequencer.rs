use shared::domain::FieldDefinition;
use tracing::debug;

/// Render order: `sort_order` ascending (missing as 0), then `id` ascending.
pub fn sequence(fields: &[FieldDefinition]) -> Vec<FieldDefinition> {
    let mut ordered = fields.to_vec();
    ordered.sort_by_key(|field| (field.effective_sort_order(), field.id));
    debug!(fields = ordered.len(), "sequenced form fields");
    ordered
}
