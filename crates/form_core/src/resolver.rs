use std::borrow::Cow;

use shared::{
    domain::{FieldDefinition, FieldId, FieldType, FormDefinition, FormId, SubmitMode},
    FormCatalog,
};
use tracing::{debug, warn};

pub const FALLBACK_FORM_KEY: &str = "fallback-contact";

/// Picks the definition to render for `key`.
///
/// An active match wins, then any match regardless of activation, then the
/// built-in contact form. A missing key is never an error.
pub fn resolve<'a>(key: &str, catalog: &'a FormCatalog) -> Cow<'a, FormDefinition> {
    if let Some(form) = catalog.find_by_key(key).find(|form| form.is_active) {
        debug!(key, form_id = form.id.0, "resolved active form");
        return Cow::Borrowed(form);
    }

    if let Some(form) = catalog.find_by_key(key).next() {
        debug!(key, form_id = form.id.0, "resolved inactive form");
        return Cow::Borrowed(form);
    }

    warn!(key, catalog_len = catalog.len(), "form key not in catalog; using fallback form");
    Cow::Owned(fallback_form())
}

pub fn fallback_form() -> FormDefinition {
    let field = |id: i64, name: &str, label: &str, field_type: FieldType| FieldDefinition {
        id: FieldId(id),
        name: name.to_string(),
        label: label.to_string(),
        field_type,
        required: true,
        placeholder: String::new(),
        sort_order: Some(id),
        options: Vec::new(),
    };

    FormDefinition {
        id: FormId(0),
        key: FALLBACK_FORM_KEY.to_string(),
        name: "Contact".to_string(),
        title: "Contact us".to_string(),
        description: String::new(),
        button_text: "Submit".to_string(),
        success_message: String::new(),
        is_active: true,
        sort_order: None,
        submit_mode: SubmitMode::None,
        submit_target: String::new(),
        fields: vec![
            field(1, "fullName", "Full name", FieldType::Text),
            field(2, "phone", "Phone", FieldType::Tel),
            field(3, "message", "Message", FieldType::Textarea),
        ],
    }
}
