use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(FormId);
id_newtype!(FieldId);

/// How a submitted payload leaves the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMode {
    Mailto,
    Whatsapp,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    /// Any CMS type this engine has no dedicated control for.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: FieldId,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: String,
    #[serde(
        default,
        rename = "sort_order",
        alias = "sortOrder",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldDefinition {
    /// Missing ordering hints sort as zero.
    pub fn effective_sort_order(&self) -> i64 {
        self.sort_order.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub id: FormId,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub success_message: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(
        default,
        rename = "sort_order",
        alias = "sortOrder",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub submit_mode: SubmitMode,
    #[serde(default)]
    pub submit_target: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Two definitions with the same identity are the same form for state purposes.
    pub fn identity(&self) -> FormIdentity {
        FormIdentity {
            id: self.id,
            key: self.key.clone(),
        }
    }

    pub fn trimmed_target(&self) -> Option<&str> {
        let target = self.submit_target.trim();
        (!target.is_empty()).then_some(target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormIdentity {
    pub id: FormId,
    pub key: String,
}
