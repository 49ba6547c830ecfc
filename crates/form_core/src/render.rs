//! Control descriptions for a sequenced form, independent of any UI toolkit.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::domain::{FieldDefinition, FieldType, FormDefinition};

const DEFAULT_BUTTON_TEXT: &str = "Submit";
const DEFAULT_SELECT_PROMPT: &str = "Select an option";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Tel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    Input { kind: InputKind },
    TextArea,
    /// The first option is always the empty-valued prompt.
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub placeholder: String,
    pub kind: ControlKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormView {
    /// The form resolved but has nothing to fill in.
    NotConfigured { title: String },
    Interactive {
        title: String,
        description: String,
        button_text: String,
        controls: Vec<Control>,
    },
}

impl FormView {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive { .. })
    }
}

/// `fields` must already be sequenced.
pub fn render(form: &FormDefinition, fields: &[FieldDefinition]) -> FormView {
    let title = form.display_title().to_string();
    if fields.is_empty() {
        return FormView::NotConfigured { title };
    }

    let button_text = if form.button_text.trim().is_empty() {
        DEFAULT_BUTTON_TEXT.to_string()
    } else {
        form.button_text.clone()
    };

    FormView::Interactive {
        title,
        description: form.description.clone(),
        button_text,
        controls: fields.iter().map(control_for).collect(),
    }
}

fn control_for(field: &FieldDefinition) -> Control {
    let kind = match field.field_type {
        FieldType::Text | FieldType::Other => ControlKind::Input {
            kind: InputKind::Text,
        },
        FieldType::Email => ControlKind::Input {
            kind: InputKind::Email,
        },
        FieldType::Tel => ControlKind::Input {
            kind: InputKind::Tel,
        },
        FieldType::Textarea => ControlKind::TextArea,
        FieldType::Select => {
            let prompt = if field.placeholder.trim().is_empty() {
                DEFAULT_SELECT_PROMPT
            } else {
                field.placeholder.as_str()
            };
            let mut options = Vec::with_capacity(field.options.len() + 1);
            options.push(SelectOption {
                value: String::new(),
                label: prompt.to_string(),
            });
            options.extend(field.options.iter().map(|option| SelectOption {
                value: option.clone(),
                label: option.clone(),
            }));
            ControlKind::Select { options }
        }
    };

    Control {
        name: field.name.clone(),
        label: field.label.clone(),
        required: field.required,
        placeholder: field.placeholder.clone(),
        kind,
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { title } => {
                writeln!(f, "{title}")?;
                write!(f, "(this form is not configured yet)")
            }
            Self::Interactive {
                title,
                description,
                button_text,
                controls,
            } => {
                writeln!(f, "{title}")?;
                if !description.is_empty() {
                    writeln!(f, "{description}")?;
                }
                for control in controls {
                    write!(f, "  {}", control.label)?;
                    if control.required {
                        write!(f, " *")?;
                    }
                    write!(f, " [{}]", control.name)?;
                    match &control.kind {
                        ControlKind::Input { kind } => write!(f, " <{kind:?}>")?,
                        ControlKind::TextArea => write!(f, " <TextArea>")?,
                        ControlKind::Select { options } => {
                            let values: Vec<_> = options
                                .iter()
                                .skip(1)
                                .map(|option| option.label.as_str())
                                .collect();
                            write!(f, " <Select: {}>", values.join(" | "))?;
                        }
                    }
                    if !control.placeholder.is_empty() {
                        write!(f, " \"{}\"", control.placeholder)?;
                    }
                    writeln!(f)?;
                }
                write!(f, "[{button_text}]")
            }
        }
    }
}
