use std::{collections::HashMap, fs, path::PathBuf};

use form_core::DEFAULT_SUCCESS_MESSAGE;

const SETTINGS_FILE: &str = "formctl.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub default_form_key: String,
    pub default_success_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("./forms.json"),
            default_form_key: "contact".into(),
            default_success_message: DEFAULT_SUCCESS_MESSAGE.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!(file = SETTINGS_FILE, "ignoring unreadable settings file");
        return;
    };
    if let Some(v) = file_cfg.get("catalog_path") {
        settings.catalog_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("default_form_key") {
        settings.default_form_key = v.clone();
    }
    if let Some(v) = file_cfg.get("default_success_message") {
        settings.default_success_message = v.clone();
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("FORMCTL_CATALOG") {
        settings.catalog_path = PathBuf::from(v);
    }
    if let Some(v) = var("APP__CATALOG_PATH") {
        settings.catalog_path = PathBuf::from(v);
    }

    if let Some(v) = var("APP__DEFAULT_FORM_KEY") {
        settings.default_form_key = v;
    }

    if let Some(v) = var("APP__DEFAULT_SUCCESS_MESSAGE") {
        settings.default_success_message = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
