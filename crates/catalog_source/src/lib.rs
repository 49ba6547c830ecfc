//! Loads a CMS form export from disk into a [`FormCatalog`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::{domain::FormDefinition, FormCatalog};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON catalog '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid TOML catalog '{path}': {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unsupported catalog file '{path}'; expected .json or .toml")]
    UnsupportedFormat { path: PathBuf },
}

/// Either a bare array of forms or a collection wrapper `{ "forms": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonExport {
    Bare(Vec<FormDefinition>),
    Collection { forms: Vec<FormDefinition> },
}

#[derive(Deserialize)]
struct TomlExport {
    #[serde(default)]
    forms: Vec<FormDefinition>,
}

pub fn parse_catalog_json(raw: &str) -> Result<Vec<FormDefinition>, serde_json::Error> {
    Ok(match serde_json::from_str::<JsonExport>(raw)? {
        JsonExport::Bare(forms) | JsonExport::Collection { forms } => forms,
    })
}

pub fn parse_catalog_toml(raw: &str) -> Result<Vec<FormDefinition>, toml::de::Error> {
    Ok(toml::from_str::<TomlExport>(raw)?.forms)
}

/// Reads a `.json` / `.toml` export, or every such file in a directory in
/// file-name order, and logs lint findings without rejecting the catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<FormCatalog, CatalogSourceError> {
    let path = path.as_ref();
    let forms = if path.is_dir() {
        let mut forms = Vec::new();
        for file in catalog_files(path)? {
            forms.extend(load_file(&file)?);
        }
        forms
    } else {
        load_file(path)?
    };

    let catalog = FormCatalog::new(forms);
    debug!(path = %path.display(), forms = catalog.len(), "loaded form catalog");
    for issue in catalog.lint() {
        warn!(path = %path.display(), %issue, "form catalog issue");
    }
    Ok(catalog)
}

fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogSourceError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogSourceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogSourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && format_of(&path).is_some() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Option<ExportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(ExportFormat::Json),
        "toml" => Some(ExportFormat::Toml),
        _ => None,
    }
}

fn load_file(path: &Path) -> Result<Vec<FormDefinition>, CatalogSourceError> {
    let Some(format) = format_of(path) else {
        return Err(CatalogSourceError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };
    let raw = fs::read_to_string(path).map_err(|source| CatalogSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        ExportFormat::Json => {
            parse_catalog_json(&raw).map_err(|source| CatalogSourceError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        ExportFormat::Toml => {
            parse_catalog_toml(&raw).map_err(|source| CatalogSourceError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
