use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use form_core::{
    DispatchOutcome, DispatchRequest, ExtraPayload, FormSession, NavigationAction, Navigator,
    SubmitOutcome,
};
use shared::FormCatalog;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "formctl", about = "Inspect and exercise CMS-driven forms")]
struct Cli {
    /// Catalog file or directory; overrides settings.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every form in catalog order.
    List,
    /// Render the form resolved for KEY.
    Show {
        key: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Fill and submit the form resolved for KEY.
    Submit {
        key: Option<String>,
        #[arg(long = "field", value_parser = parse_pair)]
        fields: Vec<(String, String)>,
        #[arg(long = "extra", value_parser = parse_pair)]
        extra: Vec<(String, String)>,
    },
    /// Report catalog problems.
    Lint,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Prints dispatch requests instead of opening them.
struct PrintNavigator<'a, W: Write> {
    out: &'a mut W,
    result: io::Result<()>,
}

impl<W: Write> Navigator for PrintNavigator<'_, W> {
    fn navigate(&mut self, request: &DispatchRequest) {
        let action = match request.action {
            NavigationAction::AssignLocation => "open in current window",
            NavigationAction::OpenNewContext { .. } => "open in new window",
        };
        self.result = writeln!(self.out, "{action}: {}", request.uri);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(path) = cli.catalog.clone() {
        settings.catalog_path = path;
    }

    let catalog = catalog_source::load_catalog(&settings.catalog_path).with_context(|| {
        format!(
            "failed to load form catalog from '{}'",
            settings.catalog_path.display()
        )
    })?;

    let stdout = io::stdout();
    run(cli.command, &settings, &catalog, &mut stdout.lock())
}

fn run(
    command: Command,
    settings: &Settings,
    catalog: &FormCatalog,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => {
            for form in catalog.forms() {
                writeln!(
                    out,
                    "{}\t{}\t{:?}\t{} fields",
                    form.key,
                    if form.is_active { "active" } else { "inactive" },
                    form.submit_mode,
                    form.fields.len()
                )?;
            }
        }
        Command::Show { key, json } => {
            let key = key.unwrap_or_else(|| settings.default_form_key.clone());
            let view = FormSession::new(catalog, &key).view();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                writeln!(out, "{view}")?;
            }
        }
        Command::Submit { key, fields, extra } => {
            let key = key.unwrap_or_else(|| settings.default_form_key.clone());
            let mut session = FormSession::new(catalog, &key);
            for (name, value) in fields {
                if !session.set(&name, value) {
                    tracing::warn!(
                        field = %name,
                        form_key = %session.form().key,
                        "ignoring unknown field"
                    );
                }
            }
            let extra: ExtraPayload = extra.into_iter().collect();

            let mut navigator = PrintNavigator {
                out: &mut *out,
                result: Ok(()),
            };
            let outcome = session.submit(&extra, &mut navigator);
            navigator.result?;

            match outcome {
                SubmitOutcome::NotConfigured => {
                    writeln!(out, "form '{}' is not configured yet", session.form().key)?;
                }
                SubmitOutcome::Invalid(err) => writeln!(out, "error: {err}")?,
                SubmitOutcome::Submitted(dispatched) => {
                    for line in session.payload(&extra) {
                        writeln!(out, "| {line}")?;
                    }
                    if let DispatchOutcome::Skipped { reason } = dispatched {
                        writeln!(out, "not dispatched: {reason}")?;
                    }
                    writeln!(
                        out,
                        "{}",
                        session.success_message(&settings.default_success_message)
                    )?;
                }
            }
        }
        Command::Lint => {
            let issues = catalog.lint();
            if issues.is_empty() {
                writeln!(out, "no issues")?;
            }
            for issue in issues {
                writeln!(out, "- {issue}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FormCatalog {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forms.json");
        std::fs::write(
            &path,
            r#"[
              {"id": 1, "key": "contact", "name": "Contact", "isActive": true,
               "submitMode": "whatsapp", "submitTarget": "+65 1234 5678",
               "successMessage": "Talk soon",
               "fields": [{"id": 1, "name": "name", "label": "Name", "required": true}]},
              {"id": 2, "key": "draft", "name": "Draft", "submitMode": "mailto"}
            ]"#,
        )
        .expect("write");
        catalog_source::load_catalog(&path).expect("catalog")
    }

    fn run_to_string(command: Command) -> String {
        let mut out = Vec::new();
        run(command, &Settings::default(), &catalog(), &mut out).expect("run");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn parses_name_value_pairs() {
        assert_eq!(
            parse_pair("note=a=b").expect("pair"),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn cli_accepts_repeated_fields() {
        let cli = Cli::try_parse_from([
            "formctl", "submit", "contact", "--field", "name=Jo", "--field", "phone=1",
            "--extra", "source=cli",
        ])
        .expect("parse");
        let Command::Submit { fields, extra, .. } = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(extra, vec![("source".to_string(), "cli".to_string())]);
    }

    #[test]
    fn list_shows_every_form() {
        let out = run_to_string(Command::List);
        assert_eq!(
            out,
            "contact\tactive\tWhatsapp\t1 fields\ndraft\tinactive\tMailto\t0 fields\n"
        );
    }

    #[test]
    fn submit_prints_link_payload_and_success() {
        let out = run_to_string(Command::Submit {
            key: Some("contact".into()),
            fields: vec![("name".into(), "Jo".into())],
            extra: vec![],
        });
        assert!(out.starts_with("open in new window: https://wa.me/6512345678?text=Contact"));
        assert!(out.contains("| Name: Jo\n"));
        assert!(out.ends_with("Talk soon\n"));
    }

    #[test]
    fn submit_reports_missing_required_field() {
        let out = run_to_string(Command::Submit {
            key: Some("contact".into()),
            fields: vec![],
            extra: vec![],
        });
        assert_eq!(out, "error: Name is required\n");
    }

    #[test]
    fn empty_form_is_not_configured() {
        let out = run_to_string(Command::Show {
            key: Some("draft".into()),
            json: false,
        });
        assert!(out.contains("not configured"));

        let out = run_to_string(Command::Submit {
            key: Some("draft".into()),
            fields: vec![],
            extra: vec![],
        });
        assert_eq!(out, "form 'draft' is not configured yet\n");
    }

    #[test]
    fn lint_lists_issues() {
        let out = run_to_string(Command::Lint);
        assert_eq!(out, "- form 'draft' submits via mailto but has no submit target\n");
    }
}
