use std::collections::{HashMap, HashSet};

use url::Url;

use crate::{
    domain::{FieldType, FormDefinition, SubmitMode},
    error::CatalogIssue,
};

/// Read-only, ordered set of form definitions addressed by `key`.
///
/// Several definitions may share a key (for example an archived copy kept
/// inactive next to the live one); lookups return them in catalog order and
/// leave the choice to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormCatalog {
    forms: Vec<FormDefinition>,
}

impl FormCatalog {
    pub fn new(forms: Vec<FormDefinition>) -> Self {
        Self { forms }
    }

    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Items borrow from the catalog only; `key` just has to outlive the scan.
    pub fn find_by_key<'c: 'k, 'k>(
        &'c self,
        key: &'k str,
    ) -> impl Iterator<Item = &'c FormDefinition> + 'k {
        self.forms.iter().filter(move |form| form.key == key)
    }

    pub fn lint(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let mut key_counts: HashMap<&str, usize> = HashMap::new();
        for form in &self.forms {
            *key_counts.entry(form.key.as_str()).or_default() += 1;
        }
        let mut reported = HashSet::new();
        for form in &self.forms {
            let count = key_counts[form.key.as_str()];
            if count > 1 && reported.insert(form.key.as_str()) {
                issues.push(CatalogIssue::DuplicateFormKey {
                    key: form.key.clone(),
                    count,
                });
            }
        }

        for form in &self.forms {
            lint_form(form, &mut issues);
        }

        issues
    }
}

impl From<Vec<FormDefinition>> for FormCatalog {
    fn from(forms: Vec<FormDefinition>) -> Self {
        Self::new(forms)
    }
}

impl FromIterator<FormDefinition> for FormCatalog {
    fn from_iter<I: IntoIterator<Item = FormDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn lint_form(form: &FormDefinition, issues: &mut Vec<CatalogIssue>) {
    let mut seen = HashSet::new();
    for field in &form.fields {
        if !seen.insert(field.name.as_str()) {
            issues.push(CatalogIssue::DuplicateFieldName {
                form_key: form.key.clone(),
                field_name: field.name.clone(),
            });
        }
        if field.field_type == FieldType::Select && field.options.is_empty() {
            issues.push(CatalogIssue::SelectWithoutOptions {
                form_key: form.key.clone(),
                field_name: field.name.clone(),
            });
        }
    }

    if form.is_active && form.fields.is_empty() {
        issues.push(CatalogIssue::NoFields {
            form_key: form.key.clone(),
        });
    }

    let mode = match form.submit_mode {
        SubmitMode::None => return,
        SubmitMode::Mailto => "mailto",
        SubmitMode::Whatsapp => "whatsapp",
    };
    let Some(target) = form.trimmed_target() else {
        issues.push(CatalogIssue::MissingSubmitTarget {
            form_key: form.key.clone(),
            mode: mode.to_string(),
        });
        return;
    };

    match form.submit_mode {
        SubmitMode::Mailto if target.contains(['?', '&']) => {
            issues.push(CatalogIssue::MailtoTargetHasQuery {
                form_key: form.key.clone(),
                target: target.to_string(),
            });
        }
        SubmitMode::Whatsapp
            if (target.starts_with("http://") || target.starts_with("https://"))
                && Url::parse(target).is_err() =>
        {
            issues.push(CatalogIssue::InvalidMessagingUrl {
                form_key: form.key.clone(),
                target: target.to_string(),
            });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldDefinition, FieldId, FormId};

    fn form(id: i64, key: &str, active: bool) -> FormDefinition {
        FormDefinition {
            id: FormId(id),
            key: key.into(),
            name: key.into(),
            is_active: active,
            fields: vec![FieldDefinition {
                id: FieldId(1),
                name: "name".into(),
                label: "Name".into(),
                ..FieldDefinition::default()
            }],
            ..FormDefinition::default()
        }
    }

    #[test]
    fn find_by_key_keeps_catalog_order() {
        let catalog = FormCatalog::new(vec![
            form(1, "contact", false),
            form(2, "quote", true),
            form(3, "contact", true),
        ]);
        let ids: Vec<_> = catalog.find_by_key("contact").map(|f| f.id).collect();
        assert_eq!(ids, vec![FormId(1), FormId(3)]);
    }

    #[test]
    fn found_forms_outlive_the_lookup_key() {
        let catalog = FormCatalog::new(vec![form(1, "contact", true)]);
        let found = {
            let key = String::from("contact");
            let found = catalog.find_by_key(&key).next();
            found
        };
        assert_eq!(found.map(|f| f.id), Some(FormId(1)));
    }

    #[test]
    fn clean_catalog_has_no_issues() {
        let catalog: FormCatalog = vec![form(1, "contact", true)].into();
        assert!(catalog.lint().is_empty());
    }

    #[test]
    fn lint_reports_duplicate_keys_once() {
        let catalog = FormCatalog::new(vec![
            form(1, "contact", false),
            form(2, "contact", true),
            form(3, "contact", true),
        ]);
        let issues = catalog.lint();
        assert_eq!(
            issues,
            vec![CatalogIssue::DuplicateFormKey {
                key: "contact".into(),
                count: 3
            }]
        );
    }

    #[test]
    fn lint_reports_field_and_target_problems() {
        let mut broken = form(1, "booking", true);
        broken.submit_mode = SubmitMode::Mailto;
        broken.fields.push(FieldDefinition {
            id: FieldId(2),
            name: "name".into(),
            ..FieldDefinition::default()
        });
        broken.fields.push(FieldDefinition {
            id: FieldId(3),
            name: "service".into(),
            field_type: FieldType::Select,
            ..FieldDefinition::default()
        });

        let mut empty = form(2, "empty", true);
        empty.fields.clear();

        let mut bad_url = form(3, "chat", true);
        bad_url.submit_mode = SubmitMode::Whatsapp;
        bad_url.submit_target = "https://".into();

        let issues = FormCatalog::new(vec![broken, empty, bad_url]).lint();
        assert!(issues.contains(&CatalogIssue::DuplicateFieldName {
            form_key: "booking".into(),
            field_name: "name".into(),
        }));
        assert!(issues.contains(&CatalogIssue::SelectWithoutOptions {
            form_key: "booking".into(),
            field_name: "service".into(),
        }));
        assert!(issues.contains(&CatalogIssue::MissingSubmitTarget {
            form_key: "booking".into(),
            mode: "mailto".into(),
        }));
        assert!(issues.contains(&CatalogIssue::NoFields {
            form_key: "empty".into(),
        }));
        assert!(issues.contains(&CatalogIssue::InvalidMessagingUrl {
            form_key: "chat".into(),
            target: "https://".into(),
        }));
    }

    #[test]
    fn lint_reports_mailto_target_carrying_its_own_query() {
        let mut with_query = form(1, "contact", true);
        with_query.submit_mode = SubmitMode::Mailto;
        with_query.submit_target = "ops@example.com?cc=boss@example.com".into();

        let mut with_ampersand = form(2, "sales", true);
        with_ampersand.submit_mode = SubmitMode::Mailto;
        with_ampersand.submit_target = "sales&support@example.com".into();

        let mut plain = form(3, "careers", true);
        plain.submit_mode = SubmitMode::Mailto;
        plain.submit_target = "jobs@example.com".into();

        let issues = FormCatalog::new(vec![with_query, with_ampersand, plain]).lint();
        assert_eq!(
            issues,
            vec![
                CatalogIssue::MailtoTargetHasQuery {
                    form_key: "contact".into(),
                    target: "ops@example.com?cc=boss@example.com".into(),
                },
                CatalogIssue::MailtoTargetHasQuery {
                    form_key: "sales".into(),
                    target: "sales&support@example.com".into(),
                },
            ]
        );
    }

    #[test]
    fn uppercase_scheme_is_not_linted_as_a_url() {
        let mut chat = form(1, "chat", true);
        chat.submit_mode = SubmitMode::Whatsapp;
        chat.submit_target = "HTTPS://".into();
        assert!(FormCatalog::new(vec![chat]).lint().is_empty());
    }
}
