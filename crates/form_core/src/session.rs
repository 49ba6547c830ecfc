use shared::{
    domain::{FieldDefinition, FormDefinition, FormIdentity},
    error::ValidationError,
    FormCatalog,
};
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, DispatchOutcome, Navigator},
    input::InputState,
    payload::{build, ExtraPayload},
    render::{render, FormView},
    resolver::resolve,
    sequencer::sequence,
    validator::check,
};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! We will get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Invalid,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form has no fields; nothing was validated or dispatched.
    NotConfigured,
    /// Submission aborted; values are kept for correction.
    Invalid(ValidationError),
    Submitted(DispatchOutcome),
}

/// One rendered instance of a form: the resolved definition, its render
/// order, what the user typed, and where the submission flow stands.
#[derive(Debug, Clone)]
pub struct FormSession {
    form: FormDefinition,
    identity: FormIdentity,
    fields: Vec<FieldDefinition>,
    input: InputState,
    error: Option<ValidationError>,
    submitted: bool,
}

impl FormSession {
    pub fn new(catalog: &FormCatalog, key: &str) -> Self {
        Self::from_definition(resolve(key, catalog).into_owned())
    }

    pub fn from_definition(form: FormDefinition) -> Self {
        let fields = sequence(&form.fields);
        let input = InputState::initialize(&fields);
        Self {
            identity: form.identity(),
            form,
            fields,
            input,
            error: None,
            submitted: false,
        }
    }

    /// Re-resolves `key` against a possibly refreshed catalog.
    ///
    /// Switching to a different form clears values, error and the submitted
    /// flag and returns `true`. Staying on the same form only re-sequences
    /// when its field list changed, keeping values of surviving fields.
    pub fn rebind(&mut self, catalog: &FormCatalog, key: &str) -> bool {
        let resolved = resolve(key, catalog);

        if resolved.identity() != self.identity {
            debug!(
                from = %self.identity.key,
                to = %resolved.key,
                "resolved form changed; resetting session"
            );
            *self = Self::from_definition(resolved.into_owned());
            return true;
        }

        if resolved.fields != self.form.fields {
            self.fields = sequence(&resolved.fields);
            self.input.reconcile(&self.fields);
        }
        self.form = resolved.into_owned();
        false
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.input.get(name)
    }

    /// Returns `false` and changes nothing for names outside the form.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.input.set(name, value)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn phase(&self) -> SessionPhase {
        if self.submitted {
            SessionPhase::Submitted
        } else if self.error.is_some() {
            SessionPhase::Invalid
        } else {
            SessionPhase::Idle
        }
    }

    pub fn view(&self) -> FormView {
        render(&self.form, &self.fields)
    }

    pub fn payload(&self, extra: &ExtraPayload) -> Vec<String> {
        build(&self.form, &self.fields, &self.input, extra)
    }

    pub fn submit(
        &mut self,
        extra: &ExtraPayload,
        navigator: &mut dyn Navigator,
    ) -> SubmitOutcome {
        if self.fields.is_empty() {
            return SubmitOutcome::NotConfigured;
        }

        if let Err(err) = check(&self.fields, &self.input) {
            debug!(form_key = %self.form.key, field = %err.field_name, "submission blocked");
            self.error = Some(err.clone());
            return SubmitOutcome::Invalid(err);
        }

        self.error = None;
        let lines = self.payload(extra);
        let outcome = dispatch(&self.form, &lines, navigator);
        self.submitted = true;
        info!(form_key = %self.form.key, "form submitted");
        SubmitOutcome::Submitted(outcome)
    }

    pub fn success_message<'a>(&'a self, default: &'a str) -> &'a str {
        if self.form.success_message.trim().is_empty() {
            default
        } else {
            &self.form.success_message
        }
    }

    /// Back to an empty, unsubmitted form. The definition is not re-resolved.
    pub fn reset(&mut self) {
        self.input.clear();
        self.error = None;
        self.submitted = false;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
