use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use shared::domain::{FormDefinition, SubmitMode};
use tracing::{info, warn};
use url::Url;

use crate::payload::join_lines;

/// Characters left literal by URI-component escaping.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const WHATSAPP_BASE: &str = "https://wa.me/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    None,
    ComposeEmail,
    OpenMessagingLink,
}

impl From<SubmitMode> for DispatchStrategy {
    fn from(mode: SubmitMode) -> Self {
        match mode {
            SubmitMode::None => Self::None,
            SubmitMode::Mailto => Self::ComposeEmail,
            SubmitMode::Whatsapp => Self::OpenMessagingLink,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationAction {
    /// Replace the current browsing context's location.
    AssignLocation,
    /// Open a new browsing context.
    OpenNewContext { no_opener: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub action: NavigationAction,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The form submits nowhere.
    NoEffect,
    /// The form names a transport but gives it nothing to send to.
    Skipped { reason: String },
    Request(DispatchRequest),
}

impl DispatchOutcome {
    pub fn request(&self) -> Option<&DispatchRequest> {
        match self {
            Self::Request(request) => Some(request),
            Self::NoEffect | Self::Skipped { .. } => None,
        }
    }
}

/// Performs the navigation side effect of a dispatch. Fire-and-forget.
pub trait Navigator {
    fn navigate(&mut self, request: &DispatchRequest);
}

/// Keeps every request it is handed, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    pub requests: Vec<DispatchRequest>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, request: &DispatchRequest) {
        self.requests.push(request.clone());
    }
}

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Describes what submitting `lines` through `form`'s transport would do,
/// without doing it.
pub fn plan(form: &FormDefinition, lines: &[String]) -> DispatchOutcome {
    let strategy = DispatchStrategy::from(form.submit_mode);
    if strategy == DispatchStrategy::None {
        return DispatchOutcome::NoEffect;
    }

    let Some(target) = form.trimmed_target() else {
        return skipped(form, "submit target is blank");
    };
    let message = join_lines(lines);

    match strategy {
        DispatchStrategy::None => DispatchOutcome::NoEffect,
        DispatchStrategy::ComposeEmail => {
            let subject = format!("{} Submission", form.display_title());
            DispatchOutcome::Request(DispatchRequest {
                action: NavigationAction::AssignLocation,
                uri: format!(
                    "mailto:{target}?subject={}&body={}",
                    encode_component(&subject),
                    encode_component(&message)
                ),
            })
        }
        DispatchStrategy::OpenMessagingLink => DispatchOutcome::Request(DispatchRequest {
            action: NavigationAction::OpenNewContext { no_opener: true },
            uri: messaging_uri(target, &message),
        }),
    }
}

/// Plans the dispatch and hands any resulting request to `navigator`.
pub fn dispatch(
    form: &FormDefinition,
    lines: &[String],
    navigator: &mut dyn Navigator,
) -> DispatchOutcome {
    let outcome = plan(form, lines);
    if let Some(request) = outcome.request() {
        info!(
            form_key = %form.key,
            scheme = request.uri.split(':').next().unwrap_or_default(),
            "dispatching form submission"
        );
        navigator.navigate(request);
    }
    outcome
}

fn messaging_uri(target: &str, message: &str) -> String {
    let text = encode_component(message);

    if target.starts_with("http://") || target.starts_with("https://") {
        return with_text_param(target, &text);
    }

    // No digits still opens wa.me, which then asks for a recipient.
    let digits: String = target.chars().filter(char::is_ascii_digit).collect();
    format!("{WHATSAPP_BASE}{digits}?text={text}")
}

/// Appends `text=` to the query of `target`, ahead of any fragment.
fn with_text_param(target: &str, text: &str) -> String {
    let (base, fragment) = match target.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (target, None),
    };
    let has_query = match Url::parse(target) {
        Ok(url) => url.query().is_some(),
        Err(_) => base.contains('?'),
    };
    let separator = if has_query { '&' } else { '?' };

    let mut uri = format!("{base}{separator}text={text}");
    if let Some(fragment) = fragment {
        uri.push('#');
        uri.push_str(fragment);
    }
    uri
}

fn skipped(form: &FormDefinition, reason: &str) -> DispatchOutcome {
    warn!(
        form_key = %form.key,
        mode = ?form.submit_mode,
        reason,
        "form submission not dispatched"
    );
    DispatchOutcome::Skipped {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
