//! Resolves CMS form definitions into renderable field sets, validates what
//! the user typed and turns a submission into a client-side dispatch request.

pub mod dispatch;
pub mod input;
pub mod payload;
pub mod render;
pub mod resolver;
pub mod sequencer;
mod session;
pub mod validator;

pub use dispatch::{
    DispatchOutcome, DispatchRequest, DispatchStrategy, NavigationAction, Navigator,
    RecordingNavigator,
};
pub use input::InputState;
pub use payload::ExtraPayload;
pub use render::{Control, ControlKind, FormView, InputKind};
pub use resolver::{fallback_form, resolve, FALLBACK_FORM_KEY};
pub use session::{FormSession, SessionPhase, SubmitOutcome, DEFAULT_SUCCESS_MESSAGE};
