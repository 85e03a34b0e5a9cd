//! Key → action translation, action dispatch, and file IO for an editing
//! session.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use dispatcher::{DispatchResult, UNSAVED_WARNING, dispatch, handle_key};
pub use key_translator::KeyTranslator;

use core_events::Motion;

/// A logical editor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Save,
    SplitLine,
    Backspace,
    Motion(Motion),
    Insert(u8),
    PromptInput(u8),
    PromptBackspace,
    PromptConfirm,
    PromptCancel,
    /// Unbound control byte or undecodable sequence.
    Ignore,
}
