//! Dispatcher applying `Action` to an editing session.
//!
//! Sub-modules:
//! * `motion`  - cursor movement semantics
//! * `edit`    - text mutation (insert/backspace/split)
//! * `command` - quit confirmation, save, and the save-as prompt
//!
//! `handle_key` is the runtime entry point: it resolves a pending quit
//! confirmation, picks the prompt or editing key table, then dispatches.

use crate::{Action, KeyTranslator};
use anyhow::Result;
use core_events::{Key, ctrl};
use core_state::EditorState;

mod command;
pub use command::UNSAVED_WARNING;
mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// The document content changed.
    pub edited: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn edited() -> Self {
        Self {
            edited: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn quit() -> Self {
        Self {
            edited: false,
            quit: true,
        }
    }
}

/// Apply an action. `text_rows` is the number of visible document rows, used
/// for paging. Errors are fatal (allocation or save failure).
pub fn dispatch(action: Action, state: &mut EditorState, text_rows: usize) -> Result<DispatchResult> {
    match action {
        Action::Motion(m) => Ok(motion::handle_motion(m, state, text_rows)),
        Action::Insert(_) | Action::SplitLine | Action::Backspace => edit::handle_edit(action, state),
        Action::Quit
        | Action::Save
        | Action::PromptInput(_)
        | Action::PromptBackspace
        | Action::PromptConfirm
        | Action::PromptCancel => command::handle_command(action, state),
        Action::Ignore => Ok(DispatchResult::clean()),
    }
}

/// Translate and dispatch one decoded key.
pub fn handle_key(
    translator: &KeyTranslator,
    key: Key,
    state: &mut EditorState,
    text_rows: usize,
) -> Result<DispatchResult> {
    if state.quit_armed {
        // The key after the warning is consumed either way.
        state.quit_armed = false;
        state.ephemeral_status = None;
        if key == Key::Byte(ctrl(b'q')) {
            tracing::info!(target: "actions.dispatch", "quit_discarding_changes");
            return Ok(DispatchResult::quit());
        }
        tracing::debug!(target: "actions.dispatch", "quit_cancelled");
        return Ok(DispatchResult::clean());
    }
    let action = if state.prompt.is_some() {
        translator.translate_prompt(key)
    } else {
        translator.translate(key)
    };
    dispatch(action, state, text_rows)
}
