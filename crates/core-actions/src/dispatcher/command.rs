//! Session commands: quit confirmation, save, and the save-as prompt.

use super::DispatchResult;
use crate::Action;
use crate::io_ops::{self, WriteFileResult};
use anyhow::Result;
use core_state::{EditorState, PromptLine};
use std::path::PathBuf;
use std::time::Duration;

pub const UNSAVED_WARNING: &str = "Unsaved changes. Press Ctrl-Q again to quit.";

const WARNING_TTL: Duration = Duration::from_secs(60);

pub(crate) fn handle_command(action: Action, state: &mut EditorState) -> Result<DispatchResult> {
    match action {
        Action::Quit => {
            if state.dirty {
                state.quit_armed = true;
                state.set_ephemeral(UNSAVED_WARNING, WARNING_TTL);
                tracing::debug!(target: "actions.dispatch", "quit_armed");
                Ok(DispatchResult::clean())
            } else {
                Ok(DispatchResult::quit())
            }
        }
        Action::Save => {
            if let WriteFileResult::NoFilename = io_ops::write_file(state)? {
                state.prompt = Some(PromptLine::default());
                tracing::debug!(target: "actions.dispatch", "save_as_prompt_open");
            }
            Ok(DispatchResult::clean())
        }
        Action::PromptInput(b) => {
            if let Some(p) = state.prompt.as_mut() {
                p.push(b);
            }
            Ok(DispatchResult::clean())
        }
        Action::PromptBackspace => {
            if let Some(p) = state.prompt.as_mut() {
                p.backspace();
            }
            Ok(DispatchResult::clean())
        }
        Action::PromptCancel => {
            state.prompt = None;
            tracing::debug!(target: "actions.dispatch", "save_as_cancelled");
            Ok(DispatchResult::clean())
        }
        Action::PromptConfirm => {
            let Some(prompt) = state.prompt.take() else {
                return Ok(DispatchResult::clean());
            };
            let name = prompt.finish();
            if name.is_empty() {
                tracing::debug!(target: "actions.dispatch", "save_as_empty_name");
                return Ok(DispatchResult::clean());
            }
            state.file_name = Some(PathBuf::from(name));
            io_ops::write_file(state)?;
            Ok(DispatchResult::clean())
        }
        _ => Ok(DispatchResult::clean()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_without_name_opens_prompt() {
        let mut state = EditorState::empty();
        state.insert_char(b'a').unwrap();
        handle_command(Action::Save, &mut state).unwrap();
        assert!(state.prompt.is_some());
        assert!(state.dirty);
    }

    #[test]
    fn empty_prompt_confirm_cancels() {
        let mut state = EditorState::empty();
        state.prompt = Some(PromptLine::default());
        handle_command(Action::PromptConfirm, &mut state).unwrap();
        assert!(state.prompt.is_none());
        assert!(state.file_name.is_none());
    }

    #[test]
    fn prompt_confirm_sets_name_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typed.txt");
        let mut state = EditorState::empty();
        state.insert_char(b'q').unwrap();
        state.prompt = Some(PromptLine::default());
        for b in path.to_string_lossy().bytes() {
            handle_command(Action::PromptInput(b), &mut state).unwrap();
        }
        handle_command(Action::PromptConfirm, &mut state).unwrap();
        assert_eq!(state.file_name.as_deref(), Some(path.as_path()));
        assert!(!state.dirty);
        assert_eq!(std::fs::read(&path).unwrap(), b"q\n");
    }
}
