//! KeyTranslator: key → `Action` mapping.
//!
//! Bindings:
//! * `^Q` quit, `^S` save, `\r` split line, `^H`/DEL backspace.
//! * Escape-sequence motions always map to `Action::Motion`.
//! * With `letter_motions` on, the bytes `h j k l 0 $ J K` are motions too and
//!   therefore cannot be typed as text. This is the historical behavior and
//!   the default; turning it off lets those bytes insert like any other.
//! * Remaining non-control bytes insert; other control bytes are ignored.
//!
//! While the save-as prompt is open a separate, smaller table applies.

use crate::Action;
use core_events::{BACKSPACE, ENTER, Key, Motion, ctrl, is_control};

#[derive(Debug, Clone, Copy)]
pub struct KeyTranslator {
    letter_motions: bool,
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl KeyTranslator {
    pub fn new(letter_motions: bool) -> Self {
        Self { letter_motions }
    }

    /// Translate a key in editing context.
    pub fn translate(&self, key: Key) -> Action {
        let b = match key {
            Key::Motion(m) => return Action::Motion(m),
            Key::Noop => return Action::Ignore,
            Key::Byte(b) => b,
        };
        if b == ctrl(b'q') {
            return Action::Quit;
        }
        if b == ctrl(b's') {
            return Action::Save;
        }
        if b == ENTER {
            return Action::SplitLine;
        }
        if b == ctrl(b'h') || b == BACKSPACE {
            return Action::Backspace;
        }
        if self.letter_motions
            && let Some(m) = Motion::from_letter(b)
        {
            return Action::Motion(m);
        }
        if is_control(b) {
            Action::Ignore
        } else {
            Action::Insert(b)
        }
    }

    /// Translate a key while the save-as prompt is open.
    pub fn translate_prompt(&self, key: Key) -> Action {
        match key {
            Key::Byte(b'\r' | b'\n') => Action::PromptConfirm,
            Key::Byte(b) if b == ctrl(b'c') => Action::PromptCancel,
            // A lone ESC times out into a no-op.
            Key::Noop => Action::PromptCancel,
            Key::Byte(b) if b == ctrl(b'h') || b == BACKSPACE => Action::PromptBackspace,
            Key::Byte(b) if !is_control(b) => Action::PromptInput(b),
            Key::Byte(_) | Key::Motion(_) => Action::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_bytes() {
        let t = KeyTranslator::default();
        assert_eq!(t.translate(Key::Byte(0x11)), Action::Quit);
        assert_eq!(t.translate(Key::Byte(0x13)), Action::Save);
        assert_eq!(t.translate(Key::Byte(b'\r')), Action::SplitLine);
        assert_eq!(t.translate(Key::Byte(0x08)), Action::Backspace);
        assert_eq!(t.translate(Key::Byte(0x7f)), Action::Backspace);
    }

    #[test]
    fn letters_are_motions_by_default() {
        let t = KeyTranslator::default();
        assert_eq!(t.translate(Key::Byte(b'j')), Action::Motion(Motion::Down));
        assert_eq!(t.translate(Key::Byte(b'$')), Action::Motion(Motion::LineEnd));
        assert_eq!(t.translate(Key::Byte(b'J')), Action::Motion(Motion::PageDown));
        assert_eq!(t.translate(Key::Byte(b'x')), Action::Insert(b'x'));
    }

    #[test]
    fn letters_insert_when_letter_motions_disabled() {
        let t = KeyTranslator::new(false);
        assert_eq!(t.translate(Key::Byte(b'j')), Action::Insert(b'j'));
        assert_eq!(t.translate(Key::Byte(b'0')), Action::Insert(b'0'));
        assert_eq!(
            t.translate(Key::Motion(Motion::Up)),
            Action::Motion(Motion::Up)
        );
    }

    #[test]
    fn control_bytes_and_noops_are_ignored() {
        let t = KeyTranslator::default();
        assert_eq!(t.translate(Key::Byte(b'\t')), Action::Ignore);
        assert_eq!(t.translate(Key::Byte(0x01)), Action::Ignore);
        assert_eq!(t.translate(Key::Noop), Action::Ignore);
        assert_eq!(t.translate(Key::Byte(0xe9)), Action::Insert(0xe9));
    }

    #[test]
    fn prompt_table() {
        let t = KeyTranslator::default();
        assert_eq!(t.translate_prompt(Key::Byte(b'j')), Action::PromptInput(b'j'));
        assert_eq!(t.translate_prompt(Key::Byte(b'\r')), Action::PromptConfirm);
        assert_eq!(t.translate_prompt(Key::Byte(0x03)), Action::PromptCancel);
        assert_eq!(t.translate_prompt(Key::Noop), Action::PromptCancel);
        assert_eq!(t.translate_prompt(Key::Byte(0x7f)), Action::PromptBackspace);
        assert_eq!(
            t.translate_prompt(Key::Motion(Motion::Left)),
            Action::Ignore
        );
    }
}
