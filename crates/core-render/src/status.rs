//! Status line composition.
//!
//! Default format: `<name> - <n> lines <modified>` where
//! * `<name>` is the file name as given, or `[New File]`, cut to the
//!   configured name width (in chars);
//! * `<n>` is the document line count;
//! * `<modified>` is `(modified)` when dirty, otherwise empty (the separating
//!   space is still emitted).
//!
//! An open save-as prompt replaces the whole text, and so does a pending
//! ephemeral message. The final string is cut to the terminal width by the
//! caller via [`truncate_chars`].

use core_state::EditorState;
use std::borrow::Cow;

pub const DEFAULT_NAME_WIDTH: usize = 20;
pub const MODIFIED_MARKER: &str = "(modified)";

/// Ordered pieces of a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    Modified(bool),
    /// Replaces everything else (prompt or ephemeral message).
    Override(Cow<'a, str>),
}

/// Build the segments for the current session.
pub fn compose_status(state: &EditorState, name_width: usize) -> Vec<StatusSegment<'_>> {
    if let Some(prompt) = &state.prompt {
        return vec![StatusSegment::Override(prompt.display().into())];
    }
    if let Some(msg) = &state.ephemeral_status {
        return vec![StatusSegment::Override(Cow::Borrowed(msg.text.as_str()))];
    }
    let name = state.display_name();
    vec![
        StatusSegment::FileName(truncate_chars(&name, name_width).to_owned().into()),
        StatusSegment::LineCount(state.buffer.line_count()),
        StatusSegment::Modified(state.dirty),
    ]
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(48);
    for seg in segments {
        match seg {
            StatusSegment::Override(text) => s.push_str(text),
            StatusSegment::FileName(name) => s.push_str(name),
            StatusSegment::LineCount(n) => {
                s.push_str(" - ");
                s.push_str(&n.to_string());
                s.push_str(" lines ");
            }
            StatusSegment::Modified(true) => s.push_str(MODIFIED_MARKER),
            StatusSegment::Modified(false) => {}
        }
    }
    s
}

/// Status text for `state`, not yet cut to the terminal width.
pub fn build_status(state: &EditorState, name_width: usize) -> String {
    format_status(&compose_status(state, name_width))
}

/// Longest prefix of `s` holding at most `max` chars.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
