//! Text edit action handling (insert/backspace/split). Mutations go through
//! the `EditorState` wrappers so the dirty flag stays centralized.

use super::DispatchResult;
use crate::Action;
use anyhow::Result;
use core_state::EditorState;

pub(crate) fn handle_edit(action: Action, state: &mut EditorState) -> Result<DispatchResult> {
    let before = state.cursor;
    let edited = match action {
        Action::Insert(b) => {
            state.insert_char(b)?;
            true
        }
        Action::SplitLine => {
            state.split_line()?;
            true
        }
        Action::Backspace => state.delete_char()?,
        _ => false,
    };
    tracing::trace!(
        target: "actions.dispatch",
        op = ?action,
        edited,
        cx = before.cx,
        cy = before.cy,
        to_cx = state.cursor.cx,
        to_cy = state.cursor.cy,
        lines = state.buffer.line_count(),
        "edit"
    );
    Ok(if edited {
        DispatchResult::edited()
    } else {
        DispatchResult::clean()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Cursor, LineBuffer};

    #[test]
    fn backspace_at_origin_reports_clean() {
        let (buf, cur) = LineBuffer::from_lines(["abc"]).unwrap();
        let mut state = EditorState::new(buf, cur);
        let r = handle_edit(Action::Backspace, &mut state).unwrap();
        assert!(!r.edited);
        assert!(!state.dirty);
    }

    #[test]
    fn split_then_backspace_rejoins() {
        let (buf, mut cur) = LineBuffer::from_lines(["hello"]).unwrap();
        cur.cx = 3;
        let mut state = EditorState::new(buf, cur);
        handle_edit(Action::SplitLine, &mut state).unwrap();
        assert_eq!(state.cursor, Cursor { cx: 0, cy: 1 });
        handle_edit(Action::Backspace, &mut state).unwrap();
        assert_eq!(state.cursor, Cursor { cx: 3, cy: 0 });
        assert_eq!(state.buffer.current_line(), b"hello");
        assert_eq!(state.buffer.line_count(), 1);
    }
}
