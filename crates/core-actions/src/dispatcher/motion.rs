//! Motion sub-dispatch (cursor movement). Motions never touch content or the
//! dirty flag.

use super::DispatchResult;
use core_events::Motion;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(kind: Motion, state: &mut EditorState, text_rows: usize) -> DispatchResult {
    let before = state.cursor;
    let buf = &mut state.buffer;
    let cur = &mut state.cursor;
    match kind {
        Motion::Left => motion::left(buf, cur),
        Motion::Right => motion::right(buf, cur),
        Motion::Up => motion::up(buf, cur),
        Motion::Down => motion::down(buf, cur),
        Motion::LineStart => motion::line_start(buf, cur),
        Motion::LineEnd => motion::line_end(buf, cur),
        Motion::PageUp => motion::page_up(buf, cur, text_rows),
        Motion::PageDown => motion::page_down(buf, cur, text_rows),
    }
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        from_cx = before.cx,
        from_cy = before.cy,
        to_cx = state.cursor.cx,
        to_cy = state.cursor.cy,
        "motion"
    );
    DispatchResult::clean()
}
