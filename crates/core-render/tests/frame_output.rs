//! Byte-exact frame checks for `RenderPipeline`.

use core_render::{RenderPipeline, Viewport};
use core_state::{EditorState, PromptLine};
use core_text::{Cursor, LineBuffer};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn session(lines: &[&str], cursor: Cursor) -> EditorState {
    let (mut buf, mut cur) = LineBuffer::from_lines(lines).unwrap();
    for _ in 0..cursor.cy {
        core_text::motion::down(&mut buf, &mut cur);
    }
    cur.cx = cursor.cx;
    EditorState::new(buf, cur)
}

fn frame(state: &EditorState, vp: &mut Viewport) -> String {
    vp.scroll(state.cursor.cy, state.cursor_visual_col());
    let bytes = RenderPipeline::default().render_frame(state, vp).unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn short_document_gets_filler_rows() {
    let state = session(&["ab", "c"], Cursor::origin());
    let mut vp = Viewport::new(3, 10);
    assert_eq!(
        frame(&state, &mut vp),
        concat!(
            "\x1b[?25l\x1b[1;1H",
            "ab\x1b[K\r\n",
            "c\x1b[K\r\n",
            "~\x1b[K\r\n",
            "\x1b[7m[New File]\x1b[0m\x1b[K",
            "\x1b[1;1H\x1b[?25h",
        )
    );
}

#[test]
fn dirty_named_status_line() {
    let mut state = session(&["x"], Cursor { cx: 1, cy: 0 });
    state.file_name = Some(PathBuf::from("f.txt"));
    state.dirty = true;
    let mut vp = Viewport::new(1, 40);
    assert_eq!(
        frame(&state, &mut vp),
        concat!(
            "\x1b[?25l\x1b[1;1H",
            "x\x1b[K\r\n",
            "\x1b[7mf.txt - 1 lines (modified)\x1b[0m\x1b[K",
            "\x1b[1;2H\x1b[?25h",
        )
    );
}

#[test]
fn tabs_expand_and_scroll_horizontally() {
    let state = session(&["\tx"], Cursor { cx: 2, cy: 0 }).with_tab_stop(4);
    let mut vp = Viewport::new(1, 3);
    let out = frame(&state, &mut vp);
    assert_eq!(vp.coloff, 3);
    assert_eq!(
        out,
        concat!(
            "\x1b[?25l\x1b[1;1H",
            " x\x1b[K\r\n",
            "\x1b[7m[Ne\x1b[0m\x1b[K",
            "\x1b[1;3H\x1b[?25h",
        )
    );
}

#[test]
fn vertical_scroll_shows_cursor_row() {
    let lines: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let state = session(&refs, Cursor { cx: 0, cy: 7 });
    let mut vp = Viewport::new(3, 30);
    let out = frame(&state, &mut vp);
    assert_eq!(vp.rowoff, 5);
    assert_eq!(
        out,
        concat!(
            "\x1b[?25l\x1b[1;1H",
            "5\x1b[K\r\n",
            "6\x1b[K\r\n",
            "7\x1b[K\r\n",
            "\x1b[7m[New File] - 10 lines \x1b[0m\x1b[K",
            "\x1b[3;1H\x1b[?25h",
        )
    );
}

#[test]
fn prompt_places_cursor_on_status_row() {
    let mut state = session(&["a"], Cursor::origin());
    let mut p = PromptLine::default();
    p.push(b'a');
    p.push(b'b');
    state.prompt = Some(p);
    let mut vp = Viewport::new(2, 40);
    let out = frame(&state, &mut vp);
    assert!(out.contains("\x1b[7mSave as: ab\x1b[0m"));
    assert!(out.ends_with("\x1b[3;12H\x1b[?25h"));
}

#[test]
fn long_lines_are_clipped_to_width() {
    let state = session(&["abcdefghij"], Cursor::origin());
    let mut vp = Viewport::new(1, 4);
    let out = frame(&state, &mut vp);
    assert!(out.starts_with("\x1b[?25l\x1b[1;1Habcd\x1b[K\r\n"));
}
