//! RenderPipeline: full-frame paint of the session into terminal bytes.
//!
//! Frame layout, in order:
//! 1. hide cursor, move to (0,0);
//! 2. `rows` text rows: the tab-expanded line sliced to visual columns
//!    `[coloff, coloff + cols)`, or `~` past the end of the document, each
//!    followed by erase-to-EOL and `\r\n`;
//! 3. the status row in reverse video, cut to `cols`, then attribute reset
//!    and erase-to-EOL;
//! 4. cursor placement and show cursor.
//!
//! No diffing: every frame repaints everything.

use crate::status::{DEFAULT_NAME_WIDTH, build_status, truncate_chars};
use crate::viewport::Viewport;
use crate::writer::Writer;
use anyhow::Result;
use core_state::EditorState;
use core_text::expand_tabs;
use std::io::Write;
use std::time::Instant;

pub const FILLER: &[u8] = b"~";

pub struct RenderPipeline {
    name_width: usize,
    frames: u64,
    last_render_ns: u64,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_WIDTH)
    }
}

impl RenderPipeline {
    pub fn new(name_width: usize) -> Self {
        Self {
            name_width,
            frames: 0,
            last_render_ns: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_render_ns(&self) -> u64 {
        self.last_render_ns
    }

    /// Build the frame as writer commands. `vp` must already be scrolled.
    pub fn build_frame(&self, state: &EditorState, vp: &Viewport) -> Writer {
        let mut w = Writer::new();
        w.hide_cursor();
        w.move_to(0, 0);

        let mut lines = state.buffer.lines().skip(vp.rowoff);
        for _ in 0..vp.rows {
            match lines.next() {
                Some(line) => {
                    let expanded = expand_tabs(line, state.tab_stop);
                    let start = vp.coloff.min(expanded.len());
                    let end = vp.coloff.saturating_add(vp.cols).min(expanded.len());
                    w.print(&expanded[start..end]);
                }
                None => w.print(FILLER),
            }
            w.clear_to_eol();
            w.line_break();
        }

        let status = build_status(state, self.name_width);
        let shown = truncate_chars(&status, vp.cols);
        w.reverse();
        w.print(shown.as_bytes());
        w.reset_attributes();
        w.clear_to_eol();

        let (col, row) = match &state.prompt {
            Some(_) => (
                shown.chars().count().min(vp.cols.saturating_sub(1)),
                vp.rows,
            ),
            None => (
                state.cursor_visual_col().saturating_sub(vp.coloff),
                state.cursor.cy.saturating_sub(vp.rowoff),
            ),
        };
        w.move_to(clamp_u16(col), clamp_u16(row));
        w.show_cursor();
        w
    }

    /// Encode one frame into a byte buffer.
    pub fn render_frame(&mut self, state: &EditorState, vp: &Viewport) -> Result<Vec<u8>> {
        let start = Instant::now();
        let bytes = self.build_frame(state, vp).into_bytes()?;
        self.frames += 1;
        self.last_render_ns = start.elapsed().as_nanos() as u64;
        tracing::trace!(
            target: "render",
            frame = self.frames,
            rowoff = vp.rowoff,
            coloff = vp.coloff,
            rows = vp.rows,
            cols = vp.cols,
            bytes = bytes.len(),
            ns = self.last_render_ns,
            "frame"
        );
        Ok(bytes)
    }

    /// Render one frame and write it to `out` with a single flush.
    pub fn render<W: Write>(&mut self, state: &EditorState, vp: &Viewport, out: &mut W) -> Result<()> {
        let bytes = self.render_frame(state, vp)?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }
}

fn clamp_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::Command;
    use core_text::LineBuffer;

    #[test]
    fn one_filler_row_per_missing_line() {
        let state = EditorState::empty();
        let vp = Viewport::new(3, 10);
        let w = RenderPipeline::default().build_frame(&state, &vp);
        let fillers = w
            .commands()
            .iter()
            .filter(|c| **c == Command::Print(FILLER.to_vec()))
            .count();
        assert_eq!(fillers, 3);
    }

    #[test]
    fn counts_frames() {
        let (buf, cur) = LineBuffer::from_lines(["a"]).unwrap();
        let state = EditorState::new(buf, cur);
        let mut rp = RenderPipeline::default();
        let mut sink = Vec::new();
        rp.render(&state, &Viewport::new(2, 5), &mut sink).unwrap();
        rp.render(&state, &Viewport::new(2, 5), &mut sink).unwrap();
        assert_eq!(rp.frames(), 2);
        assert!(!sink.is_empty());
    }
}
