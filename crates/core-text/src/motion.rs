//! Cursor motion helpers.
//!
//! These operate purely on a `LineBuffer` + `Cursor` pair and are free of
//! session state. Every motion is a no-op at document boundaries and leaves
//! `cx` within `[0, current line length]`.

use crate::{Cursor, LineBuffer};

fn clamp(buf: &LineBuffer, cursor: &mut Cursor) {
    let len = buf.current_len();
    if cursor.cx > len {
        cursor.cx = len;
    }
}

/// Move left one byte.
pub fn left(_buf: &LineBuffer, cursor: &mut Cursor) {
    if cursor.cx > 0 {
        cursor.cx -= 1;
    }
}

/// Move right one byte, stopping at line end.
pub fn right(buf: &LineBuffer, cursor: &mut Cursor) {
    if cursor.cx < buf.current_len() {
        cursor.cx += 1;
    }
}

/// Move to the previous line, clamping the column to its length.
pub fn up(buf: &mut LineBuffer, cursor: &mut Cursor) {
    if buf.step_back() {
        cursor.cy = cursor.cy.saturating_sub(1);
        clamp(buf, cursor);
    }
}

/// Move to the next line, clamping the column to its length.
pub fn down(buf: &mut LineBuffer, cursor: &mut Cursor) {
    if buf.step_forward() {
        cursor.cy += 1;
        clamp(buf, cursor);
    }
}

/// Move to start of line.
pub fn line_start(_buf: &LineBuffer, cursor: &mut Cursor) {
    cursor.cx = 0;
}

/// Move to end of line (after the last byte).
pub fn line_end(buf: &LineBuffer, cursor: &mut Cursor) {
    cursor.cx = buf.current_len();
}

/// Move up `rows / 2` lines, stopping early at the first line. The column is
/// clamped once after the walk.
pub fn page_up(buf: &mut LineBuffer, cursor: &mut Cursor, rows: usize) {
    for _ in 0..rows / 2 {
        if !buf.step_back() {
            break;
        }
        cursor.cy = cursor.cy.saturating_sub(1);
    }
    clamp(buf, cursor);
}

/// Move down `rows / 2` lines, stopping early at the last line.
pub fn page_down(buf: &mut LineBuffer, cursor: &mut Cursor, rows: usize) {
    for _ in 0..rows / 2 {
        if !buf.step_forward() {
            break;
        }
        cursor.cy += 1;
    }
    clamp(buf, cursor);
}
