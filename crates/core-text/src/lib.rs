//! Line-oriented text storage.
//!
//! A document is an ordered, doubly-linked sequence of byte lines. Nodes live in
//! an arena (`Vec` of slots) and link to each other through [`LineId`] handles
//! carrying a generation counter: releasing a node bumps its slot generation so
//! any handle still pointing at it resolves to [`TextError::StaleLine`] instead
//! of silently reading a recycled line.
//!
//! Invariants (must hold after every public call):
//! * `first` has no predecessor, the last reachable node has no successor.
//! * For every live node `n` with successor `s`, `s.prev == n` (link symmetry).
//! * `current` is `None` only while the buffer is empty, otherwise it names a
//!   live node reachable from `first`.
//! * Edits never leave `cursor.cx` beyond the current line length.
//!
//! Storage growth goes through `try_reserve*` *before* any link or byte is
//! touched, so an allocation failure surfaces as [`TextError::Alloc`] with the
//! structure still consistent.

use std::collections::TryReserveError;

pub mod motion;
pub mod width;

pub use width::{DEFAULT_TAB_STOP, expand_tabs, visual_col};

/// Errors raised by buffer mutations.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("line storage could not grow: {0}")]
    Alloc(#[from] TryReserveError),
    #[error("line handle {0:?} no longer names a live line")]
    StaleLine(LineId),
    #[error("line arena is full")]
    ArenaFull,
}

/// Stable handle to a line node. Only valid for the buffer that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    index: u32,
    generation: u32,
}

/// Cursor coordinates. `cx` is a byte index into the current line (not a visual
/// column); `cy` is the ordinal of the current line, kept for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
}

impl Cursor {
    pub fn origin() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct Line {
    text: Vec<u8>,
    prev: Option<LineId>,
    next: Option<LineId>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    line: Option<Line>,
}

/// Arena-backed doubly-linked line list; sole owner of document content.
#[derive(Debug, Default)]
pub struct LineBuffer {
    slots: Vec<Slot>,
    free: Vec<u32>,
    first: Option<LineId>,
    current: Option<LineId>,
    len: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from a list of lines, cursor parked on the first line.
    pub fn from_lines<I, L>(lines: I) -> Result<(Self, Cursor), TextError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut buf = Self::new();
        let mut cursor = Cursor::origin();
        for line in lines {
            buf.insert_line(&mut cursor, line.as_ref())?;
        }
        buf.rewind(&mut cursor);
        Ok((buf, cursor))
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Number of live lines.
    pub fn line_count(&self) -> usize {
        self.len
    }

    pub fn first(&self) -> Option<LineId> {
        self.first
    }

    pub fn current(&self) -> Option<LineId> {
        self.current
    }

    /// Content of a line, `None` if the handle is stale.
    pub fn line(&self, id: LineId) -> Option<&[u8]> {
        self.node(id).ok().map(|l| l.text.as_slice())
    }

    /// Content of the current line (empty slice when the buffer is empty).
    pub fn current_line(&self) -> &[u8] {
        self.current.and_then(|id| self.line(id)).unwrap_or(&[])
    }

    /// Length of the current line, 0 when the buffer is empty.
    pub fn current_len(&self) -> usize {
        self.current_line().len()
    }

    pub fn prev(&self, id: LineId) -> Option<LineId> {
        self.node(id).ok().and_then(|l| l.prev)
    }

    pub fn next(&self, id: LineId) -> Option<LineId> {
        self.node(id).ok().and_then(|l| l.next)
    }

    /// Iterate line contents from the first line.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            buf: self,
            at: self.first,
        }
    }

    /// Point `current` back at the first line and reset the cursor to the origin.
    pub fn rewind(&mut self, cursor: &mut Cursor) {
        self.current = self.first;
        *cursor = Cursor::origin();
    }

    /// Append `content` as a new line after the current one (or as the sole line)
    /// and make it current. Used for bulk loading; `cy` follows the new line.
    pub fn insert_line(&mut self, cursor: &mut Cursor, content: &[u8]) -> Result<LineId, TextError> {
        let mut text = Vec::new();
        text.try_reserve_exact(content.len())?;
        text.extend_from_slice(content);

        let id = match self.current {
            None => {
                let id = self.alloc(Line {
                    text,
                    prev: None,
                    next: None,
                })?;
                self.first = Some(id);
                id
            }
            Some(cur) => {
                let after = self.node(cur)?.next;
                let id = self.alloc(Line {
                    text,
                    prev: Some(cur),
                    next: after,
                })?;
                self.link_after(cur, id, after)?;
                cursor.cy += 1;
                id
            }
        };
        self.current = Some(id);
        tracing::trace!(target: "text", len = content.len(), lines = self.len, "insert_line");
        Ok(id)
    }

    /// Insert byte `c` at `cursor.cx` in the current line, creating the line
    /// lazily when the buffer is empty. Advances `cx` by one.
    pub fn insert_char(&mut self, cursor: &mut Cursor, c: u8) -> Result<(), TextError> {
        match self.current {
            None => {
                let mut text = Vec::new();
                text.try_reserve_exact(1)?;
                text.push(c);
                let id = self.alloc(Line {
                    text,
                    prev: None,
                    next: None,
                })?;
                self.first = Some(id);
                self.current = Some(id);
                cursor.cx = 1;
            }
            Some(id) => {
                let line = self.node_mut(id)?;
                let at = cursor.cx.min(line.text.len());
                line.text.try_reserve_exact(1)?;
                line.text.insert(at, c);
                cursor.cx = at + 1;
            }
        }
        Ok(())
    }

    /// Backspace. Removes the byte before `cx`, or joins the current line onto
    /// its predecessor when `cx == 0`. Returns whether anything was removed.
    pub fn delete_char(&mut self, cursor: &mut Cursor) -> Result<bool, TextError> {
        let Some(id) = self.current else {
            return Ok(false);
        };
        let (prev, len) = {
            let line = self.node(id)?;
            (line.prev, line.text.len())
        };
        let cx = cursor.cx.min(len);

        if cx > 0 {
            let line = self.node_mut(id)?;
            line.text.remove(cx - 1);
            cursor.cx = cx - 1;
            return Ok(true);
        }

        let Some(prev) = prev else {
            return Ok(false);
        };
        let join_at = self.node(prev)?.text.len();
        self.node_mut(prev)?.text.try_reserve(len)?;

        let removed = self.unlink(id)?;
        self.node_mut(prev)?.text.extend_from_slice(&removed.text);
        self.current = Some(prev);
        cursor.cx = join_at;
        cursor.cy = cursor.cy.saturating_sub(1);
        tracing::trace!(target: "text", join_at, lines = self.len, "join_line");
        debug_assert!(self.links_consistent());
        Ok(true)
    }

    /// Enter. Moves everything from `cx` onward into a new line inserted after
    /// the current one; the cursor lands at column 0 of the new line. On an
    /// empty buffer an empty first line is materialized before splitting.
    pub fn split_line(&mut self, cursor: &mut Cursor) -> Result<(), TextError> {
        let id = match self.current {
            Some(id) => id,
            None => {
                let id = self.alloc(Line {
                    text: Vec::new(),
                    prev: None,
                    next: None,
                })?;
                self.first = Some(id);
                self.current = Some(id);
                cursor.cx = 0;
                id
            }
        };

        let (at, after, tail) = {
            let line = self.node(id)?;
            let at = cursor.cx.min(line.text.len());
            let mut tail = Vec::new();
            tail.try_reserve_exact(line.text.len() - at)?;
            tail.extend_from_slice(&line.text[at..]);
            (at, line.next, tail)
        };
        let new_id = self.alloc(Line {
            text: tail,
            prev: Some(id),
            next: after,
        })?;
        self.node_mut(id)?.text.truncate(at);
        self.link_after(id, new_id, after)?;

        self.current = Some(new_id);
        cursor.cx = 0;
        cursor.cy += 1;
        tracing::trace!(target: "text", split_at = at, lines = self.len, "split_line");
        debug_assert!(self.links_consistent());
        Ok(())
    }

    /// Move `current` to its predecessor. Returns false at the first line.
    pub(crate) fn step_back(&mut self) -> bool {
        match self.current.and_then(|id| self.prev(id)) {
            Some(prev) => {
                self.current = Some(prev);
                true
            }
            None => false,
        }
    }

    /// Move `current` to its successor. Returns false at the last line.
    pub(crate) fn step_forward(&mut self) -> bool {
        match self.current.and_then(|id| self.next(id)) {
            Some(next) => {
                self.current = Some(next);
                true
            }
            None => false,
        }
    }

    /// Walk the list checking end markers, link symmetry, the live count and
    /// that `current` is reachable. Checked by debug assertions after joins and
    /// splits.
    pub fn links_consistent(&self) -> bool {
        let Some(first) = self.first else {
            return self.len == 0 && self.current.is_none();
        };
        if self.prev(first).is_some() {
            return false;
        }
        let mut seen = 0usize;
        let mut current_found = false;
        let mut at = Some(first);
        while let Some(id) = at {
            let Ok(line) = self.node(id) else {
                return false;
            };
            seen += 1;
            if seen > self.len {
                return false;
            }
            current_found |= self.current == Some(id);
            if let Some(next) = line.next
                && self.prev(next) != Some(id)
            {
                return false;
            }
            at = line.next;
        }
        seen == self.len && current_found
    }

    fn node(&self, id: LineId) -> Result<&Line, TextError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.line.as_ref())
            .ok_or(TextError::StaleLine(id))
    }

    fn node_mut(&mut self, id: LineId) -> Result<&mut Line, TextError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.line.as_mut())
            .ok_or(TextError::StaleLine(id))
    }

    fn alloc(&mut self, line: Line) -> Result<LineId, TextError> {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.line = Some(line);
                LineId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.try_reserve(1)?;
                let index =
                    u32::try_from(self.slots.len()).map_err(|_| TextError::ArenaFull)?;
                self.slots.push(Slot {
                    generation: 0,
                    line: Some(line),
                });
                LineId {
                    index,
                    generation: 0,
                }
            }
        };
        self.len += 1;
        Ok(id)
    }

    /// Splice `new` (already pointing at `prev`/`after`) into the list.
    fn link_after(&mut self, prev: LineId, new: LineId, after: Option<LineId>) -> Result<(), TextError> {
        if let Some(after) = after {
            self.node_mut(after)?.prev = Some(new);
        }
        self.node_mut(prev)?.next = Some(new);
        Ok(())
    }

    /// Detach a node from its neighbors and release its slot.
    fn unlink(&mut self, id: LineId) -> Result<Line, TextError> {
        let (prev, next) = {
            let line = self.node(id)?;
            (line.prev, line.next)
        };
        if let Some(prev) = prev {
            self.node_mut(prev)?.next = next;
        }
        if let Some(next) = next {
            self.node_mut(next)?.prev = prev;
        }
        if self.first == Some(id) {
            self.first = next;
        }
        if self.current == Some(id) {
            self.current = prev.or(next);
        }

        let slot = &mut self.slots[id.index as usize];
        let line = slot.line.take().ok_or(TextError::StaleLine(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Ok(line)
    }
}

/// Iterator over line contents in document order.
pub struct Lines<'a> {
    buf: &'a LineBuffer,
    at: Option<LineId>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.at?;
        let line = self.buf.node(id).ok()?;
        self.at = line.next;
        Some(line.text.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contents(buf: &LineBuffer) -> Vec<String> {
        buf.lines()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    #[test]
    fn insert_char_creates_first_line_lazily() {
        let mut buf = LineBuffer::new();
        let mut cur = Cursor::origin();
        assert!(buf.is_empty());
        buf.insert_char(&mut cur, b'x').unwrap();
        assert_eq!(contents(&buf), vec!["x"]);
        assert_eq!(cur, Cursor { cx: 1, cy: 0 });
        assert!(buf.links_consistent());
    }

    #[test]
    fn insert_char_mid_line_shifts_tail() {
        let (mut buf, mut cur) = LineBuffer::from_lines(["ac"]).unwrap();
        cur.cx = 1;
        buf.insert_char(&mut cur, b'b').unwrap();
        assert_eq!(contents(&buf), vec!["abc"]);
        assert_eq!(cur.cx, 2);
    }

    #[test]
    fn delete_at_document_start_is_noop() {
        let (mut buf, mut cur) = LineBuffer::from_lines(["abc"]).unwrap();
        assert!(!buf.delete_char(&mut cur).unwrap());
        assert_eq!(contents(&buf), vec!["abc"]);

        let mut empty = LineBuffer::new();
        let mut cur = Cursor::origin();
        assert!(!empty.delete_char(&mut cur).unwrap());
    }

    #[test]
    fn delete_joins_with_predecessor() {
        let (mut buf, mut cur) = LineBuffer::from_lines(["ab", "cd", "ef"]).unwrap();
        cur.cy = 1;
        assert!(buf.step_forward());
        assert!(buf.delete_char(&mut cur).unwrap());
        assert_eq!(contents(&buf), vec!["abcd", "ef"]);
        assert_eq!(cur, Cursor { cx: 2, cy: 0 });
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.current_line(), b"abcd");
        assert!(buf.links_consistent());
    }

    #[test]
    fn split_then_join_restores_line() {
        let (mut buf, mut cur) = LineBuffer::from_lines(["hello", "world"]).unwrap();
        cur.cx = 2;
        buf.split_line(&mut cur).unwrap();
        assert_eq!(contents(&buf), vec!["he", "llo", "world"]);
        assert_eq!(cur, Cursor { cx: 0, cy: 1 });
        assert!(buf.links_consistent());

        buf.delete_char(&mut cur).unwrap();
        assert_eq!(contents(&buf), vec!["hello", "world"]);
        assert_eq!(cur, Cursor { cx: 2, cy: 0 });
        assert!(buf.links_consistent());
    }

    #[test]
    fn split_on_empty_buffer_materializes_two_lines() {
        let mut buf = LineBuffer::new();
        let mut cur = Cursor::origin();
        buf.split_line(&mut cur).unwrap();
        assert_eq!(contents(&buf), vec!["", ""]);
        assert_eq!(cur, Cursor { cx: 0, cy: 1 });
        assert!(buf.links_consistent());
    }

    #[test]
    fn released_handles_become_stale() {
        let (mut buf, mut cur) = LineBuffer::from_lines(["a", "b"]).unwrap();
        motion::down(&mut buf, &mut cur);
        assert_eq!(cur, Cursor { cx: 0, cy: 1 });
        let doomed = buf.current().unwrap();
        buf.delete_char(&mut cur).unwrap();
        assert!(buf.line(doomed).is_none());
        assert_eq!(cur, Cursor { cx: 1, cy: 0 });

        // The freed slot is reused under a new generation; splitting at the
        // join point moves "b" into it.
        buf.split_line(&mut cur).unwrap();
        let reborn = buf.current().unwrap();
        assert_ne!(reborn, doomed);
        assert!(buf.line(doomed).is_none());
        assert_eq!(buf.line(reborn), Some(&b"b"[..]));
        assert_eq!(cur, Cursor { cx: 0, cy: 1 });

        motion::line_end(&buf, &mut cur);
        buf.split_line(&mut cur).unwrap();
        assert_eq!(buf.current_line(), b"");
        assert_eq!(contents(&buf), vec!["a", "b", ""]);
        assert!(buf.links_consistent());
    }

    #[test]
    fn insert_line_appends_after_current() {
        let mut buf = LineBuffer::new();
        let mut cur = Cursor::origin();
        buf.insert_line(&mut cur, b"one").unwrap();
        buf.insert_line(&mut cur, b"three").unwrap();
        buf.rewind(&mut cur);
        buf.insert_line(&mut cur, b"two").unwrap();
        assert_eq!(contents(&buf), vec!["one", "two", "three"]);
        assert_eq!(cur.cy, 1);
        assert!(buf.links_consistent());
    }

    #[test]
    fn typing_enter_typing_backspace_scenario() {
        let mut buf = LineBuffer::new();
        let mut cur = Cursor::origin();
        buf.insert_char(&mut cur, b'a').unwrap();
        buf.insert_char(&mut cur, b'b').unwrap();
        buf.split_line(&mut cur).unwrap();
        buf.insert_char(&mut cur, b'c').unwrap();
        buf.delete_char(&mut cur).unwrap();
        assert_eq!(contents(&buf), vec!["ab", ""]);
        assert_eq!(cur, Cursor { cx: 0, cy: 1 });
    }
}
