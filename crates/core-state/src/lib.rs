//! Editor session state: the document, cursor, and the per-session metadata
//! (file name, dirty flag, quit confirmation, save-as prompt, status message).
//!
//! One `EditorState` is one independent editing session; nothing here is
//! process-global, so tests build as many as they like.
//!
//! All text mutations flow through the `EditorState` wrappers so dirty
//! tracking stays centralized: the flag is set by any mutation that actually
//! changed the document and cleared only by a successful save.

use anyhow::Result;
use core_text::{Cursor, DEFAULT_TAB_STOP, LineBuffer, visual_col};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Placeholder shown in the status line when the session has no file name.
pub const NO_FILE_LABEL: &str = "[New File]";

/// Save-as prompt input line.
#[derive(Debug, Default, Clone)]
pub struct PromptLine {
    input: Vec<u8>,
}

impl PromptLine {
    pub const LABEL: &'static str = "Save as: ";

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn push(&mut self, b: u8) {
        self.input.push(b);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Consume the prompt, returning the typed name (lossy UTF-8).
    pub fn finish(self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }

    /// Text displayed on the status row while the prompt is open.
    pub fn display(&self) -> String {
        format!("{}{}", Self::LABEL, String::from_utf8_lossy(&self.input))
    }
}

/// Ephemeral status message container.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct EditorState {
    pub buffer: LineBuffer,
    pub cursor: Cursor,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    /// A quit was requested on a dirty document; the next key decides.
    pub quit_armed: bool,
    pub prompt: Option<PromptLine>,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub tab_stop: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(LineBuffer::new(), Cursor::origin())
    }
}

impl EditorState {
    /// Create a session around an existing buffer and cursor.
    pub fn new(buffer: LineBuffer, cursor: Cursor) -> Self {
        Self {
            buffer,
            cursor,
            file_name: None,
            dirty: false,
            quit_armed: false,
            prompt: None,
            ephemeral_status: None,
            tab_stop: DEFAULT_TAB_STOP,
        }
    }

    /// Session with no lines and no file name.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_tab_stop(mut self, tab_stop: usize) -> Self {
        self.tab_stop = tab_stop.max(1);
        self
    }

    /// Replace the document (file load). The cursor is parked at the origin
    /// and the session is clean.
    pub fn replace_buffer(&mut self, buffer: LineBuffer, file_name: Option<PathBuf>) {
        self.buffer = buffer;
        self.buffer.rewind(&mut self.cursor);
        self.file_name = file_name;
        self.dirty = false;
        tracing::debug!(target: "state", lines = self.buffer.line_count(), "buffer_replaced");
    }

    pub fn insert_char(&mut self, c: u8) -> Result<()> {
        self.buffer.insert_char(&mut self.cursor, c)?;
        self.dirty = true;
        Ok(())
    }

    /// Backspace; returns whether anything was removed.
    pub fn delete_char(&mut self) -> Result<bool> {
        let removed = self.buffer.delete_char(&mut self.cursor)?;
        if removed {
            self.dirty = true;
        }
        Ok(removed)
    }

    pub fn split_line(&mut self) -> Result<()> {
        self.buffer.split_line(&mut self.cursor)?;
        self.dirty = true;
        Ok(())
    }

    /// Visual column of the cursor on the current line.
    pub fn cursor_visual_col(&self) -> usize {
        visual_col(self.buffer.current_line(), self.cursor.cx, self.tab_stop)
    }

    /// Display name: file name (as given) or the placeholder.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| NO_FILE_LABEL.to_string())
    }

    /// Set an ephemeral status message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    /// Tick ephemeral status; returns true if message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        self.tick_ephemeral_at(Instant::now())
    }

    pub fn tick_ephemeral_at(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.ephemeral_status
            && now >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }
}
