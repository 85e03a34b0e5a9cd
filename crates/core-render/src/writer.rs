//! Terminal writer: an ordered list of primitive terminal operations that is
//! encoded once per frame.
//!
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Positions are absolute, (0,0) origin; the caller ensures bounds.
//! * Escape sequences come from `crossterm` commands; document text is passed
//!   through as raw bytes.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    HideCursor,
    ShowCursor,
    /// (column, row)
    MoveTo(u16, u16),
    ClearToEol,
    LineBreak,
    Reverse,
    ResetAttributes,
    Print(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }
    pub fn move_to(&mut self, col: u16, row: u16) {
        self.cmds.push(Command::MoveTo(col, row));
    }
    pub fn clear_to_eol(&mut self) {
        self.cmds.push(Command::ClearToEol);
    }
    pub fn line_break(&mut self) {
        self.cmds.push(Command::LineBreak);
    }
    pub fn reverse(&mut self) {
        self.cmds.push(Command::Reverse);
    }
    pub fn reset_attributes(&mut self) {
        self.cmds.push(Command::ResetAttributes);
    }
    pub fn print(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.cmds.push(Command::Print(bytes.to_vec()));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Encode every command into `out` without flushing.
    pub fn encode<W: Write>(&self, out: &mut W) -> Result<()> {
        for c in &self.cmds {
            match c {
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
                Command::MoveTo(col, row) => queue!(out, MoveTo(*col, *row))?,
                Command::ClearToEol => queue!(out, Clear(ClearType::UntilNewLine))?,
                Command::LineBreak => out.write_all(b"\r\n")?,
                Command::Reverse => queue!(out, SetAttribute(Attribute::Reverse))?,
                Command::ResetAttributes => queue!(out, SetAttribute(Attribute::Reset))?,
                Command::Print(bytes) => out.write_all(bytes)?,
            }
        }
        Ok(())
    }

    /// Encode into a fresh byte buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.cmds.len() * 8);
        self.encode(&mut out)?;
        Ok(out)
    }
}
