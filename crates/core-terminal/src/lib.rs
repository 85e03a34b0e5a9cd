//! Terminal backend: raw mode + alternate screen with an RAII guard, and the
//! window size query. Everything that touches the real tty lives here.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode, size,
    },
};
use std::io::stdout;

/// Rows reserved below the text area (the status line).
pub const STATUS_ROWS: u16 = 1;

/// Terminal dimensions split into the text area and the status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u16,
    pub height: u16,
}

impl ScreenSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows available for document text.
    pub fn text_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(STATUS_ROWS))
    }

    pub fn cols(&self) -> usize {
        usize::from(self.width)
    }
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn size(&self) -> Result<ScreenSize>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode().context("enabling raw mode")?;
            execute!(stdout(), EnterAlternateScreen, Clear(ClearType::All), MoveTo(0, 0))?;
            self.entered = true;
            tracing::debug!(target: "terminal", "raw_mode_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "terminal", "raw_mode_left");
        }
        Ok(())
    }

    fn size(&self) -> Result<ScreenSize> {
        let (w, h) = size().context("querying terminal size")?;
        Ok(ScreenSize::new(w, h))
    }
}

impl TerminalGuard<'_> {
    pub fn size(&self) -> Result<ScreenSize> {
        self.backend.size()
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
