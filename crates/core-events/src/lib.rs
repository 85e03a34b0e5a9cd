//! Logical key events produced by the input decoder and consumed by the
//! dispatcher.
//!
//! The decoder turns raw terminal bytes into [`Key`] values; it knows nothing
//! about bindings. Deciding what a byte *means* (quit, save, insert, a letter
//! bound to a motion) is left to the action translator.

use std::fmt;

/// Cursor motions reachable from escape sequences (and optionally letters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

impl Motion {
    /// Letter historically bound to the motion (`hjkl`, `0`, `$`, `K`, `J`).
    pub const fn letter(self) -> u8 {
        match self {
            Motion::Left => b'h',
            Motion::Down => b'j',
            Motion::Up => b'k',
            Motion::Right => b'l',
            Motion::LineStart => b'0',
            Motion::LineEnd => b'$',
            Motion::PageUp => b'K',
            Motion::PageDown => b'J',
        }
    }

    /// Inverse of [`Motion::letter`].
    pub const fn from_letter(b: u8) -> Option<Motion> {
        Some(match b {
            b'h' => Motion::Left,
            b'j' => Motion::Down,
            b'k' => Motion::Up,
            b'l' => Motion::Right,
            b'0' => Motion::LineStart,
            b'$' => Motion::LineEnd,
            b'K' => Motion::PageUp,
            b'J' => Motion::PageDown,
            _ => return None,
        })
    }
}

/// One decoded logical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plain input byte (printable or control).
    Byte(u8),
    /// A motion decoded from a multi-byte escape sequence.
    Motion(Motion),
    /// Incomplete or unrecognized escape sequence.
    Noop,
}

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 0x7f;

/// Control-key chord for an ASCII letter (`ctrl(b'q') == 0x11`).
pub const fn ctrl(b: u8) -> u8 {
    b & 0x1f
}

/// Control bytes in the C sense: 0x00..=0x1F and DEL.
pub const fn is_control(b: u8) -> bool {
    b < 0x20 || b == BACKSPACE
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Byte(b) if is_control(*b) => write!(f, "^{}", char::from(*b ^ 0x40)),
            Key::Byte(b) => write!(f, "{}", char::from(*b)),
            Key::Motion(m) => write!(f, "<{m:?}>"),
            Key::Noop => f.write_str("<noop>"),
        }
    }
}
