//! Byte stream → logical key state machine.
//!
//! ```text
//! Ground --ESC--> Escape --'['--> Csi --A/B/C/D/H/F--> motion
//!                                    --'5'/'6'--> Tilde --'~'--> page motion
//! anything else (or a timeout) after ESC  ==> Key::Noop
//! ```
//!
//! The decoder never retries: a short read in the middle of a sequence
//! degrades to [`Key::Noop`] rather than blocking for the rest.

use anyhow::Result;
use core_events::{ESC, Key, Motion};
use std::collections::VecDeque;

/// Source of raw input bytes.
pub trait ByteSource {
    /// Next byte, waiting at most the source's read timeout. `Ok(None)` means
    /// the timeout elapsed with nothing to read.
    fn next_byte(&mut self) -> Result<Option<u8>>;

    /// Whether a byte can be read right now without waiting.
    fn has_pending(&self) -> bool;
}

/// In-memory source; an exhausted queue behaves like a timed-out read.
impl ByteSource for VecDeque<u8> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.pop_front())
    }

    fn has_pending(&self) -> bool {
        !self.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct KeyDecoder {
    decoded: u64,
    noops: u64,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one logical key. Returns `Ok(None)` when the source timed out
    /// before the first byte arrived.
    pub fn next_key<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<Option<Key>> {
        let Some(b) = src.next_byte()? else {
            return Ok(None);
        };
        let key = if b == ESC {
            self.escape(src)?
        } else {
            Key::Byte(b)
        };
        self.decoded += 1;
        if key == Key::Noop {
            self.noops += 1;
            tracing::trace!(target: "input", noops = self.noops, "escape_sequence_dropped");
        }
        Ok(Some(key))
    }

    /// Total keys decoded and how many of them were no-ops.
    pub fn counters(&self) -> (u64, u64) {
        (self.decoded, self.noops)
    }

    fn escape<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<Key> {
        let Some(first) = src.next_byte()? else {
            return Ok(Key::Noop);
        };
        let Some(second) = src.next_byte()? else {
            return Ok(Key::Noop);
        };
        if first != b'[' {
            return Ok(Key::Noop);
        }
        let motion = match second {
            b'A' => Motion::Up,
            b'B' => Motion::Down,
            b'C' => Motion::Right,
            b'D' => Motion::Left,
            b'H' => Motion::LineStart,
            b'F' => Motion::LineEnd,
            b'5' | b'6' => {
                if src.next_byte()? != Some(b'~') {
                    return Ok(Key::Noop);
                }
                if second == b'5' {
                    Motion::PageUp
                } else {
                    Motion::PageDown
                }
            }
            _ => return Ok(Key::Noop),
        };
        Ok(Key::Motion(motion))
    }
}
