//! Two-phase input: gather decoded keys into a queue, then let the caller
//! dispatch them before rendering.

use crate::decoder::{ByteSource, KeyDecoder};
use anyhow::Result;
use core_events::Key;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct InputPump {
    decoder: KeyDecoder,
    queue: VecDeque<Key>,
}

impl InputPump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait (bounded by the source timeout) for one key, then drain whatever
    /// else is already available without blocking. Returns the number of keys
    /// queued by this call; zero means the read timed out.
    pub fn pump<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<usize> {
        let mut queued = 0;
        if let Some(key) = self.decoder.next_key(src)? {
            self.queue.push_back(key);
            queued += 1;
            while src.has_pending() {
                match self.decoder.next_key(src)? {
                    Some(key) => {
                        self.queue.push_back(key);
                        queued += 1;
                    }
                    None => break,
                }
            }
        }
        if queued > 0 {
            tracing::trace!(target: "input", queued, backlog = self.queue.len(), "pump");
        }
        Ok(queued)
    }

    pub fn pop(&mut self) -> Option<Key> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn decoder(&self) -> &KeyDecoder {
        &self.decoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::Motion;

    #[test]
    fn pump_drains_all_pending_keys() {
        let mut src: VecDeque<u8> = b"ab\x1b[Cc".iter().copied().collect();
        let mut pump = InputPump::new();
        assert_eq!(pump.pump(&mut src).unwrap(), 4);
        let keys: Vec<Key> = std::iter::from_fn(|| pump.pop()).collect();
        assert_eq!(
            keys,
            vec![
                Key::Byte(b'a'),
                Key::Byte(b'b'),
                Key::Motion(Motion::Right),
                Key::Byte(b'c')
            ]
        );
        assert!(pump.is_empty());
    }

    #[test]
    fn timeout_queues_nothing() {
        let mut src: VecDeque<u8> = VecDeque::new();
        let mut pump = InputPump::new();
        assert_eq!(pump.pump(&mut src).unwrap(), 0);
        assert!(pump.pop().is_none());
    }
}
