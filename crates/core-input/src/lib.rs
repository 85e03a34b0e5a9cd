//! Terminal input: a background stdin reader, a channel-backed byte source with
//! a read timeout, the escape-sequence decoder and the key queue pump.

mod decoder;
mod pump;

pub use decoder::{ByteSource, KeyDecoder};
pub use pump::InputPump;

use anyhow::{Result, bail};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::io::{self, Read};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Bound on bytes buffered between the reader thread and the main loop. The
/// reader blocks on `send` when full rather than dropping input.
pub const INPUT_CHANNEL_CAP: usize = 8192;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Byte source fed by [`spawn_stdin_reader`].
#[derive(Debug)]
pub struct ChannelSource {
    rx: Receiver<u8>,
    timeout: Duration,
}

impl ChannelSource {
    pub fn new(rx: Receiver<u8>, timeout: Duration) -> Self {
        Self { rx, timeout }
    }
}

impl ByteSource for ChannelSource {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.rx.recv_timeout(self.timeout) {
            Ok(b) => Ok(Some(b)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => bail!("input stream closed"),
        }
    }

    fn has_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
        }
    }
}

/// Spawn a thread that forwards every stdin byte into a bounded channel.
pub fn spawn_stdin_reader() -> Result<(JoinHandle<ExitReason>, Receiver<u8>)> {
    let (tx, rx) = crossbeam_channel::bounded(INPUT_CHANNEL_CAP);
    let handle = std::thread::Builder::new()
        .name("mote-input".into())
        .spawn(move || forward_bytes(io::stdin().lock(), tx))?;
    Ok((handle, rx))
}

/// Copy bytes from `reader` into `tx` until EOF, a read error, or the
/// receiving side hangs up.
pub fn forward_bytes<R: Read>(mut reader: R, tx: Sender<u8>) -> ExitReason {
    let span = tracing::debug_span!(target: "input.thread", "stdin_reader");
    let _enter = span.enter();
    let mut buf = [0u8; 1024];
    let reason = loop {
        match reader.read(&mut buf) {
            Ok(0) => break ExitReason::StreamEnded,
            Ok(n) => {
                if buf[..n].iter().any(|&b| tx.send(b).is_err()) {
                    break ExitReason::ChannelClosed;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(target: "input.thread", ?e, "stdin_read_failed");
                break ExitReason::StreamError;
            }
        }
    };
    debug!(target: "input.thread", reason = reason.as_str(), "stdin_reader_exit");
    reason
}
