//! File IO helpers: load a file into a `LineBuffer` and write one back out.
//!
//! Format: plain bytes, one stored line per `\n`-terminated record. On read
//! every trailing `\r`/`\n` byte of a record is stripped; on write each line is
//! followed by exactly one `\n`. No encoding conversion in either direction.

use anyhow::{Context, Result};
use core_state::EditorState;
use core_text::{Cursor, LineBuffer};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Loaded(OpenSuccess),
    /// The path does not exist; the caller starts an empty document under it.
    Missing,
}

#[derive(Debug)]
pub struct OpenSuccess {
    pub buffer: LineBuffer,
    pub size_bytes: usize,
}

/// Read `\n`-separated records into a new buffer, cursor parked on line 0.
pub fn read_lines<R: BufRead>(mut reader: R) -> Result<(LineBuffer, usize)> {
    let mut buf = LineBuffer::new();
    let mut cursor = Cursor::origin();
    let mut record = Vec::new();
    let mut total = 0usize;
    loop {
        record.clear();
        let n = reader.read_until(b'\n', &mut record)?;
        if n == 0 {
            break;
        }
        total += n;
        let mut end = record.len();
        while end > 0 && matches!(record[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        buf.insert_line(&mut cursor, &record[..end])?;
    }
    buf.rewind(&mut cursor);
    Ok((buf, total))
}

/// Open a file path into a new buffer. A missing file is not an error.
pub fn open_file(path: &Path) -> Result<OpenFileResult> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(target: "io", file = %path.display(), "file_missing_new_document");
            return Ok(OpenFileResult::Missing);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("opening {}", path.display()));
        }
    };
    let (buffer, size_bytes) = read_lines(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(
        target: "io",
        file = %path.display(),
        size_bytes,
        line_count = buffer.line_count(),
        "file_read_ok"
    );
    Ok(OpenFileResult::Loaded(OpenSuccess { buffer, size_bytes }))
}

/// Load `path` into the session. A missing file yields an empty document that
/// will be saved under `path`.
pub fn load_into(state: &mut EditorState, path: &Path) -> Result<()> {
    let buffer = match open_file(path)? {
        OpenFileResult::Loaded(ok) => ok.buffer,
        OpenFileResult::Missing => LineBuffer::new(),
    };
    state.replace_buffer(buffer, Some(path.to_path_buf()));
    Ok(())
}

/// Serialize every line followed by a single `\n`. Returns bytes written.
pub fn write_lines<W: Write>(buffer: &LineBuffer, mut out: W) -> io::Result<usize> {
    let mut written = 0;
    for line in buffer.lines() {
        out.write_all(line)?;
        out.write_all(b"\n")?;
        written += line.len() + 1;
    }
    out.flush()?;
    Ok(written)
}

/// Result of a write attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteFileResult {
    Written { bytes: usize, lines: usize },
    NoFilename,
}

/// Write the session's buffer to its file name and mark it clean. Failing to
/// create or write the file is returned as an error (fatal for the editor).
pub fn write_file(state: &mut EditorState) -> Result<WriteFileResult> {
    let Some(path) = state.file_name.clone() else {
        return Ok(WriteFileResult::NoFilename);
    };
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let bytes = write_lines(&state.buffer, BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;
    state.dirty = false;
    let lines = state.buffer.line_count();
    tracing::debug!(target: "io", file = %path.display(), bytes, lines, "file_write_ok");
    Ok(WriteFileResult::Written { bytes, lines })
}
