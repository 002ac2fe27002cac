//! Byte-oriented line reader and writer.
//!
//! The reader pulls one line at a time into a reused buffer, stripping the
//! trailing `\n` and any run of trailing `\r`. The writer re-appends a
//! single `\n`, so copy-through normalizes line endings but leaves line
//! content untouched. Both honor the optional per-line capacity: the reader
//! truncates overlong lines to `cap - 1` bytes and flags them, the writer
//! truncates generated text the same way.

use std::io::{self, BufRead, Write};

/// Streaming line reader over any buffered byte source.
#[derive(Debug)]
pub(crate) struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    limit: Option<usize>,
    truncated: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Create a reader; `limit` is the per-line capacity, `None` for
    /// unbounded lines.
    pub fn new(inner: R, limit: Option<usize>) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            limit,
            truncated: false,
        }
    }

    /// Advance to the next line, reusing the internal buffer.
    ///
    /// Returns `false` at end of input. A final line without a newline is
    /// still a line.
    pub fn advance(&mut self) -> io::Result<bool> {
        self.buf.clear();
        self.truncated = false;

        match self.limit {
            Some(cap) => {
                if self.read_bounded(cap.saturating_sub(1))? == 0 {
                    return Ok(false);
                }
            }
            None => {
                if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
                    return Ok(false);
                }
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
            }
        }

        while self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Ok(true)
    }

    /// Content of the current line, valid after [`advance`](Self::advance)
    /// returned `true`.
    pub fn line(&self) -> &[u8] {
        &self.buf
    }

    /// Whether the current line lost content to the capacity bound.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Read one physical line, keeping at most `max` content bytes. The
    /// remainder of the line through its `\n` is consumed and discarded.
    /// A discarded run of `\r` directly before the line ending belongs to
    /// the terminator and does not count as lost content.
    /// Returns the number of bytes consumed from the stream.
    fn read_bounded(&mut self, max: usize) -> io::Result<usize> {
        let mut consumed = 0;
        loop {
            let chunk = self.inner.fill_buf()?;
            if chunk.is_empty() {
                break;
            }
            let (content_len, line_len, complete) =
                match chunk.iter().position(|&b| b == b'\n') {
                    Some(pos) => (pos, pos + 1, true),
                    None => (chunk.len(), chunk.len(), false),
                };

            let room = max.saturating_sub(self.buf.len());
            let keep = content_len.min(room);
            self.buf.extend_from_slice(&chunk[..keep]);
            if chunk[keep..content_len].iter().any(|&b| b != b'\r') {
                self.truncated = true;
            }

            self.inner.consume(line_len);
            consumed += line_len;
            if complete {
                break;
            }
        }
        Ok(consumed)
    }
}

/// Streaming line writer over any byte sink.
#[derive(Debug)]
pub(crate) struct LineWriter<W: Write> {
    inner: W,
    limit: Option<usize>,
}

impl<W: Write> LineWriter<W> {
    /// Create a writer; `limit` is the per-line capacity, `None` for
    /// unbounded lines.
    pub fn new(inner: W, limit: Option<usize>) -> Self {
        Self { inner, limit }
    }

    /// Copy a source line through unchanged, re-appending the newline.
    pub fn write_raw(&mut self, line: &[u8]) -> io::Result<()> {
        self.inner.write_all(line)?;
        self.inner.write_all(b"\n")
    }

    /// Write a generated text line. In bounded mode, text longer than
    /// `cap - 1` bytes is cut at a character boundary before the newline.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        let text = match self.limit {
            Some(cap) => truncate_at_char_boundary(text, cap.saturating_sub(1)),
            None => text,
        };
        self.inner.write_all(text.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn truncate_at_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
