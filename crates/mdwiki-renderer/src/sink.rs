//! Buffered output destination.

use std::fmt;
use std::io::{self, BufWriter, Write};

/// Default capacity of the output buffer.
pub(crate) const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Append-only output buffer owned by a single render.
///
/// Writes are buffered and reach the underlying writer when the buffer fills
/// or when [`finish`](Self::finish) flushes it at the end of the render.
pub(crate) struct Sink<'w> {
    inner: BufWriter<&'w mut dyn Write>,
    written: usize,
}

impl<'w> Sink<'w> {
    /// Wrap `writer` with a buffer of `capacity` bytes.
    pub(crate) fn new(writer: &'w mut dyn Write, capacity: usize) -> Self {
        Self {
            inner: BufWriter::with_capacity(capacity, writer),
            written: 0,
        }
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    pub(crate) fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match args.as_str() {
            Some(s) => self.write_bytes(s.as_bytes()),
            None => self.write_bytes(fmt::format(args).as_bytes()),
        }
    }

    /// Flush buffered output and return the total number of bytes written.
    pub(crate) fn finish(mut self) -> io::Result<usize> {
        self.inner.flush()?;
        Ok(self.written)
    }
}
