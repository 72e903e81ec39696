//! Output sinks that accept string writes.
//!
//! Sinks that already hold bytes in memory implement [`StringWrite`]
//! directly. Any other [`io::Write`] is wrapped in a [`ByteSink`] at the
//! call site, so the choice is made at compile time rather than by probing
//! the writer at runtime.

use std::io;

/// A byte sink with an efficient path for string writes.
///
/// The `io::Write` supertrait is what JSON payloads are streamed through.
pub trait StringWrite: io::Write {
    /// Write the whole string or fail.
    fn write_string(&mut self, s: &str) -> io::Result<()>;
}

impl StringWrite for Vec<u8> {
    fn write_string(&mut self, s: &str) -> io::Result<()> {
        self.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl<W: StringWrite + ?Sized> StringWrite for &mut W {
    fn write_string(&mut self, s: &str) -> io::Result<()> {
        (**self).write_string(s)
    }
}

/// Wraps a raw byte writer so it can be used as a [`StringWrite`].
///
/// Each string write becomes a single `write_all` on the inner writer. No
/// buffering is added.
#[derive(Debug)]
pub struct ByteSink<W> {
    inner: W,
}

impl<W: io::Write> ByteSink<W> {
    /// Wrap a byte writer.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the wrapped writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> io::Write for ByteSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: io::Write> StringWrite for ByteSink<W> {
    fn write_string(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_vec_write_string() {
        let mut out = Vec::new();
        out.write_string("data:").unwrap();
        out.write_string("hello").unwrap();
        assert_eq!(out, b"data:hello");
    }

    #[test]
    fn test_byte_sink_wraps_writer() {
        let mut sink = ByteSink::new(Cursor::new(Vec::new()));
        sink.write_string("id:1\n").unwrap();
        assert_eq!(sink.get_ref().get_ref(), b"id:1\n");

        let cursor = sink.into_inner();
        assert_eq!(cursor.into_inner(), b"id:1\n");
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut out = Vec::new();
        {
            let mut by_ref = &mut out;
            StringWrite::write_string(&mut by_ref, "event:msg\n").unwrap();
        }
        assert_eq!(out, b"event:msg\n");
    }
}
