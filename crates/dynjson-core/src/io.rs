//! Input and output adapters
//!
//! The lexer pulls single bytes through [`ByteSource`]; the serializer pushes
//! characters and spans through [`JsonSink`]. These two contracts are the
//! only coupling between the engine and a concrete I/O source or sink, so a
//! file handle, an in-memory buffer, and a network stream all look the same
//! from the inside.

use std::convert::Infallible;
use std::io::{Read, Write};

use crate::error::{JsonError, Result};

/// One-byte pull contract the lexer reads from.
pub trait ByteSource {
    /// Next byte of the input, or `None` once the input is exhausted.
    fn next_byte(&mut self) -> Result<Option<u8>>;
}

/// Input adapter over an in-memory buffer or string.
#[derive(Debug, Clone)]
pub struct SliceInput<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceInput<'a> {
    /// Create an input adapter over a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> From<&'a str> for SliceInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ByteSource for SliceInput<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }
}

/// Input adapter over any [`Read`] implementation (files, sockets, stdin).
///
/// Reads are unbuffered one-byte pulls; wrap slow sources in a
/// [`std::io::BufReader`] before handing them over. The crate-level
/// `from_reader` entry point already does so.
#[derive(Debug)]
pub struct ReadInput<R> {
    inner: R,
}

impl<R: Read> ReadInput<R> {
    /// Create an input adapter over a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> ByteSource for ReadInput<R> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(JsonError::from(e)),
            }
        }
    }
}

/// One-character / one-span push contract the serializer writes to.
///
/// The associated error type lets infallible sinks (a plain `String`) erase
/// the error leg entirely: serializing into a string cannot fail and the
/// signature says so.
pub trait JsonSink {
    /// Sink-specific write failure.
    type Error;

    /// Write a single character.
    fn put_char(&mut self, c: char) -> std::result::Result<(), Self::Error>;

    /// Write a span of characters.
    fn write_str(&mut self, s: &str) -> std::result::Result<(), Self::Error>;
}

impl JsonSink for String {
    type Error = Infallible;

    fn put_char(&mut self, c: char) -> std::result::Result<(), Infallible> {
        self.push(c);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> std::result::Result<(), Infallible> {
        self.push_str(s);
        Ok(())
    }
}

/// Output adapter over any [`Write`] implementation.
#[derive(Debug)]
pub struct WriteSink<W> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    /// Create an output adapter over a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consume the adapter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> JsonSink for WriteSink<W> {
    type Error = JsonError;

    fn put_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.inner
            .write_all(c.encode_utf8(&mut buf).as_bytes())
            .map_err(JsonError::from)
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.inner.write_all(s.as_bytes()).map_err(JsonError::from)
    }
}
