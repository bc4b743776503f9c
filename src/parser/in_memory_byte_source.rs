//! Tree input held completely in memory.

use crate::parser::byte_source::ByteSource;
use std::io::{self, Read};
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// Owns all bytes of an input and a cursor into them.
///
/// ```
/// use nwkit::parser::{ByteSource, InMemoryByteSource};
///
/// let mut source = InMemoryByteSource::from("(A,B);");
/// assert_eq!(source.next_byte(), Some(b'('));
/// assert_eq!(source.upcoming(3), b"A,B");
/// assert_eq!(source.position(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryByteSource {
    bytes: Vec<u8>,
    cursor: usize,
}

impl InMemoryByteSource {
    /// Reads the file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        std::fs::read(path).map(Self::from)
    }

    /// Drains `reader`, e.g. standard input.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from(bytes))
    }

    /// Number of bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }
}

impl From<Vec<u8>> for InMemoryByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        InMemoryByteSource { bytes, cursor: 0 }
    }
}

impl From<&str> for InMemoryByteSource {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes().to_vec())
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.cursor += 1;
        }
        byte
    }

    fn upcoming(&self, k: usize) -> &[u8] {
        let rest = self.bytes.get(self.cursor..).unwrap_or_default();
        &rest[..k.min(rest.len())]
    }

    #[inline]
    fn position(&self) -> usize {
        self.cursor
    }

    fn is_eof(&self) -> bool {
        self.remaining() == 0
    }
}
