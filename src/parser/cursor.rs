//! Seekable sequential view over the container bytes

use winnow::{Parser, binary::le_u16, binary::le_u32, binary::le_u64, error::ContextError};

use crate::error::{CineError, Result};

/// Reads exact-length slices from a byte buffer (usually a memory map) and
/// runs `winnow` parsers over them. Every stage of the decode borrows the
/// same cursor; slices handed out borrow the buffer, not the cursor.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns exactly `n` bytes and advances past them.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CineError::TruncatedStream {
                offset: self.pos,
                requested: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Skips `n` bytes, failing like [`read`](Self::read) if they are not there.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read(n).map(|_| ())
    }

    /// Moves to an absolute offset. Seeking to exactly the end is allowed.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(CineError::SeekOutOfBounds {
                offset,
                len: self.data.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Reads `len` bytes and unpacks them with `parser`.
    ///
    /// The length is checked before the parser runs, so short input surfaces
    /// as [`CineError::TruncatedStream`] with the real request size.
    pub fn decode<O, P>(&mut self, len: usize, mut parser: P) -> Result<O>
    where
        P: Parser<&'a [u8], O, ContextError>,
    {
        let offset = self.pos;
        let mut input = self.read(len)?;
        parser
            .parse_next(&mut input)
            .map_err(|e| CineError::Layout {
                offset,
                reason: e.to_string(),
            })
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.decode(2, le_u16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.decode(4, le_u32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.decode(8, le_u64)
    }
}
