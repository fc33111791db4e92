//! Random-access cursor over an in-memory byte buffer.
//!
//! Mirrors the `ReadCursor` found in RDP PDU decoding: every read either returns the full
//! span requested or fails outright, leaving the cursor position untouched. Call sites never
//! loop to "top up" a short read.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("end of input: requested {requested} byte(s) at offset {offset}, {available} available")]
    EndOfInput {
        offset: usize,
        requested: usize,
        available: usize,
    },
}

pub type CursorResult<T> = Result<T, CursorError>;

/// An immutable byte buffer with a mutable read position.
///
/// Invariant: `0 <= pos <= buffer.len()`.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// Sets the absolute read position.
    ///
    /// Setting beyond the buffer length is tolerated: it simply makes every subsequent read
    /// fail with [`CursorError::EndOfInput`] until the position is moved back in range.
    #[inline]
    pub fn set_offset(&mut self, offset: usize) {
        self.pos = offset;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    /// Reads exactly `n` bytes, advancing the cursor. Fails without advancing if fewer than
    /// `n` bytes remain.
    pub fn read(&mut self, n: usize) -> CursorResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(CursorError::EndOfInput {
                offset: self.pos,
                requested: n,
                available: self.remaining(),
            });
        }

        let bytes = &self.buffer[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_byte(&mut self) -> CursorResult<u8> {
        Ok(self.read(1)?[0])
    }

    pub fn read_u32_le(&mut self) -> CursorResult<u32> {
        let bytes = self.read(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().expect("4-byte slice")))
    }

    pub fn read_u64_le(&mut self) -> CursorResult<u64> {
        let bytes = self.read(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("8-byte slice")))
    }
}
