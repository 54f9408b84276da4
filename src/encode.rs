//! # Canonical Codec Primitives
//!
//! The byte format shared by every record in this crate: fixed-width
//! little-endian integers, raw fixed-size arrays, and variable sequences
//! framed by a u32 little-endian element count. Fields are concatenated
//! in declaration order with no padding. Encoding is injective: one value,
//! one byte string.
//!
//! Encoding is done inline with `extend_from_slice` and `to_le_bytes` at
//! each record's own `encode_to`. Decoding goes through [`ByteReader`],
//! which bounds-checks every read and refuses length prefixes that could
//! not possibly be satisfied, so hostile input can neither overrun the
//! buffer nor drive an oversized allocation.

use thiserror::Error;

use crate::config::MAX_TRANSACTION_SIZE;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while decoding untrusted bytes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended before a declared field or sequence was complete.
    #[error("malformed bytes: {needed} more required at offset {offset}")]
    MalformedBytes {
        /// Read position at which the shortfall was detected.
        offset: usize,
        /// Number of bytes missing.
        needed: usize,
    },

    /// Bytes remained after the top-level record was fully consumed.
    #[error("{remaining} trailing bytes after the final field")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A length prefix declared more element bytes than the consensus
    /// transaction size cap allows.
    #[error("length prefix of {declared} elements ({bytes} bytes) exceeds the decode cap")]
    OversizedLength {
        /// Declared element count.
        declared: u32,
        /// Total bytes the declared count would occupy.
        bytes: u64,
    },
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// Bounds-checked sequential reader over a byte slice.
///
/// Every read either returns the requested bytes or a [`DecodeError`];
/// the reader never panics on hostile input. Call [`finish`](Self::finish)
/// after decoding a top-level record to reject trailing garbage.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Wraps a byte slice for decoding, positioned at the start.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::MalformedBytes {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a fixed-width little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a fixed-width little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(arr))
    }

    /// Reads a raw fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        Ok(arr)
    }

    /// Reads the u32 element count of a variable sequence whose elements
    /// are `elem_size` bytes wide, validating it before the caller
    /// allocates anything.
    ///
    /// The declared total must fit both the consensus size cap and the
    /// remaining buffer; an element count that fails the cap is
    /// [`DecodeError::OversizedLength`], one that fails the buffer is
    /// [`DecodeError::MalformedBytes`].
    pub fn read_length(&mut self, elem_size: usize) -> Result<usize, DecodeError> {
        let declared = self.read_u32()?;
        let bytes = declared as u64 * elem_size as u64;
        if bytes > MAX_TRANSACTION_SIZE as u64 {
            return Err(DecodeError::OversizedLength { declared, bytes });
        }
        if bytes > self.remaining() as u64 {
            return Err(DecodeError::MalformedBytes {
                offset: self.pos,
                needed: (bytes - self.remaining() as u64) as usize,
            });
        }
        Ok(declared as usize)
    }

    /// Consumes the reader, failing with [`DecodeError::TrailingBytes`]
    /// unless the whole buffer was read.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.remaining() != 0 {
            return Err(DecodeError::TrailingBytes {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
