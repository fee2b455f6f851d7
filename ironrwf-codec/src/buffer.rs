/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Growable encode buffer.
//!
//! The buffer keeps its whole capacity initialized so encoders can write
//! into a plain `&mut [u8]` span past the cursor. Growth is geometric and
//! preserves every byte before the cursor.

use bytes::{Bytes, BytesMut};
use ironrwf_core::EncodeError;
use tracing::debug;

/// Smallest capacity allocated on the first growth of an empty buffer.
const MIN_GROWTH: usize = 64;

/// Byte buffer with a write cursor and geometric growth.
#[derive(Debug)]
pub struct EncodeBuffer {
    /// Backing storage. Its length is the usable capacity.
    buf: BytesMut,
    /// Write position.
    pos: usize,
    /// Capacity multiplier on growth.
    growth_factor: usize,
}

impl EncodeBuffer {
    /// Creates a buffer with `capacity` usable bytes.
    ///
    /// # Arguments
    /// * `capacity` - Initial size in bytes, may be zero
    /// * `growth_factor` - Capacity multiplier on growth, at least 2
    #[must_use]
    pub fn new(capacity: usize, growth_factor: usize) -> Self {
        Self::from_bytes_mut(BytesMut::zeroed(capacity), growth_factor)
    }

    /// Wraps a caller-supplied buffer, using its full length as capacity.
    #[must_use]
    pub fn from_bytes_mut(buf: BytesMut, growth_factor: usize) -> Self {
        Self {
            buf,
            pos: 0,
            growth_factor: growth_factor.max(2),
        }
    }

    /// Returns the write position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the usable capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Returns the writable span after the cursor.
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..]
    }

    /// Moves the cursor forward by `n` bytes already written into the spare span.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }

    /// Overwrites bytes at an absolute position before the cursor.
    ///
    /// # Errors
    /// Returns `EncodeError::BufferOverflow` if the range extends past the cursor.
    pub fn patch(&mut self, at: usize, bytes: &[u8]) -> Result<(), EncodeError> {
        let end = at + bytes.len();
        if end > self.pos {
            return Err(EncodeError::BufferOverflow {
                needed: end,
                available: self.pos,
            });
        }
        self.buf[at..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Ensures at least `additional` bytes are writable after the cursor.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.pos + additional;
        let old = self.buf.len();
        if required <= old {
            return;
        }
        let new = old
            .saturating_mul(self.growth_factor)
            .max(required)
            .max(MIN_GROWTH);
        self.buf.resize(new, 0);
        debug!(old_capacity = old, new_capacity = new, "encode buffer grown");
    }

    /// Runs `write` against the spare span, growing and retrying while it
    /// reports `BufferOverflow`.
    ///
    /// `write` must not leave partial output behind when it fails. On
    /// success the cursor advances by the returned length.
    ///
    /// # Errors
    /// Returns any error from `write` other than `BufferOverflow`.
    pub fn write_with<F>(&mut self, mut write: F) -> Result<usize, EncodeError>
    where
        F: FnMut(&mut [u8]) -> Result<usize, EncodeError>,
    {
        loop {
            match write(self.spare_mut()) {
                Ok(n) => {
                    self.advance(n);
                    return Ok(n);
                }
                Err(EncodeError::BufferOverflow { needed, available }) if needed > available => {
                    self.reserve(needed);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Moves the cursor back to `pos`, discarding later bytes.
    pub fn truncate(&mut self, pos: usize) {
        self.pos = self.pos.min(pos);
    }

    /// Resets the cursor to zero, keeping capacity.
    pub fn clear(&mut self) {
        self.pos = 0;
    }

    /// Copies the written bytes out as an immutable buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    /// Returns the backing storage for reuse by a pool.
    #[must_use]
    pub fn into_inner(self) -> BytesMut {
        self.buf
    }
}

impl Default for EncodeBuffer {
    fn default() -> Self {
        Self::new(0, 2)
    }
}
