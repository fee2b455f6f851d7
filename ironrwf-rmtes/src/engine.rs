/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Cached RMTES text value.
//!
//! [`RmtesBuffer`] holds the last full value of an RMTES field and patches
//! it in place as partial updates arrive. The UTF-16 and UTF-8 views widen
//! each cached byte to one code unit and are computed once per change.

use crate::command::{Command, Commands, is_partial_update};
use bytes::BytesMut;
use ironrwf_core::RmtesError;
use std::cell::OnceCell;
use std::fmt;
use tracing::debug;

/// Cached RMTES value with memoized text projections.
#[derive(Debug, Clone, Default)]
pub struct RmtesBuffer {
    cache: BytesMut,
    utf16: OnceCell<Vec<u16>>,
    utf8: OnceCell<String>,
}

impl RmtesBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `value` verbatim.
    #[must_use]
    pub fn from_bytes(value: &[u8]) -> Self {
        Self {
            cache: BytesMut::from(value),
            ..Self::default()
        }
    }

    /// Returns the cached bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cache
    }

    /// Returns the cached length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Applies an update.
    ///
    /// An update that starts with `ESC [` patches the cached value in
    /// place; anything else replaces it.
    ///
    /// # Errors
    /// Returns an `RmtesError` if a partial update is malformed, targets a
    /// position outside the cached value, or arrives with nothing cached.
    /// The cached value is unchanged on error.
    pub fn apply(&mut self, update: &[u8]) -> Result<(), RmtesError> {
        if is_partial_update(update) {
            self.apply_partial(update)?;
        } else {
            self.cache.clear();
            self.cache.extend_from_slice(update);
            debug!(len = update.len(), "rmtes full update applied");
        }
        self.invalidate();
        Ok(())
    }

    fn apply_partial(&mut self, update: &[u8]) -> Result<(), RmtesError> {
        if self.cache.is_empty() {
            return Err(RmtesError::PartialUpdateWithoutCache);
        }
        let mut work = self.cache.clone();
        let len = work.len();
        let mut cursor = 0usize;
        let mut commands = 0usize;
        let mut last_written: Option<u8> = None;

        for command in Commands::new(update) {
            match command? {
                Command::MoveTo(position) => {
                    if position > len {
                        return Err(RmtesError::PositionOutOfRange { position, len });
                    }
                    cursor = position;
                    commands += 1;
                }
                Command::Literal(bytes) => {
                    let end = target_end(cursor, bytes.len(), len)?;
                    work[cursor..end].copy_from_slice(bytes);
                    cursor = end;
                    if let Some(&byte) = bytes.last() {
                        last_written = Some(byte);
                    }
                }
                Command::Escape(bytes) => {
                    let end = target_end(cursor, bytes.len(), len)?;
                    work[cursor..end].copy_from_slice(bytes);
                    cursor = end;
                }
                Command::Repeat(0) => commands += 1,
                Command::Repeat(count) => {
                    let byte = last_written.ok_or(RmtesError::RepeatWithoutPrecedingByte)?;
                    let end = target_end(cursor, count, len)?;
                    work[cursor..end].fill(byte);
                    cursor = end;
                    commands += 1;
                }
            }
        }

        self.cache = work;
        debug!(len, commands, "rmtes partial update applied");
        Ok(())
    }

    /// Returns the cached value widened to UTF-16 code units.
    pub fn as_utf16(&self) -> &[u16] {
        self.utf16
            .get_or_init(|| self.cache.iter().map(|&b| u16::from(b)).collect())
    }

    /// Returns the cached value as text.
    pub fn as_utf8(&self) -> &str {
        self.utf8
            .get_or_init(|| String::from_utf16_lossy(self.as_utf16()))
    }

    /// Empties the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.utf16.take();
        self.utf8.take();
    }
}

/// Returns the end of a write of `count` bytes at `cursor`.
fn target_end(cursor: usize, count: usize, len: usize) -> Result<usize, RmtesError> {
    match cursor.checked_add(count) {
        Some(end) if end <= len => Ok(end),
        Some(end) => Err(RmtesError::PositionOutOfRange {
            position: end - 1,
            len,
        }),
        None => Err(RmtesError::PositionOutOfRange {
            position: usize::MAX,
            len,
        }),
    }
}

impl PartialEq for RmtesBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.cache == other.cache
    }
}

impl Eq for RmtesBuffer {}

impl fmt::Display for RmtesBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_utf8())
    }
}

impl From<&[u8]> for RmtesBuffer {
    fn from(value: &[u8]) -> Self {
        Self::from_bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RmtesUpdateBuilder;

    const ESC: u8 = 0x1B;

    fn populated() -> RmtesBuffer {
        let mut buffer = RmtesBuffer::new();
        buffer.apply(b"abcdefghijkl").unwrap();
        buffer
    }

    #[test]
    fn test_move_and_write_at_start() {
        let mut buffer = populated();
        buffer.apply(&[ESC, b'[', b'0', 0x60, b'1', b'2']).unwrap();
        assert_eq!(buffer.to_string(), "12cdefghijkl");
    }

    #[test]
    fn test_move_write_and_repeat() {
        let mut buffer = populated();
        buffer
            .apply(&[ESC, b'[', b'9', 0x60, b' ', ESC, b'[', b'2', 0x62])
            .unwrap();
        assert_eq!(buffer.to_string(), "abcdefghi   ");
    }

    #[test]
    fn test_repeat_uses_last_written_byte_after_move() {
        let mut buffer = populated();
        buffer.apply(b"\x1b[2`X\x1b[8`\x1b[2b").unwrap();
        assert_eq!(buffer.to_string(), "abXdefghXXkl");
    }

    #[test]
    fn test_repeat_ignores_charset_escape() {
        let mut buffer = populated();
        buffer.apply(b"\x1b[0`Q\x1b%0\x1b[2b").unwrap();
        assert_eq!(buffer.as_bytes(), b"Q\x1b%0QQghijkl");
    }

    #[test]
    fn test_empty_apply_gives_empty_projections() {
        let mut buffer = RmtesBuffer::new();
        buffer.apply(&[]).unwrap();
        assert_eq!(buffer.as_utf16().len(), 0);
        assert_eq!(buffer.as_utf8(), "");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_projections_on_new_buffer() {
        let buffer = RmtesBuffer::new();
        assert!(buffer.as_utf16().is_empty());
        assert_eq!(buffer.to_string(), "");
    }

    #[test]
    fn test_full_update_replaces() {
        let mut buffer = populated();
        buffer.apply(b"xyz").unwrap();
        assert_eq!(buffer.as_bytes(), b"xyz");
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_bytes_widen_one_to_one() {
        let buffer = RmtesBuffer::from_bytes(&[b'A', 0xE9, 0x7F]);
        assert_eq!(buffer.as_utf16(), &[0x41, 0xE9, 0x7F]);
        assert_eq!(buffer.as_utf8(), "A\u{e9}\u{7f}");
    }

    #[test]
    fn test_projections_refresh_after_apply() {
        let mut buffer = populated();
        assert_eq!(buffer.as_utf8(), "abcdefghijkl");
        let update = RmtesUpdateBuilder::new().move_to(11).write(b"L").build();
        buffer.apply(&update).unwrap();
        assert_eq!(buffer.as_utf8(), "abcdefghijkL");
        assert_eq!(buffer.as_utf16()[11], u16::from(b'L'));
    }

    #[test]
    fn test_partial_update_without_cache() {
        let mut buffer = RmtesBuffer::new();
        assert_eq!(
            buffer.apply(b"\x1b[0`ab"),
            Err(RmtesError::PartialUpdateWithoutCache)
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_repeat_before_any_write() {
        let mut buffer = populated();
        assert_eq!(
            buffer.apply(b"\x1b[0`\x1b[3b"),
            Err(RmtesError::RepeatWithoutPrecedingByte)
        );
        assert_eq!(
            buffer.apply(b"\x1b[5`\x1b%0\x1b[1b"),
            Err(RmtesError::RepeatWithoutPrecedingByte)
        );
        assert_eq!(buffer.as_bytes(), b"abcdefghijkl");
    }

    #[test]
    fn test_out_of_range_leaves_cache_untouched() {
        let mut buffer = populated();
        assert_eq!(
            buffer.apply(b"\x1b[10`XYZ"),
            Err(RmtesError::PositionOutOfRange {
                position: 12,
                len: 12
            })
        );
        assert_eq!(
            buffer.apply(b"\x1b[13`"),
            Err(RmtesError::PositionOutOfRange {
                position: 13,
                len: 12
            })
        );
        assert_eq!(
            buffer.apply(b"\x1b[11`Z\x1b[1b"),
            Err(RmtesError::PositionOutOfRange {
                position: 12,
                len: 12
            })
        );
        assert_eq!(buffer.to_string(), "abcdefghijkl");
    }

    #[test]
    fn test_malformed_update_leaves_cache_untouched() {
        let mut buffer = populated();
        assert_eq!(
            buffer.apply(b"\x1b[2`XY\x1b[5q"),
            Err(RmtesError::MalformedCommand { offset: 6 })
        );
        assert_eq!(buffer.as_bytes(), b"abcdefghijkl");
    }

    #[test]
    fn test_charset_escape_written_in_place() {
        let mut buffer = populated();
        buffer.apply(b"\x1b[4`\x1b(B").unwrap();
        assert_eq!(buffer.as_bytes(), b"abcd\x1b(Bhijkl");
    }

    #[test]
    fn test_clone_is_snapshot() {
        let mut buffer = populated();
        let snapshot = buffer.clone();
        buffer.apply(b"\x1b[0`ZZ").unwrap();
        assert_eq!(snapshot.to_string(), "abcdefghijkl");
        assert_eq!(buffer.to_string(), "ZZcdefghijkl");
        assert_ne!(snapshot, buffer);
    }

    #[test]
    fn test_clear_matches_new() {
        let mut buffer = populated();
        let _ = buffer.as_utf16();
        buffer.clear();
        assert_eq!(buffer, RmtesBuffer::new());
        assert!(buffer.as_utf16().is_empty());
        assert_eq!(buffer.as_utf8(), "");
        assert_eq!(
            buffer.apply(b"\x1b[0`a"),
            Err(RmtesError::PartialUpdateWithoutCache)
        );
    }
}
