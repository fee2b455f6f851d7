/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! RMTES partial-update commands.
//!
//! A partial update is a sequence of control sequences and literal runs:
//! - `ESC [ <digits> 0x60` moves the cursor to an absolute position
//! - `ESC [ <digits> 0x62` repeats the byte before the cursor
//! - any other bytes are written at the cursor
//!
//! Escape sequences that do not start with `[` are character set controls.
//! They are written at the cursor unchanged but are never the source of a
//! repeat.

use bytes::{Bytes, BytesMut};
use ironrwf_core::RmtesError;
use memchr::{memchr, memchr_iter};

/// Escape byte.
pub const ESC: u8 = 0x1B;
/// Left bracket following `ESC` in a command.
pub const LBRKT: u8 = 0x5B;
/// Move-and-write terminator.
pub const MOVE_AND_WRITE: u8 = 0x60;
/// Repeat terminator.
pub const REPEAT: u8 = 0x62;

/// Second byte of the `ESC % 0` UTF-8 designation.
const UTF8_DESIGNATOR: u8 = 0x25;

/// One parsed element of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Set the cursor to an absolute position.
    MoveTo(usize),
    /// Write `n` copies of the last text byte written.
    Repeat(usize),
    /// Write text bytes at the cursor.
    Literal(&'a [u8]),
    /// Write a character set escape, `ESC` included, at the cursor.
    Escape(&'a [u8]),
}

/// Returns true if `update` starts with a cursor command.
#[inline]
#[must_use]
pub fn is_partial_update(update: &[u8]) -> bool {
    update.starts_with(&[ESC, LBRKT])
}

/// Returns true if `bytes` contains a complete cursor or repeat command
/// anywhere.
#[must_use]
pub fn has_partial_update(bytes: &[u8]) -> bool {
    memchr_iter(ESC, bytes).any(|pos| {
        let rest = &bytes[pos + 1..];
        if rest.first() != Some(&LBRKT) {
            return false;
        }
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        matches!(rest.get(1 + digits), Some(&(MOVE_AND_WRITE | REPEAT)))
    })
}

/// Iterator over the commands of a partial update.
///
/// Stops after the first error.
#[derive(Debug, Clone)]
pub struct Commands<'a> {
    input: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Commands<'a> {
    /// Creates a parser over `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    fn fail(&mut self, err: RmtesError) -> Option<Result<Command<'a>, RmtesError>> {
        self.failed = true;
        Some(Err(err))
    }

    fn parse_escape(&mut self) -> Option<Result<Command<'a>, RmtesError>> {
        let start = self.pos;
        let input = self.input;
        match input.get(start + 1) {
            None => self.fail(RmtesError::MalformedCommand { offset: start }),
            Some(&LBRKT) => self.parse_control(start),
            Some(&UTF8_DESIGNATOR) => {
                if input.get(start + 2) != Some(&b'0') {
                    return self.fail(RmtesError::MalformedCommand { offset: start });
                }
                self.pos = start + 3;
                Some(Ok(Command::Escape(&input[start..start + 3])))
            }
            Some(_) => {
                self.pos = start + 2;
                Some(Ok(Command::Escape(&input[start..start + 2])))
            }
        }
    }

    fn parse_control(&mut self, start: usize) -> Option<Result<Command<'a>, RmtesError>> {
        let input = self.input;
        let mut value: usize = 0;
        let mut pos = start + 2;
        loop {
            match input.get(pos) {
                Some(&b) if b.is_ascii_digit() => {
                    value = match value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(usize::from(b - b'0')))
                    {
                        Some(v) => v,
                        None => return self.fail(RmtesError::CountOverflow { offset: start }),
                    };
                    pos += 1;
                }
                Some(&MOVE_AND_WRITE) => {
                    self.pos = pos + 1;
                    return Some(Ok(Command::MoveTo(value)));
                }
                Some(&REPEAT) => {
                    self.pos = pos + 1;
                    return Some(Ok(Command::Repeat(value)));
                }
                _ => return self.fail(RmtesError::MalformedCommand { offset: start }),
            }
        }
    }
}

impl<'a> Iterator for Commands<'a> {
    type Item = Result<Command<'a>, RmtesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.input.len() {
            return None;
        }
        let rest = &self.input[self.pos..];
        match memchr(ESC, rest) {
            Some(0) => self.parse_escape(),
            Some(n) => {
                self.pos += n;
                Some(Ok(Command::Literal(&rest[..n])))
            }
            None => {
                self.pos = self.input.len();
                Some(Ok(Command::Literal(rest)))
            }
        }
    }
}

/// Builds partial-update byte strings.
///
/// # Example
/// ```
/// use ironrwf_rmtes::RmtesUpdateBuilder;
///
/// let update = RmtesUpdateBuilder::new().move_to(9).write(b" ").repeat(2).build();
/// assert_eq!(update.as_ref(), b"\x1b[9` \x1b[2b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RmtesUpdateBuilder {
    buf: BytesMut,
}

impl RmtesUpdateBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    fn control(&mut self, value: usize, terminator: u8) -> &mut Self {
        let mut digits = itoa::Buffer::new();
        self.buf.extend_from_slice(&[ESC, LBRKT]);
        self.buf.extend_from_slice(digits.format(value).as_bytes());
        self.buf.extend_from_slice(&[terminator]);
        self
    }

    /// Appends a move-and-write command.
    pub fn move_to(&mut self, position: usize) -> &mut Self {
        self.control(position, MOVE_AND_WRITE)
    }

    /// Appends a repeat command.
    pub fn repeat(&mut self, count: usize) -> &mut Self {
        self.control(count, REPEAT)
    }

    /// Appends literal bytes.
    pub fn write(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Returns the bytes built so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Takes the built update, leaving the builder empty.
    pub fn build(&mut self) -> Bytes {
        self.buf.split().freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Vec<Result<Command<'_>, RmtesError>> {
        Commands::new(input).collect()
    }

    #[test]
    fn test_move_and_write() {
        assert_eq!(
            parse(b"\x1b[0`12"),
            vec![Ok(Command::MoveTo(0)), Ok(Command::Literal(b"12"))]
        );
    }

    #[test]
    fn test_repeat_and_multiple_commands() {
        assert_eq!(
            parse(b"\x1b[9` \x1b[2b\x1b[15`xy"),
            vec![
                Ok(Command::MoveTo(9)),
                Ok(Command::Literal(b" ")),
                Ok(Command::Repeat(2)),
                Ok(Command::MoveTo(15)),
                Ok(Command::Literal(b"xy")),
            ]
        );
    }

    #[test]
    fn test_empty_digits_is_zero() {
        assert_eq!(parse(b"\x1b[`"), vec![Ok(Command::MoveTo(0))]);
    }

    #[test]
    fn test_charset_escapes_pass_through() {
        assert_eq!(
            parse(b"\x1b[3`\x1b(Ba\x1b%0b"),
            vec![
                Ok(Command::MoveTo(3)),
                Ok(Command::Escape(b"\x1b(")),
                Ok(Command::Literal(b"Ba")),
                Ok(Command::Escape(b"\x1b%0")),
                Ok(Command::Literal(b"b")),
            ]
        );
    }

    #[test]
    fn test_malformed_sequences() {
        assert_eq!(
            parse(b"\x1b[12x"),
            vec![Err(RmtesError::MalformedCommand { offset: 0 })]
        );
        assert_eq!(
            parse(b"\x1b[1`a\x1b"),
            vec![
                Ok(Command::MoveTo(1)),
                Ok(Command::Literal(b"a")),
                Err(RmtesError::MalformedCommand { offset: 5 }),
            ]
        );
        assert_eq!(
            parse(b"\x1b[4"),
            vec![Err(RmtesError::MalformedCommand { offset: 0 })]
        );
        assert_eq!(
            parse(b"\x1b%1"),
            vec![Err(RmtesError::MalformedCommand { offset: 0 })]
        );
    }

    #[test]
    fn test_count_overflow() {
        let input = b"\x1b[99999999999999999999999999`";
        assert_eq!(
            parse(input),
            vec![Err(RmtesError::CountOverflow { offset: 0 })]
        );
    }

    #[test]
    fn test_detectors() {
        assert!(is_partial_update(b"\x1b[0`a"));
        assert!(!is_partial_update(b"a\x1b[0`"));
        assert!(has_partial_update(b"a\x1b[0`"));
        assert!(has_partial_update(b"\x1b[12b"));
        assert!(!has_partial_update(b"\x1b(B plain"));
        assert!(!has_partial_update(b"\x1b[12"));
        assert!(!has_partial_update(b""));
    }

    #[test]
    fn test_builder_output_parses_back() {
        let mut builder = RmtesUpdateBuilder::new();
        builder.move_to(120).write(b"AB").repeat(3);
        let update = builder.build();
        assert!(builder.as_bytes().is_empty());
        assert_eq!(
            parse(&update),
            vec![
                Ok(Command::MoveTo(120)),
                Ok(Command::Literal(b"AB")),
                Ok(Command::Repeat(3)),
            ]
        );
    }
}
