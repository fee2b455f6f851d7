/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Array decoder.
//!
//! The decoder holds only the header and the entry bytes. Each call to
//! [`ArrayDecoder::iter`] starts a fresh pass from entry zero, so repeated
//! passes always yield the same entries. A malformed entry is reported on
//! that entry alone and does not stop iteration, except where its length
//! cannot be trusted.

use crate::array::ArrayHeader;
use crate::config::DecoderConfig;
use crate::primitive::{decode, decode_fixed};
use crate::table::codec_for;
use crate::wire::read_length_prefix;
use bytes::Bytes;
use ironrwf_core::{DataCode, DecodeError, PrimitiveType, PrimitiveValue, WireVersion};
use smallvec::SmallVec;
use tracing::{trace, warn};

/// Outcome of loading one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Load {
    /// The entry decoded to a value.
    Value(PrimitiveValue),
    /// The entry is blank.
    Blank,
    /// The entry bytes are malformed.
    Error(DecodeError),
}

impl Load {
    /// Returns true for a blank entry.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Returns true for a malformed entry.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the decoded value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<PrimitiveValue> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the decode error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&DecodeError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// One entry of an array.
///
/// The value is decoded on each call to [`ArrayEntry::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEntry {
    index: usize,
    offset: usize,
    code: DataCode,
    primitive_type: PrimitiveType,
    fixed: bool,
    raw: Bytes,
    error: Option<DecodeError>,
}

impl ArrayEntry {
    /// Returns the zero-based position of this entry.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the offset of the entry within the entry bytes.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the data code.
    #[must_use]
    pub const fn code(&self) -> DataCode {
        self.code
    }

    /// Returns the entry type.
    #[must_use]
    pub const fn primitive_type(&self) -> PrimitiveType {
        self.primitive_type
    }

    /// Returns the payload bytes, excluding any length prefix.
    #[must_use]
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Decodes the entry.
    #[must_use]
    pub fn load(&self) -> Load {
        if let Some(err) = &self.error {
            return Load::Error(err.clone());
        }
        if self.code.is_blank() {
            return Load::Blank;
        }
        let result = if self.fixed {
            decode_fixed(self.primitive_type, &self.raw)
        } else {
            decode(self.primitive_type, &self.raw).map(|(value, _)| Some(value))
        };
        match result {
            Ok(Some(value)) => Load::Value(value),
            Ok(None) => Load::Blank,
            Err(err) => {
                warn!(
                    index = self.index,
                    offset = self.offset,
                    primitive_type = %self.primitive_type,
                    error = %err,
                    "array entry failed to decode"
                );
                Load::Error(err)
            }
        }
    }
}

/// Reader over one array container.
#[derive(Debug, Clone)]
pub struct ArrayDecoder {
    primitive_type: PrimitiveType,
    fixed_width: u16,
    count: usize,
    entries: Bytes,
    wire_version: WireVersion,
}

impl ArrayDecoder {
    /// Parses the header of `bytes` using the current wire version.
    ///
    /// # Errors
    /// Returns a `DecodeError` if the header is truncated or names an
    /// unknown type.
    pub fn new(bytes: &Bytes) -> Result<Self, DecodeError> {
        Self::with_config(bytes, DecoderConfig::default())
    }

    /// Parses the header of `bytes` under `config`.
    ///
    /// # Errors
    /// See [`Self::new`].
    pub fn with_config(bytes: &Bytes, config: DecoderConfig) -> Result<Self, DecodeError> {
        let mut offset = 0;
        let header = ArrayHeader::parse(bytes, &mut offset)?;
        Ok(Self::from_parts(
            header.primitive_type,
            header.fixed_width,
            usize::from(header.count),
            bytes.slice(offset..),
            config,
        ))
    }

    /// Creates a decoder from header fields and the entry bytes that follow
    /// the header.
    #[must_use]
    pub fn from_parts(
        primitive_type: PrimitiveType,
        fixed_width: u16,
        count: usize,
        entries: Bytes,
        config: DecoderConfig,
    ) -> Self {
        Self {
            primitive_type,
            fixed_width,
            count,
            entries,
            wire_version: config.wire_version,
        }
    }

    /// Returns true if entries use a fixed width.
    #[must_use]
    pub const fn has_fixed_width(&self) -> bool {
        self.fixed_width > 0
    }

    /// Returns the fixed width, zero for variable width.
    #[must_use]
    pub const fn fixed_width(&self) -> u16 {
        self.fixed_width
    }

    /// Returns the entry type.
    #[must_use]
    pub const fn primitive_type(&self) -> PrimitiveType {
        self.primitive_type
    }

    /// Returns the entry count declared by the header.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns the entry bytes.
    #[must_use]
    pub const fn entry_bytes(&self) -> &Bytes {
        &self.entries
    }

    /// Starts a new pass from the first entry.
    #[must_use]
    pub fn iter(&self) -> ArrayIter<'_> {
        ArrayIter {
            decoder: self,
            offset: 0,
            index: 0,
            done: false,
        }
    }

    /// Collects every entry of one pass.
    #[must_use]
    pub fn entries(&self) -> SmallVec<[ArrayEntry; 8]> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a ArrayDecoder {
    type Item = ArrayEntry;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over the entries of an [`ArrayDecoder`].
#[derive(Debug, Clone)]
pub struct ArrayIter<'a> {
    decoder: &'a ArrayDecoder,
    offset: usize,
    index: usize,
    done: bool,
}

impl ArrayIter<'_> {
    fn entry(&self, offset: usize, code: DataCode, raw: Bytes) -> ArrayEntry {
        ArrayEntry {
            index: self.index,
            offset,
            code,
            primitive_type: self.decoder.primitive_type,
            fixed: self.decoder.has_fixed_width(),
            raw,
            error: None,
        }
    }

    /// Builds an entry for bytes whose extent cannot be determined and ends
    /// the pass.
    fn truncated(&mut self, offset: usize, error: DecodeError) -> ArrayEntry {
        warn!(
            index = self.index,
            offset,
            error = %error,
            "array entry truncated"
        );
        self.done = true;
        let mut entry = self.entry(offset, DataCode::NoCode, self.decoder.entries.slice(offset..));
        entry.error = Some(error);
        entry
    }

    fn next_fixed(&mut self, width: usize) -> ArrayEntry {
        let decoder = self.decoder;
        let data = &decoder.entries;
        let start = self.offset;
        let available = data.len() - start;
        if available < width {
            return self.truncated(
                start,
                DecodeError::Incomplete {
                    needed: width,
                    available,
                },
            );
        }
        let raw = data.slice(start..start + width);
        self.offset += width;
        let blank = codec_for(decoder.primitive_type).blank_in_fixed_slot
            && raw.iter().all(|&b| b == 0);
        let code = if blank {
            DataCode::Blank
        } else {
            DataCode::NoCode
        };
        self.entry(start, code, raw)
    }

    fn next_variable(&mut self) -> ArrayEntry {
        let decoder = self.decoder;
        let data = &decoder.entries;
        let start = self.offset;
        let mut pos = start;
        let len = match read_length_prefix(data, &mut pos, decoder.wire_version) {
            Ok(len) => len,
            Err(err) => return self.truncated(start, err),
        };
        if len == 0 {
            self.offset = pos;
            return self.entry(start, DataCode::Blank, Bytes::new());
        }
        let available = data.len() - pos;
        if len > available {
            return self.truncated(
                start,
                DecodeError::Incomplete {
                    needed: len,
                    available,
                },
            );
        }
        let raw = data.slice(pos..pos + len);
        self.offset = pos + len;
        self.entry(start, DataCode::NoCode, raw)
    }
}

impl Iterator for ArrayIter<'_> {
    type Item = ArrayEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.index >= self.decoder.count {
            return None;
        }
        if self.offset >= self.decoder.entries.len() {
            self.done = true;
            return None;
        }
        let width = usize::from(self.decoder.fixed_width);
        let entry = if width > 0 {
            self.next_fixed(width)
        } else {
            self.next_variable()
        };
        trace!(index = entry.index, offset = entry.offset, "array entry");
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        (0, Some(self.decoder.count.saturating_sub(self.index)))
    }
}
