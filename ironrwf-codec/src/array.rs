/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Array header and finalized array bytes.
//!
//! Wire layout: `[primitive type u8][item length opt-byte u16][count u16]`
//! followed by the entries. An item length of zero selects variable-width
//! entries.

use crate::config::DecoderConfig;
use crate::decoder::ArrayDecoder;
use crate::wire::{opt_byte_u16_len, put_opt_byte_u16, read_opt_byte_u16, read_u8, read_u16};
use bytes::Bytes;
use ironrwf_core::{DecodeError, EncodeError, PrimitiveType};

/// Array container metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayHeader {
    /// Type shared by every entry.
    pub primitive_type: PrimitiveType,
    /// Bytes per entry, zero for variable width.
    pub fixed_width: u16,
    /// Number of entries.
    pub count: u16,
}

impl ArrayHeader {
    /// Creates a header.
    #[must_use]
    pub const fn new(primitive_type: PrimitiveType, fixed_width: u16, count: u16) -> Self {
        Self {
            primitive_type,
            fixed_width,
            count,
        }
    }

    /// Returns the offset of the count field from the start of the header.
    #[must_use]
    pub const fn count_offset(&self) -> usize {
        1 + opt_byte_u16_len(self.fixed_width)
    }

    /// Returns the encoded header length.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.count_offset() + 2
    }

    /// Writes the header at the start of `dest`.
    ///
    /// # Errors
    /// Returns `EncodeError::BufferOverflow` if `dest` is too short.
    pub fn write(&self, dest: &mut [u8]) -> Result<usize, EncodeError> {
        let len = self.encoded_len();
        crate::wire::ensure_room(dest, len)?;
        dest[0] = self.primitive_type.as_u8();
        let n = put_opt_byte_u16(&mut dest[1..], self.fixed_width)?;
        dest[1 + n..len].copy_from_slice(&self.count.to_be_bytes());
        Ok(len)
    }

    /// Parses a header.
    ///
    /// # Errors
    /// Returns `DecodeError::Incomplete` if the header is truncated, or
    /// `DecodeError::InvalidPrimitiveType` for an unknown entry type.
    pub fn parse(data: &[u8], offset: &mut usize) -> Result<Self, DecodeError> {
        let mut pos = *offset;
        let raw_type = read_u8(data, &mut pos)?;
        let primitive_type =
            PrimitiveType::from_u8(raw_type).ok_or(DecodeError::InvalidPrimitiveType(raw_type))?;
        let fixed_width = read_opt_byte_u16(data, &mut pos)?;
        let count = read_u16(data, &mut pos)?;
        *offset = pos;
        Ok(Self::new(primitive_type, fixed_width, count))
    }
}

/// Finalized array wire bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArray {
    bytes: Bytes,
    header: ArrayHeader,
}

impl EncodedArray {
    pub(crate) fn new(bytes: Bytes, header: ArrayHeader) -> Self {
        Self { bytes, header }
    }

    /// Parses the header of existing array bytes.
    ///
    /// # Errors
    /// Returns a `DecodeError` if the header cannot be parsed.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, DecodeError> {
        let mut offset = 0;
        let header = ArrayHeader::parse(&bytes, &mut offset)?;
        Ok(Self { bytes, header })
    }

    /// Returns the header.
    #[must_use]
    pub const fn header(&self) -> &ArrayHeader {
        &self.header
    }

    /// Returns the entry type.
    #[must_use]
    pub const fn primitive_type(&self) -> PrimitiveType {
        self.header.primitive_type
    }

    /// Returns the fixed width, zero for variable width.
    #[must_use]
    pub const fn fixed_width(&self) -> u16 {
        self.header.fixed_width
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.header.count as usize
    }

    /// Returns the complete wire bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consumes the array, returning its wire bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Returns the entry bytes after the header.
    #[must_use]
    pub fn entry_bytes(&self) -> Bytes {
        let start = self.header.encoded_len().min(self.bytes.len());
        self.bytes.slice(start..)
    }

    /// Returns a decoder over this array using the current wire version.
    #[must_use]
    pub fn decoder(&self) -> ArrayDecoder {
        self.decoder_with(DecoderConfig::default())
    }

    /// Returns a decoder over this array using `config`.
    #[must_use]
    pub fn decoder_with(&self, config: DecoderConfig) -> ArrayDecoder {
        ArrayDecoder::from_parts(
            self.header.primitive_type,
            self.header.fixed_width,
            self.count(),
            self.entry_bytes(),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = ArrayHeader::new(PrimitiveType::Ascii, 0, 3);
        let mut buf = [0u8; 8];
        assert_eq!(header.write(&mut buf), Ok(4));
        assert_eq!(&buf[..4], &[17, 0, 0, 3]);

        let mut offset = 0;
        assert_eq!(ArrayHeader::parse(&buf, &mut offset), Ok(header));
        assert_eq!(offset, 4);
    }

    #[test]
    fn test_header_wide_fixed_width() {
        let header = ArrayHeader::new(PrimitiveType::Buffer, 300, 1);
        assert_eq!(header.count_offset(), 4);
        let mut buf = [0u8; 6];
        assert_eq!(header.write(&mut buf), Ok(6));
        assert_eq!(buf, [16, 0xFE, 0x01, 0x2C, 0x00, 0x01]);
    }

    #[test]
    fn test_header_unknown_type() {
        let mut offset = 0;
        assert_eq!(
            ArrayHeader::parse(&[15, 0, 0, 0], &mut offset),
            Err(DecodeError::InvalidPrimitiveType(15))
        );
    }

    #[test]
    fn test_encoded_array_from_bytes() {
        let bytes = Bytes::from_static(&[3, 0, 0, 1, 1, 42]);
        let array = EncodedArray::from_bytes(bytes).unwrap();
        assert_eq!(array.primitive_type(), PrimitiveType::Int);
        assert_eq!(array.count(), 1);
        assert_eq!(array.entry_bytes().as_ref(), &[1, 42]);
    }
}
