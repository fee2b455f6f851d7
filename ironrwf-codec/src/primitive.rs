/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Primitive value codec.
//!
//! Standalone entry points that encode one [`PrimitiveValue`] into a byte
//! span and decode one payload back, dispatching through the capability
//! table in [`crate::table`].

use crate::scalar::real_len;
use crate::table::codec_for;
use crate::wire::{int_len, uint_len};
use bytes::Bytes;
use ironrwf_core::{DecodeError, EncodeError, PrimitiveType, PrimitiveValue};

/// Returns the minimal encoded payload length of `value`.
#[must_use]
pub fn encoded_len(value: &PrimitiveValue) -> usize {
    match value {
        PrimitiveValue::Int(v) => int_len(*v),
        PrimitiveValue::UInt(v) => uint_len(*v),
        PrimitiveValue::Float(_) => 4,
        PrimitiveValue::Double(_) => 8,
        PrimitiveValue::Real(v) => real_len(v),
        PrimitiveValue::Date(_) => 4,
        PrimitiveValue::Time(v) => v.encoded_len(),
        PrimitiveValue::DateTime(v) => v.encoded_len(),
        PrimitiveValue::Qos(v) => v.encoded_len(),
        PrimitiveValue::State(v) => v.encoded_len(),
        PrimitiveValue::Enum(v) => uint_len(u64::from(v.0)),
        PrimitiveValue::Buffer(b)
        | PrimitiveValue::Ascii(b)
        | PrimitiveValue::Utf8(b)
        | PrimitiveValue::Rmtes(b) => b.len(),
    }
}

/// Encodes `value` at the start of `dest`.
///
/// # Arguments
/// * `value` - The value to encode
/// * `dest` - Destination span
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// Returns `EncodeError::BufferOverflow` if `dest` is too small (nothing is
/// written), or `EncodeError::InvalidData` if the value has no wire form.
pub fn encode(value: &PrimitiveValue, dest: &mut [u8]) -> Result<usize, EncodeError> {
    (codec_for(value.primitive_type()).encode)(value, dest)
}

/// Encodes `value` into exactly `width` bytes at the start of `dest`.
///
/// # Errors
/// Returns `EncodeError::UnsupportedWidth` if the type has no representation
/// at `width`, `EncodeError::ValueTooLong` or `EncodeError::OutOfRange` if
/// the value does not fit, or `EncodeError::BufferOverflow` if `dest` is
/// shorter than `width`.
pub fn encode_fixed(
    value: &PrimitiveValue,
    width: usize,
    dest: &mut [u8],
) -> Result<(), EncodeError> {
    let codec = codec_for(value.primitive_type());
    if !codec.supports_fixed_width(width) {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    (codec.encode_fixed)(value, width, dest)
}

/// Decodes one payload of type `ty`.
///
/// Opaque and text values share storage with `src`.
///
/// # Returns
/// The decoded value and the number of bytes consumed.
///
/// # Errors
/// Returns `DecodeError::Incomplete` for an empty or truncated payload, or
/// an invalid-data variant for malformed bytes.
pub fn decode(ty: PrimitiveType, src: &Bytes) -> Result<(PrimitiveValue, usize), DecodeError> {
    let value = (codec_for(ty).decode)(src)?;
    Ok((value, src.len()))
}

/// Decodes one payload of type `ty` from a borrowed slice.
///
/// Opaque and text values are copied out of `src`.
///
/// # Errors
/// See [`decode`].
pub fn decode_slice(ty: PrimitiveType, src: &[u8]) -> Result<(PrimitiveValue, usize), DecodeError> {
    decode(ty, &Bytes::copy_from_slice(src))
}

/// Decodes one fixed-width slot of type `ty`.
///
/// Trailing zero padding is stripped from opaque and text slots, and an
/// all-zero slot of those types decodes as blank. This is lossy for opaque
/// data: trailing zero bytes of a `Buffer` value are dropped, and an empty
/// `Buffer` comes back as blank.
///
/// # Returns
/// `None` for a blank slot, otherwise the decoded value.
///
/// # Errors
/// See [`decode`].
pub fn decode_fixed(ty: PrimitiveType, slot: &Bytes) -> Result<Option<PrimitiveValue>, DecodeError> {
    let codec = codec_for(ty);
    if codec.blank_in_fixed_slot {
        let end = slot.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        if end == 0 {
            return Ok(None);
        }
        return (codec.decode)(&slot.slice(..end)).map(Some);
    }
    (codec.decode)(slot).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironrwf_core::{
        DataState, Date, DateTime, EnumValue, Qos, Real, RealHint, State, StreamState, Time,
    };

    fn roundtrip(value: PrimitiveValue) {
        let mut buf = vec![0u8; encoded_len(&value)];
        let written = encode(&value, &mut buf).unwrap();
        assert_eq!(written, buf.len(), "{value:?}");
        let (decoded, consumed) = decode(value.primitive_type(), &Bytes::from(buf)).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, written);
    }

    #[test]
    fn test_roundtrip_each_type() {
        roundtrip(PrimitiveValue::Int(-1_234_567_890_123));
        roundtrip(PrimitiveValue::UInt(u64::MAX));
        roundtrip(PrimitiveValue::Float(3.25));
        roundtrip(PrimitiveValue::Double(-0.125));
        roundtrip(PrimitiveValue::Real(Real::new(-987_654, RealHint::ExponentNeg4)));
        roundtrip(PrimitiveValue::Real(Real::new(3, RealHint::Fraction8)));
        roundtrip(PrimitiveValue::Real(Real::neg_infinity()));
        roundtrip(PrimitiveValue::Date(Date::new(1999, 12, 31)));
        roundtrip(PrimitiveValue::Time(Time::new(8, 0, 1).with_subsec(2, 3, 0)));
        roundtrip(PrimitiveValue::DateTime(DateTime::new(
            Date::new(2010, 6, 7),
            Time::new(23, 59, 0),
        )));
        roundtrip(PrimitiveValue::Qos(Qos::realtime().with_dynamic(true)));
        roundtrip(PrimitiveValue::State(
            State::new(StreamState::ClosedRecover, DataState::Suspect)
                .with_code(9)
                .with_text("retry later"),
        ));
        roundtrip(PrimitiveValue::Enum(EnumValue(300)));
        roundtrip(PrimitiveValue::Buffer(Bytes::from_static(&[0, 1, 2, 0])));
        roundtrip(PrimitiveValue::Ascii(Bytes::from_static(b"TRI.N")));
        roundtrip(PrimitiveValue::Utf8(Bytes::from_static("café".as_bytes())));
        roundtrip(PrimitiveValue::Rmtes(Bytes::from_static(b"\x1b%0ABC")));
    }

    #[test]
    fn test_encode_too_small() {
        let mut buf = [0u8; 2];
        let err = encode(&PrimitiveValue::Double(1.0), &mut buf).unwrap_err();
        assert_eq!(
            err,
            EncodeError::BufferOverflow {
                needed: 8,
                available: 2
            }
        );
    }

    #[test]
    fn test_decode_empty_is_incomplete() {
        let err = decode_slice(PrimitiveType::Int, &[]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Incomplete {
                needed: 1,
                available: 0
            }
        );
    }

    #[test]
    fn test_fixed_slot_blank_and_padding() {
        let slot = Bytes::from_static(b"AB\0\0");
        assert_eq!(
            decode_fixed(PrimitiveType::Ascii, &slot),
            Ok(Some(PrimitiveValue::Ascii(Bytes::from_static(b"AB"))))
        );
        let zero = Bytes::from_static(&[0, 0, 0, 0]);
        assert_eq!(decode_fixed(PrimitiveType::Buffer, &zero), Ok(None));
        assert_eq!(
            decode_fixed(PrimitiveType::Int, &zero),
            Ok(Some(PrimitiveValue::Int(0)))
        );
    }

    #[test]
    fn test_encode_fixed_rejects_real() {
        let mut buf = [0u8; 8];
        let value = PrimitiveValue::Real(Real::new(1, RealHint::Exponent0));
        assert_eq!(
            encode_fixed(&value, 8, &mut buf),
            Err(EncodeError::UnsupportedWidth { width: 8 })
        );
    }

    #[test]
    fn test_fixed_slot_drops_trailing_zero_bytes() {
        let mut slot = vec![0u8; 4];
        encode_fixed(&PrimitiveValue::Buffer(Bytes::from_static(b"\x01\x00")), 4, &mut slot).unwrap();
        assert_eq!(
            decode_fixed(PrimitiveType::Buffer, &Bytes::from(slot)),
            Ok(Some(PrimitiveValue::Buffer(Bytes::from_static(b"\x01"))))
        );

        let mut slot = vec![0u8; 4];
        encode_fixed(&PrimitiveValue::Buffer(Bytes::new()), 4, &mut slot).unwrap();
        assert_eq!(decode_fixed(PrimitiveType::Buffer, &Bytes::from(slot)), Ok(None));
    }
}
