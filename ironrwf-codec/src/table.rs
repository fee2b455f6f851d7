/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Per-type codec capability table.
//!
//! Every primitive type has exactly one [`TypeCodec`] entry describing how it
//! is encoded and decoded and which fixed widths it accepts. Container
//! encoders and decoders consult this table instead of branching on type.

use crate::scalar::{
    get_date_value, get_datetime_value, get_double_value, get_enum_value, get_float_value,
    get_int_value, get_real_value, get_time_value, get_uint_value, put_date, put_date_fixed,
    put_datetime, put_datetime_fixed, put_double, put_double_fixed, put_enum, put_enum_fixed,
    put_float, put_float_fixed, put_int, put_int_fixed, put_real, put_real_fixed, put_time,
    put_time_fixed, put_uint, put_uint_fixed,
};
use crate::status::{get_qos_value, get_state_value, put_qos, put_qos_fixed, put_state, put_state_fixed};
use crate::wire::ensure_room;
use bytes::Bytes;
use ironrwf_core::{DecodeError, EncodeError, EnumValue, PrimitiveType, PrimitiveValue};

/// Fixed widths a type may be encoded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedWidths {
    /// The type has no fixed-width representation.
    Unsupported,
    /// Only the listed widths.
    OneOf(&'static [usize]),
    /// Any width of at least one byte.
    Any,
}

impl FixedWidths {
    /// Returns true if `width` is permitted.
    #[must_use]
    pub fn allows(&self, width: usize) -> bool {
        match self {
            Self::Unsupported => false,
            Self::OneOf(widths) => widths.contains(&width),
            Self::Any => width > 0,
        }
    }

    /// Returns true if some fixed width is permitted.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Encodes a value's minimal payload into `dest`, returning bytes written.
pub type EncodeFn = fn(&PrimitiveValue, &mut [u8]) -> Result<usize, EncodeError>;

/// Encodes a value into exactly `width` bytes at the start of `dest`.
pub type EncodeFixedFn = fn(&PrimitiveValue, usize, &mut [u8]) -> Result<(), EncodeError>;

/// Decodes a complete payload.
pub type DecodeFn = fn(&Bytes) -> Result<PrimitiveValue, DecodeError>;

/// Capability entry for one primitive type.
#[derive(Debug, Clone, Copy)]
pub struct TypeCodec {
    /// Type this entry describes.
    pub primitive_type: PrimitiveType,
    /// Permitted fixed widths.
    pub fixed_widths: FixedWidths,
    /// True if an all-zero fixed slot stands for blank.
    pub blank_in_fixed_slot: bool,
    /// Variable-width encoder.
    pub encode: EncodeFn,
    /// Fixed-width encoder.
    pub encode_fixed: EncodeFixedFn,
    /// Decoder.
    pub decode: DecodeFn,
}

impl TypeCodec {
    /// Returns true if this type can be encoded at `width`.
    #[must_use]
    pub fn supports_fixed_width(&self, width: usize) -> bool {
        self.fixed_widths.allows(width)
    }
}

#[inline]
fn mismatch(expected: PrimitiveType, value: &PrimitiveValue) -> EncodeError {
    EncodeError::TypeMismatch {
        expected,
        actual: value.primitive_type(),
    }
}

fn put_bytes(dest: &mut [u8], value: &[u8]) -> Result<usize, EncodeError> {
    ensure_room(dest, value.len())?;
    dest[..value.len()].copy_from_slice(value);
    Ok(value.len())
}

fn put_bytes_fixed(dest: &mut [u8], value: &[u8], width: usize) -> Result<(), EncodeError> {
    if width == 0 {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    if value.len() > width {
        return Err(EncodeError::ValueTooLong {
            length: value.len(),
            width,
        });
    }
    ensure_room(dest, width)?;
    dest[..value.len()].copy_from_slice(value);
    dest[value.len()..width].fill(0);
    Ok(())
}

#[inline]
fn get_bytes_value(src: &Bytes) -> Result<Bytes, DecodeError> {
    Ok(src.clone())
}

#[inline]
fn put_enum_value(dest: &mut [u8], value: EnumValue) -> Result<usize, EncodeError> {
    put_enum(dest, value.0)
}

#[inline]
fn put_enum_value_fixed(dest: &mut [u8], value: EnumValue, width: usize) -> Result<(), EncodeError> {
    put_enum_fixed(dest, value.0, width)
}

#[inline]
fn get_enum(src: &[u8]) -> Result<EnumValue, DecodeError> {
    get_enum_value(src).map(EnumValue)
}

/// Builds a table entry for a `Copy` value type.
macro_rules! copy_codec {
    ($variant:ident, $fixed:expr, $put:path, $put_fixed:path, $get:path) => {
        TypeCodec {
            primitive_type: PrimitiveType::$variant,
            fixed_widths: $fixed,
            blank_in_fixed_slot: false,
            encode: |value, dest| match value {
                PrimitiveValue::$variant(v) => $put(dest, *v),
                other => Err(mismatch(PrimitiveType::$variant, other)),
            },
            encode_fixed: |value, width, dest| match value {
                PrimitiveValue::$variant(v) => $put_fixed(dest, *v, width),
                other => Err(mismatch(PrimitiveType::$variant, other)),
            },
            decode: |src| $get(src).map(PrimitiveValue::$variant),
        }
    };
}

/// Builds a table entry for a type encoded from a borrowed value.
macro_rules! ref_codec {
    ($variant:ident, $fixed:expr, $blank_fixed:expr, $put:path, $put_fixed:path, $get:path) => {
        TypeCodec {
            primitive_type: PrimitiveType::$variant,
            fixed_widths: $fixed,
            blank_in_fixed_slot: $blank_fixed,
            encode: |value, dest| match value {
                PrimitiveValue::$variant(v) => $put(dest, v),
                other => Err(mismatch(PrimitiveType::$variant, other)),
            },
            encode_fixed: |value, width, dest| match value {
                PrimitiveValue::$variant(v) => $put_fixed(dest, v, width),
                other => Err(mismatch(PrimitiveType::$variant, other)),
            },
            decode: |src| $get(src).map(PrimitiveValue::$variant),
        }
    };
}

const INT_WIDTHS: FixedWidths = FixedWidths::OneOf(&[1, 2, 4, 8]);

static CODECS: [TypeCodec; 15] = [
    copy_codec!(Int, INT_WIDTHS, put_int, put_int_fixed, get_int_value),
    copy_codec!(UInt, INT_WIDTHS, put_uint, put_uint_fixed, get_uint_value),
    copy_codec!(Float, FixedWidths::OneOf(&[4]), put_float, put_float_fixed, get_float_value),
    copy_codec!(Double, FixedWidths::OneOf(&[8]), put_double, put_double_fixed, get_double_value),
    copy_codec!(Real, FixedWidths::Unsupported, put_real, put_real_fixed, get_real_value),
    copy_codec!(Date, FixedWidths::OneOf(&[4]), put_date, put_date_fixed, get_date_value),
    copy_codec!(Time, FixedWidths::OneOf(&[3, 5, 7, 8]), put_time, put_time_fixed, get_time_value),
    copy_codec!(
        DateTime,
        FixedWidths::OneOf(&[7, 9, 11, 12]),
        put_datetime,
        put_datetime_fixed,
        get_datetime_value
    ),
    copy_codec!(Qos, FixedWidths::Unsupported, put_qos, put_qos_fixed, get_qos_value),
    ref_codec!(State, FixedWidths::Unsupported, false, put_state, put_state_fixed, get_state_value),
    copy_codec!(Enum, FixedWidths::OneOf(&[1, 2]), put_enum_value, put_enum_value_fixed, get_enum),
    ref_codec!(Buffer, FixedWidths::Any, true, put_bytes, put_bytes_fixed, get_bytes_value),
    ref_codec!(Ascii, FixedWidths::Any, true, put_bytes, put_bytes_fixed, get_bytes_value),
    ref_codec!(Utf8, FixedWidths::Any, true, put_bytes, put_bytes_fixed, get_bytes_value),
    ref_codec!(Rmtes, FixedWidths::Any, true, put_bytes, put_bytes_fixed, get_bytes_value),
];

/// Returns the table entry for `ty`.
#[must_use]
pub fn codec_for(ty: PrimitiveType) -> &'static TypeCodec {
    let index = match ty {
        PrimitiveType::Int => 0,
        PrimitiveType::UInt => 1,
        PrimitiveType::Float => 2,
        PrimitiveType::Double => 3,
        PrimitiveType::Real => 4,
        PrimitiveType::Date => 5,
        PrimitiveType::Time => 6,
        PrimitiveType::DateTime => 7,
        PrimitiveType::Qos => 8,
        PrimitiveType::State => 9,
        PrimitiveType::Enum => 10,
        PrimitiveType::Buffer => 11,
        PrimitiveType::Ascii => 12,
        PrimitiveType::Utf8 => 13,
        PrimitiveType::Rmtes => 14,
    };
    &CODECS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_types() {
        for ty in PrimitiveType::ALL {
            assert_eq!(codec_for(ty).primitive_type, ty);
        }
    }

    #[test]
    fn test_fixed_width_capabilities() {
        assert!(!codec_for(PrimitiveType::Real).fixed_widths.is_supported());
        assert!(!codec_for(PrimitiveType::Qos).fixed_widths.is_supported());
        assert!(!codec_for(PrimitiveType::State).fixed_widths.is_supported());
        assert!(codec_for(PrimitiveType::Int).supports_fixed_width(4));
        assert!(!codec_for(PrimitiveType::Int).supports_fixed_width(3));
        assert!(codec_for(PrimitiveType::Buffer).supports_fixed_width(17));
        assert!(codec_for(PrimitiveType::Time).supports_fixed_width(5));
    }

    #[test]
    fn test_blank_slot_only_for_bytes() {
        for ty in PrimitiveType::ALL {
            assert_eq!(codec_for(ty).blank_in_fixed_slot, ty.is_bytes());
        }
    }

    #[test]
    fn test_encode_type_mismatch() {
        let codec = codec_for(PrimitiveType::Int);
        let mut buf = [0u8; 8];
        assert_eq!(
            (codec.encode)(&PrimitiveValue::UInt(1), &mut buf),
            Err(EncodeError::TypeMismatch {
                expected: PrimitiveType::Int,
                actual: PrimitiveType::UInt,
            })
        );
    }

    #[test]
    fn test_bytes_fixed_pads_with_zeros() {
        let codec = codec_for(PrimitiveType::Ascii);
        let mut buf = [0xAAu8; 6];
        let value = PrimitiveValue::Ascii(Bytes::from_static(b"ABC"));
        assert_eq!((codec.encode_fixed)(&value, 5, &mut buf), Ok(()));
        assert_eq!(buf, [b'A', b'B', b'C', 0, 0, 0xAA]);
        assert_eq!(
            (codec.encode_fixed)(&value, 2, &mut buf),
            Err(EncodeError::ValueTooLong {
                length: 3,
                width: 2
            })
        );
    }
}
