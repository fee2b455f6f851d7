/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Scalar primitive codecs.
//!
//! Each type has a variable-width writer (`put_*`) that emits the minimal
//! payload, a fixed-width writer (`put_*_fixed`) that fills an exact slot,
//! and a reader (`get_*`) that decodes a complete payload. Writers report
//! `BufferOverflow` without touching `dest` when it is too short.

use crate::wire::{ensure_room, get_int, get_uint, int_len, put_be, uint_len};
use ironrwf_core::{Date, DateTime, DecodeError, EncodeError, PrimitiveType, Real, RealHint, Time};

/// Format byte of a blank Real.
pub const REAL_BLANK: u8 = 0x20;

const REAL_RESERVED_BITS: u8 = 0xC0;

#[inline]
fn invalid_length(primitive_type: PrimitiveType, length: usize) -> DecodeError {
    DecodeError::InvalidLength {
        primitive_type,
        length,
    }
}

#[inline]
fn require_non_empty(src: &[u8]) -> Result<(), DecodeError> {
    if src.is_empty() {
        return Err(DecodeError::Incomplete {
            needed: 1,
            available: 0,
        });
    }
    Ok(())
}

// Int

/// Writes the minimal two's-complement form of `value`.
pub fn put_int(dest: &mut [u8], value: i64) -> Result<usize, EncodeError> {
    let len = int_len(value);
    ensure_room(dest, len)?;
    put_be(dest, value as u64, len);
    Ok(len)
}

/// Writes `value` into a slot of exactly `width` bytes.
pub fn put_int_fixed(dest: &mut [u8], value: i64, width: usize) -> Result<(), EncodeError> {
    if !matches!(width, 1 | 2 | 4 | 8) {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    if int_len(value) > width {
        return Err(EncodeError::OutOfRange { width });
    }
    ensure_room(dest, width)?;
    put_be(dest, value as u64, width);
    Ok(())
}

/// Reads a 1 to 8 byte two's-complement integer.
pub fn get_int_value(src: &[u8]) -> Result<i64, DecodeError> {
    require_non_empty(src)?;
    if src.len() > 8 {
        return Err(invalid_length(PrimitiveType::Int, src.len()));
    }
    Ok(get_int(src))
}

// UInt

/// Writes the minimal unsigned form of `value`.
pub fn put_uint(dest: &mut [u8], value: u64) -> Result<usize, EncodeError> {
    let len = uint_len(value);
    ensure_room(dest, len)?;
    put_be(dest, value, len);
    Ok(len)
}

/// Writes `value` into a slot of exactly `width` bytes.
pub fn put_uint_fixed(dest: &mut [u8], value: u64, width: usize) -> Result<(), EncodeError> {
    if !matches!(width, 1 | 2 | 4 | 8) {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    if uint_len(value) > width {
        return Err(EncodeError::OutOfRange { width });
    }
    ensure_room(dest, width)?;
    put_be(dest, value, width);
    Ok(())
}

/// Reads a 1 to 8 byte unsigned integer.
pub fn get_uint_value(src: &[u8]) -> Result<u64, DecodeError> {
    require_non_empty(src)?;
    if src.len() > 8 {
        return Err(invalid_length(PrimitiveType::UInt, src.len()));
    }
    Ok(get_uint(src))
}

// Enum

/// Writes the minimal unsigned form of an enum value.
pub fn put_enum(dest: &mut [u8], value: u16) -> Result<usize, EncodeError> {
    put_uint(dest, u64::from(value))
}

/// Writes an enum value into a 1 or 2 byte slot.
pub fn put_enum_fixed(dest: &mut [u8], value: u16, width: usize) -> Result<(), EncodeError> {
    if !matches!(width, 1 | 2) {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    put_uint_fixed(dest, u64::from(value), width)
}

/// Reads a 1 or 2 byte enum value.
pub fn get_enum_value(src: &[u8]) -> Result<u16, DecodeError> {
    require_non_empty(src)?;
    if src.len() > 2 {
        return Err(invalid_length(PrimitiveType::Enum, src.len()));
    }
    Ok(get_uint(src) as u16)
}

// Float and Double

/// Writes a 4-byte IEEE-754 float.
pub fn put_float(dest: &mut [u8], value: f32) -> Result<usize, EncodeError> {
    ensure_room(dest, 4)?;
    dest[..4].copy_from_slice(&value.to_bits().to_be_bytes());
    Ok(4)
}

/// Writes a float into a 4-byte slot.
pub fn put_float_fixed(dest: &mut [u8], value: f32, width: usize) -> Result<(), EncodeError> {
    if width != 4 {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    put_float(dest, value).map(|_| ())
}

/// Reads a 4-byte IEEE-754 float.
pub fn get_float_value(src: &[u8]) -> Result<f32, DecodeError> {
    require_non_empty(src)?;
    let bytes: [u8; 4] = src
        .try_into()
        .map_err(|_| invalid_length(PrimitiveType::Float, src.len()))?;
    Ok(f32::from_bits(u32::from_be_bytes(bytes)))
}

/// Writes an 8-byte IEEE-754 double.
pub fn put_double(dest: &mut [u8], value: f64) -> Result<usize, EncodeError> {
    ensure_room(dest, 8)?;
    dest[..8].copy_from_slice(&value.to_bits().to_be_bytes());
    Ok(8)
}

/// Writes a double into an 8-byte slot.
pub fn put_double_fixed(dest: &mut [u8], value: f64, width: usize) -> Result<(), EncodeError> {
    if width != 8 {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    put_double(dest, value).map(|_| ())
}

/// Reads an 8-byte IEEE-754 double.
pub fn get_double_value(src: &[u8]) -> Result<f64, DecodeError> {
    require_non_empty(src)?;
    let bytes: [u8; 8] = src
        .try_into()
        .map_err(|_| invalid_length(PrimitiveType::Double, src.len()))?;
    Ok(f64::from_bits(u64::from_be_bytes(bytes)))
}

// Real

/// Returns the encoded length of a Real.
#[must_use]
pub fn real_len(value: &Real) -> usize {
    if value.is_blank || value.hint.is_special() {
        1
    } else {
        1 + int_len(value.value)
    }
}

/// Writes a Real as a format byte followed by a minimal mantissa.
///
/// Blank writes the single byte `0x20`; infinities and NaN write only
/// their hint.
pub fn put_real(dest: &mut [u8], value: Real) -> Result<usize, EncodeError> {
    let len = real_len(&value);
    ensure_room(dest, len)?;
    if value.is_blank {
        dest[0] = REAL_BLANK;
    } else {
        dest[0] = value.hint.as_u8();
        if len > 1 {
            put_be(&mut dest[1..], value.value as u64, len - 1);
        }
    }
    Ok(len)
}

/// Reals have no fixed-width representation.
pub fn put_real_fixed(_dest: &mut [u8], _value: Real, width: usize) -> Result<(), EncodeError> {
    Err(EncodeError::UnsupportedWidth { width })
}

/// Reads a Real.
///
/// The format byte must have its two top bits clear. Infinities and NaN
/// are a lone format byte. Any other format byte with bit `0x20` set is
/// blank, and so is a lone format byte carrying an ordinary hint. Hint 31
/// is invalid.
pub fn get_real_value(src: &[u8]) -> Result<Real, DecodeError> {
    require_non_empty(src)?;
    let format = src[0];
    if format & REAL_RESERVED_BITS != 0 {
        return Err(DecodeError::Corrupt {
            reason: "reserved bits set in real format byte",
        });
    }
    if let Some(hint) = RealHint::from_u8(format).filter(|hint| hint.is_special()) {
        if src.len() != 1 {
            return Err(invalid_length(PrimitiveType::Real, src.len()));
        }
        return Ok(Real::new(0, hint));
    }
    if format & REAL_BLANK != 0 || src.len() == 1 {
        return Ok(Real::blank());
    }
    let hint = RealHint::from_u8(format).ok_or(DecodeError::InvalidHint(format))?;
    let mantissa = &src[1..];
    if mantissa.len() > 8 {
        return Err(invalid_length(PrimitiveType::Real, src.len()));
    }
    Ok(Real::new(get_int(mantissa), hint))
}

// Date

/// Writes a 4-byte date.
pub fn put_date(dest: &mut [u8], value: Date) -> Result<usize, EncodeError> {
    if !value.is_valid() {
        return Err(EncodeError::InvalidData {
            reason: "date out of range",
        });
    }
    ensure_room(dest, 4)?;
    dest[0] = value.day;
    dest[1] = value.month;
    dest[2..4].copy_from_slice(&value.year.to_be_bytes());
    Ok(4)
}

/// Writes a date into a 4-byte slot.
pub fn put_date_fixed(dest: &mut [u8], value: Date, width: usize) -> Result<(), EncodeError> {
    if width != 4 {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    put_date(dest, value).map(|_| ())
}

/// Reads a 4-byte date.
pub fn get_date_value(src: &[u8]) -> Result<Date, DecodeError> {
    require_non_empty(src)?;
    if src.len() != 4 {
        return Err(invalid_length(PrimitiveType::Date, src.len()));
    }
    Ok(Date::new(u16::from_be_bytes([src[2], src[3]]), src[1], src[0]))
}

// Time

#[inline]
const fn is_time_layout(len: usize) -> bool {
    matches!(len, 2 | 3 | 5 | 7 | 8)
}

/// Writes the time layout of exactly `len` bytes. `dest` must hold `len` bytes.
fn put_time_layout(dest: &mut [u8], value: &Time, len: usize) {
    dest[0] = value.hour;
    dest[1] = value.minute;
    if len >= 3 {
        dest[2] = value.second;
    }
    if len >= 5 {
        dest[3..5].copy_from_slice(&value.millisecond.to_be_bytes());
    }
    match len {
        7 => dest[5..7].copy_from_slice(&value.microsecond.to_be_bytes()),
        8 => {
            let packed = ((value.nanosecond & 0xFF00) << 3) | value.microsecond;
            dest[5..7].copy_from_slice(&packed.to_be_bytes());
            dest[7] = value.nanosecond as u8;
        }
        _ => {}
    }
}

fn check_time(value: &Time) -> Result<(), EncodeError> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(EncodeError::InvalidData {
            reason: "time out of range",
        })
    }
}

/// Writes a time using the shortest layout that holds its non-zero fields.
pub fn put_time(dest: &mut [u8], value: Time) -> Result<usize, EncodeError> {
    check_time(&value)?;
    let len = value.encoded_len();
    ensure_room(dest, len)?;
    put_time_layout(dest, &value, len);
    Ok(len)
}

/// Writes a time into a slot of 3, 5, 7, or 8 bytes.
pub fn put_time_fixed(dest: &mut [u8], value: Time, width: usize) -> Result<(), EncodeError> {
    if !matches!(width, 3 | 5 | 7 | 8) {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    check_time(&value)?;
    let length = value.encoded_len();
    if length > width {
        return Err(EncodeError::ValueTooLong { length, width });
    }
    ensure_room(dest, width)?;
    put_time_layout(dest, &value, width);
    Ok(())
}

/// Reads a time of 2, 3, 5, 7, or 8 bytes.
///
/// A shorter layout whose present fields all carry blank markers decodes
/// as a fully blank time.
pub fn get_time_value(src: &[u8]) -> Result<Time, DecodeError> {
    require_non_empty(src)?;
    let len = src.len();
    if !is_time_layout(len) {
        return Err(invalid_length(PrimitiveType::Time, len));
    }
    let mut t = Time::new(src[0], src[1], 0);
    if len >= 3 {
        t.second = src[2];
    }
    if len >= 5 {
        t.millisecond = u16::from_be_bytes([src[3], src[4]]);
    }
    match len {
        7 => t.microsecond = u16::from_be_bytes([src[5], src[6]]),
        8 => {
            let packed = u16::from_be_bytes([src[5], src[6]]);
            t.microsecond = packed & 0x07FF;
            t.nanosecond = ((packed & 0x3800) >> 3) + u16::from(src[7]);
        }
        _ => {}
    }
    let blank = t.hour == Time::BLANK_HMS
        && t.minute == Time::BLANK_HMS
        && (len < 3 || t.second == Time::BLANK_HMS)
        && (len < 5 || t.millisecond == Time::BLANK_MILLI)
        && (len < 7 || t.microsecond == Time::BLANK_SUB_MILLI)
        && (len < 8 || t.nanosecond == Time::BLANK_SUB_MILLI);
    if blank {
        return Ok(Time::blank());
    }
    Ok(t)
}

// DateTime

/// Writes a date followed by the shortest time layout.
pub fn put_datetime(dest: &mut [u8], value: DateTime) -> Result<usize, EncodeError> {
    check_time(&value.time)?;
    let len = value.encoded_len();
    ensure_room(dest, len)?;
    put_date(dest, value.date)?;
    put_time_layout(&mut dest[4..], &value.time, len - 4);
    Ok(len)
}

/// Writes a date-time into a slot of 7, 9, 11, or 12 bytes.
pub fn put_datetime_fixed(dest: &mut [u8], value: DateTime, width: usize) -> Result<(), EncodeError> {
    if !matches!(width, 7 | 9 | 11 | 12) {
        return Err(EncodeError::UnsupportedWidth { width });
    }
    check_time(&value.time)?;
    let length = value.encoded_len();
    if length > width {
        return Err(EncodeError::ValueTooLong { length, width });
    }
    ensure_room(dest, width)?;
    put_date(dest, value.date)?;
    put_time_layout(&mut dest[4..], &value.time, width - 4);
    Ok(())
}

/// Reads a date-time of 6, 7, 9, 11, or 12 bytes.
pub fn get_datetime_value(src: &[u8]) -> Result<DateTime, DecodeError> {
    require_non_empty(src)?;
    if src.len() < 6 || !is_time_layout(src.len() - 4) {
        return Err(invalid_length(PrimitiveType::DateTime, src.len()));
    }
    let date = get_date_value(&src[..4])?;
    let time = get_time_value(&src[4..])?;
    Ok(DateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_minimal_encoding() {
        let mut buf = [0u8; 8];
        assert_eq!(put_int(&mut buf, 0), Ok(1));
        assert_eq!(buf[0], 0x00);
        assert_eq!(put_int(&mut buf, -1), Ok(1));
        assert_eq!(buf[0], 0xFF);
        assert_eq!(put_int(&mut buf, 300), Ok(2));
        assert_eq!(&buf[..2], &[0x01, 0x2C]);
        assert_eq!(get_int_value(&buf[..2]), Ok(300));
    }

    #[test]
    fn test_int_fixed_range() {
        let mut buf = [0u8; 8];
        assert_eq!(put_int_fixed(&mut buf, -2, 2), Ok(()));
        assert_eq!(&buf[..2], &[0xFF, 0xFE]);
        assert_eq!(get_int_value(&buf[..2]), Ok(-2));
        assert_eq!(
            put_int_fixed(&mut buf, 128, 1),
            Err(EncodeError::OutOfRange { width: 1 })
        );
        assert_eq!(
            put_int_fixed(&mut buf, 1, 3),
            Err(EncodeError::UnsupportedWidth { width: 3 })
        );
    }

    #[test]
    fn test_uint_fixed_keeps_high_bit() {
        let mut buf = [0u8; 4];
        assert_eq!(put_uint_fixed(&mut buf, 0xFFFF_FFFF, 4), Ok(()));
        assert_eq!(get_uint_value(&buf), Ok(0xFFFF_FFFF));
        assert_eq!(
            put_uint_fixed(&mut buf, 256, 1),
            Err(EncodeError::OutOfRange { width: 1 })
        );
    }

    #[test]
    fn test_float_lengths() {
        let mut buf = [0u8; 8];
        assert_eq!(put_float(&mut buf, 1.5), Ok(4));
        assert_eq!(get_float_value(&buf[..4]), Ok(1.5));
        assert_eq!(
            get_float_value(&buf[..3]),
            Err(DecodeError::InvalidLength {
                primitive_type: PrimitiveType::Float,
                length: 3
            })
        );
        assert_eq!(put_double(&mut buf, -2.25), Ok(8));
        assert_eq!(get_double_value(&buf), Ok(-2.25));
    }

    #[test]
    fn test_real_encoding() {
        let mut buf = [0u8; 9];
        let real = Real::new(12345, RealHint::ExponentNeg2);
        assert_eq!(put_real(&mut buf, real), Ok(3));
        assert_eq!(&buf[..3], &[12, 0x30, 0x39]);
        assert_eq!(get_real_value(&buf[..3]), Ok(real));

        assert_eq!(put_real(&mut buf, Real::blank()), Ok(1));
        assert_eq!(buf[0], REAL_BLANK);
        assert_eq!(get_real_value(&buf[..1]), Ok(Real::blank()));

        assert_eq!(put_real(&mut buf, Real::nan()), Ok(1));
        assert_eq!(get_real_value(&buf[..1]), Ok(Real::nan()));
    }

    #[test]
    fn test_real_corrupt_policy() {
        assert!(matches!(
            get_real_value(&[0x4E, 0x01]),
            Err(DecodeError::Corrupt { .. })
        ));
        assert!(matches!(
            get_real_value(&[0x80]),
            Err(DecodeError::Corrupt { .. })
        ));
        assert_eq!(get_real_value(&[31, 0x01]), Err(DecodeError::InvalidHint(31)));
        assert!(matches!(
            get_real_value(&[33, 0x01]),
            Err(DecodeError::InvalidLength { .. })
        ));
        assert!(matches!(
            get_real_value(&[14, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
            Err(DecodeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_real_blank_forms() {
        assert_eq!(get_real_value(&[REAL_BLANK, 0x01]), Ok(Real::blank()));
        assert_eq!(get_real_value(&[0x2E]), Ok(Real::blank()));
        assert_eq!(get_real_value(&[0x2E, 0x05]), Ok(Real::blank()));
        assert_eq!(get_real_value(&[0x3F, 0x01, 0x02]), Ok(Real::blank()));
        assert_eq!(get_real_value(&[0x0E]), Ok(Real::blank()));
        assert_eq!(get_real_value(&[31]), Ok(Real::blank()));
        assert_eq!(get_real_value(&[0x0E, 0x05]), Ok(Real::new(5, RealHint::Exponent0)));
    }

    #[test]
    fn test_blank_real_with_stray_hint_round_trips() {
        let mut buf = [0u8; 9];
        let stray = Real {
            value: 9,
            hint: RealHint::Fraction8,
            is_blank: true,
        };
        assert_eq!(put_real(&mut buf, stray), Ok(1));
        assert_eq!(buf[0], REAL_BLANK);
        assert_eq!(get_real_value(&buf[..1]), Ok(stray));
    }

    #[test]
    fn test_date_layout() {
        let mut buf = [0u8; 4];
        assert_eq!(put_date(&mut buf, Date::new(2024, 3, 15)), Ok(4));
        assert_eq!(buf, [15, 3, 0x07, 0xE8]);
        assert_eq!(get_date_value(&buf), Ok(Date::new(2024, 3, 15)));
        assert_eq!(get_date_value(&[0, 0, 0, 0]), Ok(Date::blank()));
        assert!(put_date(&mut buf, Date::new(2024, 2, 30)).is_err());
    }

    #[test]
    fn test_time_nanosecond_packing() {
        let mut buf = [0u8; 8];
        let t = Time::new(23, 59, 59).with_subsec(999, 999, 999);
        assert_eq!(put_time(&mut buf, t), Ok(8));
        assert_eq!(get_time_value(&buf), Ok(t));

        let blank = Time::blank();
        assert_eq!(put_time(&mut buf, blank), Ok(8));
        assert_eq!(get_time_value(&buf), Ok(blank));
        assert_eq!(get_time_value(&[255, 255]), Ok(Time::blank()));
    }

    #[test]
    fn test_time_fixed_widths() {
        let mut buf = [0u8; 8];
        let t = Time::new(10, 20, 30);
        assert_eq!(put_time_fixed(&mut buf, t, 5), Ok(()));
        assert_eq!(get_time_value(&buf[..5]), Ok(t));
        let precise = t.with_subsec(5, 0, 0);
        assert_eq!(
            put_time_fixed(&mut buf, precise, 3),
            Err(EncodeError::ValueTooLong {
                length: 5,
                width: 3
            })
        );
        assert_eq!(
            put_time_fixed(&mut buf, t, 4),
            Err(EncodeError::UnsupportedWidth { width: 4 })
        );
    }

    #[test]
    fn test_datetime_roundtrip_lengths() {
        let mut buf = [0u8; 12];
        let dt = DateTime::new(Date::new(2024, 1, 2), Time::new(3, 4, 5).with_subsec(6, 0, 0));
        assert_eq!(put_datetime(&mut buf, dt), Ok(9));
        assert_eq!(get_datetime_value(&buf[..9]), Ok(dt));
        assert!(get_datetime_value(&buf[..8]).is_err());
        assert_eq!(put_datetime_fixed(&mut buf, dt, 12), Ok(()));
        assert_eq!(get_datetime_value(&buf), Ok(dt));
    }

    #[test]
    fn test_put_does_not_write_on_overflow() {
        let mut buf = [0xAAu8; 1];
        assert_eq!(
            put_double(&mut buf, 1.0),
            Err(EncodeError::BufferOverflow {
                needed: 8,
                available: 1
            })
        );
        assert_eq!(buf, [0xAA]);
    }
}
