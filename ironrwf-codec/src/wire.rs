/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Low-level RWF wire helpers.
//!
//! Big-endian reads and writes, minimal-length integers, and the two length
//! prefix forms used by containers: the opt-byte prefix (1, 3, or 5 bytes)
//! and the reserved-bit 15-bit prefix (1 or 2 bytes).
//!
//! Readers follow the `(data, offset)` convention: they advance `offset` on
//! success and leave it untouched on error.

use ironrwf_core::{DecodeError, EncodeError, WireVersion};

/// Opt-byte marker for a following 16-bit length.
pub const OPT_BYTE_U16: u8 = 0xFE;

/// Opt-byte marker for a following 32-bit length.
pub const OPT_BYTE_U32: u8 = 0xFF;

/// Returns `Incomplete` unless `data[offset..]` holds at least `len` bytes.
#[inline]
fn require(data: &[u8], offset: usize, len: usize) -> Result<(), DecodeError> {
    let available = data.len().saturating_sub(offset);
    if available < len {
        return Err(DecodeError::Incomplete {
            needed: len,
            available,
        });
    }
    Ok(())
}

/// Returns `BufferOverflow` unless `dest` holds at least `len` bytes.
#[inline]
pub fn ensure_room(dest: &[u8], len: usize) -> Result<(), EncodeError> {
    if dest.len() < len {
        return Err(EncodeError::BufferOverflow {
            needed: len,
            available: dest.len(),
        });
    }
    Ok(())
}

/// Reads one byte.
///
/// # Errors
/// Returns `DecodeError::Incomplete` if no byte remains.
#[inline]
pub fn read_u8(data: &[u8], offset: &mut usize) -> Result<u8, DecodeError> {
    require(data, *offset, 1)?;
    let v = data[*offset];
    *offset += 1;
    Ok(v)
}

/// Reads a big-endian `u16`.
///
/// # Errors
/// Returns `DecodeError::Incomplete` if fewer than 2 bytes remain.
#[inline]
pub fn read_u16(data: &[u8], offset: &mut usize) -> Result<u16, DecodeError> {
    require(data, *offset, 2)?;
    let v = u16::from_be_bytes([data[*offset], data[*offset + 1]]);
    *offset += 2;
    Ok(v)
}

/// Reads a big-endian `u32`.
///
/// # Errors
/// Returns `DecodeError::Incomplete` if fewer than 4 bytes remain.
#[inline]
pub fn read_u32(data: &[u8], offset: &mut usize) -> Result<u32, DecodeError> {
    require(data, *offset, 4)?;
    let v = u32::from_be_bytes([
        data[*offset],
        data[*offset + 1],
        data[*offset + 2],
        data[*offset + 3],
    ]);
    *offset += 4;
    Ok(v)
}

/// Returns the number of bytes an opt-byte `u16` takes.
#[inline]
#[must_use]
pub const fn opt_byte_u16_len(value: u16) -> usize {
    if value < OPT_BYTE_U16 as u16 { 1 } else { 3 }
}

/// Writes an opt-byte `u16` at the start of `dest`.
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// Returns `EncodeError::BufferOverflow` if `dest` is too short.
pub fn put_opt_byte_u16(dest: &mut [u8], value: u16) -> Result<usize, EncodeError> {
    let len = opt_byte_u16_len(value);
    ensure_room(dest, len)?;
    if len == 1 {
        dest[0] = value as u8;
    } else {
        dest[0] = OPT_BYTE_U16;
        dest[1..3].copy_from_slice(&value.to_be_bytes());
    }
    Ok(len)
}

/// Reads an opt-byte `u16`.
///
/// # Errors
/// Returns `DecodeError::Incomplete` if the input ends early, or
/// `DecodeError::InvalidLengthPrefix` for the 32-bit marker.
pub fn read_opt_byte_u16(data: &[u8], offset: &mut usize) -> Result<u16, DecodeError> {
    let mut pos = *offset;
    let v = match read_u8(data, &mut pos)? {
        OPT_BYTE_U16 => read_u16(data, &mut pos)?,
        OPT_BYTE_U32 => return Err(DecodeError::InvalidLengthPrefix(OPT_BYTE_U32)),
        b => u16::from(b),
    };
    *offset = pos;
    Ok(v)
}

/// Returns the number of bytes an entry length prefix takes.
///
/// # Errors
/// Returns `EncodeError::InvalidData` if `len` exceeds what `version` can express.
pub fn length_prefix_len(len: usize, version: WireVersion) -> Result<usize, EncodeError> {
    if len < usize::from(OPT_BYTE_U16) {
        Ok(1)
    } else if len <= usize::from(u16::MAX) {
        Ok(3)
    } else if version.supports_long_lengths() && u32::try_from(len).is_ok() {
        Ok(5)
    } else {
        Err(EncodeError::InvalidData {
            reason: "entry length exceeds wire version limit",
        })
    }
}

/// Writes an entry length prefix at the start of `dest`.
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// Returns `EncodeError::BufferOverflow` if `dest` is too short, or
/// `EncodeError::InvalidData` if `len` exceeds what `version` can express.
pub fn put_length_prefix(
    dest: &mut [u8],
    len: usize,
    version: WireVersion,
) -> Result<usize, EncodeError> {
    let prefix = length_prefix_len(len, version)?;
    ensure_room(dest, prefix)?;
    match prefix {
        1 => dest[0] = len as u8,
        3 => {
            dest[0] = OPT_BYTE_U16;
            dest[1..3].copy_from_slice(&(len as u16).to_be_bytes());
        }
        _ => {
            dest[0] = OPT_BYTE_U32;
            dest[1..5].copy_from_slice(&(len as u32).to_be_bytes());
        }
    }
    Ok(prefix)
}

/// Reads an entry length prefix.
///
/// # Errors
/// Returns `DecodeError::Incomplete` if the input ends early, or
/// `DecodeError::InvalidLengthPrefix` if the 32-bit form is not permitted
/// by `version`.
pub fn read_length_prefix(
    data: &[u8],
    offset: &mut usize,
    version: WireVersion,
) -> Result<usize, DecodeError> {
    let mut pos = *offset;
    let len = match read_u8(data, &mut pos)? {
        OPT_BYTE_U16 => usize::from(read_u16(data, &mut pos)?),
        OPT_BYTE_U32 if version.supports_long_lengths() => read_u32(data, &mut pos)? as usize,
        OPT_BYTE_U32 => return Err(DecodeError::InvalidLengthPrefix(OPT_BYTE_U32)),
        b => usize::from(b),
    };
    *offset = pos;
    Ok(len)
}

/// Returns the number of bytes a reserved-bit 15-bit length takes.
#[inline]
#[must_use]
pub const fn res_bit_u15_len(value: u16) -> usize {
    if value < 0x80 { 1 } else { 2 }
}

/// Writes a reserved-bit 15-bit length at the start of `dest`.
///
/// # Errors
/// Returns `EncodeError::InvalidData` if `value` exceeds `0x7FFF`, or
/// `EncodeError::BufferOverflow` if `dest` is too short.
pub fn put_res_bit_u15(dest: &mut [u8], value: u16) -> Result<usize, EncodeError> {
    if value > 0x7FFF {
        return Err(EncodeError::InvalidData {
            reason: "length exceeds 15 bits",
        });
    }
    let len = res_bit_u15_len(value);
    ensure_room(dest, len)?;
    if len == 1 {
        dest[0] = value as u8;
    } else {
        dest[..2].copy_from_slice(&(value | 0x8000).to_be_bytes());
    }
    Ok(len)
}

/// Reads a reserved-bit 15-bit length.
///
/// # Errors
/// Returns `DecodeError::Incomplete` if the input ends early.
pub fn read_res_bit_u15(data: &[u8], offset: &mut usize) -> Result<u16, DecodeError> {
    let mut pos = *offset;
    let first = read_u8(data, &mut pos)?;
    let v = if first & 0x80 == 0 {
        u16::from(first)
    } else {
        let second = read_u8(data, &mut pos)?;
        (u16::from(first & 0x7F) << 8) | u16::from(second)
    };
    *offset = pos;
    Ok(v)
}

/// Returns the minimal number of bytes for a two's-complement `i64`.
#[must_use]
pub const fn int_len(value: i64) -> usize {
    let mut len: u32 = 1;
    while len < 8 {
        let shift = len * 8 - 1;
        let min = -(1i64 << shift);
        let max = (1i64 << shift) - 1;
        if value >= min && value <= max {
            return len as usize;
        }
        len += 1;
    }
    8
}

/// Returns the minimal number of bytes for a `u64`.
#[must_use]
pub const fn uint_len(value: u64) -> usize {
    let significant = 64 - value.leading_zeros() as usize;
    if significant == 0 {
        1
    } else {
        significant.div_ceil(8)
    }
}

/// Writes the low `len` bytes of `value` big-endian into `dest[..len]`.
///
/// The caller guarantees `1 <= len <= 8` and `dest.len() >= len`.
#[inline]
pub fn put_be(dest: &mut [u8], value: u64, len: usize) {
    let bytes = value.to_be_bytes();
    dest[..len].copy_from_slice(&bytes[8 - len..]);
}

/// Reads `src` as a big-endian two's-complement integer, sign-extending.
///
/// The caller guarantees `1 <= src.len() <= 8`.
#[must_use]
pub fn get_int(src: &[u8]) -> i64 {
    let mut v: i64 = if src[0] & 0x80 != 0 { -1 } else { 0 };
    for &b in src {
        v = (v << 8) | i64::from(b);
    }
    v
}

/// Reads `src` as a big-endian unsigned integer.
///
/// The caller guarantees `src.len() <= 8`.
#[must_use]
pub fn get_uint(src: &[u8]) -> u64 {
    src.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
