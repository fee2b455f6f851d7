/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Qos and State codecs.

use crate::wire::{ensure_room, put_res_bit_u15, read_res_bit_u15, read_u8, read_u16};
use bytes::Bytes;
use ironrwf_core::{
    DataState, DecodeError, EncodeError, PrimitiveType, Qos, Rate, State, StreamState, Timeliness,
};

/// Writes a Qos: a flags byte, then `time_info` and `rate_info` when present.
///
/// # Errors
/// Returns `EncodeError::InvalidData` if timeliness or rate is unspecified.
pub fn put_qos(dest: &mut [u8], value: Qos) -> Result<usize, EncodeError> {
    if value.timeliness == Timeliness::Unspecified || value.rate == Rate::Unspecified {
        return Err(EncodeError::InvalidData {
            reason: "qos timeliness and rate must be specified",
        });
    }
    let len = value.encoded_len();
    ensure_room(dest, len)?;
    dest[0] = ((value.timeliness as u8) << 5) | ((value.rate as u8) << 1) | u8::from(value.dynamic);
    let mut pos = 1;
    if value.has_time_info() {
        dest[pos..pos + 2].copy_from_slice(&value.time_info.to_be_bytes());
        pos += 2;
    }
    if value.has_rate_info() {
        dest[pos..pos + 2].copy_from_slice(&value.rate_info.to_be_bytes());
    }
    Ok(len)
}

/// Qos has no fixed-width representation.
pub fn put_qos_fixed(_dest: &mut [u8], _value: Qos, width: usize) -> Result<(), EncodeError> {
    Err(EncodeError::UnsupportedWidth { width })
}

/// Reads a Qos of 1, 3, or 5 bytes.
///
/// Unspecified timeliness or rate is corrupt, matching what [`put_qos`]
/// refuses to write.
pub fn get_qos_value(src: &[u8]) -> Result<Qos, DecodeError> {
    let mut offset = 0;
    let flags = read_u8(src, &mut offset)?;
    let timeliness = Timeliness::from_u8(flags >> 5)
        .filter(|t| *t != Timeliness::Unspecified)
        .ok_or(DecodeError::Corrupt {
            reason: "unknown qos timeliness",
        })?;
    let rate = Rate::from_u8((flags >> 1) & 0x0F)
        .filter(|r| *r != Rate::Unspecified)
        .ok_or(DecodeError::Corrupt {
            reason: "unknown qos rate",
        })?;
    let mut qos = Qos::new(timeliness, rate).with_dynamic(flags & 0x01 != 0);
    if qos.has_time_info() {
        qos.time_info = read_u16(src, &mut offset)?;
    }
    if qos.has_rate_info() {
        qos.rate_info = read_u16(src, &mut offset)?;
    }
    if offset != src.len() {
        return Err(DecodeError::InvalidLength {
            primitive_type: PrimitiveType::Qos,
            length: src.len(),
        });
    }
    Ok(qos)
}

/// Writes a State: a state byte, the code, then length-prefixed text.
///
/// # Errors
/// Returns `EncodeError::InvalidData` if the stream state is unspecified or
/// the text exceeds 32767 bytes.
pub fn put_state(dest: &mut [u8], value: &State) -> Result<usize, EncodeError> {
    if value.stream_state == StreamState::Unspecified {
        return Err(EncodeError::InvalidData {
            reason: "state stream state must be specified",
        });
    }
    let text_len = u16::try_from(value.text.len())
        .ok()
        .filter(|&n| usize::from(n) <= State::MAX_TEXT_LEN)
        .ok_or(EncodeError::InvalidData {
            reason: "state text exceeds 32767 bytes",
        })?;
    let len = value.encoded_len();
    ensure_room(dest, len)?;
    dest[0] = ((value.stream_state as u8) << 3) | value.data_state as u8;
    dest[1] = value.code;
    let prefix = put_res_bit_u15(&mut dest[2..], text_len)?;
    let start = 2 + prefix;
    dest[start..start + value.text.len()].copy_from_slice(&value.text);
    Ok(len)
}

/// State has no fixed-width representation.
pub fn put_state_fixed(_dest: &mut [u8], _value: &State, width: usize) -> Result<(), EncodeError> {
    Err(EncodeError::UnsupportedWidth { width })
}

/// Reads a State. The text shares storage with `src`.
pub fn get_state_value(src: &Bytes) -> Result<State, DecodeError> {
    let mut offset = 0;
    let flags = read_u8(src, &mut offset)?;
    let stream_state = StreamState::from_u8(flags >> 3).ok_or(DecodeError::Corrupt {
        reason: "unknown stream state",
    })?;
    let data_state = DataState::from_u8(flags & 0x07).ok_or(DecodeError::Corrupt {
        reason: "unknown data state",
    })?;
    let code = read_u8(src, &mut offset)?;
    let text_len = usize::from(read_res_bit_u15(src, &mut offset)?);
    let available = src.len() - offset;
    if text_len > available {
        return Err(DecodeError::Incomplete {
            needed: text_len,
            available,
        });
    }
    if text_len < available {
        return Err(DecodeError::InvalidLength {
            primitive_type: PrimitiveType::State,
            length: src.len(),
        });
    }
    Ok(State::new(stream_state, data_state)
        .with_code(code)
        .with_text(src.slice(offset..)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qos_layout() {
        let mut buf = [0u8; 5];
        let qos = Qos::new(Timeliness::Delayed, Rate::TimeConflated)
            .with_dynamic(true)
            .with_time_info(30)
            .with_rate_info(500);
        assert_eq!(put_qos(&mut buf, qos), Ok(5));
        assert_eq!(buf, [0x67, 0x00, 0x1E, 0x01, 0xF4]);
        assert_eq!(get_qos_value(&buf), Ok(qos));
    }

    #[test]
    fn test_qos_rejects_unspecified() {
        let mut buf = [0u8; 5];
        let qos = Qos::new(Timeliness::Unspecified, Rate::TickByTick);
        assert!(matches!(
            put_qos(&mut buf, qos),
            Err(EncodeError::InvalidData { .. })
        ));
        // timeliness 0, rate TickByTick
        assert!(matches!(
            get_qos_value(&[0x02]),
            Err(DecodeError::Corrupt { .. })
        ));
        // timeliness Realtime, rate 0
        assert!(matches!(
            get_qos_value(&[0x20]),
            Err(DecodeError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_qos_truncated() {
        assert!(matches!(
            get_qos_value(&[0x62]),
            Err(DecodeError::Incomplete { .. })
        ));
        assert!(matches!(
            get_qos_value(&[0x22, 0x00]),
            Err(DecodeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_state_roundtrip_shares_text() {
        let mut buf = [0u8; 32];
        let state = State::new(StreamState::Open, DataState::Ok)
            .with_code(0)
            .with_text("All is well");
        let len = put_state(&mut buf, &state).unwrap();
        assert_eq!(len, 14);
        assert_eq!(buf[0], (1 << 3) | 1);

        let bytes = Bytes::copy_from_slice(&buf[..len]);
        let decoded = get_state_value(&bytes).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(decoded.text.as_ptr(), bytes[3..].as_ptr());
    }

    #[test]
    fn test_state_corrupt_stream_state() {
        let bytes = Bytes::from_static(&[0x39, 0x00, 0x00]);
        assert!(matches!(
            get_state_value(&bytes),
            Err(DecodeError::Corrupt { .. })
        ));
    }
}
