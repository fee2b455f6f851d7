/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Stream and data state.

use bytes::Bytes;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum StreamState {
    /// Not specified; not encodable.
    #[default]
    Unspecified = 0,
    /// Stream is open.
    Open = 1,
    /// Single response, no updates.
    NonStreaming = 2,
    /// Closed, may be reopened.
    ClosedRecover = 3,
    /// Closed.
    Closed = 4,
    /// Moved to another service or name.
    Redirected = 5,
}

impl StreamState {
    /// Creates a stream state from its 5-bit wire value.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        <Self as FromPrimitive>::from_u8(value)
    }
}

/// Data state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum DataState {
    /// Unchanged from the previous state.
    #[default]
    NoChange = 0,
    /// Data is good.
    Ok = 1,
    /// Data may be stale.
    Suspect = 2,
}

impl DataState {
    /// Creates a data state from its 3-bit wire value.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        <Self as FromPrimitive>::from_u8(value)
    }
}

/// Stream and data state with a status code and text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct State {
    /// Stream state.
    pub stream_state: StreamState,
    /// Data state.
    pub data_state: DataState,
    /// Status code.
    pub code: u8,
    /// Status text.
    pub text: Bytes,
}

impl State {
    /// Maximum status text length representable on the wire.
    pub const MAX_TEXT_LEN: usize = 0x7FFF;

    /// Creates a state without text.
    #[must_use]
    pub const fn new(stream_state: StreamState, data_state: DataState) -> Self {
        Self {
            stream_state,
            data_state,
            code: 0,
            text: Bytes::new(),
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_code(mut self, code: u8) -> Self {
        self.code = code;
        self
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<Bytes>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the wire length.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let prefix = if self.text.len() < 0x80 { 1 } else { 2 };
        2 + prefix + self.text.len()
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for DataState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / code: {} / text: {}",
            self.stream_state,
            self.data_state,
            self.code,
            String::from_utf8_lossy(&self.text)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_encoded_len() {
        let s = State::new(StreamState::Open, DataState::Ok);
        assert_eq!(s.encoded_len(), 3);
        let s = s.with_text(vec![b'x'; 200]);
        assert_eq!(s.encoded_len(), 204);
    }

    #[test]
    fn test_state_display() {
        let s = State::new(StreamState::Closed, DataState::Suspect)
            .with_code(2)
            .with_text("not found");
        assert_eq!(s.to_string(), "Closed / Suspect / code: 2 / text: not found");
    }

    #[test]
    fn test_state_enum_wire_values() {
        assert_eq!(StreamState::from_u8(5), Some(StreamState::Redirected));
        assert_eq!(StreamState::from_u8(6), None);
        assert_eq!(DataState::from_u8(2), Some(DataState::Suspect));
    }
}
