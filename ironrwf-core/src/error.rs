/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types for the IronRwf OMM codec.
//!
//! This module provides a unified error hierarchy using `thiserror`. Build-time
//! misuse of an encoder surfaces as [`UsageError`] at the offending call, while
//! malformed wire bytes surface as [`DecodeError`] values that decoders attach
//! to individual entries instead of aborting a whole container.

use crate::types::PrimitiveType;
use thiserror::Error;

/// Result type alias using [`RwfError`] as the error type.
pub type Result<T> = std::result::Result<T, RwfError>;

/// Top-level error type for all IronRwf operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RwfError {
    /// Error during primitive or container decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during primitive encoding.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Encoder API misuse.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// Error while applying RMTES content.
    #[error("rmtes error: {0}")]
    Rmtes(#[from] RmtesError),
}

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorCode {
    /// The bytes end before the value does.
    IncompleteData,
    /// The bytes are present but do not form a valid value.
    InvalidData,
}

/// Errors that occur while decoding RWF bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before the declared or required length.
    #[error("incomplete data: need {needed} bytes, have {available}")]
    Incomplete {
        /// Bytes needed to complete decoding.
        needed: usize,
        /// Bytes available in the input.
        available: usize,
    },

    /// The payload length is not one the primitive type can carry.
    #[error("invalid length {length} for {primitive_type}")]
    InvalidLength {
        /// Type being decoded.
        primitive_type: PrimitiveType,
        /// Offending payload length.
        length: usize,
    },

    /// Real hint outside the defined range.
    #[error("invalid real hint: {0}")]
    InvalidHint(u8),

    /// Unknown primitive type in a container header.
    #[error("invalid primitive type: {0}")]
    InvalidPrimitiveType(u8),

    /// Length prefix marker not permitted by the wire version.
    #[error("invalid length prefix marker: {0:#04x}")]
    InvalidLengthPrefix(u8),

    /// Bytes are structurally corrupt.
    #[error("corrupt data: {reason}")]
    Corrupt {
        /// Description of the corruption.
        reason: &'static str,
    },
}

impl DecodeError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn code(&self) -> DecodeErrorCode {
        match self {
            Self::Incomplete { .. } => DecodeErrorCode::IncompleteData,
            _ => DecodeErrorCode::InvalidData,
        }
    }
}

/// Errors that occur while encoding a primitive value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Destination buffer is too small for the value.
    #[error("buffer overflow: need {needed} bytes, have {available}")]
    BufferOverflow {
        /// Bytes needed to complete encoding.
        needed: usize,
        /// Bytes available in the destination.
        available: usize,
    },

    /// The value has no valid wire representation.
    #[error("invalid data: {reason}")]
    InvalidData {
        /// Description of why the value is invalid.
        reason: &'static str,
    },

    /// The value's type has no representation at this fixed width.
    #[error("unsupported fixed width: {width}")]
    UnsupportedWidth {
        /// Requested fixed width.
        width: usize,
    },

    /// The value needs more bytes than the fixed width.
    #[error("value too long: {length} bytes exceeds fixed width {width}")]
    ValueTooLong {
        /// Minimal encoded length of the value.
        length: usize,
        /// Requested fixed width.
        width: usize,
    },

    /// The numeric value does not fit the fixed width.
    #[error("value out of range for fixed width {width}")]
    OutOfRange {
        /// Requested fixed width.
        width: usize,
    },

    /// The value's variant does not match the codec it was passed to.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the codec handles.
        expected: PrimitiveType,
        /// Type of the value passed in.
        actual: PrimitiveType,
    },
}

/// Classification of a [`UsageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageErrorCode {
    /// The call is not valid in the encoder's current state.
    InvalidOperation,
    /// The call's argument cannot be encoded.
    InvalidArgument,
}

impl UsageErrorCode {
    /// Returns the upper-case name used in error text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidOperation => "INVALID_OPERATION",
            Self::InvalidArgument => "INVALID_ARGUMENT",
        }
    }
}

/// Errors raised synchronously by container encoders on API misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// An entry was added after `complete()`.
    #[error("attempt to add an entry after complete() was called")]
    EntryAfterComplete,

    /// `complete()` was called with no entries.
    #[error("attempt to call complete() while no entries were added yet")]
    CompleteWithoutEntries,

    /// The entry type differs from the type bound by the first entry.
    #[error("attempt to add {actual} entry to an array of {expected}")]
    TypeMismatch {
        /// Type bound by the first entry.
        expected: PrimitiveType,
        /// Type of the rejected entry.
        actual: PrimitiveType,
    },

    /// Fixed width changed after the first entry.
    #[error("attempt to set fixed width after entries were added")]
    FixedWidthAfterStart,

    /// The type has no representation at the configured fixed width.
    #[error("unsupported fixed width encoding for {primitive_type}: fixed width='{width}'")]
    UnsupportedFixedWidth {
        /// Type of the rejected entry.
        primitive_type: PrimitiveType,
        /// Configured fixed width.
        width: usize,
    },

    /// The encoded value does not fit the fixed slot.
    #[error("passed in value is longer than fixed width: {primitive_type} needs {length} bytes, fixed width='{width}'")]
    ValueLongerThanFixedWidth {
        /// Type of the rejected entry.
        primitive_type: PrimitiveType,
        /// Encoded length of the value.
        length: usize,
        /// Configured fixed width.
        width: usize,
    },

    /// The numeric value is outside the range of the fixed slot.
    #[error("value out of range for {primitive_type} with fixed width='{width}'")]
    OutOfRangeForFixedWidth {
        /// Type of the rejected entry.
        primitive_type: PrimitiveType,
        /// Configured fixed width.
        width: usize,
    },

    /// Blank cannot be represented in a fixed slot of this type.
    #[error("failed to encode ({primitive_type}) while encoding array. Reason=INVALID_ARGUMENT")]
    BlankNotEncodable {
        /// Type of the rejected blank.
        primitive_type: PrimitiveType,
    },

    /// The value itself failed to encode.
    #[error("failed to encode ({primitive_type}) while encoding array. Reason={source}")]
    InvalidValue {
        /// Type of the rejected entry.
        primitive_type: PrimitiveType,
        /// Underlying encode failure.
        source: EncodeError,
    },

    /// The wire entry count limit was reached.
    #[error("too many entries: maximum is {max}")]
    TooManyEntries {
        /// Maximum permitted entry count.
        max: usize,
    },
}

impl UsageError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn code(&self) -> UsageErrorCode {
        match self {
            Self::EntryAfterComplete
            | Self::CompleteWithoutEntries
            | Self::TypeMismatch { .. }
            | Self::FixedWidthAfterStart
            | Self::UnsupportedFixedWidth { .. }
            | Self::TooManyEntries { .. } => UsageErrorCode::InvalidOperation,
            Self::ValueLongerThanFixedWidth { .. }
            | Self::OutOfRangeForFixedWidth { .. }
            | Self::BlankNotEncodable { .. }
            | Self::InvalidValue { .. } => UsageErrorCode::InvalidArgument,
        }
    }
}

/// Errors raised while applying RMTES content to a cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RmtesError {
    /// A partial update arrived with no cached value to patch.
    #[error("partial update applied to an empty cache")]
    PartialUpdateWithoutCache,

    /// A write target lies outside the cached value.
    #[error("position {position} out of range for cached length {len}")]
    PositionOutOfRange {
        /// Offending cursor position.
        position: usize,
        /// Length of the cached value.
        len: usize,
    },

    /// A repeat command had no preceding byte to copy.
    #[error("repeat command at cursor 0 has no preceding byte")]
    RepeatWithoutPrecedingByte,

    /// A control sequence could not be parsed.
    #[error("malformed control sequence at offset {offset}")]
    MalformedCommand {
        /// Offset of the sequence within the update.
        offset: usize,
    },

    /// A decimal argument does not fit in `usize`.
    #[error("control sequence argument overflow at offset {offset}")]
    CountOverflow {
        /// Offset of the sequence within the update.
        offset: usize,
    },
}
