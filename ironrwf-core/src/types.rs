/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Core RWF type identifiers.
//!
//! This module defines the closed set of primitive types an array may carry,
//! the per-entry [`DataCode`], and the [`WireVersion`] that governs
//! length-prefix widths.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RWF primitive data types that may appear as array entries.
///
/// Discriminants match the RWF data type numbers carried on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum PrimitiveType {
    /// Signed 64-bit integer.
    Int = 3,
    /// Unsigned 64-bit integer.
    UInt = 4,
    /// 32-bit IEEE-754 floating point.
    Float = 5,
    /// 64-bit IEEE-754 floating point.
    Double = 6,
    /// Mantissa with decimal or fractional hint.
    Real = 8,
    /// Calendar date.
    Date = 9,
    /// Time of day.
    Time = 10,
    /// Date and time of day.
    DateTime = 11,
    /// Quality of service.
    Qos = 12,
    /// Stream and data state.
    State = 13,
    /// Enumerated value.
    Enum = 14,
    /// Opaque bytes.
    Buffer = 16,
    /// ASCII text.
    Ascii = 17,
    /// UTF-8 text.
    Utf8 = 18,
    /// RMTES text.
    Rmtes = 19,
}

impl PrimitiveType {
    /// All primitive types in wire-number order.
    pub const ALL: [Self; 15] = [
        Self::Int,
        Self::UInt,
        Self::Float,
        Self::Double,
        Self::Real,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Qos,
        Self::State,
        Self::Enum,
        Self::Buffer,
        Self::Ascii,
        Self::Utf8,
        Self::Rmtes,
    ];

    /// Creates a primitive type from its wire number.
    ///
    /// # Arguments
    /// * `value` - The RWF data type number
    ///
    /// # Returns
    /// `Some(PrimitiveType)` if the number names an array-capable primitive.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        <Self as FromPrimitive>::from_u8(value)
    }

    /// Returns the wire number of this type.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the display name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::UInt => "UInt",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Real => "Real",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
            Self::Qos => "Qos",
            Self::State => "State",
            Self::Enum => "Enum",
            Self::Buffer => "Buffer",
            Self::Ascii => "Ascii",
            Self::Utf8 => "Utf8",
            Self::Rmtes => "Rmtes",
        }
    }

    /// Returns true for the opaque and text types carried as raw bytes.
    #[must_use]
    pub const fn is_bytes(self) -> bool {
        matches!(self, Self::Buffer | Self::Ascii | Self::Utf8 | Self::Rmtes)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for PrimitiveType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(value)
    }
}

/// Per-entry code distinguishing a value from an explicit blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataCode {
    /// The entry carries a value.
    #[default]
    NoCode,
    /// The entry is explicitly blank.
    Blank,
}

impl DataCode {
    /// Returns true if this is [`DataCode::Blank`].
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl fmt::Display for DataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCode => f.write_str("NoCode"),
            Self::Blank => f.write_str("Blank"),
        }
    }
}

/// RWF wire format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
}

impl WireVersion {
    /// RWF 14.0.
    pub const V14_0: Self = Self::new(14, 0);

    /// RWF 14.1, the current version.
    pub const V14_1: Self = Self::new(14, 1);

    /// Creates a new wire version.
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Returns true if entry lengths may use the 32-bit `0xFF` form.
    #[must_use]
    pub const fn supports_long_lengths(self) -> bool {
        self.major > 14 || (self.major == 14 && self.minor >= 1)
    }
}

impl Default for WireVersion {
    fn default() -> Self {
        Self::V14_1
    }
}

impl fmt::Display for WireVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
