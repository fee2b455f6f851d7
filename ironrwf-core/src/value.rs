/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Tagged union over all primitive values.

use crate::datetime::{Date, DateTime, Time};
use crate::qos::Qos;
use crate::real::Real;
use crate::state::State;
use crate::types::PrimitiveType;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RWF enumerated value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct EnumValue(pub u16);

impl EnumValue {
    /// Creates a new enum value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl From<u16> for EnumValue {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str(buf.format(self.0))
    }
}

/// A decoded or to-be-encoded primitive value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveValue {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Real.
    Real(Real),
    /// Date.
    Date(Date),
    /// Time.
    Time(Time),
    /// Date-time.
    DateTime(DateTime),
    /// Quality of service.
    Qos(Qos),
    /// State.
    State(State),
    /// Enumerated value.
    Enum(EnumValue),
    /// Opaque bytes.
    Buffer(Bytes),
    /// ASCII text.
    Ascii(Bytes),
    /// UTF-8 text.
    Utf8(Bytes),
    /// RMTES text.
    Rmtes(Bytes),
}

impl PrimitiveValue {
    /// Returns the primitive type of this value.
    #[must_use]
    pub const fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Int(_) => PrimitiveType::Int,
            Self::UInt(_) => PrimitiveType::UInt,
            Self::Float(_) => PrimitiveType::Float,
            Self::Double(_) => PrimitiveType::Double,
            Self::Real(_) => PrimitiveType::Real,
            Self::Date(_) => PrimitiveType::Date,
            Self::Time(_) => PrimitiveType::Time,
            Self::DateTime(_) => PrimitiveType::DateTime,
            Self::Qos(_) => PrimitiveType::Qos,
            Self::State(_) => PrimitiveType::State,
            Self::Enum(_) => PrimitiveType::Enum,
            Self::Buffer(_) => PrimitiveType::Buffer,
            Self::Ascii(_) => PrimitiveType::Ascii,
            Self::Utf8(_) => PrimitiveType::Utf8,
            Self::Rmtes(_) => PrimitiveType::Rmtes,
        }
    }

    /// Creates a byte-carrying value of the given type.
    ///
    /// # Returns
    /// `None` if `ty` is not one of the opaque or text types.
    #[must_use]
    pub fn from_bytes(ty: PrimitiveType, bytes: Bytes) -> Option<Self> {
        match ty {
            PrimitiveType::Buffer => Some(Self::Buffer(bytes)),
            PrimitiveType::Ascii => Some(Self::Ascii(bytes)),
            PrimitiveType::Utf8 => Some(Self::Utf8(bytes)),
            PrimitiveType::Rmtes => Some(Self::Rmtes(bytes)),
            _ => None,
        }
    }

    /// Returns the raw bytes of an opaque or text value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Buffer(b) | Self::Ascii(b) | Self::Utf8(b) | Self::Rmtes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the signed integer, if this is an `Int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the unsigned integer, if this is a `UInt`.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the Real, if this is a `Real`.
    #[must_use]
    pub const fn as_real(&self) -> Option<Real> {
        match self {
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text as `&str` for text types holding valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Ascii(b) | Self::Utf8(b) | Self::Rmtes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.write_str(itoa::Buffer::new().format(*v)),
            Self::UInt(v) => f.write_str(itoa::Buffer::new().format(*v)),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Qos(v) => write!(f, "{v}"),
            Self::State(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Buffer(b) => {
                for byte in b.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Ascii(b) | Self::Utf8(b) | Self::Rmtes(b) => {
                f.write_str(&String::from_utf8_lossy(b))
            }
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PrimitiveValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar!(
    i64 => Int,
    u64 => UInt,
    f32 => Float,
    f64 => Double,
    Real => Real,
    Date => Date,
    Time => Time,
    DateTime => DateTime,
    Qos => Qos,
    State => State,
    EnumValue => Enum,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::real::RealHint;

    #[test]
    fn test_primitive_type_of_value() {
        assert_eq!(PrimitiveValue::from(5i64).primitive_type(), PrimitiveType::Int);
        assert_eq!(
            PrimitiveValue::from(Real::new(1, RealHint::Exponent0)).primitive_type(),
            PrimitiveType::Real
        );
        let text = PrimitiveValue::from_bytes(PrimitiveType::Ascii, Bytes::from_static(b"ABC"));
        assert_eq!(text.as_ref().map(PrimitiveValue::primitive_type), Some(PrimitiveType::Ascii));
        assert!(PrimitiveValue::from_bytes(PrimitiveType::Int, Bytes::new()).is_none());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(PrimitiveValue::Int(-42).to_string(), "-42");
        assert_eq!(PrimitiveValue::Enum(EnumValue(7)).to_string(), "7");
        assert_eq!(
            PrimitiveValue::Buffer(Bytes::from_static(&[0xde, 0xad])).to_string(),
            "dead"
        );
        assert_eq!(
            PrimitiveValue::Ascii(Bytes::from_static(b"IBM.N")).to_string(),
            "IBM.N"
        );
    }

    #[test]
    fn test_value_accessors() {
        let v = PrimitiveValue::Utf8(Bytes::from_static("héllo".as_bytes()));
        assert_eq!(v.as_str(), Some("héllo"));
        assert_eq!(v.as_int(), None);
        assert_eq!(PrimitiveValue::UInt(9).as_uint(), Some(9));
    }
}
