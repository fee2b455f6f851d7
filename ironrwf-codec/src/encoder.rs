/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Array encoder.
//!
//! Builds one array container entry by entry into a growable buffer. The
//! first entry binds the primitive type of the whole array; the fixed width,
//! if any, must be chosen before it.
//!
//! # Example
//! ```
//! use ironrwf_codec::{ArrayEncoder, Ascii};
//!
//! let mut encoder = ArrayEncoder::new();
//! encoder.add(Ascii::from("TRI.N")).unwrap();
//! encoder.add_blank::<Ascii>().unwrap();
//! let array = encoder.complete().unwrap();
//! assert_eq!(array.count(), 2);
//! ```

use crate::array::{ArrayHeader, EncodedArray};
use crate::buffer::EncodeBuffer;
use crate::config::EncoderConfig;
use crate::primitive::encoded_len;
use crate::table::{TypeCodec, codec_for};
use crate::wire::{ensure_room, length_prefix_len, put_length_prefix};
use bytes::{Bytes, BytesMut};
use ironrwf_core::{
    Date, DateTime, EncodeError, EnumValue, PrimitiveType, PrimitiveValue, Qos, Real, State, Time,
    UsageError,
};
use tracing::{debug, trace};

/// A value that can be added to an array.
///
/// The associated type constant lets blanks be added without a value.
pub trait ArrayValue {
    /// Primitive type this value encodes as.
    const PRIMITIVE_TYPE: PrimitiveType;

    /// Converts into the generic value representation.
    fn into_value(self) -> PrimitiveValue;
}

macro_rules! impl_array_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ArrayValue for $ty {
                const PRIMITIVE_TYPE: PrimitiveType = PrimitiveType::$variant;

                #[inline]
                fn into_value(self) -> PrimitiveValue {
                    PrimitiveValue::$variant(self)
                }
            }
        )*
    };
}

impl_array_value! {
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
}

macro_rules! bytes_value {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub Bytes);

        impl $name {
            /// Wraps the given bytes.
            #[must_use]
            pub fn new(bytes: impl Into<Bytes>) -> Self {
                Self(bytes.into())
            }

            /// Returns the wrapped bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl ArrayValue for $name {
            const PRIMITIVE_TYPE: PrimitiveType = PrimitiveType::$name;

            #[inline]
            fn into_value(self) -> PrimitiveValue {
                PrimitiveValue::$name(self.0)
            }
        }

        impl From<&'static str> for $name {
            fn from(s: &'static str) -> Self {
                Self(Bytes::from_static(s.as_bytes()))
            }
        }

        impl From<&'static [u8]> for $name {
            fn from(b: &'static [u8]) -> Self {
                Self(Bytes::from_static(b))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Bytes::from(s))
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(b: Vec<u8>) -> Self {
                Self(Bytes::from(b))
            }
        }

        impl From<Bytes> for $name {
            fn from(b: Bytes) -> Self {
                Self(b)
            }
        }
    };
}

bytes_value!(
    /// Opaque bytes entry.
    Buffer
);
bytes_value!(
    /// ASCII text entry.
    Ascii
);
bytes_value!(
    /// UTF-8 text entry.
    Utf8
);
bytes_value!(
    /// RMTES text entry.
    Rmtes
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncoderState {
    Empty,
    Encoding,
    Completed,
}

/// Incremental encoder for one array container.
#[derive(Debug)]
pub struct ArrayEncoder {
    config: EncoderConfig,
    buffer: EncodeBuffer,
    state: EncoderState,
    fixed_width: u16,
    /// Set once the first entry has written the header.
    primitive_type: Option<PrimitiveType>,
    count: usize,
    completed: Option<EncodedArray>,
}

impl ArrayEncoder {
    /// Creates an encoder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    /// Creates an encoder with the given configuration.
    #[must_use]
    pub fn with_config(config: EncoderConfig) -> Self {
        let buffer = EncodeBuffer::new(config.initial_capacity, config.growth_factor);
        Self::from_parts(config, buffer)
    }

    /// Creates an encoder writing into a caller-supplied buffer.
    ///
    /// The whole length of `buf` is used as initial capacity. Use
    /// [`Self::into_buffer`] to hand it back afterwards.
    #[must_use]
    pub fn from_buffer(buf: BytesMut, config: EncoderConfig) -> Self {
        let buffer = EncodeBuffer::from_bytes_mut(buf, config.growth_factor);
        Self::from_parts(config, buffer)
    }

    fn from_parts(config: EncoderConfig, buffer: EncodeBuffer) -> Self {
        Self {
            config,
            buffer,
            state: EncoderState::Empty,
            fixed_width: 0,
            primitive_type: None,
            count: 0,
            completed: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Returns true if entries use a fixed width.
    #[must_use]
    pub const fn has_fixed_width(&self) -> bool {
        self.fixed_width > 0
    }

    /// Returns the fixed width, zero for variable width.
    #[must_use]
    pub const fn fixed_width(&self) -> u16 {
        self.fixed_width
    }

    /// Returns the type bound by the first entry, if any.
    #[must_use]
    pub const fn primitive_type(&self) -> Option<PrimitiveType> {
        self.primitive_type
    }

    /// Returns the number of entries added.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no entries were added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true once [`Self::complete`] has succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.state, EncoderState::Completed)
    }

    /// Returns the finalized array, if complete.
    #[must_use]
    pub const fn encoded(&self) -> Option<&EncodedArray> {
        self.completed.as_ref()
    }

    /// Returns the current buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Sets the fixed entry width; zero selects variable width.
    ///
    /// Whether the width suits the entry type is checked by the first add.
    ///
    /// # Errors
    /// Returns `UsageError::FixedWidthAfterStart` unless the encoder is empty.
    pub fn set_fixed_width(&mut self, width: u16) -> Result<(), UsageError> {
        if self.state != EncoderState::Empty {
            return Err(UsageError::FixedWidthAfterStart);
        }
        self.fixed_width = width;
        self.state = EncoderState::Encoding;
        Ok(())
    }

    /// Adds a typed entry.
    ///
    /// # Errors
    /// See [`Self::add_value`].
    pub fn add<T: ArrayValue>(&mut self, value: T) -> Result<(), UsageError> {
        self.add_value(value.into_value())
    }

    /// Adds an entry.
    ///
    /// # Errors
    /// Returns a `UsageError` if the encoder is complete, the type differs
    /// from the bound type, the fixed width is unsupported for the type, or
    /// the value does not fit the fixed width.
    pub fn add_value(&mut self, value: PrimitiveValue) -> Result<(), UsageError> {
        let ty = value.primitive_type();
        let codec = self.begin_entry(ty)?;
        let width = usize::from(self.fixed_width);
        let result = if width > 0 {
            self.buffer.write_with(|dest| {
                (codec.encode_fixed)(&value, width, dest)?;
                Ok(width)
            })
        } else {
            let len = encoded_len(&value);
            let version = self.config.wire_version;
            self.buffer.write_with(|dest| {
                let prefix = length_prefix_len(len, version)?;
                ensure_room(dest, prefix + len)?;
                put_length_prefix(dest, len, version)?;
                let written = (codec.encode)(&value, &mut dest[prefix..])?;
                if written != len {
                    return Err(EncodeError::InvalidData {
                        reason: "encoded length differs from computed length",
                    });
                }
                Ok(prefix + len)
            })
        };
        self.finish_entry(ty, result)
    }

    /// Adds a blank entry of type `T`.
    ///
    /// # Errors
    /// See [`Self::add_blank_of`].
    pub fn add_blank<T: ArrayValue>(&mut self) -> Result<(), UsageError> {
        self.add_blank_of(T::PRIMITIVE_TYPE)
    }

    /// Adds a blank entry of type `ty`.
    ///
    /// Variable-width arrays write a zero-length entry. Fixed-width arrays
    /// write an all-zero slot, which only opaque and text types read back as
    /// blank.
    ///
    /// # Errors
    /// Returns `UsageError::BlankNotEncodable` for a fixed-width array of a
    /// type with no blank slot, and otherwise the same errors as
    /// [`Self::add_value`].
    pub fn add_blank_of(&mut self, ty: PrimitiveType) -> Result<(), UsageError> {
        let codec = self.begin_entry(ty)?;
        let width = usize::from(self.fixed_width);
        let result = if width > 0 {
            if !codec.blank_in_fixed_slot {
                let err = UsageError::BlankNotEncodable { primitive_type: ty };
                self.abandon_entry();
                return Err(err);
            }
            self.buffer.write_with(|dest| {
                ensure_room(dest, width)?;
                dest[..width].fill(0);
                Ok(width)
            })
        } else {
            let version = self.config.wire_version;
            self.buffer
                .write_with(|dest| put_length_prefix(dest, 0, version))
        };
        self.finish_entry(ty, result)
    }

    /// Finalizes the array.
    ///
    /// Calling it again returns the same array.
    ///
    /// # Errors
    /// Returns `UsageError::CompleteWithoutEntries` if nothing was added.
    pub fn complete(&mut self) -> Result<EncodedArray, UsageError> {
        if let Some(array) = &self.completed {
            return Ok(array.clone());
        }
        let Some(ty) = self.primitive_type.filter(|_| self.count > 0) else {
            return Err(UsageError::CompleteWithoutEntries);
        };
        let count = u16::try_from(self.count).map_err(|_| UsageError::TooManyEntries {
            max: self.config.max_entries,
        })?;
        let header = ArrayHeader::new(ty, self.fixed_width, count);
        self.buffer
            .patch(header.count_offset(), &count.to_be_bytes())
            .map_err(|source| UsageError::InvalidValue {
                primitive_type: ty,
                source,
            })?;

        let array = EncodedArray::new(self.buffer.to_bytes(), header);
        debug!(
            primitive_type = %ty,
            fixed_width = self.fixed_width,
            count,
            bytes = array.as_bytes().len(),
            "array complete"
        );
        self.state = EncoderState::Completed;
        self.completed = Some(array.clone());
        Ok(array)
    }

    /// Resets to the state of a freshly constructed encoder, keeping the
    /// allocated buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = EncoderState::Empty;
        self.fixed_width = 0;
        self.primitive_type = None;
        self.count = 0;
        self.completed = None;
    }

    /// Consumes the encoder, returning its backing buffer.
    #[must_use]
    pub fn into_buffer(self) -> BytesMut {
        self.buffer.into_inner()
    }

    /// Validates state for a new entry of type `ty`, writing the header on
    /// the first one.
    fn begin_entry(&mut self, ty: PrimitiveType) -> Result<&'static TypeCodec, UsageError> {
        if self.state == EncoderState::Completed {
            return Err(UsageError::EntryAfterComplete);
        }
        let codec = codec_for(ty);
        if let Some(bound) = self.primitive_type {
            if bound != ty {
                return Err(UsageError::TypeMismatch {
                    expected: bound,
                    actual: ty,
                });
            }
            if self.count >= self.config.max_entries {
                return Err(UsageError::TooManyEntries {
                    max: self.config.max_entries,
                });
            }
            return Ok(codec);
        }

        if self.config.max_entries == 0 {
            return Err(UsageError::TooManyEntries { max: 0 });
        }
        let width = usize::from(self.fixed_width);
        if width > 0 && !codec.supports_fixed_width(width) {
            return Err(UsageError::UnsupportedFixedWidth {
                primitive_type: ty,
                width,
            });
        }
        let header = ArrayHeader::new(ty, self.fixed_width, 0);
        self.buffer
            .write_with(|dest| header.write(dest))
            .map_err(|source| UsageError::InvalidValue {
                primitive_type: ty,
                source,
            })?;
        self.primitive_type = Some(ty);
        self.state = EncoderState::Encoding;
        Ok(codec)
    }

    fn finish_entry(
        &mut self,
        ty: PrimitiveType,
        result: Result<usize, EncodeError>,
    ) -> Result<(), UsageError> {
        match result {
            Ok(written) => {
                self.count += 1;
                trace!(index = self.count - 1, written, "array entry added");
                Ok(())
            }
            Err(err) => {
                self.abandon_entry();
                Err(usage_error(ty, err))
            }
        }
    }

    /// Drops the header again if the first entry failed, so the type stays
    /// unbound.
    fn abandon_entry(&mut self) {
        if self.count == 0 {
            self.buffer.clear();
            self.primitive_type = None;
        }
    }
}

impl Default for ArrayEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn usage_error(primitive_type: PrimitiveType, err: EncodeError) -> UsageError {
    match err {
        EncodeError::UnsupportedWidth { width } => UsageError::UnsupportedFixedWidth {
            primitive_type,
            width,
        },
        EncodeError::ValueTooLong { length, width } => UsageError::ValueLongerThanFixedWidth {
            primitive_type,
            length,
            width,
        },
        EncodeError::OutOfRange { width } => UsageError::OutOfRangeForFixedWidth {
            primitive_type,
            width,
        },
        EncodeError::TypeMismatch { expected, actual } => {
            UsageError::TypeMismatch { expected, actual }
        }
        source => UsageError::InvalidValue {
            primitive_type,
            source,
        },
    }
}
