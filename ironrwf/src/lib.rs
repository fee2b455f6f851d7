/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronRwf
//!
//! A binary RWF codec for the Open Message Model array container and RMTES
//! text in Rust.
//!
//! IronRwf encodes and decodes every RWF primitive type, builds and reads
//! arrays in fixed- and variable-width form, and maintains RMTES text
//! caches that accept cursor-patch partial updates.
//!
//! ## Features
//!
//! - **Byte-exact**: big-endian RWF layouts with minimal-length integers
//! - **Growable**: encoders start from any buffer size, including zero
//! - **Restartable**: array decoding keeps no state between passes
//! - **Localized errors**: a corrupt entry never aborts the whole array
//! - **Partial updates**: RMTES move-and-write and repeat commands
//!
//! ## Quick Start
//!
//! ```rust
//! use ironrwf::prelude::*;
//!
//! let mut encoder = ArrayEncoder::new();
//! encoder.set_fixed_width(8).unwrap();
//! encoder.add(Ascii::from("ABC")).unwrap();
//! let array = encoder.complete().unwrap();
//!
//! for entry in &array.decoder() {
//!     assert_eq!(entry.load().into_value().unwrap().as_str(), Some("ABC"));
//! }
//!
//! let mut text = RmtesBuffer::new();
//! text.apply(b"abcdefghijkl").unwrap();
//! text.apply(b"\x1b[0`12").unwrap();
//! assert_eq!(text.to_string(), "12cdefghijkl");
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Value types, type identifiers, and error definitions
//! - [`codec`]: Primitive codec, array encoder and decoder
//! - [`rmtes`]: RMTES cache and partial-update commands

pub mod core {
    //! Value types, type identifiers, and error definitions.
    pub use ironrwf_core::*;
}

pub mod codec {
    //! Primitive codec, array encoder and decoder.
    pub use ironrwf_codec::*;
}

pub mod rmtes {
    //! RMTES cache and partial-update commands.
    pub use ironrwf_rmtes::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironrwf_core::{
        DataCode, DataState, Date, DateTime, DecodeError, EncodeError, EnumValue, PrimitiveType,
        PrimitiveValue, Qos, Rate, Real, RealHint, Result, RmtesError, RwfError, State,
        StreamState, Time, Timeliness, UsageError, WireVersion,
    };

    // Codec
    pub use ironrwf_codec::{
        ArrayDecoder, ArrayEncoder, ArrayEntry, ArrayValue, Ascii, Buffer, DecoderConfig,
        EncodedArray, EncoderConfig, Load, Rmtes, Utf8,
    };

    // RMTES
    pub use ironrwf_rmtes::{RmtesBuffer, RmtesUpdateBuilder, has_partial_update};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let _config = EncoderConfig::default();
        let _version = WireVersion::default();
        let _real = Real::new(1, RealHint::Exponent0);
        let _text = RmtesBuffer::new();
    }

    #[test]
    fn test_array_round_trip_through_facade() -> Result<()> {
        let mut encoder = ArrayEncoder::new();
        encoder.add(Real::new(12_345, RealHint::ExponentNeg2))?;
        encoder.add_blank::<Real>()?;
        let array = encoder.complete()?;

        let decoder = ArrayDecoder::new(array.as_bytes())?;
        let loads: Vec<Load> = decoder.iter().map(|entry| entry.load()).collect();
        assert_eq!(
            loads,
            vec![
                Load::Value(PrimitiveValue::Real(Real::new(12_345, RealHint::ExponentNeg2))),
                Load::Blank,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_errors_convert_to_rwf_error() {
        let mut encoder = ArrayEncoder::new();
        let err: RwfError = encoder.complete().unwrap_err().into();
        assert!(matches!(err, RwfError::Usage(UsageError::CompleteWithoutEntries)));

        let mut text = RmtesBuffer::new();
        let err: RwfError = text.apply(b"\x1b[0`a").unwrap_err().into();
        assert!(matches!(err, RwfError::Rmtes(RmtesError::PartialUpdateWithoutCache)));
    }

    #[test]
    fn test_partial_update_builder() {
        let mut text = RmtesBuffer::new();
        text.apply(b"abcdefghijkl").unwrap();
        let update = RmtesUpdateBuilder::new().move_to(9).write(b" ").repeat(2).build();
        assert!(has_partial_update(&update));
        text.apply(&update).unwrap();
        assert_eq!(text.to_string(), "abcdefghi   ");
    }
}
