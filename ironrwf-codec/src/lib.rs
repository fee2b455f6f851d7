/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronRwf Codec
//!
//! Binary RWF encoding and decoding of primitive values and the array
//! container.
//!
//! ## Features
//!
//! - **Capability table**: one entry per primitive type drives every
//!   encode, decode, blank, and fixed-width decision
//! - **Growable buffer**: encoders start from any capacity, including zero
//! - **Restartable decoding**: each pass over an array starts from entry zero,
//!   and malformed entries are reported per entry
//! - **Zero-copy entries**: opaque and text payloads share the array's storage

pub mod array;
pub mod buffer;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod primitive;
pub mod scalar;
pub mod status;
pub mod table;
pub mod wire;

pub use array::{ArrayHeader, EncodedArray};
pub use buffer::EncodeBuffer;
pub use config::{DecoderConfig, EncoderConfig, MAX_ENTRIES};
pub use decoder::{ArrayDecoder, ArrayEntry, ArrayIter, Load};
pub use encoder::{ArrayEncoder, ArrayValue, Ascii, Buffer, Rmtes, Utf8};
pub use primitive::{decode, decode_fixed, decode_slice, encode, encode_fixed, encoded_len};
pub use table::{FixedWidths, TypeCodec, codec_for};
