/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronRwf Core
//!
//! Core types, value model, and error definitions for the IronRwf OMM codec.
//!
//! This crate provides the building blocks shared by the codec and RMTES crates:
//! - **Error types**: `UsageError`, `DecodeError`, `EncodeError`, `RmtesError`
//! - **Type identifiers**: `PrimitiveType`, `DataCode`, `WireVersion`
//! - **Values**: `Real`, `Date`, `Time`, `DateTime`, `Qos`, `State`, `EnumValue`
//!   and the `PrimitiveValue` union over all of them
//!
//! Opaque and text values are held as `bytes::Bytes`, so decoded entries can
//! share the encoded array's storage without copying.

pub mod datetime;
pub mod error;
pub mod qos;
pub mod real;
pub mod state;
pub mod types;
pub mod value;

pub use datetime::{Date, DateTime, Time};
pub use error::{
    DecodeError, DecodeErrorCode, EncodeError, Result, RmtesError, RwfError, UsageError,
    UsageErrorCode,
};
pub use qos::{Qos, Rate, Timeliness};
pub use real::{Real, RealHint};
pub use state::{DataState, State, StreamState};
pub use types::{DataCode, PrimitiveType, WireVersion};
pub use value::{EnumValue, PrimitiveValue};
