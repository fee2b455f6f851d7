/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronRwf RMTES
//!
//! RMTES text handling for the IronRwf OMM codec.
//!
//! RMTES fields save bandwidth by sending cursor-patch partial updates
//! against the previously received value instead of the whole string.
//!
//! ## Features
//!
//! - **In-place patching**: move-and-write and repeat commands applied atomically
//! - **Memoized projections**: UTF-16 and text views computed once per change
//! - **Fast scanning**: uses `memchr` to find control sequences
//! - **Update building**: produces partial-update byte strings

pub mod command;
pub mod engine;

pub use command::{Command, Commands, RmtesUpdateBuilder, has_partial_update, is_partial_update};
pub use engine::RmtesBuffer;
pub use ironrwf_core::RmtesError;
