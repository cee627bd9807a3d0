//! S-box codec and key schedule tables for the DSTU/GOST 28147 block cipher.
//!
//! This crate provides:
//! - The 64-byte packed S-box and its eight-table unpacked form.
//! - The built-in default S-box.
//! - A key schedule of four 256-entry 32-bit tables with the cipher's
//!   11-bit rotation folded in, and the inverse extraction back to an S-box.
//!
//! Running cipher rounds over the tables is out of scope.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod sbox;
mod schedule;

pub use crate::error::{Result, SboxError};
pub use crate::sbox::{PackedSbox, UnpackedSbox, DEFAULT_SBOX, SBOX_BYTES, TABLES};
pub use crate::schedule::KeySchedule;
