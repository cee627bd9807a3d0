//! Errors for S-box decoding and schedule serialization.

use thiserror::Error;

/// Errors surfaced by the S-box codec and key schedule.
#[derive(Debug, Error)]
pub enum SboxError {
    /// A packed table was not exactly 64 bytes long.
    #[error("packed S-box must be 64 bytes, got {0}")]
    InvalidLength(usize),
    /// An unpacked entry does not fit in four bits.
    #[error("table k{table} entry {index} is {value:#04x}, expected a nibble")]
    NibbleOutOfRange {
        /// One-based table number (`k1`..`k8`).
        table: usize,
        /// Entry position within the table.
        index: usize,
        /// Offending value.
        value: u8,
    },
    /// A schedule word does not match the table rebuilt from its S-box.
    #[error("key schedule table {table} entry {index} is not derived from any S-box")]
    InconsistentSchedule {
        /// Table name, `k87` through `k21`.
        table: &'static str,
        /// First mismatching entry.
        index: usize,
    },
    /// `bincode` failed to encode or decode a schedule.
    #[error("schedule serialization failed: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, SboxError>;
