//! Error taxonomy for curve decoding and key generation.

use gf2m::Gf2mError;
use thiserror::Error;

use crate::catalog::CurveId;

/// Errors surfaced by curve building and key generation.
#[derive(Debug, Error)]
pub enum DstuError {
    /// The arithmetic layer could not allocate a working buffer.
    #[error("allocation failed in curve arithmetic")]
    Allocation,
    /// Parameter bytes are truncated or do not fit the field.
    #[error("cannot decode curve parameters: {0}")]
    Decode(String),
    /// Decoded base point coordinates do not lie on the curve.
    #[error("base point is not on the curve")]
    InvalidPoint,
    /// The key has no associated group.
    #[error("key has no associated group")]
    MissingGroup,
    /// The key has no private scalar.
    #[error("key has no private scalar")]
    MissingKey,
    /// The random source reported a failure.
    #[error("random source failed: {0}")]
    Rng(#[source] rand::Error),
    /// No usable scalar was drawn within the configured number of draws.
    #[error("no nonzero scalar below the group order after {0} draws")]
    RngExhausted(u32),
    /// Scalar multiplication failed or produced the point at infinity.
    #[error("scalar multiplication failed: {0}")]
    ScalarMultiply(#[source] Gf2mError),
    /// A point operation produced an unusable result.
    #[error("point operation failed: {0}")]
    PointOperation(#[source] Gf2mError),
    /// The private scalar is outside `[1, N - 1]`.
    #[error("private scalar is outside [1, N - 1]")]
    InvalidScalar,
    /// The identifier does not name a catalog curve.
    #[error("unknown curve {0}")]
    UnknownCurve(CurveId),
}

impl From<Gf2mError> for DstuError {
    /// Maps construction failures of the arithmetic layer.
    fn from(err: Gf2mError) -> Self {
        match err {
            Gf2mError::Allocation => DstuError::Allocation,
            Gf2mError::NotOnCurve | Gf2mError::PointAtInfinity => DstuError::InvalidPoint,
            other => DstuError::Decode(other.to_string()),
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, DstuError>;
