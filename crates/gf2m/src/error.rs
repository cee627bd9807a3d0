//! Error types for binary field and curve arithmetic.

use thiserror::Error;

/// Errors produced by field, curve and group construction or point arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Gf2mError {
    /// An integer does not fit in a reduced element of the field.
    #[error("value of {bits} bits does not fit a field of degree {degree}")]
    Decode {
        /// Bit length of the offending value.
        bits: u64,
        /// Degree of the field.
        degree: u32,
    },
    /// The scalar multiplication table could not be reserved.
    #[error("failed to reserve the scalar multiplication table")]
    Allocation,
    /// Affine coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,
    /// The point at infinity was found where a finite point is required.
    #[error("point at infinity where a finite point is required")]
    PointAtInfinity,
    /// The field degree is outside the supported range.
    #[error("field degree {0} is not supported")]
    UnsupportedDegree(u32),
    /// Middle exponents are out of range or out of order.
    #[error("invalid reduction polynomial of degree {degree}")]
    InvalidPolynomial {
        /// Declared degree of the polynomial.
        degree: u32,
    },
    /// The group order is zero.
    #[error("group order must be nonzero")]
    InvalidOrder,
}
