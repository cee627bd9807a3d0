//! Binary field and binary elliptic curve arithmetic.
//!
//! This crate provides the arithmetic the DSTU 4145 parameter code consumes:
//! - GF(2^m) elements for trinomial and pentanomial moduli up to degree 447.
//! - Curves `y^2 + xy = x^3 + a x^2 + b` with affine point addition,
//!   doubling, negation and windowed scalar multiplication.
//! - Cyclic groups with a generator, order and cofactor.
//!
//! Integers cross the crate boundary as [`num_bigint::BigUint`]. The
//! implementation favours clarity over constant-time execution and should not
//! be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod curve;
mod element;
mod error;
mod field;
mod group;
mod poly;

pub use crate::curve::{BinaryCurve, Point};
pub use crate::element::{FieldElement, MAX_DEGREE};
pub use crate::error::Gf2mError;
pub use crate::field::BinaryField;
pub use crate::group::CurveGroup;
pub use crate::poly::{FieldPolynomial, ReductionTerms};
pub use num_bigint::BigUint;
