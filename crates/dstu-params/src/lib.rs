//! DSTU 4145 domain parameters and key generation.
//!
//! The crate carries the ten named binary curves of the standard as static
//! parameter blobs, decodes them into [`CurveGroup`]s over `gf2m`, and
//! generates key pairs whose public point is the negation of `d * G`.
//!
//! ```no_run
//! use dstu_params::{group_from_id, CurveId, KeyGenerator};
//! use rand::rngs::OsRng;
//!
//! let group = group_from_id(CurveId::UACURVE0)?;
//! let pair = KeyGenerator::new(OsRng).generate(&group)?;
//! assert!(pair.private_scalar() < group.order());
//! # Ok::<(), dstu_params::DstuError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod builder;
mod catalog;
mod data;
mod encoding;
mod error;
mod keygen;

pub use builder::{build, curve_id_from_group, group_from_blob, group_from_id, group_to_blob};
pub use catalog::{lookup_by_degree, lookup_by_id, CurveId, NamedCurve, CURVES};
pub use encoding::{encode_fixed_be, reverse_bytes, reverse_bytes_copy};
pub use error::{DstuError, Result};
pub use gf2m::{BigUint, CurveGroup, FieldPolynomial, Point, ReductionTerms};
pub use keygen::{derive_public_key, EcKey, KeyGenerator, KeyPair, KeygenConfig};
