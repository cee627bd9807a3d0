//! Cyclic subgroup of a binary curve generated by a base point.

use num_bigint::BigUint;

use crate::curve::{BinaryCurve, Point};
use crate::error::Gf2mError;
use crate::field::BinaryField;

/// Domain parameters: curve, generator, order and cofactor.
///
/// Equality is algebraic: two groups are equal when field polynomial,
/// coefficients, generator, order and cofactor all match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveGroup {
    curve: BinaryCurve,
    generator: Point,
    order: BigUint,
    cofactor: BigUint,
}

impl CurveGroup {
    /// Attaches a generator with its order and cofactor to `curve`.
    pub fn new(
        curve: BinaryCurve,
        generator: Point,
        order: BigUint,
        cofactor: BigUint,
    ) -> Result<Self, Gf2mError> {
        curve.check_point(&generator)?;
        if order.bits() == 0 {
            return Err(Gf2mError::InvalidOrder);
        }
        Ok(Self {
            curve,
            generator,
            order,
            cofactor,
        })
    }

    /// The curve.
    #[inline]
    pub fn curve(&self) -> &BinaryCurve {
        &self.curve
    }

    /// The field the curve is defined over.
    #[inline]
    pub fn field(&self) -> &BinaryField {
        self.curve.field()
    }

    /// Field degree `m`.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.curve.field().degree()
    }

    /// Base point.
    #[inline]
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Order of the base point.
    #[inline]
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Cofactor.
    #[inline]
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    /// `kG`.
    pub fn mul_generator(&self, scalar: &BigUint) -> Result<Point, Gf2mError> {
        self.curve.mul(&self.generator, scalar)
    }

    /// Returns true if the stated order annihilates the generator.
    pub fn check_order(&self) -> Result<bool, Gf2mError> {
        Ok(self.mul_generator(&self.order)?.is_infinity())
    }
}
