//! Reduction polynomials for GF(2^m).

use crate::element::MAX_DEGREE;
use crate::error::Gf2mError;

/// Middle terms of a reduction polynomial, besides `x^m` and `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReductionTerms {
    /// `x^m + x^k + 1`.
    Trinomial {
        /// Middle exponent.
        k: u32,
    },
    /// `x^m + x^k1 + x^k2 + x^k3 + 1` with `k1 > k2 > k3`.
    Pentanomial {
        /// Highest middle exponent.
        k1: u32,
        /// Second middle exponent.
        k2: u32,
        /// Lowest middle exponent.
        k3: u32,
    },
}

/// Irreducible polynomial defining a binary field of degree `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldPolynomial {
    degree: u32,
    terms: ReductionTerms,
}

impl FieldPolynomial {
    /// `x^m + x^k + 1`.
    pub const fn trinomial(degree: u32, k: u32) -> Self {
        Self {
            degree,
            terms: ReductionTerms::Trinomial { k },
        }
    }

    /// `x^m + x^k1 + x^k2 + x^k3 + 1`.
    pub const fn pentanomial(degree: u32, k1: u32, k2: u32, k3: u32) -> Self {
        Self {
            degree,
            terms: ReductionTerms::Pentanomial { k1, k2, k3 },
        }
    }

    /// Field degree `m`.
    #[inline]
    pub const fn degree(&self) -> u32 {
        self.degree
    }

    /// Middle terms of the polynomial.
    #[inline]
    pub const fn terms(&self) -> ReductionTerms {
        self.terms
    }

    /// Number of bytes needed to hold a reduced field element, `ceil(m / 8)`.
    #[inline]
    pub const fn byte_width(&self) -> usize {
        (self.degree as usize + 7) / 8
    }

    /// Exponents below `m` with a nonzero coefficient, highest first, ending with `0`.
    pub fn tail_exponents(&self) -> Vec<u32> {
        match self.terms {
            ReductionTerms::Trinomial { k } => vec![k, 0],
            ReductionTerms::Pentanomial { k1, k2, k3 } => vec![k1, k2, k3, 0],
        }
    }

    /// Checks that every middle exponent lies strictly between `0` and `m`,
    /// in strictly decreasing order, and that `m` is representable.
    pub fn validate(&self) -> Result<(), Gf2mError> {
        if self.degree < 2 || self.degree > MAX_DEGREE {
            return Err(Gf2mError::UnsupportedDegree(self.degree));
        }
        let middle = match self.terms {
            ReductionTerms::Trinomial { k } => vec![k],
            ReductionTerms::Pentanomial { k1, k2, k3 } => vec![k1, k2, k3],
        };
        let in_range = middle.iter().all(|&k| k > 0 && k < self.degree);
        let decreasing = middle.windows(2).all(|pair| pair[0] > pair[1]);
        if in_range && decreasing {
            Ok(())
        } else {
            Err(Gf2mError::InvalidPolynomial {
                degree: self.degree,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_exponents_follow_variant() {
        let tri = FieldPolynomial::trinomial(167, 6);
        assert_eq!(tri.tail_exponents(), vec![6, 0]);
        let penta = FieldPolynomial::pentanomial(163, 7, 6, 3);
        assert_eq!(penta.tail_exponents(), vec![7, 6, 3, 0]);
    }

    #[test]
    fn byte_width_rounds_up() {
        assert_eq!(FieldPolynomial::trinomial(167, 6).byte_width(), 21);
        assert_eq!(FieldPolynomial::trinomial(257, 12).byte_width(), 33);
        assert_eq!(FieldPolynomial::pentanomial(8, 4, 3, 1).byte_width(), 1);
    }

    #[test]
    fn validate_rejects_bad_exponents() {
        assert!(FieldPolynomial::pentanomial(163, 7, 6, 3).validate().is_ok());
        assert_eq!(
            FieldPolynomial::trinomial(167, 167).validate(),
            Err(Gf2mError::InvalidPolynomial { degree: 167 })
        );
        assert_eq!(
            FieldPolynomial::trinomial(167, 0).validate(),
            Err(Gf2mError::InvalidPolynomial { degree: 167 })
        );
        assert_eq!(
            FieldPolynomial::pentanomial(163, 6, 7, 3).validate(),
            Err(Gf2mError::InvalidPolynomial { degree: 163 })
        );
        assert_eq!(
            FieldPolynomial::trinomial(600, 5).validate(),
            Err(Gf2mError::UnsupportedDegree(600))
        );
    }
}
