//! Arithmetic in GF(2^m) with a trinomial or pentanomial modulus.

use core::mem;

use num_bigint::BigUint;

use crate::element::{clmul, FieldElement, WIDE};
use crate::error::Gf2mError;
use crate::poly::FieldPolynomial;

/// Binary field defined by an irreducible [`FieldPolynomial`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryField {
    poly: FieldPolynomial,
    modulus: FieldElement,
    tail: Vec<u32>,
}

impl BinaryField {
    /// Builds the field modulus from the polynomial description.
    pub fn new(poly: FieldPolynomial) -> Result<Self, Gf2mError> {
        poly.validate()?;
        let tail = poly.tail_exponents();
        let mut modulus = FieldElement::ZERO;
        modulus.flip_bit(poly.degree());
        for &exp in &tail {
            modulus.flip_bit(exp);
        }
        Ok(Self {
            poly,
            modulus,
            tail,
        })
    }

    /// Polynomial description of the modulus.
    #[inline]
    pub fn polynomial(&self) -> &FieldPolynomial {
        &self.poly
    }

    /// Field degree `m`.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.poly.degree()
    }

    /// Encoded width of an element in bytes.
    #[inline]
    pub fn byte_width(&self) -> usize {
        self.poly.byte_width()
    }

    /// The modulus as a polynomial of degree `m`.
    #[inline]
    pub fn modulus(&self) -> &FieldElement {
        &self.modulus
    }

    /// Returns true if `value` is a reduced element (degree below `m`).
    pub fn contains(&self, value: &FieldElement) -> bool {
        value.degree().map_or(true, |deg| deg < self.degree())
    }

    /// Converts an unsigned integer to a field element without reducing it.
    ///
    /// Values of `m` bits or more are rejected.
    pub fn element(&self, value: &BigUint) -> Result<FieldElement, Gf2mError> {
        let too_wide = Gf2mError::Decode {
            bits: value.bits(),
            degree: self.degree(),
        };
        if value.bits() > u64::from(self.degree()) {
            return Err(too_wide);
        }
        FieldElement::from_biguint(value).ok_or(too_wide)
    }

    /// Big-endian bytes to field element, see [`BinaryField::element`].
    pub fn element_from_bytes(&self, bytes: &[u8]) -> Result<FieldElement, Gf2mError> {
        self.element(&BigUint::from_bytes_be(bytes))
    }

    /// `a * b mod f`.
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        let mut wide = clmul(&a.0, &b.0);
        self.reduce_wide(&mut wide)
    }

    /// `a^2 mod f`.
    #[inline]
    pub fn square(&self, a: &FieldElement) -> FieldElement {
        self.mul(a, a)
    }

    /// Multiplicative inverse via the binary extended Euclidean algorithm.
    ///
    /// Returns `None` for zero, or when the modulus shares a factor with `a`.
    pub fn invert(&self, a: &FieldElement) -> Option<FieldElement> {
        let mut u = self.reduce(a);
        let mut v = self.modulus;
        let mut g1 = FieldElement::ONE;
        let mut g2 = FieldElement::ZERO;

        loop {
            let du = u.degree()?;
            if du == 0 {
                break;
            }
            let dv = v.degree()?;
            let shift = if du < dv {
                mem::swap(&mut u, &mut v);
                mem::swap(&mut g1, &mut g2);
                dv - du
            } else {
                du - dv
            };
            u += v.shl(shift);
            g1 += g2.shl(shift);
        }

        Some(self.reduce(&g1))
    }

    /// `a / b mod f`, `None` if `b` has no inverse.
    pub fn div(&self, a: &FieldElement, b: &FieldElement) -> Option<FieldElement> {
        let inv = self.invert(b)?;
        Some(self.mul(a, &inv))
    }

    /// Reduces an arbitrary element modulo `f`.
    pub fn reduce(&self, a: &FieldElement) -> FieldElement {
        if self.contains(a) {
            return *a;
        }
        let mut wide = [0u64; WIDE];
        wide[..a.0.len()].copy_from_slice(&a.0);
        self.reduce_wide(&mut wide)
    }

    fn reduce_wide(&self, wide: &mut [u64; WIDE]) -> FieldElement {
        let m = self.degree() as usize;
        for i in (m..WIDE * 64).rev() {
            let (word, offset) = (i / 64, i % 64);
            if (wide[word] >> offset) & 1 == 0 {
                continue;
            }
            // x^i = x^(i-m) * (f - x^m)
            wide[word] ^= 1u64 << offset;
            let shift = i - m;
            for &exp in &self.tail {
                let j = shift + exp as usize;
                wide[j / 64] ^= 1u64 << (j % 64);
            }
        }
        let mut out = FieldElement::ZERO;
        let len = out.0.len();
        out.0.copy_from_slice(&wide[..len]);
        out
    }
}
