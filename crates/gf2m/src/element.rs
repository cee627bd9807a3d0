//! Fixed-width polynomial representation of GF(2^m) elements.

use core::fmt;
use core::ops::{Add, AddAssign};

use num_bigint::BigUint;

/// Number of 64-bit limbs backing an element.
pub(crate) const LIMBS: usize = 7;

/// Width of a carry-less product before reduction.
pub(crate) const WIDE: usize = 2 * LIMBS;

/// Largest supported field degree.
pub const MAX_DEGREE: u32 = (LIMBS * 64 - 1) as u32;

/// Polynomial over GF(2) of degree below [`MAX_DEGREE`] + 1.
///
/// Bit `i` of the little-endian limb array is the coefficient of `x^i`.
/// Addition is XOR and needs no field context; multiplication and inversion
/// live on [`crate::BinaryField`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(pub(crate) [u64; LIMBS]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self([0; LIMBS]);
    /// The multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0]);

    /// Returns true for the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }

    /// Degree of the polynomial, `None` for zero.
    pub fn degree(&self) -> Option<u32> {
        self.0
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &limb)| limb != 0)
            .map(|(idx, limb)| (idx * 64) as u32 + 63 - limb.leading_zeros())
    }

    /// Coefficient of `x^i`.
    #[inline]
    pub fn bit(&self, i: u32) -> bool {
        let word = (i / 64) as usize;
        word < LIMBS && (self.0[word] >> (i % 64)) & 1 == 1
    }

    #[inline]
    pub(crate) fn flip_bit(&mut self, i: u32) {
        self.0[(i / 64) as usize] ^= 1u64 << (i % 64);
    }

    /// Multiplies by `x^n`, dropping coefficients past the limb capacity.
    pub(crate) fn shl(&self, n: u32) -> Self {
        let words = (n / 64) as usize;
        let bits = n % 64;
        let mut out = [0u64; LIMBS];
        for idx in (words..LIMBS).rev() {
            let src = idx - words;
            let mut value = self.0[src] << bits;
            if bits != 0 && src > 0 {
                value |= self.0[src - 1] >> (64 - bits);
            }
            out[idx] = value;
        }
        Self(out)
    }

    /// Converts an unsigned integer, `None` when it exceeds the limb capacity.
    pub(crate) fn from_biguint(value: &BigUint) -> Option<Self> {
        let digits = value.to_u64_digits();
        if digits.len() > LIMBS {
            return None;
        }
        let mut limbs = [0u64; LIMBS];
        limbs[..digits.len()].copy_from_slice(&digits);
        Some(Self(limbs))
    }

    /// Interprets the coefficient vector as an unsigned integer.
    pub fn to_biguint(&self) -> BigUint {
        let bytes: Vec<u8> = self.0.iter().flat_map(|limb| limb.to_le_bytes()).collect();
        BigUint::from_bytes_le(&bytes)
    }

    /// Big-endian encoding left-padded to `width` bytes, `None` if it does not fit.
    pub fn to_bytes_be(&self, width: usize) -> Option<Vec<u8>> {
        let full: Vec<u8> = self
            .0
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .collect();
        if width >= full.len() {
            let mut out = vec![0u8; width - full.len()];
            out.extend_from_slice(&full);
            return Some(out);
        }
        let (head, tail) = full.split_at(full.len() - width);
        if head.iter().any(|&byte| byte != 0) {
            return None;
        }
        Some(tail.to_vec())
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (dst, src) in self.0.iter_mut().zip(rhs.0.iter()) {
            *dst ^= *src;
        }
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x})", self.to_biguint())
    }
}

/// Carry-less product of two limb arrays using a 4-bit comb.
pub(crate) fn clmul(a: &[u64; LIMBS], b: &[u64; LIMBS]) -> [u64; WIDE] {
    // table[u] = u(x) * b(x) for every 4-bit polynomial u
    let mut table = [[0u64; LIMBS + 1]; 16];
    table[1][..LIMBS].copy_from_slice(b);
    for u in 2..16 {
        table[u] = if u % 2 == 0 {
            shl1(&table[u / 2])
        } else {
            xor(&table[u - 1], &table[1])
        };
    }

    let mut acc = [0u64; WIDE];
    for nibble in (0..16).rev() {
        for (i, word) in a.iter().enumerate() {
            let u = ((word >> (4 * nibble)) & 0xf) as usize;
            if u == 0 {
                continue;
            }
            for (j, entry) in table[u].iter().enumerate() {
                acc[i + j] ^= entry;
            }
        }
        if nibble != 0 {
            for idx in (1..WIDE).rev() {
                acc[idx] = (acc[idx] << 4) | (acc[idx - 1] >> 60);
            }
            acc[0] <<= 4;
        }
    }
    acc
}

fn shl1(src: &[u64; LIMBS + 1]) -> [u64; LIMBS + 1] {
    let mut out = [0u64; LIMBS + 1];
    let mut carry = 0u64;
    for (dst, word) in out.iter_mut().zip(src.iter()) {
        *dst = (word << 1) | carry;
        carry = word >> 63;
    }
    out
}

fn xor(lhs: &[u64; LIMBS + 1], rhs: &[u64; LIMBS + 1]) -> [u64; LIMBS + 1] {
    let mut out = *lhs;
    for (dst, word) in out.iter_mut().zip(rhs.iter()) {
        *dst ^= word;
    }
    out
}
