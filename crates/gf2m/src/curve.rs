//! Non-supersingular binary curves `y^2 + xy = x^3 + a x^2 + b`.

use num_bigint::BigUint;

use crate::element::FieldElement;
use crate::error::Gf2mError;
use crate::field::BinaryField;

const WINDOW_BITS: usize = 4;
const TABLE_SIZE: usize = 1 << WINDOW_BITS;

/// Affine point or the point at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Point {
    /// Group identity.
    Infinity,
    /// Finite point with affine coordinates.
    Affine {
        /// x-coordinate.
        x: FieldElement,
        /// y-coordinate.
        y: FieldElement,
    },
}

impl Point {
    /// Returns true for the identity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Affine coordinates, `None` for the identity.
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }
}

/// Curve over a [`BinaryField`] with coefficients `a` and `b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryCurve {
    field: BinaryField,
    a: FieldElement,
    b: FieldElement,
}

impl BinaryCurve {
    /// Creates a curve; both coefficients must be reduced field elements.
    pub fn new(field: BinaryField, a: FieldElement, b: FieldElement) -> Result<Self, Gf2mError> {
        for coeff in [&a, &b] {
            if !field.contains(coeff) {
                return Err(Gf2mError::Decode {
                    bits: coeff.degree().map_or(0, |deg| u64::from(deg) + 1),
                    degree: field.degree(),
                });
            }
        }
        Ok(Self { field, a, b })
    }

    /// Underlying field.
    #[inline]
    pub fn field(&self) -> &BinaryField {
        &self.field
    }

    /// Coefficient `a`.
    #[inline]
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Coefficient `b`.
    #[inline]
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// Builds a finite point from integer coordinates and checks it lies on the curve.
    pub fn point(&self, x: &BigUint, y: &BigUint) -> Result<Point, Gf2mError> {
        let x = self.field.element(x)?;
        let y = self.field.element(y)?;
        let point = Point::Affine { x, y };
        self.check_point(&point)?;
        Ok(point)
    }

    /// Fails unless `point` is finite and satisfies the curve equation.
    pub fn check_point(&self, point: &Point) -> Result<(), Gf2mError> {
        if point.is_infinity() {
            return Err(Gf2mError::PointAtInfinity);
        }
        if !self.is_on_curve(point) {
            return Err(Gf2mError::NotOnCurve);
        }
        Ok(())
    }

    /// Checks `y^2 + xy = x^3 + a x^2 + b`; the identity is always on the curve.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        let Point::Affine { x, y } = point else {
            return true;
        };
        if !self.field.contains(x) || !self.field.contains(y) {
            return false;
        }
        let f = &self.field;
        let lhs = f.mul(y, &(*y + *x));
        let x2 = f.square(x);
        let rhs = f.mul(&x2, &(*x + self.a)) + self.b;
        lhs == rhs
    }

    /// `-P = (x, x + y)`.
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine { x: *x, y: *x + *y },
        }
    }

    /// `2P`.
    pub fn double(&self, point: &Point) -> Point {
        let Point::Affine { x, y } = point else {
            return Point::Infinity;
        };
        let f = &self.field;
        let Some(inv_x) = f.invert(x) else {
            // x = 0 means P = -P
            return Point::Infinity;
        };
        let lambda = *x + f.mul(y, &inv_x);
        let x3 = f.square(&lambda) + lambda + self.a;
        let y3 = f.square(x) + f.mul(&(lambda + FieldElement::ONE), &x3);
        Point::Affine { x: x3, y: y3 }
    }

    /// `P + Q`.
    pub fn add(&self, p: &Point, q: &Point) -> Point {
        let (x1, y1, x2, y2) = match (p, q) {
            (Point::Infinity, _) => return *q,
            (_, Point::Infinity) => return *p,
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };
        if x1 == x2 {
            return if y1 == y2 {
                self.double(p)
            } else {
                Point::Infinity
            };
        }
        let f = &self.field;
        let dx = *x1 + *x2;
        let Some(lambda) = f.div(&(*y1 + *y2), &dx) else {
            return Point::Infinity;
        };
        let x3 = f.square(&lambda) + lambda + dx + self.a;
        let y3 = f.mul(&lambda, &(*x1 + x3)) + x3 + *y1;
        Point::Affine { x: x3, y: y3 }
    }

    /// `kP` by left-to-right fixed-window double-and-add.
    ///
    /// The window table is reserved fallibly; `Allocation` is returned when
    /// that reservation cannot be satisfied.
    pub fn mul(&self, point: &Point, scalar: &BigUint) -> Result<Point, Gf2mError> {
        let mut table = Vec::new();
        table
            .try_reserve_exact(TABLE_SIZE)
            .map_err(|_| Gf2mError::Allocation)?;
        table.push(Point::Infinity);
        table.push(*point);
        for i in 2..TABLE_SIZE {
            let next = if i % 2 == 0 {
                self.double(&table[i / 2])
            } else {
                self.add(&table[i - 1], point)
            };
            table.push(next);
        }

        let mut acc = Point::Infinity;
        for digit in scalar.to_u64_digits().iter().rev() {
            for shift in (0..64).step_by(WINDOW_BITS).rev() {
                for _ in 0..WINDOW_BITS {
                    acc = self.double(&acc);
                }
                let window = ((digit >> shift) & 0xf) as usize;
                if window != 0 {
                    acc = self.add(&acc, &table[window]);
                }
            }
        }
        Ok(acc)
    }
}
