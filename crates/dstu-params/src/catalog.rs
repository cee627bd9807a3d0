//! Static catalog of the DSTU 4145 named binary curves.

use core::fmt;

use gf2m::FieldPolynomial;
use serde::{Deserialize, Serialize};

use crate::data;

/// Opaque numeric identifier of a named curve.
///
/// Any `u32` can be wrapped; only the ten catalog values resolve to a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveId(u32);

impl CurveId {
    /// 163-bit curve, pentanomial `x^163 + x^7 + x^6 + x^3 + 1`.
    pub const UACURVE0: Self = Self(0);
    /// 167-bit curve, trinomial `x^167 + x^6 + 1`.
    pub const UACURVE1: Self = Self(1);
    /// 173-bit curve, pentanomial `x^173 + x^10 + x^2 + x + 1`.
    pub const UACURVE2: Self = Self(2);
    /// 179-bit curve, pentanomial `x^179 + x^4 + x^2 + x + 1`.
    pub const UACURVE3: Self = Self(3);
    /// 191-bit curve, trinomial `x^191 + x^9 + 1`.
    pub const UACURVE4: Self = Self(4);
    /// 233-bit curve, pentanomial `x^233 + x^9 + x^4 + x + 1`.
    pub const UACURVE5: Self = Self(5);
    /// 257-bit curve, trinomial `x^257 + x^12 + 1`.
    pub const UACURVE6: Self = Self(6);
    /// 307-bit curve, pentanomial `x^307 + x^8 + x^4 + x^2 + 1`.
    pub const UACURVE7: Self = Self(7);
    /// 367-bit curve, trinomial `x^367 + x^21 + 1`.
    pub const UACURVE8: Self = Self(8);
    /// 431-bit curve, pentanomial `x^431 + x^5 + x^3 + x + 1`.
    pub const UACURVE9: Self = Self(9);

    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Conventional short name, `None` for identifiers outside the catalog.
    pub fn name(self) -> Option<&'static str> {
        lookup_by_id(self).map(|curve| curve.name)
    }

    /// Identifiers of every catalog entry, in catalog order.
    pub fn all() -> impl Iterator<Item = CurveId> {
        CURVES.iter().map(|curve| curve.id)
    }
}

impl From<u32> for CurveId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "curve#{}", self.0),
        }
    }
}

/// Catalog entry: identifier, reduction polynomial and encoded parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedCurve {
    /// Identifier of the curve.
    pub id: CurveId,
    /// Short name, `uacurve0` through `uacurve9`.
    pub name: &'static str,
    /// Field reduction polynomial.
    pub polynomial: FieldPolynomial,
    /// `[a flag][b][N][Px][Py]`, see [`crate::group_from_blob`].
    pub blob: &'static [u8],
}

impl NamedCurve {
    /// Field degree `m`.
    #[inline]
    pub const fn degree(&self) -> u32 {
        self.polynomial.degree()
    }
}

/// The ten supported curves, ordered by field degree.
pub static CURVES: [NamedCurve; 10] = [
    NamedCurve {
        id: CurveId::UACURVE0,
        name: "uacurve0",
        polynomial: FieldPolynomial::pentanomial(163, 7, 6, 3),
        blob: &data::DATA163,
    },
    NamedCurve {
        id: CurveId::UACURVE1,
        name: "uacurve1",
        polynomial: FieldPolynomial::trinomial(167, 6),
        blob: &data::DATA167,
    },
    NamedCurve {
        id: CurveId::UACURVE2,
        name: "uacurve2",
        polynomial: FieldPolynomial::pentanomial(173, 10, 2, 1),
        blob: &data::DATA173,
    },
    NamedCurve {
        id: CurveId::UACURVE3,
        name: "uacurve3",
        polynomial: FieldPolynomial::pentanomial(179, 4, 2, 1),
        blob: &data::DATA179,
    },
    NamedCurve {
        id: CurveId::UACURVE4,
        name: "uacurve4",
        polynomial: FieldPolynomial::trinomial(191, 9),
        blob: &data::DATA191,
    },
    NamedCurve {
        id: CurveId::UACURVE5,
        name: "uacurve5",
        polynomial: FieldPolynomial::pentanomial(233, 9, 4, 1),
        blob: &data::DATA233,
    },
    NamedCurve {
        id: CurveId::UACURVE6,
        name: "uacurve6",
        polynomial: FieldPolynomial::trinomial(257, 12),
        blob: &data::DATA257,
    },
    NamedCurve {
        id: CurveId::UACURVE7,
        name: "uacurve7",
        polynomial: FieldPolynomial::pentanomial(307, 8, 4, 2),
        blob: &data::DATA307,
    },
    NamedCurve {
        id: CurveId::UACURVE8,
        name: "uacurve8",
        polynomial: FieldPolynomial::trinomial(367, 21),
        blob: &data::DATA367,
    },
    NamedCurve {
        id: CurveId::UACURVE9,
        name: "uacurve9",
        polynomial: FieldPolynomial::pentanomial(431, 5, 3, 1),
        blob: &data::DATA431,
    },
];

/// Finds the catalog entry for `id`.
pub fn lookup_by_id(id: CurveId) -> Option<&'static NamedCurve> {
    CURVES.iter().find(|curve| curve.id == id)
}

/// Index of the first catalog entry whose field degree is `degree`.
pub fn lookup_by_degree(degree: u32) -> Option<usize> {
    CURVES.iter().position(|curve| curve.degree() == degree)
}
