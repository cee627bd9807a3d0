//! Decoding of curve parameter blobs into curve groups.

use gf2m::{BinaryCurve, BinaryField, CurveGroup, FieldElement, FieldPolynomial, Point};
use log::{debug, warn};
use num_bigint::BigUint;

use crate::catalog::{lookup_by_degree, lookup_by_id, CurveId, NamedCurve, CURVES};
use crate::encoding::encode_fixed_be;
use crate::error::{DstuError, Result};

/// Builds the curve group of a catalog entry.
///
/// A fresh group is decoded on every call; callers that need the group
/// repeatedly should keep the returned value.
pub fn build(curve: &NamedCurve) -> Result<CurveGroup> {
    let group = group_from_blob(&curve.polynomial, curve.blob)?;
    debug!("built curve group {} (m = {})", curve.id, curve.degree());
    Ok(group)
}

/// Looks up `id` in the catalog and builds its group.
pub fn group_from_id(id: CurveId) -> Result<CurveGroup> {
    let curve = lookup_by_id(id).ok_or(DstuError::UnknownCurve(id))?;
    build(curve)
}

/// Decodes `[a flag][b][N][Px][Py]` over the field defined by `poly`.
///
/// Every integer is `ceil(m / 8)` bytes, big-endian. A nonzero flag byte
/// selects `a = 1`, zero selects `a = 0`. The cofactor is fixed at one.
/// The blob must contain exactly the expected number of bytes.
pub fn group_from_blob(poly: &FieldPolynomial, blob: &[u8]) -> Result<CurveGroup> {
    let field = BinaryField::new(*poly)?;
    let width = field.byte_width();
    let mut reader = BlobReader::new(blob);

    let a = if reader.take(1)?[0] != 0 {
        FieldElement::ONE
    } else {
        FieldElement::ZERO
    };
    let b = field.element(&reader.integer(width)?)?;
    let order = reader.integer(width)?;
    let px = reader.integer(width)?;
    let py = reader.integer(width)?;
    reader.finish()?;

    let curve = BinaryCurve::new(field, a, b)?;
    let generator = curve.point(&px, &py)?;
    Ok(CurveGroup::new(curve, generator, order, BigUint::from(1u32))?)
}

/// Encodes a group back into the blob layout read by [`group_from_blob`].
///
/// Fails with `Decode` when `a` is neither 0 nor 1, when the generator is the
/// point at infinity, or when a value does not fit the field width. The
/// cofactor is not part of the layout.
pub fn group_to_blob(group: &CurveGroup) -> Result<Vec<u8>> {
    let width = group.field().byte_width();
    let curve = group.curve();
    let flag = if *curve.a() == FieldElement::ONE {
        1u8
    } else if curve.a().is_zero() {
        0u8
    } else {
        return Err(DstuError::Decode("coefficient a is neither 0 nor 1".into()));
    };
    let Point::Affine { x, y } = group.generator() else {
        return Err(DstuError::Decode("generator is the point at infinity".into()));
    };

    let too_wide = || DstuError::Decode(format!("value wider than {width} bytes"));
    let mut blob = Vec::with_capacity(1 + 4 * width);
    blob.push(flag);
    blob.extend(curve.b().to_bytes_be(width).ok_or_else(too_wide)?);
    blob.extend(encode_fixed_be(group.order(), width).ok_or_else(too_wide)?);
    blob.extend(x.to_bytes_be(width).ok_or_else(too_wide)?);
    blob.extend(y.to_bytes_be(width).ok_or_else(too_wide)?);
    Ok(blob)
}

/// Identifies a group as one of the catalog curves.
///
/// The catalog entry with the same field degree is rebuilt and compared
/// algebraically; a degree match alone is not enough.
pub fn curve_id_from_group(group: &CurveGroup) -> Option<CurveId> {
    let named = &CURVES[lookup_by_degree(group.degree())?];
    match build(named) {
        Ok(reference) if reference == *group => {
            debug!("group matches catalog curve {}", named.id);
            Some(named.id)
        }
        Ok(_) => {
            debug!("group of degree {} differs from {}", group.degree(), named.id);
            None
        }
        Err(err) => {
            warn!("catalog curve {} failed to rebuild: {err}", named.id);
            None
        }
    }
}

struct BlobReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BlobReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                DstuError::Decode(format!(
                    "blob of {} bytes truncated, need {len} bytes at offset {}",
                    self.data.len(),
                    self.offset
                ))
            })?;
        let out = &self.data[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    fn integer(&mut self, width: usize) -> Result<BigUint> {
        Ok(BigUint::from_bytes_be(self.take(width)?))
    }

    fn finish(self) -> Result<()> {
        if self.offset != self.data.len() {
            return Err(DstuError::Decode(format!(
                "{} trailing bytes after curve parameters",
                self.data.len() - self.offset
            )));
        }
        Ok(())
    }
}
