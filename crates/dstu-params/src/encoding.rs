//! Fixed-width integer encoding and byte-order helpers.
//!
//! Integers in the curve blobs are big-endian; the signature scheme carries
//! octet strings in little-endian order, so callers convert with the reversal
//! helpers below.

use num_bigint::BigUint;

/// Big-endian encoding of `value`, left-padded with zeros to `width` bytes.
///
/// Returns `None` when the value needs more than `width` bytes.
pub fn encode_fixed_be(value: &BigUint, width: usize) -> Option<Vec<u8>> {
    let bytes = if value.bits() == 0 {
        Vec::new()
    } else {
        value.to_bytes_be()
    };
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(&bytes);
    Some(out)
}

/// Reverses a byte buffer in place.
#[inline]
pub fn reverse_bytes(buf: &mut [u8]) {
    buf.reverse();
}

/// Writes `src` into `dst` in reverse order.
///
/// `dst[i]` receives `src[src.len() - 1 - i]`. Both buffers must have the
/// same length; debug builds panic on a mismatch.
pub fn reverse_bytes_copy(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len(), "reverse_bytes_copy length mismatch");
    for (to, from) in dst.iter_mut().zip(src.iter().rev()) {
        *to = *from;
    }
}
