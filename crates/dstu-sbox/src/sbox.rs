//! Packed and unpacked forms of the 64-byte substitution table.
//!
//! The packed form stores two 4-bit entries per byte. Byte `8 * t + i`
//! holds entries `2 * i` (high nibble) and `2 * i + 1` (low nibble) of
//! table `k(t + 1)`, so tables `k1`..`k8` start at offsets 0, 8, .., 56.

use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

use crate::error::{Result, SboxError};

/// Length of a packed table in bytes.
pub const SBOX_BYTES: usize = 64;

/// Number of logical 16-entry tables.
pub const TABLES: usize = 8;

/// Built-in substitution table used when none is supplied.
#[rustfmt::skip]
pub const DEFAULT_SBOX: [u8; SBOX_BYTES] = [
    0xa9, 0xd6, 0xeb, 0x45, 0xf1, 0x3c, 0x70, 0x82,
    0x80, 0xc4, 0x96, 0x7b, 0x23, 0x1f, 0x5e, 0xad,
    0xf6, 0x58, 0xeb, 0xa4, 0xc0, 0x37, 0x29, 0x1d,
    0x38, 0xd9, 0x6b, 0xf0, 0x25, 0xca, 0x4e, 0x17,
    0xf8, 0xe9, 0x72, 0x0d, 0xc6, 0x15, 0xb4, 0x3a,
    0x28, 0x97, 0x5f, 0x0b, 0xc1, 0xde, 0xa3, 0x64,
    0x38, 0xb5, 0x64, 0xea, 0x2c, 0x17, 0x9f, 0xd0,
    0x12, 0x3e, 0x6d, 0xb8, 0xfa, 0xc5, 0x79, 0x04,
];

/// 64-byte packed substitution table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackedSbox(#[serde(with = "BigArray")] [u8; SBOX_BYTES]);

impl PackedSbox {
    /// Wraps raw packed bytes.
    #[inline]
    pub const fn new(bytes: [u8; SBOX_BYTES]) -> Self {
        Self(bytes)
    }

    /// Copies a packed table out of a borrowed slice.
    ///
    /// The result owns its bytes and does not alias `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let table: [u8; SBOX_BYTES] = bytes
            .try_into()
            .map_err(|_| SboxError::InvalidLength(bytes.len()))?;
        Ok(Self(table))
    }

    /// The built-in table.
    #[inline]
    pub const fn default_table() -> Self {
        Self(DEFAULT_SBOX)
    }

    /// Returns true if the table equals [`DEFAULT_SBOX`] byte for byte.
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SBOX
    }

    /// Raw packed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SBOX_BYTES] {
        &self.0
    }

    /// Splits every byte into its two nibbles.
    pub fn unpack(&self) -> UnpackedSbox {
        let mut tables = [[0u8; 16]; TABLES];
        for (table, chunk) in tables.iter_mut().zip(self.0.chunks_exact(8)) {
            for (i, &byte) in chunk.iter().enumerate() {
                table[2 * i] = byte >> 4;
                table[2 * i + 1] = byte & 0x0f;
            }
        }
        UnpackedSbox { tables }
    }
}

impl Default for PackedSbox {
    fn default() -> Self {
        Self::default_table()
    }
}

impl From<[u8; SBOX_BYTES]> for PackedSbox {
    fn from(bytes: [u8; SBOX_BYTES]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for PackedSbox {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Eight 16-entry tables `k1`..`k8` of 4-bit values.
///
/// Every entry is below 16; construction and deserialization enforce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[u8; 16]; 8]", into = "[[u8; 16]; 8]")]
pub struct UnpackedSbox {
    tables: [[u8; 16]; TABLES],
}

impl UnpackedSbox {
    /// Validates that every entry is a nibble.
    pub fn new(tables: [[u8; 16]; TABLES]) -> Result<Self> {
        for (t, table) in tables.iter().enumerate() {
            if let Some(index) = table.iter().position(|&value| value > 0x0f) {
                return Err(SboxError::NibbleOutOfRange {
                    table: t + 1,
                    index,
                    value: table[index],
                });
            }
        }
        Ok(Self { tables })
    }

    /// Table `k(index + 1)`; index 0 is `k1`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    #[inline]
    pub fn table(&self, index: usize) -> &[u8; 16] {
        &self.tables[index]
    }

    /// All tables, `k1` first.
    #[inline]
    pub fn tables(&self) -> &[[u8; 16]; TABLES] {
        &self.tables
    }

    /// Joins nibble pairs back into the 64-byte form.
    pub fn pack(&self) -> PackedSbox {
        let mut out = [0u8; SBOX_BYTES];
        for (chunk, table) in out.chunks_exact_mut(8).zip(self.tables.iter()) {
            for (i, byte) in chunk.iter_mut().enumerate() {
                *byte = (table[2 * i] << 4) | (table[2 * i + 1] & 0x0f);
            }
        }
        PackedSbox(out)
    }

    pub(crate) fn from_tables_unchecked(tables: [[u8; 16]; TABLES]) -> Self {
        Self { tables }
    }
}

impl Default for UnpackedSbox {
    fn default() -> Self {
        PackedSbox::default_table().unpack()
    }
}

impl TryFrom<[[u8; 16]; TABLES]> for UnpackedSbox {
    type Error = SboxError;

    fn try_from(tables: [[u8; 16]; TABLES]) -> Result<Self> {
        Self::new(tables)
    }
}

impl From<UnpackedSbox> for [[u8; 16]; TABLES] {
    fn from(sbox: UnpackedSbox) -> Self {
        sbox.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn default_table_layout() {
        let unpacked = PackedSbox::default_table().unpack();
        assert_eq!(unpacked.table(0)[0], 0xa);
        assert_eq!(unpacked.table(0)[1], 0x9);
        assert_eq!(unpacked.table(0)[15], 0x2);
        assert_eq!(unpacked.table(1)[14], 0xa);
        assert_eq!(unpacked.table(6)[0], 0x3);
        assert_eq!(unpacked.table(7)[0], 0x1);
        assert_eq!(unpacked.table(7)[15], 0x4);
        assert!(unpacked.tables().iter().flatten().all(|&v| v < 16));
    }

    #[test]
    fn pack_unpack_round_trip() {
        let default = PackedSbox::default_table();
        assert_eq!(default.unpack().pack(), default);
        assert_eq!(UnpackedSbox::default().pack(), default);

        let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
        for _ in 0..100 {
            let mut bytes = [0u8; SBOX_BYTES];
            rng.fill_bytes(&mut bytes);
            let packed = PackedSbox::new(bytes);
            let unpacked = packed.unpack();
            assert_eq!(unpacked.pack(), packed);
            assert_eq!(unpacked.pack().unpack(), unpacked);
        }
    }

    #[test]
    fn default_detection() {
        assert!(PackedSbox::default().is_default());
        for idx in 0..SBOX_BYTES {
            for bit in 0..8 {
                let mut bytes = DEFAULT_SBOX;
                bytes[idx] ^= 1 << bit;
                assert!(!PackedSbox::new(bytes).is_default());
            }
        }
    }

    #[test]
    fn from_slice_copies_and_checks_length() {
        let mut source = DEFAULT_SBOX.to_vec();
        let copy = PackedSbox::from_slice(&source).unwrap();
        source[0] ^= 0xff;
        assert!(copy.is_default());
        assert_eq!(copy.as_ref(), &DEFAULT_SBOX[..]);

        assert!(matches!(
            PackedSbox::from_slice(&source[..63]),
            Err(SboxError::InvalidLength(63))
        ));
        assert!(matches!(
            PackedSbox::from_slice(&[0u8; 65]),
            Err(SboxError::InvalidLength(65))
        ));
    }

    #[test]
    fn unpacked_rejects_wide_entries() {
        let mut tables = *UnpackedSbox::default().tables();
        tables[2][5] = 0x10;
        match UnpackedSbox::new(tables) {
            Err(SboxError::NibbleOutOfRange {
                table,
                index,
                value,
            }) => {
                assert_eq!((table, index, value), (3, 5, 0x10));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn deserialization_validates_nibbles() {
        let sbox = UnpackedSbox::default();
        let bytes = bincode::serialize(&sbox).unwrap();
        let decoded: UnpackedSbox = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, sbox);

        let mut raw = *sbox.tables();
        raw[7][15] = 0xff;
        let bytes = bincode::serialize(&raw).unwrap();
        assert!(bincode::deserialize::<UnpackedSbox>(&bytes).is_err());

        let packed = PackedSbox::default_table();
        let bytes = bincode::serialize(&packed).unwrap();
        assert_eq!(bytes.len(), SBOX_BYTES);
        assert_eq!(bincode::deserialize::<PackedSbox>(&bytes).unwrap(), packed);
    }
}
