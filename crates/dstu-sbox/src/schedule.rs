//! Lookup-table key schedule derived from an S-box.
//!
//! Each table pairs two S-box tables into one 8-bit substitution, places
//! the result at its byte lane of a 32-bit word and rotates the word left
//! by 11 bits:
//!
//! | table | high nibble | low nibble | lane   |
//! |-------|-------------|------------|--------|
//! | `k87` | `k8[i >> 4]` | `k7[i & 15]` | 24..31 |
//! | `k65` | `k6[i >> 4]` | `k5[i & 15]` | 16..23 |
//! | `k43` | `k4[i >> 4]` | `k3[i & 15]` | 8..15  |
//! | `k21` | `k2[i >> 4]` | `k1[i & 15]` | 0..7   |

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_big_array::BigArray;

use crate::error::{Result, SboxError};
use crate::sbox::{PackedSbox, UnpackedSbox, TABLES};

const ENTRIES: usize = 256;
const ROTATION: u32 = 11;

/// Four 256-entry substitution tables with the round rotation folded in.
///
/// Deserialization only accepts tables that some S-box builds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeySchedule {
    #[serde(with = "BigArray")]
    k87: [u32; ENTRIES],
    #[serde(with = "BigArray")]
    k65: [u32; ENTRIES],
    #[serde(with = "BigArray")]
    k43: [u32; ENTRIES],
    #[serde(with = "BigArray")]
    k21: [u32; ENTRIES],
}

/// Wire form of [`KeySchedule`] before the consistency check.
#[derive(Deserialize)]
#[serde(rename = "KeySchedule")]
struct UncheckedSchedule {
    #[serde(with = "BigArray")]
    k87: [u32; ENTRIES],
    #[serde(with = "BigArray")]
    k65: [u32; ENTRIES],
    #[serde(with = "BigArray")]
    k43: [u32; ENTRIES],
    #[serde(with = "BigArray")]
    k21: [u32; ENTRIES],
}

impl UncheckedSchedule {
    fn check(self) -> Result<KeySchedule> {
        let schedule = KeySchedule {
            k87: self.k87,
            k65: self.k65,
            k43: self.k43,
            k21: self.k21,
        };
        schedule.check_consistent()?;
        Ok(schedule)
    }
}

/// `(high, low)` table indices and lane shift for each schedule table.
const LANES: [(usize, usize, u32); 4] = [(7, 6, 24), (5, 4, 16), (3, 2, 8), (1, 0, 0)];

impl KeySchedule {
    /// Builds the four tables from an unpacked S-box.
    pub fn build(sbox: &UnpackedSbox) -> Self {
        let k = sbox.tables();
        let mut out = [[0u32; ENTRIES]; 4];
        for (table, &(high, low, shift)) in out.iter_mut().zip(LANES.iter()) {
            for (i, word) in table.iter_mut().enumerate() {
                let byte = (k[high][i >> 4] << 4) | k[low][i & 15];
                *word = (u32::from(byte) << shift).rotate_left(ROTATION);
            }
        }
        let [k87, k65, k43, k21] = out;
        Self { k87, k65, k43, k21 }
    }

    /// Installs `sbox`, or the built-in table when `None`.
    pub fn from_packed(sbox: Option<&PackedSbox>) -> Self {
        let sbox = sbox.copied().unwrap_or_default();
        debug!(
            "building key schedule from {} S-box",
            if sbox.is_default() { "default" } else { "custom" }
        );
        Self::build(&sbox.unpack())
    }

    /// Recovers the S-box the schedule was built from.
    ///
    /// Only the nibble lanes are read; any other bits are ignored.
    pub fn extract(&self) -> UnpackedSbox {
        let mut k = [[0u8; 16]; TABLES];
        let tables = [&self.k87, &self.k65, &self.k43, &self.k21];
        for (table, &(high, low, shift)) in tables.iter().zip(LANES.iter()) {
            for (i, word) in table.iter().enumerate() {
                let byte = (word.rotate_right(ROTATION) >> shift) as u8;
                k[high][i >> 4] = byte >> 4;
                k[low][i & 15] = byte & 0x0f;
            }
        }
        UnpackedSbox::from_tables_unchecked(k)
    }

    /// Extracts and packs the S-box.
    pub fn to_packed(&self) -> PackedSbox {
        self.extract().pack()
    }

    /// Table combining `k8` and `k7`.
    #[inline]
    pub fn k87(&self) -> &[u32; ENTRIES] {
        &self.k87
    }

    /// Table combining `k6` and `k5`.
    #[inline]
    pub fn k65(&self) -> &[u32; ENTRIES] {
        &self.k65
    }

    /// Table combining `k4` and `k3`.
    #[inline]
    pub fn k43(&self) -> &[u32; ENTRIES] {
        &self.k43
    }

    /// Table combining `k2` and `k1`.
    #[inline]
    pub fn k21(&self) -> &[u32; ENTRIES] {
        &self.k21
    }

    /// Serializes the schedule with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a schedule with `bincode`.
    ///
    /// Fails with `InconsistentSchedule` unless rebuilding from the
    /// extracted S-box reproduces every word.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let unchecked: UncheckedSchedule = bincode::deserialize(bytes)?;
        unchecked.check()
    }

    fn check_consistent(&self) -> Result<()> {
        let rebuilt = Self::build(&self.extract());
        let tables = [
            ("k87", &self.k87, &rebuilt.k87),
            ("k65", &self.k65, &rebuilt.k65),
            ("k43", &self.k43, &rebuilt.k43),
            ("k21", &self.k21, &rebuilt.k21),
        ];
        for (table, stored, expected) in tables {
            if let Some(index) = stored.iter().zip(expected.iter()).position(|(a, b)| a != b) {
                return Err(SboxError::InconsistentSchedule { table, index });
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for KeySchedule {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        UncheckedSchedule::deserialize(deserializer)?
            .check()
            .map_err(serde::de::Error::custom)
    }
}

impl Default for KeySchedule {
    fn default() -> Self {
        Self::from_packed(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbox::SBOX_BYTES;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_sbox(rng: &mut ChaCha20Rng) -> PackedSbox {
        let mut bytes = [0u8; SBOX_BYTES];
        rng.fill_bytes(&mut bytes);
        PackedSbox::new(bytes)
    }

    #[test]
    fn default_schedule_lanes() {
        let _ = env_logger::builder().is_test(true).try_init();
        let schedule = KeySchedule::default();
        // k8[0] = 1, k7[0] = 3
        assert_eq!(schedule.k87()[0].rotate_right(11) >> 24, 0x13);
        assert_eq!(schedule.k87()[0], 0x1300_0000u32.rotate_left(11));
        // k2[14] = 0xa, k1[1] = 0x9
        assert_eq!(schedule.k21()[0xe1].rotate_right(11), 0xa9);
        assert_eq!(schedule.k21()[0xe1], 0xa9 << 11);
    }

    #[test]
    fn words_only_use_their_lane() {
        let schedule = KeySchedule::default();
        let tables = [
            (schedule.k87(), 0xff00_0000u32),
            (schedule.k65(), 0x00ff_0000),
            (schedule.k43(), 0x0000_ff00),
            (schedule.k21(), 0x0000_00ff),
        ];
        for (table, lane) in tables {
            assert!(table.iter().all(|w| w.rotate_right(11) & !lane == 0));
        }
    }

    #[test]
    fn build_extract_round_trip() {
        let default = UnpackedSbox::default();
        assert_eq!(KeySchedule::build(&default).extract(), default);

        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        for _ in 0..10 {
            let packed = random_sbox(&mut rng);
            let schedule = KeySchedule::from_packed(Some(&packed));
            assert_eq!(schedule.extract(), packed.unpack());
            assert_eq!(schedule.to_packed(), packed);
        }
    }

    #[test]
    fn from_packed_defaults() {
        let schedule = KeySchedule::from_packed(None);
        assert_eq!(schedule, KeySchedule::build(&UnpackedSbox::default()));
        assert!(schedule.to_packed().is_default());
        assert_eq!(
            schedule,
            KeySchedule::from_packed(Some(&PackedSbox::default_table()))
        );
    }

    #[test]
    fn different_sboxes_give_different_schedules() {
        let mut bytes = [0u8; SBOX_BYTES];
        bytes.copy_from_slice(PackedSbox::default_table().as_bytes());
        bytes[0] ^= 0x10;
        let custom = KeySchedule::from_packed(Some(&PackedSbox::new(bytes)));
        assert_ne!(custom, KeySchedule::default());
        assert!(!custom.to_packed().is_default());
    }

    #[test]
    fn bincode_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([6u8; 32]);
        let schedule = KeySchedule::from_packed(Some(&random_sbox(&mut rng)));
        let bytes = schedule.to_bytes().expect("serialize");
        assert_eq!(bytes.len(), 4 * 256 * 4);
        let decoded = KeySchedule::from_bytes(&bytes).expect("deserialize");
        assert_eq!(decoded, schedule);

        assert!(matches!(
            KeySchedule::from_bytes(&bytes[..100]),
            Err(SboxError::Serialization(_))
        ));
    }

    #[test]
    fn tampered_schedule_is_rejected() {
        let bytes = KeySchedule::default().to_bytes().unwrap();

        // bit 0 of k87[0] lies outside its byte lane
        let mut outside = bytes.clone();
        outside[0] ^= 0x01;
        assert!(matches!(
            KeySchedule::from_bytes(&outside),
            Err(SboxError::InconsistentSchedule {
                table: "k87",
                index: 0
            })
        ));

        // bit 3 of k87[0] is in the lane but disagrees with k87[16..]
        let mut in_lane = bytes.clone();
        in_lane[0] ^= 0x08;
        assert!(matches!(
            KeySchedule::from_bytes(&in_lane),
            Err(SboxError::InconsistentSchedule {
                table: "k87",
                index: 0
            })
        ));

        let mut last = bytes.clone();
        last[4 * 256 * 3 + 5] ^= 0x40;
        assert!(matches!(
            KeySchedule::from_bytes(&last),
            Err(SboxError::InconsistentSchedule {
                table: "k21",
                index: 1
            })
        ));

        assert!(bincode::deserialize::<KeySchedule>(&outside).is_err());
        assert!(bincode::deserialize::<KeySchedule>(&in_lane).is_err());
        let decoded: KeySchedule = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, KeySchedule::default());
    }
}
