//! Private scalar sampling and public key derivation.
//!
//! The public key of a DSTU 4145 key pair is the *negation* of `d * G`.
//! Both [`KeyGenerator::generate`] and [`derive_public_key`] apply that
//! convention.

use core::fmt;

use gf2m::{CurveGroup, Gf2mError, Point};
use log::{debug, trace, warn};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::error::{DstuError, Result};

/// Configuration for the key generator.
#[derive(Clone, Debug)]
pub struct KeygenConfig {
    /// Upper bound on RNG draws per scalar before giving up.
    pub max_draws: u32,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self { max_draws: 128 }
    }
}

/// Private scalar `d` in `[1, N - 1]` and public point `Q = -(d * G)`.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_scalar: BigUint,
    public_point: Point,
}

impl KeyPair {
    /// The private scalar.
    #[inline]
    pub fn private_scalar(&self) -> &BigUint {
        &self.private_scalar
    }

    /// The public point.
    #[inline]
    pub fn public_point(&self) -> &Point {
        &self.public_point
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_scalar", &"<redacted>")
            .field("public_point", &self.public_point)
            .finish()
    }
}

/// Key generator parametrized by an RNG.
pub struct KeyGenerator<R: RngCore + CryptoRng> {
    rng: R,
    config: KeygenConfig,
}

impl<R: RngCore + CryptoRng> KeyGenerator<R> {
    /// Creates a new generator with default configuration.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: KeygenConfig::default(),
        }
    }

    /// Creates a generator with explicit configuration.
    pub fn with_config(rng: R, config: KeygenConfig) -> Self {
        Self { rng, config }
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut KeygenConfig {
        &mut self.config
    }

    /// Samples a private scalar for `group` and derives its public point.
    pub fn generate(&mut self, group: &CurveGroup) -> Result<KeyPair> {
        let private_scalar = self.random_scalar(group.order())?;
        let public_point = derive_public_key(group, &private_scalar)?;
        debug!("generated key pair on a {}-bit curve", group.degree());
        Ok(KeyPair {
            private_scalar,
            public_point,
        })
    }

    /// Fills both halves of `key` using its group.
    pub fn generate_key(&mut self, key: &mut EcKey) -> Result<()> {
        let pair = {
            let group = key.group.as_ref().ok_or(DstuError::MissingGroup)?;
            self.generate(group)?
        };
        key.private_key = Some(pair.private_scalar);
        key.public_key = Some(pair.public_point);
        Ok(())
    }

    /// Draws a uniform integer in `[1, order - 1]` by rejection sampling.
    ///
    /// Each draw reads `ceil(bits(order) / 8)` bytes with the excess top bits
    /// masked off, so a draw is rejected with probability below one half.
    pub fn random_scalar(&mut self, order: &BigUint) -> Result<BigUint> {
        let bits = order.bits();
        let len = ((bits + 7) / 8) as usize;
        let top_mask = 0xffu8 >> (len as u64 * 8 - bits);
        let mut buf = vec![0u8; len];

        for draw in 0..self.config.max_draws {
            self.rng.try_fill_bytes(&mut buf).map_err(DstuError::Rng)?;
            if let Some(first) = buf.first_mut() {
                *first &= top_mask;
            }
            let candidate = BigUint::from_bytes_be(&buf);
            if candidate.bits() != 0 && &candidate < order {
                return Ok(candidate);
            }
            trace!("rejected scalar draw {draw}");
        }
        warn!(
            "no scalar in [1, N - 1] after {} draws",
            self.config.max_draws
        );
        Err(DstuError::RngExhausted(self.config.max_draws))
    }
}

/// Computes `Q = -(d * G)` for a private scalar `d` in `[1, N - 1]`.
pub fn derive_public_key(group: &CurveGroup, private_scalar: &BigUint) -> Result<Point> {
    check_scalar(group, private_scalar)?;
    let product = group
        .mul_generator(private_scalar)
        .map_err(DstuError::ScalarMultiply)?;
    if product.is_infinity() {
        return Err(DstuError::ScalarMultiply(Gf2mError::PointAtInfinity));
    }
    let public = group.curve().negate(&product);
    group
        .curve()
        .check_point(&public)
        .map_err(DstuError::PointOperation)?;
    Ok(public)
}

fn check_scalar(group: &CurveGroup, scalar: &BigUint) -> Result<()> {
    if scalar.bits() == 0 || scalar >= group.order() {
        return Err(DstuError::InvalidScalar);
    }
    Ok(())
}

/// Key container that is filled in stages: group, then private scalar,
/// then public point.
#[derive(Clone, Default)]
pub struct EcKey {
    group: Option<CurveGroup>,
    private_key: Option<BigUint>,
    public_key: Option<Point>,
}

impl EcKey {
    /// An empty key without a group.
    pub fn new() -> Self {
        Self::default()
    }

    /// A key bound to `group` with no key material yet.
    pub fn with_group(group: CurveGroup) -> Self {
        Self {
            group: Some(group),
            ..Self::default()
        }
    }

    /// The associated group, if any.
    pub fn group(&self) -> Option<&CurveGroup> {
        self.group.as_ref()
    }

    /// Binds the key to `group`, discarding any existing key material.
    pub fn set_group(&mut self, group: CurveGroup) {
        self.group = Some(group);
        self.private_key = None;
        self.public_key = None;
    }

    /// The private scalar, if set.
    pub fn private_key(&self) -> Option<&BigUint> {
        self.private_key.as_ref()
    }

    /// The public point, if set.
    pub fn public_key(&self) -> Option<&Point> {
        self.public_key.as_ref()
    }

    /// Installs a private scalar and drops any stale public point.
    pub fn set_private_key(&mut self, scalar: BigUint) -> Result<()> {
        let group = self.group.as_ref().ok_or(DstuError::MissingGroup)?;
        check_scalar(group, &scalar)?;
        self.private_key = Some(scalar);
        self.public_key = None;
        Ok(())
    }

    /// Derives and stores the public point from the private scalar.
    pub fn add_public_key(&mut self) -> Result<&Point> {
        let group = self.group.as_ref().ok_or(DstuError::MissingGroup)?;
        let scalar = self.private_key.as_ref().ok_or(DstuError::MissingKey)?;
        let public = derive_public_key(group, scalar)?;
        Ok(&*self.public_key.insert(public))
    }

    /// Both halves as a [`KeyPair`], once they exist.
    pub fn key_pair(&self) -> Option<KeyPair> {
        Some(KeyPair {
            private_scalar: self.private_key.clone()?,
            public_point: self.public_key?,
        })
    }
}

impl fmt::Debug for EcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcKey")
            .field("degree", &self.group.as_ref().map(CurveGroup::degree))
            .field("has_private_key", &self.private_key.is_some())
            .field("public_key", &self.public_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build, group_from_id};
    use crate::catalog::{CurveId, CURVES};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn assert_valid_pair(group: &CurveGroup, pair: &KeyPair) {
        let d = pair.private_scalar();
        assert!(d.bits() != 0);
        assert!(d < group.order());
        let expected = group.mul_generator(d).unwrap();
        assert_eq!(group.curve().negate(pair.public_point()), expected);
        assert_ne!(*pair.public_point(), expected);
        assert!(group.curve().is_on_curve(pair.public_point()));
    }

    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ZeroRng {}

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn keys_on_every_curve_use_negated_public_point() {
        init_logging();
        let mut generator = KeyGenerator::new(ChaCha20Rng::from_seed([11u8; 32]));
        for named in CURVES.iter() {
            let group = build(named).unwrap();
            for _ in 0..2 {
                let pair = generator.generate(&group).expect(named.name);
                assert_valid_pair(&group, &pair);
            }
        }
    }

    #[test]
    fn hundred_keys_on_smallest_curves() {
        let mut generator = KeyGenerator::new(ChaCha20Rng::from_seed([18u8; 32]));
        for id in [CurveId::UACURVE0, CurveId::UACURVE1] {
            let group = group_from_id(id).unwrap();
            for _ in 0..100 {
                let pair = generator.generate(&group).expect("key pair");
                assert_valid_pair(&group, &pair);
            }
        }
    }

    #[test]
    #[ignore = "1000 keys on each of the ten curves"]
    fn thousand_keys_per_curve() {
        let mut generator = KeyGenerator::new(ChaCha20Rng::from_seed([12u8; 32]));
        for named in CURVES.iter() {
            let group = build(named).unwrap();
            for _ in 0..1000 {
                let pair = generator.generate(&group).expect(named.name);
                assert_valid_pair(&group, &pair);
            }
        }
    }

    #[test]
    fn scalars_stay_in_range() {
        let mut generator = KeyGenerator::new(ChaCha20Rng::from_seed([13u8; 32]));
        for named in CURVES.iter() {
            let group = build(named).unwrap();
            for _ in 0..1000 {
                let d = generator.random_scalar(group.order()).unwrap();
                assert!(d.bits() != 0 && &d < group.order(), "{}", named.name);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_key() {
        let group = group_from_id(CurveId::UACURVE0).unwrap();
        let first = KeyGenerator::new(ChaCha20Rng::from_seed([14u8; 32]))
            .generate(&group)
            .unwrap();
        let second = KeyGenerator::new(ChaCha20Rng::from_seed([14u8; 32]))
            .generate(&group)
            .unwrap();
        assert_eq!(first, second);

        let other = KeyGenerator::new(ChaCha20Rng::from_seed([15u8; 32]))
            .generate(&group)
            .unwrap();
        assert_ne!(first.private_scalar(), other.private_scalar());
    }

    #[test]
    fn small_order_scalars() {
        let mut generator = KeyGenerator::new(ChaCha20Rng::from_seed([16u8; 32]));
        let two = BigUint::from(2u32);
        for _ in 0..32 {
            assert_eq!(generator.random_scalar(&two).unwrap(), BigUint::from(1u32));
        }
        assert!(matches!(
            generator.random_scalar(&BigUint::from(1u32)),
            Err(DstuError::RngExhausted(128))
        ));
    }

    #[test]
    fn broken_rng_is_reported() {
        let group = group_from_id(CurveId::UACURVE0).unwrap();

        let mut zero = KeyGenerator::with_config(ZeroRng, KeygenConfig { max_draws: 4 });
        assert!(matches!(
            zero.generate(&group),
            Err(DstuError::RngExhausted(4))
        ));
        zero.config_mut().max_draws = 0;
        assert!(matches!(
            zero.generate(&group),
            Err(DstuError::RngExhausted(0))
        ));

        let mut failing = KeyGenerator::new(FailingRng);
        assert!(matches!(failing.generate(&group), Err(DstuError::Rng(_))));
    }

    #[test]
    fn derive_rejects_out_of_range_scalars() {
        let group = group_from_id(CurveId::UACURVE1).unwrap();
        let n = group.order().clone();
        assert!(matches!(
            derive_public_key(&group, &BigUint::from(0u32)),
            Err(DstuError::InvalidScalar)
        ));
        assert!(matches!(
            derive_public_key(&group, &n),
            Err(DstuError::InvalidScalar)
        ));

        let q = derive_public_key(&group, &(&n - 1u32)).unwrap();
        assert_eq!(q, *group.generator());
        let q1 = derive_public_key(&group, &BigUint::from(1u32)).unwrap();
        assert_eq!(q1, group.curve().negate(group.generator()));
    }

    #[test]
    fn ec_key_lifecycle() {
        let group = group_from_id(CurveId::UACURVE0).unwrap();
        let mut generator = KeyGenerator::new(ChaCha20Rng::from_seed([17u8; 32]));

        let mut empty = EcKey::new();
        assert!(matches!(
            generator.generate_key(&mut empty),
            Err(DstuError::MissingGroup)
        ));
        assert!(matches!(empty.add_public_key(), Err(DstuError::MissingGroup)));
        assert!(matches!(
            empty.set_private_key(BigUint::from(5u32)),
            Err(DstuError::MissingGroup)
        ));

        let mut key = EcKey::with_group(group.clone());
        assert!(matches!(key.add_public_key(), Err(DstuError::MissingKey)));
        assert!(key.key_pair().is_none());
        assert!(matches!(
            key.set_private_key(group.order().clone()),
            Err(DstuError::InvalidScalar)
        ));

        key.set_private_key(BigUint::from(5u32)).unwrap();
        assert!(key.public_key().is_none());
        let public = *key.add_public_key().unwrap();
        assert_eq!(public, derive_public_key(&group, &BigUint::from(5u32)).unwrap());
        let pair = key.key_pair().expect("both halves present");
        assert_eq!(pair.private_scalar(), &BigUint::from(5u32));

        generator.generate_key(&mut key).unwrap();
        let pair = key.key_pair().expect("generated");
        assert_valid_pair(&group, &pair);

        key.set_group(group);
        assert!(key.private_key().is_none());
        assert!(key.public_key().is_none());
    }

    #[test]
    fn debug_output_hides_private_scalar() {
        let group = group_from_id(CurveId::UACURVE0).unwrap();
        let mut key = EcKey::with_group(group);
        let secret = BigUint::parse_bytes(b"1234567890abcdef1234567890abcdef", 16).unwrap();
        key.set_private_key(secret.clone()).unwrap();
        key.add_public_key().unwrap();
        let hex = format!("{secret:x}");
        assert!(!format!("{key:?}").contains(&hex));
        let pair = key.key_pair().unwrap();
        assert!(!format!("{pair:?}").contains(&hex));
        assert!(!format!("{pair:?}").contains(&secret.to_string()));
    }
}
