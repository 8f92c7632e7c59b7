//! RSA key pair generation.

use rand_core::CryptoRngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::algorithms::generate::{
    generate_key_components, generate_weak_key_components, RsaKeyComponents,
};
use crate::errors::{Error, Result};
use crate::key::{KeyPair, KeySize, RsaPrivateKey, RsaPublicKey};
use crate::prime::{check_probability, PrimalityOracle, PrimalityStrategy};

/// Smallest modulus size accepted by [`KeyGenConfig::with_bits`].
pub const MIN_KEY_BITS: usize = 32;

/// Settings for [`RsaKeyGenerator`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyGenConfig {
    key_size_bits: usize,
    strategy: PrimalityStrategy,
    probability: f64,
    max_exponent_attempts: Option<usize>,
}

impl KeyGenConfig {
    /// Configuration for one of the standard key sizes.
    ///
    /// `probability` is the confidence required from the primality test and
    /// must lie in `[0.5, 1.0)`.
    pub fn new(key_size: KeySize, strategy: PrimalityStrategy, probability: f64) -> Result<Self> {
        Self::with_bits(key_size.bits(), strategy, probability)
    }

    /// Configuration for an arbitrary even modulus size of at least
    /// [`MIN_KEY_BITS`] bits.
    ///
    /// Small moduli are only useful for tests and demonstrations.
    pub fn with_bits(
        key_size_bits: usize,
        strategy: PrimalityStrategy,
        probability: f64,
    ) -> Result<Self> {
        let config = Self {
            key_size_bits,
            strategy,
            probability,
            max_exponent_attempts: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Caps the number of public exponents drawn per key.
    ///
    /// Without a cap the search runs until it succeeds.
    pub fn max_exponent_attempts(mut self, attempts: usize) -> Self {
        self.max_exponent_attempts = Some(attempts);
        self
    }

    /// Modulus size in bits.
    pub fn key_size_bits(&self) -> usize {
        self.key_size_bits
    }

    /// Primality test used for the prime factors.
    pub fn strategy(&self) -> PrimalityStrategy {
        self.strategy
    }

    /// Confidence required from the primality test.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Cap on the public exponent search, if any.
    pub fn exponent_attempts(&self) -> Option<usize> {
        self.max_exponent_attempts
    }

    /// Checks the configuration. Deserialized values bypass the constructors,
    /// so [`RsaKeyGenerator::new`] calls this again.
    pub fn validate(&self) -> Result<()> {
        check_probability(self.probability)?;

        if self.key_size_bits < MIN_KEY_BITS || self.key_size_bits % 2 != 0 {
            return Err(Error::InvalidKeySize {
                bits: self.key_size_bits,
            });
        }

        Ok(())
    }
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            key_size_bits: KeySize::default().bits(),
            strategy: PrimalityStrategy::default(),
            probability: 0.99,
            max_exponent_attempts: None,
        }
    }
}

/// Generates RSA key pairs according to a [`KeyGenConfig`].
#[derive(Clone, Debug)]
pub struct RsaKeyGenerator {
    config: KeyGenConfig,
    oracle: PrimalityOracle,
}

impl RsaKeyGenerator {
    /// Creates a generator, validating `config`.
    pub fn new(config: KeyGenConfig) -> Result<Self> {
        config.validate()?;
        let oracle = PrimalityOracle::new(config.strategy, config.probability)?;
        Ok(Self { config, oracle })
    }

    /// The configuration this generator was built with.
    pub fn config(&self) -> &KeyGenConfig {
        &self.config
    }

    /// Generates a key pair `(e, n)`, `(d, n)`.
    ///
    /// `e` is drawn at random and only kept if `d > n / 3`.
    pub fn generate_keys<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        log::debug!(
            "generating a {}-bit key, {:?} at p = {}",
            self.config.key_size_bits,
            self.config.strategy,
            self.config.probability
        );

        let components = generate_key_components(
            rng,
            self.config.key_size_bits,
            &self.oracle,
            self.config.max_exponent_attempts,
        )?;
        Ok(into_key_pair(components))
    }

    /// Generates a key pair whose private exponent is small enough for
    /// Wiener's attack, for demonstrations of [`crate::attack`].
    ///
    /// Never use such a key for anything else.
    pub fn generate_weak_keys<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        log::debug!("generating a weak {}-bit key", self.config.key_size_bits);

        let components =
            generate_weak_key_components(rng, self.config.key_size_bits, &self.oracle)?;
        Ok(into_key_pair(components))
    }
}

fn into_key_pair(components: RsaKeyComponents) -> KeyPair {
    let RsaKeyComponents { n, e, d } = components;
    KeyPair::new_unchecked(
        RsaPublicKey::new_unchecked(e, n.clone()),
        RsaPrivateKey::new_unchecked(d, n),
    )
}

/// Generates a key pair of one of the standard sizes.
pub fn generate_keys<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key_size: KeySize,
    strategy: PrimalityStrategy,
    probability: f64,
) -> Result<KeyPair> {
    let config = KeyGenConfig::new(key_size, strategy, probability)?;
    RsaKeyGenerator::new(config)?.generate_keys(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::KeyParts;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_config_validation() {
        let strategy = PrimalityStrategy::MillerRabin;
        for p in [0.0, 0.25, 0.4999, 1.0, 2.0] {
            assert_eq!(
                KeyGenConfig::with_bits(512, strategy, p).unwrap_err(),
                Error::InvalidProbability
            );
            assert_eq!(
                KeyGenConfig::new(KeySize::Bits1024, strategy, p).unwrap_err(),
                Error::InvalidProbability
            );
        }
        for bits in [0, 16, 30, 33, 513] {
            assert_eq!(
                KeyGenConfig::with_bits(bits, strategy, 0.9).unwrap_err(),
                Error::InvalidKeySize { bits }
            );
        }

        let config = KeyGenConfig::with_bits(MIN_KEY_BITS, strategy, 0.5).unwrap();
        assert_eq!(config.key_size_bits(), MIN_KEY_BITS);
        assert_eq!(config.exponent_attempts(), None);
        assert_eq!(config.max_exponent_attempts(5).exponent_attempts(), Some(5));
    }

    #[test]
    fn test_default_config() {
        let config = KeyGenConfig::default();
        assert_eq!(config.key_size_bits(), 2048);
        assert_eq!(config.strategy(), PrimalityStrategy::MillerRabin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_keys() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for strategy in [
            PrimalityStrategy::Fermat,
            PrimalityStrategy::MillerRabin,
            PrimalityStrategy::SolovayStrassen,
        ] {
            let config = KeyGenConfig::with_bits(256, strategy, 0.999).unwrap();
            let generator = RsaKeyGenerator::new(config).unwrap();
            for _ in 0..3 {
                let pair = generator.generate_keys(&mut rng).unwrap();
                pair.validate().unwrap();
                assert_eq!(pair.public_key().n().bits(), 256);
                assert_eq!(pair.size(), 32);
                assert!(pair.private_key().d() > &(pair.public_key().n() / 3u32));
                assert_eq!(pair.public_key().modulus(), pair.private_key().modulus());
            }
        }
    }

    #[test]
    fn test_generate_weak_keys() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let config =
            KeyGenConfig::with_bits(256, PrimalityStrategy::MillerRabin, 0.999).unwrap();
        let pair = RsaKeyGenerator::new(config)
            .unwrap()
            .generate_weak_keys(&mut rng)
            .unwrap();
        pair.validate().unwrap();
        assert_eq!(pair.private_key().d().bits(), 62);
    }

    #[test]
    fn test_exponent_cap() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let config = KeyGenConfig::with_bits(128, PrimalityStrategy::MillerRabin, 0.99)
            .unwrap()
            .max_exponent_attempts(0);
        assert_eq!(
            RsaKeyGenerator::new(config)
                .unwrap()
                .generate_keys(&mut rng)
                .unwrap_err(),
            Error::ExponentSearchExhausted { attempts: 0 }
        );
    }

    #[test]
    fn test_generate_keys_standard_size() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = generate_keys(
            &mut rng,
            KeySize::Bits1024,
            PrimalityStrategy::MillerRabin,
            0.99,
        )
        .unwrap();
        assert_eq!(pair.public_key().n().bits(), 1024);
        pair.validate().unwrap();
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_strategy() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &PrimalityStrategy::SolovayStrassen,
            &[Token::UnitVariant {
                name: "PrimalityStrategy",
                variant: "SolovayStrassen",
            }],
        );
        assert_tokens(
            &KeySize::Bits3072,
            &[Token::UnitVariant {
                name: "KeySize",
                variant: "Bits3072",
            }],
        );
    }
}
