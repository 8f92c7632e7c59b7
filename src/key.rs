use core::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Error, Result};
use crate::math::mod_pow;
use crate::traits::KeyParts;

/// Key sizes accepted by the public key generation entry points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeySize {
    /// 1024-bit modulus.
    Bits1024,
    /// 2048-bit modulus.
    #[default]
    Bits2048,
    /// 3072-bit modulus.
    Bits3072,
    /// 4096-bit modulus.
    Bits4096,
}

impl KeySize {
    /// Size of the modulus in bits.
    pub const fn bits(self) -> usize {
        match self {
            KeySize::Bits1024 => 1024,
            KeySize::Bits2048 => 2048,
            KeySize::Bits3072 => 3072,
            KeySize::Bits4096 => 4096,
        }
    }

    /// Size of the modulus in bytes.
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }
}

impl TryFrom<usize> for KeySize {
    type Error = Error;

    fn try_from(bits: usize) -> Result<Self> {
        match bits {
            1024 => Ok(KeySize::Bits1024),
            2048 => Ok(KeySize::Bits2048),
            3072 => Ok(KeySize::Bits3072),
            4096 => Ok(KeySize::Bits4096),
            _ => Err(Error::InvalidKeySize { bits }),
        }
    }
}

impl From<KeySize> for usize {
    fn from(size: KeySize) -> usize {
        size.bits()
    }
}

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaPublicKey {
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    e: BigUint,
    /// Modulus: product of the prime numbers `p` and `q`
    n: BigUint,
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    ///
    /// The modulus must be odd and greater than one, the exponent must lie
    /// in `[2, n)`.
    pub fn new(e: BigUint, n: BigUint) -> Result<Self> {
        let k = Self { e, n };
        check_public(&k)?;
        Ok(k)
    }

    /// Create a new public key, bypassing checks around the modulus and
    /// public exponent size.
    pub fn new_unchecked(e: BigUint, n: BigUint) -> Self {
        Self { e, n }
    }

    /// Public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

impl KeyParts for RsaPublicKey {
    fn exponent(&self) -> &BigUint {
        &self.e
    }

    fn modulus(&self) -> &BigUint {
        &self.n
    }
}

/// Represents the private part of an RSA key: the private exponent and the
/// shared modulus.
///
/// The private exponent is zeroized when the key is dropped.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaPrivateKey {
    /// Private exponent
    d: BigUint,
    /// Modulus
    n: BigUint,
}

impl RsaPrivateKey {
    /// Create a new private key from its components.
    pub fn new(d: BigUint, n: BigUint) -> Result<Self> {
        let k = Self { d, n };
        check_public(&k)?;
        Ok(k)
    }

    /// Create a new private key without any checks.
    pub fn new_unchecked(d: BigUint, n: BigUint) -> Self {
        Self { d, n }
    }

    /// Private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

impl KeyParts for RsaPrivateKey {
    fn exponent(&self) -> &BigUint {
        &self.d
    }

    fn modulus(&self) -> &BigUint {
        &self.n
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

/// A public key together with the matching private key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyPair {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl KeyPair {
    /// Pairs `public` with `private`, checking that they share a modulus and
    /// that the exponents invert each other on a few probe values.
    pub fn new(public: RsaPublicKey, private: RsaPrivateKey) -> Result<Self> {
        let pair = Self { public, private };
        pair.validate()?;
        Ok(pair)
    }

    pub(crate) fn new_unchecked(public: RsaPublicKey, private: RsaPrivateKey) -> Self {
        Self { public, private }
    }

    /// The public half.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// The private half.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Modulus size in bytes.
    pub fn size(&self) -> usize {
        self.public.size()
    }

    /// Splits the pair into its halves.
    pub fn into_parts(self) -> (RsaPublicKey, RsaPrivateKey) {
        (self.public, self.private)
    }

    /// Performs basic sanity checks on the pair.
    pub fn validate(&self) -> Result<()> {
        check_public(&self.public)?;
        if self.public.n != self.private.n {
            return Err(Error::InvalidModulus);
        }

        let n = &self.public.n;
        for probe in [2u32, 3, 5] {
            let m = BigUint::from(probe);
            if &m >= n {
                break;
            }
            let c = mod_pow(&m, &self.public.e, n);
            if mod_pow(&c, &self.private.d, n) != m {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }
}

/// Check that the key has a usable modulus and exponent.
#[inline]
pub(crate) fn check_public(key: &impl KeyParts) -> Result<()> {
    let n = key.modulus();
    if n <= &BigUint::one() || n.is_even() {
        return Err(Error::InvalidModulus);
    }

    let e = key.exponent();
    if e <= &BigUint::one() || e >= n {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}
