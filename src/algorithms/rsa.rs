//! Generic RSA implementation

use alloc::vec::Vec;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::errors::{Error, Result};
use crate::math::mod_pow;
use crate::traits::KeyParts;

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: KeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.modulus() {
        return Err(Error::MessageTooLong);
    }

    Ok(mod_pow(m, key.exponent(), key.modulus()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<K: KeyParts>(priv_key: &K, c: &BigUint) -> Result<BigUint> {
    if c >= priv_key.modulus() {
        return Err(Error::Decryption);
    }

    Ok(mod_pow(c, priv_key.exponent(), priv_key.modulus()))
}

/// Encrypts one block of exactly `key.size()` bytes.
///
/// The block is read as a big-endian integer which must be smaller than
/// the modulus. The result is left padded to `key.size()` bytes.
pub fn encrypt_block<K: KeyParts>(key: &K, data: &[u8]) -> Result<Vec<u8>> {
    check_block_len(key, data)?;

    let m = Zeroizing::new(BigUint::from_bytes_be(data));
    let c = rsa_encrypt(key, &m)?;
    uint_to_be_pad(c, key.size())
}

/// Decrypts one block of exactly `key.size()` bytes.
pub fn decrypt_block<K: KeyParts>(key: &K, data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    check_block_len(key, data)?;

    let c = BigUint::from_bytes_be(data);
    let m = rsa_decrypt(key, &c)?;
    uint_to_zeroizing_be_pad(m, key.size())
}

#[inline]
fn check_block_len<K: KeyParts>(key: &K, data: &[u8]) -> Result<()> {
    let expected = key.size();
    if data.len() != expected {
        return Err(Error::InvalidBlockLength {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}
