//! Traits related to the key components

use num_bigint::BigUint;

/// Components shared by RSA public and private keys: an exponent and a modulus.
pub trait KeyParts {
    /// Returns the exponent of the key, `e` for a public key and `d` for a private one.
    fn exponent(&self) -> &BigUint;

    /// Returns the modulus of the key.
    fn modulus(&self) -> &BigUint;

    /// Returns the modulus size in bytes. Ciphertext blocks for or by this key
    /// have the same size.
    fn size(&self) -> usize {
        (self.modulus().bits() + 7) / 8
    }
}
