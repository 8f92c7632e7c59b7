//! PKCS#1 v1.5 encryption as described in [RFC8017 § 7.2], extended to
//! messages of any length by splitting them into blocks.
//!
//! Every plaintext chunk of at most `k - 11` bytes (`k` being the modulus
//! size in bytes) is padded into its own `k`-byte block and encrypted
//! independently, so the ciphertext of an `l`-byte message is
//! `ceil(l / (k - 11)) * k` bytes long.
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2

mod decrypting_key;
mod encrypting_key;

pub use self::{decrypting_key::DecryptingKey, encrypting_key::EncryptingKey};

use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pkcs1v15::*;
use crate::algorithms::rsa::{decrypt_block, encrypt_block};
use crate::errors::{Error, Result};
use crate::key::{self, RsaPrivateKey, RsaPublicKey};
use crate::traits::{KeyParts, PaddingScheme};

/// PKCS#1 v1.5 block type 2 padding for a modulus of `k` bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Pkcs1v15Padding {
    k: usize,
}

impl Pkcs1v15Padding {
    /// Padding producing blocks of `k` bytes.
    ///
    /// Blocks must have room for at least one byte of message, so `k`
    /// must exceed 11.
    pub fn new(k: usize) -> Result<Self> {
        if k <= PKCS1V15_OVERHEAD {
            return Err(Error::InvalidModulus);
        }
        Ok(Self { k })
    }

    /// Padding sized for `key`.
    pub fn for_key<K: KeyParts>(key: &K) -> Result<Self> {
        Self::new(key.size())
    }

    /// Number of plaintext bytes carried by each block.
    pub fn plaintext_block_size(&self) -> usize {
        self.k - PKCS1V15_OVERHEAD
    }
}

impl PaddingScheme for Pkcs1v15Padding {
    fn block_size(&self) -> usize {
        self.k
    }

    fn max_message_len(&self) -> usize {
        self.plaintext_block_size()
    }

    fn apply<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        pkcs1v15_encrypt_pad(rng, plaintext, self.k)
    }

    fn remove(&self, block: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15_encrypt_unpad(block, self.k)
    }
}

/// Encrypts `msg` with RSA and the padding scheme from PKCS#1 v1.5, one
/// block per `k - 11` bytes of input. An empty message encrypts to an empty
/// ciphertext.
#[inline]
pub fn encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    pub_key: &RsaPublicKey,
    msg: &[u8],
) -> Result<Vec<u8>> {
    key::check_public(pub_key)?;
    let padding = Pkcs1v15Padding::for_key(pub_key)?;

    let chunk_len = padding.plaintext_block_size();
    let blocks = (msg.len() + chunk_len - 1) / chunk_len;
    let mut out = Vec::with_capacity(blocks * padding.block_size());

    for chunk in msg.chunks(chunk_len) {
        let em = padding.apply(rng, chunk)?;
        out.extend_from_slice(&encrypt_block(pub_key, &em)?);
    }

    Ok(out)
}

/// Decrypts a ciphertext produced by [`encrypt`].
///
/// The ciphertext must be a whole number of `k`-byte blocks; a trailing
/// partial block is reported as [`Error::InvalidBlockLength`].
///
/// Note that whether this function returns an error or not discloses
/// information about the plaintext to whoever can observe it.
#[inline]
pub fn decrypt(priv_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    key::check_public(priv_key)?;
    let padding = Pkcs1v15Padding::for_key(priv_key)?;

    let k = padding.block_size();
    let mut out = Vec::with_capacity(ciphertext.len() / k * padding.plaintext_block_size());

    for block in ciphertext.chunks(k) {
        let em = decrypt_block(priv_key, block)?;
        out.extend_from_slice(&padding.remove(&em)?);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };

    use crate::key::KeyPair;
    use crate::traits::{Decryptor, EncryptingKeypair, RandomizedEncryptor};

    // https://github.com/C2SP/wycheproof/blob/main/testvectors/rsa_oaep_misc_test.json
    fn get_key_pair() -> KeyPair {
        let n = BigUint::from_bytes_be(&hex!(
            "d0941e63a980fa92fb25ed4c7b3307f827023034ae7f1a7491f0699ca7607285"
            "e62ad8e994bac21b8b6e305e334f4874067d28e304230dca7f0e85f7ce595770"
            "b6e054c9f844ba86c0696eeba0769d8d4a347e8fe85c724ac1c44994af18a39e"
            "719f721f1bc50c46a39e6c075fcd1649f01f22608ce7dc6955502258336987d9"
        ));
        let d = BigUint::from_bytes_be(&hex!(
            "5ff4a47e690ea338573e3d8b3fea5c32378ff4296855a51017cba86a9f3de9b1"
            "dc0fbe36c76b9bbd1c4a170a5f448c2a8489b3f3ac858be4aacb3daaa14dccc1"
            "83622eedd3ae6f0427a2a298b51b97818a5430f13705f42d8b25476f939c935e"
            "389e30d9ade5d0180920135f5aef0c5fecd15f00b83b51dab8ba930d88826801"
        ));
        KeyPair::new(
            RsaPublicKey::new(BigUint::from(65_537u32), n.clone()).unwrap(),
            RsaPrivateKey::new(d, n).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_padding_sizes() {
        let pair = get_key_pair();
        let padding = Pkcs1v15Padding::for_key(pair.public_key()).unwrap();
        assert_eq!(padding.block_size(), 128);
        assert_eq!(padding.plaintext_block_size(), 117);
        assert_eq!(padding.max_message_len(), 117);

        assert_eq!(Pkcs1v15Padding::new(11), Err(Error::InvalidModulus));
        assert_eq!(Pkcs1v15Padding::new(12).unwrap().plaintext_block_size(), 1);
    }

    #[test]
    fn test_apply_is_randomized() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let padding = Pkcs1v15Padding::new(64).unwrap();
        let msg = b"attack at dawn";

        let first = padding.apply(&mut rng, msg).unwrap();
        let second = padding.apply(&mut rng, msg).unwrap();
        assert_eq!(first.len(), 64);
        assert_eq!(&first[..2], &[0x00, 0x02]);
        assert_ne!(first, second);
        assert_eq!(padding.remove(&first).unwrap(), msg);
        assert_eq!(padding.remove(&second).unwrap(), msg);
    }

    #[test]
    fn test_encrypt_decrypt_pkcs1v15() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = get_key_pair();
        let k = pair.size();

        for i in 1..60 {
            let mut input = vec![0u8; i * 8];
            rng.fill_bytes(&mut input);

            let ciphertext = encrypt(&mut rng, pair.public_key(), &input).unwrap();
            let blocks = (input.len() + k - 12) / (k - 11);
            assert_eq!(ciphertext.len(), blocks * k);
            assert_ne!(&input[..], &ciphertext[..input.len()]);

            let plaintext = decrypt(pair.private_key(), &ciphertext).unwrap();
            assert_eq!(input, plaintext);
        }
    }

    #[test]
    fn test_encrypt_block_boundaries() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let pair = get_key_pair();

        for len in [116, 117, 118, 234, 235] {
            let input = vec![0xa5u8; len];
            let ciphertext = encrypt(&mut rng, pair.public_key(), &input).unwrap();
            assert_eq!(ciphertext.len(), (len + 116) / 117 * 128);
            assert_eq!(decrypt(pair.private_key(), &ciphertext).unwrap(), input);
        }
    }

    #[test]
    fn test_empty_message() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = get_key_pair();
        let ciphertext = encrypt(&mut rng, pair.public_key(), &[]).unwrap();
        assert!(ciphertext.is_empty());
        assert!(decrypt(pair.private_key(), &ciphertext).unwrap().is_empty());
    }

    #[test]
    fn test_decrypt_truncated() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = get_key_pair();
        let ciphertext = encrypt(&mut rng, pair.public_key(), &[1u8; 200]).unwrap();
        assert_eq!(ciphertext.len(), 256);

        assert_eq!(
            decrypt(pair.private_key(), &ciphertext[..250]),
            Err(Error::InvalidBlockLength {
                expected: 128,
                actual: 122
            })
        );
    }

    #[test]
    fn test_decrypt_tampered() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = get_key_pair();
        let mut ciphertext = encrypt(&mut rng, pair.public_key(), b"testing.").unwrap();
        ciphertext[64] ^= 0x01;
        assert_eq!(
            decrypt(pair.private_key(), &ciphertext),
            Err(Error::Decryption)
        );
    }

    #[test]
    fn test_encrypt_decrypt_pkcs1v15_traits() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = get_key_pair();
        let encrypting_key = pair.encrypting_key();
        let decrypting_key = DecryptingKey::new(pair.private_key().clone());

        for i in 1..20 {
            let mut input = vec![0u8; i * 13];
            rng.fill_bytes(&mut input);

            let ciphertext = encrypting_key.encrypt_with_rng(&mut rng, &input).unwrap();
            let plaintext = decrypting_key.decrypt(&ciphertext).unwrap();
            assert_eq!(input, plaintext);
        }
    }
}
