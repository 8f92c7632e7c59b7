//! Supported padding schemes.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::Result;

/// Padding scheme turning plaintext chunks into blocks of a fixed size and back.
pub trait PaddingScheme {
    /// Size of every padded block in bytes.
    fn block_size(&self) -> usize;

    /// Largest plaintext that fits in one block.
    fn max_message_len(&self) -> usize;

    /// Pad `plaintext` into a block of exactly [`block_size`](Self::block_size) bytes.
    fn apply<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// Recover the plaintext from a padded block.
    fn remove(&self, block: &[u8]) -> Result<Vec<u8>>;
}
