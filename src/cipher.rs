//! Encryption context holding a key pair.
//!
//! [`RsaCipher`] applies PKCS#1 v1.5 block encryption (see [`crate::pkcs1v15`])
//! to whole messages, and with the `std` feature to streams and files.

use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};
use crate::generate::{KeyGenConfig, RsaKeyGenerator};
use crate::key::KeyPair;
use crate::pkcs1v15::{self, Pkcs1v15Padding};
use crate::prime::PrimalityStrategy;
use crate::traits::{KeyParts, PaddingScheme};

#[cfg(feature = "std")]
use std::fs::File;
#[cfg(feature = "std")]
use std::io::{self, BufReader, BufWriter, Read, Write};
#[cfg(feature = "std")]
use std::path::Path;
#[cfg(feature = "std")]
use zeroize::Zeroizing;

/// Number of blocks processed per buffer by the stream variants.
#[cfg(feature = "std")]
const BLOCKS_PER_BUFFER: usize = 64;

/// RSA encryption context.
///
/// The key pair is generated on construction and can be replaced with
/// [`RsaCipher::regenerate_keys`]; the pair itself is never modified.
#[derive(Clone, Debug)]
pub struct RsaCipher {
    keys: KeyPair,
    config: KeyGenConfig,
    padding: Pkcs1v15Padding,
}

impl RsaCipher {
    /// Creates a context with a fresh key pair generated from `config`.
    ///
    /// Moduli too small to carry a padded byte fail with
    /// [`Error::InvalidKeySize`] before any key is generated.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, config: KeyGenConfig) -> Result<Self> {
        let bits = config.key_size_bits();
        let padding = Pkcs1v15Padding::new((bits + 7) / 8)
            .map_err(|_| Error::InvalidKeySize { bits })?;
        let keys = RsaKeyGenerator::new(config)?.generate_keys(rng)?;

        Ok(Self {
            keys,
            config,
            padding,
        })
    }

    /// Wraps an existing key pair.
    ///
    /// Later calls to [`RsaCipher::regenerate_keys`] produce keys of the same
    /// size using the default primality settings.
    pub fn from_key_pair(keys: KeyPair) -> Result<Self> {
        keys.validate()?;
        let bits = keys.public_key().modulus().bits();
        let config = KeyGenConfig::with_bits(
            bits + bits % 2,
            PrimalityStrategy::default(),
            KeyGenConfig::default().probability(),
        )?;
        Self::with_config(keys, config)
    }

    fn with_config(keys: KeyPair, config: KeyGenConfig) -> Result<Self> {
        let padding = Pkcs1v15Padding::for_key(keys.public_key())?;
        Ok(Self {
            keys,
            config,
            padding,
        })
    }

    /// Replaces the key pair with a newly generated one.
    ///
    /// On failure the current pair is kept.
    pub fn regenerate_keys<R: CryptoRngCore + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let keys = RsaKeyGenerator::new(self.config)?.generate_keys(rng)?;
        self.padding = Pkcs1v15Padding::for_key(keys.public_key())?;
        self.keys = keys;
        Ok(())
    }

    /// The current key pair.
    pub fn key_pair(&self) -> &KeyPair {
        &self.keys
    }

    /// Settings used to (re)generate keys.
    pub fn config(&self) -> &KeyGenConfig {
        &self.config
    }

    /// Size of a ciphertext block.
    pub fn key_size_in_bytes(&self) -> usize {
        self.padding.block_size()
    }

    /// Plaintext bytes carried by each ciphertext block.
    pub fn plaintext_block_size(&self) -> usize {
        self.padding.plaintext_block_size()
    }

    /// Encrypts `data` block by block.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R, data: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15::encrypt(rng, self.keys.public_key(), data)
    }

    /// Decrypts `data`, which must be a whole number of blocks.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15::decrypt(self.keys.private_key(), data)
    }

    /// Encrypts everything `reader` yields into `writer`.
    ///
    /// The output is identical in layout to [`RsaCipher::encrypt`] applied to
    /// the whole input. Returns the number of bytes written.
    #[cfg(feature = "std")]
    pub fn encrypt_stream<R, I, O>(&self, rng: &mut R, reader: &mut I, writer: &mut O) -> Result<u64>
    where
        R: CryptoRngCore + ?Sized,
        I: Read + ?Sized,
        O: Write + ?Sized,
    {
        let mut buf = Zeroizing::new(vec![0u8; BLOCKS_PER_BUFFER * self.plaintext_block_size()]);
        let mut written = 0u64;

        loop {
            let len = read_full(reader, &mut buf)?;
            if len == 0 {
                break;
            }

            let out = self.encrypt(rng, &buf[..len])?;
            writer.write_all(&out)?;
            written += out.len() as u64;

            if len < buf.len() {
                break;
            }
        }

        writer.flush()?;
        log::trace!("encrypted stream into {written} bytes");
        Ok(written)
    }

    /// Decrypts everything `reader` yields into `writer`.
    ///
    /// Returns the number of plaintext bytes written.
    #[cfg(feature = "std")]
    pub fn decrypt_stream<I, O>(&self, reader: &mut I, writer: &mut O) -> Result<u64>
    where
        I: Read + ?Sized,
        O: Write + ?Sized,
    {
        let mut buf = vec![0u8; BLOCKS_PER_BUFFER * self.key_size_in_bytes()];
        let mut written = 0u64;

        loop {
            let len = read_full(reader, &mut buf)?;
            if len == 0 {
                break;
            }

            let out = Zeroizing::new(self.decrypt(&buf[..len])?);
            writer.write_all(&out)?;
            written += out.len() as u64;

            if len < buf.len() {
                break;
            }
        }

        writer.flush()?;
        log::trace!("decrypted stream into {written} bytes");
        Ok(written)
    }

    /// Encrypts the file at `input` into a new file at `output`.
    #[cfg(feature = "std")]
    pub fn encrypt_file<R, P, Q>(&self, rng: &mut R, input: P, output: Q) -> Result<u64>
    where
        R: CryptoRngCore + ?Sized,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut reader = BufReader::new(File::open(input)?);
        let mut writer = BufWriter::new(File::create(output)?);
        self.encrypt_stream(rng, &mut reader, &mut writer)
    }

    /// Decrypts the file at `input` into a new file at `output`.
    #[cfg(feature = "std")]
    pub fn decrypt_file<P, Q>(&self, input: P, output: Q) -> Result<u64>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut reader = BufReader::new(File::open(input)?);
        let mut writer = BufWriter::new(File::create(output)?);
        self.decrypt_stream(&mut reader, &mut writer)
    }
}

/// Reads until `buf` is full or the reader is exhausted.
#[cfg(feature = "std")]
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
