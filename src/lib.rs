#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Components
//!
//! - [`math`]: modular exponentiation, extended GCD, modular inverse and the
//!   Legendre/Jacobi symbols.
//! - [`prime`]: Fermat, Miller-Rabin and Solovay-Strassen tests behind a
//!   [`PrimalityOracle`] that picks the number of rounds from a target
//!   confidence.
//! - [`generate`]: [`RsaKeyGenerator`], which rejects private exponents below
//!   `n / 3`.
//! - [`pkcs1v15`]: PKCS#1 v1.5 block type 2 padding applied block by block.
//! - [`cipher`]: [`RsaCipher`], an encryption context over a key pair with
//!   stream and file variants.
//! - [`attack`]: continued fractions and Wiener's attack.
//!
//! # Usage
//!
//! ## Key generation and encryption
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsa_workbench::{KeyGenConfig, PrimalityStrategy, RsaCipher};
//!
//! let mut rng = ChaCha8Rng::from_seed([42; 32]);
//!
//! let config = KeyGenConfig::with_bits(512, PrimalityStrategy::MillerRabin, 0.99)
//!     .expect("invalid configuration");
//! let cipher = RsaCipher::new(&mut rng, config).expect("failed to generate a key");
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = cipher.encrypt(&mut rng, &data[..]).expect("failed to encrypt");
//! assert_eq!(enc_data.len(), cipher.key_size_in_bytes());
//!
//! // Decrypt
//! let dec_data = cipher.decrypt(&enc_data).expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## Wiener's attack
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsa_workbench::{
//!     attack::perform_wiener_attack, Error, KeyGenConfig, PrimalityStrategy, RsaKeyGenerator,
//! };
//!
//! let mut rng = ChaCha8Rng::from_seed([42; 32]);
//! let config = KeyGenConfig::with_bits(256, PrimalityStrategy::SolovayStrassen, 0.99).unwrap();
//! let generator = RsaKeyGenerator::new(config).unwrap();
//!
//! // a key with a small private exponent falls
//! let weak = generator.generate_weak_keys(&mut rng).unwrap();
//! let d = perform_wiener_attack(weak.public_key()).unwrap();
//! assert_eq!(&d, weak.private_key().d());
//!
//! // a regular key does not
//! let strong = generator.generate_keys(&mut rng).unwrap();
//! assert_eq!(
//!     perform_wiener_attack(strong.public_key()),
//!     Err(Error::PrivateExponentNotFound)
//! );
//! ```

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod attack;
pub mod cipher;
pub mod errors;
pub mod generate;
pub mod math;
pub mod pkcs1v15;
pub mod prime;
pub mod prime_rand;
pub mod traits;

mod key;

pub use crate::{
    cipher::RsaCipher,
    errors::{Error, Result},
    generate::{generate_keys, KeyGenConfig, RsaKeyGenerator},
    key::{KeyPair, KeySize, RsaPrivateKey, RsaPublicKey},
    pkcs1v15::Pkcs1v15Padding,
    prime::{PrimalityOracle, PrimalityStrategy, PrimalityVerdict},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
