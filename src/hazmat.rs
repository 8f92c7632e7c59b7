//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds functions that apply RSA's core encryption and decryption
//! primitives to raw data without adding or removing appropriate padding. A
//! well-reviewed padding scheme is crucial to the security of RSA, so there are
//! very few valid uses cases for this API. It's intended for experiments with
//! textbook RSA and for building higher-level constructions.

pub use crate::algorithms::rsa::{decrypt_block, encrypt_block, rsa_decrypt, rsa_encrypt};
