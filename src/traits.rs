//! RSA-related trait definitions.

mod encryption;
pub(crate) mod keys;
mod padding;

pub use encryption::{Decryptor, EncryptingKeypair, RandomizedEncryptor};
pub use keys::KeyParts;
pub use padding::PaddingScheme;
