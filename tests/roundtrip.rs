//! End-to-end key generation and encryption.

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_workbench::{
    generate_keys,
    pkcs1v15::{DecryptingKey, EncryptingKey},
    traits::{Decryptor, EncryptingKeypair, RandomizedEncryptor},
    Error, KeyGenConfig, KeyPair, KeySize, PrimalityStrategy, RsaCipher, RsaKeyGenerator,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn small_keys(seed: u8, strategy: PrimalityStrategy) -> KeyPair {
    let mut rng = ChaCha8Rng::from_seed([seed; 32]);
    let config = KeyGenConfig::with_bits(512, strategy, 0.99).unwrap();
    RsaKeyGenerator::new(config)
        .unwrap()
        .generate_keys(&mut rng)
        .unwrap()
}

#[test]
fn generate_standard_size() {
    init_logger();
    let mut rng = ChaCha8Rng::from_seed([1; 32]);

    let keys = generate_keys(
        &mut rng,
        KeySize::Bits1024,
        PrimalityStrategy::MillerRabin,
        0.99,
    )
    .unwrap();
    assert_eq!(keys.public_key().n().bits(), 1024);
    assert_eq!(keys.size(), 128);
    keys.validate().unwrap();
}

#[test]
fn rejects_bad_probability() {
    let mut rng = ChaCha8Rng::from_seed([1; 32]);
    for p in [0.0, 0.49, 1.0, 1.5, f64::NAN] {
        assert_eq!(
            generate_keys(&mut rng, KeySize::Bits1024, PrimalityStrategy::Fermat, p),
            Err(Error::InvalidProbability),
            "p = {}",
            p
        );
    }
}

#[test]
fn encrypt_decrypt_every_strategy() {
    init_logger();
    let strategies = [
        PrimalityStrategy::Fermat,
        PrimalityStrategy::MillerRabin,
        PrimalityStrategy::SolovayStrassen,
    ];
    let msg = b"The quick brown fox jumps over the lazy dog, again and again and again.";

    for (i, strategy) in strategies.into_iter().enumerate() {
        let mut rng = ChaCha8Rng::from_seed([i as u8; 32]);
        let config = KeyGenConfig::with_bits(512, strategy, 0.999).unwrap();
        let cipher = RsaCipher::new(&mut rng, config).unwrap();

        let ciphertext = cipher.encrypt(&mut rng, msg).unwrap();
        // 71 bytes span two 53-byte chunks
        assert_eq!(ciphertext.len(), 2 * cipher.key_size_in_bytes());
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), &msg[..]);
    }
}

#[test]
fn cipher_from_existing_pair() {
    init_logger();
    let keys = small_keys(9, PrimalityStrategy::MillerRabin);
    let mut rng = ChaCha8Rng::from_seed([10; 32]);

    let cipher = RsaCipher::from_key_pair(keys.clone()).unwrap();
    assert_eq!(cipher.key_pair(), &keys);
    assert_eq!(cipher.config().key_size_bits(), 512);

    let ciphertext = cipher.encrypt(&mut rng, b"hello").unwrap();
    let plaintext = rsa_workbench::pkcs1v15::decrypt(keys.private_key(), &ciphertext).unwrap();
    assert_eq!(plaintext, b"hello");
}

#[test]
fn mismatched_pair_rejected() {
    let a = small_keys(3, PrimalityStrategy::MillerRabin);
    let b = small_keys(4, PrimalityStrategy::MillerRabin);
    let (public, _) = a.into_parts();
    let (_, private) = b.into_parts();

    assert_eq!(KeyPair::new(public, private), Err(Error::InvalidModulus));
}

#[test]
fn encrypting_and_decrypting_keys() {
    let keys = small_keys(5, PrimalityStrategy::SolovayStrassen);
    let mut rng = ChaCha8Rng::from_seed([6; 32]);

    let encrypting_key: EncryptingKey = keys.encrypting_key();
    let decrypting_key = DecryptingKey::new(keys.private_key().clone());

    let msg = vec![0x5au8; 200];
    let ciphertext = encrypting_key.encrypt_with_rng(&mut rng, &msg).unwrap();
    assert_eq!(ciphertext.len(), 4 * keys.size());
    assert_eq!(decrypting_key.decrypt(&ciphertext).unwrap(), msg);

    // a ciphertext from another key does not unpad
    let other = small_keys(7, PrimalityStrategy::SolovayStrassen);
    let foreign = EncryptingKey::new(other.public_key().clone())
        .encrypt_with_rng(&mut rng, &msg)
        .unwrap();
    assert!(decrypting_key.decrypt(&foreign).is_err());
}

#[test]
fn regenerate_changes_keys() {
    let mut rng = ChaCha8Rng::from_seed([8; 32]);
    let config = KeyGenConfig::with_bits(256, PrimalityStrategy::MillerRabin, 0.99).unwrap();
    let mut cipher = RsaCipher::new(&mut rng, config).unwrap();

    let ciphertext = cipher.encrypt(&mut rng, b"before").unwrap();
    let old = cipher.key_pair().clone();

    cipher.regenerate_keys(&mut rng).unwrap();
    assert_ne!(cipher.key_pair(), &old);
    assert_eq!(cipher.config(), &config);

    let plaintext = rsa_workbench::pkcs1v15::decrypt(old.private_key(), &ciphertext).unwrap();
    assert_eq!(plaintext, b"before");
}
