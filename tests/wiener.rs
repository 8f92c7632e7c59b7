//! Wiener's attack against generated keys.

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_workbench::{
    attack::{perform_wiener_attack, wiener_attack},
    BigUint, Error, KeyGenConfig, PrimalityStrategy, RsaKeyGenerator,
};

fn generator(bits: usize) -> RsaKeyGenerator {
    let config = KeyGenConfig::with_bits(bits, PrimalityStrategy::MillerRabin, 0.999).unwrap();
    RsaKeyGenerator::new(config).unwrap()
}

#[test]
fn recovers_weak_keys() {
    let _ = env_logger::builder().is_test(true).try_init();

    for (seed, bits) in [(1u8, 128), (2, 256), (3, 512)] {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        let keys = generator(bits).generate_weak_keys(&mut rng).unwrap();

        let recovery = wiener_attack(keys.public_key()).unwrap();
        assert_eq!(recovery.d(), keys.private_key().d(), "{} bits", bits);
        assert_eq!(&(recovery.p() * recovery.q()), keys.public_key().n());
        assert!(recovery.p() > recovery.q());

        let e_d = keys.public_key().e() * recovery.d();
        assert_eq!(e_d % recovery.phi(), BigUint::from(1u32));
    }
}

#[test]
fn regular_keys_resist() {
    let _ = env_logger::builder().is_test(true).try_init();

    for (seed, bits) in [(4u8, 128), (5, 256), (6, 512)] {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        let keys = generator(bits).generate_keys(&mut rng).unwrap();

        assert_eq!(
            perform_wiener_attack(keys.public_key()),
            Err(Error::PrivateExponentNotFound),
            "{} bits",
            bits
        );
    }
}
