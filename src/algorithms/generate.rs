//! Generate prime components for the RSA key pair

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::math::mod_inverse;
use crate::prime::PrimalityOracle;
use crate::prime_rand::generate_prime;

pub(crate) struct RsaKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
}

/// Generates a two-prime RSA key of `bit_size` bits whose public exponent is
/// drawn at random from `[3, φ(n))`.
///
/// An exponent is kept only if the matching private exponent is larger than
/// `n / 3`, which rules out the keys Wiener's attack recovers. This margin is
/// a simplification: the attack needs `d < n^¼ / 3`, far below it.
///
/// With `max_attempts` set, the exponent search gives up with
/// [`Error::ExponentSearchExhausted`] after that many draws.
///
/// `bit_size` must be even and at least six. The prime factors are wiped
/// once the exponents are chosen.
pub(crate) fn generate_key_components<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    oracle: &PrimalityOracle,
    max_attempts: Option<usize>,
) -> Result<RsaKeyComponents> {
    let (p, q) = generate_prime_pair(rng, bit_size, oracle);
    components_from_primes(rng, &p, &q, max_attempts)
}

/// Generates a two-prime RSA key with a deliberately small private exponent
/// of `bit_size / 4 - 2` bits. Such keys fall to Wiener's attack.
pub(crate) fn generate_weak_key_components<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    oracle: &PrimalityOracle,
) -> Result<RsaKeyComponents> {
    let d_bits = (bit_size / 4).saturating_sub(2);
    if d_bits < 3 {
        return Err(Error::InvalidKeySize { bits: bit_size });
    }

    let (p, q) = generate_prime_pair(rng, bit_size, oracle);
    Ok(weak_components_from_primes(rng, &p, &q, d_bits))
}

fn components_from_primes<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    p: &BigUint,
    q: &BigUint,
    max_attempts: Option<usize>,
) -> Result<RsaKeyComponents> {
    let n = p * q;
    let phi = totient(p, q);

    let three = BigUint::from(3u32);
    let margin = &n / 3u32;
    let mut attempts = 0usize;

    loop {
        if let Some(max) = max_attempts {
            if attempts >= max {
                return Err(Error::ExponentSearchExhausted { attempts });
            }
        }
        attempts += 1;

        let e = rng.gen_biguint_range(&three, &phi);
        let d = match mod_inverse(&e, &phi) {
            Some(d) => d,
            None => continue,
        };

        if d > margin {
            log::trace!("accepted a public exponent after {attempts} draws");
            return Ok(RsaKeyComponents { n, e, d });
        }
    }
}

/// `d` is odd with exactly `d_bits` bits, `d_bits >= 3`.
fn weak_components_from_primes<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    p: &BigUint,
    q: &BigUint,
    d_bits: usize,
) -> RsaKeyComponents {
    let n = p * q;
    let phi = totient(p, q);

    // odd values in [2^(d_bits - 1), 2^d_bits)
    let low = BigUint::one() << (d_bits - 2);
    let high = BigUint::one() << (d_bits - 1);

    loop {
        let d: BigUint = (rng.gen_biguint_range(&low, &high) << 1) + BigUint::one();
        // `None` when d shares a factor with φ
        if let Some(e) = mod_inverse(&d, &phi) {
            return RsaKeyComponents { n, e, d };
        }
    }
}

/// Draws two distinct primes of `bit_size / 2` bits each.
fn generate_prime_pair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    oracle: &PrimalityOracle,
) -> (Zeroizing<BigUint>, Zeroizing<BigUint>) {
    let prime_bits = bit_size / 2;
    let p = Zeroizing::new(generate_prime(rng, prime_bits, oracle));

    loop {
        let q = Zeroizing::new(generate_prime(rng, prime_bits, oracle));
        if *q != *p {
            return (p, q);
        }
        log::trace!("drew the same {prime_bits}-bit prime twice");
    }
}

#[inline]
fn totient(p: &BigUint, q: &BigUint) -> Zeroizing<BigUint> {
    Zeroizing::new((p - BigUint::one()) * (q - BigUint::one()))
}
