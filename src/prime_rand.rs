//! Generation of random primes.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::prime::{PrimalityOracle, PrimalityVerdict};

/// Generates a random probable prime with exactly `bit_size` bits.
///
/// The two most significant bits of the prime are set, so the product of
/// two primes of `b` bits has exactly `2b` bits. Starting from a random odd
/// value, candidates are walked along the `6k ± 1` wheel until `oracle`
/// reports one prime. If the walk overflows `bit_size` bits, a new starting
/// point is drawn.
///
/// *Warning*: the quality of the prime depends entirely on `rng`.
///
/// # Panics
///
/// Panics if `bit_size < 3`.
pub fn generate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    oracle: &PrimalityOracle,
) -> BigUint {
    assert!(bit_size >= 3, "prime size must be at least 3-bit");

    let mut b = bit_size % 8;
    if b == 0 {
        b = 8;
    }

    let bytes_len = (bit_size + 7) / 8;
    let mut bytes = Zeroizing::new(vec![0u8; bytes_len]);
    let mut tested = 0usize;

    'next: loop {
        rng.fill_bytes(&mut bytes);
        // Clear bits in the first byte to make sure the candidate has a size <= bits.
        bytes[0] &= ((1u32 << (b as u32)) - 1) as u8;

        // Don't let the value be too small, i.e, set the most significant two bits.
        // Setting the top two bits, rather than just the top bit,
        // means that when two of these values are multiplied together,
        // the result isn't ever one bit short.
        if b >= 2 {
            bytes[0] |= 3u8.wrapping_shl(b as u32 - 2);
        } else {
            // Here b==1, because b cannot be zero.
            bytes[0] |= 1;
            if bytes_len > 1 {
                bytes[1] |= 0x80;
            }
        }

        // Make the value odd since an even number this large certainly isn't prime.
        bytes[bytes_len - 1] |= 1u8;

        let mut candidate = BigUint::from_bytes_be(&bytes);
        if (&candidate % 3u32).is_zero() {
            candidate += 2u32;
        }

        loop {
            if candidate.bits() != bit_size {
                continue 'next;
            }

            tested += 1;
            if oracle.check(rng, &candidate) == PrimalityVerdict::Prime {
                log::trace!("found a {bit_size}-bit prime after {tested} candidates");
                return candidate;
            }

            candidate += wheel_step(&candidate);
        }
    }
}

/// Distance to the next value of the form `6k ± 1`.
///
/// `candidate` must already be of that form.
#[inline]
fn wheel_step(candidate: &BigUint) -> u32 {
    match (candidate % 6u32).to_u32() {
        Some(1) => 4,
        _ => 2,
    }
}
