//! Number theory used by key generation, primality testing and the attacks.
//!
//! Every function here is pure: the same inputs always give the same output
//! and nothing is cached between calls.

use core::mem;

use num_bigint::{BigInt, BigUint, IntoBigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::errors::{Error, Result};

/// Computes `base^exponent mod modulus` by left-to-right square-and-multiply.
///
/// `base` is reduced modulo `modulus` first and any exponent, including zero,
/// is accepted.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "modulus must be positive");

    if modulus.is_one() {
        return BigUint::zero();
    }

    let base = base % modulus;
    let mut result = BigUint::one();

    for byte in exponent.to_bytes_be() {
        for shift in (0..8).rev() {
            result = &result * &result % modulus;
            if (byte >> shift) & 1 == 1 {
                result = result * &base % modulus;
            }
        }
    }

    result
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `a·x + b·y = g` where `g = gcd(a, b) >= 0`.
pub fn gcd_extended(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = mem::replace(&mut r, next_r);
        let next_x = &old_x - &q * &x;
        old_x = mem::replace(&mut x, next_x);
        let next_y = &old_y - &q * &y;
        old_y = mem::replace(&mut y, next_y);
    }

    if old_r.is_negative() {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

/// Greatest common divisor, the first component of [`gcd_extended`].
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let (g, _, _) = gcd_extended(&to_signed(a), &to_signed(b));
    to_natural(g)
}

/// Modular multiplicative inverse of `a` modulo `m`.
///
/// Returns `None` when `gcd(a, m) != 1` or `m` is zero.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let m_int = to_signed(m);
    let (g, mut x, _) = gcd_extended(&to_signed(a), &m_int);
    if !g.is_one() {
        return None;
    }

    x %= &m_int;
    if x.is_negative() {
        x += &m_int;
    }

    Some(to_natural(x))
}

/// Legendre symbol `(a/p)` for an odd prime `p`, by Euler's criterion.
///
/// Fails with [`Error::InvalidSymbolModulus`] when `p` is even, smaller than
/// three, or evidently not prime.
pub fn legendre_symbol(a: &BigInt, p: &BigUint) -> Result<i8> {
    if p < &BigUint::from(3u32) || p.is_even() {
        return Err(Error::InvalidSymbolModulus);
    }

    let a = reduce(a, p);
    let p_minus_one = p - BigUint::one();
    let r = mod_pow(&a, &(&p_minus_one >> 1), p);

    if r.is_zero() {
        Ok(0)
    } else if r.is_one() {
        Ok(1)
    } else if r == p_minus_one {
        Ok(-1)
    } else {
        Err(Error::InvalidSymbolModulus)
    }
}

/// Jacobi symbol `(a/n)` for an odd positive `n`, either +1, -1, or 0.
pub fn jacobi_symbol(a: &BigInt, n: &BigUint) -> Result<i8> {
    if n.is_zero() || n.is_even() {
        return Err(Error::InvalidSymbolModulus);
    }

    let mut a = reduce(a, n);
    let mut n = n.clone();
    let mut j = 1i8;

    while !a.is_zero() {
        // handle factors of 2 in a
        while a.is_even() {
            a >>= 1;
            let nmod8 = low_bits(&n, 8);
            if nmod8 == 3 || nmod8 == 5 {
                j = -j;
            }
        }

        // swap numerator and denominator
        mem::swap(&mut a, &mut n);
        if low_bits(&a, 4) == 3 && low_bits(&n, 4) == 3 {
            j = -j;
        }
        a %= &n;
    }

    if n.is_one() {
        Ok(j)
    } else {
        Ok(0)
    }
}

/// Reduces a signed value into `[0, m)`.
fn reduce(a: &BigInt, m: &BigUint) -> BigUint {
    to_natural(a.mod_floor(&to_signed(m)))
}

#[inline]
fn low_bits(x: &BigUint, modulus: u32) -> u32 {
    (x % modulus).to_u32().unwrap_or_default()
}

#[inline]
pub(crate) fn to_signed(x: &BigUint) -> BigInt {
    BigInt::from_biguint(Sign::Plus, x.clone())
}

/// Converts a value that is non-negative by construction.
#[inline]
pub(crate) fn to_natural(x: BigInt) -> BigUint {
    x.into_biguint().expect("value is non-negative by construction")
}
