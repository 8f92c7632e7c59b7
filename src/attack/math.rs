//! Continued fractions and integer root finding.

use alloc::vec::Vec;
use core::mem;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::errors::{Error, Result};
use crate::math::{gcd_extended, to_natural, to_signed};

/// A rational approximation `numerator / denominator` taken from a prefix of
/// a continued fraction.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Convergent {
    /// `p_i`
    pub numerator: BigInt,
    /// `q_i`
    pub denominator: BigInt,
}

impl Convergent {
    fn new(numerator: BigInt, denominator: BigInt) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// Partial quotients `[a0, a1, ...]` of `numerator / denominator`.
///
/// `denominator` must be positive and coprime to `numerator`. A negative
/// numerator negates the first quotient only.
pub fn continued_fraction(numerator: &BigInt, denominator: &BigInt) -> Result<Vec<BigInt>> {
    if !denominator.is_positive() {
        return Err(Error::InvalidDenominator);
    }

    let (g, _, _) = gcd_extended(numerator, denominator);
    if !g.is_one() {
        return Err(Error::NotCoprime);
    }

    let mut a = numerator.abs();
    let mut b = denominator.clone();
    let mut terms = Vec::new();

    while !b.is_zero() {
        let (q, r) = a.div_rem(&b);
        terms.push(q);
        a = mem::replace(&mut b, r);
    }

    if numerator.is_negative() {
        if let Some(first) = terms.first_mut() {
            *first = -mem::take(first);
        }
    }

    Ok(terms)
}

/// Convergents of the continued fraction `coefficients`, starting with the
/// seeds `1/0` and `a0/1`.
pub fn convergents(coefficients: &[BigInt]) -> Vec<Convergent> {
    let mut out = Vec::with_capacity(coefficients.len() + 1);
    out.push(Convergent::new(BigInt::one(), BigInt::zero()));

    let (a0, rest) = match coefficients.split_first() {
        Some(split) => split,
        None => return out,
    };
    out.push(Convergent::new(a0.clone(), BigInt::one()));

    for a in rest {
        let len = out.len();
        let (prev2, prev1) = (&out[len - 2], &out[len - 1]);
        let next = Convergent::new(
            a * &prev1.numerator + &prev2.numerator,
            a * &prev1.denominator + &prev2.denominator,
        );
        out.push(next);
    }

    out
}

/// Integer square root by Newton's method.
///
/// Returns `(floor(√n), exact)` where `exact` tells whether `n` is a perfect
/// square.
pub fn integer_sqrt(n: &BigUint) -> (BigUint, bool) {
    if n.is_zero() {
        return (BigUint::zero(), true);
    }

    // 2^ceil(bits / 2) is never below the root
    let mut x = BigUint::one() << ((n.bits() + 1) / 2);
    loop {
        let y: BigUint = (&x + n / &x) >> 1;
        if y >= x {
            break;
        }
        x = y;
    }

    let exact = &x * &x == *n;
    (x, exact)
}

/// Positive integer roots of `a·x² + b·x + c = 0`.
///
/// Returns `[x1, x2]` with `x1 = (-b + √D) / 2a` and `x2 = (-b - √D) / 2a`
/// when the discriminant `D` is a positive perfect square and both roots are
/// positive integers. Returns an empty vector in every other case.
pub fn solve_quadratic(a: &BigInt, b: &BigInt, c: &BigInt) -> Vec<BigInt> {
    if a.is_zero() {
        return Vec::new();
    }

    let discriminant = b * b - BigInt::from(4u32) * a * c;
    if !discriminant.is_positive() {
        return Vec::new();
    }

    let (root, exact) = integer_sqrt(&to_natural(discriminant));
    if !exact {
        return Vec::new();
    }

    let root = to_signed(&root);
    let two_a = a * BigInt::from(2u32);
    let (x1, r1) = (-b + &root).div_rem(&two_a);
    let (x2, r2) = (-b - &root).div_rem(&two_a);

    if !r1.is_zero() || !r2.is_zero() || !x1.is_positive() || !x2.is_positive() {
        return Vec::new();
    }

    vec![x1, x2]
}
