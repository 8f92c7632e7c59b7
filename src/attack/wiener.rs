use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::math::{continued_fraction, convergents, solve_quadratic};
use crate::errors::{Error, Result};
use crate::key::RsaPublicKey;
use crate::math::{to_natural, to_signed};

/// Everything Wiener's attack learns about a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WienerRecovery {
    d: BigUint,
    phi: BigUint,
    p: BigUint,
    q: BigUint,
}

impl WienerRecovery {
    /// The private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Euler's totient of the modulus.
    pub fn phi(&self) -> &BigUint {
        &self.phi
    }

    /// The larger prime factor.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The smaller prime factor.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Consumes the recovery, keeping the private exponent.
    pub fn into_private_exponent(self) -> BigUint {
        self.d
    }
}

/// Runs Wiener's attack against `key`.
///
/// Every convergent `k / d` of `e / n` past the two seeds is a candidate:
/// `(e·d - 1) / k` must be an integer `φ`, and `x² - (n - φ + 1)·x + n` must
/// split into two positive integer roots whose product is `n`. The first
/// candidate that passes is returned together with the factors.
///
/// Fails with [`Error::PrivateExponentNotFound`] when no convergent passes,
/// which is the expected outcome for keys with a large private exponent.
pub fn wiener_attack(key: &RsaPublicKey) -> Result<WienerRecovery> {
    let (e, n) = (key.e(), key.n());
    if e.is_zero() || e >= n {
        return Err(Error::PrivateExponentNotFound);
    }

    let e = to_signed(e);
    let n = to_signed(n);
    let terms = continued_fraction(&e, &n).map_err(|_| Error::PrivateExponentNotFound)?;
    let one = BigInt::one();

    for (i, candidate) in convergents(&terms).iter().enumerate().skip(2) {
        let k = &candidate.numerator;
        let d = &candidate.denominator;
        if k.is_zero() {
            continue;
        }

        let (phi, rem) = (&e * d - &one).div_rem(k);
        if !rem.is_zero() {
            continue;
        }

        let b = &phi - &n - &one;
        if let [p, q] = solve_quadratic(&one, &b, &n).as_slice() {
            if p * q == n {
                log::debug!("convergent {i} of {} yields the private exponent", terms.len());
                return Ok(WienerRecovery {
                    d: to_natural(d.clone()),
                    phi: to_natural(phi),
                    p: to_natural(p.clone()),
                    q: to_natural(q.clone()),
                });
            }
        }
    }

    log::debug!("no convergent among {} yields the private exponent", terms.len() + 1);
    Err(Error::PrivateExponentNotFound)
}

/// Recovers the private exponent of `key` with Wiener's attack.
pub fn perform_wiener_attack(key: &RsaPublicKey) -> Result<BigUint> {
    wiener_attack(key).map(WienerRecovery::into_private_exponent)
}
