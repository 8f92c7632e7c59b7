//! Probabilistic primality testing.
//!
//! Three strategies are available, each answering "is `a` a witness for the
//! compositeness of `n`?" for a single base. [`PrimalityOracle`] runs enough
//! independent rounds of one strategy to reach a requested confidence.

use core::fmt;

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{Float, One, ToPrimitive, Zero};
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};
use crate::math::{gcd, jacobi_symbol, mod_pow, to_signed};

/// Carmichael numbers below 10⁶. They fool the Fermat test for every base
/// coprime to them.
const CARMICHAEL_NUMBERS: [u64; 43] = [
    561, 1105, 1729, 2465, 2821, 6601, 8911, 10585, 15841, 29341, 41041, 46657, 52633, 62745,
    63973, 75361, 101101, 115921, 126217, 162401, 172081, 188461, 252601, 278545, 294409, 314821,
    334153, 340561, 399001, 410041, 449065, 488881, 512461, 530881, 552721, 656601, 658801,
    670033, 748657, 825265, 838201, 852841, 997633,
];

/// Outcome of a primality check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PrimalityVerdict {
    /// Passed every round.
    Prime,
    /// A round proved the value composite.
    Composite,
    /// The question does not apply (values below two).
    Indeterminate,
}

/// A single-base compositeness check.
pub trait PrimalityTest: Send + Sync {
    /// Human readable name of the test.
    fn name(&self) -> &'static str;

    /// Upper bound on the chance that one round misses a composite.
    fn round_error(&self) -> f64;

    /// Decides the candidate before any random round, if the test can.
    ///
    /// `candidate` is odd, not divisible by three and greater than three.
    fn prefilter(&self, _candidate: &BigUint) -> Option<PrimalityVerdict> {
        None
    }

    /// Returns `true` if `base` proves `candidate` composite.
    ///
    /// `candidate` is odd and greater than three, `base` lies in
    /// `[2, candidate)` and is coprime to it.
    fn is_composite_witness(&self, candidate: &BigUint, base: &BigUint) -> bool;
}

/// Fermat test: `a^(n-1) ≡ 1 (mod n)` for every prime `n`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FermatTest;

impl PrimalityTest for FermatTest {
    fn name(&self) -> &'static str {
        "Fermat"
    }

    fn round_error(&self) -> f64 {
        0.5
    }

    fn prefilter(&self, candidate: &BigUint) -> Option<PrimalityVerdict> {
        let value = candidate.to_u64()?;
        CARMICHAEL_NUMBERS
            .binary_search(&value)
            .ok()
            .map(|_| PrimalityVerdict::Composite)
    }

    fn is_composite_witness(&self, candidate: &BigUint, base: &BigUint) -> bool {
        let n_minus_one = candidate - BigUint::one();
        !mod_pow(base, &n_minus_one, candidate).is_one()
    }
}

/// Miller-Rabin test.
/// See Handbook of Applied Cryptography, p. 139, Algorithm 4.24.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MillerRabinTest;

impl PrimalityTest for MillerRabinTest {
    fn name(&self) -> &'static str {
        "Miller-Rabin"
    }

    fn round_error(&self) -> f64 {
        0.25
    }

    fn is_composite_witness(&self, candidate: &BigUint, base: &BigUint) -> bool {
        let n_minus_one = candidate - BigUint::one();

        // determine d, s such that n - 1 = d * 2^s
        let mut d = n_minus_one.clone();
        let mut s = 0usize;
        while d.is_even() {
            d >>= 1;
            s += 1;
        }

        let mut x = mod_pow(base, &d, candidate);
        if x.is_one() || x == n_minus_one {
            return false;
        }

        for _ in 1..s {
            x = &x * &x % candidate;
            if x == n_minus_one {
                return false;
            }
            if x.is_one() {
                return true;
            }
        }

        true
    }
}

/// Solovay-Strassen test: `a^((n-1)/2) ≡ (a/n) (mod n)` for every odd prime `n`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolovayStrassenTest;

impl PrimalityTest for SolovayStrassenTest {
    fn name(&self) -> &'static str {
        "Solovay-Strassen"
    }

    /// Euler liars make up at most half of the bases coprime to a composite,
    /// so one round misses with probability up to 1/2. This is looser than
    /// the 1/4 of Miller-Rabin and costs more rounds for the same confidence.
    fn round_error(&self) -> f64 {
        0.5
    }

    fn is_composite_witness(&self, candidate: &BigUint, base: &BigUint) -> bool {
        let symbol = match jacobi_symbol(&to_signed(base), candidate) {
            Ok(0) | Err(_) => return true,
            Ok(symbol) => symbol,
        };

        let n_minus_one = candidate - BigUint::one();
        let euler = mod_pow(base, &(&n_minus_one >> 1), candidate);

        match symbol {
            1 => !euler.is_one(),
            _ => euler != n_minus_one,
        }
    }
}

static FERMAT: FermatTest = FermatTest;
static MILLER_RABIN: MillerRabinTest = MillerRabinTest;
static SOLOVAY_STRASSEN: SolovayStrassenTest = SolovayStrassenTest;

/// Selects one of the available primality tests.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimalityStrategy {
    /// [`FermatTest`]
    Fermat,
    /// [`MillerRabinTest`]
    #[default]
    MillerRabin,
    /// [`SolovayStrassenTest`]
    SolovayStrassen,
}

impl PrimalityStrategy {
    /// Returns the test implementing this strategy.
    pub fn tester(self) -> &'static dyn PrimalityTest {
        match self {
            PrimalityStrategy::Fermat => &FERMAT,
            PrimalityStrategy::MillerRabin => &MILLER_RABIN,
            PrimalityStrategy::SolovayStrassen => &SOLOVAY_STRASSEN,
        }
    }
}

/// Number of rounds needed so that a composite survives every round with
/// probability at most `1 - probability`, given the per-round bound `round_error`.
///
/// At least one round is always run.
pub fn rounds_for(probability: f64, round_error: f64) -> usize {
    let rounds = Float::ceil(Float::ln(1.0 - probability) / Float::ln(round_error));
    if rounds.is_nan() || rounds < 1.0 {
        1
    } else {
        rounds as usize
    }
}

/// Checks that `probability` lies in `[0.5, 1.0)`.
pub(crate) fn check_probability(probability: f64) -> Result<()> {
    if (0.5..1.0).contains(&probability) {
        Ok(())
    } else {
        Err(Error::InvalidProbability)
    }
}

/// A primality test bound to a target confidence.
#[derive(Clone, Copy)]
pub struct PrimalityOracle {
    strategy: PrimalityStrategy,
    test: &'static dyn PrimalityTest,
    probability: f64,
    rounds: usize,
}

impl PrimalityOracle {
    /// Creates an oracle for `strategy` that answers [`PrimalityVerdict::Prime`]
    /// wrongly with probability at most `1 - probability`.
    ///
    /// `probability` must lie in `[0.5, 1.0)`.
    pub fn new(strategy: PrimalityStrategy, probability: f64) -> Result<Self> {
        check_probability(probability)?;
        let test = strategy.tester();

        Ok(Self {
            strategy,
            test,
            probability,
            rounds: rounds_for(probability, test.round_error()),
        })
    }

    /// The strategy this oracle was built with.
    pub fn strategy(&self) -> PrimalityStrategy {
        self.strategy
    }

    /// Target confidence.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of random rounds run for each candidate.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Tests `candidate`, drawing witnesses from `rng`.
    pub fn check<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        candidate: &BigUint,
    ) -> PrimalityVerdict {
        let two = BigUint::from(2u32);
        let three = BigUint::from(3u32);

        if candidate < &two {
            return PrimalityVerdict::Indeterminate;
        }
        if candidate == &two || candidate == &three {
            return PrimalityVerdict::Prime;
        }
        if candidate.is_even() || (candidate % 3u32).is_zero() {
            return PrimalityVerdict::Composite;
        }
        if let Some(verdict) = self.test.prefilter(candidate) {
            return verdict;
        }

        for round in 0..self.rounds {
            let base = rng.gen_biguint_range(&two, candidate);
            if !gcd(candidate, &base).is_one() || self.test.is_composite_witness(candidate, &base)
            {
                log::trace!(
                    "{} found a witness in round {} of {}",
                    self.test.name(),
                    round + 1,
                    self.rounds
                );
                return PrimalityVerdict::Composite;
            }
        }

        PrimalityVerdict::Prime
    }

    /// Shorthand for `self.check(rng, candidate) == PrimalityVerdict::Prime`.
    pub fn is_probably_prime<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        candidate: &BigUint,
    ) -> bool {
        self.check(rng, candidate) == PrimalityVerdict::Prime
    }
}

impl fmt::Debug for PrimalityOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimalityOracle")
            .field("test", &self.test.name())
            .field("probability", &self.probability)
            .field("rounds", &self.rounds)
            .finish()
    }
}
