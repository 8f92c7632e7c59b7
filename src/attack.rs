//! Cryptanalysis of weak RSA keys.
//!
//! [`wiener_attack`] recovers a private exponent `d < n^¼ / 3` from the
//! public key alone, using the continued fraction expansion of `e / n`
//! (M. J. Wiener, "Cryptanalysis of Short RSA Secret Exponents", 1990).
//! Keys produced by [`crate::RsaKeyGenerator::generate_keys`] are out of its
//! reach; [`crate::RsaKeyGenerator::generate_weak_keys`] produces keys that
//! are not.

pub mod math;
mod wiener;

pub use self::math::{continued_fraction, convergents, integer_sqrt, solve_quadratic, Convergent};
pub use self::wiener::{perform_wiener_attack, wiener_attack, WienerRecovery};
