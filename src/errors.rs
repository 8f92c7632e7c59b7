//! Error types.

/// Alias for [`core::result::Result`] with the `rsa-workbench` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Target probability outside of `[0.5, 1.0)`.
    InvalidProbability,

    /// Key size is not supported.
    InvalidKeySize {
        /// Requested size of the modulus in bits.
        bits: usize,
    },

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Message too long.
    MessageTooLong,

    /// A block does not have the length required by the key.
    InvalidBlockLength {
        /// Length required by the key.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Decryption error.
    Decryption,

    /// Continued fraction input with a common factor.
    NotCoprime,

    /// Continued fraction input with a zero or negative denominator.
    InvalidDenominator,

    /// Legendre/Jacobi symbol modulus is not an odd positive integer.
    InvalidSymbolModulus,

    /// Invalid padding length.
    InvalidPadLen,

    /// The public exponent search gave up before finding an acceptable private exponent.
    ExponentSearchExhausted {
        /// Number of exponents drawn.
        attempts: usize,
    },

    /// Wiener's attack went through every convergent without a match.
    PrivateExponentNotFound,

    /// I/O failure while streaming blocks.
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

impl core::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidProbability => write!(f, "target probability must be in [0.5, 1.0)"),
            Error::InvalidKeySize { bits } => write!(f, "unsupported key size: {bits} bits"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::InvalidBlockLength { expected, actual } => write!(
                f,
                "invalid block length: expected {expected} bytes, got {actual}"
            ),
            Error::Decryption => write!(f, "decryption error"),
            Error::NotCoprime => write!(f, "numerator and denominator are not coprime"),
            Error::InvalidDenominator => write!(f, "denominator must be positive"),
            Error::InvalidSymbolModulus => write!(f, "symbol modulus must be odd and positive"),
            Error::InvalidPadLen => write!(f, "invalid padding length"),
            Error::ExponentSearchExhausted { attempts } => write!(
                f,
                "no acceptable private exponent after {attempts} attempts"
            ),
            Error::PrivateExponentNotFound => write!(f, "private exponent not found"),
            #[cfg(feature = "std")]
            Error::Io(kind) => write!(f, "i/o error: {kind}"),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.kind())
    }
}
