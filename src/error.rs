//! Error kinds shared by the whole crate.

use core::fmt;

/// Typed failure reported by fallible operations.
///
/// Signature verification never produces an `Error`: it is defined as a
/// total predicate and returns `false` for any malformed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Private key is zero, not lower than the curve order, or its
    /// encoding has the wrong length or is not valid hexadecimal.
    InvalidPrivateKey,

    /// Public key encoding has a bad length or prefix byte, decodes to
    /// a point that is not on the curve, or is the point-at-infinity.
    InvalidPublicKey,

    /// Coordinates that were expected to designate a curve point failed
    /// validation against the curve equation.
    InvalidPoint,

    /// Signature with out-of-range or zero `r`/`s`, a non-canonical
    /// (high-S) `s` where the strict policy applies, an invalid recovery
    /// byte, an unrecoverable point, or a malformed encoding.
    InvalidSignature,

    /// Address encoding has the wrong length or is not valid
    /// hexadecimal.
    InvalidAddress,

    /// Inversion (or division) of zero was requested.
    InvalidOperand,

    /// The caller-provided random generator reported a failure. This is
    /// fatal for the requested operation; it is reported, not retried.
    RandomSource,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Error::InvalidPrivateKey => "invalid private key",
            Error::InvalidPublicKey => "invalid public key",
            Error::InvalidPoint => "point is not on the curve",
            Error::InvalidSignature => "invalid signature",
            Error::InvalidAddress => "invalid address",
            Error::InvalidOperand => "inversion of zero",
            Error::RandomSource => "random source failure",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
