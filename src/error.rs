// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.

#[cfg(feature = "std")]
use thiserror::Error;

/// An error arising from the threshold BBS+ engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum Error {
    /// DKG was asked for a threshold greater than the number of servers.
    #[cfg_attr(feature = "std", error("threshold {threshold} exceeds total servers {total}"))]
    ThresholdTooHigh {
        /// The requested threshold.
        threshold: usize,
        /// The total number of servers.
        total: usize,
    },
    /// A published public key share did not lie on the joint polynomial.
    #[cfg_attr(
        feature = "std",
        error("server {0}'s public key share failed the DKG consistency check")
    )]
    InconsistentDkg(usize),
    /// Signature shares disagreed on the common nonces `e` or `s`.
    #[cfg_attr(
        feature = "std",
        error("signature shares disagree on the jointly sampled nonces")
    )]
    InconsistentShares,
    /// Reconstruction reached a non-invertible aggregate `u`.
    #[cfg_attr(feature = "std", error("sum of signature share u_i is zero"))]
    ZeroUSum,
    /// A scalar precondition failed: the value being inverted is zero.
    #[cfg_attr(feature = "std", error("attempted to invert zero modulo q"))]
    ModInverseOfZero,
    /// An input that must be non-empty was empty.
    #[cfg_attr(feature = "std", error("required input was empty"))]
    EmptyInput,
    /// Two sequences that must agree in length did not, or an index fell
    /// outside the valid range.
    #[cfg_attr(feature = "std", error("length mismatch or out-of-range index"))]
    LengthMismatch,
}
