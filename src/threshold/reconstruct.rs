// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The reconstructor (component C6): combines signature shares into a
// canonical `(A, e, s)` BBS+ signature.

use ff::Field;

use crate::bbs::Signature;
use crate::curve::{g1_identity, mod_inv, Scalar};
use crate::error::Error;

use super::SignatureShare;

/// Combines `shares` into a single BBS+ signature.
///
/// By construction `sum(u_i) = (x + e) * sum(r_i)` and `R = sum(r_i) * B`, so
/// `A = R / sum(u_i) = B / (x + e)`, which is exactly the BBS+ signature
/// invariant (spec §4.6).
pub fn reconstruct(shares: &[SignatureShare]) -> Result<Signature, Error> {
    let (first, rest) = shares.split_first().ok_or(Error::EmptyInput)?;

    for share in rest {
        if share.e != first.e || share.s != first.s {
            return Err(Error::InconsistentShares);
        }
    }

    let r_sum = shares.iter().fold(g1_identity(), |acc, s| acc + s.r_i);
    let u_sum: Scalar = shares.iter().fold(Scalar::ZERO, |acc, s| acc + s.u_i);

    if u_sum == Scalar::ZERO {
        return Err(Error::ZeroUSum);
    }

    let u_inv = mod_inv(&u_sum)?;
    let a = r_sum * u_inv;

    Ok(Signature { a, e: first.e, s: first.s })
}
