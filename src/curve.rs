// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The curve & field facade (component C1). Everything outside this module
// reaches the BLS12-381 pairing, both groups, and the scalar field only
// through the names re-exported here.

use elliptic_curve::hash2curve::ExpandMsgXmd;
use ff::Field;
use group::{Curve, Group};
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;

pub use bls12_381_plus::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

use crate::error::Error;

/// The domain separation tag used to derive the public `H`-vector.
pub const H_VECTOR_DST: &[u8] = b"BBS+HGen";

/// Draws a uniformly random scalar from a cryptographically secure source.
pub fn rand_scalar(rng: impl RngCore + CryptoRng) -> Scalar {
    Scalar::random(rng)
}

/// Computes `a^-1 mod q`, failing when `a` is zero.
pub fn mod_inv(a: &Scalar) -> Result<Scalar, Error> {
    let inv = a.invert();
    if bool::from(inv.is_some()) {
        Ok(inv.unwrap())
    } else {
        Err(Error::ModInverseOfZero)
    }
}

/// IETF hash-to-curve for G1, using `ExpandMsgXmd<Sha256>` as required by the
/// `H`-vector derivation.
pub fn hash_to_g1(msg: &[u8], dst: &[u8]) -> G1Projective {
    G1Projective::hash::<ExpandMsgXmd<Sha256>>(msg, dst)
}

/// Reduces a SHA-256 digest (interpreted as a big-endian unsigned integer)
/// modulo `q`, as required by the Fiat-Shamir challenge derivation in
/// `bbs::create_proof`/`bbs::verify_proof`.
pub fn scalar_from_digest_be(digest: &[u8; 32]) -> Scalar {
    let mut le = [0u8; 64];
    for (dst, src) in le[..32].iter_mut().zip(digest.iter().rev()) {
        *dst = *src;
    }
    Scalar::from_bytes_wide(&le)
}

/// Serializes a normalized G1 point as `big-endian 48-byte x ‖ big-endian
/// 48-byte y`, as required for Fiat-Shamir hashing (§4.1).
pub fn serialize_g1(p: &G1Projective) -> [u8; 96] {
    p.to_affine().to_uncompressed()
}

/// Returns the normalized (affine) form of a G1 point; equality on this form
/// is used throughout instead of equality on projective coordinates.
pub fn normalize_g1(p: &G1Projective) -> G1Affine {
    p.to_affine()
}

/// Returns the normalized (affine) form of a G2 point.
pub fn normalize_g2(p: &G2Projective) -> G2Affine {
    p.to_affine()
}

/// The generator of G1.
pub fn g1_generator() -> G1Projective {
    G1Projective::generator()
}

/// The generator of G2.
pub fn g2_generator() -> G2Projective {
    G2Projective::generator()
}

/// The identity (point at infinity) of G1.
pub fn g1_identity() -> G1Projective {
    G1Projective::identity()
}

/// The identity (point at infinity) of G2.
pub fn g2_identity() -> G2Projective {
    G2Projective::identity()
}

/// `e(Q, P)` for `Q ∈ G2`, `P ∈ G1`, already final-exponentiated.
pub fn pairing(q: &G2Projective, p: &G1Projective) -> bls12_381_plus::Gt {
    bls12_381_plus::pairing(&p.to_affine(), &q.to_affine())
}

/// Deterministically derives the public ordered `H`-vector `H[0..=length]`
/// used to commit to individual messages (§3, §6).
///
/// Same `(length, dst)` always yields the same vector on every participant;
/// this determinism is what lets independently-running DKG servers agree on
/// the signature parameters without exchanging them.
pub fn generate_h_vector(length: usize) -> Vec<G1Projective> {
    (0..=length)
        .map(|i| hash_to_g1(format!("seed_for_h_{i}").as_bytes(), H_VECTOR_DST))
        .collect()
}
