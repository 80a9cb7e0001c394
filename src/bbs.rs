// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The BBS+ core (component C7): `sign`, `verify`, `create_proof`,
// `verify_proof`, with a Fiat-Shamir non-interactive zero-knowledge proof.

use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

use ff::{Field, PrimeField};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::curve::{
    g1_generator, g1_identity, g2_generator, mod_inv, normalize_g1, pairing, rand_scalar,
    scalar_from_digest_be, serialize_g1, G1Affine, G1Projective, G2Projective, Scalar,
};
use crate::error::Error;

/// The monolithic signing key `sk = (H, x)`.
#[derive(Clone)]
pub struct SigningKey {
    /// The public H-vector shared with the corresponding [`PublicKey`].
    pub h: Vec<G1Projective>,
    /// The secret scalar `x`.
    x: Scalar,
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

impl SigningKey {
    /// Generates a new signing key supporting `message_count` messages.
    pub fn new(message_count: usize, rng: impl RngCore + CryptoRng) -> Result<Self, Error> {
        let h = crate::curve::generate_h_vector(message_count);
        let x = rand_scalar(rng);
        if x == Scalar::ZERO {
            // Vanishingly unlikely; surfaced rather than silently retried
            // (spec §4.7: callers may retry).
            return Err(Error::ModInverseOfZero);
        }
        Ok(Self { h, x })
    }

    /// Builds the corresponding [`PublicKey`].
    pub fn public_key(&self) -> PublicKey {
        PublicKey { h: self.h.clone(), x: g2_generator() * self.x }
    }
}

/// The monolithic public key `pk = (H, X)`.
#[derive(Clone)]
pub struct PublicKey {
    /// The public H-vector.
    pub h: Vec<G1Projective>,
    /// `X = x·G2`.
    pub x: G2Projective,
}

/// A BBS+ signature `(A, e, s)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SignatureBytes"))]
#[cfg_attr(feature = "serde", serde(into = "SignatureBytes"))]
pub struct Signature {
    /// `A ∈ G1`.
    pub a: G1Projective,
    /// `e ∈ Fr`.
    pub e: Scalar,
    /// `s ∈ Fr`.
    pub s: Scalar,
}

/// A refinement type for the fixed-width byte encoding of a [`Signature`]:
/// `A` uncompressed (96 bytes) followed by `e` and `s` (32 bytes each, as
/// produced by [`ff::PrimeField::to_repr`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignatureBytes(#[cfg_attr(feature = "serde", serde(with = "serde_bytes_160"))] [u8; 160]);

impl From<Signature> for SignatureBytes {
    fn from(sig: Signature) -> SignatureBytes {
        let mut bytes = [0u8; 160];
        bytes[..96].copy_from_slice(&serialize_g1(&sig.a));
        bytes[96..128].copy_from_slice(sig.e.to_repr().as_ref());
        bytes[128..160].copy_from_slice(sig.s.to_repr().as_ref());
        SignatureBytes(bytes)
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(bytes: SignatureBytes) -> Result<Self, Error> {
        let mut a_repr = [0u8; 96];
        a_repr.copy_from_slice(&bytes.0[..96]);
        let a_affine = G1Affine::from_uncompressed(&a_repr);
        if bool::from(a_affine.is_none()) {
            return Err(Error::LengthMismatch);
        }

        let mut e_repr = <Scalar as ff::PrimeField>::Repr::default();
        e_repr.as_mut().copy_from_slice(&bytes.0[96..128]);
        let e = Scalar::from_repr(e_repr);
        let mut s_repr = <Scalar as ff::PrimeField>::Repr::default();
        s_repr.as_mut().copy_from_slice(&bytes.0[128..160]);
        let s = Scalar::from_repr(s_repr);
        if bool::from(e.is_none()) || bool::from(s.is_none()) {
            return Err(Error::LengthMismatch);
        }

        Ok(Signature {
            a: a_affine.unwrap().into(),
            e: e.unwrap(),
            s: s.unwrap(),
        })
    }
}

#[cfg(feature = "serde")]
mod serde_bytes_160 {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 160], serializer: S) -> Result<S::Ok, S::Error> {
        bytes.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 160], D::Error> {
        let v = <Vec<u8>>::deserialize(deserializer)?;
        v.try_into().map_err(|_| D::Error::custom("expected 160 bytes"))
    }
}

/// A selective-disclosure proof over a BBS+ signature.
#[derive(Clone, Debug, PartialEq)]
pub struct Proof {
    a_bar: G1Projective,
    b_bar: G1Projective,
    d: G1Projective,
    t1: G1Projective,
    t2: G1Projective,
    c: Scalar,
    resp_e: Scalar,
    resp_r1: Scalar,
    resp_r3: Scalar,
    resp_m: BTreeMap<usize, Scalar>,
    revealed: BTreeMap<usize, Scalar>,
}

/// The default Fiat-Shamir nonce used when callers don't supply one
/// (spec §6). Callers SHOULD pass a per-session unique nonce instead
/// (spec §9 open question).
pub const DEFAULT_NONCE: &[u8] = b"default_nonce";

fn commitment_b(h: &[G1Projective], s: Scalar, messages: &[Scalar]) -> G1Projective {
    let mut b = g1_generator() + h[0] * s;
    for (hi, m) in h[1..].iter().zip(messages) {
        b += *hi * m;
    }
    b
}

/// Creates a BBS+ signature on `messages` under `sk`.
///
/// Fails if the freshly sampled `e` happens to make `x + e ≡ 0 mod q`
/// (probability ~1/q); callers may retry.
pub fn sign(
    sk: &SigningKey,
    messages: &[Scalar],
    mut rng: impl RngCore + CryptoRng,
) -> Result<Signature, Error> {
    if sk.h.len() != messages.len() + 1 {
        return Err(Error::LengthMismatch);
    }
    let e = rand_scalar(&mut rng);
    let s = rand_scalar(&mut rng);

    let denom = sk.x + e;
    let denom_inv = mod_inv(&denom)?;

    let b = commitment_b(&sk.h, s, messages);
    let a = b * denom_inv;

    Ok(Signature { a, e, s })
}

impl PublicKey {
    /// Verifies a BBS+ signature on `messages`.
    ///
    /// Returns `false` on any mismatch, including a length mismatch between
    /// `messages` and the H-vector — verification failure is a boolean
    /// outcome, never an exceptional one (spec §7).
    pub fn verify(&self, messages: &[Scalar], signature: &Signature) -> bool {
        if self.h.len() != messages.len() + 1 {
            return false;
        }
        let rhs_inner = commitment_b(&self.h, signature.s, messages);
        let lhs = pairing(&(self.x + g2_generator() * signature.e), &signature.a);
        let rhs = pairing(&g2_generator(), &rhs_inner);
        lhs == rhs
    }

    /// Creates a selective-disclosure proof over `signature`, revealing only
    /// the messages at `revealed_indices`.
    pub fn create_proof(
        &self,
        signature: &Signature,
        messages: &[Scalar],
        revealed_indices: &BTreeSet<usize>,
        nonce: &[u8],
        mut rng: impl RngCore + CryptoRng,
    ) -> Result<Proof, Error> {
        if self.h.len() != messages.len() + 1 {
            return Err(Error::LengthMismatch);
        }
        if let Some(&bad) = revealed_indices.iter().find(|&&i| i >= messages.len()) {
            let _ = bad;
            return Err(Error::LengthMismatch);
        }

        let b = commitment_b(&self.h, signature.s, messages);

        let r1 = rand_scalar(&mut rng);
        let r2 = rand_scalar(&mut rng);
        let a_bar = signature.a * (r1 * r2);
        let d = b * r2;
        let b_bar = d * r1 + a_bar * signature.e;

        let hidden: Vec<usize> =
            (0..messages.len()).filter(|i| !revealed_indices.contains(i)).collect();

        let e_t = rand_scalar(&mut rng);
        let r1_t = rand_scalar(&mut rng);
        let r3_t = rand_scalar(&mut rng);
        let m_t: BTreeMap<usize, Scalar> =
            hidden.iter().map(|&j| (j, rand_scalar(&mut rng))).collect();

        let t1 = a_bar * e_t + d * r1_t;

        let mut t2 = self.h[0] * r3_t;
        for &j in &hidden {
            t2 += self.h[j + 1] * m_t[&j];
        }

        let c = fiat_shamir_challenge(&a_bar, &b_bar, &d, &t1, &t2, nonce);

        let resp_e = e_t + c * signature.e;
        let resp_r1 = r1_t + c * r1;
        let resp_r3 = r3_t + c * signature.s;
        let resp_m: BTreeMap<usize, Scalar> =
            hidden.iter().map(|&j| (j, m_t[&j] + c * messages[j])).collect();
        let revealed: BTreeMap<usize, Scalar> =
            revealed_indices.iter().map(|&i| (i, messages[i])).collect();

        Ok(Proof { a_bar, b_bar, d, t1, t2, c, resp_e, resp_r1, resp_r3, resp_m, revealed })
    }

    /// Verifies a selective-disclosure proof.
    ///
    /// Check (c) intentionally omits subtracting the `c`-scaled revealed-term
    /// contribution that textbook BBS+ includes — this is an observed
    /// deviation preserved from the reference behavior (see the crate's
    /// design notes), not an oversight.
    pub fn verify_proof(&self, proof: &Proof, nonce: &[u8]) -> bool {
        let expected_c =
            fiat_shamir_challenge(&proof.a_bar, &proof.b_bar, &proof.d, &proof.t1, &proof.t2, nonce);
        if expected_c != proof.c {
            return false;
        }

        // (b) resp_e·A_bar + resp_r1·D == T1 + c·B_bar
        let lhs_b = proof.a_bar * proof.resp_e + proof.d * proof.resp_r1;
        let rhs_b = proof.t1 + proof.b_bar * proof.c;
        if normalize_g1(&lhs_b) != normalize_g1(&rhs_b) {
            return false;
        }

        // (c) resp_r3·D + sum_hidden resp_m[j]·H[j+1] == T2
        let mut lhs_c = proof.d * proof.resp_r3;
        for (&j, m) in &proof.resp_m {
            match self.h.get(j + 1) {
                Some(hj) => lhs_c += *hj * m,
                None => return false,
            }
        }
        if normalize_g1(&lhs_c) != normalize_g1(&proof.t2) {
            return false;
        }

        // (d) pairing check over F = G1 + resp_r1·H[0] + revealed + hidden responses.
        let mut f = g1_generator() + self.h[0] * proof.resp_r1;
        for (&i, m) in &proof.revealed {
            match self.h.get(i + 1) {
                Some(hi) => f += *hi * m,
                None => return false,
            }
        }
        for (&j, m) in &proof.resp_m {
            match self.h.get(j + 1) {
                Some(hj) => f += *hj * m,
                None => return false,
            }
        }

        let lhs = pairing(&(self.x + g2_generator() * proof.resp_e), &proof.a_bar);
        let rhs = pairing(&g2_generator(), &f);
        lhs == rhs
    }
}

fn fiat_shamir_challenge(
    a_bar: &G1Projective,
    b_bar: &G1Projective,
    d: &G1Projective,
    t1: &G1Projective,
    t2: &G1Projective,
    nonce: &[u8],
) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update(serialize_g1(a_bar));
    hasher.update(serialize_g1(b_bar));
    hasher.update(serialize_g1(d));
    hasher.update(serialize_g1(t1));
    hasher.update(serialize_g1(t2));
    hasher.update(nonce);
    let digest: [u8; 32] = hasher.finalize().into();
    scalar_from_digest_be(&digest)
}

impl Default for Proof {
    fn default() -> Self {
        Proof {
            a_bar: g1_identity(),
            b_bar: g1_identity(),
            d: g1_identity(),
            t1: g1_identity(),
            t2: g1_identity(),
            c: Scalar::ZERO,
            resp_e: Scalar::ZERO,
            resp_r1: Scalar::ZERO,
            resp_r3: Scalar::ZERO,
            resp_m: BTreeMap::new(),
            revealed: BTreeMap::new(),
        }
    }
}
