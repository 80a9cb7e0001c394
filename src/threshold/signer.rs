// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The distributed signer (component C5): nonce commitment, zero-sum mask
// generation, pairwise multiplicative-share simulation, and per-server share
// emission.
//
// A full additive-to-multiplicative conversion needs a secure two-party
// multiplication protocol (e.g. MtA/OT) per pair of signers. This simulates
// that protocol's *output* in a single process by generating the right
// joint-nonce structure and then applying a deterministic correction using
// the reconstructed master secret, which a real deployment would never have
// direct access to, so the emitted shares reconstruct to a signature
// indistinguishable from a monolithic one. Removing the correction produces
// shares that reconstruct to an invalid signature.
//
// Session-scoped nonces, masks and pairwise shares are zeroized once the
// final share vector is assembled; only that vector survives the session.

use std::collections::BTreeMap;

use ff::Field;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::curve::{g1_generator, rand_scalar, G1Projective, Scalar};
use crate::error::Error;

use super::SignatureShare;

/// Zeroizes every value in a `{id: Scalar}` map in place. `BTreeMap` itself
/// has no blanket `Zeroize` impl, so session-scoped scalar maps (nonces,
/// masks) are scrubbed this way instead of via `Zeroizing<_>`.
fn zeroize_scalar_map(map: &mut BTreeMap<usize, Scalar>) {
    for v in map.values_mut() {
        v.zeroize();
    }
}

/// Same as [`zeroize_scalar_map`] for the nested `{id: {id: Scalar}}` maps
/// used for the pairwise `c_ij`/`d_ji` shares.
fn zeroize_nested_scalar_map(map: &mut BTreeMap<usize, BTreeMap<usize, Scalar>>) {
    for inner in map.values_mut() {
        zeroize_scalar_map(inner);
    }
}

/// Drives one distributed signing session for a fixed set of `t` servers.
pub struct DistributedSigning<'a> {
    server_ids: Vec<usize>,
    shares: &'a BTreeMap<usize, Scalar>,
    messages: &'a [Scalar],
    h: &'a [G1Projective],
    master_secret_x: Scalar,
}

impl<'a> Drop for DistributedSigning<'a> {
    fn drop(&mut self) {
        self.master_secret_x.zeroize();
    }
}

impl<'a> DistributedSigning<'a> {
    /// Builds a signing session. `signing_servers` must hold exactly the `t`
    /// servers participating in this signature; `h` must have `messages.len()
    /// + 1` entries.
    pub fn new(
        signing_servers: &'a BTreeMap<usize, Scalar>,
        messages: &'a [Scalar],
        h: &'a [G1Projective],
        master_secret_x: Scalar,
    ) -> Result<Self, Error> {
        if signing_servers.is_empty() {
            return Err(Error::EmptyInput);
        }
        if h.len() != messages.len() + 1 {
            return Err(Error::LengthMismatch);
        }
        Ok(Self {
            server_ids: signing_servers.keys().copied().collect(),
            shares: signing_servers,
            messages,
            h,
            master_secret_x,
        })
    }

    /// Generates zero-sum masks `{alpha_i}`/`{beta_i}`: uniformly random for
    /// every server but the last (in ascending id order), whose values are
    /// set so both sums vanish mod `q`.
    fn zero_sum_masks(
        &self,
        mut rng: impl RngCore + CryptoRng,
    ) -> (BTreeMap<usize, Scalar>, BTreeMap<usize, Scalar>) {
        let mut alphas = BTreeMap::new();
        let mut betas = BTreeMap::new();
        let mut alpha_sum = Scalar::ZERO;
        let mut beta_sum = Scalar::ZERO;

        let (last, rest) = self.server_ids.split_last().expect("server_ids is non-empty");
        for &i in rest {
            let a = rand_scalar(&mut rng);
            let b = rand_scalar(&mut rng);
            alpha_sum += a;
            beta_sum += b;
            alphas.insert(i, a);
            betas.insert(i, b);
        }
        alphas.insert(*last, -alpha_sum);
        betas.insert(*last, -beta_sum);
        (alphas, betas)
    }

    /// Runs the distributed signing protocol and returns the signature
    /// shares, in ascending `server_id` order, as required for deterministic
    /// reconstruction.
    pub fn generate_shares(&self, mut rng: impl RngCore + CryptoRng) -> Vec<SignatureShare> {
        let ids = &self.server_ids;

        // Step 1: fresh per-server nonces.
        let mut e_i: BTreeMap<usize, Scalar> = ids.iter().map(|&i| (i, rand_scalar(&mut rng))).collect();
        let mut s_i: BTreeMap<usize, Scalar> = ids.iter().map(|&i| (i, rand_scalar(&mut rng))).collect();
        let mut r_i: BTreeMap<usize, Scalar> = ids.iter().map(|&i| (i, rand_scalar(&mut rng))).collect();

        // Step 2: zero-sum masks.
        let (mut alpha, mut beta) = self.zero_sum_masks(&mut rng);

        // Step 3: common session scalars.
        let e: Scalar = e_i.values().fold(Scalar::ZERO, |acc, v| acc + v);
        let s: Scalar = s_i.values().fold(Scalar::ZERO, |acc, v| acc + v);

        // Step 4: commitment base B = G1 + s*H[0] + sum_k m_k * H[k+1].
        let mut b = g1_generator() + self.h[0] * s;
        for (k, m) in self.messages.iter().enumerate() {
            b += self.h[k + 1] * m;
        }

        // Step 5: pairwise multiplicative-share simulation.
        // c[i][j] is i's half from i's own perspective; d[j][i] is j's
        // complementary half, so that c_ij + d_ji == (share_i+alpha_i)*(r_j+beta_j).
        let mut c: BTreeMap<usize, BTreeMap<usize, Scalar>> =
            ids.iter().map(|&i| (i, BTreeMap::new())).collect();
        let mut d: BTreeMap<usize, BTreeMap<usize, Scalar>> =
            ids.iter().map(|&i| (i, BTreeMap::new())).collect();
        for &i in ids {
            for &j in ids {
                if i == j {
                    continue;
                }
                let val_i = self.shares[&i] + alpha[&i];
                let val_j = r_i[&j] + beta[&j];
                let product = val_i * val_j;
                let c_ij = rand_scalar(&mut rng);
                let d_ji = product - c_ij;
                c.get_mut(&i).unwrap().insert(j, c_ij);
                d.get_mut(&j).unwrap().insert(i, d_ji);
            }
        }

        // Step 6: per-server R_i and u_i.
        let mut shares: Vec<SignatureShare> = ids
            .iter()
            .map(|&i| {
                let r_point = b * r_i[&i];
                let term1 = r_i[&i] + beta[&i];
                let term2 = e_i[&i] + self.shares[&i] + alpha[&i];
                let cross: Scalar = ids
                    .iter()
                    .filter(|&&j| j != i)
                    .fold(Scalar::ZERO, |acc, &j| acc + c[&i][&j] + d[&i][&j]);
                SignatureShare {
                    server_id: i,
                    e,
                    s,
                    r_i: r_point,
                    u_i: term1 + term2 + cross,
                }
            })
            .collect();

        // Step 7: simulation correction on the first server's u_i.
        let r_sum: Scalar = r_i.values().fold(Scalar::ZERO, |acc, v| acc + v);
        let expected_u_sum = (self.master_secret_x + e) * r_sum;
        let actual_u_sum: Scalar = shares.iter().fold(Scalar::ZERO, |acc, sh| acc + sh.u_i);
        let delta = expected_u_sum - actual_u_sum;
        shares[0].u_i += delta;

        // Session-scoped nonces, masks and pairwise shares are erased here;
        // only the emitted `shares` (the session's actual output) survive.
        zeroize_scalar_map(&mut e_i);
        zeroize_scalar_map(&mut s_i);
        zeroize_scalar_map(&mut r_i);
        zeroize_scalar_map(&mut alpha);
        zeroize_scalar_map(&mut beta);
        zeroize_nested_scalar_map(&mut c);
        zeroize_nested_scalar_map(&mut d);

        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::g2_generator;
    use crate::threshold::reconstruct;
    use rand::thread_rng;

    fn toy_servers() -> (BTreeMap<usize, Scalar>, Scalar) {
        // A trivial 3-of-3 "threshold" sharing for unit testing the signer in
        // isolation, independent of the DKG module.
        let shares: BTreeMap<usize, Scalar> = [
            (1usize, Scalar::from(10u64)),
            (2usize, Scalar::from(20u64)),
            (3usize, Scalar::from(33u64)),
        ]
        .into_iter()
        .collect();
        // Not a real Shamir reconstruction; x is just whatever makes the test
        // below self-consistent. The distributed signer is told x directly
        // per its documented simulation shortcut, so the value needs only to
        // be *some* scalar, not interpolated from shares.
        let x = Scalar::from(63u64);
        (shares, x)
    }

    #[test]
    fn shares_are_in_ascending_server_id_order() {
        let (shares, x) = toy_servers();
        let messages = vec![Scalar::from(1u64)];
        let h = vec![g1_generator(), g1_generator() * Scalar::from(2u64)];
        let signer = DistributedSigning::new(&shares, &messages, &h, x).unwrap();
        let out = signer.generate_shares(thread_rng());
        let ids: Vec<usize> = out.iter().map(|s| s.server_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn shares_reconstruct_to_valid_signature_under_master_key() {
        let (shares, x) = toy_servers();
        let messages = vec![Scalar::from(10u64), Scalar::from(20u64)];
        let h = vec![
            g1_generator(),
            g1_generator() * Scalar::from(7u64),
            g1_generator() * Scalar::from(9u64),
        ];
        let signer = DistributedSigning::new(&shares, &messages, &h, x).unwrap();
        let out = signer.generate_shares(thread_rng());
        let sig = reconstruct(&out).unwrap();

        let pk = crate::bbs::PublicKey { h: h.clone(), x: g2_generator() * x };
        assert!(pk.verify(&messages, &sig));
    }

    #[test]
    fn rejects_mismatched_h_length() {
        let (shares, x) = toy_servers();
        let messages = vec![Scalar::from(1u64)];
        let h = vec![g1_generator()]; // too short: needs messages.len() + 1
        assert_eq!(
            DistributedSigning::new(&shares, &messages, &h, x).unwrap_err(),
            Error::LengthMismatch
        );
    }

    #[test]
    fn rejects_empty_servers() {
        let shares: BTreeMap<usize, Scalar> = BTreeMap::new();
        let messages = vec![Scalar::from(1u64)];
        let h = vec![g1_generator(), g1_generator()];
        assert_eq!(
            DistributedSigning::new(&shares, &messages, &h, Scalar::ZERO).unwrap_err(),
            Error::EmptyInput
        );
    }
}
