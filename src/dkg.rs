// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The DKG coordinator (component C4): runs the joint-polynomial protocol,
// emits private shares and the master public key, and runs the G2
// consistency check.
//
// Servers are modelled as in-memory participants driven by a single
// orchestrator (spec Non-goals: no network transport, no BFT beyond this
// consistency check).

use std::collections::BTreeMap;

use ff::Field;
use rand_core::{CryptoRng, RngCore};

use crate::curve::{g2_generator, Scalar};
use crate::error::Error;
use crate::lagrange::interpolate_g2_points;
use crate::shamir::{create_random_polynomial, evaluate};

/// The output of a successful DKG run: each server's private key share,
/// keyed by server id `1..=n`, and the master public key `X = x·G2`.
#[derive(Debug, Clone)]
pub struct DkgOutput {
    /// `{server_id: private_share}`.
    pub private_shares: BTreeMap<usize, Scalar>,
    /// The master public key `X`.
    pub master_public_key: bls12_381_plus::G2Projective,
}

/// Runs the joint Pedersen-style Shamir DKG for `n` servers with threshold
/// `t`, using `rng` as the shared source of randomness for every server's
/// polynomial (in-memory simulation of `n` independent participants; a real
/// deployment would give each server its own CSPRNG).
///
/// The consistency check (step 4 of spec §4.4) uses servers `{1..=t}` as the
/// defining set, in natural order, and checks every other server's published
/// public share against the G2-interpolated value.
pub fn run(n: usize, t: usize, mut rng: impl RngCore + CryptoRng) -> Result<DkgOutput, Error> {
    if t > n {
        return Err(Error::ThresholdTooHigh { threshold: t, total: n });
    }
    if t == 0 || n == 0 {
        return Err(Error::EmptyInput);
    }

    // Step 1: each server i samples its own degree-(t-1) polynomial.
    let polynomials: BTreeMap<usize, Vec<Scalar>> = (1..=n)
        .map(|i| (i, create_random_polynomial(t - 1, &mut rng)))
        .collect();

    // Step 2: server i evaluates its polynomial at every j and "sends" it.
    // Step 3: server j sums what it received into its private share.
    let mut private_shares: BTreeMap<usize, Scalar> = BTreeMap::new();
    for j in 1..=n {
        let share_j = polynomials
            .values()
            .fold(Scalar::ZERO, |acc, coeffs| acc + evaluate(coeffs, Scalar::from(j as u64)));
        private_shares.insert(j, share_j);
    }

    let public_shares: BTreeMap<usize, bls12_381_plus::G2Projective> = private_shares
        .iter()
        .map(|(&j, share)| (j, g2_generator() * share))
        .collect();

    // Step 4: consistency check against the first t public shares.
    let defining_set: BTreeMap<usize, bls12_381_plus::G2Projective> =
        public_shares.iter().take(t).map(|(&id, p)| (id, *p)).collect();
    for (&i, published) in public_shares.iter().skip(t) {
        let expected = interpolate_g2_points(&defining_set, Scalar::from(i as u64))?;
        if crate::curve::normalize_g2(&expected) != crate::curve::normalize_g2(published) {
            return Err(Error::InconsistentDkg(i));
        }
    }

    // Step 5: the master public key is the interpolated value at x = 0.
    let master_public_key = interpolate_g2_points(&defining_set, Scalar::ZERO)?;

    Ok(DkgOutput { private_shares, master_public_key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::normalize_g2;
    use crate::lagrange::interpolate_scalars;
    use rand::thread_rng;

    #[test]
    fn threshold_too_high_is_rejected() {
        let err = run(3, 4, thread_rng()).unwrap_err();
        assert_eq!(err, Error::ThresholdTooHigh { threshold: 4, total: 3 });
    }

    #[test]
    fn dkg_produces_distinct_shares_and_consistent_master_key() {
        let out = run(5, 3, thread_rng()).unwrap();
        assert_eq!(out.private_shares.len(), 5);

        // Any t of the n shares interpolate to the same secret (property 6).
        let subset1: BTreeMap<usize, Scalar> =
            out.private_shares.iter().take(3).map(|(&k, &v)| (k, v)).collect();
        let subset2: BTreeMap<usize, Scalar> = out
            .private_shares
            .iter()
            .rev()
            .take(3)
            .map(|(&k, &v)| (k, v))
            .collect();
        let x1 = interpolate_scalars(&subset1, Scalar::ZERO).unwrap();
        let x2 = interpolate_scalars(&subset2, Scalar::ZERO).unwrap();
        assert_eq!(x1, x2);
        assert_eq!(normalize_g2(&(g2_generator() * x1)), normalize_g2(&out.master_public_key));
    }

    #[test]
    fn tampered_public_share_is_detected() {
        // Reimplement the protocol up to the consistency check so we can
        // tamper with a single published share (property 7 / scenario S4).
        let n = 5;
        let t = 3;
        let mut rng = thread_rng();
        let polynomials: BTreeMap<usize, Vec<Scalar>> =
            (1..=n).map(|i| (i, create_random_polynomial(t - 1, &mut rng))).collect();
        let mut public_shares: BTreeMap<usize, bls12_381_plus::G2Projective> = BTreeMap::new();
        for j in 1..=n {
            let share_j = polynomials
                .values()
                .fold(Scalar::ZERO, |acc, c| acc + evaluate(c, Scalar::from(j as u64)));
            public_shares.insert(j, g2_generator() * share_j);
        }
        // Overwrite server 5's share with an unrelated point.
        public_shares.insert(5, g2_generator() * Scalar::from(12345u64));

        let defining_set: BTreeMap<usize, bls12_381_plus::G2Projective> =
            public_shares.iter().take(t).map(|(&id, p)| (id, *p)).collect();
        let expected = interpolate_g2_points(&defining_set, Scalar::from(5u64)).unwrap();
        assert_ne!(normalize_g2(&expected), normalize_g2(&public_shares[&5]));
    }
}
