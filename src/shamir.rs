// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// Shamir secret sharing primitives (component C2): random polynomial
// generation and Horner evaluation over the scalar field.

use ff::Field;
use rand_core::{CryptoRng, RngCore};

use crate::curve::{rand_scalar, Scalar};

/// Samples `degree + 1` uniformly random coefficients `[c_0, c_1, ..., c_degree]`,
/// where `c_0` is the secret held at the polynomial's constant term.
pub fn create_random_polynomial(degree: usize, mut rng: impl RngCore + CryptoRng) -> Vec<Scalar> {
    (0..=degree).map(|_| rand_scalar(&mut rng)).collect()
}

/// Evaluates `coeffs` (ordered low-to-high degree, as produced by
/// [`create_random_polynomial`]) at `x` using Horner's rule.
pub fn evaluate(coeffs: &[Scalar], x: Scalar) -> Scalar {
    coeffs
        .iter()
        .rev()
        .fold(Scalar::ZERO, |acc, coeff| acc * x + coeff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn evaluate_constant_polynomial() {
        let coeffs = vec![Scalar::from(42u64)];
        assert_eq!(evaluate(&coeffs, Scalar::from(7u64)), Scalar::from(42u64));
    }

    #[test]
    fn evaluate_matches_direct_sum() {
        // f(x) = 3 + 5x + 2x^2
        let coeffs = vec![Scalar::from(3u64), Scalar::from(5u64), Scalar::from(2u64)];
        let x = Scalar::from(4u64);
        let expected = Scalar::from(3u64)
            + Scalar::from(5u64) * x
            + Scalar::from(2u64) * x * x;
        assert_eq!(evaluate(&coeffs, x), expected);
    }

    #[test]
    fn random_polynomial_has_requested_degree() {
        let coeffs = create_random_polynomial(4, thread_rng());
        assert_eq!(coeffs.len(), 5);
    }

    proptest::proptest! {
        #[test]
        fn horner_matches_naive_evaluation(
            coeffs in proptest::collection::vec(0u64..1_000_000, 1..8),
            x in 0u64..1_000_000,
        ) {
            let scalars: Vec<Scalar> = coeffs.iter().map(|c| Scalar::from(*c)).collect();
            let xs = Scalar::from(x);

            let mut naive = Scalar::ZERO;
            let mut power = Scalar::ONE;
            for c in &scalars {
                naive += *c * power;
                power *= xs;
            }

            proptest::prop_assert_eq!(evaluate(&scalars, xs), naive);
        }
    }
}
