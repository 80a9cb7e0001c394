// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The Lagrange engine (component C3): basis evaluation, scalar
// interpolation, and G2-point interpolation, all modulo `q`.

use std::collections::BTreeMap;

use ff::Field;

use crate::curve::{g2_identity, mod_inv, G2Projective, Scalar};
use crate::error::Error;

/// Evaluates the `i`-th Lagrange basis polynomial `L_i(x_eval)` over the
/// sample points `xs`, where `i` indexes into `xs` directly (not a party id).
fn lagrange_basis(xs: &[Scalar], i: usize, x_eval: Scalar) -> Result<Scalar, Error> {
    let xi = xs[i];
    let mut numerator = Scalar::ONE;
    let mut denominator = Scalar::ONE;
    for (j, xj) in xs.iter().enumerate() {
        if i == j {
            continue;
        }
        numerator *= x_eval - xj;
        denominator *= xi - xj;
    }
    let denom_inv = mod_inv(&denominator)?;
    Ok(numerator * denom_inv)
}

/// Interpolates a scalar-valued polynomial through `points` (keyed by
/// party index) and evaluates it at `x_eval`. `x_eval = 0` is the recovery
/// case used to reconstruct the secret `p(0)`.
///
/// Fails if `points` is empty or if a denominator vanishes — which happens
/// exactly when two entries share the same key.
pub fn interpolate_scalars(
    points: &BTreeMap<usize, Scalar>,
    x_eval: Scalar,
) -> Result<Scalar, Error> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    let xs: Vec<Scalar> = points.keys().map(|id| Scalar::from(*id as u64)).collect();
    let ys: Vec<Scalar> = points.values().copied().collect();

    let mut result = Scalar::ZERO;
    for i in 0..xs.len() {
        let basis = lagrange_basis(&xs, i, x_eval)?;
        result += ys[i] * basis;
    }
    Ok(result)
}

/// Interpolates a G2-point-valued polynomial through `points` (keyed by
/// party index) and evaluates it at `x_eval`, starting from the identity.
pub fn interpolate_g2_points(
    points: &BTreeMap<usize, G2Projective>,
    x_eval: Scalar,
) -> Result<G2Projective, Error> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    let xs: Vec<Scalar> = points.keys().map(|id| Scalar::from(*id as u64)).collect();
    let ys: Vec<G2Projective> = points.values().copied().collect();

    let mut result = g2_identity();
    for i in 0..xs.len() {
        let basis = lagrange_basis(&xs, i, x_eval)?;
        result += ys[i] * basis;
    }
    Ok(result)
}
