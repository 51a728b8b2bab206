#![allow(non_snake_case)]

//! Householder reflectors `H = I - β·v·vᵀ` for the sparse factorization.
//!
//! Reflector vectors are stored column-wise in a CSC matrix `V`.  The
//! first stored entry of each column holds the row of the leading element
//! of `v`.   Its stored *value* is the corresponding diagonal entry of `R`,
//! and the leading element of `v` itself is an implicit 1.

use crate::algebra::*;
use std::iter::zip;

/// Build a Householder reflector in place over the dense segment `x`,
/// returning `(β, diag)`.
///
/// On exit `x[1..]` holds the trailing part of `v` (normalised so that
/// `v[0] = 1`), and `x[0]` holds `diag`, the value that the reflector
/// maps the leading element to.   `diag` has sign opposite to `x[0]`
/// on entry.
///
/// Degenerate inputs are not errors.  For a zero vector `β = 0` and
/// `diag = 0`.   For a segment of length one `β = 0`, the reflector is
/// the identity and `x[0]` is left unchanged.
pub(crate) fn house<T: FloatT>(x: &mut [T]) -> (T, T) {
    if x.is_empty() {
        return (T::zero(), T::zero());
    }
    if x.len() == 1 {
        return (T::zero(), x[0]);
    }

    // scale by the largest magnitude to avoid over/underflow
    let max = x.norm_inf();
    if max == T::zero() {
        x[0] = T::zero();
        return (T::zero(), T::zero());
    }
    x.scale(max.recip());

    let mut tau = x.norm();
    if x[0] < T::zero() {
        tau = -tau;
    }

    // x[0] and tau share a sign, so no cancellation here
    let u0 = x[0] + tau;
    let beta = u0 / tau;
    x[1..].scale(u0.recip());

    let diag = -tau * max;
    x[0] = diag;

    (beta, diag)
}

/// Computes `x = (I - β·v·vᵀ)·x`, with `v` taken from column `col` of `V`.
///
/// Only the rows in the pattern of `V[:,col]` are read or written.  The
/// leading entry of `v` is an implicit 1, whatever value is stored there.
pub(crate) fn apply_householder<T: FloatT>(V: &CscMatrix<T>, col: usize, beta: T, x: &mut [T]) {
    if beta == T::zero() {
        return;
    }

    let (f, l) = (V.colptr[col], V.colptr[col + 1]);
    let lead = V.rowval[f];
    let rows = &V.rowval[(f + 1)..l];
    let vals = &V.nzval[(f + 1)..l];

    // tau = β·vᵀx
    let mut tau = x[lead];
    for (&r, &v) in zip(rows, vals) {
        tau += v * x[r];
    }
    tau *= beta;

    // x -= tau·v
    x[lead] -= tau;
    for (&r, &v) in zip(rows, vals) {
        x[r] -= v * tau;
    }
}
