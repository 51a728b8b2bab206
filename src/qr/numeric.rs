#![allow(non_snake_case)]

use super::householder::*;
use super::symbolic::*;
use super::workspace::QRWorkspace;
use super::SparseQRError;
use crate::algebra::*;

// Left-looking numeric factorization of C (= A·P) into Householder
// vectors V, coefficients beta and the triangular factor R.
//
// Column k is computed by scattering C(:,k) into the dense accumulator
// x in factor row order, applying every earlier reflector that reaches
// column k in topological order, and then forming a new reflector
// from the part of x below the diagonal.   The pattern of V(:,k) is the
// pattern of C(:,k) below row k together with the patterns of the
// reflectors of the children of k in the elimination tree.
//
// Rows are sorted within every column of V and R.  The last stored
// entry of every column of R is its diagonal.   The first stored entry
// of V(:,k) is row k, with value R[k,k].

pub(crate) fn _factor_numeric<T: FloatT>(
    C: &CscMatrix<T>,
    S: &SymbolicQR,
    V: &mut CscMatrix<T>,
    R: &mut CscMatrix<T>,
    beta: &mut [T],
    work: &mut QRWorkspace<T>,
) -> Result<(), SparseQRError> {
    let (m2, n) = (S.m2, S.n);

    if C.size() != (S.m, S.n)
        || S.parent.len() != n
        || S.leftmost.len() != S.m
        || S.pinv.len() != m2
        || beta.len() != n
    {
        return Err(SparseQRError::StructuralMismatch);
    }

    let (parent, leftmost, pinv) = (&S.parent, &S.leftmost, &S.pinv);
    let (vcap, rcap) = (S.vnz, S.rnz);

    V.reshape(m2, n, vcap);
    R.reshape(m2, n, rcap);
    work.reset(m2, n);
    let marks = &mut work.marks;
    let stack = &mut work.stack;
    let x = &mut work.x;
    let pairs = &mut work.pairs;

    let mut vnz = 0;
    let mut rnz = 0;

    for k in 0..n {
        let stamp = k + 1;
        R.colptr[k] = rnz;
        V.colptr[k] = vnz;
        let p1 = vnz;

        // V(:,k) always starts at the diagonal row
        marks[k] = stamp;
        vnz = _push_pattern(V, vnz, vcap, k)?;

        let mut top = n;
        for ptr in C.colptr[k]..C.colptr[k + 1] {
            let row = C.rowval[ptr];

            // find the path from leftmost[row] to the visited part of
            // the tree, then move it to the top of the stack
            let mut i = leftmost[row];
            let mut len = 0;
            loop {
                if i >= n {
                    return Err(SparseQRError::StructuralMismatch);
                }
                if marks[i] == stamp {
                    break;
                }
                stack[len] = i;
                len += 1;
                marks[i] = stamp;
                i = parent[i];
            }
            while len > 0 {
                top -= 1;
                len -= 1;
                stack[top] = stack[len];
            }

            let i = pinv[row];
            x[i] = C.nzval[ptr];
            if i > k && marks[i] < stamp {
                vnz = _push_pattern(V, vnz, vcap, i)?;
                marks[i] = stamp;
            }
        }

        // apply the earlier reflectors in topological order
        for &i in &stack[top..n] {
            apply_householder(V, i, beta[i], x);

            if rnz >= rcap {
                return Err(SparseQRError::StructuralMismatch);
            }
            R.rowval[rnz] = i;
            R.nzval[rnz] = x[i];
            rnz += 1;
            x[i] = T::zero();

            if parent[i] == k {
                vnz = _merge_pattern(V, i, vnz, vcap, marks, stamp)?;
            }
        }

        // gather x into V(:,k)
        for p in p1..vnz {
            let r = V.rowval[p];
            V.nzval[p] = x[r];
            x[r] = T::zero();
        }

        let (b, diag) = house(&mut V.nzval[p1..vnz]);
        beta[k] = b;
        if b == T::zero() && diag == T::zero() {
            log::trace!(target: "sparseqr", "column {} has a zero diagonal", k);
        }
        // row k is the smallest row of V(:,k), so it stays first
        _sort_column(&mut V.rowval[p1..vnz], &mut V.nzval[p1..vnz], pairs);

        if rnz >= rcap {
            return Err(SparseQRError::StructuralMismatch);
        }
        R.rowval[rnz] = k;
        R.nzval[rnz] = diag;
        rnz += 1;
        // likewise the diagonal stays last
        let f = R.colptr[k];
        _sort_column(&mut R.rowval[f..rnz], &mut R.nzval[f..rnz], pairs);
    }

    R.colptr[n] = rnz;
    V.colptr[n] = vnz;
    R.trim();
    V.trim();

    Ok(())
}

fn _push_pattern<T: FloatT>(
    V: &mut CscMatrix<T>,
    vnz: usize,
    vcap: usize,
    row: usize,
) -> Result<usize, SparseQRError> {
    if vnz >= vcap {
        return Err(SparseQRError::StructuralMismatch);
    }
    V.rowval[vnz] = row;
    Ok(vnz + 1)
}

// add the rows of V(:,col) not yet visited in this round to the
// pattern of the column under construction
fn _merge_pattern<T: FloatT>(
    V: &mut CscMatrix<T>,
    col: usize,
    mut vnz: usize,
    vcap: usize,
    marks: &mut [usize],
    stamp: usize,
) -> Result<usize, SparseQRError> {
    for p in V.colptr[col]..V.colptr[col + 1] {
        let r = V.rowval[p];
        if marks[r] < stamp {
            marks[r] = stamp;
            vnz = _push_pattern(V, vnz, vcap, r)?;
        }
    }
    Ok(vnz)
}

// Sort a column by row index.   Row indices within a column are distinct.
pub(crate) fn _sort_column<T: FloatT>(
    rows: &mut [usize],
    vals: &mut [T],
    pairs: &mut Vec<(usize, T)>,
) {
    if rows.windows(2).all(|w| w[0] < w[1]) {
        return;
    }
    pairs.clear();
    pairs.extend(std::iter::zip(rows.iter().copied(), vals.iter().copied()));
    pairs.sort_unstable_by_key(|&(r, _)| r);
    for (k, &(r, v)) in pairs.iter().enumerate() {
        rows[k] = r;
        vals[k] = v;
    }
}
