#![allow(non_snake_case)]

use crate::algebra::*;

/// Sentinel for "no parent" in the elimination tree and "no column"
/// in the leftmost mapping.
pub(crate) const QR_UNKNOWN: usize = usize::MAX;

/// Structural (pattern only) analysis for a sparse QR factorization.
///
/// The analysis depends only on the sparsity pattern of the matrix and
/// not on its numerical values, so it can be cached and reused for any
/// matrix sharing the same pattern.
///
/// It holds the column elimination tree of `AᵀA`, the leftmost column of
/// each row, the structural row permutation and the exact number of
/// nonzeros in the Householder vectors `V` and the factor `R`.   Columns
/// that have no row of their own are assigned fictitious rows numbered
/// from `m` upward, so that the factors have `m2 >= m` rows.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicQR {
    pub(crate) m: usize,
    pub(crate) n: usize,
    // rows of the factors, including fictitious rows
    pub(crate) m2: usize,
    // column elimination tree of AᵀA
    pub(crate) parent: Vec<usize>,
    // leftmost[i] = min{ j : A[i,j] != 0 }
    pub(crate) leftmost: Vec<usize>,
    // row i of A (or fictitious row i >= m) is row pinv[i] of the factors
    pub(crate) pinv: Vec<usize>,
    // nonzeros in V and R
    pub(crate) vnz: usize,
    pub(crate) rnz: usize,
    // the analysed pattern
    colptr: Vec<usize>,
    rowval: Vec<usize>,
}

impl SymbolicQR {
    /// Analyse the sparsity pattern of `A`.
    ///
    /// `A` is assumed to be correctly formatted.  See
    /// [`check_format`](CscMatrix::check_format).
    pub fn analyze<T: FloatT>(A: &CscMatrix<T>) -> Self {
        let (m, n) = A.size();
        let nnz = A.nnz();
        let Ap = &A.colptr;
        let Ai = &A.rowval[..nnz];

        let parent = _column_etree(m, n, Ap, Ai);
        let leftmost = _leftmost(m, n, Ap, Ai);
        let (pinv, m2, vnz) = _vcount(m, n, &parent, &leftmost);
        let rnz = _rcount(n, Ap, Ai, &parent, &leftmost);

        Self {
            m,
            n,
            m2,
            parent,
            leftmost,
            pinv,
            vnz,
            rnz,
            colptr: Ap.clone(),
            rowval: Ai.to_vec(),
        }
    }

    /// True if `A` has exactly the sparsity pattern that was analysed.
    pub fn is_consistent_with<T: FloatT>(&self, A: &CscMatrix<T>) -> bool {
        A.size() == (self.m, self.n)
            && A.colptr == self.colptr
            && A.rowval[..A.nnz()] == self.rowval[..]
    }

    /// Column elimination tree.  Roots have parent `usize::MAX`.
    pub fn parent(&self) -> &[usize] {
        &self.parent
    }

    /// Leftmost column index of each row, `usize::MAX` for empty rows.
    pub fn leftmost(&self) -> &[usize] {
        &self.leftmost
    }

    /// Structural row permutation, of length [`nrows_padded`](SymbolicQR::nrows_padded).
    pub fn pinv(&self) -> &[usize] {
        &self.pinv
    }

    /// Number of rows in the factors, including fictitious rows.
    pub fn nrows_padded(&self) -> usize {
        self.m2
    }

    pub fn fictitious_rows(&self) -> usize {
        self.m2 - self.m
    }

    /// Number of nonzeros in the Householder vectors.
    pub fn nnz_v(&self) -> usize {
        self.vnz
    }

    /// Number of nonzeros in the triangular factor.
    pub fn nnz_r(&self) -> usize {
        self.rnz
    }
}

impl ShapedMatrix for SymbolicQR {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

// Column elimination tree of AᵀA, computed from A without forming AᵀA.
// prev[i] is the most recent column containing row i, so every row
// links consecutive columns in which it appears.  Ancestor links give
// path compression.

pub(crate) fn _column_etree(m: usize, n: usize, Ap: &[usize], Ai: &[usize]) -> Vec<usize> {
    let mut parent = vec![QR_UNKNOWN; n];
    let mut ancestor = vec![QR_UNKNOWN; n];
    let mut prev = vec![QR_UNKNOWN; m];

    for k in 0..n {
        for &row in &Ai[Ap[k]..Ap[k + 1]] {
            let mut i = prev[row];

            // walk from i up to the root, linking to k
            while i != QR_UNKNOWN && i < k {
                let inext = ancestor[i];
                ancestor[i] = k;
                if inext == QR_UNKNOWN {
                    parent[i] = k;
                }
                i = inext;
            }
            prev[row] = k;
        }
    }
    parent
}

pub(crate) fn _leftmost(m: usize, n: usize, Ap: &[usize], Ai: &[usize]) -> Vec<usize> {
    let mut leftmost = vec![QR_UNKNOWN; m];
    for k in (0..n).rev() {
        for &row in &Ai[Ap[k]..Ap[k + 1]] {
            leftmost[row] = k;
        }
    }
    leftmost
}

// Assign a row of the factors to every column and count the entries
// of V.  Each row is first queued at its leftmost column.   Column k
// takes the lowest numbered row in its queue, and the remaining rows
// move on to the queue of parent[k].  A column with an empty queue is
// given a fictitious row.
//
// Returns (pinv, m2, nnz(V))

pub(crate) fn _vcount(
    m: usize,
    n: usize,
    parent: &[usize],
    leftmost: &[usize],
) -> (Vec<usize>, usize, usize) {
    let mut pinv = vec![QR_UNKNOWN; m + n];
    let mut next = vec![QR_UNKNOWN; m];
    let mut head = vec![QR_UNKNOWN; n];
    let mut tail = vec![QR_UNKNOWN; n];
    let mut nque = vec![0usize; n];

    // place rows in the queue of their leftmost column, lowest row first
    for i in (0..m).rev() {
        let k = leftmost[i];
        if k == QR_UNKNOWN {
            continue;
        }
        if nque[k] == 0 {
            tail[k] = i;
        }
        nque[k] += 1;
        next[i] = head[k];
        head[k] = i;
    }

    let mut vnz = 0;
    let mut m2 = m;

    for k in 0..n {
        let mut i = head[k];
        vnz += 1; // V[k,k]
        if i == QR_UNKNOWN {
            i = m2;
            m2 += 1;
        }
        pinv[i] = k;

        // nothing left to pass on
        if nque[k] <= 1 {
            continue;
        }
        nque[k] -= 1;
        vnz += nque[k];

        // move the rest of the queue to the parent
        let pa = parent[k];
        if pa != QR_UNKNOWN {
            if nque[pa] == 0 {
                tail[pa] = tail[k];
            }
            next[tail[k]] = head[pa];
            head[pa] = next[i];
            nque[pa] += nque[k];
        }
    }

    // rows never taken by a column go to the bottom
    let mut k = n;
    for p in pinv.iter_mut().take(m) {
        if *p == QR_UNKNOWN {
            *p = k;
            k += 1;
        }
    }
    debug_assert_eq!(k, m2);
    pinv.truncate(m2);

    (pinv, m2, vnz)
}

// Count the entries of R.   Column k of R holds every node reached by
// walking the elimination tree from leftmost[i] for each row i in
// column k, stopping at the first node already visited, plus the
// diagonal.

pub(crate) fn _rcount(
    n: usize,
    Ap: &[usize],
    Ai: &[usize],
    parent: &[usize],
    leftmost: &[usize],
) -> usize {
    let mut marks = vec![QR_UNKNOWN; n];
    let mut rnz = 0;

    for k in 0..n {
        marks[k] = k;
        rnz += 1;
        for &row in &Ai[Ap[k]..Ap[k + 1]] {
            let mut i = leftmost[row];
            while i != QR_UNKNOWN && marks[i] != k {
                marks[i] = k;
                rnz += 1;
                i = parent[i];
            }
        }
    }
    rnz
}
