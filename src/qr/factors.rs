#![allow(non_snake_case)]

use super::householder::apply_householder;
use super::SparseQRError;
use crate::algebra::*;

/// Result of a sparse QR factorization `A·P = Q·R`.
///
/// `Q` is held implicitly as a product of Householder reflectors
/// `Q = H₀·H₁·…·Hₙ₋₁`, acting on the rows of `A` after the structural row
/// permutation (see [`row_pivots`](QRFactors::row_pivots)).   The factors
/// have [`nrows_padded`](QRFactors::nrows_padded) rows, which exceeds the
/// number of rows of `A` when some column was given a fictitious row.
///
/// The accessors [`q`](QRFactors::q) and [`r`](QRFactors::r) return
/// explicit matrices with the rows of `A` in their original order, so that
/// `A·P = Q·R` for full rank inputs with at least as many rows as columns.

#[derive(Debug, Clone)]
pub struct QRFactors<T = f64> {
    pub(crate) m: usize,
    pub(crate) n: usize,
    pub(crate) m2: usize,
    // Householder vectors.   The first stored entry of each column is
    // the leading row of v, where v has an implicit 1
    pub(crate) V: CscMatrix<T>,
    // upper triangular factor, diagonal stored last in each column
    pub(crate) R: CscMatrix<T>,
    pub(crate) beta: Vec<T>,
    pub(crate) pinv: Vec<usize>,
    pub(crate) perm: Option<Vec<usize>>,
}

impl<T> QRFactors<T>
where
    T: FloatT,
{
    pub(crate) fn new() -> Self {
        Self {
            m: 0,
            n: 0,
            m2: 0,
            V: CscMatrix::spalloc(0, 0, 0),
            R: CscMatrix::spalloc(0, 0, 0),
            beta: Vec::new(),
            pinv: Vec::new(),
            perm: None,
        }
    }

    /// Number of rows of the factors, including fictitious rows.
    pub fn nrows_padded(&self) -> usize {
        self.m2
    }

    /// Number of fictitious rows added for structurally rank deficient
    /// columns.
    pub fn fictitious_rows(&self) -> usize {
        self.m2 - self.m
    }

    /// Householder vectors, one per column, in factor row order.
    ///
    /// The leading element of each vector is an implicit 1.   The value
    /// stored in its place is the diagonal of `R`.
    pub fn householder_vectors(&self) -> &CscMatrix<T> {
        &self.V
    }

    /// Householder coefficients `β`.   `β = 0` marks a reflector that is
    /// the identity.
    pub fn beta(&self) -> &[T] {
        &self.beta
    }

    pub fn nnz_v(&self) -> usize {
        self.V.nnz()
    }

    pub fn nnz_r(&self) -> usize {
        self.R.nnz()
    }

    /// Diagonal of `R`
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.n)
            .map(|k| self.R.nzval[self.R.colptr[k + 1] - 1])
            .collect()
    }

    /// Numerical rank.   Rank detection is not performed, so this
    /// is always `None`.   See [`degenerate_columns`](QRFactors::degenerate_columns).
    pub fn rank(&self) -> Option<usize> {
        None
    }

    /// Columns of the permuted matrix whose diagonal in `R` is exactly zero.
    pub fn degenerate_columns(&self) -> Vec<usize> {
        self.diagonal()
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == T::zero())
            .map(|(k, _)| k)
            .collect()
    }

    // Rows of R reported to the caller.   R only has entries in rows
    // 0..n, so for m >= n the padding can be clipped without loss.
    // For m < n the rows beyond m are dropped.
    fn r_dims(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// The triangular factor `R`, with `nrows(A)` rows.
    pub fn r(&self) -> CscMatrix<T> {
        let mut R = CscMatrix::spalloc(0, 0, 0);
        self.r_fill(&mut R);
        R
    }

    /// Copies `R` into `dst`, which must already be `nrows(A) x ncols(A)`.
    pub fn r_into(&self, dst: &mut CscMatrix<T>) -> Result<(), SparseQRError> {
        if dst.size() != self.r_dims() {
            return Err(SparseQRError::IncompatibleDimension);
        }
        self.r_fill(dst);
        Ok(())
    }

    fn r_fill(&self, dst: &mut CscMatrix<T>) {
        let (m, n) = self.r_dims();
        if m >= n {
            dst.clone_from(&self.R);
            dst.m = m;
        } else {
            let keep: Vec<bool> = (0..self.m2).map(|i| i < m).collect();
            *dst = self.R.select_rows(&keep);
        }
    }

    fn q_dims(&self, compact: bool) -> (usize, usize) {
        let cols = if compact {
            usize::min(self.m, self.n)
        } else {
            self.m
        };
        (self.m, cols)
    }

    /// Explicit orthogonal factor `Q`, with rows in the original row
    /// order of `A`.   If `compact` then only the first `min(m,n)` columns
    /// are formed, otherwise `Q` is square.
    ///
    /// This is expensive, with cost proportional to `nnz(V)` for every
    /// column, and is intended for testing and for small problems.
    pub fn q(&self, compact: bool) -> CscMatrix<T> {
        let mut Q = CscMatrix::spalloc(0, 0, 0);
        self.q_fill(&mut Q, compact);
        Q
    }

    /// Forms `Q` into `dst`, which must already have the shape
    /// that [`q`](QRFactors::q) would return.
    pub fn q_into(&self, dst: &mut CscMatrix<T>, compact: bool) -> Result<(), SparseQRError> {
        if dst.size() != self.q_dims(compact) {
            return Err(SparseQRError::IncompatibleDimension);
        }
        self.q_fill(dst, compact);
        Ok(())
    }

    fn q_fill(&self, Q: &mut CscMatrix<T>, compact: bool) {
        let (m, w) = self.q_dims(compact);
        Q.m = m;
        Q.n = w;
        Q.colptr.clear();
        Q.rowval.clear();
        Q.nzval.clear();
        Q.colptr.push(0);

        let mut x = vec![T::zero(); self.m2];
        for j in 0..w {
            x.set(T::zero());
            x[j] = T::one();
            for k in (0..self.n).rev() {
                apply_householder(&self.V, k, self.beta[k], &mut x);
            }
            for (i, &pi) in self.pinv[..m].iter().enumerate() {
                let v = x[pi];
                if v != T::zero() {
                    Q.rowval.push(i);
                    Q.nzval.push(v);
                }
            }
            Q.colptr.push(Q.rowval.len());
        }
    }

    /// Computes `Qᵀ·b` with `Q` applied implicitly.
    ///
    /// `b` has one entry per row of `A`.   The result has
    /// [`nrows_padded`](QRFactors::nrows_padded) entries in factor row
    /// order, so that its first `n` entries pair with the rows of `R`.
    pub fn apply_qt(&self, b: &[T]) -> Result<Vec<T>, SparseQRError> {
        if b.len() != self.m {
            return Err(SparseQRError::IncompatibleDimension);
        }
        let mut y = vec![T::zero(); self.m2];
        for (&pi, &bi) in std::iter::zip(&self.pinv, b) {
            y[pi] = bi;
        }
        for k in 0..self.n {
            apply_householder(&self.V, k, self.beta[k], &mut y);
        }
        Ok(y)
    }

    /// Least squares solution of `min ‖A·x - b‖₂`, for `A` with at least
    /// as many rows as columns and full column rank.
    ///
    /// Fails with [`SingularFactor`](SparseQRError::SingularFactor) if `R`
    /// has a zero on its diagonal.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, SparseQRError> {
        if self.m < self.n {
            return Err(SparseQRError::IncompatibleDimension);
        }
        let mut y = self.apply_qt(b)?;

        // back substitution with the leading n x n block of R
        let R = &self.R;
        for j in (0..self.n).rev() {
            let (f, l) = (R.colptr[j], R.colptr[j + 1]);
            let d = R.nzval[l - 1];
            if d == T::zero() {
                return Err(SparseQRError::SingularFactor);
            }
            y[j] /= d;
            let yj = y[j];
            for p in f..(l - 1) {
                y[R.rowval[p]] -= R.nzval[p] * yj;
            }
        }

        let mut x = vec![T::zero(); self.n];
        match &self.perm {
            Some(q) => ipermute(&mut x, &y[..self.n], q),
            None => x.copy_from_slice(&y[..self.n]),
        }
        Ok(x)
    }

    /// Structural row permutation.   Row `i` of `A` (or fictitious row
    /// `i >= nrows(A)`) is row `row_pivots()[i]` of the factors.
    pub fn row_pivots(&self) -> &[usize] {
        &self.pinv
    }

    /// Row permutation as a matrix `Pr`, so that `Pr·A` places the rows of
    /// the (padded) matrix in factor row order.
    pub fn row_pivot_matrix(&self) -> CscMatrix<T> {
        CscMatrix::permutation(&self.pinv)
    }

    /// Column permutation `P`, if one was applied.   Column `k` of the
    /// factored matrix is column `column_pivots()[k]` of `A`.
    pub fn column_pivots(&self) -> Option<&[usize]> {
        self.perm.as_deref()
    }

    /// Column permutation as an `n x n` matrix, with `A·P` the factored
    /// matrix.   The identity if no permutation was applied.
    pub fn column_pivot_matrix(&self) -> CscMatrix<T> {
        match &self.perm {
            Some(q) => CscMatrix::permutation(q),
            None => CscMatrix::identity(self.n),
        }
    }

    pub fn is_row_pivoted(&self) -> bool {
        !is_identity_permutation(&self.pinv)
    }

    pub fn is_column_pivoted(&self) -> bool {
        self.perm
            .as_ref()
            .map_or(false, |q| !is_identity_permutation(q))
    }
}

impl<T> ShapedMatrix for QRFactors<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}
