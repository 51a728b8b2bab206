#![allow(non_snake_case)]

use crate::algebra::{invperm, CscMatrix, FloatT, ShapedMatrix, SparseFormatError};
use std::iter::zip;

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use sparseqr::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```no_run
    /// use sparseqr::algebra::CscMatrix;
    /// let m = 3;
    /// let n = 4;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc(m,n,0);
    /// ```

    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// Permutation matrix `P` with `P[p[k],k] = 1`, so that `A*P`
    /// gathers the columns of `A` in the order given by `p`.
    ///
    /// # Panics
    /// Panics if `p` is not a permutation.
    pub fn permutation(p: &[usize]) -> Self {
        assert!(invperm(p).is_some());
        let n = p.len();
        let colptr = (0usize..=n).collect();
        let rowval = p.to_vec();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// Resize the matrix in place to an `m x n` matrix with space for
    /// `nnz` entries.  Existing storage is reused and never shrunk, so
    /// the length of `rowval` and `nzval` may exceed `nnz` until the
    /// matrix is [`trimmed`](CscMatrix::trim).
    pub fn reshape(&mut self, m: usize, n: usize, nnz: usize) {
        self.m = m;
        self.n = n;
        self.colptr.clear();
        self.colptr.resize(n + 1, 0);
        if self.rowval.len() < nnz {
            self.rowval.resize(nnz, 0);
            self.nzval.resize(nnz, T::zero());
        }
    }

    /// Drop any storage beyond the last column pointer
    pub fn trim(&mut self) {
        let nnz = self.nnz();
        self.rowval.truncate(nnz);
        self.nzval.truncate(nnz);
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr[0] != 0 || self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }

        Ok(())
    }

    /// True if `self` and `B` have the same dimensions and the
    /// same structural nonzeros.   Numerical values are ignored.
    pub fn same_pattern(&self, B: &CscMatrix<T>) -> bool {
        self.size() == B.size()
            && self.colptr == B.colptr
            && self.rowval[..self.nnz()] == B.rowval[..B.nnz()]
    }

    /// Keep only the rows `i` with `rowidx[i] == true`, renumbering
    /// the kept rows consecutively.
    ///
    /// # Panics
    /// Panics if `rowidx` does not have one entry per row.
    pub fn select_rows(&self, rowidx: &[bool]) -> Self {
        assert_eq!(rowidx.len(), self.m);

        // new number of every kept row
        let mut newrow = vec![usize::MAX; self.m];
        let mut mred = 0;
        for (r, _) in rowidx.iter().enumerate().filter(|&(_, &keep)| keep) {
            newrow[r] = mred;
            mred += 1;
        }

        let mut colptr = Vec::with_capacity(self.n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                let r = newrow[self.rowval[ptr]];
                if r != usize::MAX {
                    rowval.push(r);
                    nzval.push(self.nzval[ptr]);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(mred, self.n, colptr, rowval, nzval)
    }

    /// Gather columns into a new matrix, i.e. `C = A(:,q)`.
    ///
    /// # Panics
    /// Panics if `q` has the wrong length.   `q` is assumed to be
    /// a valid permutation.
    pub fn permute_columns(&self, q: &[usize]) -> Self {
        let mut C = CscMatrix::spalloc(self.m, self.n, self.nnz());
        self.permute_columns_into(q, &mut C);
        C
    }

    /// As [`permute_columns`](CscMatrix::permute_columns), but overwrites
    /// `C` and reuses its storage.
    pub fn permute_columns_into(&self, q: &[usize], C: &mut CscMatrix<T>) {
        assert_eq!(q.len(), self.n);
        C.reshape(self.m, self.n, self.nnz());

        let mut nz = 0;
        for (k, &j) in q.iter().enumerate() {
            C.colptr[k] = nz;
            let (f, l) = (self.colptr[j], self.colptr[j + 1]);
            C.rowval[nz..nz + (l - f)].copy_from_slice(&self.rowval[f..l]);
            C.nzval[nz..nz + (l - f)].copy_from_slice(&self.nzval[f..l]);
            nz += l - f;
        }
        C.colptr[self.n] = nz;
        C.trim();
    }

    /// Allocates a new matrix holding the transpose of `self`.   Row
    /// indices of the result are sorted within each column.
    pub fn transpose(&self) -> Self {
        let (m, n) = (self.m, self.n);
        let nnz = self.nnz();
        let mut At = CscMatrix::spalloc(n, m, nnz);

        //count the entries in each row of self
        let mut next = vec![0; m];
        for &r in &self.rowval[..nnz] {
            next[r] += 1;
        }
        let mut acc = 0;
        for (Tc, count) in zip(&mut At.colptr[..m], &mut next) {
            *Tc = acc;
            acc += *count;
            *count = *Tc;
        }

        for col in 0..n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                let dest = &mut next[self.rowval[ptr]];
                At.rowval[*dest] = col;
                At.nzval[*dest] = self.nzval[ptr];
                *dest += 1;
            }
        }
        At
    }

    /// Dense column-major copy of the matrix.   Intended for testing
    /// and for examining small factors.
    pub fn to_dense(&self) -> Vec<T> {
        let mut D = vec![T::zero(); self.m * self.n];
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                D[col * self.m + self.rowval[ptr]] += self.nzval[ptr];
            }
        }
        D
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        let rows_in_this_column = &self.rowval[first..last];
        match rows_in_this_column.binary_search(&row) {
            Ok(idx) => Some(self.nzval[first + idx]),
            Err(_) => None,
        }
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

#[test]
fn test_csc_get_entry() {
    // R =
    //[ 2.0  -1.0    ⋅    3.0]
    //[  ⋅    5.0    ⋅     ⋅ ]
    //[  ⋅     ⋅     ⋅   -4.0]
    let R = CscMatrix::new(
        3,
        4,
        vec![0, 1, 3, 3, 5],
        vec![0, 0, 1, 0, 2],
        vec![2., -1., 5., 3., -4.],
    );

    assert_eq!(R.get_entry((0, 0)), Some(2.));
    assert_eq!(R.get_entry((0, 1)), Some(-1.));
    assert_eq!(R.get_entry((1, 1)), Some(5.));
    assert_eq!(R.get_entry((0, 3)), Some(3.));
    assert_eq!(R.get_entry((2, 3)), Some(-4.));

    // structural zeros, including an empty column
    assert_eq!(R.get_entry((1, 0)), None);
    assert_eq!(R.get_entry((2, 1)), None);
    assert_eq!(R.get_entry((0, 2)), None);
    assert_eq!(R.get_entry((1, 3)), None);
}
