#![allow(non_snake_case)]

use super::SparseQRError;
use crate::algebra::*;
use enum_dispatch::*;

/// Selection of the column permutation `P` applied before factoring,
/// so that `A·P = Q·R`.
///
/// Implementations see only the sparsity pattern of `A`.   A return
/// value of `None` means that no permutation is applied.

#[enum_dispatch]
pub trait ColumnOrderingT {
    fn column_permutation(
        &self,
        m: usize,
        n: usize,
        colptr: &[usize],
        rowval: &[usize],
    ) -> Result<Option<Vec<usize>>, SparseQRError>;
}

/// Column ordering choices for [`SparseQRSettings`](crate::qr::SparseQRSettings).
#[enum_dispatch(ColumnOrderingT)]
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOrdering {
    Natural(NaturalOrdering),
    Amd(AmdOrdering),
    Given(GivenOrdering),
}

impl Default for ColumnOrdering {
    fn default() -> Self {
        AmdOrdering::default().into()
    }
}

/// Factor the columns in the order given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrdering;

impl ColumnOrderingT for NaturalOrdering {
    fn column_permutation(
        &self,
        _m: usize,
        _n: usize,
        _colptr: &[usize],
        _rowval: &[usize],
    ) -> Result<Option<Vec<usize>>, SparseQRError> {
        Ok(None)
    }
}

/// Approximate minimum degree ordering of the pattern of `AᵀA`.
///
/// Rows of `A` with more than `max(16, 10·√n)` entries are left out of
/// the pattern, since each would make `AᵀA` dense.   `dense_scale`
/// multiplies the AMD dense row threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmdOrdering {
    pub dense_scale: f64,
}

impl Default for AmdOrdering {
    fn default() -> Self {
        Self { dense_scale: 1.0 }
    }
}

impl ColumnOrderingT for AmdOrdering {
    fn column_permutation(
        &self,
        m: usize,
        n: usize,
        colptr: &[usize],
        rowval: &[usize],
    ) -> Result<Option<Vec<usize>>, SparseQRError> {
        if n == 0 {
            return Ok(None);
        }
        let (Sp, Si) = _ata_pattern(m, n, colptr, rowval);

        let mut control = amd::Control::default();
        control.dense *= self.dense_scale;
        let (perm, _iperm, _info) = amd::order(n, &Sp, &Si, &control)
            .map_err(|status| SparseQRError::Ordering(format!("{:?}", status)))?;

        log::trace!(target: "sparseqr", "amd ordering: nnz(AᵀA) = {}", Si.len());
        Ok(Some(perm))
    }
}

/// A caller supplied column permutation.   Column `k` of the factored
/// matrix is column `perm[k]` of `A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GivenOrdering(pub Vec<usize>);

impl ColumnOrderingT for GivenOrdering {
    fn column_permutation(
        &self,
        _m: usize,
        n: usize,
        _colptr: &[usize],
        _rowval: &[usize],
    ) -> Result<Option<Vec<usize>>, SparseQRError> {
        if self.0.len() != n || invperm(&self.0).is_none() {
            return Err(SparseQRError::InvalidPermutation);
        }
        Ok(Some(self.0.clone()))
    }
}

// Pattern of AᵀA, ignoring any dense rows of A, with sorted row indices
// in every column.  The diagonal is always present, so that the pattern
// has at least n entries even for empty or orthogonal columns.

pub(crate) fn _ata_pattern(
    m: usize,
    n: usize,
    Ap: &[usize],
    Ai: &[usize],
) -> (Vec<usize>, Vec<usize>) {
    let nnz = Ap[n];
    let dense = usize::max(16, (10.0 * (n as f64).sqrt()) as usize);

    // row-wise copy of the pattern of A
    let mut rowcount = vec![0usize; m];
    for &r in &Ai[..nnz] {
        rowcount[r] += 1;
    }
    let mut Rp = vec![0usize; m + 1];
    for r in 0..m {
        let count = if rowcount[r] > dense { 0 } else { rowcount[r] };
        Rp[r + 1] = Rp[r] + count;
    }
    let mut next = Rp[..m].to_vec();
    let mut Rj = vec![0usize; Rp[m]];
    for col in 0..n {
        for &r in &Ai[Ap[col]..Ap[col + 1]] {
            if rowcount[r] <= dense {
                Rj[next[r]] = col;
                next[r] += 1;
            }
        }
    }

    let mut Sp = Vec::with_capacity(n + 1);
    let mut Si = Vec::new();
    let mut marks = vec![usize::MAX; n];
    Sp.push(0);

    for j in 0..n {
        let start = Si.len();
        marks[j] = j;
        Si.push(j);
        for &r in &Ai[Ap[j]..Ap[j + 1]] {
            for &k in &Rj[Rp[r]..Rp[r + 1]] {
                if marks[k] != j {
                    marks[k] = j;
                    Si.push(k);
                }
            }
        }
        Si[start..].sort_unstable();
        Sp.push(Si.len());
    }
    (Sp, Si)
}
