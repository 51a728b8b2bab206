#![allow(non_snake_case)]

use super::numeric::_factor_numeric;
use super::workspace::QRWorkspace;
use super::*;
use crate::algebra::*;
use crate::timers::*;

/// Left-looking sparse QR factorization `A·P = Q·R` of a matrix in
/// compressed sparse column format.
///
/// The structural analysis of the most recent call to
/// [`factor`](SparseQR::factor) is kept, so that matrices with the same
/// sparsity pattern and new values can be factored again with
/// [`refactor`](SparseQR::refactor).   Memory is reused across calls.
///
/// __Example usage__ :
///
/// ```no_run
/// use sparseqr::algebra::CscMatrix;
/// use sparseqr::qr::SparseQR;
///
/// // A = [1.  0.]
/// //     [1.  1.]
/// //     [0.  2.]
/// let A = CscMatrix::new(3, 2, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1., 1., 1., 2.]);
///
/// let mut qr = SparseQR::new(None);
/// let factors = qr.factor(&A).unwrap();
///
/// let R = factors.r();
/// let x = factors.solve(&[1., 2., 3.]).unwrap();
/// ```

#[derive(Debug)]
pub struct SparseQR<T = f64> {
    settings: SparseQRSettings,
    symbolic: Option<SymbolicQR>,
    // A·P, when a column permutation is applied
    Aperm: CscMatrix<T>,
    workspace: QRWorkspace<T>,
    factors: QRFactors<T>,
    is_factored: bool,
    timers: Timers,
}

impl<T> SparseQR<T>
where
    T: FloatT,
{
    pub fn new(settings: Option<SparseQRSettings>) -> Self {
        Self {
            settings: settings.unwrap_or_default(),
            symbolic: None,
            Aperm: CscMatrix::spalloc(0, 0, 0),
            workspace: QRWorkspace::new(),
            factors: QRFactors::new(),
            is_factored: false,
            timers: Timers::default(),
        }
    }

    /// Analyse and factor `A`.
    pub fn factor(&mut self, A: &CscMatrix<T>) -> Result<&QRFactors<T>, SparseQRError> {
        self.is_factored = false;
        self.symbolic = None;
        self.timers.reset();

        if self.settings.check_format {
            A.check_format()?;
        }
        let (m, n) = A.size();

        timeit! {self.timers => "ordering";
            let perm = self.settings.ordering.column_permutation(m, n, &A.colptr, &A.rowval)?;
        }

        let C = match &perm {
            Some(q) => {
                A.permute_columns_into(q, &mut self.Aperm);
                &self.Aperm
            }
            None => A,
        };

        timeit! {self.timers => "analysis";
            let S = SymbolicQR::analyze(C);
        }
        log::debug!(
            target: "sparseqr",
            "analysis: m = {}, n = {}, fictitious rows = {}, nnz(V) = {}, nnz(R) = {}",
            m,
            n,
            S.fictitious_rows(),
            S.nnz_v(),
            S.nnz_r()
        );

        let F = &mut self.factors;
        _reset_factors(F, &S, perm);

        timeit! {self.timers => "numeric";
            _factor_numeric(C, &S, &mut F.V, &mut F.R, &mut F.beta, &mut self.workspace)?;
        }

        self.symbolic = Some(S);
        self.is_factored = true;
        Ok(&self.factors)
    }

    /// Factor `A` reusing the structural analysis and column ordering of
    /// the last call to [`factor`](SparseQR::factor).   `A` must have the
    /// same sparsity pattern as the matrix analysed there.
    pub fn refactor(&mut self, A: &CscMatrix<T>) -> Result<&QRFactors<T>, SparseQRError> {
        let S = self.symbolic.as_ref().ok_or(SparseQRError::NotAnalysed)?;

        if self.settings.check_format {
            A.check_format()?;
        }
        if A.size() != S.size() {
            return Err(SparseQRError::SparsityMismatch);
        }

        let F = &mut self.factors;
        let C = match &F.perm {
            Some(q) => {
                A.permute_columns_into(q, &mut self.Aperm);
                &self.Aperm
            }
            None => A,
        };
        if !S.is_consistent_with(C) {
            return Err(SparseQRError::SparsityMismatch);
        }

        // factors are overwritten from here on
        self.is_factored = false;
        self.timers.reset_timer("numeric");
        timeit! {self.timers => "numeric";
            _factor_numeric(C, S, &mut F.V, &mut F.R, &mut F.beta, &mut self.workspace)?;
        }
        log::debug!(target: "sparseqr", "refactored {} x {} matrix", S.nrows(), S.ncols());

        self.is_factored = true;
        Ok(&self.factors)
    }

    /// Factors from the last successful factorization
    pub fn factors(&self) -> Option<&QRFactors<T>> {
        self.is_factored.then_some(&self.factors)
    }

    /// Structural analysis from the last call to [`factor`](SparseQR::factor)
    pub fn symbolic(&self) -> Option<&SymbolicQR> {
        self.symbolic.as_ref()
    }

    pub fn settings(&self) -> &SparseQRSettings {
        &self.settings
    }

    /// Timings of the "ordering", "analysis" and "numeric" phases
    pub fn timers(&self) -> &Timers {
        &self.timers
    }
}

fn _reset_factors<T: FloatT>(F: &mut QRFactors<T>, S: &SymbolicQR, perm: Option<Vec<usize>>) {
    F.m = S.m;
    F.n = S.n;
    F.m2 = S.m2;
    F.pinv.clear();
    F.pinv.extend_from_slice(&S.pinv);
    F.beta.resize(S.n, T::zero());
    F.perm = perm;
}
