#![allow(non_snake_case)]

use sparseqr::{algebra::*, qr::*};

// deterministic pseudo-random values in [0,1)
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

// sparse m x n matrix with roughly the given density and a strong
// diagonal, so that it has full column rank when m >= n
fn random_sparse(m: usize, n: usize, density: f64, seed: u64) -> CscMatrix<f64> {
    let mut rng = Lcg(seed);
    let mut colptr = vec![0];
    let mut rowval = vec![];
    let mut nzval = vec![];

    for j in 0..n {
        for i in 0..m {
            if i == j {
                rowval.push(i);
                nzval.push(5. + rng.next());
            } else if rng.next() < density {
                rowval.push(i);
                nzval.push(2. * rng.next() - 1.);
            }
        }
        colptr.push(rowval.len());
    }
    CscMatrix::new(m, n, colptr, rowval, nzval)
}

fn settings_with(ordering: ColumnOrdering) -> SparseQRSettings {
    SparseQRSettingsBuilder::default()
        .ordering(ordering)
        .build()
        .unwrap()
}

// dense column major product of two sparse matrices
fn dense_product(A: &CscMatrix<f64>, B: &CscMatrix<f64>) -> Vec<f64> {
    assert_eq!(A.ncols(), B.nrows());
    let (m, n) = (A.nrows(), B.ncols());
    let mut out = vec![0.; m * n];
    for j in 0..n {
        for pb in B.colptr[j]..B.colptr[j + 1] {
            let (k, b) = (B.rowval[pb], B.nzval[pb]);
            for pa in A.colptr[k]..A.colptr[k + 1] {
                out[j * m + A.rowval[pa]] += A.nzval[pa] * b;
            }
        }
    }
    out
}

// checks A*P = Q*R with a relative tolerance
fn check_reconstruction(A: &CscMatrix<f64>, F: &QRFactors<f64>) {
    let AP = match F.column_pivots() {
        Some(q) => A.permute_columns(q),
        None => A.clone(),
    };
    let QR = dense_product(&F.q(false), &F.r());
    let APd = AP.to_dense();
    let scale = APd.norm_inf().max(1.);
    assert!(APd.norm_inf_diff(&QR) <= 1e-9 * scale);
}

#[test]
fn test_reconstruction_natural() {
    for (m, n, seed) in [(30, 20, 1), (25, 25, 2), (40, 10, 3), (12, 12, 4)] {
        let A = random_sparse(m, n, 0.15, seed);
        let mut qr = SparseQR::new(Some(settings_with(NaturalOrdering.into())));
        let F = qr.factor(&A).unwrap();
        assert!(!F.is_column_pivoted());
        check_reconstruction(&A, F);
    }
}

#[test]
fn test_reconstruction_amd() {
    for (m, n, seed) in [(30, 20, 5), (25, 25, 6), (60, 15, 7)] {
        let A = random_sparse(m, n, 0.1, seed);
        let mut qr = SparseQR::new(None);
        let F = qr.factor(&A).unwrap();
        check_reconstruction(&A, F);
        assert_eq!(F.column_pivot_matrix().size(), (n, n));
    }
}

#[test]
fn test_compact_q() {
    let A = random_sparse(20, 8, 0.2, 8);
    let mut qr = SparseQR::new(None);
    let F = qr.factor(&A).unwrap();

    let Q = F.q(true);
    assert_eq!(Q.size(), (20, 8));

    // thin factorization uses the first n rows of R only
    let R = F.r();
    let keep: Vec<bool> = (0..R.nrows()).map(|i| i < 8).collect();
    let Rthin = R.select_rows(&keep);
    let QR = dense_product(&Q, &Rthin);
    let AP = A.permute_columns(F.column_pivots().unwrap()).to_dense();
    assert!(AP.norm_inf_diff(&QR) < 1e-9 * AP.norm_inf());
}

#[test]
fn test_q_is_orthogonal() {
    let A = random_sparse(18, 11, 0.2, 9);
    let mut qr = SparseQR::new(None);
    let F = qr.factor(&A).unwrap();
    assert_eq!(F.fictitious_rows(), 0);

    let Q = F.q(false);
    let QtQ = dense_product(&Q.transpose(), &Q);
    let I = CscMatrix::<f64>::identity(18).to_dense();
    assert!(QtQ.norm_inf_diff(&I) < 1e-12);
}

#[test]
fn test_r_is_upper_triangular() {
    let A = random_sparse(35, 25, 0.1, 10);
    let mut qr = SparseQR::new(None);
    let F = qr.factor(&A).unwrap();

    let R = F.r();
    assert!(R.check_format().is_ok());
    assert_eq!(R.nnz(), F.nnz_r());
    for col in 0..R.ncols() {
        let rows = &R.rowval[R.colptr[col]..R.colptr[col + 1]];
        assert!(rows.iter().all(|&r| r <= col));
        assert_eq!(rows.last(), Some(&col));
    }
}

#[test]
fn test_given_ordering() {
    let A = random_sparse(10, 6, 0.3, 11);
    let perm = vec![5, 3, 1, 0, 2, 4];
    let mut qr = SparseQR::new(Some(settings_with(GivenOrdering(perm.clone()).into())));
    let F = qr.factor(&A).unwrap();

    assert!(F.is_column_pivoted());
    assert_eq!(F.column_pivots(), Some(&perm[..]));
    check_reconstruction(&A, F);

    // P as a matrix gathers the same columns
    let AP = dense_product(&A, &F.column_pivot_matrix());
    assert_eq!(AP, A.permute_columns(&perm).to_dense());
}

#[test]
fn test_bad_given_ordering() {
    let A = random_sparse(10, 6, 0.3, 12);
    let mut qr = SparseQR::new(Some(settings_with(GivenOrdering(vec![0, 1, 2]).into())));
    assert_eq!(qr.factor(&A).err(), Some(SparseQRError::InvalidPermutation));
    assert!(qr.factors().is_none());
}

#[test]
fn test_amd_diagonal_matrix() {
    // AᵀA has no off-diagonal entries
    let A = CscMatrix::new(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], vec![2., -1., 3.]);
    let mut qr = SparseQR::new(Some(settings_with(AmdOrdering::default().into())));
    let F = qr.factor(&A).unwrap();
    assert_eq!(F.fictitious_rows(), 0);
    check_reconstruction(&A, F);

    let mut qr = SparseQR::new(None);
    assert!(qr.factor(&CscMatrix::<f64>::identity(3)).is_ok());
}

#[test]
fn test_structurally_rank_deficient() {
    // A =
    //[ 1.0   ⋅    ⋅   2.0]
    //[  ⋅    ⋅    ⋅   1.0]
    //[ 3.0   ⋅    ⋅    ⋅ ]
    //[  ⋅    ⋅    ⋅    ⋅ ]
    //[ 1.0   ⋅    ⋅   1.0]
    let A = CscMatrix::new(
        5,
        4,
        vec![0, 3, 3, 3, 6],
        vec![0, 2, 4, 0, 1, 4],
        vec![1., 3., 1., 2., 1., 1.],
    );

    let orderings: [ColumnOrdering; 2] = [NaturalOrdering.into(), AmdOrdering::default().into()];
    for ordering in orderings {
        let mut qr = SparseQR::new(Some(settings_with(ordering)));
        let F = qr.factor(&A).unwrap();

        assert_eq!(F.fictitious_rows(), 2);
        assert_eq!(F.nrows_padded(), 7);
        assert_eq!(F.degenerate_columns().len(), 2);
        assert_eq!(F.rank(), None);
        check_reconstruction(&A, F);
    }
}

#[test]
fn test_wide_matrix_shapes() {
    let A = random_sparse(6, 10, 0.3, 13);
    let mut qr = SparseQR::new(None);
    let F = qr.factor(&A).unwrap();

    assert!(F.nrows_padded() >= 10);
    assert_eq!(F.r().size(), (6, 10));
    assert_eq!(F.q(false).size(), (6, 6));
    assert_eq!(F.q(true).size(), (6, 6));
    assert_eq!(F.row_pivots().len(), F.nrows_padded());
}

#[test]
fn test_empty_matrix() {
    let A = CscMatrix::<f64>::spalloc(4, 0, 0);
    let mut qr = SparseQR::new(None);
    let F = qr.factor(&A).unwrap();
    assert_eq!(F.r().size(), (4, 0));
    assert_eq!(F.q(false).to_dense(), CscMatrix::<f64>::identity(4).to_dense());
    assert_eq!(F.solve(&[1., 2., 3., 4.]), Ok(vec![]));
}

#[test]
fn test_bad_format() {
    // row index out of bounds
    let A = CscMatrix::new(2, 2, vec![0, 1, 2], vec![0, 2], vec![1., 1.]);
    let mut qr = SparseQR::new(None);
    assert_eq!(
        qr.factor(&A).err(),
        Some(SparseQRError::Format(SparseFormatError::BadRowval))
    );

    // unsorted rows
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![1, 0], vec![1., 1.]);
    assert_eq!(
        qr.factor(&A).err(),
        Some(SparseQRError::Format(SparseFormatError::BadRowOrdering))
    );
}

#[test]
fn test_factor_is_deterministic() {
    let A = random_sparse(30, 20, 0.1, 14);
    let mut qr1 = SparseQR::new(None);
    let mut qr2 = SparseQR::new(None);
    let F1 = qr1.factor(&A).unwrap();
    let F2 = qr2.factor(&A).unwrap();

    assert_eq!(F1.householder_vectors(), F2.householder_vectors());
    assert_eq!(F1.beta(), F2.beta());
    assert_eq!(F1.r(), F2.r());
    assert_eq!(qr1.symbolic(), qr2.symbolic());
}

#[test]
fn test_r_into_and_q_into() {
    let A = random_sparse(9, 5, 0.3, 15);
    let mut qr = SparseQR::new(None);
    let F = qr.factor(&A).unwrap();

    let mut R = CscMatrix::spalloc(9, 5, 0);
    assert!(F.r_into(&mut R).is_ok());
    assert_eq!(R, F.r());

    let mut Rbad = CscMatrix::spalloc(5, 5, 0);
    assert_eq!(F.r_into(&mut Rbad), Err(SparseQRError::IncompatibleDimension));

    let mut Q = CscMatrix::spalloc(9, 5, 0);
    assert!(F.q_into(&mut Q, true).is_ok());
    assert_eq!(Q, F.q(true));
    assert_eq!(
        F.q_into(&mut Q, false),
        Err(SparseQRError::IncompatibleDimension)
    );
}

#[test]
fn test_timers() {
    let A = random_sparse(30, 20, 0.1, 16);
    let mut qr = SparseQR::new(None);
    qr.factor(&A).unwrap();

    let timers = qr.timers();
    for phase in ["ordering", "analysis", "numeric"] {
        assert!(timers.elapsed(phase).is_some());
    }
    assert!(timers.total_time() >= timers.elapsed("numeric").unwrap());
}
