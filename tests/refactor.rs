#![allow(non_snake_case)]

use sparseqr::{algebra::*, qr::*};

fn refactor_test_matrix() -> CscMatrix<f64> {
    // A =
    //[ 4.0    ⋅   1.0    ⋅ ]
    //[ 1.0   3.0    ⋅    ⋅ ]
    //[  ⋅   -1.0   5.0   2.0]
    //[ 2.0    ⋅     ⋅    1.0]
    //[  ⋅    1.0  -2.0   6.0]
    //[ 1.0    ⋅    1.0    ⋅ ]
    CscMatrix::new(
        6,
        4,
        vec![0, 4, 7, 11, 14],
        vec![0, 1, 3, 5, 1, 2, 4, 0, 2, 4, 5, 2, 3, 4],
        vec![4., 1., 2., 1., 3., -1., 1., 1., 5., -2., 1., 2., 1., 6.],
    )
}

#[test]
fn test_refactor_matches_factor() {
    let A = refactor_test_matrix();
    let mut B = A.clone();
    for (i, v) in B.nzval.iter_mut().enumerate() {
        *v = *v * 1.5 + (i as f64) * 0.1;
    }

    let mut qr = SparseQR::new(None);
    qr.factor(&A).unwrap();
    let F1 = qr.refactor(&B).unwrap().clone();

    let mut fresh = SparseQR::new(None);
    let F2 = fresh.factor(&B).unwrap();

    assert_eq!(F1.column_pivots(), F2.column_pivots());
    assert_eq!(F1.row_pivots(), F2.row_pivots());
    assert_eq!(F1.nnz_r(), F2.nnz_r());
    assert!(F1.diagonal().norm_inf_diff(&F2.diagonal()) < 1e-12);
    assert!(F1.r().nzval.norm_inf_diff(&F2.r().nzval) < 1e-12);
}

#[test]
fn test_refactor_reuses_analysis() {
    let A = refactor_test_matrix();
    let mut qr = SparseQR::new(None);
    qr.factor(&A).unwrap();
    let S = qr.symbolic().unwrap().clone();

    let mut B = A.clone();
    B.nzval.scale(2.);
    qr.refactor(&B).unwrap();
    assert_eq!(qr.symbolic(), Some(&S));

    // scaling A scales R
    let d = qr.factors().unwrap().diagonal();
    let mut fresh = SparseQR::new(None);
    let mut d0 = fresh.factor(&A).unwrap().diagonal();
    d0.scale(2.);
    assert!(d.norm_inf_diff(&d0) < 1e-12);
}

#[test]
fn test_refactor_before_factor() {
    let A = refactor_test_matrix();
    let mut qr = SparseQR::new(None);
    assert_eq!(qr.refactor(&A).err(), Some(SparseQRError::NotAnalysed));
    assert!(qr.factors().is_none());
}

#[test]
fn test_refactor_pattern_mismatch() {
    let A = refactor_test_matrix();
    let mut qr = SparseQR::new(None);
    let d0 = qr.factor(&A).unwrap().diagonal();

    // same shape, one entry moved
    let mut B = A.clone();
    B.rowval[0] = 2;
    B.rowval.swap(0, 1);
    B.nzval.swap(0, 1);
    assert!(B.check_format().is_ok());
    assert_eq!(qr.refactor(&B).err(), Some(SparseQRError::SparsityMismatch));

    // different shape
    let C = CscMatrix::<f64>::identity(4);
    assert_eq!(qr.refactor(&C).err(), Some(SparseQRError::SparsityMismatch));

    // a rejected matrix leaves the previous factors in place
    assert_eq!(qr.factors().map(|F| F.diagonal()), Some(d0));

    // the analysis survives a failed refactor
    assert!(qr.refactor(&A).is_ok());
    assert!(qr.factors().is_some());
}

#[test]
fn test_repeated_factor_different_sizes() {
    let A = refactor_test_matrix();
    let mut qr = SparseQR::new(None);
    qr.factor(&A).unwrap();

    let B = A.transpose();
    let F = qr.factor(&B).unwrap();
    assert_eq!(F.r().size(), (4, 6));

    let F = qr.factor(&A).unwrap();
    assert_eq!(F.r().size(), (6, 4));
    assert_eq!(F.degenerate_columns(), Vec::<usize>::new());
}
