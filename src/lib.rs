//! __sparseqr__ is a Rust implementation of a left-looking sparse QR
//! factorization for matrices in compressed sparse column format.  For a
//! sparse matrix $A \in \mathbb{R}^{m \times n}$ it computes
//!
//! $$
//! A P = Q R
//! $$
//!
//! where $P$ is a fill reducing column permutation, $Q$ is orthogonal and
//! stored implicitly as a product of sparse Householder reflectors, and
//! $R$ is sparse and upper triangular.
//!
//! ## Features
//!
//! * __Structural analysis__: the column elimination tree of $A^T A$, the row
//!   permutation and the exact size of both factors are computed from the
//!   sparsity pattern alone, and can be reused for matrices with the same
//!   pattern.
//!
//! * __Column orderings__: natural, approximate minimum degree on the pattern
//!   of $A^T A$, or a caller supplied permutation.
//!
//! * __Rank deficient inputs__: structurally or numerically zero columns
//!   produce a zero on the diagonal of $R$ rather than an error.
//!
//! * __Least squares__: solves $\min \|Ax - b\|_2$ for full rank matrices with
//!   $m \ge n$ using the implicit form of $Q$.
//!
//! # Example
//!
//! ```no_run
//! use sparseqr::algebra::CscMatrix;
//! use sparseqr::qr::*;
//!
//! let A = CscMatrix::new(3, 2, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1., 1., 1., 2.]);
//!
//! let settings = SparseQRSettingsBuilder::default()
//!     .ordering(NaturalOrdering.into())
//!     .build()
//!     .unwrap();
//!
//! let mut qr = SparseQR::new(Some(settings));
//! let factors = qr.factor(&A).unwrap();
//! println!("diag(R) = {:?}", factors.diagonal());
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod qr;
pub mod timers;
