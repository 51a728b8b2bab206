//! Left-looking sparse QR factorization with Householder reflectors.
//!
//! [`SparseQR`] computes `A·P = Q·R` for a sparse `m x n` matrix `A` in
//! [`CscMatrix`](crate::algebra::CscMatrix) format, where `P` is a fill
//! reducing column permutation, `Q` is orthogonal and `R` is upper
//! triangular.   `Q` is stored implicitly as a sequence of sparse
//! Householder reflectors.
//!
//! Factorization runs in two phases.   A structural analysis
//! ([`SymbolicQR`]) of the sparsity pattern computes the column elimination
//! tree of `AᵀA`, a row permutation and the exact storage needed for the
//! factors.   The numeric phase then computes the reflectors and `R` one
//! column at a time.

mod error;
mod factors;
mod householder;
mod numeric;
mod ordering;
mod settings;
mod sparseqr;
mod symbolic;
mod workspace;

pub use error::*;
pub use factors::*;
pub use ordering::*;
pub use settings::*;
pub use sparseqr::*;
pub use symbolic::*;
