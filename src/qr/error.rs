use crate::algebra::SparseFormatError;
use thiserror::Error;

/// Error codes returnable from [`SparseQR`](crate::qr::SparseQR) operations
/// and from the [`QRFactors`](crate::qr::QRFactors) accessors.
///
/// Rank deficiency is not an error.   A structurally or numerically zero
/// column produces a degenerate reflector and a zero diagonal in `R`.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseQRError {
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    #[error("Structural analysis is inconsistent with the factorization buffers")]
    StructuralMismatch,
    #[error("Matrix sparsity pattern differs from the analysed pattern")]
    SparsityMismatch,
    #[error("No structural analysis is available for refactoring")]
    NotAnalysed,
    #[error("Triangular factor has a zero on its diagonal")]
    SingularFactor,
    #[error("Fill reducing ordering failed: {0}")]
    Ordering(String),
    #[error(transparent)]
    Format(#[from] SparseFormatError),
}
