//! Sparse matrix types and the vector arithmetic used by the QR factorization.
//!
//! All matrices are stored in standard compressed sparse column (CSC) format.

#![allow(non_snake_case)]

mod csc;
mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod permutation;
mod vecmath;

pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;
pub use permutation::*;
