//! Dense and sparse matrix support for problem construction and inspection.
//!
//! Dense matrices are stored column major, matching the ordering in which
//! matrix variables are vectorized into the solver variable `x`.  Sparse
//! matrices use the [`CscMatrix`] type of the `clarabel` solver so that compiled
//! problem data can be handed to the solver without conversion.

mod csc;
mod dense;
mod error_types;
mod shape;

pub use csc::*;
pub use dense::*;
pub use error_types::*;
pub use shape::*;

pub use clarabel::algebra::CscMatrix;
