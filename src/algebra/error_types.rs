use super::Shape;
use thiserror::Error;

/// Error type returned by dense matrix construction and elementwise operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixShapeError {
    /// Data length does not agree with the requested matrix dimensions
    #[error("Data of length {found} cannot fill a matrix of shape {shape}")]
    DataLength { shape: Shape, found: usize },
    /// Operation on matrices of incompatible dimension
    #[error("Incompatible dimensions {0} and {1}")]
    IncompatibleDimension(Shape, Shape),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix assembly operations.
pub enum SparseFormatError {
    /// Triplet index exceeds the matrix dimensions
    #[error("Entry ({row}, {col}) is outside of a {shape} matrix")]
    BadIndex { row: usize, col: usize, shape: Shape },
    #[error("sparsity pattern mismatch")]
    /// Operation on matrices that have mismatching sparsity patterns
    SparsityMismatch,
}
