use crate::algebra::{CscMatrix, Matrix, Shape, SparseFormatError};

/// Read-only helpers for examining compiled sparse problem data.
pub trait CscInspect {
    /// dimensions `(m, n)` as a [`Shape`]
    fn dims(&self) -> Shape;
    /// dense copy of the matrix
    fn dense_copy(&self) -> Matrix<f64>;
    /// number of stored entries whose value is exactly zero
    fn explicit_zeros(&self) -> usize;
    /// `(row, col)` positions of stored entries with a nonzero value
    fn nonzero_pattern(&self) -> Vec<(usize, usize)>;
    /// largest absolute difference between two matrices of equal dimension
    fn max_entry_diff(&self, other: &Self) -> Result<f64, SparseFormatError>;
}

impl CscInspect for CscMatrix<f64> {
    fn dims(&self) -> Shape {
        Shape(self.m, self.n)
    }

    fn dense_copy(&self) -> Matrix<f64> {
        let mut D = Matrix::zeros((self.m, self.n));
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                D[(self.rowval[ptr], col)] += self.nzval[ptr];
            }
        }
        D
    }

    fn explicit_zeros(&self) -> usize {
        self.nzval.iter().filter(|&&v| v == 0.0).count()
    }

    fn nonzero_pattern(&self) -> Vec<(usize, usize)> {
        let mut pattern = Vec::with_capacity(self.nzval.len());
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                if self.nzval[ptr] != 0.0 {
                    pattern.push((self.rowval[ptr], col));
                }
            }
        }
        pattern
    }

    fn max_entry_diff(&self, other: &Self) -> Result<f64, SparseFormatError> {
        if self.m != other.m || self.n != other.n {
            return Err(SparseFormatError::SparsityMismatch);
        }
        self.dense_copy()
            .max_abs_diff(&other.dense_copy())
            .map_err(|_| SparseFormatError::SparsityMismatch)
    }
}

#[test]
fn test_csc_inspect() {
    let A = CscMatrix::new(
        3,                       // m
        2,                       // n
        vec![0, 2, 4],           // colptr
        vec![0, 2, 1, 2],        // rowval
        vec![1., 0., -1., 4.],   // nzval
    );

    assert_eq!(A.dims(), Shape(3, 2));
    assert_eq!(A.explicit_zeros(), 1);
    assert_eq!(A.nonzero_pattern(), vec![(0, 0), (1, 1), (2, 1)]);
    assert_eq!(A.dense_copy().rows(), vec![vec![1., 0.], vec![0., -1.], vec![0., 4.]]);

    let B = CscMatrix::new(3, 2, vec![0, 1, 3], vec![0, 1, 2], vec![1., -1., 3.]);
    assert_eq!(A.max_entry_diff(&B).unwrap(), 1.);
    assert!(A.max_entry_diff(&CscMatrix::new(2, 2, vec![0; 3], vec![], vec![])).is_err());
}
