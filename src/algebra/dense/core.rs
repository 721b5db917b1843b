#![allow(non_snake_case)]
use crate::algebra::{MatrixShapeError, Shape};
use num_traits::Float;
use std::ops::{Index, IndexMut};

/// Dense matrix with data stored in column major format.
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// C = [0.55  0.72  0.6 ]
///     [0.54  0.42  0.65]
/// ```
///
/// ```
/// use kroncanon::algebra::Matrix;
///
/// let C = Matrix::from_row_major((2, 3), &[0.55, 0.72, 0.6, 0.54, 0.42, 0.65]).unwrap();
/// assert_eq!(C[(1, 2)], 0.65);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    pub(crate) size: Shape,
    pub(crate) data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: Float,
{
    pub fn zeros(size: impl Into<Shape>) -> Self {
        let size = size.into();
        Self {
            size,
            data: vec![T::zero(); size.len()],
        }
    }

    /// 1 x 1 matrix holding `v`
    pub fn scalar(v: T) -> Self {
        Self {
            size: Shape::SCALAR,
            data: vec![v],
        }
    }

    /// Takes ownership of column major `data`.
    pub fn from_col_major(size: impl Into<Shape>, data: Vec<T>) -> Result<Self, MatrixShapeError> {
        let size = size.into();
        if size.len() != data.len() {
            return Err(MatrixShapeError::DataLength {
                shape: size,
                found: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Copies row major `src`, i.e. the natural reading order of a
    /// matrix written out row by row.
    pub fn from_row_major(size: impl Into<Shape>, src: &[T]) -> Result<Self, MatrixShapeError> {
        let size = size.into();
        if size.len() != src.len() {
            return Err(MatrixShapeError::DataLength {
                shape: size,
                found: src.len(),
            });
        }
        Ok(Self::from_fn(size, |i, j| src[i * size.ncols() + j]))
    }

    pub fn from_fn<F>(size: impl Into<Shape>, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let size = size.into();
        let mut data = Vec::with_capacity(size.len());
        for j in 0..size.ncols() {
            for i in 0..size.nrows() {
                data.push(f(i, j));
            }
        }
        Self { size, data }
    }

    pub fn shape(&self) -> Shape {
        self.size
    }

    pub fn nrows(&self) -> usize {
        self.size.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.size.ncols()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// column major data
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        let m = self.nrows();
        &self.data[(col * m)..(col + 1) * m]
    }

    /// entries as rows, for display
    pub fn rows(&self) -> Vec<Vec<T>> {
        (0..self.nrows())
            .map(|i| (0..self.ncols()).map(|j| self[(i, j)]).collect())
            .collect()
    }

    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self {
            size: self.size,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// transposed copy
    pub fn t(&self) -> Self {
        Self::from_fn((self.ncols(), self.nrows()), |i, j| self[(j, i)])
    }

    /// Rounds every entry to `decimals` places after the decimal point.
    pub fn round_to(&self, decimals: i32) -> Self {
        let scale = T::from(10.0f64.powi(decimals)).unwrap_or_else(T::one);
        self.map(|v| (v * scale).round() / scale)
    }

    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    /// largest entry, or `None` for an empty matrix
    pub fn maximum(&self) -> Option<T> {
        self.data.iter().copied().reduce(T::max)
    }

    pub fn minimum(&self) -> Option<T> {
        self.data.iter().copied().reduce(T::min)
    }

    /// Largest absolute elementwise difference to a matrix of the same shape.
    pub fn max_abs_diff(&self, other: &Self) -> Result<T, MatrixShapeError> {
        if self.size != other.size {
            return Err(MatrixShapeError::IncompatibleDimension(
                self.size, other.size,
            ));
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs())))
    }

    /// Elementwise combination `f(self, other)` where a 1 x 1 operand is
    /// broadcast against the other.
    pub fn zip_broadcast<F>(&self, other: &Self, f: F) -> Result<Self, MatrixShapeError>
    where
        F: Fn(T, T) -> T,
    {
        let size = self
            .size
            .broadcast(&other.size)
            .ok_or(MatrixShapeError::IncompatibleDimension(self.size, other.size))?;
        let pick = |m: &Self, k: usize| if m.len() == 1 { m.data[0] } else { m.data[k] };
        let data = (0..size.len())
            .map(|k| f(pick(self, k), pick(other, k)))
            .collect();
        Ok(Self { size, data })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.size.linear_index(idx.0, idx.1)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.size.linear_index(idx.0, idx.1);
        &mut self.data[lidx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_construction() {
        let A = Matrix::from_row_major((2, 3), &[1., 2., 3., 4., 5., 6.]).unwrap();
        assert_eq!(A.data(), &[1., 4., 2., 5., 3., 6.]);
        assert_eq!(A[(0, 2)], 3.);
        assert_eq!(A.col_slice(1), &[2., 5.]);
        assert_eq!(A.rows(), vec![vec![1., 2., 3.], vec![4., 5., 6.]]);
        assert_eq!(A.t().data(), &[1., 2., 3., 4., 5., 6.]);

        let err = Matrix::<f64>::from_row_major((2, 2), &[1., 2., 3.]).unwrap_err();
        assert_eq!(
            err,
            MatrixShapeError::DataLength {
                shape: Shape(2, 2),
                found: 3
            }
        );
    }

    #[test]
    fn test_round_and_reduce() {
        let A = Matrix::from_col_major((1, 3), vec![0.5488135, 0.71518937, 0.60276338]).unwrap();
        let R = A.round_to(2);
        assert_eq!(R.data(), &[0.55, 0.72, 0.6]);
        assert_eq!(R.maximum(), Some(0.72));
        assert_eq!(R.minimum(), Some(0.55));
        assert!((R.sum() - 1.87).abs() < 1e-12);
    }

    #[test]
    fn test_broadcast_and_diff() {
        let A = Matrix::from_row_major((2, 2), &[1., -2., 3., 0.5]).unwrap();
        let Z = Matrix::scalar(0.);
        let P = A.zip_broadcast(&Z, f64::max).unwrap();
        assert_eq!(P.data(), &[1., 3., 0., 0.5]);
        assert_eq!(A.max_abs_diff(&P).unwrap(), 2.);
        assert!(A.max_abs_diff(&Matrix::zeros((1, 4))).is_err());
        assert!(A.zip_broadcast(&Matrix::zeros((3, 1)), f64::max).is_err());
    }
}
