#![allow(non_snake_case)]
use crate::algebra::Matrix;
#[cfg(test)]
use crate::algebra::Shape;
use num_traits::Float;

impl<T> Matrix<T>
where
    T: Float,
{
    /// Kronecker product `kron(A, B)`.
    ///
    /// For `A` of shape p x q and `B` of shape r x s the result has shape
    /// (pr) x (qs), with block `(i, j)` equal to `A[i, j] * B`.
    pub fn kron(A: &Matrix<T>, B: &Matrix<T>) -> Matrix<T> {
        let (pp, qq): (usize, usize) = A.shape().into();
        let (rr, ss): (usize, usize) = B.shape().into();
        let mut data = Vec::with_capacity(pp * qq * rr * ss);

        for q in 0..qq {
            for s in 0..ss {
                for p in 0..pp {
                    let Apq = A[(p, q)];
                    for r in 0..rr {
                        data.push(Apq * B[(r, s)]);
                    }
                }
            }
        }
        // the loop order above visits entries in column major order
        Matrix {
            size: A.shape().kron(&B.shape()),
            data,
        }
    }
}

#[test]
fn test_kron() {
    let A = Matrix::from_col_major((2, 2), vec![1.0, 4.0, 2.0, 5.0]).unwrap();
    let B = Matrix::from_col_major((1, 2), vec![1.0, 2.0]).unwrap();

    let K = Matrix::kron(&A, &B);
    assert_eq!(K.shape(), Shape(2, 4));
    assert_eq!(K.data(), &[1., 4., 2., 8., 2., 5., 4., 10.]);
    let K = Matrix::kron(&A.t(), &B);
    assert_eq!(K.data(), &[1., 2., 2., 4., 4., 5., 8., 10.]);

    let K = Matrix::kron(&A, &B.t());
    assert_eq!(K.shape(), Shape(4, 2));
    assert_eq!(K.data(), &[1., 2., 4., 8., 2., 4., 5., 10.]);
    let K = Matrix::kron(&A.t(), &B.t());
    assert_eq!(K.data(), &[1., 2., 2., 4., 4., 8., 5., 10.]);
}

#[test]
fn test_kron_blocks() {
    // block (i, j) of kron(C, L) is C[i, j] * L
    let C = Matrix::from_row_major((1, 2), &[0.5, 2.0]).unwrap();
    let L = Matrix::from_row_major((2, 2), &[1., 2., 3., 4.]).unwrap();
    let K = Matrix::kron(&C, &L);
    assert_eq!(
        K.rows(),
        vec![vec![0.5, 1.0, 2.0, 4.0], vec![1.5, 2.0, 6.0, 8.0]]
    );
}
