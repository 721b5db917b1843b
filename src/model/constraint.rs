use super::Expr;
use crate::algebra::{Matrix, Shape};
use crate::KronError;

/// Elementwise inequality `lhs >= rhs`.
///
/// The two sides must have equal shapes, or one of them must be a scalar
/// which is then broadcast against the other.
#[derive(Debug, Clone)]
pub struct Constraint {
    lhs: Expr,
    rhs: Expr,
    shape: Shape,
}

impl Constraint {
    pub(crate) fn greater_equal(lhs: Expr, rhs: Expr) -> Result<Self, KronError> {
        let (left, right) = (lhs.shape()?, rhs.shape()?);
        let shape = left
            .broadcast(&right)
            .ok_or(KronError::ShapeMismatch {
                operation: "inequality",
                left,
                right,
            })?;
        Ok(Self { lhs, rhs, shape })
    }

    /// the side that is bounded below
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// shape after broadcasting
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_affine(&self) -> bool {
        self.lhs.is_affine() && self.rhs.is_affine()
    }

    pub fn is_dpp(&self) -> bool {
        self.lhs.is_dpp() && self.rhs.is_dpp()
    }

    /// Amount `max(rhs - lhs, 0)` by which each entry is violated at the
    /// current variable values.
    pub fn violation(&self) -> Result<Matrix<f64>, KronError> {
        let lhs = self.lhs.value()?;
        let rhs = self.rhs.value()?;
        Ok(rhs.zip_broadcast(&lhs, |r, l| (r - l).max(0.0))?)
    }

    /// largest entry of [`violation`](Self::violation)
    pub fn max_violation(&self) -> Result<f64, KronError> {
        Ok(self.violation()?.maximum().unwrap_or(0.0))
    }
}
