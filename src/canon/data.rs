#![allow(non_snake_case)]

use super::affine::{ParamCoeff, ParamValues};
use crate::algebra::{CscInspect, CscMatrix, Matrix, Shape, TripletAssembler};
use crate::model::{Parameter, VarId};
use crate::KronError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How parameters were treated during canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamHandling {
    /// parameters kept as symbols; data can be re-instantiated
    Symbolic,
    /// parameter values folded in as constants at compile time
    Substituted,
}

impl std::fmt::Display for ParamHandling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamHandling::Symbolic => write!(f, "symbolic"),
            ParamHandling::Substituted => write!(f, "substituted"),
        }
    }
}

/// Position of one problem variable inside the solver vector `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableSlot {
    pub id: VarId,
    pub name: String,
    pub shape: Shape,
    pub offset: usize,
}

/// Layout of the solver vector `x`.  Each variable is stored column major
/// in a contiguous block, blocks ordered by first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableMap {
    pub slots: Vec<VariableSlot>,
    pub n: usize,
}

impl VariableMap {
    pub(crate) fn push(&mut self, id: VarId, name: &str, shape: Shape) -> usize {
        let offset = self.n;
        self.slots.push(VariableSlot {
            id,
            name: name.to_string(),
            shape,
            offset,
        });
        self.n += shape.len();
        offset
    }

    pub fn offset_of(&self, id: VarId) -> Option<usize> {
        self.slots.iter().find(|s| s.id == id).map(|s| s.offset)
    }

    /// Splits a solver vector into per variable matrices.
    pub fn unpack(&self, x: &[f64]) -> Result<Vec<(VarId, Matrix<f64>)>, KronError> {
        if x.len() != self.n {
            return Err(KronError::ShapeMismatch {
                operation: "solution unpacking",
                left: Shape(self.n, 1),
                right: Shape(x.len(), 1),
            });
        }
        self.slots
            .iter()
            .map(|s| {
                let block = x[s.offset..s.offset + s.shape.len()].to_vec();
                Ok((s.id, Matrix::from_col_major(s.shape, block)?))
            })
            .collect()
    }
}

/// Cone dimensions of the compiled problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConeDims {
    /// rows of `G x <= h`
    pub nonneg: usize,
}

/// Canonicalized problem whose coefficients may still refer to parameters.
///
/// Represents `minimize c'x + offset  s.t.  G x <= h`, with every entry of
/// `c`, `G` and `h` an affine function of the parameter entries.
#[derive(Debug, Clone)]
pub struct ParametricProblem {
    pub(crate) c: Vec<ParamCoeff>,
    pub(crate) offset: ParamCoeff,
    pub(crate) G: TripletAssembler<ParamCoeff>,
    pub(crate) h: Vec<ParamCoeff>,
    pub(crate) var_map: VariableMap,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) handling: ParamHandling,
}

impl ParametricProblem {
    pub fn handling(&self) -> ParamHandling {
        self.handling
    }

    pub fn var_map(&self) -> &VariableMap {
        &self.var_map
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// rows of `G`
    pub fn constraint_rows(&self) -> usize {
        self.h.len()
    }

    /// stored entries of `G`, including those whose value may be zero
    pub fn nnz_structural(&self) -> usize {
        self.G.clone().into_sorted_entries().len()
    }

    /// Instantiates numeric data from the current parameter values.
    pub fn apply_parameters(&self) -> Result<ProblemData, KronError> {
        let values = ParamValues::snapshot(&self.parameters)?;
        self.apply_values(&values)
    }

    /// Instantiates numeric data from an explicit set of parameter values.
    pub fn apply_values(&self, values: &ParamValues) -> Result<ProblemData, KronError> {
        for p in &self.parameters {
            values.require(p)?;
        }
        let eval = |v: &[ParamCoeff]| -> Result<Vec<f64>, KronError> {
            v.iter().map(|a| a.evaluate(values)).collect()
        };

        let mut G = TripletAssembler::new(self.G.shape());
        for (row, col, a) in self.G.clone().into_sorted_entries() {
            G.push(row, col, a.evaluate(values)?)?;
        }

        Ok(ProblemData {
            c: eval(&self.c)?,
            offset: self.offset.evaluate(values)?,
            G: G.assemble(),
            h: eval(&self.h)?,
            dims: ConeDims {
                nonneg: self.h.len(),
            },
            var_map: self.var_map.clone(),
            handling: self.handling,
        })
    }
}

/// Numeric problem data `minimize c'x + offset  s.t.  G x <= h`.
#[derive(Debug, Clone)]
pub struct ProblemData {
    pub c: Vec<f64>,
    pub offset: f64,
    pub G: CscMatrix<f64>,
    pub h: Vec<f64>,
    pub dims: ConeDims,
    pub var_map: VariableMap,
    pub handling: ParamHandling,
}

/// Size and sparsity figures of a [`ProblemData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSummary {
    pub rows: usize,
    pub cols: usize,
    pub nnz: usize,
    pub explicit_zeros: usize,
    pub h_len: usize,
}

impl std::fmt::Display for DataSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "G: {} x {}, {} stored entries ({} explicit zeros), h: {}",
            self.rows, self.cols, self.nnz, self.explicit_zeros, self.h_len
        )
    }
}

impl ProblemData {
    pub fn summary(&self) -> DataSummary {
        let (rows, cols) = self.G.dims().into();
        DataSummary {
            rows,
            cols,
            nnz: self.G.nzval.len(),
            explicit_zeros: self.G.explicit_zeros(),
            h_len: self.h.len(),
        }
    }

    /// `G` as a dense matrix
    pub fn G_dense(&self) -> Matrix<f64> {
        self.G.dense_copy()
    }

    /// `h` as a column vector
    pub fn h_vector(&self) -> Result<Matrix<f64>, KronError> {
        Ok(Matrix::from_col_major((self.h.len(), 1), self.h.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;

    #[test]
    fn test_variable_map_unpack() {
        let a = Variable::named("A", (2, 2)).unwrap();
        let b = Variable::named("B", (1, 1)).unwrap();
        let mut map = VariableMap::default();
        assert_eq!(map.push(a.id(), a.name(), a.shape()), 0);
        assert_eq!(map.push(b.id(), b.name(), b.shape()), 4);
        assert_eq!(map.n, 5);
        assert_eq!(map.offset_of(b.id()), Some(4));

        let values = map.unpack(&[1., 2., 3., 4., 5.]).unwrap();
        assert_eq!(values[0].0, a.id());
        assert_eq!(values[0].1.rows(), vec![vec![1., 3.], vec![2., 4.]]);
        assert_eq!(values[1].1.data(), &[5.]);

        assert!(map.unpack(&[1., 2.]).is_err());
    }
}
