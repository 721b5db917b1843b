//! Random problems with a known optimum.
//!
//! For nonnegative `C` and `L`, the problem
//!
//! ```text
//!   minimize    sum(Z)
//!   subject to  kron(C, Z) >= kron(C, L)
//!               Z >= 0
//! ```
//!
//! is solved by `Z = L` whenever `C` has a strictly positive entry: block
//! `(i, j)` of the first constraint reads `C[i, j] * Z >= C[i, j] * L`, so a
//! single positive entry already pins `Z` to `L`.  Zero rows or columns of
//! `C` do not matter.  Only an all zero `C` leaves `Z >= 0` as the sole
//! bound, and the optimum is then `Z = 0`.

use crate::algebra::{Matrix, Shape};
use crate::model::{kron, sum, Expr, Input, Objective, Problem, Representation, Variable};
use crate::KronError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal places kept in the random draws of `C` and `L`.
pub const DRAW_DECIMALS: i32 = 2;

/// Argument order of the Kronecker constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KronOrder {
    /// `kron(C, Z) >= kron(C, L)`
    #[default]
    CoefficientFirst,
    /// `kron(Z, C) >= kron(L, C)`
    VariableFirst,
}

impl std::fmt::Display for KronOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KronOrder::CoefficientFirst => write!(f, "kron(C, Z)"),
            KronOrder::VariableFirst => write!(f, "kron(Z, C)"),
        }
    }
}

/// Uniform `[0, 1)` matrix rounded to `decimals` places.  Entries are
/// drawn in row major order.
pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R, shape: impl Into<Shape>, decimals: i32) -> Matrix<f64> {
    let shape = shape.into();
    let draws: Vec<f64> = (0..shape.len()).map(|_| rng.gen::<f64>()).collect();
    // lengths agree by construction
    let m = Matrix::from_row_major(shape, &draws).unwrap_or_else(|_| Matrix::zeros(shape));
    m.round_to(decimals)
}

/// A generated problem together with its inputs.
#[derive(Debug)]
pub struct RandomProblem {
    /// the decision variable
    pub z: Variable,
    /// the Kronecker coefficient, as a constant or a parameter
    pub c: Input,
    /// the known optimum of `z`
    pub l: Matrix<f64>,
    pub problem: Problem,
}

impl RandomProblem {
    /// [`random_problem`] with a fresh generator seeded by `seed`.
    pub fn from_seed(
        seed: u64,
        z_dims: impl Into<Shape>,
        c_dims: impl Into<Shape>,
        representation: Representation,
        order: KronOrder,
    ) -> Result<Self, KronError> {
        let mut rng = StdRng::seed_from_u64(seed);
        random_problem(z_dims, c_dims, representation, order, &mut rng)
    }

    /// The Kronecker constraint, always the first constraint of the problem.
    pub fn kron_constraint(&self) -> &crate::model::Constraint {
        &self.problem.constraints()[0]
    }

    /// Largest absolute difference between the solved `z` and `l`.
    pub fn solution_error(&self) -> Result<f64, KronError> {
        Ok(self.z.try_value()?.max_abs_diff(&self.l)?)
    }
}

/// Draws `C` (shape `c_dims`) and then `L` (shape `z_dims`) from `rng` and
/// assembles the problem, with `C` carried as `representation`.
pub fn random_problem<R: Rng + ?Sized>(
    z_dims: impl Into<Shape>,
    c_dims: impl Into<Shape>,
    representation: Representation,
    order: KronOrder,
    rng: &mut R,
) -> Result<RandomProblem, KronError> {
    let (z_dims, c_dims) = (z_dims.into(), c_dims.into());
    for shape in [z_dims, c_dims] {
        if shape.is_empty() {
            return Err(KronError::EmptyShape(shape));
        }
    }

    let c_value = random_matrix(rng, c_dims, DRAW_DECIMALS);
    let l = random_matrix(rng, z_dims, DRAW_DECIMALS);
    kron_problem(c_value, l, representation, order)
}

/// Assembles the problem for given values of `C` and `L`.
pub fn kron_problem(
    c_value: Matrix<f64>,
    l: Matrix<f64>,
    representation: Representation,
    order: KronOrder,
) -> Result<RandomProblem, KronError> {
    for shape in [c_value.shape(), l.shape()] {
        if shape.is_empty() {
            return Err(KronError::EmptyShape(shape));
        }
    }

    let c = Input::new(representation, "C", c_value)?;
    let z = Variable::named("Z", l.shape())?;

    let (lhs, rhs) = match order {
        KronOrder::CoefficientFirst => (kron(&c, &z), kron(&c, &l)),
        KronOrder::VariableFirst => (kron(&z, &c), kron(&l, &c)),
    };
    let constraints = vec![lhs.geq(rhs)?, Expr::from(&z).geq(0.0)?];
    let problem = Problem::new(Objective::Minimize(sum(&z)), constraints)?;

    Ok(RandomProblem { z, c, l, problem })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_matrix_rounding() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = random_matrix(&mut rng, (3, 4), 2);
        assert_eq!(m.shape(), Shape(3, 4));
        for &v in m.data() {
            assert!((0.0..=1.0).contains(&v));
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_problem_structure() {
        let rp = RandomProblem::from_seed(
            0,
            (2, 2),
            (1, 2),
            Representation::Parameter,
            KronOrder::CoefficientFirst,
        )
        .unwrap();

        assert_eq!(rp.c.representation(), Representation::Parameter);
        assert_eq!(rp.c.shape(), Shape(1, 2));
        assert_eq!(rp.z.shape(), Shape(2, 2));
        assert_eq!(rp.kron_constraint().shape(), Shape(2, 4));
        assert_eq!(rp.problem.constraints().len(), 2);
        assert!(rp.problem.is_dpp());
        assert!(matches!(
            rp.solution_error(),
            Err(KronError::VariableValueMissing(_))
        ));

        let rp = RandomProblem::from_seed(
            0,
            (2, 2),
            (1, 2),
            Representation::Constant,
            KronOrder::VariableFirst,
        )
        .unwrap();
        assert_eq!(rp.kron_constraint().shape(), Shape(2, 4));
        assert!(rp.c.as_parameter().is_none());
    }

    #[test]
    fn test_kron_problem_keeps_values() {
        let c_value = Matrix::from_row_major((2, 2), &[0., 0., 0.5, 0.3]).unwrap();
        let l = Matrix::from_row_major((1, 2), &[0.25, 0.75]).unwrap();
        let rp = kron_problem(
            c_value.clone(),
            l.clone(),
            Representation::Parameter,
            KronOrder::CoefficientFirst,
        )
        .unwrap();
        assert_eq!(rp.c.value().unwrap(), c_value);
        assert_eq!(rp.l, l);
        assert_eq!(rp.z.shape(), Shape(1, 2));
        assert_eq!(rp.kron_constraint().shape(), Shape(2, 4));
    }

    #[test]
    fn test_random_problem_empty_shape() {
        let mut rng = StdRng::seed_from_u64(0);
        let bad = random_problem(
            (0, 2),
            (1, 2),
            Representation::Constant,
            KronOrder::default(),
            &mut rng,
        );
        assert!(matches!(bad, Err(KronError::EmptyShape(Shape(0, 2)))));
    }
}
