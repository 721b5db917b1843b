//! Symbolic modeling layer.
//!
//! Problems are assembled from [`Variable`]s, [`Parameter`]s and constant
//! matrices combined into [`Expr`] trees.  A [`Problem`] minimizes a scalar
//! objective subject to elementwise inequality [`Constraint`]s, and is
//! compiled by [`canon`](crate::canon) into solver ready data.
//!
//! ```
//! use kroncanon::algebra::Matrix;
//! use kroncanon::model::*;
//!
//! let C = Parameter::with_value("C", Matrix::from_row_major((1, 2), &[0.5, 2.0])?)?;
//! let L = Matrix::from_row_major((2, 2), &[0.1, 0.2, 0.3, 0.4])?;
//! let Z = Variable::named("Z", (2, 2))?;
//!
//! let constraints = vec![kron(&C, &Z).geq(kron(&C, &L))?, Expr::from(&Z).geq(0.0)?];
//! let problem = Problem::new(Objective::Minimize(sum(&Z)), constraints)?;
//! assert!(problem.is_dpp());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod constraint;
mod expr;
mod input;
mod leaf;
mod problem;

pub use constraint::*;
pub use expr::*;
pub use input::*;
pub use leaf::*;
pub use problem::*;
