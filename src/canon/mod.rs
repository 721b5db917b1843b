//! Canonicalization of [`Problem`](crate::model::Problem)s into the
//! inequality form `G x <= h` consumed by the numeric solver.
//!
//! Every entry of a compiled expression is stored as an affine function of
//! the solver variable `x` whose coefficients are themselves affine in the
//! parameter entries.  When a problem follows DPP rules, parameters stay
//! symbolic and the resulting [`ParametricProblem`] can be re-instantiated
//! for new parameter values without recompiling.  Otherwise the current
//! parameter values are substituted as constants during compilation.
//!
//! The two modes can differ in the stored sparsity of `G`: symbolic
//! compilation keeps an entry for every coefficient that depends on a
//! parameter, even where the current value of that parameter is zero,
//! while substitution drops exact zeros.

mod affine;
mod canonicalizer;
mod data;
mod options;

#[cfg(feature = "serde")]
mod json;

pub use affine::*;
pub use canonicalizer::compile;
pub use data::*;
pub use options::*;
