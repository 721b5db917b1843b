//! __kroncanon__ builds small optimization problems with a known optimum,
//! compiles them to solver ready form, solves them with the
//! [Clarabel](https://github.com/oxfordcontrol/Clarabel.rs) interior point
//! solver, and prints the compiled data for inspection.
//!
//! The test problem is
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \mathbf{1}^T \mathrm{vec}(Z) \\\\\[2ex\]
//!  \text{subject to} & C \otimes Z \ge C \otimes L \\\\\[1ex\]
//!         & Z \ge 0
//!  \end{array}
//! $$
//!
//! with $C$ and $L$ nonnegative random matrices, so that the optimum is
//! $Z = L$.  The coefficient $C$ can enter the model either as a fixed
//! constant or as a parameter whose value is bound before solving.  The
//! two choices compile through different paths and must nevertheless give
//! the same solution and, up to explicitly stored zeros, the same matrices
//! $G$ and $h$ of the compiled inequality form $G x \le h$.
//!
//! # Crate layout
//!
//! * [`model`]: variables, parameters, expressions and problems
//! * [`canon`]: canonicalization to $G x \le h$, with parameters kept
//!   symbolic or substituted
//! * [`backend`]: solving compiled data with a named numeric solver
//! * [`generator`]: seeded random problems
//! * [`inspect`]: runs that solve, print and compare both representations
//!
//! ```no_run
//! use kroncanon::inspect::{Inspector, RunSettings};
//!
//! let mut inspector = Inspector::new();
//! let report = inspector.run(&RunSettings::default())?;
//! assert!(report.solution_error.unwrap() < 1e-4);
//! # Ok::<(), kroncanon::KronError>(())
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// crate version string
pub fn version() -> &'static str {
    VERSION
}

pub mod algebra;
pub mod backend;
pub mod canon;
pub mod generator;
pub mod inspect;
pub mod io;
pub mod model;

mod error;
pub use error::*;
