//! Named numeric solver backends.
//!
//! Compiled [`ProblemData`] `minimize c'x  s.t.  G x <= h` is passed to the
//! solver in its standard form `minimize ½x'Px + q'x  s.t.  Ax + s = b`,
//! `s ≥ 0` with `P = 0`, `q = c`, `A = G`, `b = h` and a single nonnegative
//! cone over all rows.

#![allow(non_snake_case)]

mod settings;
mod status;

pub use settings::*;
pub use status::*;

use crate::algebra::{CscInspect, CscMatrix};
use crate::canon::ProblemData;
use crate::KronError;
use clarabel::solver::{DefaultSolver, IPSolver, NonnegativeConeT};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric solver used to solve compiled problem data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Backend {
    /// the clarabel interior point solver
    #[default]
    Clarabel,
}

impl FromStr for Backend {
    type Err = KronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clarabel" => Ok(Backend::Clarabel),
            _ => Err(KronError::UnknownSolver(s.to_string())),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Clarabel => write!(f, "CLARABEL"),
        }
    }
}

/// Iteration count and timing of a backend solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverStats {
    pub iterations: u32,
    /// seconds
    pub solve_time: f64,
}

/// Raw result of a backend solve over the solver vector `x`.
#[derive(Debug, Clone)]
pub struct BackendSolution {
    pub status: ProblemStatus,
    pub x: Vec<f64>,
    /// `c'x`, excluding the constant objective offset
    pub obj_val: f64,
    pub stats: SolverStats,
}

impl Backend {
    /// Checks that `data` has consistent dimensions for this backend.
    pub fn check_data(&self, data: &ProblemData) -> Result<(), KronError> {
        let (m, n): (usize, usize) = data.G.dims().into();
        if data.h.len() != m || data.dims.nonneg != m {
            return Err(KronError::SolverSetup(format!(
                "G has {} rows but h has length {} and the cone has dimension {}",
                m,
                data.h.len(),
                data.dims.nonneg
            )));
        }
        if data.c.len() != n {
            return Err(KronError::SolverSetup(format!(
                "G has {} columns but c has length {}",
                n,
                data.c.len()
            )));
        }
        if data.G.colptr.len() != n + 1 || data.G.rowval.len() != data.G.nzval.len() {
            return Err(KronError::SolverSetup("malformed CSC matrix G".to_string()));
        }
        Ok(())
    }

    pub fn solve(
        &self,
        data: &ProblemData,
        settings: &SolveSettings,
    ) -> Result<BackendSolution, KronError> {
        self.check_data(data)?;
        match self {
            Backend::Clarabel => solve_clarabel(data, settings),
        }
    }
}

// accepts both the infallible and the fallible solver constructor
trait IntoSolver {
    fn into_solver(self) -> Result<DefaultSolver<f64>, KronError>;
}

impl IntoSolver for DefaultSolver<f64> {
    fn into_solver(self) -> Result<DefaultSolver<f64>, KronError> {
        Ok(self)
    }
}

impl<E: std::fmt::Debug> IntoSolver for Result<DefaultSolver<f64>, E> {
    fn into_solver(self) -> Result<DefaultSolver<f64>, KronError> {
        self.map_err(|e| KronError::SolverSetup(format!("{:?}", e)))
    }
}

fn solve_clarabel(data: &ProblemData, settings: &SolveSettings) -> Result<BackendSolution, KronError> {
    let n = data.c.len();
    let P = CscMatrix::<f64>::new(n, n, vec![0; n + 1], vec![], vec![]);
    let cones = [NonnegativeConeT(data.dims.nonneg)];
    let settings = settings.to_clarabel()?;

    let mut solver = DefaultSolver::new(&P, &data.c, &data.G, &data.h, &cones, settings).into_solver()?;
    solver.solve();

    let solution = &solver.solution;
    Ok(BackendSolution {
        status: solution.status.into(),
        x: solution.x.clone(),
        obj_val: solution.obj_val,
        stats: SolverStats {
            iterations: solution.iterations,
            solve_time: solution.solve_time,
        },
    })
}

#[test]
fn test_backend_from_str() {
    assert_eq!("clarabel".parse::<Backend>().unwrap(), Backend::Clarabel);
    assert_eq!("CLARABEL".parse::<Backend>().unwrap(), Backend::Clarabel);
    assert!(matches!(
        "ECOS".parse::<Backend>(),
        Err(KronError::UnknownSolver(name)) if name == "ECOS"
    ));
    assert_eq!(Backend::default().to_string(), "CLARABEL");
}
