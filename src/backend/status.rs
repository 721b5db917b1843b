use clarabel::solver::SolverStatus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a solve, as reported by a [`Problem`](crate::model::Problem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProblemStatus {
    /// no solve attempted yet
    #[default]
    Unsolved,
    Optimal,
    OptimalInaccurate,
    Infeasible,
    InfeasibleInaccurate,
    Unbounded,
    UnboundedInaccurate,
    /// iteration or time limit reached
    UserLimit,
    SolverError,
}

impl ProblemStatus {
    /// exactly `Optimal`
    pub fn is_optimal(&self) -> bool {
        matches!(self, ProblemStatus::Optimal)
    }

    /// true if the solver returned a primal point worth reporting
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            ProblemStatus::Optimal | ProblemStatus::OptimalInaccurate
        )
    }
}

impl std::fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProblemStatus::Unsolved => "unsolved",
            ProblemStatus::Optimal => "optimal",
            ProblemStatus::OptimalInaccurate => "optimal_inaccurate",
            ProblemStatus::Infeasible => "infeasible",
            ProblemStatus::InfeasibleInaccurate => "infeasible_inaccurate",
            ProblemStatus::Unbounded => "unbounded",
            ProblemStatus::UnboundedInaccurate => "unbounded_inaccurate",
            ProblemStatus::UserLimit => "user_limit",
            ProblemStatus::SolverError => "solver_error",
        };
        write!(f, "{}", s)
    }
}

impl From<SolverStatus> for ProblemStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Unsolved => ProblemStatus::Unsolved,
            SolverStatus::Solved => ProblemStatus::Optimal,
            SolverStatus::AlmostSolved => ProblemStatus::OptimalInaccurate,
            SolverStatus::PrimalInfeasible => ProblemStatus::Infeasible,
            SolverStatus::AlmostPrimalInfeasible => ProblemStatus::InfeasibleInaccurate,
            SolverStatus::DualInfeasible => ProblemStatus::Unbounded,
            SolverStatus::AlmostDualInfeasible => ProblemStatus::UnboundedInaccurate,
            SolverStatus::MaxIterations | SolverStatus::MaxTime => ProblemStatus::UserLimit,
            #[allow(unreachable_patterns)]
            _ => ProblemStatus::SolverError,
        }
    }
}

#[test]
fn test_status_mapping() {
    assert_eq!(ProblemStatus::from(SolverStatus::Solved), ProblemStatus::Optimal);
    assert_eq!(ProblemStatus::from(SolverStatus::MaxTime), ProblemStatus::UserLimit);
    assert_eq!(
        ProblemStatus::from(SolverStatus::NumericalError),
        ProblemStatus::SolverError
    );
    assert_eq!(ProblemStatus::OptimalInaccurate.to_string(), "optimal_inaccurate");
    assert!(ProblemStatus::OptimalInaccurate.has_solution());
    assert!(!ProblemStatus::OptimalInaccurate.is_optimal());
    assert!(!ProblemStatus::Infeasible.has_solution());
}
