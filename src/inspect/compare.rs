use super::RunReport;
use crate::algebra::{CscInspect, Shape};
use crate::backend::ProblemStatus;
use crate::model::Representation;
use itertools::izip;

/// A disagreement between runs that differ only in how C is represented,
/// or between a run and the known optimum.
#[derive(Debug, Clone, PartialEq)]
pub enum Defect {
    /// the solve did not end with an optimal status
    NotOptimal {
        representation: Representation,
        status: ProblemStatus,
    },
    /// the solved Z is not the known optimum L
    WrongSolution {
        representation: Representation,
        max_error: f64,
    },
    /// the solved Z violates the Kronecker constraint
    ConstraintViolated {
        representation: Representation,
        violation: f64,
    },
    StatusMismatch {
        constant: ProblemStatus,
        parameter: ProblemStatus,
    },
    SolutionMismatch {
        max_difference: f64,
    },
    /// G or h have different dimensions
    RowCountMismatch {
        constant: Shape,
        parameter: Shape,
    },
    /// the entries of G that are actually nonzero differ in position
    PatternMismatch {
        constant_nnz: usize,
        parameter_nnz: usize,
    },
    /// G or h differ numerically
    DataMismatch {
        max_difference: f64,
    },
}

impl std::fmt::Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defect::NotOptimal {
                representation,
                status,
            } => write!(f, "{} run ended with status {}", representation, status),
            Defect::WrongSolution {
                representation,
                max_error,
            } => write!(
                f,
                "{} run solution differs from L by {:e}",
                representation, max_error
            ),
            Defect::ConstraintViolated {
                representation,
                violation,
            } => write!(
                f,
                "{} run violates the Kronecker constraint by {:e}",
                representation, violation
            ),
            Defect::StatusMismatch {
                constant,
                parameter,
            } => write!(f, "status {} with Constant but {} with Parameter", constant, parameter),
            Defect::SolutionMismatch { max_difference } => {
                write!(f, "solutions differ by {:e}", max_difference)
            }
            Defect::RowCountMismatch {
                constant,
                parameter,
            } => write!(f, "G is {} with Constant but {} with Parameter", constant, parameter),
            Defect::PatternMismatch {
                constant_nnz,
                parameter_nnz,
            } => write!(
                f,
                "G has {} nonzeros with Constant but {} with Parameter, in different positions",
                constant_nnz, parameter_nnz
            ),
            Defect::DataMismatch { max_difference } => {
                write!(f, "G or h differ by {:e}", max_difference)
            }
        }
    }
}

/// Result of running one configuration under both representations of C.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub constant: RunReport,
    pub parameter: RunReport,
    defects: Vec<Defect>,
}

impl Comparison {
    pub fn new(constant: RunReport, parameter: RunReport, tolerance: f64) -> Self {
        let defects = Self::assess(&constant, &parameter, tolerance);
        Self {
            constant,
            parameter,
            defects,
        }
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn is_consistent(&self) -> bool {
        self.defects.is_empty()
    }

    /// Every defect found in a pair of run reports.
    ///
    /// Explicit zeros stored in G are discounted: they are the only
    /// difference the choice of representation is allowed to make.
    pub fn assess(constant: &RunReport, parameter: &RunReport, tolerance: f64) -> Vec<Defect> {
        let mut defects = Vec::new();

        for report in [constant, parameter] {
            let representation = report.representation();
            if let Some(status) = report.status {
                if !status.is_optimal() {
                    defects.push(Defect::NotOptimal {
                        representation,
                        status,
                    });
                }
            }
            if let Some(max_error) = report.solution_error.filter(|&e| e > tolerance) {
                defects.push(Defect::WrongSolution {
                    representation,
                    max_error,
                });
            }
            if let Some(violation) = report.max_violation.filter(|&v| v > tolerance) {
                defects.push(Defect::ConstraintViolated {
                    representation,
                    violation,
                });
            }
        }

        if let (Some(c), Some(p)) = (constant.status, parameter.status) {
            if c != p {
                defects.push(Defect::StatusMismatch {
                    constant: c,
                    parameter: p,
                });
            }
        }

        if let (Some(zc), Some(zp)) = (&constant.z, &parameter.z) {
            // same shapes, both drawn from the same settings
            let max_difference = zc.max_abs_diff(zp).unwrap_or(f64::INFINITY);
            if max_difference > tolerance {
                defects.push(Defect::SolutionMismatch { max_difference });
            }
        }

        let (gc, gp) = (&constant.data.G, &parameter.data.G);
        if gc.dims() != gp.dims() || constant.data.h.len() != parameter.data.h.len() {
            defects.push(Defect::RowCountMismatch {
                constant: gc.dims(),
                parameter: gp.dims(),
            });
            return defects;
        }

        let (pattern_c, pattern_p) = (gc.nonzero_pattern(), gp.nonzero_pattern());
        if pattern_c != pattern_p {
            defects.push(Defect::PatternMismatch {
                constant_nnz: pattern_c.len(),
                parameter_nnz: pattern_p.len(),
            });
        }

        let g_diff = gc.max_entry_diff(gp).unwrap_or(f64::INFINITY);
        let h_diff = izip!(&constant.data.h, &parameter.data.h)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        let max_difference = g_diff.max(h_diff);
        if max_difference > tolerance {
            defects.push(Defect::DataMismatch { max_difference });
        }

        defects
    }
}
