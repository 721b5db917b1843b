use super::printer::{format_matrix, format_scalar, format_vector, indent_lines};
use super::{Comparison, RunSettings};
use crate::algebra::Matrix;
use crate::backend::{ProblemStatus, SolverStats};
use crate::canon::{DataSummary, ProblemData};
use crate::generator::{kron_problem, RandomProblem};
use crate::io::{HasPrintTarget, PrintTarget};
use crate::model::Representation;
use crate::KronError;
use std::io::Write;

/// width of the dashed banner lines
const BANNER_WIDTH: usize = 80;
/// spaces on either side of a banner title
const BANNER_MARGIN: usize = 35;

/// Everything observed during one inspection run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub settings: RunSettings,
    /// drawn value of the coefficient C
    pub c: Matrix<f64>,
    /// drawn target L, the known optimum
    pub l: Matrix<f64>,
    /// `None` when the run did not solve
    pub status: Option<ProblemStatus>,
    pub z: Option<Matrix<f64>>,
    /// largest entrywise distance between `z` and `l`
    pub solution_error: Option<f64>,
    /// largest violation of the Kronecker constraint at `z`
    pub max_violation: Option<f64>,
    pub stats: Option<SolverStats>,
    pub data: ProblemData,
    pub summary: DataSummary,
}

impl RunReport {
    pub fn representation(&self) -> Representation {
        self.settings.representation
    }
}

/// Runs inspection scenarios and prints what it finds.
#[derive(Debug, Default)]
pub struct Inspector {
    target: PrintTarget,
}

impl HasPrintTarget for Inspector {
    fn target_mut(&mut self) -> &mut PrintTarget {
        &mut self.target
    }
}

impl Inspector {
    /// An inspector printing to stdout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(target: PrintTarget) -> Self {
        Self { target }
    }

    /// An inspector collecting its output in memory.
    pub fn buffered() -> Self {
        Self::with_target(PrintTarget::Buffer(Vec::new()))
    }

    /// Prints `title` between two dashed lines.
    pub fn banner(&mut self, title: &str) -> Result<(), KronError> {
        let rule = "-".repeat(BANNER_WIDTH);
        let margin = " ".repeat(BANNER_MARGIN);
        writeln!(self.target, "{}", rule)?;
        writeln!(self.target, "{}{}{}", margin, title, margin)?;
        writeln!(self.target, "{}", rule)?;
        Ok(())
    }

    /// Builds the problem described by `settings`, optionally solves it,
    /// and prints the solution and the compiled problem data.
    ///
    /// A solve that fails or ends without an optimal solution is reported
    /// in the output and in the returned [`RunReport`], not as an error.
    pub fn run(&mut self, settings: &RunSettings) -> Result<RunReport, KronError> {
        settings.validate()?;
        let out = &mut self.target;

        writeln!(out, "\nContext for this run ...")?;
        writeln!(out, "\tshape of Variable  Z: {}", settings.z_dims)?;
        let c_desc = match settings.representation {
            Representation::Parameter => "Parameter",
            Representation::Constant => "Constant ",
        };
        writeln!(out, "\tshape of {} C: {}", c_desc, settings.c_dims)?;

        let mut rp = RandomProblem::from_seed(
            settings.seed,
            settings.z_dims,
            settings.c_dims,
            settings.representation,
            settings.kron_order,
        )?;
        if let Some(entries) = &settings.c_value {
            let c_value = Matrix::from_row_major(settings.c_dims, entries)?;
            rp = kron_problem(c_value, rp.l, settings.representation, settings.kron_order)?;
        }
        let c = rp
            .c
            .value()
            .ok_or_else(|| KronError::ParameterValueMissing("C".to_string()))?;

        let mut status = None;
        let mut z = None;
        let mut solution_error = None;
        let mut max_violation = None;
        let mut stats = None;

        if settings.solve {
            let outcome = rp.problem.solve(settings.backend, &settings.solver);
            writeln!(out, "\nSolving with {} ...", settings.backend)?;
            let solved = match outcome {
                Ok(s) => s,
                Err(e) => {
                    writeln!(out, "\tSolve failed: {}", e)?;
                    ProblemStatus::SolverError
                }
            };
            writeln!(out, "\tProblem status: {}", solved)?;
            writeln!(out, "\tZ.value = ...\n")?;

            z = rp.z.value();
            match &z {
                Some(value) => writeln!(out, "{}", indent_lines(&format_matrix(value), 2))?,
                None => writeln!(out, "{}", indent_lines("None", 2))?,
            }
            if z.is_some() {
                solution_error = Some(rp.solution_error()?);
                max_violation = Some(rp.kron_constraint().max_violation()?);
            }
            let violation = max_violation.map_or_else(|| "None".to_string(), format_scalar);
            writeln!(out, "\n\tConstraint violation: {}", violation)?;

            status = Some(solved);
            stats = rp.problem.solver_stats().copied();
        }

        writeln!(out, "\nExamining {} problem data ...", settings.backend)?;
        let data = rp
            .problem
            .get_problem_data(settings.backend, &settings.compile_options())?;
        writeln!(out, "\n\tThe matrix G in \"G x <= h\" is \n")?;
        writeln!(out, "{}", indent_lines(&format_matrix(&data.G_dense()), 2))?;
        writeln!(out, "\n\tThe vector h in \"G x <= h\" is \n")?;
        writeln!(out, "{}", indent_lines(&format_vector(&data.h), 2))?;

        let summary = data.summary();
        writeln!(out, "\n\t{} ({} parameters)", summary, data.handling)?;
        writeln!(out)?;
        out.flush()?;

        Ok(RunReport {
            settings: settings.clone(),
            c,
            l: rp.l.clone(),
            status,
            z,
            solution_error,
            max_violation,
            stats,
            data,
            summary,
        })
    }

    /// Runs `settings` with C as a constant and then as a parameter, and
    /// reports every disagreement between the two runs.
    pub fn compare(&mut self, settings: &RunSettings) -> Result<Comparison, KronError> {
        let constant = self.run(&settings.with_representation(Representation::Constant))?;
        let parameter = self.run(&settings.with_representation(Representation::Parameter))?;
        let comparison = Comparison::new(constant, parameter, settings.tolerance);

        let out = &mut self.target;
        writeln!(
            out,
            "Comparing representations of C {} with Z {} ...",
            settings.c_dims, settings.z_dims
        )?;
        if comparison.is_consistent() {
            writeln!(out, "\tconsistent")?;
        }
        for defect in comparison.defects() {
            writeln!(out, "\tDEFECT: {}", defect)?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(comparison)
    }
}

/// Compares the two representations of `settings` without printing.
pub fn compare_representations(settings: &RunSettings) -> Result<Comparison, KronError> {
    Inspector::buffered().compare(settings)
}
