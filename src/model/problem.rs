use super::{Constraint, Expr, Parameter, Variable};
use crate::algebra::Shape;
use crate::backend::{Backend, ProblemStatus, SolveSettings, SolverStats};
use crate::canon::{self, CompileOptions, ParametricProblem, ProblemData};
use crate::KronError;

/// Optimization sense and objective expression.
#[derive(Debug, Clone)]
pub enum Objective {
    Minimize(Expr),
    Maximize(Expr),
}

impl Objective {
    pub fn expr(&self) -> &Expr {
        match self {
            Objective::Minimize(e) | Objective::Maximize(e) => e,
        }
    }

    pub fn is_minimize(&self) -> bool {
        matches!(self, Objective::Minimize(_))
    }
}

/// An optimization problem with a scalar affine objective and elementwise
/// inequality constraints.
#[derive(Debug)]
pub struct Problem {
    objective: Objective,
    constraints: Vec<Constraint>,
    status: ProblemStatus,
    value: Option<f64>,
    stats: Option<SolverStats>,
}

impl Problem {
    pub fn new(objective: Objective, constraints: Vec<Constraint>) -> Result<Self, KronError> {
        let shape = objective.expr().shape()?;
        if shape != Shape::SCALAR {
            return Err(KronError::NonScalarObjective(shape));
        }
        Ok(Self {
            objective,
            constraints,
            status: ProblemStatus::Unsolved,
            value: None,
            stats: None,
        })
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// status of the most recent solve
    pub fn status(&self) -> ProblemStatus {
        self.status
    }

    /// optimal objective value of the most recent solve
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn solver_stats(&self) -> Option<&SolverStats> {
        self.stats.as_ref()
    }

    fn exprs(&self) -> impl Iterator<Item = &Expr> {
        std::iter::once(self.objective.expr())
            .chain(self.constraints.iter().flat_map(|c| [c.lhs(), c.rhs()]))
    }

    /// Variables in order of first appearance, objective first.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        for v in self.exprs().flat_map(|e| e.variables()) {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        let mut params: Vec<Parameter> = Vec::new();
        for p in self.exprs().flat_map(|e| e.parameters()) {
            if !params.contains(&p) {
                params.push(p);
            }
        }
        params
    }

    pub fn is_affine(&self) -> bool {
        self.exprs().all(|e| e.is_affine())
    }

    pub fn is_dpp(&self) -> bool {
        self.exprs().all(|e| e.is_dpp())
    }

    /// Canonicalizes the problem into `G x <= h` form, keeping parameters
    /// symbolic when `options` allow it.
    pub fn compile(&self, options: &CompileOptions) -> Result<ParametricProblem, KronError> {
        canon::compile(self, options)
    }

    /// Numeric data in the form consumed by `backend`, using the current
    /// parameter values.
    pub fn get_problem_data(
        &self,
        backend: Backend,
        options: &CompileOptions,
    ) -> Result<ProblemData, KronError> {
        let data = self.compile(options)?.apply_parameters()?;
        backend.check_data(&data)?;
        Ok(data)
    }

    /// Solves the problem with `backend` and writes the optimal values back
    /// into the problem variables.
    ///
    /// A solve that terminates without a solution is not an error: the
    /// returned status reports the outcome and the variables are cleared.
    pub fn solve(
        &mut self,
        backend: Backend,
        settings: &SolveSettings,
    ) -> Result<ProblemStatus, KronError> {
        let data = self.get_problem_data(backend, &CompileOptions::default())?;
        let solution = backend.solve(&data, settings)?;

        let has_solution = solution.status.has_solution();
        let values = data.var_map.unpack(&solution.x)?;
        for var in self.variables() {
            let value = values
                .iter()
                .find(|(id, _)| *id == var.id())
                .map(|(_, m)| m.clone());
            var.set_value(value.filter(|_| has_solution));
        }

        self.value = has_solution.then(|| {
            let v = solution.obj_val + data.offset;
            if self.objective.is_minimize() {
                v
            } else {
                -v
            }
        });
        self.status = solution.status;
        self.stats = Some(solution.stats);
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Matrix;
    use crate::model::sum;

    #[test]
    fn test_problem_requires_scalar_objective() {
        let z = Variable::new((2, 2)).unwrap();
        let bad = Problem::new(Objective::Minimize(Expr::from(&z)), vec![]);
        assert!(matches!(bad, Err(KronError::NonScalarObjective(Shape(2, 2)))));
    }

    #[test]
    fn test_problem_leaves() {
        let z = Variable::named("Z", (1, 2)).unwrap();
        let y = Variable::named("Y", (1, 1)).unwrap();
        let p = Parameter::with_value("p", Matrix::scalar(2.0)).unwrap();
        let cons = vec![
            Expr::from(&y).geq(0.0).unwrap(),
            (Expr::from(&z).kron(&p)).geq(1.0).unwrap(),
        ];
        let prob = Problem::new(Objective::Minimize(sum(&z)), cons).unwrap();

        let vars = prob.variables();
        assert_eq!(vars, vec![z, y]);
        assert_eq!(prob.parameters(), vec![p]);
        assert!(prob.is_dpp());
        assert_eq!(prob.status(), ProblemStatus::Unsolved);
        assert!(prob.value().is_none());
    }
}
