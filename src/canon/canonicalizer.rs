#![allow(non_snake_case)]

use super::affine::{AffineExpr, ParamCoeff};
use super::{CompileOptions, ParamHandling, ParametricProblem, VariableMap};
use crate::algebra::{Shape, TripletAssembler};
use crate::model::{Expr, Problem, Variable};
use crate::KronError;
use itertools::izip;

/// Recursive translation of expression trees into [`AffineExpr`]s.
pub(crate) struct Canonicalizer {
    handling: ParamHandling,
    var_map: VariableMap,
}

impl Canonicalizer {
    pub(crate) fn new(handling: ParamHandling) -> Self {
        Self {
            handling,
            var_map: VariableMap::default(),
        }
    }

    /// Reserves solver columns for `var` if not already present.
    pub(crate) fn register(&mut self, var: &Variable) -> usize {
        match self.var_map.offset_of(var.id()) {
            Some(offset) => offset,
            None => self.var_map.push(var.id(), var.name(), var.shape()),
        }
    }

    pub(crate) fn canonicalize(&mut self, expr: &Expr) -> Result<AffineExpr, KronError> {
        match expr {
            Expr::Variable(v) => {
                let offset = self.register(v);
                Ok(AffineExpr::variable(v.shape(), offset))
            }
            Expr::Constant(m) => Ok(AffineExpr::constant(m)),
            Expr::Parameter(p) => match self.handling {
                ParamHandling::Symbolic => Ok(AffineExpr::parameter(p)),
                ParamHandling::Substituted => Ok(AffineExpr::constant(&p.try_value()?)),
            },
            Expr::Neg(a) => Ok(self.canonicalize(a)?.neg()),
            Expr::Add(a, b) => {
                let a = self.canonicalize(a)?;
                let b = self.canonicalize(b)?;
                a.add(&b)
            }
            Expr::Kron(a, b) => {
                let a = self.canonicalize(a)?;
                let b = self.canonicalize(b)?;
                a.kron(&b)
            }
            Expr::Sum(a) => Ok(self.canonicalize(a)?.sum()),
        }
    }

    pub(crate) fn into_var_map(self) -> VariableMap {
        self.var_map
    }
}

/// Compiles `problem` into `minimize c'x + offset  s.t.  G x <= h`.
///
/// Each constraint `lhs >= rhs` contributes the rows `(rhs - lhs) <= 0`,
/// one row per entry in column major order, with constraints stacked in
/// declaration order.  A maximization is compiled as the minimization of
/// the negated objective.
pub fn compile(problem: &Problem, options: &CompileOptions) -> Result<ParametricProblem, KronError> {
    if !problem.is_affine() {
        return Err(KronError::NotAffine("product of two variable expressions"));
    }
    let handling = options.handling_for(problem.is_dpp())?;

    let mut canon = Canonicalizer::new(handling);
    for var in problem.variables() {
        canon.register(&var);
    }

    let objective = canon.canonicalize(problem.objective().expr())?;
    let objective = if problem.objective().is_minimize() {
        objective
    } else {
        objective.neg()
    };

    let mut rows: Vec<(usize, usize, ParamCoeff)> = Vec::new();
    let mut h: Vec<ParamCoeff> = Vec::new();
    for constraint in problem.constraints() {
        let lhs = canon.canonicalize(constraint.lhs())?;
        let rhs = canon.canonicalize(constraint.rhs())?;
        let diff = rhs.sub(&lhs)?;

        let row0 = h.len();
        for (k, offset, coeffs) in izip!(0.., diff.offset(), diff.coeffs()) {
            h.push(offset.neg());
            for (&col, a) in coeffs {
                rows.push((row0 + k, col, a.clone()));
            }
        }
    }

    let var_map = canon.into_var_map();
    let n = var_map.n;

    let mut c = vec![ParamCoeff::default(); n];
    for (&col, a) in &objective.coeffs()[0] {
        c[col] = a.clone();
    }

    let mut G = TripletAssembler::new(Shape(h.len(), n));
    for (row, col, a) in rows {
        G.push(row, col, a)?;
    }

    let parameters = match handling {
        ParamHandling::Symbolic => problem.parameters(),
        ParamHandling::Substituted => Vec::new(),
    };

    Ok(ParametricProblem {
        c,
        offset: objective.offset()[0].clone(),
        G,
        h,
        var_map,
        parameters,
        handling,
    })
}
