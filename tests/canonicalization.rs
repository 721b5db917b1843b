#![allow(non_snake_case)]

use kroncanon::algebra::{CscInspect, Matrix};
use kroncanon::backend::{Backend, ProblemStatus, SolveSettings};
use kroncanon::canon::*;
use kroncanon::model::*;
use kroncanon::KronError;

fn row_major(shape: (usize, usize), data: &[f64]) -> Matrix<f64> {
    Matrix::from_row_major(shape, data).unwrap()
}

// min sum(Z)  s.t.  kron(C, Z) >= kron(C, L),  Z >= 0
fn kron_problem(C: impl Into<Expr> + Clone, Z: &Variable, L: &Matrix<f64>) -> Problem {
    let constraints = vec![
        kron(C.clone(), Z).geq(kron(C, L)).unwrap(),
        Expr::from(Z).geq(0.0).unwrap(),
    ];
    Problem::new(Objective::Minimize(sum(Z)), constraints).unwrap()
}

#[test]
fn test_inequality_rows() {
    // x >= [1 2]' compiles to -x <= -[1 2]'
    let x = Variable::named("x", (2, 1)).unwrap();
    let lower = row_major((2, 1), &[1., 2.]);
    let prob = Problem::new(
        Objective::Minimize(sum(&x)),
        vec![Expr::from(&x).geq(&lower).unwrap()],
    )
    .unwrap();

    let data = prob.get_problem_data(Backend::Clarabel, &CompileOptions::default()).unwrap();
    assert_eq!(data.c, vec![1., 1.]);
    assert_eq!(data.offset, 0.);
    assert_eq!(data.G_dense().rows(), vec![vec![-1., 0.], vec![0., -1.]]);
    assert_eq!(data.h, vec![-1., -2.]);
    assert_eq!(data.dims.nonneg, 2);
    assert_eq!(data.handling, ParamHandling::Symbolic);
}

#[test]
fn test_kron_rows_column_major() {
    // kron([2 3], z) for a 1 x 1 variable z gives the two rows 2z and 3z
    let z = Variable::named("z", (1, 1)).unwrap();
    let C = row_major((1, 2), &[2., 3.]);
    let prob = Problem::new(
        Objective::Minimize(sum(&z)),
        vec![kron(&C, &z).geq(kron(&C, 1.0)).unwrap()],
    )
    .unwrap();
    let data = prob.get_problem_data(Backend::Clarabel, &CompileOptions::default()).unwrap();
    assert_eq!(data.G_dense().rows(), vec![vec![-2.], vec![-3.]]);
    assert_eq!(data.h, vec![-2., -3.]);

    // 2 x 2 variable, scalar coefficient: rows follow the column major
    // order of Z, i.e. Z[0,0], Z[1,0], Z[0,1], Z[1,1]
    let Z = Variable::named("Z", (2, 2)).unwrap();
    let L = row_major((2, 2), &[1., 2., 3., 4.]);
    let prob = kron_problem(Expr::from(2.0), &Z, &L);
    let data = prob.get_problem_data(Backend::Clarabel, &CompileOptions::default()).unwrap();
    assert_eq!(&data.h[..4], &[-2., -6., -4., -8.]);
    assert_eq!(data.var_map.n, 4);
    assert_eq!(data.var_map.slots[0].name, "Z");
}

#[test]
fn test_parametric_problem_reinstantiation() {
    let Z = Variable::named("Z", (2, 2)).unwrap();
    let L = row_major((2, 2), &[0.1, 0.2, 0.3, 0.4]);
    let C = Parameter::with_value("C", row_major((1, 2), &[0.5, 2.0])).unwrap();
    let prob = kron_problem(Expr::from(&C), &Z, &L);

    let compiled = prob.compile(&CompileOptions::default()).unwrap();
    assert_eq!(compiled.handling(), ParamHandling::Symbolic);
    assert_eq!(compiled.parameters().len(), 1);
    assert_eq!(compiled.constraint_rows(), 12);

    // change the value after compiling, then instantiate again
    C.set_value(row_major((1, 2), &[0.25, 0.0])).unwrap();
    let data = compiled.apply_parameters().unwrap();

    let ignore = CompileOptionsBuilder::default().ignore_dpp(true).build().unwrap();
    let fresh = prob.compile(&ignore).unwrap();
    assert_eq!(fresh.handling(), ParamHandling::Substituted);
    let fresh = fresh.apply_parameters().unwrap();

    assert_eq!(data.G.max_entry_diff(&fresh.G).unwrap(), 0.0);
    assert_eq!(data.h, fresh.h);

    // the zero coefficient stays stored in the symbolic compile only
    assert_eq!(data.summary().explicit_zeros, 4);
    assert_eq!(fresh.summary().explicit_zeros, 0);
    assert_eq!(data.G.nonzero_pattern(), fresh.G.nonzero_pattern());
    assert_eq!(data.summary().nnz, fresh.summary().nnz + 4);
    assert_eq!(compiled.nnz_structural(), data.summary().nnz);

    // explicit values override the current ones
    let mut values = ParamValues::default();
    values.insert(&C, row_major((1, 2), &[1.0, 1.0])).unwrap();
    let ones = compiled.apply_values(&values).unwrap();
    assert_eq!(ones.G.explicit_zeros(), 0);
    assert_eq!(&ones.h[..4], &[-0.1, -0.3, -0.2, -0.4]);
}

#[test]
fn test_unset_parameter() {
    let Z = Variable::named("Z", (1, 1)).unwrap();
    let C = Parameter::named("C", (1, 2)).unwrap();
    let prob = kron_problem(Expr::from(&C), &Z, &row_major((1, 1), &[1.0]));

    let compiled = prob.compile(&CompileOptions::default()).unwrap();
    assert!(matches!(
        compiled.apply_parameters(),
        Err(KronError::ParameterValueMissing(name)) if name == "C"
    ));
    assert!(matches!(
        compiled.apply_values(&ParamValues::default()),
        Err(KronError::ParameterValueMissing(name)) if name == "C"
    ));

    let ignore = CompileOptionsBuilder::default().ignore_dpp(true).build().unwrap();
    assert!(matches!(
        prob.compile(&ignore),
        Err(KronError::ParameterValueMissing(name)) if name == "C"
    ));
}

#[test]
fn test_non_dpp_problem() {
    // kron(D, C) multiplies two parameters
    let Z = Variable::named("Z", (1, 2)).unwrap();
    let D = Parameter::with_value("D", Matrix::scalar(2.0)).unwrap();
    let C = Parameter::with_value("C", row_major((1, 2), &[0.5, 1.0])).unwrap();
    let L = row_major((1, 2), &[0.3, 0.7]);
    let mut prob = kron_problem(kron(&D, &C), &Z, &L);
    assert!(prob.is_affine());
    assert!(!prob.is_dpp());

    let enforce = CompileOptionsBuilder::default().enforce_dpp(true).build().unwrap();
    assert!(matches!(prob.compile(&enforce), Err(KronError::NotDpp)));
    assert!(matches!(
        prob.get_problem_data(Backend::Clarabel, &enforce),
        Err(KronError::NotDpp)
    ));

    // without enforcement the values are substituted
    let compiled = prob.compile(&CompileOptions::default()).unwrap();
    assert_eq!(compiled.handling(), ParamHandling::Substituted);
    assert!(compiled.parameters().is_empty());

    let status = prob.solve(Backend::Clarabel, &SolveSettings::default()).unwrap();
    assert_eq!(status, ProblemStatus::Optimal);
    let error = Z.value().unwrap().max_abs_diff(&L).unwrap();
    assert!(error < 1e-4);
}

#[test]
fn test_non_affine_problem() {
    let Z = Variable::named("Z", (1, 2)).unwrap();
    let Y = Variable::named("Y", (1, 1)).unwrap();
    let prob = Problem::new(
        Objective::Minimize(sum(&Z)),
        vec![kron(&Y, &Z).geq(0.0).unwrap()],
    )
    .unwrap();
    assert!(!prob.is_affine());
    assert!(matches!(
        prob.compile(&CompileOptions::default()),
        Err(KronError::NotAffine(_))
    ));
}

#[test]
fn test_maximize_and_offset() {
    // max 3 - sum(x)  s.t.  x >= [1 2]
    let x = Variable::named("x", (1, 2)).unwrap();
    let objective = -sum(&x) + 3.0;
    let mut prob = Problem::new(
        Objective::Maximize(objective),
        vec![Expr::from(&x).geq(row_major((1, 2), &[1., 2.])).unwrap()],
    )
    .unwrap();

    let data = prob.get_problem_data(Backend::Clarabel, &CompileOptions::default()).unwrap();
    assert_eq!(data.c, vec![1., 1.]);
    assert_eq!(data.offset, -3.);

    let status = prob.solve(Backend::Clarabel, &SolveSettings::default()).unwrap();
    assert!(status.is_optimal());
    assert!(prob.value().unwrap().abs() < 1e-5);
    assert!(prob.solver_stats().unwrap().iterations > 0);
}

#[test]
fn test_infeasible_problem_clears_values() {
    let x = Variable::named("x", (1, 1)).unwrap();
    let mut prob = Problem::new(
        Objective::Minimize(sum(&x)),
        vec![
            Expr::from(&x).geq(1.0).unwrap(),
            Expr::from(&x).leq(-1.0).unwrap(),
        ],
    )
    .unwrap();

    let status = prob.solve(Backend::Clarabel, &SolveSettings::default()).unwrap();
    assert!(matches!(
        status,
        ProblemStatus::Infeasible | ProblemStatus::InfeasibleInaccurate
    ));
    assert!(x.value().is_none());
    assert!(prob.value().is_none());
}
