use super::{Constraint, Parameter, Variable};
use crate::algebra::{Matrix, Shape};
use crate::KronError;

/// Symbolic matrix expression.
#[derive(Debug, Clone)]
pub enum Expr {
    Variable(Variable),
    Constant(Matrix<f64>),
    Parameter(Parameter),
    Neg(Box<Expr>),
    /// elementwise sum, with scalar broadcasting
    Add(Box<Expr>, Box<Expr>),
    Kron(Box<Expr>, Box<Expr>),
    /// sum of all entries
    Sum(Box<Expr>),
}

/// Kronecker product `kron(a, b)`
pub fn kron(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::Kron(Box::new(a.into()), Box::new(b.into()))
}

/// Sum of all entries of `a`
pub fn sum(a: impl Into<Expr>) -> Expr {
    Expr::Sum(Box::new(a.into()))
}

impl Expr {
    pub fn shape(&self) -> Result<Shape, KronError> {
        match self {
            Expr::Variable(v) => Ok(v.shape()),
            Expr::Constant(m) => Ok(m.shape()),
            Expr::Parameter(p) => Ok(p.shape()),
            Expr::Neg(a) => a.shape(),
            Expr::Add(a, b) => {
                let (left, right) = (a.shape()?, b.shape()?);
                left.broadcast(&right).ok_or(KronError::ShapeMismatch {
                    operation: "addition",
                    left,
                    right,
                })
            }
            Expr::Kron(a, b) => Ok(a.shape()?.kron(&b.shape()?)),
            Expr::Sum(a) => a.shape().map(|_| Shape::SCALAR),
        }
    }

    pub fn kron(self, other: impl Into<Expr>) -> Expr {
        kron(self, other)
    }

    pub fn sum(self) -> Expr {
        sum(self)
    }

    /// Elementwise constraint `self >= rhs`.
    pub fn geq(self, rhs: impl Into<Expr>) -> Result<Constraint, KronError> {
        Constraint::greater_equal(self, rhs.into())
    }

    /// Elementwise constraint `self <= rhs`.
    pub fn leq(self, rhs: impl Into<Expr>) -> Result<Constraint, KronError> {
        Constraint::greater_equal(rhs.into(), self)
    }

    fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Variable(_) | Expr::Constant(_) | Expr::Parameter(_) => vec![],
            Expr::Neg(a) | Expr::Sum(a) => vec![a],
            Expr::Add(a, b) | Expr::Kron(a, b) => vec![a, b],
        }
    }

    /// Visits every node in depth first, left to right order.
    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Variables in order of first appearance.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        self.walk(&mut |e| {
            if let Expr::Variable(v) = e {
                if !vars.contains(v) {
                    vars.push(v.clone());
                }
            }
        });
        vars
    }

    /// Parameters in order of first appearance.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut params: Vec<Parameter> = Vec::new();
        self.walk(&mut |e| {
            if let Expr::Parameter(p) = e {
                if !params.contains(p) {
                    params.push(p.clone());
                }
            }
        });
        params
    }

    pub fn has_variables(&self) -> bool {
        let mut found = false;
        self.walk(&mut |e| found |= matches!(e, Expr::Variable(_)));
        found
    }

    pub fn has_parameters(&self) -> bool {
        let mut found = false;
        self.walk(&mut |e| found |= matches!(e, Expr::Parameter(_)));
        found
    }

    /// Affine in the variables: every Kronecker product has at least one
    /// variable free factor.
    pub fn is_affine(&self) -> bool {
        match self {
            Expr::Kron(a, b) => {
                a.is_affine() && b.is_affine() && !(a.has_variables() && b.has_variables())
            }
            _ => self.children().iter().all(|c| c.is_affine()),
        }
    }

    /// Disciplined parametrized: affine, and no Kronecker product has
    /// parameters in both factors.  Such an expression is affine jointly in
    /// the variables for every fixed parameter value, with coefficients that
    /// are affine in the parameters.
    pub fn is_dpp(&self) -> bool {
        match self {
            Expr::Kron(a, b) => {
                self.is_affine()
                    && a.is_dpp()
                    && b.is_dpp()
                    && !(a.has_parameters() && b.has_parameters())
            }
            _ => self.children().iter().all(|c| c.is_dpp()),
        }
    }

    /// Numeric value using current variable and parameter values.
    pub fn value(&self) -> Result<Matrix<f64>, KronError> {
        match self {
            Expr::Variable(v) => v.try_value(),
            Expr::Constant(m) => Ok(m.clone()),
            Expr::Parameter(p) => p.try_value(),
            Expr::Neg(a) => Ok(a.value()?.map(|v| -v)),
            Expr::Add(a, b) => Ok(a.value()?.zip_broadcast(&b.value()?, |x, y| x + y)?),
            Expr::Kron(a, b) => Ok(Matrix::kron(&a.value()?, &b.value()?)),
            Expr::Sum(a) => Ok(Matrix::scalar(a.value()?.sum())),
        }
    }
}

impl From<Variable> for Expr {
    fn from(v: Variable) -> Self {
        Expr::Variable(v)
    }
}

impl From<&Variable> for Expr {
    fn from(v: &Variable) -> Self {
        Expr::Variable(v.clone())
    }
}

impl From<Parameter> for Expr {
    fn from(p: Parameter) -> Self {
        Expr::Parameter(p)
    }
}

impl From<&Parameter> for Expr {
    fn from(p: &Parameter) -> Self {
        Expr::Parameter(p.clone())
    }
}

impl From<Matrix<f64>> for Expr {
    fn from(m: Matrix<f64>) -> Self {
        Expr::Constant(m)
    }
}

impl From<&Matrix<f64>> for Expr {
    fn from(m: &Matrix<f64>) -> Self {
        Expr::Constant(m.clone())
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Constant(Matrix::scalar(v))
    }
}

impl<R: Into<Expr>> std::ops::Add<R> for Expr {
    type Output = Expr;
    fn add(self, rhs: R) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> std::ops::Sub<R> for Expr {
    type Output = Expr;
    fn sub(self, rhs: R) -> Expr {
        let rhs: Expr = rhs.into();
        Expr::Add(Box::new(self), Box::new(-rhs))
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves() -> (Variable, Parameter, Matrix<f64>) {
        let z = Variable::named("Z", (2, 2)).unwrap();
        let c = Parameter::with_value(
            "C",
            Matrix::from_row_major((1, 2), &[0.5, 2.0]).unwrap(),
        )
        .unwrap();
        let l = Matrix::from_row_major((2, 2), &[1., 2., 3., 4.]).unwrap();
        (z, c, l)
    }

    #[test]
    fn test_expr_shapes() {
        let (z, c, l) = leaves();
        assert_eq!(kron(&c, &z).shape().unwrap(), Shape(2, 4));
        assert_eq!(kron(&z, &c).shape().unwrap(), Shape(2, 4));
        assert_eq!(sum(&z).shape().unwrap(), Shape::SCALAR);
        assert_eq!((Expr::from(&z) - 1.0).shape().unwrap(), Shape(2, 2));
        assert_eq!((Expr::from(&z) + &l).shape().unwrap(), Shape(2, 2));

        let bad = Expr::from(&z) + &c;
        assert!(matches!(
            bad.shape(),
            Err(KronError::ShapeMismatch { operation: "addition", .. })
        ));
    }

    #[test]
    fn test_expr_curvature() {
        let (z, c, l) = leaves();
        let y = Variable::named("Y", (1, 2)).unwrap();

        assert!(kron(&c, &z).is_affine());
        assert!(kron(&c, &z).is_dpp());
        assert!(kron(&c, &l).is_dpp());
        assert!(kron(&l, &z).is_dpp());

        assert!(!kron(&y, &z).is_affine());
        assert!(!kron(&y, &z).is_dpp());

        // parameter products are affine in the variables but not DPP
        let c2 = Parameter::named("D", (1, 1)).unwrap();
        let nested = kron(kron(&c2, &c), &z);
        assert!(nested.is_affine());
        assert!(!nested.is_dpp());
    }

    #[test]
    fn test_expr_leaves() {
        let (z, c, l) = leaves();
        let e = sum(&z) + kron(&c, &z) - kron(&c, &l);
        let vars = e.variables();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0], z);
        assert_eq!(e.parameters(), vec![c]);
        assert!(e.has_variables());
        assert!(!kron(1.0, &l).has_parameters());
    }

    #[test]
    fn test_expr_value() {
        let (z, c, l) = leaves();
        assert!(matches!(
            Expr::from(&z).value(),
            Err(KronError::VariableValueMissing(_))
        ));

        let k = kron(&c, &l).value().unwrap();
        assert_eq!(
            k.rows(),
            vec![vec![0.5, 1.0, 2.0, 4.0], vec![1.5, 2.0, 6.0, 8.0]]
        );
        assert_eq!(sum(&l).value().unwrap().data(), &[10.]);
        assert_eq!((-Expr::from(&l) + 1.0).value().unwrap().data(), &[0., -2., -1., -3.]);
    }
}
