use super::{Expr, Parameter};
use crate::algebra::{Matrix, Shape};
use crate::KronError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a known numeric matrix enters a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Representation {
    /// value fixed into the model when it is compiled
    Constant,
    /// named slot, bound before solving and rebindable between solves
    Parameter,
}

impl Representation {
    pub const ALL: [Representation; 2] = [Representation::Constant, Representation::Parameter];

    pub fn is_parameter(&self) -> bool {
        matches!(self, Representation::Parameter)
    }
}

impl From<bool> for Representation {
    /// `true` selects [`Representation::Parameter`]
    fn from(param: bool) -> Self {
        if param {
            Representation::Parameter
        } else {
            Representation::Constant
        }
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Representation::Constant => write!(f, "Constant"),
            Representation::Parameter => write!(f, "Parameter"),
        }
    }
}

/// A numeric model input, carried either as a fixed constant or as a
/// parameter holding the same value.
#[derive(Debug, Clone)]
pub enum Input {
    Constant(Matrix<f64>),
    Parameter(Parameter),
}

impl Input {
    /// Wraps `value` according to `representation`.  Parameters are
    /// created with `value` already assigned.
    pub fn new(
        representation: Representation,
        name: &str,
        value: Matrix<f64>,
    ) -> Result<Self, KronError> {
        match representation {
            Representation::Constant => Ok(Input::Constant(value)),
            Representation::Parameter => Ok(Input::Parameter(Parameter::with_value(name, value)?)),
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            Input::Constant(_) => Representation::Constant,
            Input::Parameter(_) => Representation::Parameter,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Input::Constant(m) => m.shape(),
            Input::Parameter(p) => p.shape(),
        }
    }

    /// current numeric value; `None` for an unassigned parameter
    pub fn value(&self) -> Option<Matrix<f64>> {
        match self {
            Input::Constant(m) => Some(m.clone()),
            Input::Parameter(p) => p.value(),
        }
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Input::Parameter(p) => Some(p),
            Input::Constant(_) => None,
        }
    }
}

impl From<&Input> for Expr {
    fn from(input: &Input) -> Self {
        match input {
            Input::Constant(m) => Expr::Constant(m.clone()),
            Input::Parameter(p) => Expr::Parameter(p.clone()),
        }
    }
}

impl From<Input> for Expr {
    fn from(input: Input) -> Self {
        match input {
            Input::Constant(m) => Expr::Constant(m),
            Input::Parameter(p) => Expr::Parameter(p),
        }
    }
}

#[test]
fn test_input_representation() {
    let value = Matrix::from_row_major((1, 2), &[0.55, 0.72]).unwrap();
    let c = Input::new(Representation::Constant, "C", value.clone()).unwrap();
    let p = Input::new(Representation::Parameter, "C", value.clone()).unwrap();

    assert_eq!(c.representation(), Representation::Constant);
    assert_eq!(p.representation(), Representation::Parameter);
    assert_eq!(c.value(), p.value());
    assert_eq!(p.shape(), Shape(1, 2));
    assert_eq!(p.as_parameter().map(|p| p.name()), Some("C"));
    assert!(c.as_parameter().is_none());

    assert!(matches!(Expr::from(&c), Expr::Constant(_)));
    assert!(matches!(Expr::from(p), Expr::Parameter(_)));
    assert_eq!(Representation::from(true), Representation::Parameter);
    assert_eq!(format!("{}", Representation::Constant), "Constant");
}
