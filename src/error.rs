use crate::algebra::{MatrixShapeError, Shape, SparseFormatError};
use thiserror::Error;

/// Error type returned by model construction, compilation and solving.
#[derive(Error, Debug)]
pub enum KronError {
    /// Operands of an elementwise operation or constraint have incompatible shapes
    #[error("Incompatible shapes {left} and {right} in {operation}")]
    ShapeMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },
    /// A matrix valued object was declared with a zero dimension
    #[error("Shape {0} has no entries")]
    EmptyShape(Shape),
    /// The objective is not a scalar expression
    #[error("Objective must be scalar, found shape {0}")]
    NonScalarObjective(Shape),
    /// An expression is not affine in the problem variables
    #[error("Expression is not affine: {0}")]
    NotAffine(&'static str),
    /// Compilation with `enforce_dpp` requested for a problem that is not DPP
    #[error("Problem does not follow DPP rules and enforce_dpp is set")]
    NotDpp,
    /// A parameter was read before any value was assigned
    #[error("Parameter '{0}' has no value")]
    ParameterValueMissing(String),
    /// A variable was read before the problem was solved
    #[error("Variable '{0}' has no value")]
    VariableValueMissing(String),
    /// Solver name not recognised
    #[error("Unknown solver '{0}'")]
    UnknownSolver(String),
    /// A settings structure failed validation
    #[error("Bad settings: {0}")]
    Settings(String),
    /// The numeric solver rejected the problem data
    #[error("Solver setup failed: {0}")]
    SolverSetup(String),
    #[error(transparent)]
    Matrix(#[from] MatrixShapeError),
    #[error(transparent)]
    Sparse(#[from] SparseFormatError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// A field holds a value outside its legal range
    #[error("Bad value for field '{0}'")]
    BadFieldValue(&'static str),
    /// Two fields were given values that cannot be used together
    #[error("Fields '{0}' and '{1}' cannot both be set")]
    ConflictingFields(&'static str, &'static str),
}

impl From<SettingsError> for KronError {
    fn from(e: SettingsError) -> Self {
        KronError::Settings(e.to_string())
    }
}
