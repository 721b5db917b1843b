use crate::algebra::{Matrix, Shape};
use crate::KronError;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

fn check_shape(shape: Shape) -> Result<Shape, KronError> {
    if shape.is_empty() {
        return Err(KronError::EmptyShape(shape));
    }
    Ok(shape)
}

// values are shared between all clones of a leaf, so that a
// value written after a problem is assembled is seen by the problem
type ValueSlot = Rc<RefCell<Option<Matrix<f64>>>>;

/// Unique identifier of a [`Variable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarId(pub(crate) usize);

/// Unique identifier of a [`Parameter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamId(pub(crate) usize);

/// A matrix shaped decision variable.
///
/// A variable has no value until a problem containing it has been solved
/// successfully.  Clones share the same value.
#[derive(Debug, Clone)]
pub struct Variable {
    id: VarId,
    name: String,
    shape: Shape,
    value: ValueSlot,
}

impl Variable {
    pub fn new(shape: impl Into<Shape>) -> Result<Self, KronError> {
        let id = next_id();
        Self::with_id(id, format!("var{}", id), shape.into())
    }

    pub fn named(name: &str, shape: impl Into<Shape>) -> Result<Self, KronError> {
        Self::with_id(next_id(), name.to_string(), shape.into())
    }

    fn with_id(id: usize, name: String, shape: Shape) -> Result<Self, KronError> {
        Ok(Self {
            id: VarId(id),
            name,
            shape: check_shape(shape)?,
            value: Rc::new(RefCell::new(None)),
        })
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// value from the most recent successful solve
    pub fn value(&self) -> Option<Matrix<f64>> {
        self.value.borrow().clone()
    }

    pub fn try_value(&self) -> Result<Matrix<f64>, KronError> {
        self.value()
            .ok_or_else(|| KronError::VariableValueMissing(self.name.clone()))
    }

    pub(crate) fn set_value(&self, value: Option<Matrix<f64>>) {
        *self.value.borrow_mut() = value;
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A named, matrix shaped symbolic constant.
///
/// The value of a parameter can be assigned and reassigned at any time,
/// including after the problems that use it have been assembled.  Clones
/// share the same value slot.
#[derive(Debug, Clone)]
pub struct Parameter {
    id: ParamId,
    name: String,
    shape: Shape,
    value: ValueSlot,
}

impl Parameter {
    pub fn new(shape: impl Into<Shape>) -> Result<Self, KronError> {
        let id = next_id();
        Self::with_id(id, format!("param{}", id), shape.into())
    }

    pub fn named(name: &str, shape: impl Into<Shape>) -> Result<Self, KronError> {
        Self::with_id(next_id(), name.to_string(), shape.into())
    }

    /// A parameter with `value` already assigned.
    pub fn with_value(name: &str, value: Matrix<f64>) -> Result<Self, KronError> {
        let param = Self::named(name, value.shape())?;
        param.set_value(value)?;
        Ok(param)
    }

    fn with_id(id: usize, name: String, shape: Shape) -> Result<Self, KronError> {
        Ok(Self {
            id: ParamId(id),
            name,
            shape: check_shape(shape)?,
            value: Rc::new(RefCell::new(None)),
        })
    }

    pub fn id(&self) -> ParamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn value(&self) -> Option<Matrix<f64>> {
        self.value.borrow().clone()
    }

    pub fn try_value(&self) -> Result<Matrix<f64>, KronError> {
        self.value()
            .ok_or_else(|| KronError::ParameterValueMissing(self.name.clone()))
    }

    /// Assigns a new value.  The value must have the declared shape.
    pub fn set_value(&self, value: Matrix<f64>) -> Result<(), KronError> {
        if value.shape() != self.shape {
            return Err(KronError::ShapeMismatch {
                operation: "parameter assignment",
                left: self.shape,
                right: value.shape(),
            });
        }
        *self.value.borrow_mut() = Some(value);
        Ok(())
    }

    pub fn clear_value(&self) {
        *self.value.borrow_mut() = None;
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_value_is_shared() {
        let p = Parameter::named("C", (1, 2)).unwrap();
        let q = p.clone();
        assert!(matches!(
            q.try_value(),
            Err(KronError::ParameterValueMissing(ref name)) if name == "C"
        ));

        p.set_value(Matrix::from_row_major((1, 2), &[0.5, 0.25]).unwrap())
            .unwrap();
        assert_eq!(q.value().unwrap().data(), &[0.5, 0.25]);

        let bad = p.set_value(Matrix::zeros((2, 1)));
        assert!(matches!(bad, Err(KronError::ShapeMismatch { .. })));

        q.clear_value();
        assert!(p.value().is_none());
    }

    #[test]
    fn test_leaf_ids_and_names() {
        let x = Variable::new((2, 2)).unwrap();
        let y = Variable::new((2, 2)).unwrap();
        assert_ne!(x.id(), y.id());
        assert_ne!(x, y);
        assert_eq!(x, x.clone());
        assert!(x.name().starts_with("var"));
        assert!(Parameter::new((3, 1)).unwrap().name().starts_with("param"));

        assert!(matches!(
            Variable::new((0, 2)),
            Err(KronError::EmptyShape(Shape(0, 2)))
        ));
    }
}
