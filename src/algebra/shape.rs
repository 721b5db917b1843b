#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions `(rows, cols)` of a matrix valued object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape(pub usize, pub usize);

impl Shape {
    /// shape of a scalar
    pub const SCALAR: Shape = Shape(1, 1);

    pub fn nrows(&self) -> usize {
        self.0
    }

    pub fn ncols(&self) -> usize {
        self.1
    }

    /// number of entries
    pub fn len(&self) -> usize {
        self.0 * self.1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        *self == Shape::SCALAR
    }

    /// Shape of the Kronecker product of objects of shapes `self` and `other`.
    pub fn kron(&self, other: &Shape) -> Shape {
        Shape(self.0 * other.0, self.1 * other.1)
    }

    /// Shape obtained by elementwise combination with `other`, where a
    /// scalar is broadcast against any shape.
    pub fn broadcast(&self, other: &Shape) -> Option<Shape> {
        if self == other || other.is_scalar() {
            Some(*self)
        } else if self.is_scalar() {
            Some(*other)
        } else {
            None
        }
    }

    /// column major linear index of entry `(i, j)`
    pub fn linear_index(&self, i: usize, j: usize) -> usize {
        i + self.0 * j
    }
}

impl From<(usize, usize)> for Shape {
    fn from(size: (usize, usize)) -> Self {
        Shape(size.0, size.1)
    }
}

impl From<Shape> for (usize, usize) {
    fn from(shape: Shape) -> Self {
        (shape.0, shape.1)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[test]
fn test_shape_broadcast() {
    let a = Shape(2, 3);
    assert_eq!(a.broadcast(&Shape(2, 3)), Some(a));
    assert_eq!(a.broadcast(&Shape::SCALAR), Some(a));
    assert_eq!(Shape::SCALAR.broadcast(&a), Some(a));
    assert_eq!(a.broadcast(&Shape(3, 2)), None);
    assert_eq!(a.kron(&Shape(2, 2)), Shape(4, 6));
    assert_eq!(format!("{}", a), "(2, 3)");
}
