use crate::algebra::{Matrix, Shape};
use crate::model::{ParamId, Parameter};
use crate::KronError;
use std::collections::{BTreeMap, HashMap};
use std::ops::AddAssign;

/// A single entry of a parameter, in column major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamSlot {
    pub param: ParamId,
    pub index: usize,
}

/// Scalar that is affine in parameter entries: `constant + Σ a_k p_k`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamCoeff {
    pub constant: f64,
    pub terms: BTreeMap<ParamSlot, f64>,
}

impl ParamCoeff {
    pub fn constant(v: f64) -> Self {
        Self {
            constant: v,
            terms: BTreeMap::new(),
        }
    }

    pub fn slot(slot: ParamSlot) -> Self {
        Self {
            constant: 0.0,
            terms: BTreeMap::from([(slot, 1.0)]),
        }
    }

    /// no parameter terms and a zero constant
    pub fn is_zero(&self) -> bool {
        self.constant == 0.0 && self.terms.is_empty()
    }

    pub fn is_parametric(&self) -> bool {
        !self.terms.is_empty()
    }

    pub fn scale(&self, a: f64) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(&s, &v)| (s, a * v))
            .filter(|&(_, v)| v != 0.0)
            .collect();
        Self {
            constant: a * self.constant,
            terms,
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            constant: -self.constant,
            terms: self.terms.iter().map(|(&s, &v)| (s, -v)).collect(),
        }
    }

    /// Product of two coefficients, or `None` when both depend on
    /// parameters and the product would not be parameter affine.
    pub fn mul(&self, other: &Self) -> Option<Self> {
        match (self.is_parametric(), other.is_parametric()) {
            (true, true) => None,
            (true, false) => Some(self.scale(other.constant)),
            (false, _) => Some(other.scale(self.constant)),
        }
    }

    pub fn evaluate(&self, values: &ParamValues) -> Result<f64, KronError> {
        let mut v = self.constant;
        for (slot, a) in &self.terms {
            v += a * values.get(slot)?;
        }
        Ok(v)
    }
}

impl AddAssign for ParamCoeff {
    fn add_assign(&mut self, other: Self) {
        self.constant += other.constant;
        for (slot, a) in other.terms {
            let entry = self.terms.entry(slot).or_insert(0.0);
            *entry += a;
            if *entry == 0.0 {
                self.terms.remove(&slot);
            }
        }
    }
}

/// Snapshot of parameter values used to instantiate compiled data.
#[derive(Debug, Clone, Default)]
pub struct ParamValues {
    values: HashMap<ParamId, Matrix<f64>>,
    names: HashMap<ParamId, String>,
}

impl ParamValues {
    /// Reads the current value of every parameter in `params`.
    pub fn snapshot(params: &[Parameter]) -> Result<Self, KronError> {
        let mut snapshot = Self::default();
        for p in params {
            snapshot.names.insert(p.id(), p.name().to_string());
            snapshot.values.insert(p.id(), p.try_value()?);
        }
        Ok(snapshot)
    }

    /// Overrides the value used for `param`.
    pub fn insert(&mut self, param: &Parameter, value: Matrix<f64>) -> Result<(), KronError> {
        if value.shape() != param.shape() {
            return Err(KronError::ShapeMismatch {
                operation: "parameter assignment",
                left: param.shape(),
                right: value.shape(),
            });
        }
        self.names.insert(param.id(), param.name().to_string());
        self.values.insert(param.id(), value);
        Ok(())
    }

    /// Fails unless a value for `param` is present.
    pub fn require(&self, param: &Parameter) -> Result<(), KronError> {
        if self.values.contains_key(&param.id()) {
            Ok(())
        } else {
            Err(KronError::ParameterValueMissing(param.name().to_string()))
        }
    }

    pub fn get(&self, slot: &ParamSlot) -> Result<f64, KronError> {
        self.values
            .get(&slot.param)
            .and_then(|m| m.data().get(slot.index).copied())
            .ok_or_else(|| KronError::ParameterValueMissing(self.name_of(slot.param)))
    }

    fn name_of(&self, id: ParamId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("parameter {}", id.0))
    }
}

// one entry of an affine expression: offset plus coefficients on solver columns
type Row = (ParamCoeff, BTreeMap<usize, ParamCoeff>);

/// Matrix valued expression that is affine in the solver variable `x`.
///
/// Entry `k` (column major) equals `offset[k] + Σ_j coeffs[k][j] * x[j]`.
/// Zero coefficients are never stored, so the coefficient maps give the
/// structural sparsity of the expression.
#[derive(Debug, Clone)]
pub struct AffineExpr {
    shape: Shape,
    offset: Vec<ParamCoeff>,
    coeffs: Vec<BTreeMap<usize, ParamCoeff>>,
}

impl AffineExpr {
    pub fn constant(m: &Matrix<f64>) -> Self {
        Self {
            shape: m.shape(),
            offset: m.data().iter().map(|&v| ParamCoeff::constant(v)).collect(),
            coeffs: vec![BTreeMap::new(); m.len()],
        }
    }

    /// Parameter kept symbolic: entry `k` is the parameter entry `k`.
    pub fn parameter(p: &Parameter) -> Self {
        let len = p.shape().len();
        Self {
            shape: p.shape(),
            offset: (0..len)
                .map(|index| ParamCoeff::slot(ParamSlot { param: p.id(), index }))
                .collect(),
            coeffs: vec![BTreeMap::new(); len],
        }
    }

    /// Variable occupying solver columns `col_offset..col_offset + shape.len()`.
    pub fn variable(shape: Shape, col_offset: usize) -> Self {
        Self {
            shape,
            offset: vec![ParamCoeff::default(); shape.len()],
            coeffs: (0..shape.len())
                .map(|k| BTreeMap::from([(col_offset + k, ParamCoeff::constant(1.0))]))
                .collect(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn offset(&self) -> &[ParamCoeff] {
        &self.offset
    }

    pub fn coeffs(&self) -> &[BTreeMap<usize, ParamCoeff>] {
        &self.coeffs
    }

    /// true if no entry depends on the solver variable
    pub fn is_constant(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_empty())
    }

    // entry k, reading a 1 x 1 expression as a broadcast scalar
    fn entry(&self, k: usize) -> (&ParamCoeff, &BTreeMap<usize, ParamCoeff>) {
        let k = if self.offset.len() == 1 { 0 } else { k };
        (&self.offset[k], &self.coeffs[k])
    }

    fn from_rows(shape: Shape, rows: Vec<Row>) -> Self {
        let (offset, coeffs) = rows.into_iter().unzip();
        Self {
            shape,
            offset,
            coeffs,
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            shape: self.shape,
            offset: self.offset.iter().map(ParamCoeff::neg).collect(),
            coeffs: self
                .coeffs
                .iter()
                .map(|c| c.iter().map(|(&j, a)| (j, a.neg())).collect())
                .collect(),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, KronError> {
        let shape = self
            .shape
            .broadcast(&other.shape)
            .ok_or(KronError::ShapeMismatch {
                operation: "addition",
                left: self.shape,
                right: other.shape,
            })?;

        let rows = (0..shape.len())
            .map(|k| {
                let (o1, c1) = self.entry(k);
                let (o2, c2) = other.entry(k);
                let mut offset = o1.clone();
                offset += o2.clone();
                let mut coeffs = c1.clone();
                for (&j, a) in c2 {
                    let entry = coeffs.entry(j).or_default();
                    *entry += a.clone();
                }
                coeffs.retain(|_, a| !a.is_zero());
                (offset, coeffs)
            })
            .collect();
        Ok(Self::from_rows(shape, rows))
    }

    pub fn sub(&self, other: &Self) -> Result<Self, KronError> {
        self.add(&other.neg())
    }

    /// 1 x 1 sum of all entries
    pub fn sum(&self) -> Self {
        let mut total = Self {
            shape: Shape::SCALAR,
            offset: vec![ParamCoeff::default()],
            coeffs: vec![BTreeMap::new()],
        };
        for k in 0..self.shape.len() {
            total.offset[0] += self.offset[k].clone();
            for (&j, a) in &self.coeffs[k] {
                *total.coeffs[0].entry(j).or_default() += a.clone();
            }
        }
        total.coeffs[0].retain(|_, a| !a.is_zero());
        total
    }

    /// Kronecker product.  At least one of the factors must be constant in
    /// the solver variable.
    pub fn kron(&self, other: &Self) -> Result<Self, KronError> {
        let (pp, qq): (usize, usize) = self.shape.into();
        let (rr, ss): (usize, usize) = other.shape.into();
        let shape = self.shape.kron(&other.shape);

        let scale_row = |scalar: &ParamCoeff, (offset, coeffs): (&ParamCoeff, &BTreeMap<usize, ParamCoeff>)| -> Result<Row, KronError> {
            let offset = scalar.mul(offset).ok_or(KronError::NotDpp)?;
            let mut scaled = BTreeMap::new();
            for (&j, a) in coeffs {
                let a = scalar.mul(a).ok_or(KronError::NotDpp)?;
                if !a.is_zero() {
                    scaled.insert(j, a);
                }
            }
            Ok((offset, scaled))
        };

        let left_constant = self.is_constant();
        if !left_constant && !other.is_constant() {
            return Err(KronError::NotAffine("product of two variable expressions"));
        }

        // entries visited in column major order of the product
        let mut rows = Vec::with_capacity(shape.len());
        for q in 0..qq {
            for s in 0..ss {
                for p in 0..pp {
                    let a = self.entry(self.shape.linear_index(p, q));
                    for r in 0..rr {
                        let b = other.entry(other.shape.linear_index(r, s));
                        let row = if left_constant {
                            scale_row(a.0, b)?
                        } else {
                            scale_row(b.0, a)?
                        };
                        rows.push(row);
                    }
                }
            }
        }
        Ok(Self::from_rows(shape, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values_of(p: &Parameter) -> ParamValues {
        ParamValues::snapshot(std::slice::from_ref(p)).unwrap()
    }

    #[test]
    fn test_param_coeff_arithmetic() {
        let p = Parameter::with_value("p", Matrix::from_row_major((1, 2), &[3., 5.]).unwrap()).unwrap();
        let s0 = ParamSlot { param: p.id(), index: 0 };
        let s1 = ParamSlot { param: p.id(), index: 1 };

        let mut a = ParamCoeff::slot(s0).scale(2.0);
        a += ParamCoeff::constant(1.0);
        assert_eq!(a.evaluate(&values_of(&p)).unwrap(), 7.0);

        let b = ParamCoeff::slot(s1);
        assert!(a.mul(&b).is_none());
        let ab = a.mul(&ParamCoeff::constant(0.5)).unwrap();
        assert_eq!(ab.evaluate(&values_of(&p)).unwrap(), 3.5);

        // cancelled terms leave no structural entry
        let mut c = ParamCoeff::slot(s1);
        c += ParamCoeff::slot(s1).neg();
        assert!(c.is_zero());

        assert!(ParamCoeff::slot(s0).scale(0.0).is_zero());
    }

    #[test]
    fn test_param_values_missing() {
        let p = Parameter::named("C", (2, 2)).unwrap();
        assert!(matches!(
            ParamValues::snapshot(&[p.clone()]),
            Err(KronError::ParameterValueMissing(_))
        ));

        let mut values = ParamValues::default();
        assert!(values.insert(&p, Matrix::zeros((1, 1))).is_err());
        values.insert(&p, Matrix::zeros((2, 2))).unwrap();
        let slot = ParamSlot { param: p.id(), index: 3 };
        assert_eq!(values.get(&slot).unwrap(), 0.0);
        assert!(values.require(&p).is_ok());

        // errors name the parameter rather than its id
        let q = Parameter::named("D", (1, 2)).unwrap();
        assert!(matches!(
            values.require(&q),
            Err(KronError::ParameterValueMissing(name)) if name == "D"
        ));
        let out_of_range = ParamSlot { param: p.id(), index: 4 };
        assert!(matches!(
            values.get(&out_of_range),
            Err(KronError::ParameterValueMissing(name)) if name == "C"
        ));
    }

    #[test]
    fn test_affine_kron_constant_left() {
        // kron([2 0], Z) for a 1 x 2 variable Z at columns 0..2
        let c = AffineExpr::constant(&Matrix::from_row_major((1, 2), &[2., 0.]).unwrap());
        let z = AffineExpr::variable(Shape(1, 2), 0);
        let k = c.kron(&z).unwrap();

        assert_eq!(k.shape(), Shape(1, 4));
        assert_eq!(k.coeffs()[0].get(&0), Some(&ParamCoeff::constant(2.0)));
        assert_eq!(k.coeffs()[1].get(&1), Some(&ParamCoeff::constant(2.0)));
        // zero block has no structural entries
        assert!(k.coeffs()[2].is_empty());
        assert!(k.coeffs()[3].is_empty());
    }

    #[test]
    fn test_affine_kron_parameter() {
        let p = Parameter::with_value("C", Matrix::from_row_major((1, 2), &[2., 0.]).unwrap()).unwrap();
        let z = AffineExpr::variable(Shape(1, 2), 0);

        // symbolic parameter keeps entries whose current value is zero
        let k = AffineExpr::parameter(&p).kron(&z).unwrap();
        assert!(k.coeffs().iter().all(|c| c.len() == 1));
        let vals = values_of(&p);
        assert_eq!(k.coeffs()[2][&0].evaluate(&vals).unwrap(), 0.0);

        // variable on the left
        let k = z.kron(&AffineExpr::parameter(&p)).unwrap();
        assert_eq!(k.coeffs()[0][&0].evaluate(&vals).unwrap(), 2.0);
        assert_eq!(k.coeffs()[1][&0].evaluate(&vals).unwrap(), 0.0);
        assert_eq!(k.coeffs()[2][&1].evaluate(&vals).unwrap(), 2.0);

        // parameter times parameter is not parameter affine
        let pp = AffineExpr::parameter(&p).kron(&AffineExpr::parameter(&p));
        assert!(matches!(pp, Err(KronError::NotDpp)));

        let zz = z.kron(&z);
        assert!(matches!(zz, Err(KronError::NotAffine(_))));
    }

    #[test]
    fn test_affine_add_sum() {
        let z = AffineExpr::variable(Shape(2, 1), 0);
        let one = AffineExpr::constant(&Matrix::scalar(1.0));
        let e = z.sub(&one).unwrap();
        assert_eq!(e.shape(), Shape(2, 1));
        assert_eq!(e.offset()[1], ParamCoeff::constant(-1.0));

        let s = e.sum();
        assert_eq!(s.shape(), Shape::SCALAR);
        assert_eq!(s.offset()[0], ParamCoeff::constant(-2.0));
        assert_eq!(s.coeffs()[0].len(), 2);

        // z - z has no structural coefficients left
        assert!(z.sub(&z).unwrap().is_constant());
    }
}
