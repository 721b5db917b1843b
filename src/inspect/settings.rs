use crate::algebra::Shape;
use crate::backend::{Backend, SolveSettings};
use crate::canon::CompileOptions;
use crate::generator::KronOrder;
use crate::model::Representation;
use crate::SettingsError;
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration of a single inspection run.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunSettings {
    ///seed of the generator drawing C and L
    #[builder(default = "0")]
    pub seed: u64,

    ///shape of the variable Z and of L
    #[builder(default = "Shape(2, 2)", setter(into))]
    pub z_dims: Shape,

    ///shape of the coefficient C
    #[builder(default = "Shape(2, 3)", setter(into))]
    pub c_dims: Shape,

    ///row major entries of C used in place of the random draw.  C is still
    ///drawn and discarded, so L is the same as without the override.
    #[builder(default = "None", setter(strip_option))]
    pub c_value: Option<Vec<f64>>,

    ///whether C is a constant or a parameter
    #[builder(default = "Representation::Parameter")]
    pub representation: Representation,

    ///argument order of the Kronecker constraint
    #[builder(default = "KronOrder::CoefficientFirst")]
    pub kron_order: KronOrder,

    ///solve the problem before examining its data
    #[builder(default = "true")]
    pub solve: bool,

    ///reject problems that do not follow DPP rules when compiling
    #[builder(default = "true")]
    pub enforce_dpp: bool,

    ///numeric solver
    #[builder(default = "Backend::Clarabel")]
    pub backend: Backend,

    ///largest accepted entrywise distance between the solved Z and L
    #[builder(default = "1e-4")]
    pub tolerance: f64,

    ///settings forwarded to the numeric solver
    #[builder(default = "SolveSettings::default()")]
    pub solver: SolveSettings,
}

impl Default for RunSettings {
    fn default() -> RunSettings {
        RunSettingsBuilder::default().build().unwrap()
    }
}

impl RunSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_shape(self.z_dims, "z_dims")?;
        validate_shape(self.c_dims, "c_dims")?;
        validate_c_value(self.c_value.as_deref(), self.c_dims)?;
        validate_tolerance(self.tolerance)?;
        self.solver.validate()?;
        Ok(())
    }

    /// Compile options used when examining problem data.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            enforce_dpp: self.enforce_dpp,
            ignore_dpp: false,
        }
    }

    /// Copy of these settings with `representation` replaced.
    pub fn with_representation(&self, representation: Representation) -> Self {
        Self {
            representation,
            ..self.clone()
        }
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for RunSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        RunSettingsBuilderError::ValidationError(e.to_string())
    }
}

impl RunSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(z_dims) = self.z_dims {
            validate_shape(z_dims, "z_dims")?;
        }
        if let Some(c_dims) = self.c_dims {
            validate_shape(c_dims, "c_dims")?;
        }
        if let Some(Some(ref c_value)) = self.c_value {
            let c_dims = self.c_dims.unwrap_or(Shape(2, 3));
            validate_c_value(Some(c_value), c_dims)?;
        }
        if let Some(tolerance) = self.tolerance {
            validate_tolerance(tolerance)?;
        }
        if let Some(ref solver) = self.solver {
            solver.validate()?;
        }
        Ok(())
    }
}

fn validate_shape(shape: Shape, field: &'static str) -> Result<(), SettingsError> {
    if shape.is_empty() {
        return Err(SettingsError::BadFieldValue(field));
    }
    Ok(())
}

fn validate_c_value(c_value: Option<&[f64]>, c_dims: Shape) -> Result<(), SettingsError> {
    match c_value {
        Some(v) if v.len() != c_dims.len() => {
            Err(SettingsError::ConflictingFields("c_value", "c_dims"))
        }
        Some(v) if v.iter().any(|x| !x.is_finite()) => Err(SettingsError::BadFieldValue("c_value")),
        _ => Ok(()),
    }
}

fn validate_tolerance(tolerance: f64) -> Result<(), SettingsError> {
    if tolerance > 0.0 && tolerance.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("tolerance"))
    }
}

#[test]
fn test_run_settings() {
    let settings = RunSettings::default();
    assert_eq!(settings.seed, 0);
    assert_eq!(settings.z_dims, Shape(2, 2));
    assert_eq!(settings.c_dims, Shape(2, 3));
    assert_eq!(settings.representation, Representation::Parameter);
    assert!(settings.solve && settings.enforce_dpp);
    assert!(settings.compile_options().enforce_dpp);

    let constant = settings.with_representation(Representation::Constant);
    assert_eq!(constant.representation, Representation::Constant);
    assert_eq!(constant.c_dims, settings.c_dims);

    let custom = RunSettingsBuilder::default()
        .c_dims((1, 2))
        .seed(3)
        .build()
        .unwrap();
    assert_eq!(custom.c_dims, Shape(1, 2));

    assert!(RunSettingsBuilder::default().z_dims((0, 2)).build().is_err());
    assert!(RunSettingsBuilder::default().tolerance(0.0).build().is_err());

    assert!(settings.c_value.is_none());
    let fixed = RunSettingsBuilder::default()
        .c_dims((1, 2))
        .c_value(vec![0.0, 0.5])
        .build()
        .unwrap();
    assert_eq!(fixed.c_value, Some(vec![0.0, 0.5]));
    assert!(RunSettingsBuilder::default()
        .c_dims((2, 2))
        .c_value(vec![0.0, 0.5])
        .build()
        .is_err());
    let mut bad = fixed.clone();
    bad.c_dims = Shape(2, 2);
    assert_eq!(
        bad.validate(),
        Err(SettingsError::ConflictingFields("c_value", "c_dims"))
    );
}
