use crate::SettingsError;
use clarabel::solver::{DefaultSettings, DefaultSettingsBuilder};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric solver settings forwarded to the backend.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveSettings {
    ///maximum number of iterations
    #[builder(default = "200")]
    pub max_iter: u32,

    ///maximum run time (seconds)
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,

    ///print solver iterations
    #[builder(default = "false")]
    pub verbose: bool,

    ///feasibility check tolerance (primal and dual)
    #[builder(default = "1e-8")]
    pub tol_feas: f64,

    ///absolute duality gap tolerance
    #[builder(default = "1e-8")]
    pub tol_gap_abs: f64,

    ///relative duality gap tolerance
    #[builder(default = "1e-8")]
    pub tol_gap_rel: f64,

    ///enable data equilibration pre-scaling
    #[builder(default = "true")]
    pub equilibrate_enable: bool,

    ///enable presolve constraint reduction
    #[builder(default = "true")]
    pub presolve_enable: bool,

    ///drop explicit zeros from G before handing it to the solver
    #[builder(default = "false")]
    pub input_sparse_dropzeros: bool,
}

impl Default for SolveSettings {
    fn default() -> SolveSettings {
        SolveSettingsBuilder::default().build().unwrap()
    }
}

impl SolveSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_positive(self.time_limit, "time_limit")?;
        validate_positive(self.tol_feas, "tol_feas")?;
        validate_positive(self.tol_gap_abs, "tol_gap_abs")?;
        validate_positive(self.tol_gap_rel, "tol_gap_rel")?;
        Ok(())
    }

    /// Equivalent settings for the clarabel solver.
    pub fn to_clarabel(&self) -> Result<DefaultSettings<f64>, SettingsError> {
        self.validate()?;
        DefaultSettingsBuilder::default()
            .max_iter(self.max_iter)
            .time_limit(self.time_limit)
            .verbose(self.verbose)
            .tol_feas(self.tol_feas)
            .tol_gap_abs(self.tol_gap_abs)
            .tol_gap_rel(self.tol_gap_rel)
            .equilibrate_enable(self.equilibrate_enable)
            .presolve_enable(self.presolve_enable)
            .input_sparse_dropzeros(self.input_sparse_dropzeros)
            .build()
            .map_err(|_| SettingsError::BadFieldValue("solver settings"))
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SolveSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SolveSettingsBuilderError::ValidationError(e.to_string())
    }
}

impl SolveSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(time_limit) = self.time_limit {
            validate_positive(time_limit, "time_limit")?;
        }
        for (value, name) in [
            (self.tol_feas, "tol_feas"),
            (self.tol_gap_abs, "tol_gap_abs"),
            (self.tol_gap_rel, "tol_gap_rel"),
        ] {
            if let Some(value) = value {
                validate_positive(value, name)?;
            }
        }
        Ok(())
    }
}

fn validate_positive(value: f64, field: &'static str) -> Result<(), SettingsError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

#[test]
fn test_solve_settings() {
    let settings = SolveSettings::default();
    assert_eq!(settings.max_iter, 200);
    assert!(!settings.verbose);

    let clarabel = settings.to_clarabel().unwrap();
    assert_eq!(clarabel.max_iter, 200);
    assert_eq!(clarabel.tol_feas, 1e-8);
    assert!(!clarabel.verbose);

    let bad = SolveSettingsBuilder::default().tol_feas(-1.0).build();
    assert!(bad.is_err());
    let bad = SolveSettingsBuilder::default().time_limit(f64::NAN).build();
    assert!(bad.is_err());
}
