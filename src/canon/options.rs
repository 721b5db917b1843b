use super::ParamHandling;
use crate::{KronError, SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how parameters are treated during compilation.
///
/// | problem is DPP | `enforce_dpp` | `ignore_dpp` | result               |
/// |----------------|---------------|--------------|----------------------|
/// | yes            | any           | false        | symbolic parameters  |
/// | yes            | any           | true         | substituted values   |
/// | no             | true          |              | [`KronError::NotDpp`]|
/// | no             | false         | any          | substituted values   |
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompileOptions {
    /// reject problems that do not follow DPP rules
    #[builder(default = "false")]
    pub enforce_dpp: bool,

    /// substitute parameter values even when the problem is DPP
    #[builder(default = "false")]
    pub ignore_dpp: bool,
}

impl Default for CompileOptions {
    fn default() -> CompileOptions {
        CompileOptionsBuilder::default().build().unwrap()
    }
}

impl CompileOptions {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.enforce_dpp && self.ignore_dpp {
            return Err(SettingsError::ConflictingFields("enforce_dpp", "ignore_dpp"));
        }
        Ok(())
    }

    /// Parameter handling for a problem with the given DPP status.
    pub fn handling_for(&self, is_dpp: bool) -> Result<ParamHandling, KronError> {
        self.validate()?;
        match (is_dpp, self.enforce_dpp, self.ignore_dpp) {
            (false, true, _) => Err(KronError::NotDpp),
            (true, _, false) => Ok(ParamHandling::Symbolic),
            _ => Ok(ParamHandling::Substituted),
        }
    }
}

impl From<SettingsError> for CompileOptionsBuilderError {
    fn from(e: SettingsError) -> Self {
        CompileOptionsBuilderError::ValidationError(e.to_string())
    }
}

impl CompileOptionsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let (Some(true), Some(true)) = (self.enforce_dpp, self.ignore_dpp) {
            return Err(SettingsError::ConflictingFields("enforce_dpp", "ignore_dpp"));
        }
        Ok(())
    }
}

#[test]
fn test_compile_options() {
    let default = CompileOptions::default();
    assert_eq!(default.handling_for(true).unwrap(), ParamHandling::Symbolic);
    assert_eq!(default.handling_for(false).unwrap(), ParamHandling::Substituted);

    let enforce = CompileOptionsBuilder::default()
        .enforce_dpp(true)
        .build()
        .unwrap();
    assert_eq!(enforce.handling_for(true).unwrap(), ParamHandling::Symbolic);
    assert!(matches!(enforce.handling_for(false), Err(KronError::NotDpp)));

    let ignore = CompileOptionsBuilder::default()
        .ignore_dpp(true)
        .build()
        .unwrap();
    assert_eq!(ignore.handling_for(true).unwrap(), ParamHandling::Substituted);

    let both = CompileOptionsBuilder::default()
        .enforce_dpp(true)
        .ignore_dpp(true)
        .build();
    assert!(both.is_err());
}
