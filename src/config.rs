//! Model configuration.

use crate::error::{FamrError, Result};
use serde::{Deserialize, Serialize};

/// Construction-time configuration for a [`Famr`](crate::Famr) model.
///
/// The two epsilons (`choice_alpha`, `vigilance_delta`) are the tuning
/// constants of the search: `choice_alpha` breaks choice-function ties
/// toward categories with smaller weight norm and keeps the denominator
/// positive; `vigilance_delta` is the margin added when match tracking
/// raises vigilance. Both default to 1e-4.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FamrConfig {
    /// Baseline vigilance for the category module, in [0, 1].
    pub baseline_vigilance: f64,
    /// Category learning rate, in [0, 1]. 1.0 = fast learning.
    pub beta: f64,
    /// Consistency threshold for the association field, in [0, 1].
    pub association_vigilance: f64,
    /// Training passes over the pattern sequence.
    pub epochs: usize,
    /// Lower scaling bound for raw inputs.
    pub input_min: f64,
    /// Upper scaling bound for raw inputs.
    pub input_max: f64,
    /// Number of output classes; labels are 0..num_classes-1.
    pub num_classes: usize,
    /// Choice-function epsilon.
    pub choice_alpha: f64,
    /// Match-tracking vigilance increment.
    pub vigilance_delta: f64,
}

impl Default for FamrConfig {
    fn default() -> Self {
        Self {
            baseline_vigilance: 0.75,
            beta: 1.0,
            association_vigilance: 0.9,
            epochs: 1,
            input_min: 0.0,
            input_max: 1.0,
            num_classes: 2,
            choice_alpha: 1e-4,
            vigilance_delta: 1e-4,
        }
    }
}

impl FamrConfig {
    /// Validate all fields. Called by `Famr::new`; fails fast so an
    /// invalid model is never constructed.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.baseline_vigilance) {
            return Err(FamrError::InvalidConfig(format!(
                "baseline_vigilance must be in [0, 1], got {}",
                self.baseline_vigilance
            )));
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(FamrError::InvalidConfig(format!(
                "beta must be in [0, 1], got {}",
                self.beta
            )));
        }
        if !(0.0..=1.0).contains(&self.association_vigilance) {
            return Err(FamrError::InvalidConfig(format!(
                "association_vigilance must be in [0, 1], got {}",
                self.association_vigilance
            )));
        }
        if self.epochs == 0 {
            return Err(FamrError::InvalidConfig("epochs must be >= 1".into()));
        }
        if self.input_max <= self.input_min {
            return Err(FamrError::InvalidScalingBounds {
                min: self.input_min,
                max: self.input_max,
            });
        }
        if self.num_classes == 0 {
            return Err(FamrError::InvalidConfig("num_classes must be >= 1".into()));
        }
        if self.choice_alpha <= 0.0 || self.vigilance_delta <= 0.0 {
            return Err(FamrError::InvalidConfig(
                "choice_alpha and vigilance_delta must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FamrConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let mut cfg = FamrConfig::default();
        cfg.beta = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = FamrConfig::default();
        cfg.epochs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = FamrConfig::default();
        cfg.input_min = 1.0;
        cfg.input_max = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(FamrError::InvalidScalingBounds { .. })
        ));

        let mut cfg = FamrConfig::default();
        cfg.num_classes = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = FamrConfig::default();
        cfg.choice_alpha = 0.0;
        assert!(cfg.validate().is_err());
    }
}
