//! Training and test patterns.
//!
//! A [`Pattern`] carries a raw input vector, its [0, 1]-scaled form
//! (computed once, on demand), an optional class label, and a relevance
//! weight. The model consumes the scaled form read-only; scaling a pattern
//! that is already scaled is a no-op.

use crate::error::{FamrError, Result};
use serde::{Deserialize, Serialize};

/// One input pattern, optionally labeled, with a relevance weight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pattern {
    input: Vec<f64>,
    scaled_input: Option<Vec<f64>>,
    class_index: Option<usize>,
    weight: f64,
}

impl Pattern {
    /// Create an unlabeled pattern with default relevance 1.0.
    pub fn new(input: Vec<f64>) -> Self {
        Self {
            input,
            scaled_input: None,
            class_index: None,
            weight: 1.0,
        }
    }

    /// Create a labeled pattern with default relevance 1.0.
    pub fn labeled(input: Vec<f64>, class_index: usize) -> Self {
        Self {
            input,
            scaled_input: None,
            class_index: Some(class_index),
            weight: 1.0,
        }
    }

    /// Attach a class label.
    pub fn set_class_index(&mut self, class_index: usize) {
        self.class_index = Some(class_index);
    }

    /// Set the relevance weight. Must be strictly positive.
    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        if weight <= 0.0 {
            return Err(FamrError::InvalidRelevance(weight));
        }
        self.weight = weight;
        Ok(())
    }

    /// Scale the raw input into [0, 1] using the given bounds.
    ///
    /// Idempotent: a second call leaves the scaled input unchanged. Fails
    /// if the bounds are degenerate or if any raw component lies outside
    /// them.
    pub fn scale_input(&mut self, input_min: f64, input_max: f64) -> Result<()> {
        if self.scaled_input.is_some() {
            return Ok(());
        }
        if input_max <= input_min {
            return Err(FamrError::InvalidScalingBounds {
                min: input_min,
                max: input_max,
            });
        }
        for &value in &self.input {
            if value < input_min || value > input_max {
                return Err(FamrError::ValueOutsideBounds {
                    value,
                    min: input_min,
                    max: input_max,
                });
            }
        }
        let range = input_max - input_min;
        self.scaled_input = Some(self.input.iter().map(|v| (v - input_min) / range).collect());
        Ok(())
    }

    /// The scaled input, or `None` if `scale_input` has not run yet.
    pub fn scaled_input(&self) -> Option<&[f64]> {
        self.scaled_input.as_deref()
    }

    /// The raw, unscaled input.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn input_dim(&self) -> usize {
        self.input.len()
    }

    pub fn is_scaled(&self) -> bool {
        self.scaled_input.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_input() {
        let mut p = Pattern::labeled(vec![0.0, 5.0, 10.0], 1);
        p.scale_input(0.0, 10.0).unwrap();
        assert_eq!(p.scaled_input().unwrap(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_scale_input_is_idempotent() {
        let mut p = Pattern::new(vec![2.0, 8.0]);
        p.scale_input(0.0, 10.0).unwrap();
        let first = p.scaled_input().unwrap().to_vec();
        // Different bounds on the second call must not rescale
        p.scale_input(0.0, 100.0).unwrap();
        assert_eq!(p.scaled_input().unwrap(), first.as_slice());
    }

    #[test]
    fn test_scale_rejects_bad_bounds() {
        let mut p = Pattern::new(vec![1.0]);
        assert!(matches!(
            p.scale_input(5.0, 5.0),
            Err(FamrError::InvalidScalingBounds { .. })
        ));
        assert!(matches!(
            p.scale_input(0.0, 0.5),
            Err(FamrError::ValueOutsideBounds { .. })
        ));
    }

    #[test]
    fn test_weight_must_be_positive() {
        let mut p = Pattern::new(vec![0.5]);
        assert!(p.set_weight(2.5).is_ok());
        assert_eq!(p.weight(), 2.5);
        assert!(matches!(
            p.set_weight(0.0),
            Err(FamrError::InvalidRelevance(_))
        ));
        assert!(p.set_weight(-1.0).is_err());
        // Failed set leaves the previous weight in place
        assert_eq!(p.weight(), 2.5);
    }

    #[test]
    fn test_defaults() {
        let p = Pattern::new(vec![0.1, 0.2]);
        assert_eq!(p.weight(), 1.0);
        assert_eq!(p.class_index(), None);
        assert!(!p.is_scaled());
        assert_eq!(p.input_dim(), 2);
    }
}
