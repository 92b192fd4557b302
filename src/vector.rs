//! Fuzzy vector algebra.
//!
//! A [`FuzzyVector`] is an ordered, fixed-length sequence of `f64` values,
//! each in [0, 1] at construction time. Every operation returns a new
//! vector; values are freely copied and never mutated in place.
//!
//! The one deliberate exception to the unit-interval rule: results of
//! `sum`, `diff`, and `scale` may leave [0, 1]. The category and map-field
//! update laws rely on these intermediate values, so operation results are
//! built without re-validation.

use crate::error::{FamrError, Result};
use serde::{Deserialize, Serialize};

/// A fixed-length fuzzy vector with components in [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuzzyVector {
    data: Vec<f64>,
}

impl FuzzyVector {
    /// Create from raw values, validating that every component is in [0, 1].
    pub fn new(values: &[f64]) -> Result<Self> {
        for (index, &value) in values.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(FamrError::ComponentOutOfRange { index, value });
            }
        }
        Ok(Self {
            data: values.to_vec(),
        })
    }

    /// Create a zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    /// Create a vector with every component set to `value`.
    pub fn filled(len: usize, value: f64) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Create a one-hot vector: 1.0 at `index`, 0.0 elsewhere.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn one_hot(len: usize, index: usize) -> Self {
        assert!(index < len, "one_hot index {} out of range {}", index, len);
        let mut data = vec![0.0; len];
        data[index] = 1.0;
        Self { data }
    }

    /// Internal constructor for operation results, which may leave [0, 1].
    fn from_raw(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Vector length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Fuzzy AND: elementwise minimum.
    ///
    /// # Panics
    /// Panics if the operands have different lengths.
    pub fn and(&self, other: &FuzzyVector) -> FuzzyVector {
        self.check_len(other, "and");
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a.min(b))
            .collect();
        Self::from_raw(data)
    }

    /// Fuzzy OR: elementwise maximum.
    ///
    /// # Panics
    /// Panics if the operands have different lengths.
    pub fn or(&self, other: &FuzzyVector) -> FuzzyVector {
        self.check_len(other, "or");
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a.max(b))
            .collect();
        Self::from_raw(data)
    }

    /// Elementwise sum. The result may leave [0, 1].
    pub fn sum(&self, other: &FuzzyVector) -> FuzzyVector {
        self.check_len(other, "sum");
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        Self::from_raw(data)
    }

    /// Elementwise difference. The result may leave [0, 1].
    pub fn diff(&self, other: &FuzzyVector) -> FuzzyVector {
        self.check_len(other, "diff");
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        Self::from_raw(data)
    }

    /// Multiply every component by a scalar. The result may leave [0, 1].
    pub fn scale(&self, x: f64) -> FuzzyVector {
        Self::from_raw(self.data.iter().map(|&v| x * v).collect())
    }

    /// L1 norm: sum of absolute component values.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).sum()
    }

    /// Complement coding (Carpenter 1992): a vector of twice the length,
    /// first half the original values, second half their complements.
    ///
    /// For any vector with components in [0, 1], the result has L1 norm
    /// exactly `len()`, which lets the norm of the AND of two
    /// complement-coded vectors act as a fuzzy subsethood measure.
    pub fn complement_code(&self) -> FuzzyVector {
        let mut data = Vec::with_capacity(2 * self.data.len());
        data.extend_from_slice(&self.data);
        data.extend(self.data.iter().map(|&v| 1.0 - v));
        Self::from_raw(data)
    }

    /// Index of the largest component, first occurrence winning on ties.
    ///
    /// # Panics
    /// Panics on an empty vector.
    pub fn pos_max(&self) -> usize {
        assert!(!self.data.is_empty(), "pos_max on empty vector");
        let mut index = 0;
        let mut max = self.data[0];
        for (i, &v) in self.data.iter().enumerate().skip(1) {
            if v > max {
                max = v;
                index = i;
            }
        }
        index
    }

    fn check_len(&self, other: &FuzzyVector, op: &str) {
        assert_eq!(
            self.data.len(),
            other.data.len(),
            "Length mismatch in '{}': {} vs {}",
            op,
            self.data.len(),
            other.data.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert!(FuzzyVector::new(&[0.0, 0.5, 1.0]).is_ok());
        assert!(matches!(
            FuzzyVector::new(&[0.5, 1.2]),
            Err(FamrError::ComponentOutOfRange { index: 1, .. })
        ));
        assert!(FuzzyVector::new(&[-0.1]).is_err());
    }

    #[test]
    fn test_and_or() {
        let a = FuzzyVector::new(&[0.2, 0.8, 0.5]).unwrap();
        let b = FuzzyVector::new(&[0.6, 0.3, 0.5]).unwrap();
        assert_eq!(a.and(&b).as_slice(), &[0.2, 0.3, 0.5]);
        assert_eq!(a.or(&b).as_slice(), &[0.6, 0.8, 0.5]);
    }

    #[test]
    #[should_panic(expected = "Length mismatch")]
    fn test_and_length_mismatch_panics() {
        let a = FuzzyVector::new(&[0.2, 0.8]).unwrap();
        let b = FuzzyVector::new(&[0.6]).unwrap();
        a.and(&b);
    }

    #[test]
    fn test_sum_diff_scale_leave_unit_interval() {
        let a = FuzzyVector::new(&[0.9, 0.1]).unwrap();
        let b = FuzzyVector::new(&[0.8, 0.5]).unwrap();
        assert_eq!(a.sum(&b).as_slice(), &[1.7000000000000002, 0.6]);
        let d = a.diff(&b);
        assert!((d.as_slice()[1] - (-0.4)).abs() < 1e-12);
        assert_eq!(a.scale(2.0).as_slice(), &[1.8, 0.2]);
    }

    #[test]
    fn test_norm_is_l1() {
        let d = FuzzyVector::new(&[0.2, 0.7]).unwrap().diff(&FuzzyVector::new(&[0.5, 0.1]).unwrap());
        // |-0.3| + |0.6| = 0.9
        assert!((d.norm() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_complement_code_norm_equals_len() {
        let a = FuzzyVector::new(&[0.1, 0.4, 0.9, 0.0, 1.0]).unwrap();
        let coded = a.complement_code();
        assert_eq!(coded.len(), 2 * a.len());
        assert!((coded.norm() - a.len() as f64).abs() < 1e-12);
        assert_eq!(&coded.as_slice()[..5], a.as_slice());
        assert!((coded.as_slice()[5] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_pos_max_first_occurrence_wins() {
        let a = FuzzyVector::new(&[0.3, 0.7, 0.7, 0.1]).unwrap();
        assert_eq!(a.pos_max(), 1);
    }

    #[test]
    fn test_one_hot() {
        let v = FuzzyVector::one_hot(3, 2);
        assert_eq!(v.as_slice(), &[0.0, 0.0, 1.0]);
        assert_eq!(v.norm(), 1.0);
    }
}
