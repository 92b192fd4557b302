//! Association field: the supervised consistency gate and the
//! relevance-weighted conditional-association estimator.
//!
//! Unlike the classical binary ARTMAP inter-ART map, each row here is a
//! probability-like vector over output classes. [`learn`](MapField::learn)
//! is an online weighted running average of one-hot class indicators,
//! weighted by cumulative relevance, so a row converges toward the
//! empirical class-conditional distribution for its category rather than
//! toward a 0/1 association.

use crate::vector::FuzzyVector;
use serde::{Deserialize, Serialize};

/// Serializable copy of the growable association state, used both for
/// persistence and as the rollback half of a training transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapFieldSnapshot {
    pub rows: Vec<FuzzyVector>,
    pub relevance_totals: Vec<f64>,
}

/// Association field mapping input categories to class distributions.
#[derive(Clone, Debug)]
pub struct MapField {
    /// Consistency threshold rho_ab.
    vigilance: f64,
    num_classes: usize,
    /// One probability-like row per input category.
    rows: Vec<FuzzyVector>,
    /// Cumulative relevance mass routed through each category.
    relevance_totals: Vec<f64>,
}

impl MapField {
    pub fn new(vigilance: f64, num_classes: usize) -> Self {
        Self {
            vigilance,
            num_classes,
            rows: Vec::new(),
            relevance_totals: Vec::new(),
        }
    }

    /// Consistency test for a proposed (target, category) association:
    /// accept iff `|target AND row_j| * num_classes >= rho_ab * |target|`.
    ///
    /// `target` is the one-hot class vector for classification use.
    pub fn accept(&self, target: &FuzzyVector, j: usize) -> bool {
        let activation = target.and(&self.rows[j]);
        activation.norm() * self.num_classes as f64 >= self.vigilance * target.norm()
    }

    /// Relevance-weighted update of row `j` toward the one-hot indicator
    /// of class `k`:
    ///
    /// ```text
    /// Q[j] += q_t
    /// row_j += (q_t / Q[j]) * (onehot(k) - row_j)
    /// ```
    ///
    /// Applied only after [`accept`](MapField::accept) has passed.
    pub fn learn(&mut self, j: usize, k: usize, q_t: f64) {
        self.relevance_totals[j] += q_t;
        let factor = q_t / self.relevance_totals[j];
        let target = FuzzyVector::one_hot(self.num_classes, k);
        let updated = self.rows[j].sum(&target.diff(&self.rows[j]).scale(factor));
        self.rows[j] = updated;
    }

    /// Append a row for a newly created input category, initialized to the
    /// uniform distribution, with zero accumulated relevance.
    pub fn add_row(&mut self) {
        self.rows
            .push(FuzzyVector::filled(self.num_classes, 1.0 / self.num_classes as f64));
        self.relevance_totals.push(0.0);
        self.assert_in_sync();
    }

    /// Defensive copy of row `j`.
    pub fn row(&self, j: usize) -> FuzzyVector {
        self.rows[j].clone()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn relevance_total(&self, j: usize) -> f64 {
        self.relevance_totals[j]
    }

    /// Copy the growable state for rollback or persistence.
    pub fn snapshot(&self) -> MapFieldSnapshot {
        MapFieldSnapshot {
            rows: self.rows.clone(),
            relevance_totals: self.relevance_totals.clone(),
        }
    }

    /// Overwrite the growable state from a snapshot.
    pub fn restore(&mut self, snapshot: MapFieldSnapshot) {
        self.rows = snapshot.rows;
        self.relevance_totals = snapshot.relevance_totals;
        self.assert_in_sync();
    }

    fn assert_in_sync(&self) {
        assert_eq!(
            self.rows.len(),
            self.relevance_totals.len(),
            "association rows and relevance totals out of sync"
        );
    }
}
