//! Unsupervised category formation (fuzzy ART).
//!
//! The category module owns a growable set of prototype vectors over the
//! complement-coded input space and runs the competitive search with
//! vigilance-driven resonance and reset:
//!
//! 1. [`present`](CategoryModule::present) stores the raw and
//!    complement-coded forms of an input and marks every category eligible.
//! 2. [`find_category`](CategoryModule::find_category) repeatedly picks the
//!    eligible category with the highest choice-function value and tests it
//!    for resonance; a failing category is inhibited for the rest of the
//!    search (the ART reset), so the search always terminates.
//! 3. [`learn`](CategoryModule::learn) blends the winning prototype toward
//!    the input and updates the category centroid by a running mean.
//!
//! Category identifiers are append-only indices. The count of categories
//! never shrinks except through [`restore`](CategoryModule::restore), which
//! the orchestrator uses to roll back a rejected training pair.
//!
//! Per-category representative counts and centroids are exact when the
//! module runs as a pure clustering procedure; when driven through the
//! supervised match-tracking loop they are exact only because rollback
//! restores them together with the prototypes.

use crate::error::{FamrError, Result};
use crate::vector::FuzzyVector;
use serde::{Deserialize, Serialize};

/// Serializable copy of the growable category state, used both for
/// persistence and as the rollback half of a training transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub prototypes: Vec<FuzzyVector>,
    pub centroids: Vec<FuzzyVector>,
    pub counts: Vec<usize>,
}

/// Fuzzy ART category module.
#[derive(Clone, Debug)]
pub struct CategoryModule {
    baseline_vigilance: f64,
    beta: f64,
    choice_alpha: f64,
    vigilance_delta: f64,

    /// Current vigilance; raised by match tracking, reset per pattern.
    rho: f64,

    /// Prototype weight vectors, complement-coded space (2x input dim).
    prototypes: Vec<FuzzyVector>,
    /// Category centroids in raw input space.
    centroids: Vec<FuzzyVector>,
    /// Representative count per category, starts at 1 on creation.
    counts: Vec<usize>,

    /// Per-search choice-function values; transient.
    choice: Vec<f64>,
    /// Per-search eligibility flags; cleared by reset, transient.
    eligible: Vec<bool>,

    coded_input: Option<FuzzyVector>,
    raw_input: Option<FuzzyVector>,
}

impl CategoryModule {
    pub fn new(baseline_vigilance: f64, beta: f64, choice_alpha: f64, vigilance_delta: f64) -> Self {
        Self {
            baseline_vigilance,
            beta,
            choice_alpha,
            vigilance_delta,
            rho: baseline_vigilance,
            prototypes: Vec::new(),
            centroids: Vec::new(),
            counts: Vec::new(),
            choice: Vec::new(),
            eligible: Vec::new(),
            coded_input: None,
            raw_input: None,
        }
    }

    /// Present a new scaled input: store its raw and complement-coded
    /// forms and mark every existing category eligible.
    ///
    /// The input must already be scaled to [0, 1] (checked by the vector
    /// constructor; the cheap per-component range check also runs under
    /// `debug_assert!` before construction to surface the offending value).
    pub fn present(&mut self, scaled_input: &[f64]) -> Result<()> {
        debug_assert!(
            scaled_input.iter().all(|v| (0.0..=1.0).contains(v)),
            "present() requires an input scaled to [0, 1]"
        );
        if scaled_input.is_empty() {
            return Err(FamrError::EmptyInput("present() given an empty input".into()));
        }
        let raw = FuzzyVector::new(scaled_input)?;
        let coded = raw.complement_code();
        if let Some(first) = self.prototypes.first() {
            if coded.len() != first.len() {
                return Err(FamrError::DimensionMismatch {
                    expected: first.len() / 2,
                    got: scaled_input.len(),
                });
            }
        }
        self.raw_input = Some(raw);
        self.coded_input = Some(coded);
        self.choice = vec![-1.0; self.prototypes.len()];
        self.eligible = vec![true; self.prototypes.len()];
        Ok(())
    }

    /// Choice function for every category:
    /// `T[j] = |x AND w_j| / (alpha + |w_j|)`.
    fn compute_choice(&mut self) {
        let x = self.coded_input.as_ref().expect("no input presented");
        for (j, w) in self.prototypes.iter().enumerate() {
            self.choice[j] = x.and(w).norm() / (self.choice_alpha + w.norm());
        }
    }

    /// Competitive search with reset.
    ///
    /// Repeatedly picks the eligible category with maximal choice value and
    /// tests resonance: `|x AND w_J| >= rho * |x|`. A category failing the
    /// test is inhibited for the current input and the next-best candidate
    /// is tried. Returns `None` when no eligible category remains.
    pub fn find_category(&mut self) -> Option<usize> {
        self.compute_choice();
        let x = self.coded_input.as_ref().expect("no input presented");
        let x_norm = x.norm();
        loop {
            let mut winner = None;
            let mut t_max = -1.0;
            for j in 0..self.prototypes.len() {
                if self.eligible[j] && self.choice[j] > t_max {
                    winner = Some(j);
                    t_max = self.choice[j];
                }
            }
            let j = winner?;
            if x.and(&self.prototypes[j]).norm() >= self.rho * x_norm {
                return Some(j);
            }
            // ART reset: inhibit and retry with the next-best candidate
            self.eligible[j] = false;
        }
    }

    /// Append a new category: prototype = complement-coded input,
    /// centroid = raw input, representative count = 1.
    pub fn create_category(&mut self) {
        let coded = self.coded_input.as_ref().expect("no input presented");
        let raw = self.raw_input.as_ref().expect("no input presented");
        self.prototypes.push(coded.clone());
        self.centroids.push(raw.clone());
        self.counts.push(1);
        self.choice.push(-1.0);
        self.eligible.push(true);
        self.assert_in_sync();
    }

    /// Learning update for category `j`:
    /// `w_j <- beta * (x AND w_j) + (1 - beta) * w_j`, then a
    /// Kohonen-style running-mean centroid update using the
    /// post-increment representative count, so each member weighs equally
    /// regardless of arrival order.
    pub fn learn(&mut self, j: usize) {
        let x = self.coded_input.as_ref().expect("no input presented");
        let raw = self.raw_input.as_ref().expect("no input presented");

        let blended = x
            .and(&self.prototypes[j])
            .scale(self.beta)
            .sum(&self.prototypes[j].scale(1.0 - self.beta));
        self.prototypes[j] = blended;

        self.counts[j] += 1;
        let step = raw
            .diff(&self.centroids[j])
            .scale(1.0 / self.counts[j] as f64);
        let moved = self.centroids[j].sum(&step);
        self.centroids[j] = moved;
    }

    /// Match tracking: raise vigilance just above the current match ratio
    /// of category `j`, forcing it to fail resonance on the next pass.
    pub fn increase_rho(&mut self, j: usize) {
        let x = self.coded_input.as_ref().expect("no input presented");
        self.rho = x.and(&self.prototypes[j]).norm() / x.norm() + self.vigilance_delta;
    }

    /// Reset vigilance to the baseline. Called once per training pattern.
    pub fn restore_rho(&mut self) {
        self.rho = self.baseline_vigilance;
    }

    /// Force vigilance to zero so the first competitively chosen category
    /// always resonates. Used for inference.
    pub fn set_rho_to_zero(&mut self) {
        self.rho = 0.0;
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn num_categories(&self) -> usize {
        self.prototypes.len()
    }

    /// Representative count per category. Exact for pure clustering use;
    /// see the module docs for the supervised caveat.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Centroid of category `j` in raw input space, as a defensive copy.
    pub fn centroid(&self, j: usize) -> Vec<f64> {
        self.centroids[j].as_slice().to_vec()
    }

    pub fn prototype(&self, j: usize) -> &FuzzyVector {
        &self.prototypes[j]
    }

    /// Copy the growable state for rollback or persistence. The transient
    /// per-search arrays and the current input are deliberately excluded.
    pub fn snapshot(&self) -> CategorySnapshot {
        CategorySnapshot {
            prototypes: self.prototypes.clone(),
            centroids: self.centroids.clone(),
            counts: self.counts.clone(),
        }
    }

    /// Overwrite the growable state from a snapshot, resizing the
    /// transient arrays to match.
    pub fn restore(&mut self, snapshot: CategorySnapshot) {
        self.prototypes = snapshot.prototypes;
        self.centroids = snapshot.centroids;
        self.counts = snapshot.counts;
        self.choice = vec![-1.0; self.prototypes.len()];
        self.eligible = vec![false; self.prototypes.len()];
        self.assert_in_sync();
    }

    fn assert_in_sync(&self) {
        assert!(
            self.prototypes.len() == self.centroids.len()
                && self.prototypes.len() == self.counts.len(),
            "category parallel arrays out of sync: {} prototypes, {} centroids, {} counts",
            self.prototypes.len(),
            self.centroids.len(),
            self.counts.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(rho: f64, beta: f64) -> CategoryModule {
        CategoryModule::new(rho, beta, 1e-4, 1e-4)
    }

    #[test]
    fn test_find_category_on_empty_module() {
        let mut m = module(0.5, 1.0);
        m.present(&[0.3, 0.7]).unwrap();
        assert_eq!(m.find_category(), None);
    }

    #[test]
    fn test_create_category_initial_state() {
        let mut m = module(0.5, 1.0);
        m.present(&[0.3, 0.7]).unwrap();
        m.create_category();
        assert_eq!(m.num_categories(), 1);
        assert_eq!(m.counts(), &[1]);
        assert_eq!(m.centroid(0), vec![0.3, 0.7]);
        assert_eq!(m.prototype(0).as_slice(), &[0.3, 0.7, 0.7, 0.30000000000000004]);
    }

    #[test]
    fn test_resonance_holds_for_returned_category() {
        let mut m = module(0.9, 1.0);
        m.present(&[0.1]).unwrap();
        m.create_category();
        m.present(&[0.12]).unwrap();
        if let Some(j) = m.find_category() {
            let x = FuzzyVector::new(&[0.12]).unwrap().complement_code();
            let match_norm = x.and(m.prototype(j)).norm();
            assert!(
                match_norm >= m.rho() * x.norm(),
                "resonance must hold at return time: {} < {}",
                match_norm,
                m.rho() * x.norm()
            );
        }
    }

    #[test]
    fn test_reset_inhibits_non_resonant_winner() {
        let mut m = module(0.9, 1.0);
        m.present(&[0.1]).unwrap();
        m.create_category();
        // A distant input cannot resonate at high vigilance, so the only
        // category is inhibited and the search reports no winner.
        m.present(&[0.9]).unwrap();
        assert_eq!(m.find_category(), None);
    }

    #[test]
    fn test_fast_learning_shrinks_prototype() {
        let mut m = module(0.0, 1.0);
        m.present(&[0.5]).unwrap();
        m.create_category();
        m.present(&[0.3]).unwrap();
        let j = m.find_category().expect("rho 0 must resonate");
        m.learn(j);
        // beta = 1: w <- x AND w = [min(0.3, 0.5), min(0.7, 0.5)]
        assert_eq!(m.prototype(0).as_slice(), &[0.3, 0.5]);
    }

    #[test]
    fn test_centroid_running_mean_ignores_order() {
        let mut m = module(0.0, 0.5);
        m.present(&[0.2]).unwrap();
        m.create_category();
        for v in [0.4, 0.6, 0.8] {
            m.present(&[v]).unwrap();
            let j = m.find_category().unwrap();
            m.learn(j);
        }
        // Mean of 0.2, 0.4, 0.6, 0.8 with the post-increment count rule
        assert!((m.centroid(0)[0] - 0.5).abs() < 1e-12);
        assert_eq!(m.counts(), &[4]);
    }

    #[test]
    fn test_increase_rho_forces_reset() {
        let mut m = module(0.0, 1.0);
        m.present(&[0.5]).unwrap();
        m.create_category();
        m.present(&[0.4]).unwrap();
        let j = m.find_category().unwrap();
        m.increase_rho(j);
        // The raised vigilance sits just above J's match ratio, so J now
        // fails resonance and, being the only category, the search fails.
        assert_eq!(m.find_category(), None);
        m.restore_rho();
        assert_eq!(m.rho(), 0.0);
    }

    #[test]
    fn test_rho_zero_always_resonates() {
        let mut m = module(0.95, 1.0);
        m.present(&[0.1]).unwrap();
        m.create_category();
        m.present(&[0.9]).unwrap();
        m.set_rho_to_zero();
        assert_eq!(m.find_category(), Some(0));
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut m = module(0.0, 1.0);
        m.present(&[0.5, 0.5]).unwrap();
        m.create_category();
        let snap = m.snapshot();

        m.present(&[0.1, 0.9]).unwrap();
        let j = m.find_category().unwrap();
        m.learn(j);
        assert_ne!(m.prototype(0).as_slice(), snap.prototypes[0].as_slice());

        m.restore(snap.clone());
        assert_eq!(m.prototype(0).as_slice(), snap.prototypes[0].as_slice());
        assert_eq!(m.counts(), snap.counts.as_slice());
        assert_eq!(m.centroid(0), snap.centroids[0].as_slice());
    }

    #[test]
    fn test_present_rejects_dimension_change() {
        let mut m = module(0.5, 1.0);
        m.present(&[0.3, 0.7]).unwrap();
        m.create_category();
        assert!(matches!(
            m.present(&[0.3]),
            Err(FamrError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }
}
