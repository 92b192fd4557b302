//! The FAMR model: match-tracking training and Bayesian inference.
//!
//! [`Famr`] couples a [`CategoryModule`] and a [`MapField`] through the
//! match-tracking protocol. Each training pair is a transaction: the
//! growable state of both modules is snapshotted before the pair is
//! presented, committed on acceptance, and restored byte-for-byte when the
//! pair turns out to be unlearnable under the current state.
//!
//! # Example
//!
//! ```rust
//! use famr::{Famr, FamrConfig, Pattern};
//!
//! let config = FamrConfig {
//!     baseline_vigilance: 0.9,
//!     num_classes: 2,
//!     ..FamrConfig::default()
//! };
//! let mut model = Famr::new(config)?;
//!
//! let mut patterns = vec![
//!     Pattern::labeled(vec![0.1], 0),
//!     Pattern::labeled(vec![0.9], 1),
//! ];
//! model.train(&mut patterns)?;
//!
//! let mut probe = Pattern::new(vec![0.1]);
//! assert_eq!(model.classify(&mut probe)?, Some(0));
//! # Ok::<(), famr::FamrError>(())
//! ```

use crate::category::{CategoryModule, CategorySnapshot};
use crate::config::FamrConfig;
use crate::error::{FamrError, Result};
use crate::map_field::{MapField, MapFieldSnapshot};
use crate::pattern::Pattern;
use crate::vector::FuzzyVector;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Serializable snapshot of a whole model for persistence.
///
/// The per-module halves double as the transactional unit of training:
/// `train_pair` captures them before presenting a pair and restores them
/// on rejection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub config: FamrConfig,
    pub categories: CategorySnapshot,
    pub map_field: MapFieldSnapshot,
    pub processed_pairs: u64,
}

/// Incremental supervised classifier built on a modified fuzzy ARTMAP.
#[derive(Clone, Debug)]
pub struct Famr {
    config: FamrConfig,
    categories: CategoryModule,
    map_field: MapField,
    /// Historical count of training pairs presented, across all `train`
    /// calls; rejected pairs are counted too.
    processed_pairs: u64,
}

impl Famr {
    /// Create a model from a validated configuration.
    pub fn new(config: FamrConfig) -> Result<Self> {
        config.validate()?;
        let categories = CategoryModule::new(
            config.baseline_vigilance,
            config.beta,
            config.choice_alpha,
            config.vigilance_delta,
        );
        let map_field = MapField::new(config.association_vigilance, config.num_classes);
        Ok(Self {
            config,
            categories,
            map_field,
            processed_pairs: 0,
        })
    }

    /// Train on an ordered pattern sequence for the configured number of
    /// epochs. Pattern order is preserved across epochs.
    ///
    /// Every pattern is scaled once up front (idempotent). A pattern
    /// without a class label is a fatal error. Aggregate counts are
    /// reported through `tracing`, not through the return value; a
    /// rejected pair is a normal outcome, not an error.
    pub fn train(&mut self, patterns: &mut [Pattern]) -> Result<()> {
        info!(
            patterns = patterns.len(),
            epochs = self.config.epochs,
            "training classifier"
        );
        for pattern in patterns.iter_mut() {
            pattern.scale_input(self.config.input_min, self.config.input_max)?;
        }

        let mut n_pairs = 0u64;
        let mut n_rejected = 0u64;
        for epoch in 0..self.config.epochs {
            for pattern in patterns.iter() {
                let scaled = pattern
                    .scaled_input()
                    .expect("pattern scaled above")
                    .to_vec();
                let class = pattern.class_index().ok_or(FamrError::MissingClassLabel)?;
                let q_t = pattern.weight();

                if !self.train_pair(&scaled, class, q_t)? {
                    n_rejected += 1;
                    debug!(epoch, class, "pair rejected as unlearnable");
                }
                if epoch == 0 {
                    n_pairs += 1;
                    self.processed_pairs += 1;
                }
            }
        }
        info!(
            epochs = self.config.epochs,
            categories = self.categories.num_categories(),
            pairs = n_pairs,
            rejected = n_rejected,
            historical_pairs = self.processed_pairs,
            "training finished"
        );
        Ok(())
    }

    /// Run the transactional match-tracking protocol for one training
    /// pair. Returns `Ok(true)` when the pair was learned, `Ok(false)`
    /// when it was rejected and all state rolled back.
    pub fn train_pair(&mut self, scaled_input: &[f64], class: usize, q_t: f64) -> Result<bool> {
        if class >= self.config.num_classes {
            return Err(FamrError::ClassOutOfRange {
                label: class,
                num_classes: self.config.num_classes,
            });
        }
        if q_t <= 0.0 {
            return Err(FamrError::InvalidRelevance(q_t));
        }

        let category_snapshot = self.categories.snapshot();
        let map_snapshot = self.map_field.snapshot();

        self.categories.present(scaled_input)?;
        let target = FuzzyVector::one_hot(self.config.num_classes, class);
        self.categories.restore_rho();

        loop {
            let j = match self.categories.find_category() {
                Some(j) => j,
                None => {
                    self.categories.create_category();
                    self.map_field.add_row();
                    self.categories.num_categories() - 1
                }
            };
            if self.map_field.accept(&target, j) {
                self.categories.learn(j);
                self.map_field.learn(j, class, q_t);
                self.check_in_sync();
                return Ok(true);
            }
            // Match tracking: raise vigilance and retry; past 1 the pair
            // is unlearnable under current state, so roll everything back.
            self.categories.increase_rho(j);
            if self.categories.rho() > 1.0 {
                self.categories.restore(category_snapshot);
                self.map_field.restore(map_snapshot);
                self.check_in_sync();
                return Ok(false);
            }
        }
    }

    /// Classify one pattern, scaling it if needed. Returns the estimated
    /// class label, or `None` when the model has no categories yet.
    ///
    /// This is maximum-likelihood Bayesian classification: vigilance is
    /// forced to zero so the best-choice category always resonates, and
    /// the class with the largest estimated conditional probability in
    /// that category's association row wins.
    pub fn classify(&mut self, pattern: &mut Pattern) -> Result<Option<usize>> {
        pattern.scale_input(self.config.input_min, self.config.input_max)?;
        let scaled = pattern
            .scaled_input()
            .expect("pattern scaled above")
            .to_vec();
        self.classify_scaled(&scaled)
    }

    /// Classify an already-scaled input vector.
    pub fn classify_scaled(&mut self, scaled_input: &[f64]) -> Result<Option<usize>> {
        self.categories.set_rho_to_zero();
        self.categories.present(scaled_input)?;
        Ok(self
            .categories
            .find_category()
            .map(|j| self.map_field.row(j).pos_max()))
    }

    /// Estimated conditional probabilities P(class | input) for every
    /// class. Uniform when the model has no categories yet.
    pub fn class_probabilities(&mut self, scaled_input: &[f64]) -> Result<Vec<f64>> {
        self.categories.set_rho_to_zero();
        self.categories.present(scaled_input)?;
        Ok(match self.categories.find_category() {
            Some(j) => self.map_field.row(j).as_slice().to_vec(),
            None => vec![1.0 / self.config.num_classes as f64; self.config.num_classes],
        })
    }

    /// True when the model assigns the pattern its attached label.
    pub fn correctly_classifies(&mut self, pattern: &mut Pattern) -> Result<bool> {
        let label = pattern.class_index().ok_or(FamrError::MissingClassLabel)?;
        Ok(self.classify(pattern)? == Some(label))
    }

    /// Fraction of patterns classified correctly.
    pub fn accuracy(&mut self, patterns: &mut [Pattern]) -> Result<f64> {
        if patterns.is_empty() {
            return Err(FamrError::EmptyInput("accuracy on empty pattern set".into()));
        }
        let mut correct = 0usize;
        for pattern in patterns.iter_mut() {
            if self.correctly_classifies(pattern)? {
                correct += 1;
            }
        }
        Ok(correct as f64 / patterns.len() as f64)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    pub fn num_categories(&self) -> usize {
        self.categories.num_categories()
    }

    /// Representative count per category. Exact in pure clustering use;
    /// under supervised training it stays consistent because rejection
    /// rolls counts back together with the prototypes.
    pub fn category_counts(&self) -> &[usize] {
        self.categories.counts()
    }

    /// Centroid of category `j` in raw input space.
    pub fn centroid(&self, j: usize) -> Vec<f64> {
        self.categories.centroid(j)
    }

    /// Historical number of training pairs presented across all `train`
    /// calls, including rejected ones.
    pub fn processed_pairs(&self) -> u64 {
        self.processed_pairs
    }

    pub fn config(&self) -> &FamrConfig {
        &self.config
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Export the full model state.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            config: self.config.clone(),
            categories: self.categories.snapshot(),
            map_field: self.map_field.snapshot(),
            processed_pairs: self.processed_pairs,
        }
    }

    /// Rebuild a model from a snapshot.
    pub fn from_snapshot(snapshot: ModelSnapshot) -> Result<Self> {
        let mut model = Self::new(snapshot.config)?;
        model.categories.restore(snapshot.categories);
        model.map_field.restore(snapshot.map_field);
        model.processed_pairs = snapshot.processed_pairs;
        model.check_in_sync();
        Ok(model)
    }

    /// Persist to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string(&self.snapshot())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: ModelSnapshot = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Self::from_snapshot(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    /// One association row per category, always.
    fn check_in_sync(&self) {
        assert_eq!(
            self.categories.num_categories(),
            self.map_field.num_rows(),
            "category count and association row count diverged"
        );
    }
}
