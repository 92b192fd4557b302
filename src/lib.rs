//! # FAMR: Incremental Fuzzy ARTMAP Classification
//!
//! FAMR is an online supervised classifier built on a modified fuzzy
//! ARTMAP architecture: an unsupervised category-forming module coupled
//! through an association field to class labels, trained one pattern at a
//! time with a transactional accept/reject protocol.
//!
//! ## Quick Start
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
//! // Train online, pattern by pattern
//! let mut patterns = vec![
//!     Pattern::labeled(vec![0.1], 0),
//!     Pattern::labeled(vec![0.9], 1),
//! ];
//! model.train(&mut patterns)?;
//!
//! // Classify
//! let label = model.classify(&mut Pattern::new(vec![0.12]))?;
//! assert_eq!(label, Some(0));
//! # Ok::<(), famr::FamrError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Vigilance**: how similar an input must be to a category prototype
//!   to resonate; lower values give coarser categories.
//! - **Reset**: inhibiting a non-resonant category and retrying the search
//!   with the next-best candidate.
//! - **Match tracking**: raising vigilance after the association field
//!   rejects a pairing, forcing a different or new category.
//! - **Relevance**: a per-pattern weight controlling its influence on the
//!   estimated class-conditional distributions.
//!
//! Unlike the classical ARTMAP map field, the association field here is a
//! continuous conditional-association estimator: each category's row
//! converges toward the empirical class distribution of the patterns it
//! has absorbed, weighted by their relevance.

pub mod category;
pub mod config;
pub mod error;
pub mod map_field;
pub mod model;
pub mod pattern;
pub mod vector;

// Re-exports for convenience
pub use category::{CategoryModule, CategorySnapshot};
pub use config::FamrConfig;
pub use error::{FamrError, Result};
pub use map_field::{MapField, MapFieldSnapshot};
pub use model::{Famr, ModelSnapshot};
pub use pattern::Pattern;
pub use vector::FuzzyVector;
