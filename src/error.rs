//! Error types for FAMR.

use thiserror::Error;

/// FAMR error types.
///
/// All variants are fatal for the operation attempted: the caller must not
/// proceed with the value that produced them. Learnability rejection and
/// the no-category search outcome are *not* errors; they are ordinary
/// control-flow results (`Ok(false)` / `None`).
#[derive(Error, Debug)]
pub enum FamrError {
    /// Fuzzy vector component outside the unit interval
    #[error("Component {value} at index {index} is outside [0, 1]")]
    ComponentOutOfRange { index: usize, value: f64 },

    /// Invalid vector dimensions
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Relevance weight must be strictly positive
    #[error("Relevance weight must be > 0, got {0}")]
    InvalidRelevance(f64),

    /// Scaling bounds are degenerate or reversed
    #[error("Scaling bounds must satisfy min < max, got ({min}, {max})")]
    InvalidScalingBounds { min: f64, max: f64 },

    /// Input data lies outside the configured scaling bounds
    #[error("Input value {value} is outside scaling bounds [{min}, {max}]")]
    ValueOutsideBounds { value: f64, min: f64, max: f64 },

    /// Class label outside 0..num_classes
    #[error("Class label {label} is out of range for {num_classes} classes")]
    ClassOutOfRange { label: usize, num_classes: usize },

    /// Training pattern has no class label attached
    #[error("Training pattern has no class label")]
    MissingClassLabel,

    /// Rejected model configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for FAMR operations.
pub type Result<T> = std::result::Result<T, FamrError>;
