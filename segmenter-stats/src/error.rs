//! Stats error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Invalid cluster count: {0} (must be at least 1)")]
    InvalidK(usize),

    #[error("Not enough samples for {k} clusters: {samples} available")]
    TooFewSamples { samples: usize, k: usize },

    #[error("Silhouette is undefined for k={k} with {samples} samples (requires 2 <= k < samples)")]
    SilhouetteUndefined { samples: usize, k: usize },

    #[error("Dimension mismatch: expected {expected} columns, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Result type alias for stats operations.
pub type StatsResult<T> = Result<T, StatsError>;
