//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

use segmenter_stats::StatsError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("No rows survived cleaning and outlier removal; check the uploaded file")]
    EmptyAfterCleaning,

    #[error("Invalid cluster count: {0} (expected a value between 2 and 10)")]
    InvalidClusterCount(usize),

    #[error("Not enough products for {k} clusters: only {products} distinct products after cleaning")]
    TooFewProducts { products: usize, k: usize },

    #[error("Statistical routine failed: {0}")]
    Stats(#[from] StatsError),

    #[error("Failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
