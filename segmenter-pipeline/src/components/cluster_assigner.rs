use log::info;
use ndarray::Array2;

use segmenter_stats::kmeans::{self, KMeansConfig, DEFAULT_SEED};
use segmenter_stats::scaling::StandardScaler;
use segmenter_stats::StatsError;

use crate::error::{PipelineError, PipelineResult};
use crate::types::ProductAggregate;

/// The four features products are clustered on. Sales frequency enters
/// unlogged; the other three are `ln(1+x)` transforms.
pub const FEATURE_COUNT: usize = 4;

/// Outcome of the clustering stage.
#[derive(Debug, Clone)]
pub struct ClusterAssignment {
    /// Cluster id per product, aligned with the aggregate slice.
    pub labels: Vec<usize>,
    pub inertia: f64,
    /// Standardized feature matrix, reused by the diagnostics sweep.
    pub scaled_features: Array2<f64>,
}

/// Standardizes the product features and runs seeded K-Means.
#[derive(Debug, Clone, Copy)]
pub struct ClusterAssigner {
    pub k: usize,
    pub seed: u64,
}

impl ClusterAssigner {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: DEFAULT_SEED,
        }
    }

    pub fn assign(&self, products: &[ProductAggregate]) -> PipelineResult<ClusterAssignment> {
        let features = feature_matrix(products);
        let scaled = StandardScaler::fit_transform(features.view()).map_err(map_stats_err)?;

        let config = KMeansConfig {
            seed: self.seed,
            ..KMeansConfig::new(self.k)
        };
        let fit = kmeans::fit(scaled.view(), &config).map_err(|e| match e {
            StatsError::TooFewSamples { samples, k } => {
                PipelineError::TooFewProducts { products: samples, k }
            }
            other => PipelineError::Stats(other),
        })?;

        info!(
            "K-Means converged: k={} inertia={:.4} iterations={}",
            self.k, fit.inertia, fit.iterations
        );

        Ok(ClusterAssignment {
            labels: fit.labels,
            inertia: fit.inertia,
            scaled_features: scaled,
        })
    }
}

fn map_stats_err(err: StatsError) -> PipelineError {
    match err {
        StatsError::EmptyInput => PipelineError::EmptyAfterCleaning,
        other => PipelineError::Stats(other),
    }
}

/// Build the raw feature matrix:
/// `[total_quantity_log, total_revenue_log, sales_frequency, avg_revenue_log]`.
pub fn feature_matrix(products: &[ProductAggregate]) -> Array2<f64> {
    let mut data = Array2::<f64>::zeros((products.len(), FEATURE_COUNT));
    for (i, p) in products.iter().enumerate() {
        data[[i, 0]] = p.total_quantity_log;
        data[[i, 1]] = p.total_revenue_log;
        data[[i, 2]] = p.sales_frequency as f64;
        data[[i, 3]] = p.avg_revenue_log;
    }
    data
}
