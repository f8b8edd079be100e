use std::time::Instant;

use chrono::Utc;
use log::info;

use segmenter_stats::kmeans::DEFAULT_SEED;
use segmenter_stats::sweep::sweep_k;

use crate::components::cluster_assigner::ClusterAssigner;
use crate::components::iqr_outlier_filter::IqrOutlierFilter;
use crate::components::performance_labeler::label_clusters;
use crate::components::positive_values_filter::PositiveValuesFilter;
use crate::components::product_aggregator::aggregate_products;
use crate::components::top_products_selector::top_products_per_cluster;
use crate::error::{PipelineError, PipelineResult};
use crate::filter::RowFilter;
use crate::sales_loader::SalesRow;
use crate::types::{
    AnalysisReport, CleaningStats, KDiagnosticReport, PerformanceTier, ScatterPoint, TierCount,
};

/// Bounds for the user-selectable cluster count.
pub const K_MIN: usize = 2;
pub const K_MAX: usize = 10;
pub const DEFAULT_K: usize = 4;

/// How many products each cluster's top list shows.
pub const TOP_PRODUCTS_PER_CLUSTER: usize = 5;

/// The product segmentation pipeline.
///
/// Pipeline flow:
/// 1. PositiveValuesFilter drops missing/non-positive rows
/// 2. IqrOutlierFilter trims Price outliers, then Amount outliers
/// 3. aggregate_products rolls rows up to per-product features
/// 4. ClusterAssigner standardizes and runs seeded K-Means
/// 5. sweep_k collects elbow/silhouette diagnostics for k = 2..=10
/// 6. label_clusters ranks clusters by mean revenue into tiers
/// 7. top_products_per_cluster picks each cluster's top 5 by revenue
pub struct SegmentationPipeline {
    filters: Vec<Box<dyn RowFilter<SalesRow>>>,
    assigner: ClusterAssigner,
    top_n: usize,
}

impl SegmentationPipeline {
    /// Create a pipeline for a user-selected cluster count.
    pub fn new(k: usize) -> PipelineResult<Self> {
        if !(K_MIN..=K_MAX).contains(&k) {
            return Err(PipelineError::InvalidClusterCount(k));
        }
        let filters: Vec<Box<dyn RowFilter<SalesRow>>> = vec![
            Box::new(PositiveValuesFilter),
            Box::new(IqrOutlierFilter::price()),
            Box::new(IqrOutlierFilter::amount()),
        ];
        Ok(Self {
            filters,
            assigner: ClusterAssigner::new(k),
            top_n: TOP_PRODUCTS_PER_CLUSTER,
        })
    }

    /// Run the full analysis over loaded transaction rows.
    ///
    /// Stateless: every invocation recomputes everything, matching the
    /// per-interaction re-run model of the dashboard.
    pub fn run(&self, rows: Vec<SalesRow>) -> PipelineResult<AnalysisReport> {
        let start = Instant::now();
        let rows_loaded = rows.len();

        let mut current = rows;
        let mut rows_after_cleaning = 0;
        for (stage, filter) in self.filters.iter().enumerate() {
            let result = filter.filter(current)?;
            info!(
                "{}: kept {} rows, removed {}",
                filter.name(),
                result.kept.len(),
                result.removed.len()
            );
            current = result.kept;
            if stage == 0 {
                rows_after_cleaning = current.len();
            }
        }
        let rows_after_outlier_removal = current.len();
        if current.is_empty() {
            return Err(PipelineError::EmptyAfterCleaning);
        }

        let products = aggregate_products(&current);
        info!("{} distinct products after aggregation", products.len());

        let assignment = self.assigner.assign(&products)?;

        let diagnostics: Vec<KDiagnosticReport> =
            sweep_k(assignment.scaled_features.view(), K_MIN..=K_MAX, DEFAULT_SEED)?
                .into_iter()
                .map(|d| KDiagnosticReport {
                    k: d.k,
                    inertia: d.inertia,
                    silhouette: d.silhouette,
                })
                .collect();

        let (segmented, cluster_summaries) =
            label_clusters(products, &assignment.labels, self.assigner.k);

        let cluster_order: Vec<usize> = cluster_summaries.iter().map(|s| s.cluster).collect();
        let top_products = top_products_per_cluster(&segmented, &cluster_order, self.top_n);

        let scatter: Vec<ScatterPoint> = segmented
            .iter()
            .map(|p| ScatterPoint {
                revenue_log: p.total_revenue_log,
                quantity_log: p.total_quantity_log,
                cluster: p.cluster,
            })
            .collect();

        let tier_distribution: Vec<TierCount> = [
            PerformanceTier::Top,
            PerformanceTier::High,
            PerformanceTier::Medium,
            PerformanceTier::Low,
        ]
        .into_iter()
        .map(|label| TierCount {
            label,
            count: segmented.iter().filter(|p| p.label == label).count(),
        })
        .filter(|t| t.count > 0)
        .collect();

        Ok(AnalysisReport {
            generated_at: Utc::now().to_rfc3339(),
            cluster_count: self.assigner.k,
            pipeline_ms: start.elapsed().as_millis(),
            cleaning: CleaningStats {
                rows_loaded,
                rows_after_cleaning,
                rows_after_outlier_removal,
            },
            products: segmented,
            cluster_summaries,
            diagnostics,
            scatter,
            tier_distribution,
            top_products,
        })
    }
}
