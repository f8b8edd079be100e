use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Aggregate types
// ---------------------------------------------------------------------------

/// Per-product metrics derived from the cleaned transaction rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub item_name: String,
    /// Sum of Qty across all transactions for this product.
    pub total_quantity: f64,
    /// Sum of Amount Price Item across all transactions.
    pub total_revenue: f64,
    /// Number of distinct invoices the product appears on.
    pub sales_frequency: u64,
    pub avg_revenue_per_transaction: f64,
    /// `ln(1 + x)` transforms, used to stabilize variance before clustering.
    pub total_revenue_log: f64,
    pub total_quantity_log: f64,
    pub avg_revenue_log: f64,
}

/// A product aggregate with its cluster assignment and performance tier.
///
/// Field order matches the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedProduct {
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Total_Quantity")]
    pub total_quantity: f64,
    #[serde(rename = "Total_Revenue")]
    pub total_revenue: f64,
    #[serde(rename = "Sales_Frequency")]
    pub sales_frequency: u64,
    #[serde(rename = "Avg_Revenue_Per_Transaction")]
    pub avg_revenue_per_transaction: f64,
    #[serde(rename = "Total_Revenue_Log")]
    pub total_revenue_log: f64,
    #[serde(rename = "Total_Quantity_Log")]
    pub total_quantity_log: f64,
    #[serde(rename = "Avg_Revenue_Log")]
    pub avg_revenue_log: f64,
    #[serde(rename = "Cluster")]
    pub cluster: usize,
    #[serde(rename = "Label")]
    pub label: PerformanceTier,
}

impl SegmentedProduct {
    pub fn from_aggregate(
        aggregate: ProductAggregate,
        cluster: usize,
        label: PerformanceTier,
    ) -> Self {
        Self {
            item_name: aggregate.item_name,
            total_quantity: aggregate.total_quantity,
            total_revenue: aggregate.total_revenue,
            sales_frequency: aggregate.sales_frequency,
            avg_revenue_per_transaction: aggregate.avg_revenue_per_transaction,
            total_revenue_log: aggregate.total_revenue_log,
            total_quantity_log: aggregate.total_quantity_log,
            avg_revenue_log: aggregate.avg_revenue_log,
            cluster,
            label,
        }
    }
}

// ---------------------------------------------------------------------------
// Cluster interpretation types
// ---------------------------------------------------------------------------

/// Ordinal performance tier assigned by ranking clusters on mean total
/// revenue, descending. Every rank past the third is a Low Performer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceTier {
    #[serde(rename = "Top Performer")]
    Top,
    #[serde(rename = "High Performer")]
    High,
    #[serde(rename = "Medium Performer")]
    Medium,
    #[serde(rename = "Low Performer")]
    Low,
}

impl PerformanceTier {
    /// Tier for a cluster's revenue rank (0 = highest mean revenue).
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0 => PerformanceTier::Top,
            1 => PerformanceTier::High,
            2 => PerformanceTier::Medium,
            _ => PerformanceTier::Low,
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Top => write!(f, "Top Performer"),
            PerformanceTier::High => write!(f, "High Performer"),
            PerformanceTier::Medium => write!(f, "Medium Performer"),
            PerformanceTier::Low => write!(f, "Low Performer"),
        }
    }
}

/// Mean metrics for one cluster, plus its tier and product count.
/// `display_*` fields carry Rupiah-formatted strings for the UI tables.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub label: PerformanceTier,
    pub product_count: usize,
    pub mean_total_quantity: f64,
    pub mean_total_revenue: f64,
    pub mean_sales_frequency: f64,
    pub mean_avg_revenue_per_transaction: f64,
    pub display_mean_total_revenue: String,
    pub display_mean_avg_revenue: String,
}

/// Top products of one cluster, ordered by revenue descending.
#[derive(Debug, Clone, Serialize)]
pub struct TopProductsGroup {
    pub cluster: usize,
    pub label: PerformanceTier,
    pub products: Vec<SegmentedProduct>,
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Row counts surviving each cleaning stage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CleaningStats {
    pub rows_loaded: usize,
    pub rows_after_cleaning: usize,
    pub rows_after_outlier_removal: usize,
}

/// Inertia/silhouette diagnostics for one candidate cluster count.
#[derive(Debug, Clone, Serialize)]
pub struct KDiagnosticReport {
    pub k: usize,
    pub inertia: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silhouette: Option<f64>,
}

/// One point of the cluster scatter chart (log scale on both axes).
#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub revenue_log: f64,
    pub quantity_log: f64,
    pub cluster: usize,
}

/// Product count per performance tier, for the distribution pie chart.
#[derive(Debug, Clone, Serialize)]
pub struct TierCount {
    pub label: PerformanceTier,
    pub count: usize,
}

/// Everything one analysis run produces: the segmented product table,
/// cluster interpretation, and chart-ready series.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub cluster_count: usize,
    pub pipeline_ms: u128,
    pub cleaning: CleaningStats,
    pub products: Vec<SegmentedProduct>,
    pub cluster_summaries: Vec<ClusterSummary>,
    pub diagnostics: Vec<KDiagnosticReport>,
    pub scatter: Vec<ScatterPoint>,
    pub tier_distribution: Vec<TierCount>,
    pub top_products: Vec<TopProductsGroup>,
}
