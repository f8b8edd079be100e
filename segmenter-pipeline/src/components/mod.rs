pub mod cluster_assigner;
pub mod iqr_outlier_filter;
pub mod performance_labeler;
pub mod positive_values_filter;
pub mod product_aggregator;
pub mod top_products_selector;
