//! Product segmentation pipeline.
//!
//! Turns a raw sales transaction CSV into a clustered, labeled
//! per-product analysis: load → clean → outlier removal → aggregate →
//! standardize → K-Means → interpret → export.

pub mod components;
pub mod currency;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipelines;
pub mod sales_loader;
pub mod selector;
pub mod types;
pub mod util;

pub use error::PipelineError;
pub use pipelines::segmentation::SegmentationPipeline;
pub use sales_loader::{load_sales, SalesRow};
pub use types::{AnalysisReport, PerformanceTier, ProductAggregate, SegmentedProduct};
