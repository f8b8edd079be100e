use crate::error::PipelineResult;
use crate::util;

/// Result of a filter operation, partitioning rows into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters run sequentially and partition rows into kept and removed sets.
pub trait RowFilter<C>: Send + Sync
where
    C: Clone + Send + Sync + 'static,
{
    /// Filter rows by evaluating each against some criteria.
    /// Returns a FilterResult containing kept rows (which continue to
    /// the next stage) and removed rows (which are excluded from
    /// further processing).
    fn filter(&self, rows: Vec<C>) -> PipelineResult<FilterResult<C>>;

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
