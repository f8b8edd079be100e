use crate::error::PipelineResult;
use crate::filter::{FilterResult, RowFilter};
use crate::sales_loader::SalesRow;

/// Drops rows with a blank item name or a missing/non-positive Qty,
/// Price, or Amount. Coerced numerics (NaN) always fail the check.
#[derive(Debug, Default)]
pub struct PositiveValuesFilter;

impl RowFilter<SalesRow> for PositiveValuesFilter {
    fn filter(&self, rows: Vec<SalesRow>) -> PipelineResult<FilterResult<SalesRow>> {
        let (kept, removed): (Vec<_>, Vec<_>) = rows.into_iter().partition(SalesRow::is_clean);
        Ok(FilterResult { kept, removed })
    }
}
