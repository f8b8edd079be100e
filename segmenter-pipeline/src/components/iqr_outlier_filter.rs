use log::debug;

use segmenter_stats::quantile::iqr_fences;

use crate::error::PipelineResult;
use crate::filter::{FilterResult, RowFilter};
use crate::sales_loader::SalesRow;

/// Which numeric column the fences are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierColumn {
    Price,
    Amount,
}

impl OutlierColumn {
    fn value(&self, row: &SalesRow) -> f64 {
        match self {
            OutlierColumn::Price => row.price,
            OutlierColumn::Amount => row.amount,
        }
    }
}

/// Removes rows whose column value falls outside the IQR fences
/// `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`, computed over the rows it receives.
///
/// Fences are recomputed per invocation, so chaining a Price filter
/// into an Amount filter reproduces the sequential trim of the source
/// data frame.
#[derive(Debug, Clone, Copy)]
pub struct IqrOutlierFilter {
    pub column: OutlierColumn,
}

impl IqrOutlierFilter {
    pub fn price() -> Self {
        Self {
            column: OutlierColumn::Price,
        }
    }

    pub fn amount() -> Self {
        Self {
            column: OutlierColumn::Amount,
        }
    }
}

impl RowFilter<SalesRow> for IqrOutlierFilter {
    fn filter(&self, rows: Vec<SalesRow>) -> PipelineResult<FilterResult<SalesRow>> {
        let values: Vec<f64> = rows.iter().map(|r| self.column.value(r)).collect();
        let fences = match iqr_fences(&values) {
            Some(fences) => fences,
            // Empty input: nothing to trim.
            None => {
                return Ok(FilterResult {
                    kept: rows,
                    removed: Vec::new(),
                })
            }
        };

        debug!(
            "{:?} outlier fences: [{:.2}, {:.2}] over {} rows",
            self.column,
            fences.low,
            fences.high,
            rows.len()
        );

        let (kept, removed): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .partition(|r| fences.contains(self.column.value(r)));
        Ok(FilterResult { kept, removed })
    }

    fn name(&self) -> &str {
        match self.column {
            OutlierColumn::Price => "IqrOutlierFilter(Price)",
            OutlierColumn::Amount => "IqrOutlierFilter(Amount)",
        }
    }
}
