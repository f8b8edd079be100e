use std::collections::{HashMap, HashSet};

use crate::sales_loader::SalesRow;
use crate::types::ProductAggregate;

/// Per-product accumulator while walking the transaction rows.
#[derive(Debug, Default)]
struct Accumulator {
    total_quantity: f64,
    total_revenue: f64,
    invoices: HashSet<String>,
}

/// Aggregate cleaned transaction rows to one record per distinct
/// product, with derived and log-transformed features.
///
/// Sales frequency counts distinct invoice numbers, so a product bought
/// twice on the same invoice counts once. Output is sorted by item name
/// for deterministic downstream ordering.
pub fn aggregate_products(rows: &[SalesRow]) -> Vec<ProductAggregate> {
    let mut groups: HashMap<&str, Accumulator> = HashMap::new();
    for row in rows {
        let acc = groups.entry(row.item_name.as_str()).or_default();
        acc.total_quantity += row.qty;
        acc.total_revenue += row.amount;
        acc.invoices.insert(row.invoice_number.clone());
    }

    let mut aggregates: Vec<ProductAggregate> = groups
        .into_iter()
        .map(|(item_name, acc)| {
            let sales_frequency = acc.invoices.len() as u64;
            let avg_revenue = acc.total_revenue / sales_frequency as f64;
            ProductAggregate {
                item_name: item_name.to_string(),
                total_quantity: acc.total_quantity,
                total_revenue: acc.total_revenue,
                sales_frequency,
                avg_revenue_per_transaction: avg_revenue,
                total_revenue_log: acc.total_revenue.ln_1p(),
                total_quantity_log: acc.total_quantity.ln_1p(),
                avg_revenue_log: avg_revenue.ln_1p(),
            }
        })
        .collect();

    aggregates.sort_by(|a, b| a.item_name.cmp(&b.item_name));
    aggregates
}
