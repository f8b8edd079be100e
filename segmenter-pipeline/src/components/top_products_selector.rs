use crate::selector::Selector;
use crate::types::{SegmentedProduct, TopProductsGroup};

/// Selects the top N products of a cluster by total revenue.
pub struct TopRevenueSelector {
    pub n: usize,
}

impl Default for TopRevenueSelector {
    fn default() -> Self {
        Self { n: 5 }
    }
}

impl Selector<SegmentedProduct> for TopRevenueSelector {
    fn score(&self, candidate: &SegmentedProduct) -> f64 {
        candidate.total_revenue
    }

    fn size(&self) -> Option<usize> {
        Some(self.n)
    }
}

/// Build one top-products group per cluster, ordered by the cluster's
/// tier ranking as given in `cluster_order`.
pub fn top_products_per_cluster(
    products: &[SegmentedProduct],
    cluster_order: &[usize],
    n: usize,
) -> Vec<TopProductsGroup> {
    let selector = TopRevenueSelector { n };
    cluster_order
        .iter()
        .map(|&cluster| {
            let members: Vec<SegmentedProduct> = products
                .iter()
                .filter(|p| p.cluster == cluster)
                .cloned()
                .collect();
            let label = members
                .first()
                .map(|p| p.label)
                .unwrap_or(crate::types::PerformanceTier::Low);
            TopProductsGroup {
                cluster,
                label,
                products: selector.select(members),
            }
        })
        .collect()
}
