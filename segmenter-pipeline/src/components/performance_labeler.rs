use std::collections::HashMap;

use crate::currency::format_rupiah;
use crate::types::{ClusterSummary, PerformanceTier, ProductAggregate, SegmentedProduct};

/// Interpret a clustering: compute per-cluster mean metrics, rank the
/// clusters by mean total revenue (descending), and assign a
/// performance tier to each rank. Returns the labeled product table and
/// the ranked cluster summaries.
///
/// Labeling is a pure function of cluster rank; nothing persists across
/// runs.
pub fn label_clusters(
    products: Vec<ProductAggregate>,
    labels: &[usize],
    k: usize,
) -> (Vec<SegmentedProduct>, Vec<ClusterSummary>) {
    debug_assert_eq!(products.len(), labels.len());

    // Per-cluster sums.
    let mut counts = vec![0usize; k];
    let mut sum_quantity = vec![0.0f64; k];
    let mut sum_revenue = vec![0.0f64; k];
    let mut sum_frequency = vec![0.0f64; k];
    let mut sum_avg_revenue = vec![0.0f64; k];
    for (product, &cluster) in products.iter().zip(labels) {
        counts[cluster] += 1;
        sum_quantity[cluster] += product.total_quantity;
        sum_revenue[cluster] += product.total_revenue;
        sum_frequency[cluster] += product.sales_frequency as f64;
        sum_avg_revenue[cluster] += product.avg_revenue_per_transaction;
    }

    // Rank clusters by mean revenue, highest first. Clusters that ended
    // up empty sort last and still get a (Low) tier.
    let mean_revenue: Vec<f64> = (0..k)
        .map(|c| {
            if counts[c] > 0 {
                sum_revenue[c] / counts[c] as f64
            } else {
                f64::NEG_INFINITY
            }
        })
        .collect();
    let mut ranked: Vec<usize> = (0..k).collect();
    ranked.sort_by(|&a, &b| {
        mean_revenue[b]
            .partial_cmp(&mean_revenue[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut tier_of_cluster: HashMap<usize, PerformanceTier> = HashMap::new();
    let mut summaries = Vec::with_capacity(k);
    for (rank, &cluster) in ranked.iter().enumerate() {
        let tier = PerformanceTier::for_rank(rank);
        tier_of_cluster.insert(cluster, tier);

        let n = counts[cluster].max(1) as f64;
        let mean_total_revenue = sum_revenue[cluster] / n;
        let mean_avg_revenue = sum_avg_revenue[cluster] / n;
        summaries.push(ClusterSummary {
            cluster,
            label: tier,
            product_count: counts[cluster],
            mean_total_quantity: sum_quantity[cluster] / n,
            mean_total_revenue,
            mean_sales_frequency: sum_frequency[cluster] / n,
            mean_avg_revenue_per_transaction: mean_avg_revenue,
            display_mean_total_revenue: format_rupiah(mean_total_revenue),
            display_mean_avg_revenue: format_rupiah(mean_avg_revenue),
        });
    }

    let segmented = products
        .into_iter()
        .zip(labels)
        .map(|(product, &cluster)| {
            let tier = tier_of_cluster
                .get(&cluster)
                .copied()
                .unwrap_or(PerformanceTier::Low);
            SegmentedProduct::from_aggregate(product, cluster, tier)
        })
        .collect();

    (segmented, summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, revenue: f64) -> ProductAggregate {
        ProductAggregate {
            item_name: name.to_string(),
            total_quantity: 10.0,
            total_revenue: revenue,
            sales_frequency: 5,
            avg_revenue_per_transaction: revenue / 5.0,
            total_revenue_log: revenue.ln_1p(),
            total_quantity_log: 10.0f64.ln_1p(),
            avg_revenue_log: (revenue / 5.0).ln_1p(),
        }
    }

    #[test]
    fn top_tier_has_the_highest_mean_revenue() {
        let products = vec![
            product("a", 100.0),
            product("b", 5000.0),
            product("c", 120.0),
            product("d", 4800.0),
        ];
        let labels = vec![0, 1, 0, 1];
        let (_, summaries) = label_clusters(products, &labels, 2);

        assert_eq!(summaries[0].label, PerformanceTier::Top);
        assert_eq!(summaries[0].cluster, 1);
        assert!(summaries[0].mean_total_revenue > summaries[1].mean_total_revenue);
        assert_eq!(summaries[1].label, PerformanceTier::High);
    }

    #[test]
    fn products_inherit_their_cluster_tier() {
        let products = vec![product("a", 100.0), product("b", 5000.0)];
        let labels = vec![0, 1];
        let (segmented, _) = label_clusters(products, &labels, 2);

        let a = segmented.iter().find(|p| p.item_name == "a").unwrap();
        let b = segmented.iter().find(|p| p.item_name == "b").unwrap();
        assert_eq!(a.label, PerformanceTier::High);
        assert_eq!(b.label, PerformanceTier::Top);
    }

    #[test]
    fn every_rank_past_third_is_low() {
        let products: Vec<ProductAggregate> = (0..6)
            .map(|i| product(&format!("p{}", i), 1000.0 * (6 - i) as f64))
            .collect();
        let labels = vec![0, 1, 2, 3, 4, 5];
        let (_, summaries) = label_clusters(products, &labels, 6);

        let tiers: Vec<PerformanceTier> = summaries.iter().map(|s| s.label).collect();
        assert_eq!(
            tiers,
            vec![
                PerformanceTier::Top,
                PerformanceTier::High,
                PerformanceTier::Medium,
                PerformanceTier::Low,
                PerformanceTier::Low,
                PerformanceTier::Low,
            ]
        );
    }

    #[test]
    fn cluster_counts_sum_to_product_count() {
        let products: Vec<ProductAggregate> = (0..7)
            .map(|i| product(&format!("p{}", i), 100.0 * (i + 1) as f64))
            .collect();
        let labels = vec![0, 1, 2, 0, 1, 2, 0];
        let (_, summaries) = label_clusters(products, &labels, 3);
        let total: usize = summaries.iter().map(|s| s.product_count).sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn summary_means_match_hand_computation() {
        let products = vec![product("a", 100.0), product("b", 300.0)];
        let labels = vec![0, 0];
        let (_, summaries) = label_clusters(products, &labels, 1);
        assert_eq!(summaries[0].mean_total_revenue, 200.0);
        assert_eq!(summaries[0].mean_sales_frequency, 5.0);
        assert_eq!(summaries[0].display_mean_total_revenue, "Rp 200,00");
    }
}
