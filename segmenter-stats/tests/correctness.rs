//! Correctness tests for segmenter-stats.
//!
//! Validates that:
//! 1. Standardization feeds K-Means features on a comparable scale
//! 2. Clusters recovered on standardized data match the planted structure
//! 3. The sweep identifies the planted cluster count via silhouette
//! 4. Determinism: same inputs always produce the same outputs

use ndarray::Array2;

use segmenter_stats::kmeans::{self, KMeansConfig};
use segmenter_stats::scaling::StandardScaler;
use segmenter_stats::silhouette::silhouette_score;
use segmenter_stats::sweep::sweep_k;

const SEED: u64 = 42;

/// Synthetic per-product feature rows: three planted segments with very
/// different revenue/frequency magnitudes, mimicking log-revenue,
/// log-quantity, frequency, log-avg-revenue features.
fn planted_segments() -> (Array2<f64>, usize) {
    let mut rows = Vec::new();
    // (revenue_log, quantity_log, frequency, avg_revenue_log)
    let segments: [[f64; 4]; 3] = [
        [14.0, 7.0, 300.0, 9.0], // top sellers
        [10.0, 5.0, 60.0, 7.0],  // mid tier
        [5.0, 2.0, 4.0, 4.0],    // slow movers
    ];
    for (s, base) in segments.iter().enumerate() {
        for i in 0..10 {
            let jitter = (i as f64 % 4.0) * 0.05 + s as f64 * 0.01;
            rows.extend_from_slice(&[
                base[0] + jitter,
                base[1] - jitter,
                base[2] + i as f64,
                base[3] + jitter / 2.0,
            ]);
        }
    }
    (Array2::from_shape_vec((30, 4), rows).unwrap(), 3)
}

#[test]
fn standardized_clustering_recovers_planted_segments() {
    let (data, k) = planted_segments();
    let scaled = StandardScaler::fit_transform(data.view()).unwrap();
    let fit = kmeans::fit(scaled.view(), &KMeansConfig::new(k)).unwrap();

    // Each planted segment of 10 rows must land in a single cluster,
    // and the three segments in three different ones.
    let mut segment_labels = Vec::new();
    for s in 0..3 {
        let chunk = &fit.labels[s * 10..(s + 1) * 10];
        assert!(
            chunk.iter().all(|&l| l == chunk[0]),
            "segment {} split across clusters: {:?}",
            s,
            chunk
        );
        segment_labels.push(chunk[0]);
    }
    segment_labels.sort_unstable();
    segment_labels.dedup();
    assert_eq!(segment_labels.len(), 3);
}

#[test]
fn unscaled_frequency_dominates_without_standardization() {
    // Raw frequency spans 4..310 while log features span single digits.
    // After scaling, all four features influence the distance metric:
    // the scaled column variances are equal by construction.
    let (data, _) = planted_segments();
    let scaled = StandardScaler::fit_transform(data.view()).unwrap();
    for col in scaled.columns() {
        let mean: f64 = col.iter().sum::<f64>() / col.len() as f64;
        let var: f64 = col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / col.len() as f64;
        assert!((var - 1.0).abs() < 1e-9);
    }
}

#[test]
fn sweep_silhouette_peaks_at_planted_count() {
    let (data, k) = planted_segments();
    let scaled = StandardScaler::fit_transform(data.view()).unwrap();
    let diags = sweep_k(scaled.view(), 2..=8, SEED).unwrap();

    let best = diags
        .iter()
        .filter_map(|d| d.silhouette.map(|s| (d.k, s)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .unwrap();
    assert_eq!(best.0, k);
}

#[test]
fn full_run_is_deterministic() {
    let (data, k) = planted_segments();
    let scaled = StandardScaler::fit_transform(data.view()).unwrap();

    let fit_a = kmeans::fit(scaled.view(), &KMeansConfig::new(k)).unwrap();
    let fit_b = kmeans::fit(scaled.view(), &KMeansConfig::new(k)).unwrap();
    assert_eq!(fit_a.labels, fit_b.labels);
    assert_eq!(fit_a.inertia, fit_b.inertia);

    let s_a = silhouette_score(scaled.view(), &fit_a.labels).unwrap();
    let s_b = silhouette_score(scaled.view(), &fit_b.labels).unwrap();
    assert_eq!(s_a, s_b);

    let sweep_a = sweep_k(scaled.view(), 2..=6, SEED).unwrap();
    let sweep_b = sweep_k(scaled.view(), 2..=6, SEED).unwrap();
    assert_eq!(sweep_a, sweep_b);
}
