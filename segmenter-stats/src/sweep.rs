//! Cluster-count sweep: inertia (elbow method) and silhouette diagnostics.

use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::error::{StatsError, StatsResult};
use crate::kmeans::{self, KMeansConfig};
use crate::silhouette::silhouette_score;

/// Diagnostics for a single candidate cluster count.
#[derive(Debug, Clone, PartialEq)]
pub struct KDiagnostic {
    pub k: usize,
    pub inertia: f64,
    /// `None` when the silhouette is undefined for this k.
    pub silhouette: Option<f64>,
}

/// Fit K-Means for every k in `k_range` and collect inertia and
/// silhouette per k. Candidate counts that exceed the sample count are
/// skipped. The fits are independent, so they run in parallel.
pub fn sweep_k(
    data: ArrayView2<'_, f64>,
    k_range: std::ops::RangeInclusive<usize>,
    seed: u64,
) -> StatsResult<Vec<KDiagnostic>> {
    let n = data.nrows();
    if n == 0 {
        return Err(StatsError::EmptyInput);
    }

    let candidates: Vec<usize> = k_range.filter(|&k| k >= 1 && k <= n).collect();
    let mut diagnostics: Vec<KDiagnostic> = candidates
        .into_par_iter()
        .map(|k| {
            let config = KMeansConfig {
                seed,
                ..KMeansConfig::new(k)
            };
            let fit = kmeans::fit(data, &config)?;
            let silhouette = silhouette_score(data, &fit.labels).ok();
            Ok(KDiagnostic {
                k,
                inertia: fit.inertia,
                silhouette,
            })
        })
        .collect::<StatsResult<Vec<_>>>()?;

    diagnostics.sort_by_key(|d| d.k);
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn three_blobs() -> Array2<f64> {
        let mut rows = Vec::new();
        for center in [0.0, 50.0, 100.0] {
            for i in 0..8 {
                let jitter = (i % 3) as f64 * 0.1;
                rows.extend_from_slice(&[center + jitter, center - jitter]);
            }
        }
        Array2::from_shape_vec((24, 2), rows).unwrap()
    }

    #[test]
    fn sweep_covers_requested_range_in_order() {
        let data = three_blobs();
        let diags = sweep_k(data.view(), 2..=6, 42).unwrap();
        let ks: Vec<usize> = diags.iter().map(|d| d.k).collect();
        assert_eq!(ks, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn oversized_k_is_skipped() {
        let data = three_blobs();
        let diags = sweep_k(data.view(), 2..=30, 42).unwrap();
        assert!(diags.iter().all(|d| d.k <= 24));
        assert_eq!(diags.last().unwrap().k, 24);
    }

    #[test]
    fn silhouette_peaks_at_true_cluster_count() {
        let data = three_blobs();
        let diags = sweep_k(data.view(), 2..=6, 42).unwrap();
        let best = diags
            .iter()
            .filter_map(|d| d.silhouette.map(|s| (d.k, s)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert_eq!(best.0, 3);
    }

    #[test]
    fn inertia_is_monotonically_non_increasing() {
        let data = three_blobs();
        let diags = sweep_k(data.view(), 2..=8, 42).unwrap();
        for pair in diags.windows(2) {
            // Small tolerance: restarts keep this monotone in practice.
            assert!(
                pair[1].inertia <= pair[0].inertia + 1e-6,
                "inertia rose from k={} to k={}",
                pair[0].k,
                pair[1].k
            );
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let data = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            sweep_k(data.view(), 2..=10, 42).unwrap_err(),
            StatsError::EmptyInput
        );
    }
}
