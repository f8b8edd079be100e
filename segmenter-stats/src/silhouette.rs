//! Silhouette coefficient for cluster-count diagnostics.

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{StatsError, StatsResult};

fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Mean silhouette coefficient over all samples.
///
/// For sample `i`: `a(i)` is the mean distance to the other members of
/// its cluster, `b(i)` the smallest mean distance to any other cluster,
/// and `s(i) = (b - a) / max(a, b)`. Samples in singleton clusters
/// contribute 0.
///
/// Defined only for `2 <= k < n`.
pub fn silhouette_score(data: ArrayView2<'_, f64>, labels: &[usize]) -> StatsResult<f64> {
    let n = data.nrows();
    if n == 0 {
        return Err(StatsError::EmptyInput);
    }
    if labels.len() != n {
        return Err(StatsError::DimensionMismatch {
            expected: n,
            got: labels.len(),
        });
    }

    let k = labels.iter().copied().max().map_or(0, |m| m + 1);
    if k < 2 || k >= n {
        return Err(StatsError::SilhouetteUndefined { samples: n, k });
    }

    let mut sizes = vec![0usize; k];
    for &label in labels {
        sizes[label] += 1;
    }

    let mut total = 0.0;
    for i in 0..n {
        let own = labels[i];
        if sizes[own] <= 1 {
            continue; // singleton contributes 0
        }

        // Mean distance from i to every cluster.
        let mut dist_sums = vec![0.0f64; k];
        for j in 0..n {
            if i == j {
                continue;
            }
            dist_sums[labels[j]] += euclidean(data.row(i), data.row(j));
        }

        let a = dist_sums[own] / (sizes[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| dist_sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as f64)
}
