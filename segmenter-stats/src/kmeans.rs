//! Seeded K-Means clustering (k-means++ initialization, Lloyd iterations).
//!
//! Runs multiple restarts and keeps the fit with the lowest inertia, so
//! results are deterministic for a fixed input, cluster count, and seed.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{StatsError, StatsResult};

/// Base seed used when the caller does not care about a specific one.
pub const DEFAULT_SEED: u64 = 42;

/// Tuning knobs for a K-Means fit.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters.
    pub k: usize,
    /// Base seed. Restart `i` derives its own seed from `seed + i`.
    pub seed: u64,
    /// Number of independent restarts; the lowest-inertia fit wins.
    pub n_init: usize,
    /// Maximum Lloyd iterations per restart.
    pub max_iter: usize,
    /// Convergence threshold on the squared centroid movement.
    pub tol: f64,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: DEFAULT_SEED,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
        }
    }
}

/// Outcome of a K-Means fit.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster centers, one row per cluster.
    pub centroids: Array2<f64>,
    /// Cluster id per input row.
    pub labels: Vec<usize>,
    /// Sum of squared distances from each sample to its centroid.
    pub inertia: f64,
    /// Lloyd iterations the winning restart took.
    pub iterations: usize,
}

impl KMeansFit {
    /// Number of samples assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let k = self.centroids.nrows();
        let mut sizes = vec![0usize; k];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Fit K-Means on `data` (rows = samples, columns = features).
pub fn fit(data: ArrayView2<'_, f64>, config: &KMeansConfig) -> StatsResult<KMeansFit> {
    let n = data.nrows();
    if n == 0 {
        return Err(StatsError::EmptyInput);
    }
    if config.k == 0 {
        return Err(StatsError::InvalidK(0));
    }
    if n < config.k {
        return Err(StatsError::TooFewSamples {
            samples: n,
            k: config.k,
        });
    }

    let restarts = config.n_init.max(1);
    let mut best = lloyd(data, config, config.seed);
    for attempt in 1..restarts {
        let candidate = lloyd(data, config, config.seed.wrapping_add(attempt as u64));
        if candidate.inertia < best.inertia {
            best = candidate;
        }
    }
    Ok(best)
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// k-means++ seeding: first center uniform, later centers sampled with
/// probability proportional to squared distance from the nearest center.
fn kmeans_plus_plus(data: ArrayView2<'_, f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = data.nrows();
    let dims = data.ncols();
    let mut centroids = Array2::<f64>::zeros((k, dims));

    let first = rng.gen_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    let mut nearest_sq: Vec<f64> = (0..n)
        .map(|i| squared_distance(data.row(i), centroids.row(0)))
        .collect();

    for c in 1..k {
        let total: f64 = nearest_sq.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut pick = n - 1;
            for (i, &d) in nearest_sq.iter().enumerate() {
                target -= d;
                if target <= 0.0 {
                    pick = i;
                    break;
                }
            }
            pick
        } else {
            // All remaining points coincide with existing centers.
            rng.gen_range(0..n)
        };
        centroids.row_mut(c).assign(&data.row(chosen));

        for i in 0..n {
            let d = squared_distance(data.row(i), centroids.row(c));
            if d < nearest_sq[i] {
                nearest_sq[i] = d;
            }
        }
    }

    centroids
}

/// One seeded restart of Lloyd's algorithm.
fn lloyd(data: ArrayView2<'_, f64>, config: &KMeansConfig, seed: u64) -> KMeansFit {
    let n = data.nrows();
    let dims = data.ncols();
    let k = config.k;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = kmeans_plus_plus(data, k, &mut rng);
    let mut labels = vec![0usize; n];
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;

        // Assignment step.
        for i in 0..n {
            let row = data.row(i);
            let mut best_cluster = 0;
            let mut best_dist = f64::INFINITY;
            for c in 0..k {
                let d = squared_distance(row, centroids.row(c));
                if d < best_dist {
                    best_dist = d;
                    best_cluster = c;
                }
            }
            labels[i] = best_cluster;
        }

        // Update step.
        let mut sums = Array2::<f64>::zeros((k, dims));
        let mut counts = vec![0usize; k];
        for i in 0..n {
            let c = labels[i];
            counts[c] += 1;
            let mut sum_row = sums.row_mut(c);
            sum_row += &data.row(i);
        }

        let mut new_centroids = centroids.clone();
        for c in 0..k {
            if counts[c] > 0 {
                let mut row = new_centroids.row_mut(c);
                row.assign(&sums.row(c));
                row.mapv_inplace(|x| x / counts[c] as f64);
            }
        }

        // Empty clusters steal the point farthest from its current centroid.
        for c in 0..k {
            if counts[c] == 0 {
                if let Some(farthest) = (0..n).max_by(|&a, &b| {
                    let da = squared_distance(data.row(a), new_centroids.row(labels[a]));
                    let db = squared_distance(data.row(b), new_centroids.row(labels[b]));
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                }) {
                    new_centroids.row_mut(c).assign(&data.row(farthest));
                    labels[farthest] = c;
                }
            }
        }

        let shift = centroids
            .axis_iter(Axis(0))
            .zip(new_centroids.axis_iter(Axis(0)))
            .map(|(old, new)| squared_distance(old, new))
            .fold(0.0f64, f64::max);
        centroids = new_centroids;

        if shift <= config.tol {
            break;
        }
    }

    // Final assignment and inertia against the converged centroids.
    let mut inertia = 0.0;
    for i in 0..n {
        let row = data.row(i);
        let mut best_cluster = 0;
        let mut best_dist = f64::INFINITY;
        for c in 0..k {
            let d = squared_distance(row, centroids.row(c));
            if d < best_dist {
                best_dist = d;
                best_cluster = c;
            }
        }
        labels[i] = best_cluster;
        inertia += best_dist;
    }

    KMeansFit {
        centroids,
        labels,
        inertia,
        iterations,
    }
}
