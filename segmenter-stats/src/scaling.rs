//! Z-score standardization for feature matrices.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{StatsError, StatsResult};

/// Per-column standardizer: subtract the mean, divide by the population
/// standard deviation.
///
/// Columns with zero variance are centered but not scaled, so a constant
/// feature maps to all zeros instead of NaN.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl StandardScaler {
    /// Learn per-column means and standard deviations from `data`
    /// (rows = samples, columns = features).
    pub fn fit(data: ArrayView2<'_, f64>) -> StatsResult<Self> {
        if data.nrows() == 0 {
            return Err(StatsError::EmptyInput);
        }
        let means = data
            .mean_axis(Axis(0))
            .ok_or(StatsError::EmptyInput)?;
        // Population standard deviation (ddof = 0).
        let stds = data.std_axis(Axis(0), 0.0);
        Ok(Self { means, stds })
    }

    /// Apply the learned transform to `data`.
    pub fn transform(&self, data: ArrayView2<'_, f64>) -> StatsResult<Array2<f64>> {
        if data.ncols() != self.means.len() {
            return Err(StatsError::DimensionMismatch {
                expected: self.means.len(),
                got: data.ncols(),
            });
        }
        let mut out = data.to_owned();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let mean = self.means[j];
            let std = self.stds[j];
            let scale = if std > 0.0 { std } else { 1.0 };
            col.mapv_inplace(|x| (x - mean) / scale);
        }
        Ok(out)
    }

    /// Fit on `data` and transform it in one step.
    pub fn fit_transform(data: ArrayView2<'_, f64>) -> StatsResult<Array2<f64>> {
        let scaler = Self::fit(data)?;
        scaler.transform(data)
    }

    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    pub fn stds(&self) -> &Array1<f64> {
        &self.stds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scaled_columns_have_zero_mean_unit_variance() {
        let data = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let scaled = StandardScaler::fit_transform(data.view()).unwrap();

        for col in scaled.columns() {
            let mean: f64 = col.iter().sum::<f64>() / col.len() as f64;
            let var: f64 = col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / col.len() as f64;
            assert!(mean.abs() < 1e-12, "mean was {}", mean);
            assert!((var - 1.0).abs() < 1e-12, "variance was {}", var);
        }
    }

    #[test]
    fn constant_column_maps_to_zeros() {
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let scaled = StandardScaler::fit_transform(data.view()).unwrap();
        for &x in scaled.column(0).iter() {
            assert_eq!(x, 0.0);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let data = Array2::<f64>::zeros((0, 3));
        assert_eq!(
            StandardScaler::fit(data.view()).unwrap_err(),
            StatsError::EmptyInput
        );
    }

    #[test]
    fn transform_rejects_mismatched_width() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(data.view()).unwrap();
        let wrong = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            scaler.transform(wrong.view()),
            Err(StatsError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }
}
