//! Quantiles and interquartile-range fences for outlier trimming.

/// Multiplier applied to the IQR when computing outlier fences.
/// Values outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` are treated as outliers.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Lower and upper acceptance bounds derived from the interquartile range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub low: f64,
    pub high: f64,
}

impl IqrFences {
    /// True when `value` lies inside the fences (inclusive on both ends).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Linearly interpolated quantile of a sample.
///
/// `q` must be in `[0, 1]`. The sample is sorted internally, so callers
/// do not need to pre-sort. Returns `None` for an empty sample.
///
/// Interpolation: the quantile sits at position `q * (n - 1)` in the
/// sorted sample, interpolating between the two surrounding values.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = pos - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Compute IQR outlier fences for a sample.
///
/// Returns `None` for an empty sample. A constant sample yields
/// degenerate fences (`low == high == the constant`), which keep every
/// value.
pub fn iqr_fences(values: &[f64]) -> Option<IqrFences> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some(IqrFences {
        low: q1 - IQR_MULTIPLIER * iqr,
        high: q3 + IQR_MULTIPLIER * iqr,
    })
}
