/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Sample quantile of ascending data by linear interpolation between order statistics.
///
/// Uses `h = (n - 1) * p`, so `p = 0` is the minimum and `p = 1` the maximum.
/// Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = h - lower as f64;

    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Mean and two-sided percentile interval of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalEstimate {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Summarize `values` as mean plus the `alpha/2` and `1 - alpha/2` quantiles
pub fn percentile_interval(values: &[f64], alpha: f64) -> Option<IntervalEstimate> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(IntervalEstimate {
        mean: mean(&sorted)?,
        lower: quantile_sorted(&sorted, alpha / 2.0)?,
        upper: quantile_sorted(&sorted, 1.0 - alpha / 2.0)?,
    })
}
