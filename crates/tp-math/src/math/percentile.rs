//! Interpolated percentiles and means over value sets.
//!
//! `None` is the "no data" result for an empty input; it never leaks into
//! arithmetic as a magic number.

/// The `pct`-th percentile of `values` using linear interpolation.
///
/// Sorts ascending and interpolates at the zero-based fractional index
/// `(pct / 100) * (n - 1)`, clamping to the last element. `pct` is clamped
/// to `[0, 100]`. The result depends only on the multiset of inputs.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    match values.len() {
        0 => return None,
        1 => return Some(values[0]),
        _ => {}
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let idx = (pct.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lower = idx.floor() as usize;
    if lower >= n - 1 {
        return Some(sorted[n - 1]);
    }
    let frac = idx - lower as f64;
    Some(sorted[lower] + frac * (sorted[lower + 1] - sorted[lower]))
}

/// 50th percentile.
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// 90th percentile.
pub fn p90(values: &[f64]) -> Option<f64> {
    percentile(values, 90.0)
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
