//! Numeric helpers shared by the cleaning filter, the correlation engine
//! and the matrix statistics.

/// Ascending copy of `values` under IEEE total order (NaN sorts last).
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolation quantile (Hyndman–Fan type 7) on data already
/// sorted ascending, e.g. by [`sorted_copy`].
///
/// Returns `None` for empty input or `q` outside `[0, 1]`.
/// `h = (n - 1) * q`; the result interpolates between `x[floor(h)]` and the
/// next rank.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&q) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let frac = h - h.floor();

    if lo + 1 >= n {
        Some(sorted[n - 1])
    } else {
        Some(sorted[lo] + frac * (sorted[lo + 1] - sorted[lo]))
    }
}

/// Arithmetic mean; NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`), two-pass.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / values.len() as f64
}
