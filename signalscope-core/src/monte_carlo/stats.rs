//! Summary statistics over simulated final prices.

/// Linear-interpolation percentile over an ascending slice.
///
/// `p` is a fraction in [0, 1]; rank = p × (n − 1), interpolating between the
/// two neighbouring order statistics. Empty input yields NaN.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "percentile must be in [0, 1]");
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }

    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile of unsorted values; see `percentile_sorted`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted_copy(values), p)
}

pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
