//! Rolling-window primitives shared by SMA, Bollinger, RSI and volume.
//!
//! Each window is summed afresh rather than with a running add/subtract, so a
//! window of exact zeros yields exactly zero. RSI's saturation rule depends on
//! that.
//!
//! Lookback: period - 1 (first valid value at index period-1).

/// Rolling arithmetic mean. NaN until `period` values are available.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        result[i] = window.iter().sum::<f64>() / period as f64;
    }
    result
}

/// Rolling sample standard deviation (n - 1 denominator).
///
/// Needs `period >= 2`; a shorter period yields all NaN.
pub fn rolling_sample_std(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period < 2 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        result[i] = sample_std(window);
    }
    result
}

/// Sample standard deviation of a slice; NaN for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn mean_known_values() {
        let result = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 2.0, DEFAULT_EPSILON);
        assert_approx(result[3], 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn mean_too_short_is_all_nan() {
        assert!(rolling_mean(&[1.0, 2.0], 3).iter().all(|v| v.is_nan()));
        assert!(rolling_mean(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn mean_of_zeros_is_exactly_zero_after_nonzero_leaves() {
        let result = rolling_mean(&[0.3, 0.1, 0.0, 0.0], 2);
        assert_eq!(result[3], 0.0);
    }

    #[test]
    fn sample_std_known_values() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, sum sq dev 32, sample var 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_approx(sample_std(&values), (32.0f64 / 7.0).sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn sample_std_needs_two_values() {
        assert!(sample_std(&[1.0]).is_nan());
        assert!(rolling_sample_std(&[1.0, 2.0, 3.0], 1)
            .iter()
            .all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_std_constant_window_is_zero() {
        let result = rolling_sample_std(&[5.0; 6], 4);
        assert!(result[2].is_nan());
        assert_eq!(result[3], 0.0);
        assert_eq!(result[5], 0.0);
    }
}
