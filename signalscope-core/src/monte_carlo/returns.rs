//! Historical daily returns and their drift/volatility estimates.

use crate::indicators::rolling::sample_std;

/// Simple returns r_t = close_t / close_{t-1} - 1; one fewer than the input.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Mean and sample standard deviation of the returns.
///
/// Needs at least two returns; fewer yields NaN volatility.
pub fn drift_and_volatility(returns: &[f64]) -> (f64, f64) {
    if returns.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let drift = returns.iter().sum::<f64>() / returns.len() as f64;
    (drift, sample_std(returns))
}
