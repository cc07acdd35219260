//! Technical indicators over a `PriceSeries`.
//!
//! Every indicator implements the `Indicator` trait and produces one
//! `IndicatorResult` variant: latest value(s) as `Option<f64>`, the full
//! time-aligned series with `f64::NAN` warm-up bars, and a categorical signal.
//! Results are recomputed in full on every call; nothing is cached between
//! requests.
//!
//! `IndicatorEngine` runs the configured set and collects the results into an
//! `IndicatorBundle`.

pub mod bollinger;
pub mod bundle;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod volume;

mod serde_nan;

pub use bollinger::{Bollinger, BollingerResult, BollingerSignal};
pub use bundle::{IndicatorBundle, IndicatorKind, IndicatorResult};
pub use ema::ema_of_series;
pub use engine::{IndicatorConfig, IndicatorEngine, IndicatorError};
pub use macd::{Macd, MacdResult, MacdSignal};
pub use rsi::{Rsi, RsiResult, RsiSignal};
pub use sma::{SmaCross, SmaResult, SmaSignal};
pub use volume::{VolumeResult, VolumeSignal, VolumeTrend};

use crate::domain::PriceSeries;

/// A technical indicator.
///
/// Indicators are pure functions of the series. The series returned inside the
/// result has the same length as the input, with `f64::NAN` for the first
/// `lookback()` bars.
///
/// # Look-ahead guard
/// No value at bar t may depend on data from bar t+1 or later; truncating the
/// input must not change any earlier value.
pub trait Indicator: Send + Sync {
    fn kind(&self) -> IndicatorKind;

    /// Number of leading bars for which the indicator is undefined.
    fn lookback(&self) -> usize;

    fn compute(&self, series: &PriceSeries) -> IndicatorResult;
}

/// Last element of an aligned series, `None` while still warming up.
pub(crate) fn latest(values: &[f64]) -> Option<f64> {
    values.last().copied().filter(|v| !v.is_nan())
}

/// Build a series from closes for testing.
///
/// open = prev close, high/low = ±1 around the body, volume = 1000, one bar
/// per calendar day starting 2024-01-02.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> PriceSeries {
    make_series_with_volume(closes, &vec![1000.0; closes.len()])
}

#[cfg(test)]
pub fn make_series_with_volume(closes: &[f64], volumes: &[f64]) -> PriceSeries {
    use crate::domain::PriceBar;
    assert_eq!(closes.len(), volumes.len());
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
                volume,
            }
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
