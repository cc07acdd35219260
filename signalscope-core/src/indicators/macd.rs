//! Moving Average Convergence Divergence (MACD).
//!
//! MACD = EMA(fast) - EMA(slow); signal = EMA(MACD, signal_period);
//! histogram = MACD - signal. All three EMAs are seeded with their first
//! input, so every line is defined from bar 0.
//! Lookback: 0. Values before `slow` bars are still dominated by the seed,
//! which `warmed_up` reports.

use serde::{Deserialize, Serialize};

use super::bundle::{IndicatorKind, IndicatorResult};
use super::ema::ema_of_series;
use super::{latest, Indicator};
use crate::domain::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub fast: usize,
    pub slow: usize,
    pub signal_period: usize,
    pub macd_line: Option<f64>,
    pub signal_line: Option<f64>,
    pub histogram: Option<f64>,
    #[serde(with = "super::serde_nan")]
    pub macd_series: Vec<f64>,
    #[serde(with = "super::serde_nan")]
    pub signal_series: Vec<f64>,
    #[serde(with = "super::serde_nan")]
    pub histogram_series: Vec<f64>,
    pub signal: MacdSignal,
    /// True once the series has at least `slow` bars.
    pub warmed_up: bool,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        assert!(fast < slow, "MACD fast period must be < slow period");
        Self { fast, slow, signal }
    }

    pub fn result_for(&self, closes: &[f64]) -> MacdResult {
        let ema_fast = ema_of_series(closes, self.fast);
        let ema_slow = ema_of_series(closes, self.slow);
        let macd_series: Vec<f64> = ema_fast
            .iter()
            .zip(&ema_slow)
            .map(|(f, s)| f - s)
            .collect();
        let signal_series = ema_of_series(&macd_series, self.signal);
        let histogram_series: Vec<f64> = macd_series
            .iter()
            .zip(&signal_series)
            .map(|(m, s)| m - s)
            .collect();

        let macd_line = latest(&macd_series);
        let signal_line = latest(&signal_series);
        let histogram = latest(&histogram_series);
        let prev_histogram = histogram_series
            .len()
            .checked_sub(2)
            .and_then(|i| Some(histogram_series[i]).filter(|v| !v.is_nan()));

        MacdResult {
            fast: self.fast,
            slow: self.slow,
            signal_period: self.signal,
            macd_line,
            signal_line,
            histogram,
            signal: classify(macd_line, signal_line, histogram, prev_histogram),
            warmed_up: closes.len() >= self.slow,
            macd_series,
            signal_series,
            histogram_series,
        }
    }
}

/// Bullish when MACD is above its signal line and the histogram is rising;
/// Bearish when below and falling; otherwise Neutral.
fn classify(
    macd: Option<f64>,
    signal: Option<f64>,
    histogram: Option<f64>,
    prev_histogram: Option<f64>,
) -> MacdSignal {
    let (Some(macd), Some(signal), Some(hist), Some(prev)) =
        (macd, signal, histogram, prev_histogram)
    else {
        return MacdSignal::Neutral;
    };

    if macd > signal && hist > prev {
        MacdSignal::Bullish
    } else if macd < signal && hist < prev {
        MacdSignal::Bearish
    } else {
        MacdSignal::Neutral
    }
}

impl Indicator for Macd {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorResult {
        IndicatorResult::Macd(self.result_for(&series.closes()))
    }
}
