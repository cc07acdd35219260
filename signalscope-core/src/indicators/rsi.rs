//! Relative Strength Index (RSI).
//!
//! Simple rolling means of per-bar gains and losses over `period` changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (needs period + 1 bars).
//! Edge cases: avg_loss == 0 and avg_gain > 0 → 100; flat window → 50;
//! avg_gain == 0 and avg_loss > 0 → 0.

use serde::{Deserialize, Serialize};

use super::bundle::{IndicatorKind, IndicatorResult};
use super::rolling::rolling_mean;
use super::{latest, Indicator};
use crate::domain::PriceSeries;

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Oversold,
    Neutral,
    Overbought,
    InsufficientData,
}

impl RsiSignal {
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            None => Self::InsufficientData,
            Some(v) if v < OVERSOLD => Self::Oversold,
            Some(v) if v > OVERBOUGHT => Self::Overbought,
            Some(_) => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiResult {
    pub period: usize,
    pub value: Option<f64>,
    #[serde(with = "super::serde_nan")]
    pub series: Vec<f64>,
    pub signal: RsiSignal,
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }

    pub fn result_for(&self, closes: &[f64]) -> RsiResult {
        let series = rsi_series(closes, self.period);
        let value = latest(&series);
        RsiResult {
            period: self.period,
            value,
            series,
            signal: RsiSignal::from_value(value),
        }
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorResult {
        IndicatorResult::Rsi(self.result_for(&series.closes()))
    }
}

/// RSI over a close series, NaN for the first `period` bars.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    // Index 0 has no change; it never enters a window ending at index >= period.
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let change = closes[i] - closes[i - 1];
        gains[i] = change.max(0.0);
        losses[i] = (-change).max(0.0);
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);
    for i in period..n {
        result[i] = compute_rsi(avg_gain[i], avg_loss[i]);
    }
    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
