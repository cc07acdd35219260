//! Short/long Simple Moving Average pair (default 50/200).
//!
//! Both averages are plain rolling means of close. The trend signal compares
//! the latest close with both averages.
//! Lookback: long - 1 for the signal; the short average is defined earlier.

use serde::{Deserialize, Serialize};

use super::bundle::{IndicatorKind, IndicatorResult};
use super::rolling::rolling_mean;
use super::{latest, Indicator};
use crate::domain::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmaSignal {
    GoldenCrossUptrend,
    DeathCrossDowntrend,
    BullishLongTerm,
    BearishLongTerm,
    Neutral,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaResult {
    pub short_period: usize,
    pub long_period: usize,
    pub short: Option<f64>,
    pub long: Option<f64>,
    /// Latest close.
    pub price: f64,
    #[serde(with = "super::serde_nan")]
    pub short_series: Vec<f64>,
    #[serde(with = "super::serde_nan")]
    pub long_series: Vec<f64>,
    pub signal: SmaSignal,
}

#[derive(Debug, Clone)]
pub struct SmaCross {
    short: usize,
    long: usize,
}

impl SmaCross {
    pub fn new(short: usize, long: usize) -> Self {
        assert!(short >= 1, "short SMA period must be >= 1");
        assert!(long >= 1, "long SMA period must be >= 1");
        Self { short, long }
    }

    pub fn result_for(&self, closes: &[f64]) -> SmaResult {
        let short_series = rolling_mean(closes, self.short);
        let long_series = rolling_mean(closes, self.long);
        let short = latest(&short_series);
        let long = latest(&long_series);
        let price = closes.last().copied().unwrap_or(f64::NAN);

        SmaResult {
            short_period: self.short,
            long_period: self.long,
            short,
            long,
            price,
            short_series,
            long_series,
            signal: classify(price, short, long),
        }
    }
}

fn classify(price: f64, short: Option<f64>, long: Option<f64>) -> SmaSignal {
    let (Some(short), Some(long)) = (short, long) else {
        return SmaSignal::InsufficientData;
    };

    if price > short && short > long {
        SmaSignal::GoldenCrossUptrend
    } else if price < short && short < long {
        SmaSignal::DeathCrossDowntrend
    } else if price > long {
        SmaSignal::BullishLongTerm
    } else if price < long {
        SmaSignal::BearishLongTerm
    } else {
        SmaSignal::Neutral
    }
}

impl Indicator for SmaCross {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Sma
    }

    fn lookback(&self) -> usize {
        self.short.max(self.long) - 1
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorResult {
        IndicatorResult::Sma(self.result_for(&series.closes()))
    }
}
