//! Bollinger Bands.
//!
//! Middle = SMA(period), upper/lower = middle ± multiplier × sample stddev.
//! Lookback: period - 1.
//! Edge cases: constant window → zero-width bands, signal NearLowerBand
//! (price <= lower is checked first).

use serde::{Deserialize, Serialize};

use super::bundle::{IndicatorKind, IndicatorResult};
use super::rolling::{rolling_mean, rolling_sample_std};
use super::{latest, Indicator};
use crate::domain::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerSignal {
    NearLowerBand,
    NearUpperBand,
    BelowMiddle,
    AboveMiddle,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerResult {
    pub period: usize,
    pub multiplier: f64,
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    /// Latest close.
    pub price: f64,
    #[serde(with = "super::serde_nan")]
    pub upper_series: Vec<f64>,
    #[serde(with = "super::serde_nan")]
    pub middle_series: Vec<f64>,
    #[serde(with = "super::serde_nan")]
    pub lower_series: Vec<f64>,
    pub signal: BollingerSignal,
}

impl BollingerResult {
    /// Latest band width, `None` while undefined.
    pub fn width(&self) -> Option<f64> {
        Some(self.upper? - self.lower?)
    }

    /// Price position within the bands: 0 at the lower band, 1 at the upper.
    /// `None` while undefined or when the bands have zero width.
    pub fn position(&self) -> Option<f64> {
        let width = self.width()?;
        if width == 0.0 {
            return None;
        }
        Some((self.price - self.lower?) / width)
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        assert!(
            multiplier.is_finite() && multiplier >= 0.0,
            "Bollinger multiplier must be finite and >= 0"
        );
        Self { period, multiplier }
    }

    pub fn result_for(&self, closes: &[f64]) -> BollingerResult {
        let middle_series = rolling_mean(closes, self.period);
        let std_series = rolling_sample_std(closes, self.period);
        let upper_series: Vec<f64> = middle_series
            .iter()
            .zip(&std_series)
            .map(|(m, s)| m + self.multiplier * s)
            .collect();
        let lower_series: Vec<f64> = middle_series
            .iter()
            .zip(&std_series)
            .map(|(m, s)| m - self.multiplier * s)
            .collect();

        let price = closes.last().copied().unwrap_or(f64::NAN);
        let upper = latest(&upper_series);
        let middle = latest(&middle_series);
        let lower = latest(&lower_series);

        let signal = match (upper, middle, lower) {
            (Some(upper), Some(middle), Some(lower)) => {
                if price <= lower {
                    BollingerSignal::NearLowerBand
                } else if price >= upper {
                    BollingerSignal::NearUpperBand
                } else if price < middle {
                    BollingerSignal::BelowMiddle
                } else {
                    BollingerSignal::AboveMiddle
                }
            }
            _ => BollingerSignal::InsufficientData,
        };

        BollingerResult {
            period: self.period,
            multiplier: self.multiplier,
            upper,
            middle,
            lower,
            price,
            upper_series,
            middle_series,
            lower_series,
            signal,
        }
    }
}

impl Indicator for Bollinger {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Bollinger
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorResult {
        IndicatorResult::Bollinger(self.result_for(&series.closes()))
    }
}
