//! Volume versus its rolling average.
//!
//! change_pct = (latest - average) / average × 100, 0 when the average is 0.
//! Lookback: period - 1.

use serde::{Deserialize, Serialize};

use super::bundle::{IndicatorKind, IndicatorResult};
use super::rolling::rolling_mean;
use super::{latest, Indicator};
use crate::domain::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSignal {
    VeryHigh,
    Elevated,
    Normal,
    Low,
    InsufficientData,
}

impl VolumeSignal {
    pub fn from_change(change_pct: Option<f64>) -> Self {
        match change_pct {
            None => Self::InsufficientData,
            Some(c) if c > 50.0 => Self::VeryHigh,
            Some(c) if c > 20.0 => Self::Elevated,
            Some(c) if c < -20.0 => Self::Low,
            Some(_) => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    pub period: usize,
    /// Latest session's volume.
    pub current: f64,
    pub average: Option<f64>,
    pub change_pct: Option<f64>,
    #[serde(with = "super::serde_nan")]
    pub average_series: Vec<f64>,
    pub signal: VolumeSignal,
}

#[derive(Debug, Clone)]
pub struct VolumeTrend {
    period: usize,
}

impl VolumeTrend {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume period must be >= 1");
        Self { period }
    }

    pub fn result_for(&self, volumes: &[f64]) -> VolumeResult {
        let average_series = rolling_mean(volumes, self.period);
        let average = latest(&average_series);
        let current = volumes.last().copied().unwrap_or(0.0);
        let change_pct = average.map(|avg| {
            if avg > 0.0 {
                (current - avg) / avg * 100.0
            } else {
                0.0
            }
        });

        VolumeResult {
            period: self.period,
            current,
            average,
            change_pct,
            average_series,
            signal: VolumeSignal::from_change(change_pct),
        }
    }
}

impl Indicator for VolumeTrend {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Volume
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorResult {
        IndicatorResult::Volume(self.result_for(&series.volumes()))
    }
}
