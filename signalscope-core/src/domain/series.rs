//! PriceSeries — validated, chronologically ordered bars for one analysis request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PriceBar;

/// Errors raised while validating a price series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("dates must be strictly increasing: {previous} is followed by {next} at bar {index}")]
    NonIncreasingDates {
        index: usize,
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("close at bar {index} ({date}) must be finite and positive, got {close}")]
    InvalidClose {
        index: usize,
        date: NaiveDate,
        close: f64,
    },

    #[error("volume at bar {index} ({date}) must be finite and non-negative, got {volume}")]
    InvalidVolume {
        index: usize,
        date: NaiveDate,
        volume: f64,
    },
}

/// Non-empty sequence of bars with strictly increasing dates.
///
/// Immutable once built; every engine reads it through `bars()` or the
/// extracted `closes()` / `volumes()` columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and wrap a bar vector.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::EmptySeries);
        }

        for (index, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(SeriesError::InvalidClose {
                    index,
                    date: bar.date,
                    close: bar.close,
                });
            }
            if !bar.volume.is_finite() || bar.volume < 0.0 {
                return Err(SeriesError::InvalidVolume {
                    index,
                    date: bar.date,
                    volume: bar.volume,
                });
            }
            if index > 0 && bars[index - 1].date >= bar.date {
                return Err(SeriesError::NonIncreasingDates {
                    index,
                    previous: bars[index - 1].date,
                    next: bar.date,
                });
            }
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar. A series is never empty.
    pub fn last(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last().date
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn into_bars(self) -> Vec<PriceBar> {
        self.bars
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            bars: Vec<PriceBar>,
        }

        let raw = Raw::deserialize(deserializer)?;
        PriceSeries::new(raw.bars).map_err(serde::de::Error::custom)
    }
}
