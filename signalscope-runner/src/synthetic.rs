//! Synthetic price series for demos and tests.
//!
//! A seeded geometric random walk over weekdays: each session's close is the
//! previous close times `1 + r`, `r ~ Normal(drift, volatility)`. Reports built
//! on this data carry `synthetic: true`.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use signalscope_core::domain::{PriceBar, PriceSeries, SeriesError};
use signalscope_core::rng::RngHierarchy;

const SYNTHETIC_STREAM: &str = "synthetic";

#[derive(Debug, Error)]
pub enum SyntheticError {
    #[error("invalid synthetic parameter {field}: {value}")]
    InvalidParameter { field: &'static str, value: f64 },

    #[error("generated series rejected: {0}")]
    Series(#[from] SeriesError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticConfig {
    pub bars: usize,
    pub start_price: f64,
    /// Mean daily return.
    pub drift: f64,
    /// Daily return standard deviation.
    pub volatility: f64,
    pub start_date: NaiveDate,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            bars: 300,
            start_price: 100.0,
            drift: 0.0005,
            volatility: 0.015,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or_default(),
            seed: 42,
        }
    }
}

/// Generate a synthetic series. Same config, same bars.
pub fn generate(config: &SyntheticConfig) -> Result<PriceSeries, SyntheticError> {
    if !(config.start_price.is_finite() && config.start_price > 0.0) {
        return Err(SyntheticError::InvalidParameter {
            field: "start_price",
            value: config.start_price,
        });
    }
    if config.bars == 0 {
        return Err(SyntheticError::InvalidParameter {
            field: "bars",
            value: 0.0,
        });
    }
    let returns = Normal::new(config.drift, config.volatility).map_err(|_| {
        SyntheticError::InvalidParameter {
            field: "volatility",
            value: config.volatility,
        }
    })?;

    let mut rng = RngHierarchy::new(config.seed).rng_for(SYNTHETIC_STREAM, 0);
    let mut bars = Vec::with_capacity(config.bars);
    let mut price = config.start_price;
    let mut date = config.start_date;

    while bars.len() < config.bars {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += chrono::Duration::days(1);
            continue;
        }

        // Floor the step so a fat draw cannot push the close to zero.
        let r = returns.sample(&mut rng).max(-0.5);
        let open = price;
        let close = price * (1.0 + r);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000.0..5_000_000.0_f64).round();

        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        date += chrono::Duration::days(1);
    }

    Ok(PriceSeries::new(bars)?)
}
