//! IndicatorEngine — validated configuration plus the full indicator set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bundle::IndicatorBundle;
use super::{Bollinger, Indicator, Macd, Rsi, SmaCross, VolumeTrend};
use crate::domain::PriceSeries;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("{indicator} period must be >= {min}, got {period}")]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
        min: usize,
    },

    #[error("MACD fast period ({fast}) must be less than slow period ({slow})")]
    InvalidMacdPeriods { fast: usize, slow: usize },

    #[error("Bollinger multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f64),
}

/// Indicator periods. Defaults are the conventional daily-chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub sma_short: usize,
    pub sma_long: usize,
    pub volume_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            sma_short: 50,
            sma_long: 200,
            volume_period: 20,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let min_periods = [
            ("rsi", self.rsi_period, 1),
            ("macd fast", self.macd_fast, 1),
            ("macd slow", self.macd_slow, 1),
            ("macd signal", self.macd_signal, 1),
            ("bollinger", self.bollinger_period, 2),
            ("sma short", self.sma_short, 1),
            ("sma long", self.sma_long, 1),
            ("volume", self.volume_period, 1),
        ];
        for (indicator, period, min) in min_periods {
            if period < min {
                return Err(IndicatorError::InvalidPeriod {
                    indicator,
                    period,
                    min,
                });
            }
        }

        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidMacdPeriods {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }

        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier < 0.0 {
            return Err(IndicatorError::InvalidMultiplier(self.bollinger_multiplier));
        }

        Ok(())
    }
}

/// Computes RSI, MACD, Bollinger Bands, the SMA pair and volume for a series.
pub struct IndicatorEngine {
    config: IndicatorConfig,
    indicators: Vec<Box<dyn Indicator>>,
}

impl std::fmt::Debug for IndicatorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::build(IndicatorConfig::default())
    }
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndicatorConfig) -> Self {
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Rsi::new(config.rsi_period)),
            Box::new(Macd::new(
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
            )),
            Box::new(Bollinger::new(
                config.bollinger_period,
                config.bollinger_multiplier,
            )),
            Box::new(SmaCross::new(config.sma_short, config.sma_long)),
            Box::new(VolumeTrend::new(config.volume_period)),
        ];
        Self { config, indicators }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Bars needed before every indicator has a defined latest value.
    pub fn max_lookback(&self) -> usize {
        self.indicators
            .iter()
            .map(|ind| ind.lookback())
            .max()
            .unwrap_or(0)
    }

    /// Run every indicator over the series. Never fails: short input
    /// degrades to `None` latest values and `InsufficientData` signals.
    pub fn compute_all(&self, series: &PriceSeries) -> IndicatorBundle {
        self.indicators
            .iter()
            .map(|ind| ind.compute(series))
            .collect()
    }
}
