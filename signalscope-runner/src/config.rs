//! Analysis configuration: TOML file with per-request knobs and optional
//! overrides of the indicator and scoring tables.
//!
//! ```toml
//! timeframe = "medium"
//! risk_tolerance = "aggressive"
//! iterations = 2000
//! seed = 42
//!
//! [indicators]
//! rsi_period = 10
//!
//! [scoring.medium]
//! rsi = 20
//! macd = 25
//! bollinger = 15
//! volume = 15
//! sma = 25
//! ```
//!
//! Every field is optional; unknown fields are rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use signalscope_core::indicators::{IndicatorConfig, IndicatorError};
use signalscope_core::monte_carlo::SimulationConfig;
use signalscope_core::scoring::{RiskTolerance, ScoringConfig, ScoringError, Timeframe};

/// Errors from loading or validating an analysis config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid indicator settings: {0}")]
    Indicators(#[from] IndicatorError),

    #[error("invalid scoring tables: {0}")]
    Scoring(#[from] ScoringError),

    #[error("{field} must be >= 1, got {value}")]
    Invalid { field: &'static str, value: usize },
}

/// Full configuration for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub timeframe: Timeframe,
    pub risk_tolerance: RiskTolerance,
    /// Monte Carlo path count.
    pub iterations: usize,
    /// Master seed for the projection. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Projection horizon override; defaults to the timeframe's horizon.
    pub days: Option<usize>,
    /// Keep every simulated path in the report.
    pub include_paths: bool,
    pub indicators: IndicatorConfig,
    pub scoring: ScoringConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::default(),
            risk_tolerance: RiskTolerance::default(),
            iterations: SimulationConfig::default().iterations,
            seed: None,
            days: None,
            include_paths: false,
            indicators: IndicatorConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "iterations",
                value: 0,
            });
        }
        if self.days == Some(0) {
            return Err(ConfigError::Invalid {
                field: "days",
                value: 0,
            });
        }
        self.indicators.validate()?;
        self.scoring.validate()?;
        Ok(())
    }

    /// Projection horizon in sessions: the override, else the timeframe's.
    pub fn horizon_days(&self) -> usize {
        self.days.unwrap_or_else(|| self.timeframe.horizon_days())
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}
