//! Analysis orchestration: one series in, one report out.
//!
//! `Analyzer` owns the three engines built from an `AnalysisConfig` and runs
//! them in order:
//! 1. indicators over the full series
//! 2. score from the bundle (plus the fundamentals snapshot, when given)
//! 3. Monte Carlo projection from the last close over the configured horizon
//! 4. scenarios, recommendation and fundamental health
//!
//! Engines stay silent; this layer emits the tracing events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use signalscope_core::domain::PriceSeries;
use signalscope_core::fundamentals::{FundamentalAnalyzer, FundamentalProfile, HealthReport};
use signalscope_core::indicators::{IndicatorBundle, IndicatorEngine, IndicatorError};
use signalscope_core::monte_carlo::{
    MonteCarloEngine, ScenarioPair, SimulationError, SimulationResult,
};
use signalscope_core::scoring::{RiskTolerance, ScoreResult, ScoringEngine, ScoringError, Timeframe};

use crate::config::{AnalysisConfig, ConfigError};
use crate::recommendation::Recommendation;

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("indicator error: {0}")]
    Indicators(#[from] IndicatorError),
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

/// Everything produced for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    /// Date of the last bar.
    pub as_of: NaiveDate,
    pub bars: usize,
    pub timeframe: Timeframe,
    pub risk_tolerance: RiskTolerance,
    pub indicators: IndicatorBundle,
    pub score: ScoreResult,
    /// Absent when the series is too short to estimate volatility; the
    /// indicators and score are still reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<ScenarioPair>,
    pub recommendation: Recommendation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthReport>,
    pub synthetic: bool,
}

/// Projection-only output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub as_of: NaiveDate,
    pub simulation: SimulationResult,
    pub scenarios: ScenarioPair,
    pub synthetic: bool,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    indicators: IndicatorEngine,
    scoring: ScoringEngine,
    monte_carlo: MonteCarloEngine,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let indicators = IndicatorEngine::new(config.indicators.clone())?;
        let scoring = ScoringEngine::new(config.scoring.clone())?;
        let monte_carlo = MonteCarloEngine::new(config.simulation_config());
        tracing::debug!(
            timeframe = %config.timeframe,
            risk = %config.risk_tolerance,
            iterations = config.iterations,
            seed = ?config.seed,
            days = config.horizon_days(),
            "analysis config resolved"
        );
        Ok(Self {
            config,
            indicators,
            scoring,
            monte_carlo,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline for one symbol.
    pub fn analyze(
        &self,
        symbol: &str,
        series: &PriceSeries,
        profile: Option<&FundamentalProfile>,
        synthetic: bool,
    ) -> Result<AnalysisReport, AnalysisError> {
        let current_price = series.last().close;
        let bundle = self.indicators.compute_all(series);

        let snapshot = profile.map(FundamentalProfile::snapshot);
        let score = self.scoring.score(
            &bundle,
            self.config.timeframe,
            self.config.risk_tolerance,
            snapshot.as_ref(),
        );

        let simulation = match self.project(series) {
            Ok(simulation) => Some(simulation),
            Err(AnalysisError::Simulation(SimulationError::InsufficientHistory {
                returns,
                required,
            })) => {
                tracing::warn!(
                    symbol,
                    returns,
                    required,
                    "history too short to project; reporting indicators and score only"
                );
                None
            }
            Err(e) => return Err(e),
        };
        let scenarios = simulation.as_ref().map(SimulationResult::scenarios);
        let recommendation =
            Recommendation::build(&score, scenarios.as_ref(), &bundle, current_price);
        let health = profile.map(FundamentalAnalyzer::health);

        tracing::info!(
            symbol,
            score = score.final_score,
            max_score = score.max_score,
            signal = %score.signal,
            confidence = %score.confidence,
            bull_probability = ?simulation.as_ref().map(|s| s.bull_probability),
            synthetic,
            "analysis finished"
        );

        Ok(AnalysisReport {
            schema_version: SCHEMA_VERSION,
            symbol: symbol.to_string(),
            as_of: series.last_date(),
            bars: series.len(),
            timeframe: self.config.timeframe,
            risk_tolerance: self.config.risk_tolerance,
            indicators: bundle,
            score,
            simulation,
            scenarios,
            recommendation,
            health,
            synthetic,
        })
    }

    /// Projection only, from the last close.
    pub fn projection(
        &self,
        symbol: &str,
        series: &PriceSeries,
        synthetic: bool,
    ) -> Result<ProjectionReport, AnalysisError> {
        let simulation = self.project(series)?;
        let scenarios = simulation.scenarios();
        tracing::info!(
            symbol,
            days = simulation.days,
            median = simulation.median,
            bull_probability = simulation.bull_probability,
            "projection finished"
        );
        Ok(ProjectionReport {
            schema_version: SCHEMA_VERSION,
            symbol: symbol.to_string(),
            as_of: series.last_date(),
            simulation,
            scenarios,
            synthetic,
        })
    }

    fn project(&self, series: &PriceSeries) -> Result<SimulationResult, AnalysisError> {
        let simulation =
            self.monte_carlo
                .simulate(series, self.config.horizon_days(), series.last().close)?;
        tracing::debug!(
            iterations = simulation.iterations,
            seed = simulation.seed,
            drift = simulation.drift,
            volatility = simulation.volatility,
            "simulation complete"
        );
        if self.config.include_paths {
            Ok(simulation)
        } else {
            Ok(simulation.without_paths())
        }
    }
}
