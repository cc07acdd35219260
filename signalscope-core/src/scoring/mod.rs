//! Weighted scoring of an indicator bundle into a BUY/SELL/HOLD signal.
//!
//! Every evaluable component with a non-zero weight contributes
//! `raw / 100 × weight` points. The final score is the floor of the sum; it is
//! not renormalized by the evaluated weight total, so a timeframe whose
//! weights sum below 100 (or a bundle missing components) caps the reachable
//! score. `ScoreResult::evaluated_percent` gives the normalized view for
//! display.

pub mod config;
pub mod decision;
pub mod rules;

pub use config::{
    ComponentWeights, RiskTolerance, ScoreComponent, ScoringConfig, ScoringError, Thresholds,
    Timeframe,
};
pub use decision::{decide_confidence, decide_signal, Confidence, Signal};

use serde::{Deserialize, Serialize};

use crate::fundamentals::FundamentalSnapshot;
use crate::indicators::IndicatorBundle;

/// One component's contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub component: ScoreComponent,
    /// 0–100.
    pub raw_score: u32,
    pub max_weight: u32,
    pub weighted: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0–100.
    pub final_score: u32,
    pub signal: Signal,
    pub confidence: Confidence,
    pub breakdown: Vec<ScoreBreakdown>,
    /// Sum of `max_weight` over the breakdown.
    pub max_score: u32,
    pub timeframe: Timeframe,
    pub risk_tolerance: RiskTolerance,
}

impl ScoreResult {
    pub fn total_weighted(&self) -> f64 {
        self.breakdown.iter().map(|b| b.weighted).sum()
    }

    /// Weighted points as a percentage of the weight actually evaluated.
    pub fn evaluated_percent(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        self.total_weighted() / self.max_score as f64 * 100.0
    }

    pub fn component(&self, component: ScoreComponent) -> Option<&ScoreBreakdown> {
        self.breakdown.iter().find(|b| b.component == component)
    }
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        bundle: &IndicatorBundle,
        timeframe: Timeframe,
        risk: RiskTolerance,
        fundamentals: Option<&FundamentalSnapshot>,
    ) -> ScoreResult {
        let weights = self.config.weights(timeframe);
        let thresholds = self.config.thresholds(risk);

        let mut breakdown = Vec::new();
        for component in ScoreComponent::ALL {
            let weight = weights.get(component);
            if weight == 0 {
                continue;
            }
            if let Some(raw_score) = raw_score(component, bundle, fundamentals) {
                breakdown.push(ScoreBreakdown {
                    component,
                    raw_score,
                    max_weight: weight,
                    weighted: f64::from(raw_score * weight) / 100.0,
                });
            }
        }

        let max_score: u32 = breakdown.iter().map(|b| b.max_weight).sum();
        // Integer points keep the floor exact: 61.25 → 61, never 60.999…
        let points: u32 = breakdown.iter().map(|b| b.raw_score * b.max_weight).sum();
        let final_score = if max_score > 0 { (points / 100).min(100) } else { 0 };

        ScoreResult {
            final_score,
            signal: decide_signal(final_score, thresholds),
            confidence: decide_confidence(final_score, thresholds),
            breakdown,
            max_score,
            timeframe,
            risk_tolerance: risk,
        }
    }
}

/// Raw score for one component, `None` when it cannot be evaluated.
fn raw_score(
    component: ScoreComponent,
    bundle: &IndicatorBundle,
    fundamentals: Option<&FundamentalSnapshot>,
) -> Option<u32> {
    match component {
        ScoreComponent::Rsi => bundle.rsi()?.value.map(rules::rsi_score),
        ScoreComponent::Macd => {
            let macd = bundle.macd()?;
            Some(rules::macd_score(
                macd.macd_line?,
                macd.signal_line?,
                macd.histogram?,
            ))
        }
        ScoreComponent::Bollinger => {
            let bands = bundle.bollinger()?;
            bands.width()?;
            Some(rules::bollinger_score(bands))
        }
        ScoreComponent::Sma => {
            let sma = bundle.sma()?;
            Some(rules::sma_score(sma.price, sma.short, sma.long))
        }
        ScoreComponent::Volume => bundle.volume()?.change_pct.map(rules::volume_score),
        ScoreComponent::Fundamentals => fundamentals
            .filter(|f| !f.is_empty())
            .map(rules::fundamentals_score),
    }
}
