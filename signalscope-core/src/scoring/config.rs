//! Scoring tables: per-timeframe component weights and per-risk thresholds.
//!
//! The tables are plain configuration values handed to `ScoringEngine::new`.
//! Defaults reproduce the standard weighting; every table can be overridden
//! from the analysis config file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis horizon. Selects the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    Short,
    Medium,
    Long,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Short, Timeframe::Medium, Timeframe::Long];

    /// Projection horizon in trading days: 1 week, 1 month, 6 months.
    pub fn horizon_days(&self) -> usize {
        match self {
            Self::Short => 7,
            Self::Medium => 28,
            Self::Long => 180,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Investor risk tolerance. Selects the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [
        RiskTolerance::Conservative,
        RiskTolerance::Moderate,
        RiskTolerance::Aggressive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One scored component of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    Rsi,
    Macd,
    Bollinger,
    Sma,
    Volume,
    Fundamentals,
}

impl ScoreComponent {
    pub const ALL: [ScoreComponent; 6] = [
        ScoreComponent::Rsi,
        ScoreComponent::Macd,
        ScoreComponent::Bollinger,
        ScoreComponent::Sma,
        ScoreComponent::Volume,
        ScoreComponent::Fundamentals,
    ];
}

/// Maximum points per component for one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentWeights {
    pub rsi: u32,
    pub macd: u32,
    pub bollinger: u32,
    pub volume: u32,
    pub sma: u32,
    #[serde(default)]
    pub fundamentals: u32,
}

impl ComponentWeights {
    pub fn get(&self, component: ScoreComponent) -> u32 {
        match component {
            ScoreComponent::Rsi => self.rsi,
            ScoreComponent::Macd => self.macd,
            ScoreComponent::Bollinger => self.bollinger,
            ScoreComponent::Sma => self.sma,
            ScoreComponent::Volume => self.volume,
            ScoreComponent::Fundamentals => self.fundamentals,
        }
    }

    /// Sum of all weights, widened so oversized entries cannot wrap.
    pub fn total(&self) -> u64 {
        ScoreComponent::ALL
            .iter()
            .map(|&c| u64::from(self.get(c)))
            .sum()
    }
}

/// Decision thresholds for one risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    pub buy: u32,
    pub sell: u32,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("{timeframe} weights total {total}, must not exceed 100")]
    WeightTotalExceeded { timeframe: Timeframe, total: u64 },

    #[error("{risk} {name} threshold must be within 0..=100, got {value}")]
    ThresholdOutOfRange {
        risk: RiskTolerance,
        name: &'static str,
        value: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub short: ComponentWeights,
    pub medium: ComponentWeights,
    pub long: ComponentWeights,
    pub conservative: Thresholds,
    pub moderate: Thresholds,
    pub aggressive: Thresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            short: ComponentWeights {
                rsi: 25,
                macd: 30,
                bollinger: 20,
                volume: 15,
                sma: 10,
                fundamentals: 0,
            },
            medium: ComponentWeights {
                rsi: 20,
                macd: 25,
                bollinger: 15,
                volume: 10,
                sma: 25,
                fundamentals: 0,
            },
            long: ComponentWeights {
                rsi: 10,
                macd: 15,
                bollinger: 0,
                volume: 0,
                sma: 30,
                fundamentals: 25,
            },
            conservative: Thresholds {
                buy: 75,
                sell: 30,
                confidence: 70,
            },
            moderate: Thresholds {
                buy: 65,
                sell: 35,
                confidence: 60,
            },
            aggressive: Thresholds {
                buy: 60,
                sell: 45,
                confidence: 55,
            },
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self, timeframe: Timeframe) -> &ComponentWeights {
        match timeframe {
            Timeframe::Short => &self.short,
            Timeframe::Medium => &self.medium,
            Timeframe::Long => &self.long,
        }
    }

    pub fn thresholds(&self, risk: RiskTolerance) -> &Thresholds {
        match risk {
            RiskTolerance::Conservative => &self.conservative,
            RiskTolerance::Moderate => &self.moderate,
            RiskTolerance::Aggressive => &self.aggressive,
        }
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        for timeframe in Timeframe::ALL {
            let total = self.weights(timeframe).total();
            if total > 100 {
                return Err(ScoringError::WeightTotalExceeded { timeframe, total });
            }
        }

        for risk in RiskTolerance::ALL {
            let t = self.thresholds(risk);
            for (name, value) in [("buy", t.buy), ("sell", t.sell), ("confidence", t.confidence)] {
                if value > 100 {
                    return Err(ScoringError::ThresholdOutOfRange { risk, name, value });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.short.total(), 100);
        assert_eq!(config.medium.total(), 95);
        assert_eq!(config.long.total(), 80);
    }

    #[test]
    fn weight_total_over_100_rejected() {
        let mut config = ScoringConfig::default();
        config.medium.rsi = 30;
        assert_eq!(
            config.validate(),
            Err(ScoringError::WeightTotalExceeded {
                timeframe: Timeframe::Medium,
                total: 105
            })
        );
    }

    #[test]
    fn huge_weight_rejected_without_wrapping() {
        let mut config = ScoringConfig::default();
        config.short = ComponentWeights {
            rsi: u32::MAX,
            macd: 1,
            bollinger: 0,
            volume: 0,
            sma: 0,
            fundamentals: 0,
        };
        assert_eq!(
            config.validate(),
            Err(ScoringError::WeightTotalExceeded {
                timeframe: Timeframe::Short,
                total: u64::from(u32::MAX) + 1
            })
        );
    }

    #[test]
    fn threshold_over_100_rejected() {
        let mut config = ScoringConfig::default();
        config.aggressive.confidence = 101;
        assert!(matches!(
            config.validate(),
            Err(ScoringError::ThresholdOutOfRange {
                risk: RiskTolerance::Aggressive,
                name: "confidence",
                value: 101
            })
        ));
    }

    #[test]
    fn horizon_days() {
        assert_eq!(Timeframe::Short.horizon_days(), 7);
        assert_eq!(Timeframe::Medium.horizon_days(), 28);
        assert_eq!(Timeframe::Long.horizon_days(), 180);
    }

    #[test]
    fn enums_use_snake_case_names() {
        assert_eq!(serde_json::to_string(&Timeframe::Long).unwrap(), "\"long\"");
        let risk: RiskTolerance = serde_json::from_str("\"aggressive\"").unwrap();
        assert_eq!(risk, RiskTolerance::Aggressive);
        assert_eq!(RiskTolerance::default(), RiskTolerance::Moderate);
    }
}
