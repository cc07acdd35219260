//! Turn a score and scenario pair into an actionable recommendation.
//!
//! Buys get a trade plan: an entry band of ±1 % around the current price, the
//! bull-case target, a stop 3 % below current and a position-size band set by
//! risk tolerance. Sells and holds carry no plan.

use serde::{Deserialize, Serialize};

use signalscope_core::indicators::{
    BollingerSignal, IndicatorBundle, IndicatorResult, MacdSignal, RsiSignal, SmaSignal,
    VolumeSignal,
};
use signalscope_core::monte_carlo::ScenarioPair;
use signalscope_core::scoring::{Confidence, RiskTolerance, ScoreResult, Signal};

const ENTRY_BAND: f64 = 0.01;
const STOP_LOSS_FACTOR: f64 = 0.97;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn from_signal(signal: Signal) -> Self {
        if signal.is_buy() {
            Action::Buy
        } else if signal.is_sell() {
            Action::Sell
        } else {
            Action::Hold
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
            Action::Hold => "hold",
        };
        f.write_str(s)
    }
}

/// Percent of portfolio to commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl PositionSize {
    pub fn for_risk(risk: RiskTolerance) -> Self {
        let (min_pct, max_pct) = match risk {
            RiskTolerance::Conservative => (2.0, 3.0),
            RiskTolerance::Moderate => (3.0, 5.0),
            RiskTolerance::Aggressive => (7.0, 10.0),
        };
        Self { min_pct, max_pct }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry_low: f64,
    pub entry_high: f64,
    pub target: f64,
    pub stop_loss: f64,
    pub position_size: PositionSize,
}

/// How many indicators lean each way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consensus {
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
}

impl Consensus {
    /// Indicators without enough history are left out of the count.
    pub fn from_bundle(bundle: &IndicatorBundle) -> Self {
        let mut consensus = Consensus::default();
        for result in bundle.iter() {
            match lean(result) {
                Some(Lean::Bullish) => consensus.bullish += 1,
                Some(Lean::Bearish) => consensus.bearish += 1,
                Some(Lean::Neutral) => consensus.neutral += 1,
                None => {}
            }
        }
        consensus
    }

    pub fn total(&self) -> usize {
        self.bullish + self.bearish + self.neutral
    }
}

enum Lean {
    Bullish,
    Bearish,
    Neutral,
}

fn lean(result: &IndicatorResult) -> Option<Lean> {
    let lean = match result {
        IndicatorResult::Rsi(r) => match r.signal {
            RsiSignal::Oversold => Lean::Bullish,
            RsiSignal::Overbought => Lean::Bearish,
            RsiSignal::Neutral => Lean::Neutral,
            RsiSignal::InsufficientData => return None,
        },
        IndicatorResult::Macd(m) => {
            if !m.warmed_up {
                return None;
            }
            match m.signal {
                MacdSignal::Bullish => Lean::Bullish,
                MacdSignal::Bearish => Lean::Bearish,
                MacdSignal::Neutral => Lean::Neutral,
            }
        }
        IndicatorResult::Bollinger(b) => match b.signal {
            BollingerSignal::AboveMiddle => Lean::Bullish,
            BollingerSignal::BelowMiddle => Lean::Bearish,
            BollingerSignal::NearLowerBand | BollingerSignal::NearUpperBand => Lean::Neutral,
            BollingerSignal::InsufficientData => return None,
        },
        IndicatorResult::Sma(s) => match s.signal {
            SmaSignal::GoldenCrossUptrend | SmaSignal::BullishLongTerm => Lean::Bullish,
            SmaSignal::DeathCrossDowntrend | SmaSignal::BearishLongTerm => Lean::Bearish,
            SmaSignal::Neutral => Lean::Neutral,
            SmaSignal::InsufficientData => return None,
        },
        IndicatorResult::Volume(v) => match v.signal {
            VolumeSignal::VeryHigh | VolumeSignal::Elevated => Lean::Bullish,
            VolumeSignal::Low => Lean::Bearish,
            VolumeSignal::Normal => Lean::Neutral,
            VolumeSignal::InsufficientData => return None,
        },
    };
    Some(lean)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub signal: Signal,
    pub score: u32,
    pub confidence: Confidence,
    pub current_price: f64,
    /// Present for buys with a projection only.
    pub plan: Option<TradePlan>,
    /// Absent when the series was too short to project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reward_ratio: Option<f64>,
    pub consensus: Consensus,
}

impl Recommendation {
    pub fn build(
        score: &ScoreResult,
        scenarios: Option<&ScenarioPair>,
        bundle: &IndicatorBundle,
        current_price: f64,
    ) -> Self {
        let action = Action::from_signal(score.signal);
        let plan = scenarios
            .filter(|_| action == Action::Buy)
            .map(|scenarios| TradePlan {
                entry_low: current_price * (1.0 - ENTRY_BAND),
                entry_high: current_price * (1.0 + ENTRY_BAND),
                target: scenarios.bull.target,
                stop_loss: current_price * STOP_LOSS_FACTOR,
                position_size: PositionSize::for_risk(score.risk_tolerance),
            });

        Self {
            action,
            signal: score.signal,
            score: score.final_score,
            confidence: score.confidence,
            current_price,
            plan,
            risk_reward_ratio: scenarios.map(ScenarioPair::risk_reward_ratio),
            consensus: Consensus::from_bundle(bundle),
        }
    }

    /// One-line summary, e.g. `BUY 61/100 (High confidence), 3 bullish / 1 bearish / 1 neutral`.
    pub fn headline(&self) -> String {
        format!(
            "{} {}/100 ({} confidence), {} bullish / {} bearish / {} neutral",
            self.signal,
            self.score,
            self.confidence,
            self.consensus.bullish,
            self.consensus.bearish,
            self.consensus.neutral
        )
    }
}
