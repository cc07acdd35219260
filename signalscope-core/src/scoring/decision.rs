//! Score → signal and confidence grade.

use serde::{Deserialize, Serialize};

use super::config::Thresholds;

/// Scores at or above this read STRONG BUY under every risk tolerance.
pub const STRONG_BUY_SCORE: u32 = 80;
/// Scores at or below this read STRONG SELL when the sell threshold does not catch them first.
pub const STRONG_SELL_SCORE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "STRONG BUY",
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
            Signal::StrongSell => "STRONG SELL",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Signal::StrongBuy | Signal::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Signal::StrongSell | Signal::Sell)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        };
        f.write_str(s)
    }
}

/// First matching rule wins. The 45..=55 HOLD band is checked before SELL,
/// so an aggressive sell threshold of 45 only fires below 45.
pub fn decide_signal(score: u32, thresholds: &Thresholds) -> Signal {
    if score >= STRONG_BUY_SCORE {
        Signal::StrongBuy
    } else if score >= thresholds.buy {
        Signal::Buy
    } else if (45..=55).contains(&score) {
        Signal::Hold
    } else if score <= thresholds.sell {
        Signal::Sell
    } else if score <= STRONG_SELL_SCORE {
        Signal::StrongSell
    } else {
        Signal::Hold
    }
}

/// High at either extreme (score >= c or score <= 100 - c), Medium outside
/// the 46..=54 band, Low inside it.
pub fn decide_confidence(score: u32, thresholds: &Thresholds) -> Confidence {
    let c = thresholds.confidence;
    if score >= c || score <= 100u32.saturating_sub(c) {
        Confidence::High
    } else if score >= 55 || score <= 45 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
