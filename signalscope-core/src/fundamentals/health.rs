//! Fundamental health score and valuation status.
//!
//! Each metric block adds its maximum to `max` only when the metric is present
//! and non-zero (debt/equity counts at zero too), then awards points against
//! fixed bands. score = floor(earned / max × 100).

use serde::{Deserialize, Serialize};

use super::FundamentalProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationStatus {
    Undervalued,
    FairlyValued,
    Overvalued,
    InsufficientData,
}

impl std::fmt::Display for ValuationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValuationStatus::Undervalued => "Undervalued",
            ValuationStatus::FairlyValued => "Fairly Valued",
            ValuationStatus::Overvalued => "Overvalued",
            ValuationStatus::InsufficientData => "Insufficient data",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// 0–100.
    pub score: u32,
    pub earned: u32,
    pub max: u32,
    pub red_flags: Vec<String>,
    pub strengths: Vec<String>,
    pub valuation: ValuationStatus,
}

/// Grades an extended fundamental profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct FundamentalAnalyzer;

/// Points tally with the findings collected along the way.
#[derive(Default)]
struct Tally {
    earned: u32,
    max: u32,
    red_flags: Vec<String>,
    strengths: Vec<String>,
}

impl Tally {
    fn block(&mut self, max: u32) {
        self.max += max;
    }

    fn award(&mut self, points: u32) {
        self.earned += points;
    }

    fn strength(&mut self, msg: impl Into<String>) {
        self.strengths.push(msg.into());
    }

    fn red_flag(&mut self, msg: impl Into<String>) {
        self.red_flags.push(msg.into());
    }
}

/// Present and non-zero.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|&v| v != 0.0 && !v.is_nan())
}

impl FundamentalAnalyzer {
    pub fn health(profile: &FundamentalProfile) -> HealthReport {
        let profile = profile.clone().sanitized();
        let mut t = Tally::default();

        let val = &profile.valuation;
        if let Some(pe) = nonzero(val.pe_trailing) {
            t.block(10);
            if pe > 10.0 && pe < 25.0 {
                t.award(10);
                t.strength("Healthy P/E ratio (10-25)");
            } else if pe > 40.0 {
                t.award(2);
                t.red_flag(format!("High P/E ratio ({pe:.1}) - may be overvalued"));
            } else if pe > 0.0 {
                t.award(6);
            }
        }

        if let Some(peg) = nonzero(val.peg_ratio) {
            t.block(10);
            if peg > 0.0 && peg < 1.0 {
                t.award(10);
                t.strength(format!("Excellent PEG ratio ({peg:.2}) - undervalued growth"));
            } else if (1.0..2.0).contains(&peg) {
                t.award(7);
                t.strength("Good PEG ratio (1-2)");
            } else if peg > 3.0 {
                t.award(2);
                t.red_flag(format!("High PEG ratio ({peg:.2})"));
            }
        }

        let prof = &profile.profitability;
        if let Some(margin) = nonzero(prof.profit_margin) {
            t.block(8);
            if margin > 0.20 {
                t.award(8);
                t.strength(format!("Strong profit margin ({:.1}%)", margin * 100.0));
            } else if margin > 0.10 {
                t.award(6);
            } else if margin < 0.0 {
                t.red_flag(format!("Negative profit margin ({:.1}%)", margin * 100.0));
            }
        }

        if let Some(roe) = nonzero(prof.roe) {
            t.block(9);
            if roe > 0.15 {
                t.award(9);
                t.strength(format!("Excellent ROE ({:.1}%)", roe * 100.0));
            } else if roe > 0.10 {
                t.award(6);
            } else if roe < 0.0 {
                t.red_flag(format!("Negative ROE ({:.1}%)", roe * 100.0));
            }
        }

        if let Some(op) = nonzero(prof.operating_margin) {
            t.block(8);
            if op > 0.15 {
                t.award(8);
            } else if op > 0.05 {
                t.award(5);
            } else if op < 0.0 {
                t.red_flag("Negative operating margin");
            }
        }

        let growth = &profile.growth;
        for (label, value) in [
            ("revenue", growth.revenue_growth),
            ("earnings", growth.earnings_growth),
        ] {
            let Some(g) = nonzero(value) else { continue };
            t.block(10);
            if g > 0.15 {
                t.award(10);
                t.strength(format!("Strong {label} growth ({:.1}%)", g * 100.0));
            } else if g > 0.05 {
                t.award(7);
            } else if g < 0.0 {
                t.red_flag(format!("Negative {label} growth ({:.1}%)", g * 100.0));
            }
        }

        let health = &profile.financial_health;
        if let Some(de) = health.debt_to_equity.filter(|v| !v.is_nan()) {
            t.block(10);
            if de < 50.0 {
                t.award(10);
                t.strength(format!("Low debt-to-equity ({de:.1})"));
            } else if de < 100.0 {
                t.award(7);
            } else if de > 200.0 {
                t.award(2);
                t.red_flag(format!("High debt-to-equity ratio ({de:.1})"));
            }
        }

        if let Some(cr) = nonzero(health.current_ratio) {
            t.block(8);
            if cr > 2.0 {
                t.award(8);
                t.strength(format!("Excellent current ratio ({cr:.2})"));
            } else if cr > 1.5 {
                t.award(6);
            } else if cr < 1.0 {
                t.award(2);
                t.red_flag(format!("Low current ratio ({cr:.2}) - liquidity concerns"));
            }
        }

        if let Some(fcf) = nonzero(health.free_cash_flow) {
            t.block(7);
            if fcf > 0.0 {
                t.award(7);
                if fcf > 1e9 {
                    t.strength("Strong free cash flow");
                }
            } else {
                t.red_flag("Negative free cash flow");
            }
        }

        let div = &profile.dividends;
        if let Some(y) = div.dividend_yield.filter(|&y| y > 0.0) {
            t.block(5);
            if y > 0.02 && y < 0.06 {
                t.award(5);
                t.strength(format!("Healthy dividend yield ({:.1}%)", y * 100.0));
            } else if y > 0.08 {
                t.award(2);
                t.red_flag(format!(
                    "Very high dividend yield ({:.1}%) - sustainability risk",
                    y * 100.0
                ));
            }

            if let Some(p) = nonzero(div.payout_ratio) {
                t.block(5);
                if p > 0.0 && p < 0.6 {
                    t.award(5);
                    t.strength("Sustainable payout ratio");
                } else if p > 0.8 {
                    t.red_flag(format!(
                        "High payout ratio ({:.0}%) - sustainability risk",
                        p * 100.0
                    ));
                }
            }
        }

        let score = if t.max > 0 { t.earned * 100 / t.max } else { 0 };

        HealthReport {
            score,
            earned: t.earned,
            max: t.max,
            red_flags: t.red_flags,
            strengths: t.strengths,
            valuation: Self::valuation(&profile),
        }
    }

    /// Majority vote over P/E, PEG (double weight when decisive) and P/B.
    pub fn valuation(profile: &FundamentalProfile) -> ValuationStatus {
        let val = &profile.valuation;
        let (mut under, mut over, mut fair) = (0u32, 0u32, 0u32);

        if let Some(pe) = nonzero(val.pe_trailing) {
            if pe < 15.0 {
                under += 1;
            } else if pe > 30.0 {
                over += 1;
            } else {
                fair += 1;
            }
        }

        if let Some(peg) = nonzero(val.peg_ratio) {
            if peg < 1.0 {
                under += 2;
            } else if peg > 2.0 {
                over += 2;
            } else {
                fair += 1;
            }
        }

        if let Some(pb) = nonzero(val.pb_ratio) {
            if pb < 1.5 {
                under += 1;
            } else if pb > 5.0 {
                over += 1;
            } else {
                fair += 1;
            }
        }

        if under + over + fair == 0 {
            ValuationStatus::InsufficientData
        } else if under > over && under > fair {
            ValuationStatus::Undervalued
        } else if over > under && over > fair {
            ValuationStatus::Overvalued
        } else {
            ValuationStatus::FairlyValued
        }
    }
}
