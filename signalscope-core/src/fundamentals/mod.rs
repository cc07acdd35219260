//! Fundamental data supplied by the caller.
//!
//! `FundamentalSnapshot` is the three-field view the scorer uses for the
//! long-horizon fundamentals component. `FundamentalProfile` is the extended
//! record the health analyzer grades. Every field is optional: a missing
//! metric is absent, never zero.

pub mod health;

pub use health::{FundamentalAnalyzer, HealthReport, ValuationStatus};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalSnapshot {
    pub pe_ratio_trailing: Option<f64>,
    pub profit_margin: Option<f64>,
    pub revenue_growth: Option<f64>,
}

impl FundamentalSnapshot {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.pe_ratio_trailing.is_none()
            && self.profit_margin.is_none()
            && self.revenue_growth.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationMetrics {
    pub pe_trailing: Option<f64>,
    pub pe_forward: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub price_to_sales: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilityMetrics {
    pub profit_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub gross_margin: Option<f64>,
    pub ebitda_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthMetrics {
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub eps: Option<f64>,
    pub eps_forward: Option<f64>,
    pub revenue_per_share: Option<f64>,
    pub earnings_quarterly_growth: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialHealthMetrics {
    /// Expressed in percent, as most data vendors report it (150 = 1.5x).
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub total_cash: Option<f64>,
    pub total_debt: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividendMetrics {
    /// Fraction, not percent (0.03 = 3 %).
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub five_year_avg_dividend_yield: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherMetrics {
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalProfile {
    pub valuation: ValuationMetrics,
    pub profitability: ProfitabilityMetrics,
    pub growth: GrowthMetrics,
    pub financial_health: FinancialHealthMetrics,
    pub dividends: DividendMetrics,
    pub other: OtherMetrics,
}

impl FundamentalProfile {
    /// Drop dividend values that can only be vendor glitches: a yield outside
    /// [0, 1] or a payout ratio outside [-1, 10].
    pub fn sanitized(mut self) -> Self {
        if let Some(y) = self.dividends.dividend_yield {
            if !(0.0..=1.0).contains(&y) {
                self.dividends.dividend_yield = None;
            }
        }
        if let Some(p) = self.dividends.payout_ratio {
            if !(-1.0..=10.0).contains(&p) {
                self.dividends.payout_ratio = None;
            }
        }
        self
    }

    pub fn snapshot(&self) -> FundamentalSnapshot {
        FundamentalSnapshot {
            pe_ratio_trailing: self.valuation.pe_trailing,
            profit_margin: self.profitability.profit_margin,
            revenue_growth: self.growth.revenue_growth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_impossible_dividends() {
        let mut profile = FundamentalProfile::default();
        profile.dividends.dividend_yield = Some(3.5);
        profile.dividends.payout_ratio = Some(12.0);
        let clean = profile.sanitized();
        assert_eq!(clean.dividends.dividend_yield, None);
        assert_eq!(clean.dividends.payout_ratio, None);
    }

    #[test]
    fn sanitize_keeps_plausible_dividends() {
        let mut profile = FundamentalProfile::default();
        profile.dividends.dividend_yield = Some(0.03);
        profile.dividends.payout_ratio = Some(-0.5);
        let clean = profile.clone().sanitized();
        assert_eq!(clean, profile);
    }

    #[test]
    fn snapshot_projects_three_fields() {
        let json = r#"{
            "valuation": {"pe_trailing": 18.0},
            "profitability": {"profit_margin": 0.12},
            "growth": {"revenue_growth": 0.07}
        }"#;
        let profile: FundamentalProfile = serde_json::from_str(json).unwrap();
        let snapshot = profile.snapshot();
        assert_eq!(snapshot.pe_ratio_trailing, Some(18.0));
        assert_eq!(snapshot.profit_margin, Some(0.12));
        assert_eq!(snapshot.revenue_growth, Some(0.07));
        assert!(!snapshot.is_empty());
        assert!(FundamentalSnapshot::default().is_empty());
    }
}
