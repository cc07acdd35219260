//! Raw 0–100 component scores.
//!
//! Each rule maps one indicator reading onto a fixed breakpoint table. Higher
//! is more bullish; oversold/overbought readings are scored contrarian.

use crate::fundamentals::FundamentalSnapshot;
use crate::indicators::BollingerResult;

pub fn rsi_score(rsi: f64) -> u32 {
    if rsi < 30.0 {
        85
    } else if rsi < 40.0 {
        70
    } else if rsi < 50.0 {
        55
    } else if rsi < 60.0 {
        50
    } else if rsi < 70.0 {
        45
    } else if rsi < 80.0 {
        30
    } else {
        15
    }
}

pub fn macd_score(macd: f64, signal: f64, histogram: f64) -> u32 {
    if macd > signal {
        if histogram > 0.0 {
            85
        } else {
            65
        }
    } else if histogram < 0.0 {
        15
    } else {
        35
    }
}

/// Position-in-band score. Zero-width bands score neutral.
pub fn bollinger_score(bands: &BollingerResult) -> u32 {
    let Some(position) = bands.position() else {
        return 50;
    };

    if position < 0.1 {
        80
    } else if position < 0.3 {
        65
    } else if position < 0.7 {
        50
    } else if position < 0.9 {
        35
    } else {
        20
    }
}

/// Trend score from price and the SMA pair; 50 when either average is missing.
pub fn sma_score(price: f64, short: Option<f64>, long: Option<f64>) -> u32 {
    let (Some(short), Some(long)) = (short, long) else {
        return 50;
    };

    if price > short && short > long {
        90
    } else if price > long && price < short {
        60
    } else if price < short && short < long {
        10
    } else if price < long && price > short {
        40
    } else {
        50
    }
}

pub fn volume_score(change_pct: f64) -> u32 {
    if change_pct > 50.0 {
        90
    } else if change_pct > 20.0 {
        75
    } else if change_pct > 0.0 {
        55
    } else if change_pct > -20.0 {
        45
    } else {
        30
    }
}

/// Valuation/profitability/growth adjustment around a neutral 50.
///
/// Missing fields make no adjustment; a non-positive P/E is ignored.
pub fn fundamentals_score(snapshot: &FundamentalSnapshot) -> u32 {
    let mut score: i32 = 50;

    if let Some(pe) = snapshot.pe_ratio_trailing.filter(|&pe| pe > 0.0) {
        score += if pe < 15.0 {
            15
        } else if pe < 25.0 {
            10
        } else if pe < 35.0 {
            0
        } else {
            -10
        };
    }

    if let Some(margin) = snapshot.profit_margin {
        if margin > 0.20 {
            score += 15;
        } else if margin > 0.10 {
            score += 10;
        } else if margin > 0.05 {
            score += 5;
        }
    }

    if let Some(growth) = snapshot.revenue_growth {
        if growth > 0.15 {
            score += 20;
        } else if growth > 0.05 {
            score += 10;
        } else if growth < -0.05 {
            score -= 10;
        }
    }

    score.clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::Bollinger;

    #[test]
    fn rsi_breakpoints() {
        let cases = [
            (10.0, 85),
            (30.0, 70),
            (39.9, 70),
            (45.0, 55),
            (50.0, 50),
            (65.0, 45),
            (70.0, 30),
            (80.0, 15),
            (100.0, 15),
        ];
        for (rsi, expected) in cases {
            assert_eq!(rsi_score(rsi), expected, "rsi {rsi}");
        }
    }

    #[test]
    fn macd_quadrants() {
        assert_eq!(macd_score(1.0, 0.5, 0.5), 85);
        assert_eq!(macd_score(1.0, 0.5, 0.0), 65);
        assert_eq!(macd_score(0.5, 1.0, -0.5), 15);
        assert_eq!(macd_score(1.0, 1.0, 0.0), 35);
    }

    #[test]
    fn bollinger_positions() {
        // Window [2, 4, 6]: lower 0, upper 8 with k = 2
        let bands = |price: f64| {
            let mut b = Bollinger::new(3, 2.0).result_for(&[2.0, 4.0, 6.0]);
            b.price = price;
            b
        };
        assert_eq!(bollinger_score(&bands(0.4)), 80);
        assert_eq!(bollinger_score(&bands(2.0)), 65);
        assert_eq!(bollinger_score(&bands(4.0)), 50);
        assert_eq!(bollinger_score(&bands(6.0)), 35);
        assert_eq!(bollinger_score(&bands(7.5)), 20);
        assert_eq!(bollinger_score(&bands(-1.0)), 80);
    }

    #[test]
    fn bollinger_zero_width_is_neutral() {
        let bands = Bollinger::new(3, 2.0).result_for(&[5.0, 5.0, 5.0]);
        assert_eq!(bollinger_score(&bands), 50);
    }

    #[test]
    fn sma_cases() {
        assert_eq!(sma_score(110.0, Some(105.0), Some(100.0)), 90);
        assert_eq!(sma_score(102.0, Some(105.0), Some(100.0)), 60);
        assert_eq!(sma_score(90.0, Some(95.0), Some(100.0)), 10);
        assert_eq!(sma_score(98.0, Some(95.0), Some(100.0)), 40);
        assert_eq!(sma_score(100.0, Some(100.0), Some(100.0)), 50);
        assert_eq!(sma_score(100.0, Some(100.0), None), 50);
    }

    #[test]
    fn volume_breakpoints() {
        assert_eq!(volume_score(100.0), 90);
        assert_eq!(volume_score(50.0), 75);
        assert_eq!(volume_score(0.1), 55);
        assert_eq!(volume_score(0.0), 45);
        assert_eq!(volume_score(-20.0), 30);
    }

    #[test]
    fn fundamentals_adjustments() {
        let strong = FundamentalSnapshot {
            pe_ratio_trailing: Some(12.0),
            profit_margin: Some(0.25),
            revenue_growth: Some(0.30),
        };
        assert_eq!(fundamentals_score(&strong), 100);

        let weak = FundamentalSnapshot {
            pe_ratio_trailing: Some(50.0),
            profit_margin: Some(-0.10),
            revenue_growth: Some(-0.20),
        };
        assert_eq!(fundamentals_score(&weak), 30);

        let negative_pe = FundamentalSnapshot {
            pe_ratio_trailing: Some(-8.0),
            ..Default::default()
        };
        assert_eq!(fundamentals_score(&negative_pe), 50);
    }
}
