//! One trading session of OHLCV data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar.
///
/// Volume is a float so fractional-share feeds load without truncation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Whether the OHLC prices agree with each other: all finite and
    /// positive, with open and close inside `[low, high]`.
    ///
    /// `PriceSeries` does not enforce this. Vendor files often carry highs
    /// and lows that miss the close by a rounding tick, and only closes and
    /// volumes feed the indicators.
    pub fn is_consistent(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return false;
        }
        let span = self.low..=self.high;
        span.contains(&self.open) && span.contains(&self.close)
    }
}
