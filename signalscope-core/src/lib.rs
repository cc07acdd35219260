//! SignalScope Core — price series, technical indicators, scoring, fundamentals,
//! Monte Carlo projection.
//!
//! This crate contains the analysis engines:
//! - Domain types (bars, validated price series)
//! - IndicatorEngine: RSI, MACD, Bollinger Bands, SMA pair, volume trend
//! - ScoringEngine: weighted component score, BUY/SELL/HOLD signal, confidence
//! - FundamentalAnalyzer: health score, red flags, valuation status
//! - MonteCarloEngine: drift/volatility random walk, percentile scenarios
//! - Deterministic RNG hierarchy for reproducible parallel simulation
//!
//! Engines are pure and synchronous. They never log or perform I/O; every
//! failure is a typed error.

pub mod domain;
pub mod fundamentals;
pub mod indicators;
pub mod monte_carlo;
pub mod rng;
pub mod scoring;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engines and their outputs are Send + Sync, so
    /// callers can run requests on worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        // Indicators
        require_send::<indicators::IndicatorEngine>();
        require_sync::<indicators::IndicatorEngine>();
        require_send::<indicators::IndicatorBundle>();
        require_sync::<indicators::IndicatorBundle>();

        // Scoring
        require_send::<scoring::ScoringEngine>();
        require_sync::<scoring::ScoringEngine>();
        require_send::<scoring::ScoreResult>();
        require_sync::<scoring::ScoreResult>();

        // Fundamentals
        require_send::<fundamentals::FundamentalProfile>();
        require_sync::<fundamentals::FundamentalProfile>();
        require_send::<fundamentals::HealthReport>();
        require_sync::<fundamentals::HealthReport>();

        // Monte Carlo
        require_send::<monte_carlo::MonteCarloEngine>();
        require_sync::<monte_carlo::MonteCarloEngine>();
        require_send::<monte_carlo::SimulationResult>();
        require_sync::<monte_carlo::SimulationResult>();

        // RNG
        require_send::<rng::RngHierarchy>();
        require_sync::<rng::RngHierarchy>();
    }

    /// Architecture contract: the scorer sees only the bundle, never the
    /// raw series, so indicator and scoring stay separable.
    #[test]
    fn scoring_engine_takes_bundle_not_series() {
        fn _check(
            engine: &scoring::ScoringEngine,
            bundle: &indicators::IndicatorBundle,
        ) -> scoring::ScoreResult {
            engine.score(
                bundle,
                scoring::Timeframe::Short,
                scoring::RiskTolerance::Moderate,
                None,
            )
        }
    }
}
