//! Monte Carlo price projection.
//!
//! Historical daily simple returns give a drift (mean) and volatility (sample
//! stddev). Each path draws `days` i.i.d. Normal(drift, volatility) returns and
//! compounds them from the current price; the starting price itself is not
//! stored. Final prices are summarized by linear-interpolation percentiles.
//!
//! # Determinism
//! `MonteCarloEngine::simulate` runs paths in parallel with rayon. Path `i`
//! draws from its own ChaCha8 stream seeded by `RngHierarchy::rng_for("price_path", i)`,
//! so a fixed seed gives byte-identical results on any thread count.
//! `simulate_with_rng` draws every path in order from one caller-supplied source.

pub mod returns;
pub mod scenarios;
pub mod stats;

pub use scenarios::{Scenario, ScenarioPair};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceSeries;
use crate::rng::RngHierarchy;

const PATH_STREAM: &str = "price_path";

/// Minimum number of daily returns needed for a sample volatility.
pub const MIN_RETURNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("need at least {required} daily returns to estimate volatility, got {returns}")]
    InsufficientHistory { returns: usize, required: usize },

    #[error("invalid {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of simulated paths (default 1000).
    pub iterations: usize,
    /// Master seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// `iterations` rows of `days` prices each. Empty once dropped for export.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<Vec<f64>>,
    pub final_prices: Vec<f64>,
    pub median: f64,
    pub mean: f64,
    pub p10: f64,
    pub p90: f64,
    /// Percent of paths ending strictly above the current price.
    pub bull_probability: f64,
    /// 100 − bull_probability.
    pub bear_probability: f64,
    /// 65th percentile of final prices.
    pub bull_target: f64,
    /// 35th percentile of final prices.
    pub bear_target: f64,
    pub drift: f64,
    pub volatility: f64,
    pub current_price: f64,
    pub days: usize,
    pub iterations: usize,
    /// Master seed the paths were drawn with; replaying it reproduces the run.
    pub seed: u64,
}

impl SimulationResult {
    /// Discard the per-path detail, keeping the summary and final prices.
    pub fn without_paths(mut self) -> Self {
        self.paths = Vec::new();
        self
    }

    pub fn scenarios(&self) -> ScenarioPair {
        ScenarioPair::from_simulation(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: SimulationConfig,
}

/// Drift/volatility model estimated from a series.
#[derive(Debug, Clone, Copy)]
struct ReturnModel {
    drift: f64,
    volatility: f64,
    normal: Normal<f64>,
}

impl MonteCarloEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Project `days` sessions ahead from `current_price`, paths in parallel.
    pub fn simulate(
        &self,
        series: &PriceSeries,
        days: usize,
        current_price: f64,
    ) -> Result<SimulationResult, SimulationError> {
        self.validate(days, current_price)?;
        let model = estimate(series)?;
        let hierarchy = RngHierarchy::from_seed_or_entropy(self.config.seed);

        let paths: Vec<Vec<f64>> = (0..self.config.iterations)
            .into_par_iter()
            .map(|i| {
                let mut rng = hierarchy.rng_for(PATH_STREAM, i as u64);
                draw_path(&model, &mut rng, days, current_price)
            })
            .collect();

        Ok(summarize(paths, &model, current_price, days, hierarchy.master_seed()))
    }

    /// Same model, every path drawn sequentially from `rng`.
    ///
    /// The reported `seed` is the configured one, or 0 when unset.
    pub fn simulate_with_rng<R: Rng + ?Sized>(
        &self,
        series: &PriceSeries,
        days: usize,
        current_price: f64,
        rng: &mut R,
    ) -> Result<SimulationResult, SimulationError> {
        self.validate(days, current_price)?;
        let model = estimate(series)?;

        let paths: Vec<Vec<f64>> = (0..self.config.iterations)
            .map(|_| draw_path(&model, rng, days, current_price))
            .collect();

        Ok(summarize(
            paths,
            &model,
            current_price,
            days,
            self.config.seed.unwrap_or(0),
        ))
    }

    fn validate(&self, days: usize, current_price: f64) -> Result<(), SimulationError> {
        if days == 0 {
            return Err(SimulationError::InvalidInput {
                field: "days",
                value: 0.0,
            });
        }
        if self.config.iterations == 0 {
            return Err(SimulationError::InvalidInput {
                field: "iterations",
                value: 0.0,
            });
        }
        if !current_price.is_finite() || current_price <= 0.0 {
            return Err(SimulationError::InvalidInput {
                field: "current_price",
                value: current_price,
            });
        }
        Ok(())
    }
}

fn estimate(series: &PriceSeries) -> Result<ReturnModel, SimulationError> {
    let rets = returns::daily_returns(&series.closes());
    if rets.len() < MIN_RETURNS {
        return Err(SimulationError::InsufficientHistory {
            returns: rets.len(),
            required: MIN_RETURNS,
        });
    }

    let (drift, volatility) = returns::drift_and_volatility(&rets);
    let normal = Normal::new(drift, volatility).map_err(|_| SimulationError::InvalidInput {
        field: "volatility",
        value: volatility,
    })?;

    Ok(ReturnModel {
        drift,
        volatility,
        normal,
    })
}

fn draw_path<R: Rng + ?Sized>(
    model: &ReturnModel,
    rng: &mut R,
    days: usize,
    current_price: f64,
) -> Vec<f64> {
    let mut path = Vec::with_capacity(days);
    let mut price = current_price;
    for _ in 0..days {
        let r = model.normal.sample(rng);
        price *= 1.0 + r;
        path.push(price);
    }
    path
}

fn summarize(
    paths: Vec<Vec<f64>>,
    model: &ReturnModel,
    current_price: f64,
    days: usize,
    seed: u64,
) -> SimulationResult {
    let iterations = paths.len();
    let final_prices: Vec<f64> = paths
        .iter()
        .map(|p| p.last().copied().unwrap_or(current_price))
        .collect();

    let sorted = stats::sorted_copy(&final_prices);
    let bull_count = final_prices.iter().filter(|&&p| p > current_price).count();
    let bull_probability = bull_count as f64 / iterations as f64 * 100.0;

    SimulationResult {
        median: stats::percentile_sorted(&sorted, 0.50),
        mean: stats::mean(&final_prices),
        p10: stats::percentile_sorted(&sorted, 0.10),
        p90: stats::percentile_sorted(&sorted, 0.90),
        bull_probability,
        bear_probability: 100.0 - bull_probability,
        bull_target: stats::percentile_sorted(&sorted, 0.65),
        bear_target: stats::percentile_sorted(&sorted, 0.35),
        drift: model.drift,
        volatility: model.volatility,
        current_price,
        days,
        iterations,
        seed,
        paths,
        final_prices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded(iterations: usize, seed: u64) -> MonteCarloEngine {
        MonteCarloEngine::new(SimulationConfig {
            iterations,
            seed: Some(seed),
        })
    }

    fn wiggly_series() -> PriceSeries {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 3.0 + i as f64 * 0.1)
            .collect();
        make_series(&closes)
    }

    #[test]
    fn shape_and_probabilities() {
        let result = seeded(200, 42).simulate(&wiggly_series(), 10, 105.0).unwrap();
        assert_eq!(result.paths.len(), 200);
        assert!(result.paths.iter().all(|p| p.len() == 10));
        assert_eq!(result.final_prices.len(), 200);
        assert_eq!(result.bull_probability + result.bear_probability, 100.0);
        assert!(result.p10 <= result.bear_target);
        assert!(result.bear_target <= result.median);
        assert!(result.median <= result.bull_target);
        assert!(result.bull_target <= result.p90);
        assert_eq!(result.seed, 42);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let engine = seeded(100, 7);
        let a = engine.simulate(&wiggly_series(), 5, 100.0).unwrap();
        let b = engine.simulate(&wiggly_series(), 5, 100.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = seeded(50, 1).simulate(&wiggly_series(), 5, 100.0).unwrap();
        let b = seeded(50, 2).simulate(&wiggly_series(), 5, 100.0).unwrap();
        assert_ne!(a.final_prices, b.final_prices);
    }

    #[test]
    fn flat_series_gives_identical_paths() {
        let series = make_series(&[80.0; 30]);
        let result = seeded(25, 3).simulate(&series, 4, 80.0).unwrap();
        assert_eq!(result.volatility, 0.0);
        assert_eq!(result.drift, 0.0);
        assert!(result.paths.iter().all(|p| p == &result.paths[0]));
        assert_eq!(result.median, 80.0);
        assert_eq!(result.bull_target, 80.0);
        assert_eq!(result.bull_probability, 0.0);
        assert_eq!(result.bear_probability, 100.0);
    }

    #[test]
    fn constant_growth_collapses_to_compounded_price() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let series = make_series(&closes);
        let result = seeded(10, 3).simulate(&series, 5, 50.0).unwrap();
        let expected = 50.0 * (1.0 + result.drift).powi(5);
        assert!(result.volatility < 1e-12);
        assert_approx(result.p10, expected, 1e-6);
        assert_approx(result.p90, expected, 1e-6);
    }

    #[test]
    fn injected_rng_is_reproducible() {
        let engine = MonteCarloEngine::new(SimulationConfig {
            iterations: 30,
            seed: None,
        });
        let series = wiggly_series();
        let a = engine
            .simulate_with_rng(&series, 6, 100.0, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        let b = engine
            .simulate_with_rng(&series, 6, 100.0, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 0);
    }

    #[test]
    fn rejects_invalid_inputs() {
        let engine = seeded(10, 1);
        let series = wiggly_series();
        assert!(matches!(
            engine.simulate(&series, 0, 100.0),
            Err(SimulationError::InvalidInput { field: "days", .. })
        ));
        assert!(matches!(
            engine.simulate(&series, 5, 0.0),
            Err(SimulationError::InvalidInput { field: "current_price", .. })
        ));
        assert!(matches!(
            engine.simulate(&series, 5, f64::NAN),
            Err(SimulationError::InvalidInput { field: "current_price", .. })
        ));
        assert!(matches!(
            seeded(0, 1).simulate(&series, 5, 100.0),
            Err(SimulationError::InvalidInput { field: "iterations", .. })
        ));
    }

    #[test]
    fn rejects_short_history() {
        let series = make_series(&[100.0, 101.0]);
        assert_eq!(
            seeded(10, 1).simulate(&series, 5, 100.0).unwrap_err(),
            SimulationError::InsufficientHistory {
                returns: 1,
                required: 2
            }
        );
    }

    #[test]
    fn without_paths_keeps_summary() {
        let result = seeded(20, 5).simulate(&wiggly_series(), 3, 100.0).unwrap();
        let median = result.median;
        let slim = result.without_paths();
        assert!(slim.paths.is_empty());
        assert_eq!(slim.final_prices.len(), 20);
        assert_eq!(slim.median, median);
        let json = serde_json::to_value(&slim).unwrap();
        assert!(json.get("paths").is_none());
    }
}
