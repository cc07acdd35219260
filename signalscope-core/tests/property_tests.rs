//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. RSI bounds and saturation
//! 2. MACD histogram identity
//! 3. Bollinger band ordering and width
//! 4. Look-ahead freedom — truncating the series never changes earlier values
//! 5. Score bounds and fixed decision anchors
//! 6. Monte Carlo probability complement and seed determinism

use chrono::NaiveDate;
use proptest::prelude::*;

use signalscope_core::domain::{PriceBar, PriceSeries};
use signalscope_core::fundamentals::FundamentalSnapshot;
use signalscope_core::indicators::rolling::sample_std;
use signalscope_core::indicators::rsi::rsi_series;
use signalscope_core::indicators::{Bollinger, IndicatorEngine, Macd};
use signalscope_core::monte_carlo::{MonteCarloEngine, SimulationConfig};
use signalscope_core::scoring::{
    decide_signal, ComponentWeights, RiskTolerance, ScoreComponent, ScoringConfig, ScoringEngine,
    Signal, Timeframe,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..500.0_f64, min..max)
}

fn arb_weights() -> impl Strategy<Value = ComponentWeights> {
    // Six draws of 0..=16 keep the total at or below 100.
    (
        0..=16u32,
        0..=16u32,
        0..=16u32,
        0..=16u32,
        0..=16u32,
        0..=16u32,
    )
        .prop_map(
            |(rsi, macd, bollinger, volume, sma, fundamentals)| ComponentWeights {
                rsi,
                macd,
                bollinger,
                volume,
                sma,
                fundamentals,
            },
        )
}

fn arb_snapshot() -> impl Strategy<Value = Option<FundamentalSnapshot>> {
    prop::option::of(
        (
            prop::option::of(-50.0..200.0_f64),
            prop::option::of(-1.0..1.0_f64),
            prop::option::of(-1.0..2.0_f64),
        )
            .prop_map(|(pe_ratio_trailing, profit_margin, revenue_growth)| {
                FundamentalSnapshot {
                    pe_ratio_trailing,
                    profit_margin,
                    revenue_growth,
                }
            }),
    )
}

fn arb_timeframe() -> impl Strategy<Value = Timeframe> {
    prop_oneof![
        Just(Timeframe::Short),
        Just(Timeframe::Medium),
        Just(Timeframe::Long)
    ]
}

fn arb_risk() -> impl Strategy<Value = RiskTolerance> {
    prop_oneof![
        Just(RiskTolerance::Conservative),
        Just(RiskTolerance::Moderate),
        Just(RiskTolerance::Aggressive)
    ]
}

fn make_series(closes: &[f64], volumes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| PriceBar {
            date: base + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

// ── 1. RSI ───────────────────────────────────────────────────────────

proptest! {
    /// RSI is always within [0, 100].
    #[test]
    fn rsi_bounded(closes in arb_closes(2, 120), period in 1usize..30) {
        for v in rsi_series(&closes, period) {
            if !v.is_nan() {
                prop_assert!((0.0..=100.0).contains(&v), "rsi {v}");
            }
        }
    }

    /// A strictly rising final window saturates RSI at exactly 100.
    #[test]
    fn strictly_rising_window_saturates(
        prefix in arb_closes(0, 40),
        steps in prop::collection::vec(0.01..5.0_f64, 15..30),
    ) {
        let mut closes = prefix;
        let mut last = closes.last().copied().unwrap_or(100.0);
        for step in &steps {
            last += step;
            closes.push(last);
        }
        let rsi = rsi_series(&closes, 14);
        prop_assert_eq!(rsi[closes.len() - 1], 100.0);
    }

    /// RSI reads 100 only when the window has no losses.
    #[test]
    fn rsi_100_only_without_losses(closes in arb_closes(16, 60)) {
        let period = 14;
        let rsi = rsi_series(&closes, period);
        let n = closes.len();
        let window = &closes[n - 1 - period..];
        let has_loss = window.windows(2).any(|w| w[1] < w[0]);
        let has_gain = window.windows(2).any(|w| w[1] > w[0]);
        if rsi[n - 1] == 100.0 {
            prop_assert!(!has_loss && has_gain);
        }
        if !has_loss && has_gain {
            prop_assert_eq!(rsi[n - 1], 100.0);
        }
    }
}

// ── 2. MACD ──────────────────────────────────────────────────────────

proptest! {
    /// histogram == macd - signal on every bar.
    #[test]
    fn macd_histogram_identity(closes in arb_closes(1, 150)) {
        let result = Macd::new(12, 26, 9).result_for(&closes);
        for i in 0..closes.len() {
            let diff = result.histogram_series[i] - (result.macd_series[i] - result.signal_series[i]);
            prop_assert!(diff.abs() < 1e-9);
        }
    }
}

// ── 3. Bollinger ─────────────────────────────────────────────────────

proptest! {
    /// lower <= middle <= upper and upper - lower == 2k * sample stddev.
    #[test]
    fn bollinger_ordering_and_width(
        closes in arb_closes(20, 100),
        period in 2usize..20,
        k in 0.5..3.0_f64,
    ) {
        let result = Bollinger::new(period, k).result_for(&closes);
        for i in (period - 1)..closes.len() {
            let (u, m, l) = (result.upper_series[i], result.middle_series[i], result.lower_series[i]);
            prop_assert!(l <= m && m <= u);
            let std = sample_std(&closes[i + 1 - period..=i]);
            prop_assert!(((u - l) - 2.0 * k * std).abs() < 1e-6);
        }
    }
}

// ── 4. Look-ahead freedom ────────────────────────────────────────────

proptest! {
    /// Computing on a prefix yields exactly the prefix of the full computation.
    #[test]
    fn truncation_does_not_change_history(closes in arb_closes(30, 120), cut in 1usize..29) {
        let volumes = vec![1000.0; closes.len()];
        let full = IndicatorEngine::default().compute_all(&make_series(&closes, &volumes));
        let keep = closes.len() - cut;
        let part = IndicatorEngine::default()
            .compute_all(&make_series(&closes[..keep], &volumes[..keep]));

        let same = |a: &[f64], b: &[f64]| {
            b.iter().zip(a).all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
        };
        prop_assert!(same(&full.rsi().unwrap().series, &part.rsi().unwrap().series));
        prop_assert!(same(&full.macd().unwrap().histogram_series, &part.macd().unwrap().histogram_series));
        prop_assert!(same(&full.bollinger().unwrap().upper_series, &part.bollinger().unwrap().upper_series));
        prop_assert!(same(&full.sma().unwrap().short_series, &part.sma().unwrap().short_series));
    }
}

// ── 5. Scoring ───────────────────────────────────────────────────────

proptest! {
    /// final score stays within [0, 100] and max_score equals the evaluated weights.
    #[test]
    fn score_bounded(
        closes in arb_closes(1, 260),
        weights in arb_weights(),
        timeframe in arb_timeframe(),
        risk in arb_risk(),
        snapshot in arb_snapshot(),
    ) {
        let volumes: Vec<f64> = closes.iter().map(|c| c * 100.0).collect();
        let bundle = IndicatorEngine::default().compute_all(&make_series(&closes, &volumes));
        let config = ScoringConfig {
            short: weights,
            medium: weights,
            long: weights,
            ..ScoringConfig::default()
        };
        let result = ScoringEngine::new(config)
            .unwrap()
            .score(&bundle, timeframe, risk, snapshot.as_ref());

        prop_assert!(result.final_score <= 100);
        prop_assert!(result.final_score <= result.max_score);
        let sum: u32 = result.breakdown.iter().map(|b| b.max_weight).sum();
        prop_assert_eq!(sum, result.max_score);
        prop_assert!(result.breakdown.iter().all(|b| b.raw_score <= 100 && b.max_weight > 0));
        let fundamentals_scored = result.component(ScoreComponent::Fundamentals).is_some();
        let fundamentals_expected =
            weights.fundamentals > 0 && snapshot.as_ref().is_some_and(|s| !s.is_empty());
        prop_assert_eq!(fundamentals_scored, fundamentals_expected);
    }

    /// >= 80 is STRONG BUY and 45..=55 is HOLD for every risk tolerance.
    #[test]
    fn decision_anchors(risk in arb_risk(), high in 80u32..=100, mid in 45u32..=55) {
        let config = ScoringConfig::default();
        let thresholds = config.thresholds(risk);
        prop_assert_eq!(decide_signal(high, thresholds), Signal::StrongBuy);
        prop_assert_eq!(decide_signal(mid, thresholds), Signal::Hold);
    }
}

// ── 6. Monte Carlo ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// bull + bear == 100 exactly, for any path count.
    #[test]
    fn probabilities_complement(
        closes in arb_closes(3, 60),
        iterations in 1usize..200,
        seed in any::<u64>(),
        days in 1usize..30,
    ) {
        let series = make_series(&closes, &vec![1.0; closes.len()]);
        let engine = MonteCarloEngine::new(SimulationConfig { iterations, seed: Some(seed) });
        let current = closes[closes.len() - 1];
        let sim = engine.simulate(&series, days, current).unwrap();
        prop_assert_eq!(sim.bull_probability + sim.bear_probability, 100.0);
        prop_assert_eq!(sim.paths.len(), iterations);
        prop_assert!(sim.paths.iter().all(|p| p.len() == days));
    }

    /// Same seed, same result.
    #[test]
    fn seed_determinism(closes in arb_closes(3, 60), seed in any::<u64>()) {
        let series = make_series(&closes, &vec![1.0; closes.len()]);
        let engine = MonteCarloEngine::new(SimulationConfig { iterations: 50, seed: Some(seed) });
        let a = engine.simulate(&series, 5, 100.0).unwrap();
        let b = engine.simulate(&series, 5, 100.0).unwrap();
        prop_assert_eq!(a, b);
    }
}
