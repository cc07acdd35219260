//! Property tests for CSV loading and synthetic generation.

use chrono::NaiveDate;
use proptest::prelude::*;

use signalscope_runner::parse_csv;
use signalscope_runner::synthetic::{generate, SyntheticConfig};

fn rows(closes: &[f64]) -> Vec<String> {
    let base = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let date = base + chrono::Duration::days(i as i64);
            format!("{date},{c:?},{c:?},{c:?},{c:?},{}", 1000 + i)
        })
        .collect()
}

fn to_csv(rows: &[String]) -> String {
    let mut csv = String::from("date,open,high,low,close,volume\n");
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

proptest! {
    /// Row order in the file never changes the loaded series.
    #[test]
    fn row_order_is_irrelevant(
        shuffled in prop::collection::vec(0.5..1000.0_f64, 1..60)
            .prop_flat_map(|closes| {
                let sorted = rows(&closes);
                (Just(sorted.clone()), Just(sorted).prop_shuffle())
            })
    ) {
        let (sorted, shuffled) = shuffled;
        let a = parse_csv(to_csv(&sorted).as_bytes()).unwrap();
        let b = parse_csv(to_csv(&shuffled).as_bytes()).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Synthetic series always validate and keep positive closes.
    #[test]
    fn synthetic_always_valid(
        seed in any::<u64>(),
        bars in 1usize..400,
        volatility in 0.0..0.2_f64,
    ) {
        let series = generate(&SyntheticConfig {
            seed,
            bars,
            volatility,
            ..SyntheticConfig::default()
        })
        .unwrap();
        prop_assert_eq!(series.len(), bars);
        prop_assert!(series.closes().iter().all(|c| *c > 0.0));
    }
}
