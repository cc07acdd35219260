//! Reporting and export: JSON, CSV and Markdown artifacts.
//!
//! - **JSON**: full `AnalysisReport` round-trip with schema versioning
//! - **CSV**: per-bar indicator series and simulated final prices
//! - **Markdown**: human-readable single-symbol report
//!
//! Unknown schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use signalscope_core::domain::PriceSeries;
use signalscope_core::indicators::IndicatorBundle;

use crate::analysis::{AnalysisReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize a report, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// One row per bar with every indicator line. Warm-up cells are empty.
///
/// Columns: date, close, volume, rsi, macd, macd_signal, macd_histogram,
/// bb_upper, bb_middle, bb_lower, sma_short, sma_long, volume_avg
pub fn export_indicators_csv(series: &PriceSeries, bundle: &IndicatorBundle) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "date",
        "close",
        "volume",
        "rsi",
        "macd",
        "macd_signal",
        "macd_histogram",
        "bb_upper",
        "bb_middle",
        "bb_lower",
        "sma_short",
        "sma_long",
        "volume_avg",
    ])?;

    let empty: &[f64] = &[];
    let rsi = bundle.rsi().map_or(empty, |r| r.series.as_slice());
    let (macd, signal, hist) = bundle.macd().map_or((empty, empty, empty), |m| {
        (
            m.macd_series.as_slice(),
            m.signal_series.as_slice(),
            m.histogram_series.as_slice(),
        )
    });
    let (upper, middle, lower) = bundle.bollinger().map_or((empty, empty, empty), |b| {
        (
            b.upper_series.as_slice(),
            b.middle_series.as_slice(),
            b.lower_series.as_slice(),
        )
    });
    let (sma_short, sma_long) = bundle.sma().map_or((empty, empty), |s| {
        (s.short_series.as_slice(), s.long_series.as_slice())
    });
    let volume_avg = bundle.volume().map_or(empty, |v| v.average_series.as_slice());

    for (i, bar) in series.bars().iter().enumerate() {
        let cell = |values: &[f64]| match values.get(i) {
            Some(v) if v.is_finite() => format!("{v:.6}"),
            _ => String::new(),
        };
        wtr.write_record([
            bar.date.to_string(),
            format!("{:.6}", bar.close),
            format!("{:.0}", bar.volume),
            cell(rsi),
            cell(macd),
            cell(signal),
            cell(hist),
            cell(upper),
            cell(middle),
            cell(lower),
            cell(sma_short),
            cell(sma_long),
            cell(volume_avg),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Simulated final prices, one row per path.
pub fn export_final_prices_csv(final_prices: &[f64]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["path", "final_price"])?;
    for (i, price) in final_prices.iter().enumerate() {
        wtr.write_record([&i.to_string(), &format!("{:.4}", price)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Paths written by [`save_artifacts`].
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub report_json: PathBuf,
    pub indicators_csv: PathBuf,
    pub final_prices_csv: PathBuf,
    pub report_markdown: PathBuf,
}

/// Save the full artifact set for one analysis.
///
/// Creates `{symbol}_{as_of}/` under `output_dir` containing:
/// - `report.json` — the full `AnalysisReport`
/// - `indicators.csv` — per-bar indicator lines
/// - `final_prices.csv` — simulated final prices
/// - `report.md` — Markdown summary
pub fn save_artifacts(
    report: &AnalysisReport,
    series: &PriceSeries,
    output_dir: &Path,
) -> Result<ArtifactPaths> {
    let dir = output_dir.join(artifact_dir_name(&report.symbol, report.as_of));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create artifact dir: {}", dir.display()))?;

    let paths = ArtifactPaths {
        report_json: dir.join("report.json"),
        indicators_csv: dir.join("indicators.csv"),
        final_prices_csv: dir.join("final_prices.csv"),
        report_markdown: dir.join("report.md"),
        dir,
    };

    write(&paths.report_json, &export_json(report)?)?;
    write(
        &paths.indicators_csv,
        &export_indicators_csv(series, &report.indicators)?,
    )?;
    write(
        &paths.final_prices_csv,
        &export_final_prices_csv(
            report
                .simulation
                .as_ref()
                .map_or(&[][..], |sim| sim.final_prices.as_slice()),
        )?,
    )?;
    write(&paths.report_markdown, &generate_report(report))?;

    tracing::info!(dir = %paths.dir.display(), "report written");
    Ok(paths)
}

/// `{symbol}_{as_of}` with every character outside `[A-Za-z0-9._-]`
/// replaced by `_`, so the name is always one path component.
fn artifact_dir_name(symbol: &str, as_of: chrono::NaiveDate) -> String {
    let symbol: String = symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{symbol}_{as_of}")
}

/// Load a report from an artifact directory's `report.json`.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

// ─── Markdown report ────────────────────────────────────────────────

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.decimals$}"))
}

pub fn generate_report(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str(&format!("# {} Analysis\n\n", report.symbol));

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| As of | {} |\n", report.as_of));
    md.push_str(&format!("| Bars | {} |\n", report.bars));
    md.push_str(&format!("| Timeframe | {} |\n", report.timeframe));
    md.push_str(&format!("| Risk Tolerance | {} |\n", report.risk_tolerance));
    if report.synthetic {
        md.push_str("| Data | **SYNTHETIC** |\n");
    }
    md.push('\n');

    let rec = &report.recommendation;
    md.push_str("## Signal\n\n");
    md.push_str(&format!("**{}**\n\n", rec.headline()));
    if let Some(plan) = &rec.plan {
        md.push_str("| Plan | Value |\n");
        md.push_str("| --- | --- |\n");
        md.push_str(&format!(
            "| Entry | ${:.2} - ${:.2} |\n",
            plan.entry_low, plan.entry_high
        ));
        md.push_str(&format!("| Target | ${:.2} |\n", plan.target));
        md.push_str(&format!("| Stop-Loss | ${:.2} |\n", plan.stop_loss));
        md.push_str(&format!(
            "| Position Size | {:.0}-{:.0}% of portfolio |\n",
            plan.position_size.min_pct, plan.position_size.max_pct
        ));
        md.push('\n');
    }

    let score = &report.score;
    md.push_str("## Score Breakdown\n\n");
    md.push_str("| Component | Raw | Weight | Points |\n");
    md.push_str("| --- | --- | --- | --- |\n");
    for b in &score.breakdown {
        md.push_str(&format!(
            "| {:?} | {} | {} | {:.2} |\n",
            b.component, b.raw_score, b.max_weight, b.weighted
        ));
    }
    md.push_str(&format!(
        "| **Total** | | {} | {} |\n\n",
        score.max_score, score.final_score
    ));

    md.push_str("## Indicators\n\n");
    md.push_str("| Indicator | Reading | Signal |\n");
    md.push_str("| --- | --- | --- |\n");
    let bundle = &report.indicators;
    if let Some(r) = bundle.rsi() {
        md.push_str(&format!(
            "| RSI({}) | {} | {:?} |\n",
            r.period,
            fmt_opt(r.value, 1),
            r.signal
        ));
    }
    if let Some(m) = bundle.macd() {
        md.push_str(&format!(
            "| MACD({},{},{}) | hist {} | {:?} |\n",
            m.fast,
            m.slow,
            m.signal_period,
            fmt_opt(m.histogram, 3),
            m.signal
        ));
    }
    if let Some(b) = bundle.bollinger() {
        md.push_str(&format!(
            "| Bollinger({}) | {} / {} / {} | {:?} |\n",
            b.period,
            fmt_opt(b.lower, 2),
            fmt_opt(b.middle, 2),
            fmt_opt(b.upper, 2),
            b.signal
        ));
    }
    if let Some(s) = bundle.sma() {
        md.push_str(&format!(
            "| SMA({}/{}) | {} / {} | {:?} |\n",
            s.short_period,
            s.long_period,
            fmt_opt(s.short, 2),
            fmt_opt(s.long, 2),
            s.signal
        ));
    }
    if let Some(v) = bundle.volume() {
        md.push_str(&format!(
            "| Volume({}) | {}% vs avg | {:?} |\n",
            v.period,
            fmt_opt(v.change_pct, 1),
            v.signal
        ));
    }
    md.push('\n');

    md.push_str("## Projection\n\n");
    match (&report.simulation, &report.scenarios) {
        (Some(sim), Some(sc)) => {
            md.push_str("| Metric | Value |\n");
            md.push_str("| --- | --- |\n");
            md.push_str(&format!(
                "| Horizon | {} days, {} paths |\n",
                sim.days, sim.iterations
            ));
            md.push_str(&format!("| Current | ${:.2} |\n", sim.current_price));
            md.push_str(&format!("| Median | ${:.2} |\n", sim.median));
            md.push_str(&format!("| P10 - P90 | ${:.2} - ${:.2} |\n", sim.p10, sim.p90));
            md.push_str(&format!(
                "| Daily Drift / Vol | {:.4}% / {:.4}% |\n",
                sim.drift * 100.0,
                sim.volatility * 100.0
            ));
            md.push_str(&format!("| Seed | {} |\n\n", sim.seed));

            md.push_str(&format!(
                "- **Bull ({:.1}%)**: {}\n",
                sc.bull.probability, sc.bull.description
            ));
            md.push_str(&format!(
                "- **Bear ({:.1}%)**: {}\n",
                sc.bear.probability, sc.bear.description
            ));
            md.push_str(&format!(
                "- Risk/Reward: {}\n\n",
                fmt_opt(report.recommendation.risk_reward_ratio, 2)
            ));
        }
        _ => md.push_str("Not enough history to project prices.\n\n"),
    }

    if let Some(health) = &report.health {
        md.push_str("## Fundamentals\n\n");
        md.push_str(&format!(
            "Health score **{}/100** ({}/{} points), valuation: {}\n\n",
            health.score, health.earned, health.max, health.valuation
        ));
        for flag in &health.red_flags {
            md.push_str(&format!("- Red flag: {flag}\n"));
        }
        for strength in &health.strengths {
            md.push_str(&format!("- Strength: {strength}\n"));
        }
        md.push('\n');
    }

    md
}
