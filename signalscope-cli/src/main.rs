//! SignalScope CLI — analyze, simulate and synthetic-data commands.
//!
//! Commands:
//! - `analyze` — indicators, score, projection and recommendation for one series
//! - `simulate` — Monte Carlo projection only
//! - `synthetic` — write a seeded synthetic series as CSV
//!
//! Reports go to stdout as JSON (or Markdown with `--markdown`); logs go to
//! stderr, filtered by `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use signalscope_core::domain::PriceSeries;
use signalscope_core::scoring::{RiskTolerance, Timeframe};
use signalscope_runner::data_loader::write_csv;
use signalscope_runner::synthetic::{self, SyntheticConfig};
use signalscope_runner::{
    generate_report, load_csv, load_fundamentals, save_artifacts, AnalysisConfig, Analyzer,
};

#[derive(Parser)]
#[command(
    name = "signalscope",
    about = "SignalScope CLI — technical signals, scoring and Monte Carlo projection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: indicators, score, projection, recommendation.
    Analyze {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        run: RunArgs,

        /// JSON file with fundamentals (valuation, profitability, growth, ...).
        #[arg(long)]
        fundamentals: Option<PathBuf>,

        /// Also save report.json, indicators.csv, final_prices.csv and report.md here.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the Markdown report instead of JSON.
        #[arg(long, default_value_t = false)]
        markdown: bool,
    },
    /// Monte Carlo projection only.
    Simulate {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Write a seeded synthetic series to stdout as CSV.
    Synthetic {
        /// Number of sessions.
        #[arg(long, default_value_t = 300)]
        bars: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        /// Mean daily return.
        #[arg(long, default_value_t = 0.0005)]
        drift: f64,

        /// Daily return standard deviation.
        #[arg(long, default_value_t = 0.015)]
        volatility: f64,

        /// First session (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
    },
}

#[derive(Args)]
struct DataArgs {
    /// CSV file with date,open,high,low,close,volume columns.
    #[arg(long, conflicts_with = "synthetic")]
    csv: Option<PathBuf>,

    /// Analyze a seeded synthetic series instead of a file. Reports are tagged synthetic.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Seed for --synthetic.
    #[arg(long, default_value_t = 42)]
    synthetic_seed: u64,

    /// Symbol label. Defaults to the CSV file stem, or SYNTH.
    #[arg(long)]
    symbol: Option<String>,
}

/// Overrides applied on top of the config file.
#[derive(Args)]
struct RunArgs {
    /// TOML analysis config.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    timeframe: Option<TimeframeArg>,

    #[arg(long, value_enum)]
    risk: Option<RiskArg>,

    /// Monte Carlo path count.
    #[arg(long)]
    iterations: Option<usize>,

    /// Master seed; omit for an entropy seed (reported in the output).
    #[arg(long)]
    seed: Option<u64>,

    /// Projection horizon in sessions (default: timeframe horizon).
    #[arg(long)]
    days: Option<usize>,

    /// Keep every simulated path in the output.
    #[arg(long, default_value_t = false)]
    include_paths: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeframeArg {
    Short,
    Medium,
    Long,
}

impl From<TimeframeArg> for Timeframe {
    fn from(arg: TimeframeArg) -> Self {
        match arg {
            TimeframeArg::Short => Timeframe::Short,
            TimeframeArg::Medium => Timeframe::Medium,
            TimeframeArg::Long => Timeframe::Long,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RiskArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<RiskArg> for RiskTolerance {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Conservative => RiskTolerance::Conservative,
            RiskArg::Moderate => RiskTolerance::Moderate,
            RiskArg::Aggressive => RiskTolerance::Aggressive,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            data,
            run,
            fundamentals,
            output_dir,
            markdown,
        } => run_analyze(data, run, fundamentals, output_dir, markdown),
        Commands::Simulate { data, run } => run_simulate(data, run),
        Commands::Synthetic {
            bars,
            seed,
            start_price,
            drift,
            volatility,
            start,
        } => run_synthetic(bars, seed, start_price, drift, volatility, start),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(
    data: DataArgs,
    run: RunArgs,
    fundamentals: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    markdown: bool,
) -> Result<()> {
    let (symbol, series, synthetic) = load_series(&data)?;
    let profile = fundamentals
        .as_deref()
        .map(load_fundamentals)
        .transpose()?;

    let analyzer = Analyzer::new(resolve_config(&run)?)?;
    let report = analyzer.analyze(&symbol, &series, profile.as_ref(), synthetic)?;

    if let Some(dir) = output_dir {
        save_artifacts(&report, &series, &dir)?;
    }

    if markdown {
        print!("{}", generate_report(&report));
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn run_simulate(data: DataArgs, run: RunArgs) -> Result<()> {
    let (symbol, series, synthetic) = load_series(&data)?;
    let analyzer = Analyzer::new(resolve_config(&run)?)?;
    let report = analyzer.projection(&symbol, &series, synthetic)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_synthetic(
    bars: usize,
    seed: u64,
    start_price: f64,
    drift: f64,
    volatility: f64,
    start: Option<String>,
) -> Result<()> {
    let mut config = SyntheticConfig {
        bars,
        seed,
        start_price,
        drift,
        volatility,
        ..SyntheticConfig::default()
    };
    if let Some(s) = start {
        config.start_date = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("invalid --start date '{s}'"))?;
    }
    let series = synthetic::generate(&config)?;
    write_csv(&series, std::io::stdout().lock())?;
    Ok(())
}

/// File config (or defaults) with CLI flags layered on top.
fn resolve_config(run: &RunArgs) -> Result<AnalysisConfig> {
    let mut config = match &run.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(tf) = run.timeframe {
        config.timeframe = tf.into();
    }
    if let Some(risk) = run.risk {
        config.risk_tolerance = risk.into();
    }
    if let Some(iterations) = run.iterations {
        config.iterations = iterations;
    }
    if run.seed.is_some() {
        config.seed = run.seed;
    }
    if run.days.is_some() {
        config.days = run.days;
    }
    if run.include_paths {
        config.include_paths = true;
    }
    Ok(config)
}

fn load_series(data: &DataArgs) -> Result<(String, PriceSeries, bool)> {
    if data.synthetic {
        tracing::warn!(
            seed = data.synthetic_seed,
            "using synthetic data; the report will be tagged synthetic"
        );
        let series = synthetic::generate(&SyntheticConfig {
            seed: data.synthetic_seed,
            ..SyntheticConfig::default()
        })?;
        let symbol = data.symbol.clone().unwrap_or_else(|| "SYNTH".to_string());
        return Ok((symbol, series, true));
    }

    let Some(path) = &data.csv else {
        bail!("one of --csv or --synthetic is required");
    };
    let series = load_csv(path)?;
    let symbol = match &data.symbol {
        Some(s) => s.clone(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "UNKNOWN".to_string()),
    };
    Ok((symbol, series, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "signalscope",
            "simulate",
            "--synthetic",
            "--timeframe",
            "long",
            "--risk",
            "aggressive",
            "--iterations",
            "50",
            "--seed",
            "3",
            "--days",
            "10",
        ]);
        let Commands::Simulate { run, .. } = cli.command else {
            panic!("expected simulate");
        };
        let config = resolve_config(&run).unwrap();
        assert_eq!(config.timeframe, Timeframe::Long);
        assert_eq!(config.risk_tolerance, RiskTolerance::Aggressive);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.horizon_days(), 10);
    }

    #[test]
    fn csv_and_synthetic_conflict() {
        let result = Cli::try_parse_from([
            "signalscope",
            "analyze",
            "--csv",
            "bars.csv",
            "--synthetic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_data_source_is_an_error() {
        let data = DataArgs {
            csv: None,
            synthetic: false,
            synthetic_seed: 42,
            symbol: None,
        };
        assert!(load_series(&data).is_err());
    }

    #[test]
    fn symbol_defaults_for_synthetic() {
        let data = DataArgs {
            csv: None,
            synthetic: true,
            synthetic_seed: 1,
            symbol: None,
        };
        let (symbol, series, synthetic) = load_series(&data).unwrap();
        assert_eq!(symbol, "SYNTH");
        assert_eq!(series.len(), 300);
        assert!(synthetic);
    }
}
