//! SignalScope Runner — analysis orchestration around the core engines.
//!
//! This crate builds on `signalscope-core` to provide:
//! - TOML analysis config with indicator and scoring table overrides
//! - CSV bar loading and JSON fundamentals loading
//! - Seeded synthetic series for demos
//! - The `Analyzer` pipeline: indicators, score, projection, scenarios
//! - Trade recommendations from score and scenarios
//! - JSON, CSV and Markdown report export

pub mod analysis;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod recommendation;
pub mod synthetic;

pub use analysis::{AnalysisError, AnalysisReport, Analyzer, ProjectionReport, SCHEMA_VERSION};
pub use config::{AnalysisConfig, ConfigError};
pub use data_loader::{load_csv, load_fundamentals, parse_csv, LoadError};
pub use export::{generate_report, load_artifacts, save_artifacts, ArtifactPaths};
pub use recommendation::{Action, Consensus, PositionSize, Recommendation, TradePlan};
pub use synthetic::{SyntheticConfig, SyntheticError};
