//! Input loading: daily bars from CSV and optional fundamentals from JSON.
//!
//! CSV layout is `date,open,high,low,close,volume` with a header row. Header
//! matching is case-insensitive; `adj_close` and any extra columns are ignored.
//! Rows may arrive in any order; they are sorted by date before the series is
//! validated, and a repeated date is an error rather than a silent overwrite.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use signalscope_core::domain::{PriceBar, PriceSeries, SeriesError};
use signalscope_core::fundamentals::FundamentalProfile;

const REQUIRED_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse {column} from '{value}'")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("duplicate bar for {0}")]
    DuplicateDate(NaiveDate),

    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),

    #[error("invalid fundamentals JSON: {0}")]
    Fundamentals(#[from] serde_json::Error),
}

/// Load and validate a price series from a CSV file.
pub fn load_csv(path: &Path) -> Result<PriceSeries, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let series = parse_csv(file)?;
    let inconsistent = series
        .bars()
        .iter()
        .filter(|bar| !bar.is_consistent())
        .count();
    if inconsistent > 0 {
        tracing::warn!(
            path = %path.display(),
            inconsistent,
            "bars with high/low outside open/close; only closes and volumes are used"
        );
    }
    tracing::info!(
        path = %path.display(),
        bars = series.len(),
        first = %series.first_date(),
        last = %series.last_date(),
        "price series loaded"
    );
    Ok(series)
}

/// Parse CSV bars from any reader.
pub fn parse_csv<R: Read>(reader: R) -> Result<PriceSeries, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let mut columns = [0usize; 6];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }

    let mut bars = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // Row numbers count the header as row 1.
        let row = i + 2;
        let field = |col: usize| record.get(columns[col]).unwrap_or("");

        let date = NaiveDate::parse_from_str(field(0), "%Y-%m-%d").map_err(|_| {
            LoadError::Parse {
                row,
                column: "date",
                value: field(0).to_string(),
            }
        })?;
        let number = |col: usize| -> Result<f64, LoadError> {
            field(col).parse::<f64>().map_err(|_| LoadError::Parse {
                row,
                column: REQUIRED_COLUMNS[col],
                value: field(col).to_string(),
            })
        };

        bars.push(PriceBar {
            date,
            open: number(1)?,
            high: number(2)?,
            low: number(3)?,
            close: number(4)?,
            volume: number(5)?,
        });
    }

    bars.sort_by_key(|b| b.date);
    if let Some(dup) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(LoadError::DuplicateDate(dup[0].date));
    }

    Ok(PriceSeries::new(bars)?)
}

/// Write a series as CSV in the layout `parse_csv` reads.
pub fn write_csv<W: Write>(series: &PriceSeries, writer: W) -> Result<(), LoadError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for bar in series.bars() {
        wtr.serialize(bar)?;
    }
    wtr.flush().map_err(|e| LoadError::Csv(e.into()))?;
    Ok(())
}

/// Load a fundamentals profile from JSON, dropping impossible dividend values.
pub fn load_fundamentals(path: &Path) -> Result<FundamentalProfile, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let profile: FundamentalProfile = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "fundamentals loaded");
    Ok(profile.sanitized())
}
