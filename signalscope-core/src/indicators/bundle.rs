//! IndicatorResult union and the per-request IndicatorBundle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bollinger::BollingerResult;
use super::macd::MacdResult;
use super::rsi::RsiResult;
use super::sma::SmaResult;
use super::volume::VolumeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Bollinger,
    Sma,
    Volume,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
        IndicatorKind::Sma,
        IndicatorKind::Volume,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Sma => "sma",
            IndicatorKind::Volume => "volume",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorResult {
    Rsi(RsiResult),
    Macd(MacdResult),
    Bollinger(BollingerResult),
    Sma(SmaResult),
    Volume(VolumeResult),
}

impl IndicatorResult {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorResult::Rsi(_) => IndicatorKind::Rsi,
            IndicatorResult::Macd(_) => IndicatorKind::Macd,
            IndicatorResult::Bollinger(_) => IndicatorKind::Bollinger,
            IndicatorResult::Sma(_) => IndicatorKind::Sma,
            IndicatorResult::Volume(_) => IndicatorKind::Volume,
        }
    }
}

/// All indicator results for one request, keyed by kind.
///
/// Built once by `IndicatorEngine::compute_all` and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    results: BTreeMap<IndicatorKind, IndicatorResult>,
}

impl IndicatorBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result under its own kind, replacing any previous one.
    pub fn insert(&mut self, result: IndicatorResult) {
        self.results.insert(result.kind(), result);
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorResult> {
        self.results.get(&kind)
    }

    pub fn contains(&self, kind: IndicatorKind) -> bool {
        self.results.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorResult> {
        self.results.values()
    }

    pub fn rsi(&self) -> Option<&RsiResult> {
        match self.get(IndicatorKind::Rsi)? {
            IndicatorResult::Rsi(r) => Some(r),
            _ => None,
        }
    }

    pub fn macd(&self) -> Option<&MacdResult> {
        match self.get(IndicatorKind::Macd)? {
            IndicatorResult::Macd(r) => Some(r),
            _ => None,
        }
    }

    pub fn bollinger(&self) -> Option<&BollingerResult> {
        match self.get(IndicatorKind::Bollinger)? {
            IndicatorResult::Bollinger(r) => Some(r),
            _ => None,
        }
    }

    pub fn sma(&self) -> Option<&SmaResult> {
        match self.get(IndicatorKind::Sma)? {
            IndicatorResult::Sma(r) => Some(r),
            _ => None,
        }
    }

    pub fn volume(&self) -> Option<&VolumeResult> {
        match self.get(IndicatorKind::Volume)? {
            IndicatorResult::Volume(r) => Some(r),
            _ => None,
        }
    }
}

impl FromIterator<IndicatorResult> for IndicatorBundle {
    fn from_iter<I: IntoIterator<Item = IndicatorResult>>(iter: I) -> Self {
        let mut bundle = IndicatorBundle::new();
        for result in iter {
            bundle.insert(result);
        }
        bundle
    }
}
