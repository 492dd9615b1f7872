//! Run configuration: which symbols, which dates, and how hard to push.
//!
//! A [`RunConfig`] can be parsed from TOML ([`RunConfig::from_toml_str`],
//! [`RunConfig::load_path`]); every key is optional and falls back to
//! [`RunConfig::default`]. Parsing normalizes symbols and validates the result.
//!
//! ```toml
//! symbols = ["AAPL", "MSFT"]
//! start = "2024-01-01"
//! end = "2024-06-30"
//! concurrency = 2
//! write_mode = "append"
//!
//! [retry]
//! max_retries = 3
//! base_delay_ms = 500
//! ```

use std::{num::NonZeroU32, num::NonZeroUsize, path::Path};

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{io::sink::WriteMode, models::date_range::DateRange, retry::RetryPolicy};

pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "JPM", "V", "WMT",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunConfigError {
    #[error("symbol list is empty")]
    NoSymbols,
    #[error("symbol at position {0} is blank")]
    BlankSymbol(usize),
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("requests_per_second must be at least 1")]
    ZeroRate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub symbols: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub retry: RetryPolicy,
    pub concurrency: usize,
    pub write_mode: WriteMode,
    /// Provider request budget.
    pub requests_per_second: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            start: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            retry: RetryPolicy::default(),
            concurrency: 1,
            write_mode: WriteMode::default(),
            requests_per_second: 2,
        }
    }
}

impl RunConfig {
    /// Trims every symbol in place, then checks the invariants a run relies on.
    ///
    /// Symbols are neither deduplicated nor reordered: a symbol listed twice is
    /// attempted twice.
    pub fn validate(&mut self) -> Result<(), RunConfigError> {
        if self.symbols.is_empty() {
            return Err(RunConfigError::NoSymbols);
        }
        for (idx, symbol) in self.symbols.iter_mut().enumerate() {
            let trimmed = symbol.trim();
            if trimmed.is_empty() {
                return Err(RunConfigError::BlankSymbol(idx));
            }
            if trimmed.len() != symbol.len() {
                *symbol = trimmed.to_string();
            }
        }
        if self.start > self.end {
            return Err(RunConfigError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.concurrency == 0 {
            return Err(RunConfigError::ZeroConcurrency);
        }
        if self.requests_per_second == 0 {
            return Err(RunConfigError::ZeroRate);
        }
        Ok(())
    }

    pub fn range(&self) -> Result<DateRange, RunConfigError> {
        DateRange::new(self.start, self.end).map_err(|_| RunConfigError::InvertedRange {
            start: self.start,
            end: self.end,
        })
    }

    pub fn concurrency(&self) -> Result<NonZeroUsize, RunConfigError> {
        NonZeroUsize::new(self.concurrency).ok_or(RunConfigError::ZeroConcurrency)
    }

    pub fn rate(&self) -> Result<NonZeroU32, RunConfigError> {
        NonZeroU32::new(self.requests_per_second).ok_or(RunConfigError::ZeroRate)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let mut cfg: RunConfig = toml::from_str(text).context("failed to parse run config TOML")?;
        cfg.validate().context("invalid run config")?;
        Ok(cfg)
    }

    pub fn load_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("read run config {}", path.as_ref().display()))?;
        Self::from_toml_str(&text)
    }
}
