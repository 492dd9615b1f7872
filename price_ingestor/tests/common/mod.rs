#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;
use price_ingestor::{
    io::sink::{DataSink, SinkError, WriteSnafu},
    models::{
        date_range::DateRange,
        session::{SessionBar, SessionSeries},
        symbol_batch::SymbolBatch,
    },
    providers::{ApiSnafu, DataProvider, ProviderError},
};

pub const SOURCE: &str = "static";

/// What [`StaticProvider`] answers for a symbol.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// `n` consecutive daily sessions starting at the range start.
    Sessions(usize),
    Empty,
    Fail,
    /// Fails the first `k` calls, then behaves like `Sessions(n)`.
    FailThen(usize, usize),
}

/// Scripted provider; unknown symbols behave like [`Script::Empty`].
#[derive(Default)]
pub struct StaticProvider {
    scripts: HashMap<String, Script>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new<'a>(scripts: impl IntoIterator<Item = (&'a str, Script)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(s, script)| (s.to_string(), script))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self, symbol: &str) -> usize {
        self.calls.lock().unwrap().get(symbol).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }
}

pub fn sessions(range: DateRange, n: usize) -> Vec<SessionBar> {
    range
        .start()
        .iter_days()
        .take(n)
        .enumerate()
        .map(|(i, session_date)| {
            let px = 100.0 + i as f64;
            SessionBar {
                session_date,
                open: px,
                high: px + 2.0,
                low: px - 1.0,
                close: px + 1.0,
                volume: 1_000_000 + i as u64,
                adj_close: Some(px + 0.5),
            }
        })
        .collect()
}

#[async_trait]
impl DataProvider for StaticProvider {
    fn source(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_daily(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<SessionSeries, ProviderError> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(symbol.to_string()).or_default();
            *entry += 1;
            *entry
        };

        let script = self.scripts.get(symbol).copied().unwrap_or(Script::Empty);
        let n = match script {
            Script::Sessions(n) => n,
            Script::Empty => 0,
            Script::Fail => {
                return ApiSnafu {
                    message: format!("No data found, symbol {symbol} may be delisted"),
                }
                .fail();
            }
            Script::FailThen(k, n) => {
                if call <= k {
                    return ApiSnafu {
                        message: "Too Many Requests".to_string(),
                    }
                    .fail();
                }
                n
            }
        };

        Ok(SessionSeries {
            symbol: symbol.to_string(),
            sessions: sessions(range, n),
        })
    }
}

/// Rejects every write the way a unique-constraint violation would.
#[derive(Default)]
pub struct RejectingSink {
    pub calls: AtomicUsize,
}

#[async_trait]
impl DataSink for RejectingSink {
    async fn write(&self, batch: &SymbolBatch) -> Result<usize, SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        WriteSnafu {
            message: format!(
                "duplicate key value violates unique constraint \"stock_prices_symbol_date_source_key\" (symbol {})",
                batch.symbol()
            ),
        }
        .fail()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
