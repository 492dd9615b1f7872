//! Per-symbol fetch and normalization onto the canonical row schema.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::{
    models::{
        date_range::DateRange,
        price_record::PriceRecord,
        session::SessionSeries,
        symbol_batch::SymbolBatch,
    },
    providers::DataProvider,
    retry::RetryPolicy,
};

/// Wraps a [`DataProvider`] and turns whatever it returns into a [`SymbolBatch`].
///
/// The fetcher never fails: provider faults are logged and reported as an
/// empty batch, so one symbol cannot abort the rest of a run.
pub struct Fetcher<P> {
    provider: P,
    retry: RetryPolicy,
}

impl<P: DataProvider> Fetcher<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches `symbol` for sessions `start..=end`.
    pub async fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> SymbolBatch {
        match DateRange::new(start, end) {
            Ok(range) => self.fetch_range(symbol, range).await,
            Err(err) => {
                warn!(symbol, error = %err, "invalid date range, nothing fetched");
                SymbolBatch::empty(symbol)
            }
        }
    }

    pub async fn fetch_range(&self, symbol: &str, range: DateRange) -> SymbolBatch {
        let fetched = self
            .retry
            .run(symbol, |_| self.provider.fetch_daily(symbol, range))
            .await;

        match fetched {
            Ok(series) if series.is_empty() => {
                debug!(symbol, "provider returned no sessions");
                SymbolBatch::empty(symbol)
            }
            Ok(series) => normalize(
                symbol,
                self.provider.source(),
                Utc::now().naive_utc(),
                series,
            ),
            Err(err) => {
                warn!(symbol, error = %err, "fetch failed");
                SymbolBatch::empty(symbol)
            }
        }
    }
}

/// Maps provider sessions onto canonical records.
///
/// `adj_close` is a copy of `close`, and the provider's own adjusted close is
/// dropped. Every record gets the same `source` and `ingested_at`.
pub fn normalize(
    symbol: &str,
    source: &str,
    ingested_at: NaiveDateTime,
    series: SessionSeries,
) -> SymbolBatch {
    let records = series
        .sessions
        .into_iter()
        .map(|s| PriceRecord {
            symbol: symbol.to_string(),
            date: s.session_date,
            open: s.open,
            high: s.high,
            low: s.low,
            close: s.close,
            adj_close: s.close,
            volume: s.volume,
            source: source.to_string(),
            ingestion_timestamp: ingested_at,
        })
        .collect();
    SymbolBatch::new(symbol, records)
}
