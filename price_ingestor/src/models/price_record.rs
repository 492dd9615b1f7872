//! Canonical row of the raw price table.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One symbol on one trading day, as persisted in the raw table.
///
/// Field order is the column order of the sink table; see [`PriceRecord::COLUMNS`].
/// `low <= open, close <= high` is guaranteed by the provider and not checked here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Copy of `close`; the provider's own adjusted close is not used.
    pub adj_close: f64,
    pub volume: u64,
    /// Provenance tag of the provider, e.g. `yahoo_finance`.
    pub source: String,
    /// Wall-clock UTC time of the fetch call. Shared by every row of a batch.
    pub ingestion_timestamp: NaiveDateTime,
}

impl PriceRecord {
    /// Canonical column set, in sink order.
    pub const COLUMNS: [&'static str; 10] = [
        "symbol",
        "date",
        "open",
        "high",
        "low",
        "close",
        "adj_close",
        "volume",
        "source",
        "ingestion_timestamp",
    ];
}
