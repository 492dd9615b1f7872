//! Provider-native daily series, before normalization.
//!
//! Every [`DataProvider`](crate::providers::DataProvider) returns its sessions in
//! this shape. Field names and the optional adjusted close follow the provider;
//! the [`Fetcher`](crate::fetcher::Fetcher) maps them onto [`PriceRecord`](crate::models::price_record::PriceRecord).

use chrono::NaiveDate;

/// One trading session as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionBar {
    /// Exchange-local calendar date of the session.
    pub session_date: NaiveDate,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    /// Shares traded during the session.
    pub volume: u64,

    /// Provider's dividend/split adjusted close. Not all providers supply this,
    /// and normalization does not use it.
    pub adj_close: Option<f64>,
}

/// All sessions a provider returned for one symbol, ordered by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSeries {
    pub symbol: String,
    pub sessions: Vec<SessionBar>,
}

impl SessionSeries {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            sessions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
