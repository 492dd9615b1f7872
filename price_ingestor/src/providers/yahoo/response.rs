use chrono::DateTime;
use serde::Deserialize;
use snafu::OptionExt;
use tracing::debug;

use crate::{
    models::{
        date_range::DateRange,
        session::{SessionBar, SessionSeries},
    },
    providers::{ApiSnafu, InternalSnafu, ProviderError},
};

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds, used to turn session timestamps into local dates.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseColumn>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdjCloseColumn {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

fn at<T: Copy>(column: &[Option<T>], i: usize) -> Option<T> {
    column.get(i).copied().flatten()
}

impl ChartResponse {
    /// Converts the columnar chart payload into one [`SessionBar`] per session.
    ///
    /// Sessions outside `range` (by exchange-local date) and sessions with a
    /// missing price are dropped. A missing volume is read as zero.
    pub fn into_series(self, symbol: &str, range: DateRange) -> Result<SessionSeries, ProviderError> {
        if let Some(err) = self.chart.error {
            return ApiSnafu {
                message: format!("{}: {}", err.code, err.description),
            }
            .fail();
        }

        let Some(result) = self.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(SessionSeries::empty(symbol));
        };
        if result.timestamp.is_empty() {
            return Ok(SessionSeries::empty(symbol));
        }

        let quote = result
            .indicators
            .quote
            .first()
            .context(InternalSnafu {
                message: format!("{symbol}: timestamps present but no quote columns"),
            })?;
        let adjclose = result
            .indicators
            .adjclose
            .first()
            .map(|a| a.adjclose.as_slice())
            .unwrap_or_default();

        let mut sessions = Vec::with_capacity(result.timestamp.len());
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let session_date = ts
                .checked_add(result.meta.gmtoffset)
                .and_then(|local| DateTime::from_timestamp(local, 0))
                .context(InternalSnafu {
                    message: format!("{symbol}: timestamp {ts} out of range"),
                })?
                .date_naive();
            if !range.contains(session_date) {
                continue;
            }

            let (Some(open), Some(high), Some(low), Some(close)) = (
                at(&quote.open, i),
                at(&quote.high, i),
                at(&quote.low, i),
                at(&quote.close, i),
            ) else {
                debug!(symbol, %session_date, "dropping session with missing prices");
                continue;
            };

            sessions.push(SessionBar {
                session_date,
                open,
                high,
                low,
                close,
                volume: at(&quote.volume, i).unwrap_or(0),
                adj_close: at(adjclose, i),
            });
        }

        Ok(SessionSeries {
            symbol: symbol.to_string(),
            sessions,
        })
    }
}
