use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::date_range::DateRange;

/// Bar interval. Only daily sessions are ingested.
#[derive(Clone, Copy, Debug, Serialize, Default, PartialEq, Eq)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
}

/// Query string of a chart request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartParams {
    /// Inclusive lower bound, unix seconds.
    pub period1: i64,
    /// Exclusive upper bound, unix seconds.
    pub period2: i64,
    pub interval: Interval,
    pub events: &'static str,
    pub include_adjusted_close: bool,
}

impl ChartParams {
    /// Maps the inclusive date range onto the half-open unix-time range the
    /// chart endpoint expects: `[start - 1 day 00:00 UTC, end + 1 day 00:00 UTC)`.
    ///
    /// The extra leading day covers exchanges east of UTC, whose first local
    /// session on `start` opens before midnight UTC. Sessions are filtered back
    /// to `range` by local date after decoding.
    pub fn daily(range: DateRange) -> Self {
        let lead = range
            .start()
            .checked_sub_days(Days::new(1))
            .unwrap_or(range.start());
        Self {
            period1: midnight_utc(lead),
            period2: midnight_utc(range.end_exclusive()),
            interval: Interval::OneDay,
            events: "history",
            include_adjusted_close: true,
        }
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
