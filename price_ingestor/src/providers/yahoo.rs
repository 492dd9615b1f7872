//! Yahoo Finance chart API (`/v8/finance/chart/{symbol}`), daily interval only.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;

/// Provenance tag stamped on every record fetched through Yahoo Finance.
pub const SOURCE: &str = "yahoo_finance";
