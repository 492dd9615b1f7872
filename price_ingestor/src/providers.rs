//! Provider abstraction for daily market data sources.
//!
//! This module defines the [`DataProvider`] trait, the single seam between the
//! ingestion pipeline and an external market-data vendor. A provider returns
//! its sessions in the provider-native [`SessionSeries`] shape; mapping onto the
//! canonical row schema is the [`Fetcher`](crate::fetcher::Fetcher)'s job.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`Box<dyn DataProvider>`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use price_ingestor::models::{date_range::DateRange, session::SessionSeries};
//! use price_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct NoData;
//!
//! #[async_trait]
//! impl DataProvider for NoData {
//!     fn source(&self) -> &'static str {
//!         "no_data"
//!     }
//!
//!     async fn fetch_daily(
//!         &self,
//!         symbol: &str,
//!         _range: DateRange,
//!     ) -> Result<SessionSeries, ProviderError> {
//!         Ok(SessionSeries::empty(symbol))
//!     }
//! }
//! ```

pub mod yahoo;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{date_range::DateRange, session::SessionSeries};

/// Trait for fetching daily session data from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fixed provenance tag stamped into every record from this provider.
    fn source(&self) -> &'static str;

    /// Fetches every session of `symbol` whose date falls inside `range`.
    ///
    /// # Returns
    ///
    /// * `Ok(series)` - Sessions ordered by date; empty when the provider has no data.
    /// * `Err(ProviderError)` - Network failure, rate limit, unknown symbol, bad payload.
    async fn fetch_daily(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<SessionSeries, ProviderError>;
}

#[async_trait]
impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn source(&self) -> &'static str {
        (**self).source()
    }

    async fn fetch_daily(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<SessionSeries, ProviderError> {
        (**self).fetch_daily(symbol, range).await
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The configured endpoint is not a usable base URL.
    #[snafu(display("Invalid base URL {url}: {message}"))]
    InvalidBaseUrl {
        url: String,
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned an error (e.g., unknown symbol, rate limit).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The response body did not have the expected shape.
    #[snafu(display("Malformed response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
