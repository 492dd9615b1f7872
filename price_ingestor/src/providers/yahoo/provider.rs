use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Url};
use snafu::{OptionExt, ResultExt};
use tracing::debug;

use crate::{
    models::{date_range::DateRange, session::SessionSeries},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidBaseUrlSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, ValidationSnafu,
        yahoo::{SOURCE, params::ChartParams, response::ChartResponse},
    },
    utils::truncate_message,
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct YahooProvider {
    client: Client,
    base_url: Url,
    limiter: DefaultDirectRateLimiter,
}

impl YahooProvider {
    /// Creates a provider against the public chart endpoint, paced to at most
    /// `requests_per_second`.
    pub fn new(requests_per_second: NonZeroU32) -> Result<Self, ProviderInitError> {
        Self::with_base_url(BASE_URL, requests_per_second)
    }

    /// Same as [`YahooProvider::new`] but against another host, e.g. a proxy or a local stub.
    pub fn with_base_url(
        base_url: &str,
        requests_per_second: NonZeroU32,
    ) -> Result<Self, ProviderInitError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            InvalidBaseUrlSnafu {
                url: base_url,
                message: e.to_string(),
            }
            .build()
        })?;
        if base_url.cannot_be_a_base() {
            return InvalidBaseUrlSnafu {
                url: base_url.as_str(),
                message: "not a hierarchical URL",
            }
            .fail();
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url,
            limiter: RateLimiter::direct(Quota::per_second(requests_per_second)),
        })
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()
            .context(ValidationSnafu {
                message: format!("cannot append {symbol} to {}", self.base_url),
            })?
            .pop_if_empty()
            .push(symbol);
        Ok(url)
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    fn source(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_daily(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<SessionSeries, ProviderError> {
        if symbol.trim().is_empty() {
            return ValidationSnafu {
                message: "symbol must not be empty",
            }
            .fail();
        }

        let url = self.chart_url(symbol)?;
        let params = ChartParams::daily(range);

        self.limiter.until_ready().await;
        debug!(symbol, period1 = params.period1, period2 = params.period2, "requesting yahoo chart");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .context(ReqwestSnafu)?;
        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        if !status.is_success() {
            // Unknown symbols come back as 404 with a structured chart.error body.
            if let Ok(chart) = serde_json::from_str::<ChartResponse>(&body) {
                if chart.chart.error.is_some() {
                    return chart.into_series(symbol, range);
                }
            }
            return ApiSnafu {
                message: format!("HTTP {status}: {}", truncate_message(&body, 200)),
            }
            .fail();
        }

        let chart: ChartResponse = serde_json::from_str(&body).context(DecodeSnafu)?;
        chart.into_series(symbol, range)
    }
}
