//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::{debug, warn};

use super::messages::ChartResponse;
use crate::models::indicators::PriceSeries;
use crate::services::market_data::{FetchError, Interval, MarketDataProvider, Period};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const DEFAULT_MAX_RETRIES: usize = 2;

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Retries after the first attempt on transient failures (0 disables).
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries, FetchError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!(symbol = %symbol, period = %period, interval = %interval, "Fetching chart from Yahoo Finance");

        let response = self
            .client
            .get(&url)
            .query(&[("range", period.as_str()), ("interval", interval.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let chart: ChartResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse(format!("{}: {}", symbol, e)))?;

        let series = chart.into_series(symbol)?;
        debug!(symbol = %symbol, count = series.len(), "Fetched {} bars for {}", series.len(), symbol);
        Ok(series)
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries, FetchError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_delay(Duration::from_secs(2))
            .with_max_times(self.max_retries);

        (|| self.fetch_once(symbol, period, interval))
            .retry(backoff)
            .when(FetchError::is_retryable)
            .notify(|err: &FetchError, after: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    retry_in_ms = after.as_millis() as u64,
                    "Yahoo fetch failed, retrying"
                );
            })
            .await
    }
}
