//! Universe scanner: score every symbol independently and rank the results.

use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::metrics::Metrics;
use crate::models::indicators::{IndicatorParams, PriceSeries};
use crate::models::signal::{ScanResult, SignalRecord, SkippedSymbol};
use crate::services::market_data::{Interval, MarketDataProvider, Period};
use crate::signals::{DataUnavailable, ScoringRules, SignalEngine};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub universe: Vec<String>,
    pub period: Period,
    pub interval: Interval,
    pub chart_period: Period,
    pub fetch_timeout: Duration,
    pub concurrency: usize,
    pub rules: ScoringRules,
    pub params: IndicatorParams,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            universe: Vec::new(),
            period: Period::OneYear,
            interval: Interval::Daily,
            chart_period: Period::SixMonths,
            fetch_timeout: Duration::from_secs(10),
            concurrency: 8,
            rules: ScoringRules::default(),
            params: IndicatorParams::default(),
        }
    }
}

impl ScanConfig {
    /// Set the universe, trimming and upper-casing symbols and dropping
    /// repeats while keeping first-seen order.
    pub fn with_universe<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut universe: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim().to_uppercase();
            if !symbol.is_empty() && !universe.contains(&symbol) {
                universe.push(symbol);
            }
        }
        self.universe = universe;
        self
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("symbol {0} is not in the universe")]
    UnknownSymbol(String),

    #[error("chart data unavailable: {0}")]
    Unavailable(#[from] DataUnavailable),
}

pub struct UniverseScanner {
    provider: Arc<dyn MarketDataProvider>,
    config: ScanConfig,
    metrics: Option<Arc<Metrics>>,
}

impl UniverseScanner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: ScanConfig) -> Self {
        Self {
            provider,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn universe(&self) -> &[String] {
        &self.config.universe
    }

    /// Score the whole universe.
    ///
    /// Symbols are fetched on a bounded pool; results come back in universe
    /// order so equal scores stay in that order after ranking. A symbol that
    /// cannot be scored is left out and never fails the scan.
    pub async fn scan(&self) -> ScanResult {
        let start = Instant::now();
        let universe = &self.config.universe;

        info!(
            symbol_count = universe.len(),
            concurrency = self.config.concurrency,
            "Scanner: starting scan of {} symbols",
            universe.len()
        );

        let outcomes: Vec<(String, Result<SignalRecord, DataUnavailable>)> =
            stream::iter(universe.iter().cloned())
                .map(|symbol| async move {
                    let outcome = self.evaluate_symbol(&symbol).await;
                    (symbol, outcome)
                })
                .buffered(self.config.concurrency.max(1))
                .collect()
                .await;

        let mut records = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();

        for (symbol, outcome) in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(reason) => {
                    if reason.is_expected() {
                        debug!(symbol = %symbol, reason = %reason, "Scanner: skipping {}", symbol);
                    } else {
                        warn!(symbol = %symbol, reason = %reason, "Scanner: unexpected fault for {}, skipping", symbol);
                    }
                    if let Some(ref metrics) = self.metrics {
                        metrics
                            .symbols_skipped_total
                            .with_label_values(&[reason.kind()])
                            .inc();
                    }
                    skipped.push(SkippedSymbol {
                        symbol,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        let result = ScanResult::new(records, skipped, universe.len());
        let elapsed = start.elapsed();

        if let Some(ref metrics) = self.metrics {
            metrics.scans_total.inc();
            metrics.scan_duration_seconds.observe(elapsed.as_secs_f64());
            metrics.symbols_scored.set(result.len() as f64);
        }

        if result.is_empty() {
            warn!(
                universe_size = universe.len(),
                "Scanner: no symbol could be scored"
            );
        }

        info!(
            scored = result.len(),
            skipped = result.skipped.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Scanner: scan complete, {} scored, {} skipped",
            result.len(),
            result.skipped.len()
        );

        result
    }

    /// Fetch and score one symbol.
    pub async fn evaluate_symbol(&self, symbol: &str) -> Result<SignalRecord, DataUnavailable> {
        let series = self.fetch(symbol, self.config.period).await?;
        SignalEngine::evaluate(symbol, &series, &self.config.rules, &self.config.params)
    }

    /// Fetch the chart-period history of a universe symbol.
    pub async fn chart(&self, symbol: &str) -> Result<PriceSeries, ChartError> {
        let symbol = symbol.trim().to_uppercase();
        if !self.config.universe.contains(&symbol) {
            return Err(ChartError::UnknownSymbol(symbol));
        }
        Ok(self.fetch(&symbol, self.config.chart_period).await?)
    }

    async fn fetch(&self, symbol: &str, period: Period) -> Result<PriceSeries, DataUnavailable> {
        let fetch = self
            .provider
            .fetch_series(symbol, period, self.config.interval);

        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(series) => Ok(series?),
            Err(_) => Err(DataUnavailable::Timeout(self.config.fetch_timeout)),
        }
    }
}
