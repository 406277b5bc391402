//! Yahoo Finance v8 chart response shapes.

use chrono::DateTime;
use serde::Deserialize;

use crate::models::indicators::{Candle, PriceSeries};
use crate::services::market_data::FetchError;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuote {
    pub open: Option<Vec<Option<f64>>>,
    pub high: Option<Vec<Option<f64>>>,
    pub low: Option<Vec<Option<f64>>>,
    pub close: Option<Vec<Option<f64>>>,
    pub volume: Option<Vec<Option<f64>>>,
}

impl ChartResponse {
    /// Convert into a series, dropping bars with any missing OHLC field.
    pub fn into_series(self, symbol: &str) -> Result<PriceSeries, FetchError> {
        if let Some(error) = self.chart.error {
            return Err(FetchError::Provider(format!(
                "{} - {}",
                error.code, error.description
            )));
        }

        let result = self
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| FetchError::Empty(symbol.to_string()))?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse(format!("no quote block for {}", symbol)))?;

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        let candles: Vec<Candle> = timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let date = DateTime::from_timestamp(ts, 0)?.date_naive();
                let candle = Candle::new(
                    date,
                    field(&opens, i)?,
                    field(&highs, i)?,
                    field(&lows, i)?,
                    field(&closes, i)?,
                );
                Some(match field(&volumes, i) {
                    Some(v) => candle.with_volume(v),
                    None => candle,
                })
            })
            .collect();

        if candles.is_empty() {
            return Err(FetchError::Empty(symbol.to_string()));
        }

        Ok(PriceSeries::new(symbol, candles))
    }
}
