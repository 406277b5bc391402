use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLC bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Date-ordered price history for one symbol.
///
/// Candles are kept ascending by date with no duplicate dates. When the
/// source repeats a date, the last occurrence wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UncheckedSeries")]
pub struct PriceSeries {
    pub symbol: String,
    candles: Vec<Candle>,
}

/// Wire shape of a series before ordering and deduplication.
#[derive(Deserialize)]
struct UncheckedSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl From<UncheckedSeries> for PriceSeries {
    fn from(raw: UncheckedSeries) -> Self {
        PriceSeries::new(raw.symbol, raw.candles)
    }
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, mut candles: Vec<Candle>) -> Self {
        // stable sort keeps source order among equal dates so the later one survives dedup
        candles.sort_by_key(|c| c.date);
        let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
        for candle in candles {
            match deduped.last_mut() {
                Some(last) if last.date == candle.date => *last = candle,
                _ => deduped.push(candle),
            }
        }

        Self {
            symbol: symbol.into(),
            candles: deduped,
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdDevIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub std_dev: f64,
    pub period: u32,
    pub k: f64,
}

/// Window lengths used to build an [`IndicatorSnapshot`](crate::indicators::IndicatorSnapshot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub trend_sma_period: u32,
    pub rsi_period: u32,
    pub bollinger_period: u32,
    pub bollinger_k: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            trend_sma_period: 50,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_k: 2.0,
        }
    }
}
