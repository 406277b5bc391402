//! Last-observed indicator values for one asset at scan time.

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::calculate_rsi;
use crate::indicators::trend::calculate_sma;
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::{IndicatorParams, PriceSeries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub current_price: f64,
    pub sma50: f64,
    pub sma20: f64,
    pub std_dev20: f64,
    pub rsi14: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

impl IndicatorSnapshot {
    /// Compute every indicator over the trailing windows of `series`.
    ///
    /// Fails on the first indicator whose window is longer than the history.
    pub fn compute(
        series: &PriceSeries,
        params: &IndicatorParams,
    ) -> Result<Self, IndicatorError> {
        let candles = series.candles();
        let available = candles.len();

        if let Some(bad) = candles.iter().find(|c| !c.close.is_finite()) {
            return Err(IndicatorError::NonFinite {
                indicator: "close",
                value: bad.close,
            });
        }

        let current_price = candles
            .last()
            .map(|c| c.close)
            .ok_or(IndicatorError::InsufficientData {
                indicator: "price",
                required: 1,
                available,
            })?;

        let sma_trend = calculate_sma(candles, params.trend_sma_period).ok_or(
            IndicatorError::InsufficientData {
                indicator: "sma",
                required: params.trend_sma_period as usize,
                available,
            },
        )?;

        let rsi = calculate_rsi(candles, params.rsi_period).ok_or(
            IndicatorError::InsufficientData {
                indicator: "rsi",
                required: params.rsi_period as usize + 1,
                available,
            },
        )?;

        let bands = calculate_bollinger_bands(candles, params.bollinger_period, params.bollinger_k)
            .ok_or(IndicatorError::InsufficientData {
                indicator: "bollinger",
                required: params.bollinger_period as usize,
                available,
            })?;

        Ok(Self {
            current_price,
            sma50: sma_trend.value,
            sma20: bands.middle,
            std_dev20: bands.std_dev,
            rsi14: rsi.value,
            upper_band: bands.upper,
            lower_band: bands.lower,
        })
    }
}
