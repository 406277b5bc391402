//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::indicators::{Candle, SmaIndicator};

/// Calculate the SMA of the last `period` closes
pub fn calculate_sma(candles: &[Candle], period: u32) -> Option<SmaIndicator> {
    if period == 0 || candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let value = math::sma(&closes, period as usize)?;

    Some(SmaIndicator { value, period })
}

/// Calculate multiple SMAs at once, skipping periods longer than the history
pub fn calculate_smas(candles: &[Candle], periods: &[u32]) -> Vec<SmaIndicator> {
    periods
        .iter()
        .filter_map(|&period| calculate_sma(candles, period))
        .collect()
}

/// Whether the last close sits above the SMA of `period`.
///
/// `None` when the SMA is undefined.
pub fn is_above_sma(candles: &[Candle], period: u32) -> Option<bool> {
    let sma = calculate_sma(candles, period)?;
    let last = candles.last()?;
    Some(last.close > sma.value)
}
