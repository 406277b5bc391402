//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::{BollingerBandsIndicator, Candle};

pub const DEFAULT_BOLLINGER_PERIOD: u32 = 20;
pub const DEFAULT_BOLLINGER_K: f64 = 2.0;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (k * standard deviation)
/// Lower Band = Middle - (k * standard deviation)
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: u32,
    k: f64,
) -> Option<BollingerBandsIndicator> {
    if period == 0 || candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period as usize)?;
    let std = math::standard_deviation(&closes, period as usize)?;

    Some(BollingerBandsIndicator {
        upper: middle + (k * std),
        middle,
        lower: middle - (k * std),
        std_dev: std,
        period,
        k,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(candles, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_K)
}
