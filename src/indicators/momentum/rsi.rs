//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::{Candle, RsiIndicator};

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate RSI indicator
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are simple means of the last `period` close-to-close gains and
/// losses. A window with losses of zero saturates at 100, a completely flat
/// window reads 50.
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Option<RsiIndicator> {
    let period_len = period as usize;
    if period == 0 || candles.len() < period_len + 1 {
        return None;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = candles
        .windows(2)
        .map(|pair| {
            let change = pair[1].close - pair[0].close;
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    let avg_gain = math::sma(&gains, period_len)?;
    let avg_loss = math::sma(&losses, period_len)?;

    let value = if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    Some(RsiIndicator {
        value,
        period: Some(period),
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<RsiIndicator> {
    calculate_rsi(candles, DEFAULT_RSI_PERIOD)
}
