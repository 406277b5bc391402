//! Rolling standard deviation of closes

use crate::common::math;
use crate::models::indicators::{Candle, StdDevIndicator};

/// Population standard deviation of the last `period` closes
pub fn calculate_std_dev(candles: &[Candle], period: u32) -> Option<StdDevIndicator> {
    if period == 0 || candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let value = math::standard_deviation(&closes, period as usize)?;

    Some(StdDevIndicator { value, period })
}
