//! Score-to-label mapping and protective levels

use serde::{Deserialize, Serialize};

use crate::common::math::round2;
use crate::models::signal::SignalLabel;

pub const STRONG_BUY_MIN: i32 = 70;
pub const BUY_MIN: i32 = 60;
pub const SELL_MAX: i32 = 40;

pub const STOP_LOSS_FACTOR: f64 = 0.95;
pub const TAKE_PROFIT_FACTOR: f64 = 1.15;

/// Map a capped confidence score to its label, highest bucket first.
pub fn classify(score: i32) -> SignalLabel {
    if score >= STRONG_BUY_MIN {
        SignalLabel::StrongBuy
    } else if score >= BUY_MIN {
        SignalLabel::Buy
    } else if score > SELL_MAX {
        SignalLabel::Neutral
    } else {
        SignalLabel::Sell
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopLossTakeProfit {
    pub stop_loss: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
}

impl StopLossTakeProfit {
    /// 5% stop below and, optionally, 15% target above `price`, both at 2 dp.
    pub fn from_price(price: f64, include_target: bool) -> Self {
        Self {
            stop_loss: round2(price * STOP_LOSS_FACTOR),
            take_profit: include_target.then(|| round2(price * TAKE_PROFIT_FACTOR)),
        }
    }
}
