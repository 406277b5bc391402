//! Rule-based confidence scoring

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSnapshot;
use crate::models::signal::ScoreContribution;

pub const BASE_SCORE: i32 = 50;
pub const SCORE_CAP: i32 = 98;

pub const TREND_POINTS: i32 = 15;
pub const RSI_OVERSOLD_POINTS: i32 = 20;
pub const BOLLINGER_LOWER_POINTS: i32 = 15;
pub const RSI_OVERBOUGHT_POINTS: i32 = -20;

/// Which scoring rules apply, and the RSI levels they trigger on.
///
/// Every rule is on by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// +15 when price closes above the trend SMA.
    pub trend: bool,
    /// +20 when RSI is below `rsi_oversold`.
    pub rsi_oversold: bool,
    /// -20 when RSI is above `rsi_overbought`.
    pub rsi_overbought: bool,
    /// +15 when price closes below the lower Bollinger band.
    pub bollinger_lower: bool,
    /// Emit a take-profit level alongside the stop.
    pub include_target: bool,
    pub rsi_oversold_level: f64,
    pub rsi_overbought_level: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            trend: true,
            rsi_oversold: true,
            rsi_overbought: true,
            bollinger_lower: true,
            include_target: true,
            rsi_oversold_level: 35.0,
            rsi_overbought_level: 70.0,
        }
    }
}

impl ScoringRules {
    /// Trend and RSI rules only, without the band rule or a target.
    pub fn trend_and_rsi() -> Self {
        Self {
            bollinger_lower: false,
            include_target: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Unclamped sum, may fall below zero with custom rules.
    pub raw: i32,
    /// `min(raw, SCORE_CAP)`.
    pub capped: i32,
    pub contributions: Vec<ScoreContribution>,
}

/// Score a snapshot against the enabled rules.
pub fn score_snapshot(snapshot: &IndicatorSnapshot, rules: &ScoringRules) -> ScoreBreakdown {
    let mut contributions = Vec::new();

    if rules.trend && snapshot.current_price > snapshot.sma50 {
        contributions.push(ScoreContribution {
            rule: "trend".to_string(),
            points: TREND_POINTS,
            detail: format!(
                "price {:.2} above SMA50 {:.2}",
                snapshot.current_price, snapshot.sma50
            ),
        });
    }

    if rules.rsi_oversold && snapshot.rsi14 < rules.rsi_oversold_level {
        contributions.push(ScoreContribution {
            rule: "rsi_oversold".to_string(),
            points: RSI_OVERSOLD_POINTS,
            detail: format!("RSI oversold: {:.2}", snapshot.rsi14),
        });
    }

    if rules.bollinger_lower && snapshot.current_price < snapshot.lower_band {
        contributions.push(ScoreContribution {
            rule: "bollinger_lower".to_string(),
            points: BOLLINGER_LOWER_POINTS,
            detail: format!(
                "price {:.2} below lower band {:.2}",
                snapshot.current_price, snapshot.lower_band
            ),
        });
    }

    if rules.rsi_overbought && snapshot.rsi14 > rules.rsi_overbought_level {
        contributions.push(ScoreContribution {
            rule: "rsi_overbought".to_string(),
            points: RSI_OVERBOUGHT_POINTS,
            detail: format!("RSI overbought: {:.2}", snapshot.rsi14),
        });
    }

    let raw = BASE_SCORE + contributions.iter().map(|c| c.points).sum::<i32>();

    ScoreBreakdown {
        raw,
        capped: raw.min(SCORE_CAP),
        contributions,
    }
}
