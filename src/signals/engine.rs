//! Per-symbol signal evaluation.

use crate::common::math::round2;
use crate::indicators::IndicatorSnapshot;
use crate::models::indicators::{IndicatorParams, PriceSeries};
use crate::models::signal::SignalRecord;
use crate::signals::decision::{classify, StopLossTakeProfit};
use crate::signals::error::DataUnavailable;
use crate::signals::scoring::{score_snapshot, ScoringRules};

pub const MIN_OBSERVATIONS: usize = 50;

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate one symbol's series into a signal record.
    pub fn evaluate(
        symbol: &str,
        series: &PriceSeries,
        rules: &ScoringRules,
        params: &IndicatorParams,
    ) -> Result<SignalRecord, DataUnavailable> {
        let (record, _) = Self::evaluate_with_snapshot(symbol, series, rules, params)?;
        Ok(record)
    }

    /// Evaluate and also return the indicator snapshot (for API responses/debugging)
    pub fn evaluate_with_snapshot(
        symbol: &str,
        series: &PriceSeries,
        rules: &ScoringRules,
        params: &IndicatorParams,
    ) -> Result<(SignalRecord, IndicatorSnapshot), DataUnavailable> {
        if series.len() < MIN_OBSERVATIONS {
            return Err(DataUnavailable::InsufficientHistory {
                required: MIN_OBSERVATIONS,
                available: series.len(),
            });
        }

        let snapshot = IndicatorSnapshot::compute(series, params)?;
        if let Some(bad) = series.candles().iter().find(|c| c.close <= 0.0) {
            return Err(DataUnavailable::InvalidData(format!(
                "non-positive close {} on {}",
                bad.close, bad.date
            )));
        }
        let price = snapshot.current_price;

        let score = score_snapshot(&snapshot, rules);
        let levels = StopLossTakeProfit::from_price(price, rules.include_target);

        let record = SignalRecord {
            symbol: symbol.to_string(),
            price: round2(price),
            confidence_score: score.capped,
            raw_score: score.raw,
            signal: classify(score.capped),
            stop_loss: levels.stop_loss,
            target_profit: levels.take_profit,
            contributions: score.contributions,
        };

        Ok((record, snapshot))
    }
}
