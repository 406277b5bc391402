use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete recommendation bucket derived from the capped confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
}

impl SignalLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "STRONG_BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::Neutral => "NEUTRAL",
            SignalLabel::Sell => "SELL",
        }
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A scoring rule that fired, with the points it added or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub rule: String,
    pub points: i32,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub price: f64,
    pub confidence_score: i32,
    pub raw_score: i32,
    pub signal: SignalLabel,
    pub stop_loss: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_profit: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contributions: Vec<ScoreContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

/// Ranked signal records for the whole universe at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub records: Vec<SignalRecord>,
    pub computed_at: DateTime<Utc>,
    pub universe_size: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<SkippedSymbol>,
}

impl ScanResult {
    /// Build a result, ordering records by confidence descending.
    ///
    /// Equal scores keep their incoming order, which the scanner guarantees
    /// to be universe order.
    pub fn new(
        mut records: Vec<SignalRecord>,
        skipped: Vec<SkippedSymbol>,
        universe_size: usize,
    ) -> Self {
        records.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));
        Self {
            records,
            computed_at: Utc::now(),
            universe_size,
            skipped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, symbol: &str) -> Option<&SignalRecord> {
        self.records
            .iter()
            .find(|r| r.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Records paired with their 1-based rank.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &SignalRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }
}
