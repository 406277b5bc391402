//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{
    BollingerBandsIndicator, Candle, IndicatorParams, PriceSeries, RsiIndicator, SmaIndicator,
    StdDevIndicator,
};
pub use signal::{ScanResult, ScoreContribution, SignalLabel, SignalRecord, SkippedSymbol};
