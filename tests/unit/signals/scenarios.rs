//! Scenario tests: realistic price shapes through the full evaluation path

use chrono::{Duration, NaiveDate};
use quantboard::models::indicators::{Candle, IndicatorParams, PriceSeries};
use quantboard::models::signal::{SignalLabel, SignalRecord};
use quantboard::signals::engine::SignalEngine;
use quantboard::signals::scoring::{ScoringRules, SCORE_CAP};

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(start + Duration::days(i as i64), c, c, c, c).with_volume(1e6))
        .collect();
    PriceSeries::new("SCN", candles)
}

fn run(closes: &[f64], rules: &ScoringRules) -> SignalRecord {
    SignalEngine::evaluate(
        "SCN",
        &series_from_closes(closes),
        rules,
        &IndicatorParams::default(),
    )
    .unwrap()
}

/// Flat tape followed by one sharp drop.
fn capitulation() -> Vec<f64> {
    let mut closes = vec![100.0; 59];
    closes.push(90.0);
    closes
}

/// Steady climb with a dip every other session.
fn pullback_uptrend() -> Vec<f64> {
    (0..60)
        .map(|i| 100.0 + 0.5 * i as f64 - if i % 2 == 1 { 2.0 } else { 0.0 })
        .collect()
}

/// Long plateau, collapse, then a relief rally that stays under the trend.
fn relief_rally() -> Vec<f64> {
    let mut closes = vec![200.0; 45];
    closes.extend((0..15).map(|i| 100.0 + i as f64));
    closes
}

#[test]
fn test_capitulation_is_strong_buy() {
    let record = run(&capitulation(), &ScoringRules::default());
    // oversold RSI +20, below lower band +15, under SMA50
    assert_eq!(record.confidence_score, 85);
    assert_eq!(record.signal, SignalLabel::StrongBuy);
    assert_eq!(record.price, 90.0);
    assert!((record.stop_loss - 85.5).abs() < 1e-9);
    assert!((record.target_profit.unwrap() - 103.5).abs() < 1e-9);
}

#[test]
fn test_capitulation_with_trend_and_rsi_only() {
    let record = run(&capitulation(), &ScoringRules::trend_and_rsi());
    assert_eq!(record.confidence_score, 70);
    assert_eq!(record.signal, SignalLabel::StrongBuy);
    assert!(record.target_profit.is_none());
}

#[test]
fn test_pullback_uptrend_is_buy() {
    let record = run(&pullback_uptrend(), &ScoringRules::default());
    // RSI settles at 62.5, only the trend rule fires
    assert_eq!(record.confidence_score, 65);
    assert_eq!(record.signal, SignalLabel::Buy);
    assert_eq!(record.price, 127.5);
}

#[test]
fn test_relief_rally_under_trend_is_sell() {
    let record = run(&relief_rally(), &ScoringRules::default());
    assert_eq!(record.confidence_score, 30);
    assert_eq!(record.signal, SignalLabel::Sell);
    let rules: Vec<&str> = record.contributions.iter().map(|c| c.rule.as_str()).collect();
    assert_eq!(rules, vec!["rsi_overbought"]);
}

#[test]
fn test_flat_tape_is_neutral() {
    let record = run(&[75.0; 60], &ScoringRules::default());
    assert_eq!(record.confidence_score, 50);
    assert_eq!(record.signal, SignalLabel::Neutral);
}

#[test]
fn test_scores_never_exceed_cap() {
    let shapes = [capitulation(), pullback_uptrend(), relief_rally(), vec![10.0; 60]];
    for closes in shapes {
        let record = run(&closes, &ScoringRules::default());
        assert!(record.confidence_score <= SCORE_CAP);
        assert!(record.stop_loss < record.price);
    }
}
