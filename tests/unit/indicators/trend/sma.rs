//! Unit tests for SMA indicator

use chrono::{Duration, NaiveDate};
use quantboard::indicators::trend::{calculate_sma, calculate_smas, is_above_sma};
use quantboard::models::indicators::Candle;

fn create_test_candles(count: usize, base_price: f64, step: f64) -> Vec<Candle> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let price = base_price + i as f64 * step;
            Candle::new(start + Duration::days(i as i64), price, price + 0.5, price - 0.5, price)
        })
        .collect()
}

#[test]
fn test_sma_insufficient_data() {
    let candles = create_test_candles(10, 100.0, 1.0);
    assert!(calculate_sma(&candles, 20).is_none());
}

#[test]
fn test_sma_of_increasing_series_is_mean_of_last_window() {
    let candles = create_test_candles(60, 100.0, 1.0);
    let sma = calculate_sma(&candles, 50).unwrap();
    // closes 110..=159
    assert_eq!(sma.value, 134.5);
    assert_eq!(sma.period, 50);
}

#[test]
fn test_sma_full_history() {
    let candles = create_test_candles(5, 1.0, 1.0);
    assert_eq!(calculate_sma(&candles, 5).unwrap().value, 3.0);
}

#[test]
fn test_calculate_multiple_smas_skips_undefined() {
    let candles = create_test_candles(30, 100.0, 0.5);
    let smas = calculate_smas(&candles, &[20, 50]);
    assert_eq!(smas.len(), 1);
    assert_eq!(smas[0].period, 20);
}

#[test]
fn test_is_above_sma() {
    let rising = create_test_candles(60, 100.0, 1.0);
    assert_eq!(is_above_sma(&rising, 50), Some(true));

    let falling = create_test_candles(60, 200.0, -1.0);
    assert_eq!(is_above_sma(&falling, 50), Some(false));

    assert_eq!(is_above_sma(&rising[..10], 50), None);
}
