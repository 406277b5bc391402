//! Unit tests for rolling standard deviation and Bollinger Bands

use chrono::{Duration, NaiveDate};
use quantboard::indicators::volatility::{
    calculate_bollinger_bands, calculate_bollinger_bands_default, calculate_std_dev,
};
use quantboard::models::indicators::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(start + Duration::days(i as i64), c, c, c, c))
        .collect()
}

#[test]
fn test_std_dev_is_population() {
    let candles = candles_from_closes(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    let std = calculate_std_dev(&candles, 8).unwrap();
    assert_eq!(std.value, 2.0);
}

#[test]
fn test_std_dev_insufficient_data() {
    let candles = candles_from_closes(&[1.0; 19]);
    assert!(calculate_std_dev(&candles, 20).is_none());
}

#[test]
fn test_bollinger_bands_known_values() {
    let candles = candles_from_closes(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    let bands = calculate_bollinger_bands(&candles, 8, 2.0).unwrap();
    assert_eq!(bands.middle, 5.0);
    assert_eq!(bands.upper, 9.0);
    assert_eq!(bands.lower, 1.0);
    assert_eq!(bands.std_dev, 2.0);
}

#[test]
fn test_bollinger_bands_collapse_on_flat_prices() {
    let candles = candles_from_closes(&[42.0; 25]);
    let bands = calculate_bollinger_bands_default(&candles).unwrap();
    assert_eq!(bands.upper, 42.0);
    assert_eq!(bands.lower, 42.0);
    assert_eq!(bands.period, 20);
    assert_eq!(bands.k, 2.0);
}

#[test]
fn test_bollinger_bands_use_trailing_window() {
    let mut closes = vec![1000.0; 10];
    closes.extend(vec![10.0; 20]);
    let bands = calculate_bollinger_bands_default(&candles_from_closes(&closes)).unwrap();
    assert_eq!(bands.middle, 10.0);
    assert_eq!(bands.std_dev, 0.0);
}
