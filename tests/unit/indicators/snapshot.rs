//! Unit tests for indicator snapshots

use chrono::{Duration, NaiveDate};
use quantboard::indicators::{IndicatorError, IndicatorSnapshot};
use quantboard::models::indicators::{Candle, IndicatorParams, PriceSeries};

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(start + Duration::days(i as i64), c, c, c, c))
        .collect();
    PriceSeries::new("TEST", candles)
}

#[test]
fn test_snapshot_of_rising_series() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let snapshot =
        IndicatorSnapshot::compute(&series_from_closes(&closes), &IndicatorParams::default())
            .unwrap();

    assert_eq!(snapshot.current_price, 159.0);
    assert_eq!(snapshot.sma50, 134.5);
    assert_eq!(snapshot.sma20, 149.5);
    assert_eq!(snapshot.rsi14, 100.0);
    // population std of 20 consecutive integers = sqrt(399 / 12)
    assert!((snapshot.std_dev20 - (399.0_f64 / 12.0).sqrt()).abs() < 1e-9);
    assert!((snapshot.upper_band - (149.5 + 2.0 * snapshot.std_dev20)).abs() < 1e-9);
    assert!((snapshot.lower_band - (149.5 - 2.0 * snapshot.std_dev20)).abs() < 1e-9);
}

#[test]
fn test_snapshot_requires_trend_window() {
    let closes: Vec<f64> = (0..49).map(|i| 100.0 + i as f64).collect();
    let err = IndicatorSnapshot::compute(&series_from_closes(&closes), &IndicatorParams::default())
        .unwrap_err();
    assert_eq!(
        err,
        IndicatorError::InsufficientData {
            indicator: "sma",
            required: 50,
            available: 49,
        }
    );
}

#[test]
fn test_snapshot_reports_rsi_window_with_short_params() {
    let params = IndicatorParams {
        trend_sma_period: 5,
        rsi_period: 14,
        bollinger_period: 5,
        bollinger_k: 2.0,
    };
    let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let err = IndicatorSnapshot::compute(&series_from_closes(&closes), &params).unwrap_err();
    assert!(matches!(
        err,
        IndicatorError::InsufficientData {
            indicator: "rsi",
            required: 15,
            available: 10
        }
    ));
}

#[test]
fn test_snapshot_rejects_non_finite_close() {
    let mut closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    closes[30] = f64::NAN;
    let err = IndicatorSnapshot::compute(&series_from_closes(&closes), &IndicatorParams::default())
        .unwrap_err();
    assert!(matches!(err, IndicatorError::NonFinite { indicator: "close", .. }));
}

#[test]
fn test_snapshot_of_empty_series() {
    let err = IndicatorSnapshot::compute(&series_from_closes(&[]), &IndicatorParams::default())
        .unwrap_err();
    assert!(matches!(err, IndicatorError::InsufficientData { available: 0, .. }));
}
