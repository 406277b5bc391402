//! Integration tests for the Yahoo chart client against a mocked server

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quantboard::services::market_data::{FetchError, Interval, MarketDataProvider, Period};
use quantboard::services::yahoo::YahooMarketDataProvider;

/// 2024-01-02 14:30 UTC, one bar per day after that.
const FIRST_BAR: i64 = 1_704_205_800;

fn chart_body(closes: &[Option<f64>]) -> Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| FIRST_BAR + i * 86_400)
        .collect();
    let filled: Vec<Option<f64>> = closes.iter().map(|c| c.map(|v| v + 0.5)).collect();
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "currency": "USD" },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": closes,
                        "high": filled,
                        "low": closes,
                        "close": closes,
                        "volume": closes.iter().map(|_| 1_000_000).collect::<Vec<_>>()
                    }]
                }
            }],
            "error": null
        }
    })
}

async fn provider_for(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::new(server.uri()).expect("build client")
}

#[tokio::test]
async fn fetches_and_parses_daily_chart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("range", "1y"))
        .and(query_param("interval", "1d"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chart_body(&[
                Some(185.0),
                Some(186.5),
                Some(184.25),
            ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let series = provider
        .fetch_series("AAPL", Period::OneYear, Interval::Daily)
        .await
        .expect("chart parsed");

    assert_eq!(series.symbol, "AAPL");
    assert_eq!(series.closes(), vec![185.0, 186.5, 184.25]);
    let first = &series.candles()[0];
    assert_eq!(first.date.to_string(), "2024-01-02");
    assert_eq!(first.high, 185.5);
    assert_eq!(first.volume, Some(1_000_000.0));
}

#[tokio::test]
async fn drops_bars_with_missing_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chart_body(&[
                Some(100.0),
                None,
                Some(102.0),
            ])),
        )
        .mount(&server)
        .await;

    let series = provider_for(&server)
        .await
        .fetch_series("AAPL", Period::SixMonths, Interval::Daily)
        .await
        .unwrap();
    assert_eq!(series.closes(), vec![100.0, 102.0]);
}

#[tokio::test]
async fn provider_error_payload_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .await
        .fetch_series("NOPE", Period::OneYear, Interval::Daily)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Provider(ref msg) if msg.contains("delisted")));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .await
        .fetch_series("GONE", Period::OneYear, Interval::Daily)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[Some(50.0)])))
        .expect(1)
        .mount(&server)
        .await;

    let series = provider_for(&server)
        .await
        .fetch_series("AAPL", Period::OneYear, Interval::Daily)
        .await
        .expect("second attempt succeeds");
    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn retries_can_be_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await.with_max_retries(0);
    let err = provider
        .fetch_series("AAPL", Period::OneYear, Interval::Daily)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .await
        .fetch_series("AAPL", Period::OneYear, Interval::Daily)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}
