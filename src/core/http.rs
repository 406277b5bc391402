//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::cache::ScanCache;
use crate::config::AppConfig;
use crate::core::scheduler::RefreshScheduler;
use crate::metrics::Metrics;
use crate::models::indicators::PriceSeries;
use crate::models::signal::{ScanResult, SignalRecord};
use crate::services::scanner::{ChartError, UniverseScanner};
use crate::services::yahoo::YahooMarketDataProvider;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub scanner: Arc<UniverseScanner>,
    pub cache: Arc<ScanCache>,
}

impl AppState {
    /// Current scan result, recomputed when the cached one has expired.
    pub async fn signals(&self) -> Arc<ScanResult> {
        let scanner = self.scanner.clone();
        self.cache
            .get_or_refresh(|| async move { scanner.scan().await })
            .await
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let last_scan = state.cache.entry().await.map(|e| e.value.computed_at);
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "quantboard",
        "universe_size": state.scanner.universe().len(),
        "last_scan_at": last_scan,
        "cache_fresh": state.cache.is_fresh().await,
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct SignalsQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RankedRecord<'a> {
    rank: usize,
    #[serde(flatten)]
    record: &'a SignalRecord,
}

/// Ranked signal table, served from the cache
async fn list_signals(
    State(state): State<AppState>,
    Query(params): Query<SignalsQuery>,
) -> Json<Value> {
    let result = state.signals().await;
    let limit = params.limit.unwrap_or(usize::MAX);
    let records: Vec<RankedRecord<'_>> = result
        .ranked()
        .take(limit)
        .map(|(rank, record)| RankedRecord { rank, record })
        .collect();

    Json(json!({
        "computed_at": result.computed_at,
        "universe_size": result.universe_size,
        "count": result.len(),
        "records": records,
        "skipped": result.skipped,
    }))
}

/// One symbol's record from the current scan
async fn get_signal(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<SignalRecord>, (StatusCode, Json<Value>)> {
    let result = state.signals().await;
    if let Some(record) = result.get(&symbol) {
        return Ok(Json(record.clone()));
    }

    let reason = result
        .skipped
        .iter()
        .find(|s| s.symbol.eq_ignore_ascii_case(&symbol))
        .map(|s| s.reason.clone())
        .unwrap_or_else(|| "not in universe".to_string());

    Err((
        StatusCode::NOT_FOUND,
        Json(json!({ "symbol": symbol, "error": reason })),
    ))
}

/// Chart-period OHLC history for one universe symbol
async fn get_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceSeries>, (StatusCode, Json<Value>)> {
    match state.scanner.chart(&symbol).await {
        Ok(series) => Ok(Json(series)),
        Err(e @ ChartError::UnknownSymbol(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "symbol": symbol, "error": e.to_string() })),
        )),
        Err(e @ ChartError::Unavailable(_)) => {
            warn!(symbol = %symbol, error = %e, "Chart data unavailable");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "symbol": symbol, "error": e.to_string() })),
            ))
        }
    }
}

/// Force a rescan regardless of cache age
async fn refresh_signals(State(state): State<AppState>) -> Json<Value> {
    let scanner = state.scanner.clone();
    let result = state
        .cache
        .refresh(|| async move { scanner.scan().await })
        .await;

    Json(json!({
        "computed_at": result.computed_at,
        "count": result.len(),
        "skipped": result.skipped.len(),
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signals", get(list_signals))
        .route("/api/signals/{symbol}", get(get_signal))
        .route("/api/chart/{symbol}", get(get_chart))
        .route("/api/refresh", post(refresh_signals))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Wire the Yahoo provider, scanner and cache into an [`AppState`].
pub fn build_state(config: &AppConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(YahooMarketDataProvider::new(config.yahoo_base_url.clone())?);
    let scanner = UniverseScanner::new(provider, config.scan.clone()).with_metrics(metrics.clone());
    let cache = ScanCache::new(config.cache_ttl).with_metrics(metrics.clone());

    Ok(AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        scanner: Arc::new(scanner),
        cache: Arc::new(cache),
    })
}

pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config)?;

    let scheduler = if config.refresh_interval_seconds > 0 {
        let scheduler = RefreshScheduler::new(
            state.scanner.clone(),
            state.cache.clone(),
            config.refresh_interval_seconds,
        )?;
        scheduler.start().await;
        Some(scheduler)
    } else {
        info!("Background refresh disabled (REFRESH_INTERVAL_SECONDS=0)");
        None
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    let served = axum::serve(listener, app).await;

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    served?;

    Ok(())
}
