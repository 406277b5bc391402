//! Quantboard API Server
//!
//! Serves the ranked signal table, per-symbol records and chart series over
//! HTTP, with scans memoized for the configured cache TTL.

use dotenvy::dotenv;
use quantboard::config::AppConfig;
use quantboard::core::http::start_server;
use quantboard::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(config.is_production());

    info!("Starting Quantboard API Server");
    info!(environment = %config.environment, "Environment");
    info!(
        port = config.port,
        universe_size = config.scan.universe.len(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "HTTP Server: http://0.0.0.0:{}",
        config.port
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        served = start_server(config) => {
            if let Err(e) = served {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    info!("API server stopped");
    Ok(())
}
