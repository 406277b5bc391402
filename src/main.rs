//! One-shot scan: score the configured universe and print the ranked table.

use dotenvy::dotenv;
use quantboard::config::AppConfig;
use quantboard::logging;
use quantboard::models::signal::{ScanResult, SignalRecord};
use quantboard::services::scanner::UniverseScanner;
use quantboard::services::yahoo::YahooMarketDataProvider;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(config.is_production());

    info!(
        universe_size = config.scan.universe.len(),
        period = %config.scan.period,
        "Starting one-shot scan"
    );

    let provider = Arc::new(YahooMarketDataProvider::new(config.yahoo_base_url.clone())?);
    let scanner = UniverseScanner::new(provider, config.scan.clone());
    let result = scanner.scan().await;

    print_table(&result);
    Ok(())
}

fn print_table(result: &ScanResult) {
    println!(
        "Signal board @ {} ({} of {} symbols scored)",
        result.computed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result.len(),
        result.universe_size
    );

    if result.is_empty() {
        println!("  no symbols scored");
        return;
    }

    println!(
        "{:>4}  {:<8} {:>10} {:>6}  {:<11} {:>10} {:>10}",
        "#", "Symbol", "Price", "Conf", "Signal", "Stop", "Target"
    );
    for (rank, record) in result.ranked() {
        print_row(rank, record);
    }
}

fn print_row(rank: usize, record: &SignalRecord) {
    let target = record
        .target_profit
        .map(|t| format!("{:.2}", t))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:>4}  {:<8} {:>10.2} {:>5}%  {:<11} {:>10.2} {:>10}",
        rank,
        record.symbol,
        record.price,
        record.confidence_score,
        record.signal,
        record.stop_loss,
        target
    );
}
