//! Unit tests for logging initialization

use quantboard::config::AppConfig;
use quantboard::logging::init_logging;

#[test]
fn test_init_logging_is_idempotent() {
    let config = AppConfig::from_lookup(|_| None).unwrap();
    init_logging(config.is_production());
    init_logging(config.is_production());
    init_logging(true);
    tracing::info!("logging initialized");
}
