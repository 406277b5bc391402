//! Environment-driven configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::services::scanner::ScanConfig;
use crate::services::yahoo::DEFAULT_BASE_URL;
use crate::signals::ScoringRules;

/// Default universe: the S&P 100.
pub const SP100_TICKERS: [&str; 100] = [
    "AAPL", "MSFT", "AMZN", "NVDA", "GOOGL", "META", "TSLA", "BRK-B", "UNH", "LLY",
    "JPM", "XOM", "V", "MA", "AVGO", "HD", "PG", "COST", "JNJ", "ABBV",
    "CRM", "WMT", "BAC", "CVX", "MRK", "NFLX", "ADBE", "AMD", "PEP", "KO",
    "TMO", "WFC", "DIS", "CSCO", "ACN", "ABT", "ORCL", "LIN", "MCD", "INTC",
    "INTU", "VZ", "CMCSA", "AMGN", "PFE", "IBM", "TXN", "PM", "MS", "UNP",
    "HON", "RTX", "GS", "LOW", "CAT", "AXP", "QCOM", "GE", "SPGI", "BLK",
    "DE", "SYK", "AMAT", "PLD", "BA", "ISRG", "MDLZ", "TJX", "T", "GILD",
    "LRCX", "VRTX", "BKNG", "ETN", "REGN", "C", "MMC", "ADP", "CI", "ADI",
    "BSX", "ZTS", "MDT", "MU", "SCHW", "CVS", "WM", "LMT", "PANW", "FI",
    "NOW", "SNPS", "CDNS", "ELV", "CB", "TGT", "MO", "DHR", "ICE", "PGR",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    pub scan: ScanConfig,
    pub cache_ttl: Duration,
    /// Background refresh cadence; zero disables the scheduler.
    pub refresh_interval_seconds: u64,
    pub yahoo_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "sandbox".to_string())
            .to_lowercase();

        let universe: Vec<String> = match lookup("SCAN_UNIVERSE") {
            Some(list) if !list.trim().is_empty() => {
                list.split(',').map(|s| s.to_string()).collect()
            }
            _ => SP100_TICKERS.iter().map(|s| s.to_string()).collect(),
        };

        let rules = ScoringRules {
            trend: parse_or(&lookup, "RULE_TREND", true)?,
            rsi_oversold: parse_or(&lookup, "RULE_RSI_OVERSOLD", true)?,
            rsi_overbought: parse_or(&lookup, "RULE_RSI_OVERBOUGHT", true)?,
            bollinger_lower: parse_or(&lookup, "RULE_BOLLINGER_LOWER", true)?,
            include_target: parse_or(&lookup, "RULE_TARGET_PROFIT", true)?,
            ..ScoringRules::default()
        };

        let concurrency: usize = parse_or(&lookup, "SCAN_CONCURRENCY", 8)?;
        if concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "SCAN_CONCURRENCY",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let scan = ScanConfig {
            period: parse_or(&lookup, "SCAN_PERIOD", ScanConfig::default().period)?,
            interval: parse_or(&lookup, "SCAN_INTERVAL", ScanConfig::default().interval)?,
            chart_period: parse_or(&lookup, "CHART_PERIOD", ScanConfig::default().chart_period)?,
            fetch_timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECONDS", 10)?),
            concurrency,
            rules,
            ..ScanConfig::default()
        }
        .with_universe(universe);

        Ok(Self {
            environment,
            port: parse_or(&lookup, "PORT", 8080)?,
            scan,
            cache_ttl: Duration::from_secs(parse_or(&lookup, "CACHE_TTL_SECONDS", 3600)?),
            refresh_interval_seconds: parse_or(&lookup, "REFRESH_INTERVAL_SECONDS", 0)?,
            yahoo_base_url: lookup("YAHOO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
