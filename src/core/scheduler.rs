//! Cron-based scheduler that keeps the scan cache warm

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::ScanCache;
use crate::services::scanner::UniverseScanner;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,

    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },

    #[error("interval of {0}s cannot be expressed as a cron step")]
    UnsupportedInterval(u64),
}

/// Convert an interval to a six-field cron expression (with seconds).
///
/// Only steps that repeat evenly are accepted: seconds dividing a minute,
/// minutes dividing an hour, or hours dividing a day.
pub fn cron_expression(interval_seconds: u64) -> Result<String, SchedulerError> {
    let (minutes, hours) = (interval_seconds / 60, interval_seconds / 3600);
    match interval_seconds {
        0 => Err(SchedulerError::Disabled),
        s if s < 60 && 60 % s == 0 => Ok(format!("*/{} * * * * *", s)),
        s if s % 60 == 0 && minutes < 60 && 60 % minutes == 0 => {
            Ok(format!("0 */{} * * * *", minutes))
        }
        86_400 => Ok("0 0 0 * * *".to_string()),
        s if s % 3600 == 0 && hours < 24 && 24 % hours == 0 => {
            Ok(format!("0 0 */{} * * *", hours))
        }
        s => Err(SchedulerError::UnsupportedInterval(s)),
    }
}

/// Periodically forces a rescan so readers rarely wait on an expired cache
pub struct RefreshScheduler {
    scanner: Arc<UniverseScanner>,
    cache: Arc<ScanCache>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RefreshScheduler {
    pub fn new(
        scanner: Arc<UniverseScanner>,
        cache: Arc<ScanCache>,
        interval_seconds: u64,
    ) -> Result<Self, SchedulerError> {
        let cron_expr = cron_expression(interval_seconds)?;
        let schedule =
            Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
                expr: cron_expr.clone(),
                reason: e.to_string(),
            })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "RefreshScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            scanner,
            cache,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler, returning `false` if it is already running
    pub async fn start(&self) -> bool {
        let mut slot = self.handle.write().await;
        if slot.is_some() {
            warn!("RefreshScheduler: already running, ignoring start");
            return false;
        }

        let scanner = self.scanner.clone();
        let cache = self.cache.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("RefreshScheduler: started, waiting for cron schedule...");

            loop {
                let next_tick = schedule.upcoming(chrono::Utc).next();
                match next_tick {
                    Some(next_tick) => {
                        let now = chrono::Utc::now();
                        if next_tick > now {
                            let duration = (next_tick - now).to_std().unwrap_or_default();
                            tokio::time::sleep(duration).await;
                        }
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                let scanner = scanner.clone();
                let result = cache.refresh(|| async move { scanner.scan().await }).await;
                info!(
                    scored = result.len(),
                    skipped = result.skipped.len(),
                    "RefreshScheduler: cache refreshed"
                );
            }
        });

        *slot = Some(handle);
        info!("RefreshScheduler: started successfully");
        true
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("RefreshScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
