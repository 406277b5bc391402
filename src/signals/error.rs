use std::time::Duration;

use thiserror::Error;

use crate::indicators::IndicatorError;
use crate::services::market_data::FetchError;

/// Why a symbol produced no record in a scan.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("history too short: {available} < {required}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("indicator undefined: {0}")]
    IndicatorUndefined(IndicatorError),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl DataUnavailable {
    /// Expected skips are routine (bad ticker, short history, slow provider).
    /// Anything else points at corrupt provider data and is logged louder.
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            DataUnavailable::InvalidData(_)
                | DataUnavailable::IndicatorUndefined(IndicatorError::NonFinite { .. })
                | DataUnavailable::FetchFailed(FetchError::Parse(_))
        )
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DataUnavailable::FetchFailed(_) => "fetch_failed",
            DataUnavailable::Timeout(_) => "timeout",
            DataUnavailable::InsufficientHistory { .. } => "insufficient_history",
            DataUnavailable::IndicatorUndefined(_) => "indicator_undefined",
            DataUnavailable::InvalidData(_) => "invalid_data",
        }
    }
}

impl From<IndicatorError> for DataUnavailable {
    fn from(err: IndicatorError) -> Self {
        DataUnavailable::IndicatorUndefined(err)
    }
}
