use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("{indicator} needs {required} observations, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    #[error("non-finite {indicator} value: {value}")]
    NonFinite { indicator: &'static str, value: f64 },
}
