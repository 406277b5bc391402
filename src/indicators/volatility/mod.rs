//! Volatility indicators: rolling standard deviation, Bollinger Bands

pub mod bollinger;
pub mod stddev;

pub use bollinger::*;
pub use stddev::*;
