pub mod error;
pub mod snapshot;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use error::IndicatorError;
pub use snapshot::IndicatorSnapshot;
