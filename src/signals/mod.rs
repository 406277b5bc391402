//! Signal scoring and evaluation.

pub mod decision;
pub mod engine;
pub mod error;
pub mod scoring;

pub use decision::*;
pub use engine::{SignalEngine, MIN_OBSERVATIONS};
pub use error::DataUnavailable;
pub use scoring::*;
