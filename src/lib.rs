//! Technical-analysis signal board for a fixed equity universe.
//!
//! Price series flow through the indicator library and the scoring engine,
//! the universe scanner ranks the resulting records, and the scan cache
//! memoizes the ranked result for a validity window.

pub mod cache;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
