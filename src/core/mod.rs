//! Service surface: HTTP API and background refresh

pub mod http;
pub mod scheduler;

pub use http::*;
pub use scheduler::*;
