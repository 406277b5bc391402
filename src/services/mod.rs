//! Market data collaborators and the universe scanner.

pub mod market_data;
pub mod scanner;
pub mod yahoo;
