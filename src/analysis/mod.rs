//! Sensitivity analysis
//!
//! Sweeps the engine across spot prices and exports the resulting curves.

pub mod config;
pub mod report;
pub mod sweep;

pub use config::*;
pub use sweep::*;
