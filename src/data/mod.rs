//! Market data collaborators
//!
//! Handles:
//! - Source abstraction with fallback defaults
//! - Yahoo Finance spot, historical volatility and rate proxy
//! - Local snapshot caching

pub mod market;
pub mod yahoo;
pub mod cache;

pub use market::*;
pub use yahoo::*;
pub use cache::*;
