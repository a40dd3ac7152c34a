//! Core data types for the pricing engine
//!
//! Defines fundamental types:
//! - OptionParameters: spot, strike, expiry, rate, volatility, side
//! - PriceQuote: call and put theoretical prices
//! - Greeks: per-side sensitivities
//! - EngineError: error taxonomy

pub mod option;
pub mod quote;
pub mod greeks;
pub mod error;

pub use option::*;
pub use quote::*;
pub use greeks::*;
pub use error::*;
