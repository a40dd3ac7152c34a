//! Pricing Models
//!
//! Implements:
//! - Boundary policy (regime classification)
//! - Black-Scholes-Merton closed-form prices and Greeks

pub mod regime;
pub mod black_scholes;

pub use regime::*;
pub use black_scholes::*;
