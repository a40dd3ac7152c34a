//! # BSM Greeks - Closed-Form European Option Pricing
//!
//! Black-Scholes-Merton theoretical prices and Greeks with numerically
//! well-defined behaviour at the model's degenerate boundaries.
//!
//! ## Overview
//!
//! Each evaluation first classifies the inputs into a [`Regime`]:
//! - **Expired** (`T <= 0`): intrinsic value, step-function Greeks
//! - **Zero volatility** (`σ <= 0`): deterministic terminal spot, compared
//!   against the discounted strike `K·e^(-rT)`
//! - **Standard**: the lognormal closed form
//!
//! Pricing, Delta, Gamma, Vega and Theta are independent pure functions;
//! none calls another, and none ever panics or returns NaN for finite input.
//!
//! ## Usage
//!
//! ```rust
//! use bsm_greeks::prelude::*;
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.03, 0.20, OptionSide::Call);
//!
//! let quote = bs_price(&params);
//! let parity = quote.call - quote.put - (100.0 - 100.0 * (-0.03_f64).exp());
//! assert!(parity.abs() < 1e-9);
//!
//! let call_delta = bs_delta(&params, OptionSide::Call);
//! let put_delta = bs_delta(&params, OptionSide::Put);
//! assert_eq!(call_delta - put_delta, 1.0);
//!
//! // Expired at the money: intrinsic is zero, delta is the 50% convention
//! let expired = OptionParameters { time: 0.0, ..params };
//! assert_eq!(bs_price(&expired).call, 0.0);
//! assert_eq!(bs_delta(&expired, OptionSide::Call), 0.5);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - American or exotic exercise
//! - Implied volatility inversion
//! - PDE/tree pricing or volatility surface calibration
//! - Rendering curves to images

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        years_between, EngineError, EngineResult, Greeks, OptionParameters, OptionSide,
        PriceQuote, DAYS_PER_YEAR,
    };

    // Engine
    pub use crate::models::{
        delta as bs_delta, gamma as bs_gamma, greeks as bs_greeks, norm_cdf, norm_pdf,
        price as bs_price, theta as bs_theta, vega as bs_vega, MoneynessTerms, Regime,
    };

    // Sensitivity analysis
    pub use crate::analysis::{spot_grid, sweep, CurvePoint, SensitivityCurve, SweepConfig};

    // Market data
    pub use crate::data::{
        historical_volatility, CacheConfig, CachedSource, DataCache, DataOrigin,
        MarketDataSource, MarketDefaults, MarketFeed, MarketSnapshot, YahooClient,
    };

    pub use crate::config::EngineConfig;
}

// Re-export main types at crate root
pub use crate::core::{EngineError, EngineResult, OptionParameters, OptionSide, PriceQuote};
pub use crate::models::Regime;
