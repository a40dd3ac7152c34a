//! Boundary policy
//!
//! Every calculator first classifies (T, σ) into one regime and only then
//! picks a formula family. Expiry is checked before volatility, so an
//! expired option with zero volatility is still `Expired`.

use serde::{Deserialize, Serialize};

use crate::core::OptionParameters;

/// Formula family applicable to an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// T <= 0: price is intrinsic value, Greeks are step functions of moneyness
    Expired,
    /// T > 0, σ <= 0: terminal spot is deterministic, compare against K·e^(-rT)
    ZeroVolatility,
    /// T > 0, σ > 0: full lognormal closed form
    Standard,
}

impl Regime {
    /// Classify a (time, volatility) pair.
    ///
    /// NaN fails both comparisons and lands in `Standard`, where the
    /// formulas propagate it.
    pub fn classify(time: f64, volatility: f64) -> Self {
        if time <= 0.0 {
            Regime::Expired
        } else if volatility <= 0.0 {
            Regime::ZeroVolatility
        } else {
            Regime::Standard
        }
    }

    pub fn of(params: &OptionParameters) -> Self {
        Self::classify(params.time, params.volatility)
    }

    /// Whether the smooth lognormal formulas apply
    pub fn is_standard(&self) -> bool {
        matches!(self, Regime::Standard)
    }
}
