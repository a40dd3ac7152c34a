//! Option contract inputs
//!
//! European option parameters as consumed by the Black-Scholes engine.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Calendar days per year used for day/year conversions
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option side (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Intrinsic value of the payoff against a reference level
    pub fn intrinsic(&self, spot: f64, level: f64) -> f64 {
        match self {
            OptionSide::Call => (spot - level).max(0.0),
            OptionSide::Put => (level - spot).max(0.0),
        }
    }
}

impl FromStr for OptionSide {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            other => Err(EngineError::invalid_argument(format!(
                "unknown option side '{}', expected 'call' or 'put'",
                other
            ))),
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSide::Call => write!(f, "call"),
            OptionSide::Put => write!(f, "put"),
        }
    }
}

/// Inputs for a single European option evaluation.
///
/// Spot and strike are expected positive, but the engine accepts any finite
/// value and resolves non-positive prices through explicit degenerate
/// branches rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time: f64,
    /// Annualised continuously-compounded risk-free rate (r)
    pub rate: f64,
    /// Annualised volatility (sigma)
    pub volatility: f64,
    /// Call or put
    pub side: OptionSide,
}

impl OptionParameters {
    pub fn new(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        volatility: f64,
        side: OptionSide,
    ) -> Self {
        Self {
            spot,
            strike,
            time,
            rate,
            volatility,
            side,
        }
    }

    /// Construct after rejecting non-finite inputs.
    ///
    /// Finite but economically odd values (zero time, zero volatility,
    /// non-positive spot) are accepted; only NaN and infinities are refused.
    pub fn checked(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        volatility: f64,
        side: OptionSide,
    ) -> EngineResult<Self> {
        for (name, value) in [
            ("spot", spot),
            ("strike", strike),
            ("time", time),
            ("rate", rate),
            ("volatility", volatility),
        ] {
            if !value.is_finite() {
                return Err(EngineError::invalid_argument(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(Self::new(spot, strike, time, rate, volatility, side))
    }

    /// Same contract with a different spot
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    /// Same contract with a different side
    pub fn with_side(&self, side: OptionSide) -> Self {
        Self { side, ..*self }
    }

    /// Strike discounted to today: K * exp(-rT)
    pub fn discounted_strike(&self) -> f64 {
        self.strike * (-self.rate * self.time).exp()
    }
}

/// Year fraction between two dates on a 365-day calendar.
///
/// Negative when `expiry` precedes `from`, which the engine treats as expired.
pub fn years_between(from: NaiveDate, expiry: NaiveDate) -> f64 {
    (expiry - from).num_days() as f64 / DAYS_PER_YEAR
}
