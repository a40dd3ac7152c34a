//! Black-Scholes-Merton Model
//!
//! Provides:
//! - European option pricing (call and put together)
//! - Delta, Gamma, Vega and Theta, each computed independently
//!
//! Every operation consults the boundary policy in [`super::regime`] before
//! touching a logarithm or square root. Degenerate inputs (expired, zero
//! volatility, non-positive prices) resolve to documented limits instead of
//! errors or NaN.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use super::regime::Regime;
use crate::core::{Greeks, OptionParameters, OptionSide, PriceQuote, DAYS_PER_YEAR};

/// Vega is quoted per volatility point
const VEGA_POINT: f64 = 0.01;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standardised moneyness terms d1 and d2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneynessTerms {
    pub d1: f64,
    pub d2: f64,
}

impl MoneynessTerms {
    /// Compute d1/d2, or `None` outside the standard regime, when ln(S/K)
    /// is undefined (S <= 0 or K <= 0), or when σ√T is too small to divide
    /// by (zero or subnormal after underflow).
    pub fn compute(params: &OptionParameters) -> Option<Self> {
        if !Regime::of(params).is_standard() || params.spot <= 0.0 || params.strike <= 0.0 {
            return None;
        }

        let vol_sqrt_t = params.volatility * params.time.sqrt();
        if !vol_sqrt_t.is_normal() {
            return None;
        }

        let d1 = ((params.spot / params.strike).ln()
            + (params.rate + 0.5 * params.volatility * params.volatility) * params.time)
            / vol_sqrt_t;
        if !d1.is_finite() {
            return None;
        }

        Some(Self {
            d1,
            d2: d1 - vol_sqrt_t,
        })
    }
}

/// Live option whose spot or strike rules out ln(S/K)
fn has_non_positive_price(params: &OptionParameters) -> bool {
    params.spot <= 0.0 || params.strike <= 0.0
}

/// Call and put prices discounted at the forward threshold K·e^(-rT).
///
/// Shared by the zero-volatility regime, the vanishing σ√T limit and the
/// non-positive price branch.
fn forward_intrinsic(params: &OptionParameters) -> PriceQuote {
    let forward = params.discounted_strike();
    PriceQuote::new(
        OptionSide::Call.intrinsic(params.spot, forward),
        OptionSide::Put.intrinsic(params.spot, forward),
    )
}

/// Black-Scholes European option prices
pub fn price(params: &OptionParameters) -> PriceQuote {
    let (spot, strike) = (params.spot, params.strike);

    match Regime::of(params) {
        Regime::Expired => PriceQuote::new(
            OptionSide::Call.intrinsic(spot, strike),
            OptionSide::Put.intrinsic(spot, strike),
        ),
        Regime::ZeroVolatility => forward_intrinsic(params),
        Regime::Standard => match MoneynessTerms::compute(params) {
            Some(m) => {
                let discounted = params.discounted_strike();
                // Floor at zero: deep out of the money both terms can be
                // subnormal and their difference rounds below zero
                PriceQuote::new(
                    (spot * norm_cdf(m.d1) - discounted * norm_cdf(m.d2)).max(0.0),
                    (discounted * norm_cdf(-m.d2) - spot * norm_cdf(-m.d1)).max(0.0),
                )
            }
            // ln(S/K) undefined or σ√T vanished: take the σ -> 0 limit
            None => forward_intrinsic(params),
        },
    }
}

/// Delta of an expired option.
///
/// At the money the exercise decision is ambiguous and counts as a 50%
/// exercise probability.
fn expired_delta(spot: f64, strike: f64, side: OptionSide) -> f64 {
    match side {
        OptionSide::Call => {
            if spot > strike {
                1.0
            } else if spot == strike {
                0.5
            } else {
                0.0
            }
        }
        OptionSide::Put => {
            if spot < strike {
                -1.0
            } else if spot == strike {
                -0.5
            } else {
                0.0
            }
        }
    }
}

/// Delta once the terminal spot is deterministic: a step at K·e^(-rT)
fn zero_vol_delta(params: &OptionParameters, side: OptionSide) -> f64 {
    let forward = params.discounted_strike();
    match side {
        OptionSide::Call => {
            if params.spot >= forward {
                1.0
            } else {
                0.0
            }
        }
        OptionSide::Put => {
            if params.spot <= forward {
                -1.0
            } else {
                0.0
            }
        }
    }
}

/// Delta for a live option whose spot or strike is non-positive.
///
/// S <= 0 is infinitely out of the money for a call; K <= 0 < S is
/// infinitely in the money.
fn non_positive_price_delta(spot: f64, side: OptionSide) -> f64 {
    match (side, spot <= 0.0) {
        (OptionSide::Call, true) => 0.0,
        (OptionSide::Put, true) => -1.0,
        (OptionSide::Call, false) => 1.0,
        (OptionSide::Put, false) => 0.0,
    }
}

/// Delta: dV/dS
pub fn delta(params: &OptionParameters, side: OptionSide) -> f64 {
    match Regime::of(params) {
        Regime::Expired => expired_delta(params.spot, params.strike, side),
        Regime::ZeroVolatility => zero_vol_delta(params, side),
        Regime::Standard => match MoneynessTerms::compute(params) {
            Some(m) => match side {
                OptionSide::Call => norm_cdf(m.d1),
                OptionSide::Put => norm_cdf(m.d1) - 1.0,
            },
            None if has_non_positive_price(params) => non_positive_price_delta(params.spot, side),
            None => zero_vol_delta(params, side),
        },
    }
}

/// Gamma: d²V/dS², identical for calls and puts
pub fn gamma(params: &OptionParameters) -> f64 {
    if !Regime::of(params).is_standard() {
        return 0.0;
    }
    // S <= 0 would divide by zero below
    if params.spot <= 0.0 {
        return 0.0;
    }

    let Some(m) = MoneynessTerms::compute(params) else {
        return 0.0;
    };
    let denominator = params.spot * params.volatility * params.time.sqrt();
    if !denominator.is_normal() {
        return 0.0;
    }
    norm_pdf(m.d1) / denominator
}

/// Vega per one volatility point, identical for calls and puts
pub fn vega(params: &OptionParameters) -> f64 {
    if !Regime::of(params).is_standard() || params.spot <= 0.0 {
        return 0.0;
    }

    match MoneynessTerms::compute(params) {
        Some(m) => params.spot * norm_pdf(m.d1) * params.time.sqrt() * VEGA_POINT,
        None => 0.0,
    }
}

/// Yearly theta with a deterministic terminal spot
fn zero_vol_theta(params: &OptionParameters, side: OptionSide) -> f64 {
    let forward = params.discounted_strike();
    let in_the_money = match side {
        OptionSide::Call => params.spot >= forward,
        OptionSide::Put => params.spot <= forward,
    };
    if in_the_money {
        -params.rate * forward
    } else {
        0.0
    }
}

/// Theta per calendar day
pub fn theta(params: &OptionParameters, side: OptionSide) -> f64 {
    let yearly = match Regime::of(params) {
        Regime::Expired => return 0.0,
        Regime::ZeroVolatility => zero_vol_theta(params, side),
        Regime::Standard => {
            if params.spot <= 0.0 {
                return 0.0;
            }
            let Some(m) = MoneynessTerms::compute(params) else {
                if has_non_positive_price(params) {
                    return 0.0;
                }
                return zero_vol_theta(params, side) / DAYS_PER_YEAR;
            };

            let sqrt_t = params.time.sqrt();
            let discounted = params.discounted_strike();
            let term1 = -(params.spot * norm_pdf(m.d1) * params.volatility) / (2.0 * sqrt_t);
            let term2 = match side {
                OptionSide::Call => -params.rate * discounted * norm_cdf(m.d2),
                OptionSide::Put => params.rate * discounted * norm_cdf(-m.d2),
            };
            term1 + term2
        }
    };

    yearly / DAYS_PER_YEAR
}

/// All Greeks for the side carried by `params`.
///
/// Each figure comes from its own calculator; none is derived from another.
pub fn greeks(params: &OptionParameters) -> Greeks {
    Greeks::new(
        delta(params, params.side),
        gamma(params),
        vega(params),
        theta(params, params.side),
    )
}
