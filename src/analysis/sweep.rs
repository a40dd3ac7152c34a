//! Spot sweeps
//!
//! Evaluates the engine across a grid of spot prices to build price and
//! Greek curves. Every point is a fresh, independent evaluation.

use serde::{Deserialize, Serialize};

use super::config::SweepConfig;
use crate::core::{EngineError, EngineResult, OptionParameters, OptionSide};
use crate::models::black_scholes;

/// Engine outputs at one spot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub spot: f64,
    pub call: f64,
    pub put: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
}

/// Price and Greek curves over a spot grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    /// Parameters at the reference spot
    pub base: OptionParameters,
    pub points: Vec<CurvePoint>,
}

impl SensitivityCurve {
    pub fn side(&self) -> OptionSide {
        self.base.side
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point whose spot is closest to `spot`
    pub fn nearest(&self, spot: f64) -> Option<&CurvePoint> {
        self.points
            .iter()
            .min_by(|a, b| (a.spot - spot).abs().total_cmp(&(b.spot - spot).abs()))
    }
}

/// Evenly spaced spots from `lower_multiple * spot` to `upper_multiple * spot`
pub fn spot_grid(spot: f64, config: &SweepConfig) -> EngineResult<Vec<f64>> {
    if config.points < 2 {
        return Err(EngineError::invalid_argument(format!(
            "sweep needs at least 2 points, got {}",
            config.points
        )));
    }

    let lower = spot * config.lower_multiple;
    let upper = spot * config.upper_multiple;
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(EngineError::invalid_argument(format!(
            "invalid sweep range [{}, {}] around spot {}",
            lower, upper, spot
        )));
    }

    let step = (upper - lower) / (config.points - 1) as f64;
    let mut grid: Vec<f64> = (0..config.points).map(|i| lower + step * i as f64).collect();
    // Pin the endpoint against accumulated rounding
    if let Some(last) = grid.last_mut() {
        *last = upper;
    }

    Ok(grid)
}

/// Evaluate a single point
pub fn evaluate(params: &OptionParameters) -> CurvePoint {
    let quote = black_scholes::price(params);
    CurvePoint {
        spot: params.spot,
        call: quote.call,
        put: quote.put,
        delta: black_scholes::delta(params, params.side),
        gamma: black_scholes::gamma(params),
        vega: black_scholes::vega(params),
        theta: black_scholes::theta(params, params.side),
    }
}

/// Sweep spot over the configured grid around `base.spot`
pub fn sweep(base: &OptionParameters, config: &SweepConfig) -> EngineResult<SensitivityCurve> {
    let grid = spot_grid(base.spot, config)?;
    tracing::debug!(
        "Sweeping {} spots from {:.2} to {:.2}",
        grid.len(),
        grid[0],
        grid[grid.len() - 1]
    );

    let points = grid
        .into_iter()
        .map(|spot| evaluate(&base.with_spot(spot)))
        .collect();

    Ok(SensitivityCurve {
        base: *base,
        points,
    })
}
