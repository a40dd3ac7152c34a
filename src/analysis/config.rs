//! Configuration for spot sweeps

use serde::{Deserialize, Serialize};

/// Spot grid used to build sensitivity curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of grid points (inclusive of both ends)
    /// Default: 100
    pub points: usize,

    /// Lowest spot as a multiple of the reference spot
    /// Default: 0.5
    pub lower_multiple: f64,

    /// Highest spot as a multiple of the reference spot
    /// Default: 1.5
    pub upper_multiple: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            points: 100,
            lower_multiple: 0.5,
            upper_multiple: 1.5,
        }
    }
}

impl SweepConfig {
    /// Dense grid over the same range
    pub fn fine() -> Self {
        Self {
            points: 500,
            ..Default::default()
        }
    }

    /// Small grid for terminal tables
    pub fn coarse() -> Self {
        Self {
            points: 11,
            ..Default::default()
        }
    }
}
