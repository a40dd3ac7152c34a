//! Crate-level configuration
//!
//! Bundles the market fallbacks, sweep grid and cache settings. Everything
//! here is passed explicitly to the pieces that need it; the pricing engine
//! itself takes no configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::SweepConfig;
use crate::core::EngineResult;
use crate::data::{CacheConfig, MarketDefaults};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fallback spot, volatility and rate
    pub market: MarketDefaults,
    /// Spot sweep grid
    pub sweep: SweepConfig,
    /// Snapshot cache
    pub cache: CacheConfig,
}

impl EngineConfig {
    /// Load from a JSON file; missing sections take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
