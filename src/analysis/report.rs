//! Sensitivity curve output
//!
//! JSON export and a plain-text table for terminal display.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::sweep::SensitivityCurve;
use crate::core::EngineResult;

impl SensitivityCurve {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`
    pub fn write_json(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        tracing::info!("Wrote {} curve points to {:?}", self.len(), path);
        Ok(())
    }

    /// Read a curve previously written with [`SensitivityCurve::write_json`]
    pub fn read_json(path: impl AsRef<Path>) -> EngineResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Fixed-width table, one row per spot
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>10} {:>10} {:>10} {:>8} {:>9} {:>8} {:>9}",
            "Spot", "Call", "Put", "Delta", "Gamma", "Vega", "Theta"
        );
        let _ = writeln!(out, "{}", "-".repeat(70));

        for p in &self.points {
            let _ = writeln!(
                out,
                "{:>10.2} {:>10.4} {:>10.4} {:>8.4} {:>9.6} {:>8.4} {:>9.4}",
                p.spot, p.call, p.put, p.delta, p.gamma, p.vega, p.theta
            );
        }

        out
    }
}
