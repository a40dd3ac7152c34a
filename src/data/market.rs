//! Market inputs for the engine
//!
//! A [`MarketDataSource`] supplies spot, volatility and the risk-free rate.
//! [`MarketFeed`] turns any source failure into the configured fallback
//! values so the pricing core never sees a network or IO error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// Fallback market values used when a source fails
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketDefaults {
    /// Spot used when no price can be fetched
    pub spot: f64,
    /// Annualised volatility paired with the fallback spot
    pub volatility: f64,
    /// Decimal annual risk-free rate
    pub rate: f64,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            spot: 100.0,
            volatility: 0.20,
            rate: 0.03,
        }
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    Live,
    Cached,
    Fallback,
}

/// Spot and annualised volatility for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub ticker: String,
    pub spot: f64,
    pub volatility: f64,
    pub origin: DataOrigin,
    pub timestamp: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(ticker: impl Into<String>, spot: f64, volatility: f64, origin: DataOrigin) -> Self {
        Self {
            ticker: ticker.into(),
            spot,
            volatility,
            origin,
            timestamp: Utc::now(),
        }
    }

    /// Usable as engine input: finite positive spot, finite non-negative vol
    pub fn is_usable(&self) -> bool {
        self.spot.is_finite() && self.spot > 0.0 && self.volatility.is_finite() && self.volatility >= 0.0
    }
}

/// Provider of market inputs
pub trait MarketDataSource {
    /// Current spot and annualised historical volatility for a ticker
    fn spot_and_volatility(&self, ticker: &str) -> EngineResult<MarketSnapshot>;

    /// Decimal annual risk-free rate
    fn risk_free_rate(&self) -> EngineResult<f64>;
}

impl<S: MarketDataSource + ?Sized> MarketDataSource for &S {
    fn spot_and_volatility(&self, ticker: &str) -> EngineResult<MarketSnapshot> {
        (**self).spot_and_volatility(ticker)
    }

    fn risk_free_rate(&self) -> EngineResult<f64> {
        (**self).risk_free_rate()
    }
}

/// Annualised volatility from a series of closing prices.
///
/// Sample standard deviation of daily log returns scaled by √252.
pub fn historical_volatility(closes: &[f64]) -> EngineResult<f64> {
    const TRADING_DAYS: f64 = 252.0;

    let prices: Vec<f64> = closes
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    if prices.len() < 2 {
        return Err(EngineError::data(format!(
            "need at least 2 positive closes for volatility, got {}",
            prices.len()
        )));
    }

    let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;

    // A single return has no sample variance
    if returns.len() < 2 {
        return Ok(0.0);
    }

    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(variance.sqrt() * TRADING_DAYS.sqrt())
}

/// Market data with fallback to configured defaults
pub struct MarketFeed<S> {
    source: S,
    defaults: MarketDefaults,
}

impl<S: MarketDataSource> MarketFeed<S> {
    pub fn new(source: S, defaults: MarketDefaults) -> Self {
        Self { source, defaults }
    }

    pub fn defaults(&self) -> &MarketDefaults {
        &self.defaults
    }

    /// Spot and volatility, or the default pair if the source fails
    pub fn snapshot(&self, ticker: &str) -> MarketSnapshot {
        match self.source.spot_and_volatility(ticker) {
            Ok(snapshot) if snapshot.is_usable() => snapshot,
            Ok(snapshot) => {
                tracing::warn!(
                    "Unusable market data for {} (spot={}, vol={}), using defaults",
                    ticker,
                    snapshot.spot,
                    snapshot.volatility
                );
                self.fallback_snapshot(ticker)
            }
            Err(e) => {
                tracing::warn!("Market data for {} unavailable: {}, using defaults", ticker, e);
                self.fallback_snapshot(ticker)
            }
        }
    }

    /// Risk-free rate, or the default rate if the source fails
    pub fn rate(&self) -> f64 {
        match self.source.risk_free_rate() {
            Ok(rate) if rate.is_finite() => rate,
            Ok(rate) => {
                tracing::warn!("Non-finite risk-free rate {}, using default", rate);
                self.defaults.rate
            }
            Err(e) => {
                tracing::warn!("Risk-free rate unavailable: {}, using default", e);
                self.defaults.rate
            }
        }
    }

    fn fallback_snapshot(&self, ticker: &str) -> MarketSnapshot {
        MarketSnapshot::new(
            ticker,
            self.defaults.spot,
            self.defaults.volatility,
            DataOrigin::Fallback,
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    /// Source returning fixed values, or failing on demand
    pub(crate) struct StaticSource {
        pub spot: f64,
        pub volatility: f64,
        pub rate: f64,
        pub fail: bool,
        pub calls: Cell<usize>,
    }

    impl StaticSource {
        pub fn new(spot: f64, volatility: f64, rate: f64) -> Self {
            Self {
                spot,
                volatility,
                rate,
                fail: false,
                calls: Cell::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(0.0, 0.0, 0.0)
            }
        }
    }

    impl MarketDataSource for StaticSource {
        fn spot_and_volatility(&self, ticker: &str) -> EngineResult<MarketSnapshot> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(EngineError::network("connection refused"));
            }
            Ok(MarketSnapshot::new(ticker, self.spot, self.volatility, DataOrigin::Live))
        }

        fn risk_free_rate(&self) -> EngineResult<f64> {
            if self.fail {
                return Err(EngineError::network("connection refused"));
            }
            Ok(self.rate)
        }
    }

    #[test]
    fn test_live_values_pass_through() {
        let feed = MarketFeed::new(StaticSource::new(512.0, 0.18, 0.045), MarketDefaults::default());
        let snapshot = feed.snapshot("QQQ");
        assert_eq!(snapshot.spot, 512.0);
        assert_eq!(snapshot.volatility, 0.18);
        assert_eq!(snapshot.origin, DataOrigin::Live);
        assert_eq!(feed.rate(), 0.045);
    }

    #[test]
    fn test_failure_uses_defaults() {
        let feed = MarketFeed::new(StaticSource::failing(), MarketDefaults::default());
        let snapshot = feed.snapshot("NOPE");
        assert_eq!(snapshot.spot, 100.0);
        assert_eq!(snapshot.volatility, 0.20);
        assert_eq!(snapshot.origin, DataOrigin::Fallback);
        assert_eq!(snapshot.ticker, "NOPE");
        assert_eq!(feed.rate(), 0.03);
    }

    #[test]
    fn test_unusable_values_use_defaults() {
        let defaults = MarketDefaults {
            spot: 50.0,
            volatility: 0.3,
            rate: 0.01,
        };
        let feed = MarketFeed::new(StaticSource::new(f64::NAN, 0.2, f64::INFINITY), defaults);
        let snapshot = feed.snapshot("BAD");
        assert_eq!(snapshot.spot, 50.0);
        assert_eq!(snapshot.volatility, 0.3);
        assert_eq!(feed.rate(), 0.01);
    }

    #[test]
    fn test_negative_rate_is_accepted() {
        let feed = MarketFeed::new(StaticSource::new(100.0, 0.2, -0.005), MarketDefaults::default());
        assert_eq!(feed.rate(), -0.005);
    }

    #[test]
    fn test_historical_volatility() {
        // Constant growth has zero dispersion
        let steady: Vec<f64> = (0..10).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        assert!(historical_volatility(&steady).unwrap() < 1e-12);

        // Alternating ±1% log moves
        let mut closes = vec![100.0];
        for i in 0..20 {
            let step: f64 = if i % 2 == 0 { 0.01 } else { -0.01 };
            closes.push(closes[i] * step.exp());
        }
        let vol = historical_volatility(&closes).unwrap();
        let expected = (0.01_f64 * 0.01 * 20.0 / 19.0).sqrt() * 252.0_f64.sqrt();
        assert!((vol - expected).abs() < 1e-9);
    }

    #[test]
    fn test_historical_volatility_short_series() {
        assert!(historical_volatility(&[]).is_err());
        assert!(historical_volatility(&[100.0, f64::NAN, -1.0]).is_err());
        assert_eq!(historical_volatility(&[100.0, 101.0]).unwrap(), 0.0);
    }
}
