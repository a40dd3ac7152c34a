//! Local market snapshot caching
//!
//! Caches spot/volatility snapshots on disk to reduce API calls and allow
//! repeated runs offline.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::market::{DataOrigin, MarketDataSource, MarketSnapshot};
use crate::core::EngineResult;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_hours: 24,
            enabled: true,
        }
    }
}

/// Data cache manager
pub struct DataCache {
    config: CacheConfig,
}

impl DataCache {
    pub fn new(config: CacheConfig) -> EngineResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn cache_key(&self, ticker: &str) -> PathBuf {
        let safe: String = ticker
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.config.cache_dir.join(format!("{}_snapshot.json", safe))
    }

    /// Check if cache is valid (exists and not expired)
    pub fn is_valid(&self, ticker: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_key(ticker);
        if !path.exists() {
            return false;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let modified: DateTime<Utc> = modified.into();
                let age = Utc::now() - modified;
                return age < Duration::hours(self.config.max_age_hours);
            }
        }

        false
    }

    /// Save a snapshot to cache
    pub fn save_snapshot(&self, snapshot: &MarketSnapshot) -> EngineResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_key(&snapshot.ticker);
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;

        tracing::info!("Cached snapshot for {} at {:?}", snapshot.ticker, path);
        Ok(())
    }

    /// Load a snapshot from cache, marked as cached
    pub fn load_snapshot(&self, ticker: &str) -> EngineResult<Option<MarketSnapshot>> {
        if !self.is_valid(ticker) {
            return Ok(None);
        }

        let json = fs::read_to_string(self.cache_key(ticker))?;
        let mut snapshot: MarketSnapshot = serde_json::from_str(&json)?;
        snapshot.origin = DataOrigin::Cached;

        tracing::info!("Loaded snapshot for {} from cache", ticker);
        Ok(Some(snapshot))
    }

    /// Clear cache for a ticker
    pub fn clear(&self, ticker: &str) -> EngineResult<()> {
        let path = self.cache_key(ticker);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Clear all cache
    pub fn clear_all(&self) -> EngineResult<()> {
        if self.config.cache_dir.exists() {
            fs::remove_dir_all(&self.config.cache_dir)?;
            fs::create_dir_all(&self.config.cache_dir)?;
        }
        Ok(())
    }

    /// List cached tickers (as stored on disk)
    pub fn list_cached(&self) -> EngineResult<Vec<String>> {
        let mut tickers = Vec::new();

        if !self.config.cache_dir.exists() {
            return Ok(tickers);
        }

        for entry in fs::read_dir(&self.config.cache_dir)? {
            let file_name = entry?.file_name().to_string_lossy().to_string();

            if let Some(ticker) = file_name.strip_suffix("_snapshot.json") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}

/// Source wrapper that serves fresh cached snapshots before fetching
pub struct CachedSource<S> {
    cache: DataCache,
    inner: S,
}

impl<S: MarketDataSource> CachedSource<S> {
    pub fn new(inner: S, config: CacheConfig) -> EngineResult<Self> {
        Ok(Self {
            cache: DataCache::new(config)?,
            inner,
        })
    }

    /// Force refresh (bypass cache)
    pub fn refresh(&self, ticker: &str) -> EngineResult<MarketSnapshot> {
        self.cache.clear(ticker)?;
        self.spot_and_volatility(ticker)
    }
}

impl<S: MarketDataSource> MarketDataSource for CachedSource<S> {
    fn spot_and_volatility(&self, ticker: &str) -> EngineResult<MarketSnapshot> {
        if let Some(snapshot) = self.cache.load_snapshot(ticker)? {
            return Ok(snapshot);
        }

        tracing::info!("Fetching fresh data for {}", ticker);
        let snapshot = self.inner.spot_and_volatility(ticker)?;

        // A failed cache write should not lose a good fetch
        if let Err(e) = self.cache.save_snapshot(&snapshot) {
            tracing::warn!("Failed to cache snapshot for {}: {}", ticker, e);
        }

        Ok(snapshot)
    }

    fn risk_free_rate(&self) -> EngineResult<f64> {
        self.inner.risk_free_rate()
    }
}
