//! Yahoo Finance market data
//!
//! Spot price and one year of daily closes from the chart endpoint, and the
//! 13-week T-bill yield (^IRX) as the risk-free rate proxy.
//!
//! Note: Yahoo Finance data is delayed and intended for personal use.

use serde::Deserialize;

use super::market::{historical_volatility, DataOrigin, MarketDataSource, MarketSnapshot};
use crate::core::{EngineError, EngineResult};

/// Ticker of the 13-week Treasury bill yield index, quoted in percent
const RATE_TICKER: &str = "%5EIRX";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> EngineResult<Self> {
        Self::with_base_url("https://query1.finance.yahoo.com/v8/finance")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> EngineResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| EngineError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one year of daily chart data for a symbol
    fn get_chart(&self, symbol: &str) -> EngineResult<ChartData> {
        let url = format!("{}/chart/{}?range=1y&interval=1d", self.base_url, symbol);
        tracing::debug!("GET {}", url);

        let response: ChartResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| EngineError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| EngineError::Network(e.to_string()))?
            .json()
            .map_err(|e| EngineError::Data(format!("Failed to parse chart: {}", e)))?;

        response.into_chart_data(symbol)
    }
}

impl MarketDataSource for YahooClient {
    fn spot_and_volatility(&self, ticker: &str) -> EngineResult<MarketSnapshot> {
        let chart = self.get_chart(ticker)?;
        let volatility = historical_volatility(&chart.closes)?;

        tracing::info!(
            "Fetched {}: spot={:.2}, vol={:.4} from {} closes",
            ticker,
            chart.spot,
            volatility,
            chart.closes.len()
        );
        Ok(MarketSnapshot::new(ticker, chart.spot, volatility, DataOrigin::Live))
    }

    fn risk_free_rate(&self) -> EngineResult<f64> {
        let chart = self.get_chart(RATE_TICKER)?;
        Ok(chart.spot / 100.0)
    }
}

/// Spot and cleaned closes extracted from a chart response
#[derive(Debug, Clone, PartialEq)]
struct ChartData {
    spot: f64,
    closes: Vec<f64>,
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartSeries>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartSeries {
    meta: ChartMeta,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    close: Option<Vec<Option<f64>>>,
}

impl ChartResponse {
    fn into_chart_data(self, symbol: &str) -> EngineResult<ChartData> {
        if let Some(err) = self.chart.error {
            return Err(EngineError::Data(format!(
                "{} for {}: {}",
                err.code.unwrap_or_else(|| "error".into()),
                symbol,
                err.description.unwrap_or_default()
            )));
        }

        let series = self
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| EngineError::Data(format!("No chart data returned for {}", symbol)))?;

        let closes: Vec<f64> = series
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        // Prefer the live price, fall back to the last close
        let spot = series
            .meta
            .regular_market_price
            .or_else(|| closes.last().copied())
            .ok_or_else(|| EngineError::Data(format!("No price for {}", symbol)))?;

        Ok(ChartData { spot, closes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> EngineResult<ChartData> {
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        response.into_chart_data("TEST")
    }

    #[test]
    fn test_parse_chart() {
        let data = parse(
            r#"{"chart":{"result":[{"meta":{"regularMarketPrice":101.5},
                "indicators":{"quote":[{"close":[100.0,null,101.0,102.0]}]}}],"error":null}}"#,
        )
        .unwrap();
        assert_eq!(data.spot, 101.5);
        assert_eq!(data.closes, vec![100.0, 101.0, 102.0]);
    }

    #[test]
    fn test_parse_chart_spot_from_last_close() {
        let data = parse(
            r#"{"chart":{"result":[{"meta":{},
                "indicators":{"quote":[{"close":[4.9,5.1]}]}}],"error":null}}"#,
        )
        .unwrap();
        assert_eq!(data.spot, 5.1);
    }

    #[test]
    fn test_parse_chart_error() {
        let err = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Data(_)));
        assert!(err.to_string().contains("No data found"));
    }

    #[test]
    fn test_parse_chart_empty() {
        assert!(parse(r#"{"chart":{"result":[],"error":null}}"#).is_err());
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_spot_and_volatility() {
        let client = YahooClient::new().unwrap();
        let snapshot = client.spot_and_volatility("SPY").unwrap();

        assert!(snapshot.spot > 0.0);
        assert!(snapshot.volatility > 0.0);
        println!("SPY: {:?}", snapshot);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_risk_free_rate() {
        let client = YahooClient::new().unwrap();
        let rate = client.risk_free_rate().unwrap();

        assert!(rate > -0.05 && rate < 0.25);
        println!("Risk-free rate: {}", rate);
    }
}
