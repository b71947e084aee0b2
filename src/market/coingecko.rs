//! CoinGecko source
//!
//! Contract lookup on the Sei asset platform. A 404 is the normal case for
//! long-tail tokens and reports as "no listing", not as a failure.

use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::market::source::{LogoSource, MarketDataSource};
use crate::models::errors::{ScanError, ScanResult};
use crate::models::{LogoOrigin, LogoResult, MarketDataOrigin, MarketSnapshot};
use crate::utils::constants::{COINGECKO_API_BASE, COINGECKO_PLATFORM_SEI, USER_AGENT};

#[derive(Clone)]
pub struct CoinGeckoSource {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoSource {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_coin(&self, address: &str) -> ScanResult<Option<CoinResponse>> {
        let url = format!(
            "{}/coins/{}/contract/{}",
            self.base_url, COINGECKO_PLATFORM_SEI, address
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScanError::source_unavailable(format!("CoinGecko request failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("CoinGecko has no listing for {}", address);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ScanError::source_unavailable(format!(
                "CoinGecko returned {}",
                response.status()
            )));
        }

        let coin: CoinResponse = response
            .json()
            .await
            .map_err(|e| ScanError::source_unavailable(format!("CoinGecko bad payload: {e}")))?;
        Ok(Some(coin))
    }
}

impl MarketDataSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<MarketSnapshot>>> {
        Box::pin(async move {
            let Some(coin) = self.fetch_coin(address).await? else {
                return Ok(None);
            };
            let Some(market) = coin.market_data else {
                return Ok(None);
            };

            Ok(Some(MarketSnapshot {
                price: market.current_price.and_then(|p| p.usd),
                market_cap: market.market_cap.and_then(|m| m.usd),
                volume_24h: market.total_volume.and_then(|v| v.usd),
                price_change_24h: market.price_change_percentage_24h,
                source: MarketDataOrigin::CoinGecko,
            }))
        })
    }
}

impl LogoSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<LogoResult>>> {
        Box::pin(async move {
            let Some(coin) = self.fetch_coin(address).await? else {
                return Ok(None);
            };
            Ok(coin.image.and_then(|i| i.large).map(|url| LogoResult {
                url,
                source: LogoOrigin::CoinGecko,
                verified: true,
            }))
        })
    }
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    market_data: Option<MarketData>,
    image: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    current_price: Option<UsdValue>,
    market_cap: Option<UsdValue>,
    total_volume: Option<UsdValue>,
    price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct UsdValue {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ImageSet {
    large: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_response_parses() {
        let payload = r#"{
            "market_data": {
                "current_price": {"usd": 0.42},
                "market_cap": {"usd": 1000000.0},
                "total_volume": {"usd": 50000.0},
                "price_change_percentage_24h": -3.2
            },
            "image": {"large": "https://assets.coingecko.com/x/large/logo.png"}
        }"#;
        let coin: CoinResponse = serde_json::from_str(payload).unwrap();
        let market = coin.market_data.unwrap();
        assert_eq!(market.current_price.unwrap().usd, Some(0.42));
        assert_eq!(market.price_change_percentage_24h, Some(-3.2));
        assert!(coin.image.unwrap().large.unwrap().contains("large"));
    }

    #[test]
    fn test_sparse_response_parses() {
        let coin: CoinResponse = serde_json::from_str("{}").unwrap();
        assert!(coin.market_data.is_none());
        assert!(coin.image.is_none());
    }
}
