//! DexScreener source
//!
//! Token endpoint returns every pair the token trades in; the snapshot comes
//! from the deepest pool by USD liquidity. Also doubles as a logo source via
//! the pair's `info.imageUrl`.

use futures_util::future::BoxFuture;
use serde::Deserialize;
use tracing::debug;

use crate::market::source::{LogoSource, MarketDataSource};
use crate::models::errors::{ScanError, ScanResult};
use crate::models::{LogoOrigin, LogoResult, MarketDataOrigin, MarketSnapshot};
use crate::utils::constants::{DEXSCREENER_API_BASE, USER_AGENT};

#[derive(Clone)]
pub struct DexScreenerSource {
    client: reqwest::Client,
    base_url: String,
}

impl DexScreenerSource {
    pub fn new() -> Self {
        Self::with_base_url(DEXSCREENER_API_BASE)
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

    /// Best pair for the token, by USD liquidity. `None` when unlisted.
    async fn best_pair(&self, address: &str) -> ScanResult<Option<DexPair>> {
        let url = format!("{}/tokens/{}", self.base_url, address);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ScanError::source_unavailable(format!("DexScreener request failed: {e}"))
        })?;
        if !response.status().is_success() {
            return Err(ScanError::source_unavailable(format!(
                "DexScreener returned {}",
                response.status()
            )));
        }

        let body: DexScreenerResponse = response
            .json()
            .await
            .map_err(|e| ScanError::source_unavailable(format!("DexScreener bad payload: {e}")))?;

        let mut pairs = body.pairs.unwrap_or_default();
        if pairs.is_empty() {
            debug!("DexScreener has no pairs for {}", address);
            return Ok(None);
        }

        pairs.sort_by(|a, b| {
            let liq_a = a.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0);
            let liq_b = b.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0);
            liq_b.partial_cmp(&liq_a).unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(pairs.into_iter().next())
    }
}

impl MarketDataSource for DexScreenerSource {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<MarketSnapshot>>> {
        Box::pin(async move {
            let Some(pair) = self.best_pair(address).await? else {
                return Ok(None);
            };

            Ok(Some(MarketSnapshot {
                price: pair.price_usd.as_deref().and_then(|p| p.parse().ok()),
                market_cap: pair.market_cap.or(pair.fdv),
                volume_24h: pair.volume.as_ref().and_then(|v| v.h24),
                price_change_24h: pair.price_change.as_ref().and_then(|c| c.h24),
                source: MarketDataOrigin::DexScreener,
            }))
        })
    }
}

impl LogoSource for DexScreenerSource {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<LogoResult>>> {
        Box::pin(async move {
            let Some(pair) = self.best_pair(address).await? else {
                return Ok(None);
            };
            Ok(pair.info.and_then(|i| i.image_url).map(|url| LogoResult {
                url,
                source: LogoOrigin::DexScreener,
                verified: false,
            }))
        })
    }
}

#[derive(Debug, Deserialize)]
struct DexScreenerResponse {
    pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    price_usd: Option<String>,
    volume: Option<VolumeStats>,
    liquidity: Option<LiquidityStats>,
    price_change: Option<PriceChangeStats>,
    market_cap: Option<f64>,
    fdv: Option<f64>,
    info: Option<PairInfo>,
}

#[derive(Debug, Deserialize)]
struct VolumeStats {
    h24: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LiquidityStats {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PriceChangeStats {
    h24: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairInfo {
    image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parses_camel_case() {
        let payload = r#"{
            "pairs": [{
                "priceUsd": "0.0042",
                "volume": {"h24": 12345.6},
                "liquidity": {"usd": 98765.4},
                "priceChange": {"h24": 5.5},
                "marketCap": 420000.0,
                "info": {"imageUrl": "https://dd.dexscreener.com/x/logo.png"}
            }]
        }"#;
        let body: DexScreenerResponse = serde_json::from_str(payload).unwrap();
        let pair = &body.pairs.unwrap()[0];
        assert_eq!(pair.price_usd.as_deref(), Some("0.0042"));
        assert_eq!(pair.liquidity.as_ref().unwrap().usd, Some(98765.4));
        assert_eq!(pair.price_change.as_ref().unwrap().h24, Some(5.5));
    }

    #[test]
    fn test_unlisted_token_parses() {
        let body: DexScreenerResponse = serde_json::from_str(r#"{"pairs": null}"#).unwrap();
        assert!(body.pairs.is_none());
    }
}
