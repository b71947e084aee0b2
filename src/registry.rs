//! Token registry
//!
//! Two concerns behind one trait: "is this token curated/verified" and
//! "what does the holder distribution look like". The default implementation
//! answers verification from the static curated list and holder data from an
//! optional external indexer. No indexer configured means holder data is
//! honestly absent, which the holders check reports as UNKNOWN.

use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::ScannerConfig;
use crate::utils::constants::{find_verified_token, USER_AGENT};

/// Curated info about a known token.
#[derive(Debug, Clone)]
pub struct RegistryTokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub logo_url: String,
    pub coingecko_id: String,
}

/// Holder distribution snapshot from an indexer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderDistribution {
    pub holder_count: u64,
    /// Largest non-contract holder's share of total supply, in percent
    pub top_holder_percent: f64,
}

/// Registry seam. Checks depend on this trait so tests can substitute a
/// scripted implementation.
pub trait TokenRegistry: Send + Sync {
    /// Curated token info, `None` when the address is not on the list.
    fn token_info(&self, address: &str) -> Option<RegistryTokenInfo>;

    /// Holder distribution, `None` when no indexer can answer.
    fn holder_distribution<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Option<HolderDistribution>>;
}

/// Default registry: static curated list plus an optional holder indexer.
pub struct SeiTokenRegistry {
    client: reqwest::Client,
    indexer_url: Option<String>,
    timeout: Duration,
}

impl SeiTokenRegistry {
    pub fn new(config: &ScannerConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            indexer_url: config.indexer_url.clone(),
            timeout: config.source_timeout,
        }
    }

    async fn fetch_holders(&self, address: &str) -> Option<HolderDistribution> {
        let base = self.indexer_url.as_deref()?;
        let url = format!("{}/tokens/{}/holders", base.trim_end_matches('/'), address);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!("Holder indexer returned {} for {}", response.status(), address);
            return None;
        }
        response.json::<HolderDistribution>().await.ok()
    }
}

impl TokenRegistry for SeiTokenRegistry {
    fn token_info(&self, address: &str) -> Option<RegistryTokenInfo> {
        find_verified_token(address).map(|t| RegistryTokenInfo {
            name: t.name.to_string(),
            symbol: t.symbol.to_string(),
            decimals: t.decimals,
            logo_url: t.logo_url.to_string(),
            coingecko_id: t.coingecko_id.to_string(),
        })
    }

    fn holder_distribution<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Option<HolderDistribution>> {
        Box::pin(self.fetch_holders(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_lookup() {
        let registry = SeiTokenRegistry::new(&ScannerConfig::default());
        let wsei = registry
            .token_info("0xe30fedd158a2e3b13e9badaeabafc5516e95e8c7")
            .expect("WSEI is curated");
        assert_eq!(wsei.symbol, "WSEI");
        assert!(registry
            .token_info("0x0000000000000000000000000000000000000001")
            .is_none());
    }

    #[tokio::test]
    async fn test_no_indexer_means_no_holder_data() {
        let config = ScannerConfig {
            indexer_url: None,
            ..ScannerConfig::default()
        };
        let registry = SeiTokenRegistry::new(&config);
        assert!(registry.holder_distribution("0x1234").await.is_none());
    }
}
