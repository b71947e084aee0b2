//! External data aggregator
//!
//! Walks each fallback chain in order with a per-source timeout. Market data
//! ends in an honest empty snapshot; logos end in the generated placeholder.
//! Neither path can fail the scan.

use std::time::Duration;
use tracing::{debug, warn};

use crate::market::coingecko::CoinGeckoSource;
use crate::market::dexscreener::DexScreenerSource;
use crate::market::logo::{self, TrustWalletSource};
use crate::market::source::{LogoSource, MarketDataSource};
use crate::models::{LogoResult, MarketSnapshot, ScannerConfig};

pub struct ExternalDataAggregator {
    market_sources: Vec<Box<dyn MarketDataSource>>,
    logo_sources: Vec<Box<dyn LogoSource>>,
    source_timeout: Duration,
}

impl ExternalDataAggregator {
    /// Production chains: CoinGecko first (curated), then DexScreener for
    /// market data; CoinGecko, Trust Wallet, DexScreener for logos.
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            market_sources: vec![
                Box::new(CoinGeckoSource::new()),
                Box::new(DexScreenerSource::new()),
            ],
            logo_sources: vec![
                Box::new(CoinGeckoSource::new()),
                Box::new(TrustWalletSource::new()),
                Box::new(DexScreenerSource::new()),
            ],
            source_timeout: config.source_timeout,
        }
    }

    /// Custom chains, used by tests to script source behavior.
    pub fn with_sources(
        market_sources: Vec<Box<dyn MarketDataSource>>,
        logo_sources: Vec<Box<dyn LogoSource>>,
        source_timeout: Duration,
    ) -> Self {
        Self {
            market_sources,
            logo_sources,
            source_timeout,
        }
    }

    /// First source that yields a snapshot wins; all empty or failing means
    /// an explicit `none` snapshot.
    pub async fn market_snapshot(&self, address: &str) -> MarketSnapshot {
        for source in &self.market_sources {
            match tokio::time::timeout(self.source_timeout, source.fetch(address)).await {
                Ok(Ok(Some(snapshot))) => {
                    debug!("📊 Market data for {} from {}", address, source.name());
                    return snapshot;
                }
                Ok(Ok(None)) => debug!("{} has no market data for {}", source.name(), address),
                Ok(Err(e)) => warn!("⚠️ Market source {} failed: {}", source.name(), e),
                Err(_) => warn!("⚠️ Market source {} timed out", source.name()),
            }
        }
        MarketSnapshot::none()
    }

    /// First source that yields a logo wins; the chain terminates in the
    /// generated placeholder, never in an absent logo.
    pub async fn token_logo(&self, address: &str, symbol: &str) -> LogoResult {
        for source in &self.logo_sources {
            match tokio::time::timeout(self.source_timeout, source.fetch(address)).await {
                Ok(Ok(Some(logo))) => {
                    debug!("🖼️ Logo for {} from {}", address, source.name());
                    return logo;
                }
                Ok(Ok(None)) => {}
                Ok(Err(e)) => warn!("⚠️ Logo source {} failed: {}", source.name(), e),
                Err(_) => warn!("⚠️ Logo source {} timed out", source.name()),
            }
        }
        logo::generate_placeholder(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::{ScanError, ScanResult};
    use crate::models::{LogoOrigin, MarketDataOrigin};
    use futures_util::future::BoxFuture;

    enum Script {
        Hit,
        Empty,
        Fail,
    }

    struct ScriptedMarket(Script);

    impl MarketDataSource for ScriptedMarket {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn fetch<'a>(
            &'a self,
            _address: &'a str,
        ) -> BoxFuture<'a, ScanResult<Option<MarketSnapshot>>> {
            Box::pin(async move {
                match self.0 {
                    Script::Hit => Ok(Some(MarketSnapshot {
                        price: Some(1.0),
                        market_cap: None,
                        volume_24h: None,
                        price_change_24h: None,
                        source: MarketDataOrigin::DexScreener,
                    })),
                    Script::Empty => Ok(None),
                    Script::Fail => Err(ScanError::source_unavailable("down")),
                }
            })
        }
    }

    fn aggregator(market: Vec<Box<dyn MarketDataSource>>) -> ExternalDataAggregator {
        ExternalDataAggregator::with_sources(market, vec![], Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_fallback_skips_failed_source() {
        let agg = aggregator(vec![
            Box::new(ScriptedMarket(Script::Fail)),
            Box::new(ScriptedMarket(Script::Hit)),
        ]);
        let snapshot = agg.market_snapshot("0xabc").await;
        assert_eq!(snapshot.price, Some(1.0));
    }

    #[tokio::test]
    async fn test_all_sources_empty_yields_none() {
        let agg = aggregator(vec![
            Box::new(ScriptedMarket(Script::Empty)),
            Box::new(ScriptedMarket(Script::Fail)),
        ]);
        let snapshot = agg.market_snapshot("0xabc").await;
        assert!(snapshot.is_none());
    }

    #[tokio::test]
    async fn test_logo_chain_ends_in_placeholder() {
        let agg = ExternalDataAggregator::with_sources(vec![], vec![], Duration::from_millis(50));
        let logo = agg.token_logo("0xabc", "TST").await;
        assert_eq!(logo.source, LogoOrigin::Generated);
        assert!(logo.url.starts_with("data:image/svg+xml"));
    }
}
