//! Report cache
//!
//! Keys on chain id, lowercased address and block height so a new block
//! naturally invalidates stale reports and mainnet/testnet scans never
//! collide, with a TTL backstop for quiet chains. Concurrency-safe via
//! DashMap; hit/miss counters feed the stats log line.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::models::TokenRiskReport;

struct CacheEntry {
    report: TokenRiskReport,
    inserted_at: Instant,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

pub struct ReportCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    chain_id: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ReportCache {
    pub fn new(ttl_secs: u64, chain_id: u64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_secs(ttl_secs),
            chain_id,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn key(&self, address: &str, block: u64) -> String {
        format!("{}:{}@{}", self.chain_id, address.to_lowercase(), block)
    }

    pub fn get(&self, address: &str, block: u64) -> Option<TokenRiskReport> {
        let key = self.key(address, block);
        // Clone out of the shard guard before any removal to avoid holding
        // the read lock across a write
        let cached = self
            .entries
            .get(&key)
            .map(|entry| (entry.report.clone(), entry.inserted_at.elapsed() < self.ttl));

        match cached {
            Some((report, true)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("💾 Cache hit for {}", key);
                Some(report)
            }
            Some((_, false)) => {
                self.entries.remove(&key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, address: &str, block: u64, report: TokenRiskReport) {
        self.entries.insert(
            self.key(address, block),
            CacheEntry {
                report,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every entry past its TTL; returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before - self.entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AddressClassification, AddressKind, LogoOrigin, LogoResult, MarketSnapshot, RiskTier,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn report(address: &str) -> TokenRiskReport {
        TokenRiskReport {
            report_id: Uuid::new_v4(),
            address: address.to_string(),
            requested_by: None,
            classification: AddressClassification::new(AddressKind::FungibleToken, address),
            metadata: None,
            account: None,
            checks: vec![],
            market: MarketSnapshot::none(),
            logo: LogoResult {
                url: "data:image/svg+xml;utf8,<svg/>".to_string(),
                source: LogoOrigin::Generated,
                verified: false,
            },
            risk_score: 82,
            risk_tier: RiskTier::Low,
            warnings: vec![],
            scanned_at: Utc::now(),
            latency_ms: 10,
        }
    }

    #[test]
    fn test_hit_is_case_insensitive() {
        let cache = ReportCache::new(60, 1329);
        cache.insert("0xABCD000000000000000000000000000000000001", 100, report("0xABCD"));

        let hit = cache.get("0xabcd000000000000000000000000000000000001", 100);
        assert!(hit.is_some());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_block_scopes_the_key() {
        let cache = ReportCache::new(60, 1329);
        cache.insert("0xabc", 100, report("0xabc"));
        assert!(cache.get("0xabc", 101).is_none());
        assert!(cache.get("0xabc", 100).is_some());
    }

    #[test]
    fn test_chain_id_scopes_the_key() {
        let mainnet = ReportCache::new(60, 1329);
        let testnet = ReportCache::new(60, 1328);
        mainnet.insert("0xabc", 100, report("0xabc"));
        assert!(testnet.get("0xabc", 100).is_none());
        assert!(mainnet.key("0xabc", 100).starts_with("1329:"));
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = ReportCache::new(0, 1329);
        cache.insert("0xabc", 100, report("0xabc"));
        assert!(cache.get("0xabc", 100).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_cleanup_expired() {
        let cache = ReportCache::new(0, 1329);
        cache.insert("0xabc", 1, report("0xabc"));
        cache.insert("0xdef", 2, report("0xdef"));
        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_hit_rate() {
        let cache = ReportCache::new(60, 1329);
        cache.insert("0xabc", 1, report("0xabc"));
        cache.get("0xabc", 1);
        cache.get("0xmiss", 1);
        let stats = cache.stats();
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
