//! Scanner configuration
//!
//! Endpoints come from the environment with sane public defaults; thresholds
//! come from constants. The config is cloned into every spawned check task,
//! so it stays small and `Clone`.

use std::time::Duration;

use crate::utils::constants::{
    CHAIN_ID_SEI_MAINNET, DEFAULT_CACHE_TTL_SECS, MAX_SANE_SUPPLY_TOKENS, MIN_SANE_SUPPLY_TOKENS,
    SEI_EVM_RPC_FALLBACK, SEI_EVM_RPC_MAINNET,
};

/// Configuration for the token scanner.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Primary JSON-RPC endpoint
    pub rpc_url: String,
    /// Public fallback endpoint, tried once when the primary fails
    pub rpc_fallback_url: Option<String>,
    /// Chain id, recorded on reports and used for cache scoping
    pub chain_id: u64,
    /// Overall scan deadline; in-flight tasks are cancelled past this
    pub overall_deadline: Duration,
    /// Per-check timeout so one slow RPC cannot eat the whole budget
    pub check_timeout: Duration,
    /// Per-external-source timeout inside the market/logo fallback chains
    pub source_timeout: Duration,
    /// Supply sanity bounds, in whole tokens
    pub min_supply_tokens: u128,
    pub max_supply_tokens: u128,
    /// Fee thresholds in percent
    pub moderate_fee_percent: f64,
    pub excessive_fee_percent: f64,
    /// Holder concentration thresholds in percent of total supply
    pub holder_warn_percent: f64,
    pub holder_critical_percent: f64,
    /// Report cache TTL
    pub cache_ttl_secs: u64,
    /// Optional holder-distribution indexer endpoint
    pub indexer_url: Option<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            rpc_url: std::env::var("SEI_EVM_RPC_URL")
                .unwrap_or_else(|_| SEI_EVM_RPC_MAINNET.to_string()),
            rpc_fallback_url: Some(SEI_EVM_RPC_FALLBACK.to_string()),
            chain_id: CHAIN_ID_SEI_MAINNET,
            overall_deadline: Duration::from_secs(20),
            check_timeout: Duration::from_secs(6),
            source_timeout: Duration::from_secs(3),
            min_supply_tokens: MIN_SANE_SUPPLY_TOKENS,
            max_supply_tokens: MAX_SANE_SUPPLY_TOKENS,
            moderate_fee_percent: 5.0,
            excessive_fee_percent: 10.0,
            holder_warn_percent: 25.0,
            holder_critical_percent: 50.0,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            indexer_url: std::env::var("SEI_INDEXER_URL").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ScannerConfig::default();
        assert!(config.moderate_fee_percent < config.excessive_fee_percent);
        assert!(config.holder_warn_percent < config.holder_critical_percent);
        assert!(config.check_timeout < config.overall_deadline);
        assert!(config.source_timeout <= config.check_timeout);
    }
}
