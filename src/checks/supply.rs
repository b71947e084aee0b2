//! Supply sanity check
//!
//! Two signals: the total supply scaled to whole tokens must land inside the
//! sane range, and an open `mint(address,uint256)` must not be callable by an
//! arbitrary sender. The mint probe targets a random non-zero recipient:
//! standard tokens revert on mint-to-zero regardless of access control, which
//! would mask an open mint.

use alloy_primitives::{Address, U256};
use rand::Rng;
use serde_json::json;

use crate::chain::client::ChainClient;
use crate::chain::probe;
use crate::checks::{CheckContext, CHECK_SUPPLY};
use crate::models::{RiskTier, SafetyCheckOutcome, ScannerConfig};

pub async fn run(client: &ChainClient, ctx: &CheckContext) -> SafetyCheckOutcome {
    let supply_tokens = ctx.metadata.as_ref().and_then(whole_token_supply);

    let recipient = random_recipient();
    let mint = probe::mint_probe(recipient);
    let mintable = match client.call(&ctx.address, &mint.calldata).await {
        Ok(result) => result.is_ok(),
        Err(e) => return SafetyCheckOutcome::unknown(CHECK_SUPPLY, e.to_string()),
    };

    evaluate(supply_tokens, mintable, &ctx.config)
}

/// Pure decision half.
pub fn evaluate(
    supply_tokens: Option<u128>,
    mintable: bool,
    config: &ScannerConfig,
) -> SafetyCheckOutcome {
    let out_of_range = match supply_tokens {
        Some(tokens) => tokens < config.min_supply_tokens || tokens > config.max_supply_tokens,
        None => false,
    };

    let outcome = if out_of_range {
        SafetyCheckOutcome::new(
            CHECK_SUPPLY,
            false,
            RiskTier::High,
            "Total supply is outside the sane range",
        )
    } else if mintable {
        SafetyCheckOutcome::new(
            CHECK_SUPPLY,
            false,
            RiskTier::Medium,
            "Supply can be inflated: mint() is callable by an arbitrary sender",
        )
    } else {
        SafetyCheckOutcome::new(
            CHECK_SUPPLY,
            true,
            RiskTier::Low,
            "Total supply is within expected bounds and not arbitrarily mintable",
        )
    };

    outcome
        .with_evidence("mintable", json!(mintable))
        .with_evidence(
            "supplyTokens",
            supply_tokens.map(|t| json!(t.to_string())).unwrap_or(json!(null)),
        )
}

/// Scale the raw supply down by decimals. Saturates instead of overflowing;
/// a supply past u128 is out of range anyway.
fn whole_token_supply(metadata: &crate::models::TokenMetadata) -> Option<u128> {
    let raw: U256 = metadata.total_supply.parse().ok()?;
    let scale = U256::from(10u64).pow(U256::from(metadata.decimals));
    let tokens = raw / scale;
    Some(u128::try_from(tokens).unwrap_or(u128::MAX))
}

fn random_recipient() -> Address {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill(&mut bytes);
    bytes[19] |= 1; // never the zero address
    Address::from(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenMetadata;

    fn config() -> ScannerConfig {
        ScannerConfig::default()
    }

    fn metadata(total_supply: &str, decimals: u8) -> TokenMetadata {
        TokenMetadata {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals,
            total_supply: total_supply.to_string(),
            synthesized: false,
        }
    }

    #[test]
    fn test_sane_supply_passes() {
        let outcome = evaluate(Some(1_000_000), false, &config());
        assert!(outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Low);
    }

    #[test]
    fn test_zero_supply_is_high() {
        let outcome = evaluate(Some(0), false, &config());
        assert!(!outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_absurd_supply_is_high() {
        let outcome = evaluate(Some(u128::MAX), false, &config());
        assert_eq!(outcome.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_open_mint_is_medium() {
        let outcome = evaluate(Some(1_000_000), true, &config());
        assert_eq!(outcome.risk_tier, RiskTier::Medium);
        assert_eq!(outcome.evidence_bool("mintable"), Some(true));
    }

    #[test]
    fn test_whole_token_scaling() {
        // 1,000,000 tokens with 18 decimals
        let md = metadata("1000000000000000000000000", 18);
        assert_eq!(whole_token_supply(&md), Some(1_000_000));

        let md = metadata("5000000", 6);
        assert_eq!(whole_token_supply(&md), Some(5));
    }

    #[test]
    fn test_random_recipient_never_zero() {
        for _ in 0..32 {
            assert_ne!(random_recipient(), Address::ZERO);
        }
    }
}
