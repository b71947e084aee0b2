//! Transfer simulation check
//!
//! Dry-runs `transfer` and `transferFrom` with zero amounts between random
//! non-zero addresses. Standard tokens accept a zero-amount transfer even
//! with no balance or allowance, so a revert here points at restrictive
//! transfer logic (paused trading, sender allow-lists, trapdoor modifiers).

use alloy_primitives::{Address, U256};
use rand::Rng;
use serde_json::json;

use crate::chain::client::ChainClient;
use crate::chain::probe;
use crate::checks::{CheckContext, CHECK_TRANSFER};
use crate::models::{RiskTier, SafetyCheckOutcome};

pub async fn run(client: &ChainClient, ctx: &CheckContext) -> SafetyCheckOutcome {
    let from = random_address();
    let to = random_address();

    let transfer = probe::transfer_probe(to, U256::ZERO);
    let transfer_ok = match client.call(&ctx.address, &transfer.calldata).await {
        Ok(result) => result.is_ok(),
        Err(e) => return SafetyCheckOutcome::unknown(CHECK_TRANSFER, e.to_string()),
    };

    let transfer_from = probe::transfer_from_probe(from, to, U256::ZERO);
    let transfer_from_ok = match client.call(&ctx.address, &transfer_from.calldata).await {
        Ok(result) => result.is_ok(),
        Err(e) => return SafetyCheckOutcome::unknown(CHECK_TRANSFER, e.to_string()),
    };

    evaluate(transfer_ok, transfer_from_ok)
}

pub fn evaluate(transfer_ok: bool, transfer_from_ok: bool) -> SafetyCheckOutcome {
    let outcome = if transfer_ok && transfer_from_ok {
        SafetyCheckOutcome::new(
            CHECK_TRANSFER,
            true,
            RiskTier::Low,
            "Zero-amount transfer dry-runs completed without reverting",
        )
    } else {
        SafetyCheckOutcome::new(
            CHECK_TRANSFER,
            false,
            RiskTier::High,
            "Transfer dry-run reverted: transfers may be restricted",
        )
    };

    outcome
        .with_evidence("transferOk", json!(transfer_ok))
        .with_evidence("transferFromOk", json!(transfer_from_ok))
}

fn random_address() -> Address {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill(&mut bytes);
    bytes[19] |= 1;
    Address::from(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_ok_passes() {
        let outcome = evaluate(true, true);
        assert!(outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Low);
    }

    #[test]
    fn test_any_revert_is_high() {
        assert_eq!(evaluate(false, true).risk_tier, RiskTier::High);
        assert_eq!(evaluate(true, false).risk_tier, RiskTier::High);
        assert!(!evaluate(false, false).passed);
    }
}
