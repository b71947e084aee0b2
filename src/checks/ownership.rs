//! Ownership check
//!
//! A live owner key can typically pause, upgrade or drain. Renounced
//! ownership (owner is the zero address) or no owner function at all both
//! count as renounced.

use alloy_primitives::Address;
use serde_json::json;

use crate::chain::client::ChainClient;
use crate::chain::probe::{self, ProbeOutcome};
use crate::checks::{CheckContext, CHECK_OWNERSHIP};
use crate::models::{RiskTier, SafetyCheckOutcome};

pub async fn run(client: &ChainClient, ctx: &CheckContext) -> SafetyCheckOutcome {
    match probe::probe(client, &ctx.address, &probe::owner_candidates()).await {
        Ok(outcome) => evaluate(outcome_owner(&outcome)),
        Err(e) => SafetyCheckOutcome::unknown(CHECK_OWNERSHIP, e.to_string()),
    }
}

/// Owner address when any candidate answered, `None` when exhausted.
fn outcome_owner(outcome: &ProbeOutcome) -> Option<Address> {
    outcome.hit().and_then(|(_, value)| value.as_address())
}

pub fn evaluate(owner: Option<Address>) -> SafetyCheckOutcome {
    match owner {
        Some(addr) if addr != Address::ZERO => SafetyCheckOutcome::new(
            CHECK_OWNERSHIP,
            false,
            RiskTier::High,
            "Contract has an active owner who may hold privileged control",
        )
        .with_evidence("isRenounced", json!(false))
        .with_evidence("owner", json!(format!("{addr}"))),
        _ => SafetyCheckOutcome::new(
            CHECK_OWNERSHIP,
            true,
            RiskTier::Low,
            "Ownership is renounced or absent",
        )
        .with_evidence("isRenounced", json!(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_live_owner_is_high() {
        let owner = Address::from_str("0x11DA6463D6Cb5a03411Dbf5ab6f6bc3997Ac7428").unwrap();
        let outcome = evaluate(Some(owner));
        assert!(!outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::High);
        assert_eq!(outcome.evidence_bool("isRenounced"), Some(false));
    }

    #[test]
    fn test_zero_owner_is_renounced() {
        let outcome = evaluate(Some(Address::ZERO));
        assert!(outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Low);
        assert_eq!(outcome.evidence_bool("isRenounced"), Some(true));
    }

    #[test]
    fn test_no_owner_function_is_renounced() {
        let outcome = evaluate(None);
        assert!(outcome.passed);
        assert_eq!(outcome.evidence_bool("isRenounced"), Some(true));
    }
}
