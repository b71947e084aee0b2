//! Blacklist capability check
//!
//! The mere presence of a blacklist function is the risk: the operator can
//! freeze arbitrary holders. Probed against the zero address; what the call
//! returns for that address does not matter, only that the getter exists.

use alloy_primitives::Address;
use serde_json::json;

use crate::chain::client::ChainClient;
use crate::chain::probe;
use crate::checks::{CheckContext, CHECK_BLACKLIST};
use crate::models::{RiskTier, SafetyCheckOutcome};

pub async fn run(client: &ChainClient, ctx: &CheckContext) -> SafetyCheckOutcome {
    let candidates = probe::blacklist_candidates(Address::ZERO);

    match probe::probe(client, &ctx.address, &candidates).await {
        Ok(outcome) => evaluate(outcome.is_hit()),
        Err(e) => SafetyCheckOutcome::unknown(CHECK_BLACKLIST, e.to_string()),
    }
}

pub fn evaluate(has_blacklist: bool) -> SafetyCheckOutcome {
    if has_blacklist {
        SafetyCheckOutcome::new(
            CHECK_BLACKLIST,
            false,
            RiskTier::High,
            "Contract exposes a blacklist: the operator can freeze holders",
        )
        .with_evidence("hasBlacklist", json!(true))
    } else {
        SafetyCheckOutcome::new(
            CHECK_BLACKLIST,
            true,
            RiskTier::Low,
            "No blacklist capability detected",
        )
        .with_evidence("hasBlacklist", json!(false))
    }
}
