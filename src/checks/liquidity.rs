//! Liquidity and activity check
//!
//! A token nobody can trade is a dead end even when every other check passes.
//! Signals: the token's balance on known DEX routers, and on-chain activity
//! at the contract address.

use alloy_primitives::U256;
use serde_json::json;

use crate::chain::client::ChainClient;
use crate::chain::probe::{self, ProbeOutcome};
use crate::checks::{CheckContext, CHECK_LIQUIDITY};
use crate::models::{RiskTier, SafetyCheckOutcome};
use crate::utils::constants::router_addresses;

pub async fn run(client: &ChainClient, ctx: &CheckContext) -> SafetyCheckOutcome {
    let mut routers_with_balance = 0usize;
    for router in router_addresses() {
        match probe::probe(client, &ctx.address, &[probe::balance_of_probe(router)]).await {
            Ok(ProbeOutcome::Hit { value, .. }) => {
                if value.as_uint().unwrap_or(U256::ZERO) > U256::ZERO {
                    routers_with_balance += 1;
                }
            }
            Ok(ProbeOutcome::Exhausted { .. }) => {}
            Err(e) => return SafetyCheckOutcome::unknown(CHECK_LIQUIDITY, e.to_string()),
        }
    }

    let native_balance = match client.get_balance(&ctx.address).await {
        Ok(balance) => balance,
        Err(e) => return SafetyCheckOutcome::unknown(CHECK_LIQUIDITY, e.to_string()),
    };
    let tx_count = match client.get_transaction_count(&ctx.address).await {
        Ok(count) => count,
        Err(e) => return SafetyCheckOutcome::unknown(CHECK_LIQUIDITY, e.to_string()),
    };

    evaluate(routers_with_balance, tx_count, native_balance)
}

pub fn evaluate(
    routers_with_balance: usize,
    tx_count: u64,
    native_balance: U256,
) -> SafetyCheckOutcome {
    let tradeable = routers_with_balance > 0 || tx_count > 0;

    let outcome = if tradeable {
        SafetyCheckOutcome::new(
            CHECK_LIQUIDITY,
            true,
            RiskTier::Low,
            "Token shows DEX presence or on-chain activity",
        )
    } else {
        SafetyCheckOutcome::new(
            CHECK_LIQUIDITY,
            false,
            RiskTier::High,
            "No DEX liquidity and no on-chain activity: token may not be tradeable",
        )
    };

    outcome
        .with_evidence("routersWithBalance", json!(routers_with_balance))
        .with_evidence("transactionCount", json!(tx_count))
        .with_evidence("nativeBalanceWei", json!(native_balance.to_string()))
}
