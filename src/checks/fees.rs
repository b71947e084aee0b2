//! Transfer fee check
//!
//! Walks the buy/sell tax getter pairs in order and evaluates the first pair
//! whose buy side answers. Values above 100 are treated as basis points
//! (a getter returning 500 means 5%); values at or below 100 are read as
//! whole percent.

use alloy_primitives::U256;
use serde_json::json;

use crate::chain::client::ChainClient;
use crate::chain::probe::{self, ProbeOutcome};
use crate::checks::{CheckContext, CHECK_FEES};
use crate::models::{RiskTier, SafetyCheckOutcome, ScannerConfig};

pub async fn run(client: &ChainClient, ctx: &CheckContext) -> SafetyCheckOutcome {
    for (buy, sell) in probe::tax_candidate_pairs() {
        let buy_hit = match probe::probe(client, &ctx.address, &[buy]).await {
            Ok(ProbeOutcome::Hit { value, .. }) => value.as_uint(),
            Ok(ProbeOutcome::Exhausted { .. }) => continue,
            Err(e) => return SafetyCheckOutcome::unknown(CHECK_FEES, e.to_string()),
        };

        let sell_hit = match probe::probe(client, &ctx.address, &[sell]).await {
            Ok(ProbeOutcome::Hit { value, .. }) => value.as_uint(),
            Ok(ProbeOutcome::Exhausted { .. }) => None,
            Err(e) => return SafetyCheckOutcome::unknown(CHECK_FEES, e.to_string()),
        };

        let buy_percent = buy_hit.map(normalize_percent).unwrap_or(0.0);
        let sell_percent = sell_hit.map(normalize_percent).unwrap_or(buy_percent);
        return evaluate(Some((buy_percent, sell_percent)), &ctx.config);
    }

    evaluate(None, &ctx.config)
}

/// Pure decision half. `None` means no fee getter exists, which standard
/// fee-free tokens share, so it passes.
pub fn evaluate(fees: Option<(f64, f64)>, config: &ScannerConfig) -> SafetyCheckOutcome {
    let Some((buy, sell)) = fees else {
        return SafetyCheckOutcome::new(
            CHECK_FEES,
            true,
            RiskTier::Low,
            "No transfer fee getters found",
        )
        .with_evidence("hasFeeGetters", json!(false));
    };

    let worst = buy.max(sell);
    let outcome = if worst > config.excessive_fee_percent {
        SafetyCheckOutcome::new(
            CHECK_FEES,
            false,
            RiskTier::High,
            "Transfer fees are excessive",
        )
        .with_evidence("hasExcessiveFees", json!(true))
    } else if worst > config.moderate_fee_percent {
        SafetyCheckOutcome::new(
            CHECK_FEES,
            false,
            RiskTier::Medium,
            "Transfer fees are moderate but non-trivial",
        )
    } else {
        SafetyCheckOutcome::new(CHECK_FEES, true, RiskTier::Low, "Transfer fees are low or zero")
    };

    outcome
        .with_evidence("buyFeePercent", json!(buy))
        .with_evidence("sellFeePercent", json!(sell))
}

/// Raw getter value to percent. Above 100 is read as basis points.
fn normalize_percent(raw: U256) -> f64 {
    let value = f64::from(u32::try_from(raw).unwrap_or(u32::MAX));
    if value > 100.0 {
        value / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScannerConfig {
        ScannerConfig::default()
    }

    #[test]
    fn test_no_getters_pass() {
        let outcome = evaluate(None, &config());
        assert!(outcome.passed);
        assert_eq!(outcome.evidence_bool("hasFeeGetters"), Some(false));
    }

    #[test]
    fn test_low_fees_pass() {
        let outcome = evaluate(Some((1.0, 2.0)), &config());
        assert!(outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Low);
    }

    #[test]
    fn test_moderate_fees_are_medium() {
        let outcome = evaluate(Some((3.0, 7.5)), &config());
        assert!(!outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Medium);
    }

    #[test]
    fn test_excessive_fees_are_high() {
        let outcome = evaluate(Some((12.0, 12.0)), &config());
        assert_eq!(outcome.risk_tier, RiskTier::High);
        assert_eq!(outcome.evidence_bool("hasExcessiveFees"), Some(true));
    }

    #[test]
    fn test_basis_point_normalization() {
        // 500 reads as 5%, 5 reads as 5%
        assert_eq!(normalize_percent(U256::from(500)), 5.0);
        assert_eq!(normalize_percent(U256::from(5)), 5.0);
        assert_eq!(normalize_percent(U256::from(100)), 100.0);
        assert_eq!(normalize_percent(U256::from(1200)), 12.0);
    }
}
