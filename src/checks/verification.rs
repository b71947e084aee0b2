//! Verification check against the curated registry
//!
//! Not being curated is only a mild penalty; most legitimate long-tail tokens
//! are not on the list, and a MEDIUM here keeps them scannable without
//! letting impostors claim a verified badge.

use serde_json::json;

use crate::checks::{CheckContext, CHECK_VERIFICATION};
use crate::models::{RiskTier, SafetyCheckOutcome};
use crate::registry::TokenRegistry;

pub async fn run(registry: &dyn TokenRegistry, ctx: &CheckContext) -> SafetyCheckOutcome {
    let info = registry.token_info(&ctx.address);
    evaluate(info.map(|i| i.symbol))
}

pub fn evaluate(curated_symbol: Option<String>) -> SafetyCheckOutcome {
    match curated_symbol {
        Some(symbol) => SafetyCheckOutcome::new(
            CHECK_VERIFICATION,
            true,
            RiskTier::Low,
            "Token is on the curated verified list",
        )
        .with_evidence("isVerified", json!(true))
        .with_evidence("curatedSymbol", json!(symbol)),
        None => SafetyCheckOutcome::new(
            CHECK_VERIFICATION,
            false,
            RiskTier::Medium,
            "Token is not on the curated verified list",
        )
        .with_evidence("isVerified", json!(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_token_passes() {
        let outcome = evaluate(Some("WSEI".to_string()));
        assert!(outcome.passed);
        assert_eq!(outcome.evidence_bool("isVerified"), Some(true));
    }

    #[test]
    fn test_uncurated_is_medium() {
        let outcome = evaluate(None);
        assert!(!outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Medium);
    }
}
