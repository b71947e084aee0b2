//! Holder concentration check
//!
//! Needs an external indexer; without one the check honestly reports
//! UNKNOWN instead of guessing.

use serde_json::json;

use crate::checks::{CheckContext, CHECK_HOLDERS};
use crate::models::{RiskTier, SafetyCheckOutcome, ScannerConfig};
use crate::registry::{HolderDistribution, TokenRegistry};

pub async fn run(registry: &dyn TokenRegistry, ctx: &CheckContext) -> SafetyCheckOutcome {
    let distribution = registry.holder_distribution(&ctx.address).await;
    evaluate(distribution, &ctx.config)
}

pub fn evaluate(
    distribution: Option<HolderDistribution>,
    config: &ScannerConfig,
) -> SafetyCheckOutcome {
    let Some(dist) = distribution else {
        return SafetyCheckOutcome::unknown(CHECK_HOLDERS, "No holder indexer available");
    };

    let outcome = if dist.top_holder_percent > config.holder_critical_percent {
        SafetyCheckOutcome::new(
            CHECK_HOLDERS,
            false,
            RiskTier::High,
            "A single holder controls a majority of the supply",
        )
    } else if dist.top_holder_percent > config.holder_warn_percent {
        SafetyCheckOutcome::new(
            CHECK_HOLDERS,
            false,
            RiskTier::Medium,
            "Supply is concentrated in a large holder",
        )
    } else {
        SafetyCheckOutcome::new(
            CHECK_HOLDERS,
            true,
            RiskTier::Low,
            "Holder distribution shows no dominant position",
        )
    };

    outcome
        .with_evidence("holderCount", json!(dist.holder_count))
        .with_evidence("topHolderPercent", json!(dist.top_holder_percent))
}
