//! Honeypot check
//!
//! Real honeypot detection needs transaction simulation, which lives behind
//! the `HoneypotDetector` seam so an engine with a simulator can plug in.
//! The shipped detector is deliberately conservative: it never claims a token
//! IS a honeypot on heuristics alone, it only reports that the heuristic is
//! disabled.

use futures_util::future::BoxFuture;
use serde_json::json;

use crate::checks::{CheckContext, CHECK_HONEYPOT};
use crate::models::{RiskTier, SafetyCheckOutcome};

/// Detection seam. A simulation-backed implementation replaces the default
/// without touching the scanner.
pub trait HoneypotDetector: Send + Sync {
    fn detect<'a>(&'a self, ctx: &'a CheckContext) -> BoxFuture<'a, SafetyCheckOutcome>;
}

/// Default detector: no simulation available, so never accuse.
pub struct ConservativeDetector;

impl HoneypotDetector for ConservativeDetector {
    fn detect<'a>(&'a self, _ctx: &'a CheckContext) -> BoxFuture<'a, SafetyCheckOutcome> {
        Box::pin(async {
            SafetyCheckOutcome::new(
                CHECK_HONEYPOT,
                true,
                RiskTier::Low,
                "Honeypot simulation heuristic disabled; no adverse evidence",
            )
            .with_evidence("isHoneypot", json!(false))
            .with_evidence("simulated", json!(false))
        })
    }
}

pub async fn run(detector: &dyn HoneypotDetector, ctx: &CheckContext) -> SafetyCheckOutcome {
    detector.detect(ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScannerConfig;

    #[tokio::test]
    async fn test_conservative_detector_never_accuses() {
        let ctx = CheckContext {
            address: "0x0000000000000000000000000000000000000123".to_string(),
            metadata: None,
            config: ScannerConfig::default(),
        };
        let outcome = run(&ConservativeDetector, &ctx).await;
        assert!(outcome.passed);
        assert_eq!(outcome.risk_tier, RiskTier::Low);
        assert_eq!(outcome.evidence_bool("isHoneypot"), Some(false));
    }
}
