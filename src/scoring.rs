//! Risk scoring
//!
//! Pure arithmetic over the fan-in result; no IO, no clock, no randomness.
//! The score starts at 100 (safest) and each check's tier subtracts a fixed
//! penalty. Specific evidence flags subtract extra on top, and two positive
//! signals add back. The final score clamps to 0..=100, and any CRITICAL
//! check pins the overall tier to HIGH no matter the number.

use crate::checks::{CHECK_BLACKLIST, CHECK_FEES, CHECK_HOLDERS, CHECK_HONEYPOT, CHECK_OWNERSHIP, CHECK_VERIFICATION};
use crate::models::{RiskTier, SafetyCheckOutcome};

const PENALTY_CRITICAL: i32 = 30;
const PENALTY_HIGH: i32 = 20;
const PENALTY_MEDIUM: i32 = 10;
const PENALTY_LOW: i32 = 2;
const PENALTY_UNKNOWN: i32 = 5;

const EXTRA_HONEYPOT: i32 = 40;
const EXTRA_BLACKLIST: i32 = 25;
const EXTRA_EXCESSIVE_FEES: i32 = 20;
const EXTRA_WHALE_HOLDER: i32 = 15;

const BONUS_VERIFIED: i32 = 10;
const BONUS_RENOUNCED: i32 = 5;

const WHALE_HOLDER_PERCENT: f64 = 50.0;

/// Score plus the tier derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskVerdict {
    pub score: u8,
    pub tier: RiskTier,
}

/// Compute the overall verdict from the full set of check outcomes.
pub fn score(checks: &[SafetyCheckOutcome]) -> RiskVerdict {
    let mut score: i32 = 100;

    for check in checks {
        score -= tier_penalty(check.risk_tier);
        score -= extra_penalty(check);
        score += bonus(check);
    }

    let score = score.clamp(0, 100) as u8;
    let any_critical = checks.iter().any(|c| c.risk_tier == RiskTier::Critical);

    let tier = if any_critical {
        RiskTier::High
    } else if score >= 70 {
        RiskTier::Low
    } else if score >= 40 {
        RiskTier::Medium
    } else {
        RiskTier::High
    };

    RiskVerdict { score, tier }
}

/// Ordered, de-duplicated explanations of every check above LOW.
pub fn collect_warnings(checks: &[SafetyCheckOutcome]) -> Vec<String> {
    let mut warnings = Vec::new();
    for check in checks {
        if check.risk_tier == RiskTier::Low {
            continue;
        }
        if !warnings.contains(&check.explanation) {
            warnings.push(check.explanation.clone());
        }
    }
    warnings
}

fn tier_penalty(tier: RiskTier) -> i32 {
    match tier {
        RiskTier::Critical => PENALTY_CRITICAL,
        RiskTier::High => PENALTY_HIGH,
        RiskTier::Medium => PENALTY_MEDIUM,
        RiskTier::Low => PENALTY_LOW,
        RiskTier::Unknown => PENALTY_UNKNOWN,
    }
}

fn extra_penalty(check: &SafetyCheckOutcome) -> i32 {
    match check.check_name.as_str() {
        CHECK_HONEYPOT if check.evidence_bool("isHoneypot") == Some(true) => EXTRA_HONEYPOT,
        CHECK_BLACKLIST if check.evidence_bool("hasBlacklist") == Some(true) => EXTRA_BLACKLIST,
        CHECK_FEES if check.evidence_bool("hasExcessiveFees") == Some(true) => EXTRA_EXCESSIVE_FEES,
        CHECK_HOLDERS
            if check
                .evidence_f64("topHolderPercent")
                .is_some_and(|p| p > WHALE_HOLDER_PERCENT) =>
        {
            EXTRA_WHALE_HOLDER
        }
        _ => 0,
    }
}

fn bonus(check: &SafetyCheckOutcome) -> i32 {
    match check.check_name.as_str() {
        CHECK_VERIFICATION if check.evidence_bool("isVerified") == Some(true) => BONUS_VERIFIED,
        CHECK_OWNERSHIP if check.evidence_bool("isRenounced") == Some(true) => BONUS_RENOUNCED,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::ALL_CHECKS;
    use serde_json::json;

    fn low(name: &str) -> SafetyCheckOutcome {
        SafetyCheckOutcome::new(name, true, RiskTier::Low, format!("{name} fine"))
    }

    fn all_low() -> Vec<SafetyCheckOutcome> {
        ALL_CHECKS.iter().map(|name| low(name)).collect()
    }

    #[test]
    fn test_all_low_scores_82() {
        // 100 minus nine LOW penalties
        let verdict = score(&all_low());
        assert_eq!(verdict.score, 82);
        assert_eq!(verdict.tier, RiskTier::Low);
    }

    #[test]
    fn test_excessive_fees_drop_to_medium() {
        let mut checks = all_low();
        checks[6] = SafetyCheckOutcome::new(
            CHECK_FEES,
            false,
            RiskTier::High,
            "Transfer fees are excessive",
        )
        .with_evidence("hasExcessiveFees", json!(true));

        // 100 - 8*2 - 20 - 20 = 44
        let verdict = score(&checks);
        assert_eq!(verdict.score, 44);
        assert_eq!(verdict.tier, RiskTier::Medium);
    }

    #[test]
    fn test_critical_forces_high_tier() {
        let mut checks = all_low();
        checks[3] = SafetyCheckOutcome::new(CHECK_HONEYPOT, false, RiskTier::Critical, "trapped");

        let verdict = score(&checks);
        // score alone (100 - 16 - 30 = 54) would be MEDIUM
        assert_eq!(verdict.score, 54);
        assert_eq!(verdict.tier, RiskTier::High);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let checks: Vec<_> = ALL_CHECKS
            .iter()
            .map(|name| {
                SafetyCheckOutcome::new(*name, false, RiskTier::Critical, "bad")
                    .with_evidence("isHoneypot", json!(true))
                    .with_evidence("hasBlacklist", json!(true))
            })
            .collect();
        let verdict = score(&checks);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.tier, RiskTier::High);
    }

    #[test]
    fn test_bonuses_add_back() {
        let mut checks = all_low();
        checks[1] = low(CHECK_OWNERSHIP).with_evidence("isRenounced", json!(true));
        checks[8] = low(CHECK_VERIFICATION).with_evidence("isVerified", json!(true));

        let verdict = score(&checks);
        assert_eq!(verdict.score, 97);
    }

    #[test]
    fn test_whale_holder_extra_penalty() {
        let mut checks = all_low();
        checks[7] = SafetyCheckOutcome::new(CHECK_HOLDERS, false, RiskTier::High, "whale")
            .with_evidence("topHolderPercent", json!(62.0));

        // 100 - 8*2 - 20 - 15 = 49
        assert_eq!(score(&checks).score, 49);
    }

    #[test]
    fn test_warnings_ordered_and_deduped() {
        let checks = vec![
            low("supply"),
            SafetyCheckOutcome::new("ownership", false, RiskTier::High, "owner active"),
            SafetyCheckOutcome::new("transfer", false, RiskTier::High, "owner active"),
            SafetyCheckOutcome::new("holders", false, RiskTier::Unknown, "no indexer"),
        ];
        let warnings = collect_warnings(&checks);
        assert_eq!(warnings, vec!["owner active", "no indexer"]);
    }

    #[test]
    fn test_unknown_checks_penalized_lightly() {
        let checks: Vec<_> = ALL_CHECKS
            .iter()
            .map(|name| SafetyCheckOutcome::unknown(*name, "timeout"))
            .collect();
        // 100 - 9*5 = 55
        let verdict = score(&checks);
        assert_eq!(verdict.score, 55);
        assert_eq!(verdict.tier, RiskTier::Medium);
    }
}
