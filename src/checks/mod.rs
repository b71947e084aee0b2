//! Safety check battery
//!
//! Nine independent checks, each producing exactly one `SafetyCheckOutcome`.
//! Checks never fail the scan: a check that cannot complete reports the
//! UNKNOWN tier with the error in its evidence. Every check splits into an
//! async fetch half and a pure `evaluate` half so the decision logic is
//! testable without a network.

pub mod blacklist;
pub mod fees;
pub mod holders;
pub mod honeypot;
pub mod liquidity;
pub mod ownership;
pub mod supply;
pub mod transfer;
pub mod verification;

use crate::models::{ScannerConfig, TokenMetadata};

pub const CHECK_SUPPLY: &str = "supply";
pub const CHECK_OWNERSHIP: &str = "ownership";
pub const CHECK_LIQUIDITY: &str = "liquidity";
pub const CHECK_HONEYPOT: &str = "honeypot";
pub const CHECK_BLACKLIST: &str = "blacklist";
pub const CHECK_TRANSFER: &str = "transfer";
pub const CHECK_FEES: &str = "fees";
pub const CHECK_HOLDERS: &str = "holders";
pub const CHECK_VERIFICATION: &str = "verification";

/// All check names in report order.
pub const ALL_CHECKS: [&str; 9] = [
    CHECK_SUPPLY,
    CHECK_OWNERSHIP,
    CHECK_LIQUIDITY,
    CHECK_HONEYPOT,
    CHECK_BLACKLIST,
    CHECK_TRANSFER,
    CHECK_FEES,
    CHECK_HOLDERS,
    CHECK_VERIFICATION,
];

/// Per-scan context cloned into every spawned check task.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub address: String,
    pub metadata: Option<TokenMetadata>,
    pub config: ScannerConfig,
}
