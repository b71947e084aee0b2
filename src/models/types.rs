//! Core data model for token risk reports
//!
//! Everything in here is produced once per scan and never mutated afterwards.
//! The report serializes to JSON for the UI/chat collaborators, so every type
//! carries serde derives with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// What kind of entity an address is.
///
/// Computed once per scan and immutable; every downstream decision keys off
/// this (a `Wallet` short-circuits the whole safety battery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    /// Externally owned account (no bytecode)
    Wallet,
    /// Bank-module denom (usei, ibc/..., factory/...)
    NativeAsset,
    /// ERC-20 style contract
    FungibleToken,
    /// ERC-721 / ERC-1155 contract
    NonFungibleToken,
    /// Token launchpad factory
    FactoryContract,
    /// Contract that matched no known profile
    Unknown,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "WALLET",
            Self::NativeAsset => "NATIVE_ASSET",
            Self::FungibleToken => "FUNGIBLE_TOKEN",
            Self::NonFungibleToken => "NON_FUNGIBLE_TOKEN",
            Self::FactoryContract => "FACTORY_CONTRACT",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Only contract addresses go through the full safety battery; wallets
    /// and native denoms short-circuit to a simplified report.
    pub fn runs_battery(&self) -> bool {
        matches!(
            self,
            Self::FungibleToken | Self::FactoryContract | Self::Unknown | Self::NonFungibleToken
        )
    }
}

/// Classification result: the kind plus the raw address it was computed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressClassification {
    pub kind: AddressKind,
    pub address: String,
}

impl AddressClassification {
    pub fn new(kind: AddressKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }
}

/// Coarse risk bucket assigned to one safety check's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
    /// The check could not complete; never silently dropped
    Unknown,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Outcome of one safety check. One instance per check per scan; owned
/// exclusively by the scoring engine after fan-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheckOutcome {
    pub check_name: String,
    pub passed: bool,
    pub risk_tier: RiskTier,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub evidence: BTreeMap<String, Value>,
}

impl SafetyCheckOutcome {
    pub fn new(
        check_name: impl Into<String>,
        passed: bool,
        risk_tier: RiskTier,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            passed,
            risk_tier,
            explanation: explanation.into(),
            evidence: BTreeMap::new(),
        }
    }

    /// A check that could not complete. The error lands in evidence so it is
    /// visible in the report instead of being swallowed.
    pub fn unknown(check_name: impl Into<String>, error: impl Into<String>) -> Self {
        let mut outcome = Self::new(
            check_name,
            false,
            RiskTier::Unknown,
            "Check could not complete",
        );
        outcome
            .evidence
            .insert("error".to_string(), Value::String(error.into()));
        outcome
    }

    pub fn with_evidence(mut self, key: &str, value: Value) -> Self {
        self.evidence.insert(key.to_string(), value);
        self
    }

    pub fn evidence_bool(&self, key: &str) -> Option<bool> {
        self.evidence.get(key).and_then(Value::as_bool)
    }

    pub fn evidence_f64(&self, key: &str) -> Option<f64> {
        self.evidence.get(key).and_then(Value::as_f64)
    }
}

/// Which external API a market snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketDataOrigin {
    CoinGecko,
    DexScreener,
    None,
}

/// Market data for a token. Absence is valid and never fails the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub source: MarketDataOrigin,
}

impl MarketSnapshot {
    /// Empty snapshot: every source failed or returned nothing.
    pub fn none() -> Self {
        Self {
            price: None,
            market_cap: None,
            volume_24h: None,
            price_change_24h: None,
            source: MarketDataOrigin::None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.source == MarketDataOrigin::None
    }
}

/// Where a logo URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoOrigin {
    CoinGecko,
    TrustWallet,
    DexScreener,
    /// Deterministic placeholder synthesized from the symbol
    Generated,
}

/// Logo for a token. Always present; the fallback chain terminates in a
/// generated placeholder, never in an empty value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoResult {
    pub url: String,
    pub source: LogoOrigin,
    /// True when the logo came from a source that curates its listings
    pub verified: bool,
}

/// Basic ERC-20 metadata, read through the probe library with a placeholder
/// fallback so a non-standard contract never fails the whole scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Raw total supply as a decimal string (uint256 does not fit JSON numbers)
    pub total_supply: String,
    /// True when name/symbol were synthesized from the bytecode hash
    pub synthesized: bool,
}

/// Native balance summary attached to wallet reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub balance_wei: String,
    pub transaction_count: u64,
}

/// The engine's sole output: one immutable, timestamped report per scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRiskReport {
    pub report_id: Uuid,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    pub classification: AddressClassification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TokenMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountSummary>,
    pub checks: Vec<SafetyCheckOutcome>,
    pub market: MarketSnapshot,
    pub logo: LogoResult,
    /// Always in 0..=100
    pub risk_score: u8,
    pub risk_tier: RiskTier,
    /// Ordered, de-duplicated explanations of every non-LOW check
    pub warnings: Vec<String>,
    pub scanned_at: DateTime<Utc>,
    pub latency_ms: u64,
}

impl TokenRiskReport {
    /// Find one check's outcome by name.
    pub fn check(&self, name: &str) -> Option<&SafetyCheckOutcome> {
        self.checks.iter().find(|c| c.check_name == name)
    }
}
