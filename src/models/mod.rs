//! Data model, configuration and error taxonomy

pub mod config;
pub mod errors;
pub mod types;

pub use config::ScannerConfig;
pub use errors::{ErrorCode, ScanError, ScanResult};
pub use types::{
    AccountSummary, AddressClassification, AddressKind, LogoOrigin, LogoResult, MarketDataOrigin,
    MarketSnapshot, RiskTier, SafetyCheckOutcome, TokenMetadata, TokenRiskReport,
};
