//! # Sei Sentinel
//!
//! Token contract risk-scoring engine for the Sei EVM. Given any on-chain
//! address it classifies what the address is, runs a battery of nine
//! concurrent safety checks against the live chain, pulls market data and a
//! logo through external fallback chains, and folds everything into a single
//! 0-100 risk score with a coarse tier and human-readable warnings.
//!
//! ```no_run
//! use sei_sentinel::models::ScannerConfig;
//! use sei_sentinel::scanner::TokenScanner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = TokenScanner::new(ScannerConfig::default())?;
//! let report = scanner
//!     .scan("0xE30feDd158A2e3b13e9badaeABaFc5516e95e8C7", None, None)
//!     .await?;
//! println!("score {} ({})", report.risk_score, report.risk_tier.as_str());
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod checks;
pub mod market;
pub mod models;
pub mod registry;
pub mod scanner;
pub mod scoring;
pub mod utils;

pub use models::{ScanError, ScanResult, TokenRiskReport};
pub use scanner::TokenScanner;
