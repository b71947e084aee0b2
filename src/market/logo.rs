//! Trust Wallet logo source and the generated placeholder
//!
//! Trust Wallet's assets repo keys logos by EIP-55 checksummed address and
//! only existence matters, so a HEAD request is enough. The placeholder is a
//! deterministic inline SVG: same symbol, same image, no network, never
//! empty.

use alloy_primitives::Address;
use futures_util::future::BoxFuture;
use std::str::FromStr;

use crate::market::source::LogoSource;
use crate::models::errors::{ScanError, ScanResult};
use crate::models::{LogoOrigin, LogoResult};
use crate::utils::constants::{TRUSTWALLET_ASSETS_BASE, TRUSTWALLET_CHAIN_SEI, USER_AGENT};

#[derive(Clone)]
pub struct TrustWalletSource {
    client: reqwest::Client,
    base_url: String,
}

impl TrustWalletSource {
    pub fn new() -> Self {
        Self::with_base_url(TRUSTWALLET_ASSETS_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl LogoSource for TrustWalletSource {
    fn name(&self) -> &'static str {
        "trustwallet"
    }

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<LogoResult>>> {
        Box::pin(async move {
            // Repo paths are EIP-55 checksummed; a lowercased address 404s.
            let Ok(parsed) = Address::from_str(address) else {
                return Ok(None);
            };
            let url = format!(
                "{}/{}/assets/{}/logo.png",
                self.base_url,
                TRUSTWALLET_CHAIN_SEI,
                parsed.to_checksum(None)
            );

            let response = self.client.head(&url).send().await.map_err(|e| {
                ScanError::source_unavailable(format!("Trust Wallet request failed: {e}"))
            })?;

            if response.status().is_success() {
                Ok(Some(LogoResult {
                    url,
                    source: LogoOrigin::TrustWallet,
                    verified: true,
                }))
            } else {
                Ok(None)
            }
        })
    }
}

const PLACEHOLDER_PALETTE: [&str; 6] = [
    "%234F46E5", "%230891B2", "%23059669", "%23D97706", "%23DC2626", "%237C3AED",
];

/// Deterministic inline-SVG placeholder: colored disc plus the first two
/// symbol characters. Color is keyed off the symbol byte sum.
pub fn generate_placeholder(symbol: &str) -> LogoResult {
    let initials: String = symbol.chars().take(2).collect::<String>().to_uppercase();
    let initials = if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    };

    let byte_sum: usize = symbol.bytes().map(usize::from).sum();
    let color = PLACEHOLDER_PALETTE[byte_sum % PLACEHOLDER_PALETTE.len()];

    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='64' height='64'>\
         <circle cx='32' cy='32' r='32' fill='{color}'/>\
         <text x='32' y='40' font-family='sans-serif' font-size='24' \
         fill='white' text-anchor='middle'>{initials}</text></svg>"
    );

    LogoResult {
        url: format!("data:image/svg+xml;utf8,{svg}"),
        source: LogoOrigin::Generated,
        verified: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_deterministic() {
        let a = generate_placeholder("WSEI");
        let b = generate_placeholder("WSEI");
        assert_eq!(a.url, b.url);
        assert_eq!(a.source, LogoOrigin::Generated);
        assert!(!a.verified);
    }

    #[test]
    fn test_placeholder_embeds_initials() {
        let logo = generate_placeholder("pepe");
        assert!(logo.url.contains(">PE<"));
        assert!(logo.url.starts_with("data:image/svg+xml;utf8,"));
    }

    #[test]
    fn test_placeholder_handles_empty_symbol() {
        let logo = generate_placeholder("");
        assert!(logo.url.contains(">?<"));
    }

    #[test]
    fn test_placeholder_color_escaped_for_data_url() {
        let logo = generate_placeholder("ABC");
        // raw '#' would terminate the data URL
        assert!(!logo.url.contains("fill='#"));
        assert!(logo.url.contains("fill='%23"));
    }
}
