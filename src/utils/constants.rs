//! Constants - single source of truth
//!
//! Chain endpoints, denom patterns, interface ids, external API bases and the
//! curated verified-token list all live here. No hardcoded values in other
//! modules.

use alloy_primitives::Address;
use std::str::FromStr;

// ============================================
// APPLICATION
// ============================================

pub const APP_NAME: &str = "SeiSentinel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for all outbound HTTP requests
pub const USER_AGENT: &str = "SeiSentinel/0.1.0";

// ============================================
// CHAIN
// ============================================

/// Sei EVM mainnet (pacific-1)
pub const CHAIN_ID_SEI_MAINNET: u64 = 1329;
/// Sei EVM testnet (atlantic-2)
pub const CHAIN_ID_SEI_TESTNET: u64 = 1328;

pub const SEI_EVM_RPC_MAINNET: &str = "https://evm-rpc.sei-apis.com";
pub const SEI_EVM_RPC_TESTNET: &str = "https://evm-rpc-testnet.sei-apis.com";
/// Public fallback endpoint, tried once when the primary fails
pub const SEI_EVM_RPC_FALLBACK: &str = "https://sei-evm-rpc.publicnode.com";

/// Bank-module denom prefixes that classify as native assets without any RPC
pub const NATIVE_DENOM_PREFIXES: [&str; 3] = ["ibc/", "factory/", "erc20/"];
/// The native staking denom itself
pub const NATIVE_DENOM_USEI: &str = "usei";

// ============================================
// INTERFACE IDS (ERC-165)
// ============================================

pub const INTERFACE_ID_ERC721: [u8; 4] = [0x80, 0xac, 0x58, 0xcd];
pub const INTERFACE_ID_ERC1155: [u8; 4] = [0xd9, 0xb6, 0x7a, 0x26];

// ============================================
// DEX ROUTERS
// ============================================

/// DEX router info
#[derive(Debug, Clone)]
pub struct RouterInfo {
    pub name: &'static str,
    pub address: &'static str,
}

/// Known DEX routers on Sei EVM, used by the liquidity/activity check
pub fn get_dex_routers() -> Vec<RouterInfo> {
    vec![
        RouterInfo {
            name: "DragonSwap V2",
            address: "0x11DA6463D6Cb5a03411Dbf5ab6f6bc3997Ac7428",
        },
        RouterInfo {
            name: "Astroport",
            address: "0x5B269ce8063CcB0fcA9d2287b7B33FC9B55B0D53",
        },
    ]
}

/// Router addresses parsed, skipping any malformed entry
pub fn router_addresses() -> Vec<Address> {
    get_dex_routers()
        .into_iter()
        .filter_map(|r| Address::from_str(r.address).ok())
        .collect()
}

// ============================================
// EXTERNAL APIS
// ============================================

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";
/// CoinGecko asset-platform id for Sei EVM contract lookups
pub const COINGECKO_PLATFORM_SEI: &str = "sei-v2";

pub const DEXSCREENER_API_BASE: &str = "https://api.dexscreener.com/latest/dex";

/// Trust Wallet assets CDN; logo existence is probed with a HEAD request at
/// `{base}/{chain}/assets/{checksummedAddress}/logo.png`
pub const TRUSTWALLET_ASSETS_BASE: &str =
    "https://raw.githubusercontent.com/trustwallet/assets/master/blockchains";
pub const TRUSTWALLET_CHAIN_SEI: &str = "sei";

// ============================================
// VERIFIED TOKEN REGISTRY
// ============================================

/// A curated, known-good token
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub address: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
    pub logo_url: &'static str,
    pub coingecko_id: &'static str,
}

/// Curated verified tokens on Sei EVM mainnet
pub fn verified_tokens() -> &'static [VerifiedToken] {
    &[
        VerifiedToken {
            address: "0xE30feDd158A2e3b13e9badaeABaFc5516e95e8C7",
            name: "Wrapped SEI",
            symbol: "WSEI",
            decimals: 18,
            logo_url:
                "https://assets.coingecko.com/coins/images/28205/large/Sei_Logo_-_Transparent.png",
            coingecko_id: "wrapped-sei",
        },
        VerifiedToken {
            address: "0x3894085Ef7Ff0f0aeDf52E2A2704928d1Ec074F1",
            name: "USD Coin",
            symbol: "USDC",
            decimals: 6,
            logo_url: "https://assets.coingecko.com/coins/images/6319/large/usdc.png",
            coingecko_id: "usd-coin",
        },
        VerifiedToken {
            address: "0xB75D0B03c06A926e488e2659DF1A861F860bD3d1",
            name: "Tether USD",
            symbol: "USDT",
            decimals: 6,
            logo_url: "https://assets.coingecko.com/coins/images/325/large/Tether.png",
            coingecko_id: "tether",
        },
    ]
}

/// Look up a verified token by address (case-insensitive)
pub fn find_verified_token(address: &str) -> Option<&'static VerifiedToken> {
    verified_tokens()
        .iter()
        .find(|t| t.address.eq_ignore_ascii_case(address))
}

// ============================================
// SCAN LIMITS
// ============================================

/// Supply sanity bounds, in whole tokens (scaled by decimals)
pub const MIN_SANE_SUPPLY_TOKENS: u128 = 1;
pub const MAX_SANE_SUPPLY_TOKENS: u128 = 1_000_000_000_000; // 10^12

/// Default cache TTL for scan reports (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_addresses_parse() {
        let routers = router_addresses();
        assert_eq!(routers.len(), get_dex_routers().len());
    }

    #[test]
    fn test_verified_lookup_case_insensitive() {
        let lower = "0xe30fedd158a2e3b13e9badaeabafc5516e95e8c7";
        let token = find_verified_token(lower).expect("WSEI should be curated");
        assert_eq!(token.symbol, "WSEI");
        assert!(find_verified_token("0x0000000000000000000000000000000000000123").is_none());
    }

    #[test]
    fn test_interface_ids() {
        assert_eq!(INTERFACE_ID_ERC721, [0x80, 0xac, 0x58, 0xcd]);
        assert_eq!(INTERFACE_ID_ERC1155, [0xd9, 0xb6, 0x7a, 0x26]);
    }
}
