//! Address classification
//!
//! Decision ladder, cheapest test first:
//!   1. native denom pattern (no RPC at all)
//!   2. empty bytecode, so a wallet
//!   3. launchpad factory signature (token count AND creation fee)
//!   4. ERC-165 NFT interfaces
//!   5. ERC-20 shape (totalSupply + balanceOf both answer)
//!   6. Unknown
//!
//! Unknown is a first-class answer, not an error: the scan proceeds and every
//! probe-backed check degrades on its own.

use alloy_primitives::Address;
use std::str::FromStr;
use tracing::{info, warn};

use crate::chain::client::ChainClient;
use crate::chain::probe::{self, ProbeOutcome};
use crate::models::errors::{ErrorCode, ScanError, ScanResult};
use crate::models::{AddressClassification, AddressKind};
use crate::utils::constants::{NATIVE_DENOM_PREFIXES, NATIVE_DENOM_USEI};

/// Pure denom test; runs before any validation or RPC.
pub fn is_native_denom(address: &str) -> bool {
    address == NATIVE_DENOM_USEI
        || NATIVE_DENOM_PREFIXES
            .iter()
            .any(|prefix| address.starts_with(prefix))
}

/// Validate the address shape. Native denoms pass as-is; everything else must
/// be a 0x-prefixed 20-byte hex address.
pub fn validate_address(address: &str) -> ScanResult<()> {
    if is_native_denom(address) {
        return Ok(());
    }
    Address::from_str(address)
        .map(|_| ())
        .map_err(|_| ScanError::invalid_address(format!("Not a valid EVM address: {address}")))
}

/// Classify an address. Exactly one `eth_getCode` plus at most a handful of
/// probe calls.
pub async fn classify(client: &ChainClient, address: &str) -> ScanResult<AddressClassification> {
    if is_native_denom(address) {
        info!("🏷️ {} classified as NATIVE_ASSET", address);
        return Ok(AddressClassification::new(AddressKind::NativeAsset, address));
    }

    let code = client.get_code(address).await?;
    if code.is_empty() {
        info!("🏷️ {} classified as WALLET (no bytecode)", address);
        return Ok(AddressClassification::new(AddressKind::Wallet, address));
    }

    let kind = classify_contract(client, address).await?;
    if kind == AddressKind::Unknown {
        // Not an error: the battery still runs with conservative defaults
        warn!(
            "⚠️ [{}] {} matched no classification profile",
            ErrorCode::ClassificationAmbiguous.as_str(),
            address
        );
    } else {
        info!("🏷️ {} classified as {}", address, kind.as_str());
    }
    Ok(AddressClassification::new(kind, address))
}

async fn classify_contract(client: &ChainClient, address: &str) -> ScanResult<AddressKind> {
    // Factory: both the token-count getter and creationFee() must answer,
    // otherwise a token with a coincidental getter would misclassify.
    let count = probe::probe(client, address, &probe::factory_count_candidates()).await?;
    if count.is_hit() {
        let fee = probe::probe(client, address, &[probe::creation_fee_probe()]).await?;
        if fee.is_hit() {
            return Ok(AddressKind::FactoryContract);
        }
    }

    // NFT via ERC-165
    for candidate in [probe::erc721_interface_probe(), probe::erc1155_interface_probe()] {
        if let ProbeOutcome::Hit { value, .. } = probe::probe(client, address, &[candidate]).await?
        {
            if value.as_bool() == Some(true) {
                return Ok(AddressKind::NonFungibleToken);
            }
        }
    }

    // ERC-20 shape: totalSupply() and balanceOf(0) both decodable
    let supply = probe::probe(client, address, &[probe::total_supply_probe()]).await?;
    if supply.is_hit() {
        let balance =
            probe::probe(client, address, &[probe::balance_of_probe(Address::ZERO)]).await?;
        if balance.is_hit() {
            return Ok(AddressKind::FungibleToken);
        }
    }

    Ok(AddressKind::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_denom_patterns() {
        assert!(is_native_denom("usei"));
        assert!(is_native_denom("ibc/CA6FBFAF399474A06263E10D0CE5AEBBE15189D6D4B2DD9ADE61007E68EB9DB0"));
        assert!(is_native_denom("factory/sei1abc/mytoken"));
        assert!(is_native_denom("erc20/0x1234"));
        assert!(!is_native_denom("0xE30feDd158A2e3b13e9badaeABaFc5516e95e8C7"));
        assert!(!is_native_denom("sei1qqqqqq"));
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("0xE30feDd158A2e3b13e9badaeABaFc5516e95e8C7").is_ok());
        assert!(validate_address("usei").is_ok());
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address("not-an-address").is_err());

        let err = validate_address("0xzz").unwrap_err();
        assert_eq!(err.code_str(), "ADDR_INVALID");
    }
}
