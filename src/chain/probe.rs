//! Capability probe library
//!
//! Contracts expose the same logical capability under different ABI names
//! (`owner()` vs `getOwner()` vs `admin()`). Instead of duck-typing at every
//! call site, each capability is a declarative, ordered list of `Invocation`
//! candidates; `probe` tries them in order and the first one that returns
//! without a revert or decode error wins.
//!
//! Transport failures abort the probe with `CHAIN_UNREACHABLE` so an outage
//! is never mistaken for "capability absent".

use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::{sol, SolCall};
use tracing::debug;

use crate::chain::client::{CallResult, ChainClient};
use crate::models::errors::ScanResult;
use crate::utils::constants::{INTERFACE_ID_ERC1155, INTERFACE_ID_ERC721};

sol! {
    // ERC-20 metadata and transfers
    function name() external view returns (string);
    function symbol() external view returns (string);
    function decimals() external view returns (uint8);
    function totalSupply() external view returns (uint256);
    function balanceOf(address account) external view returns (uint256);
    function transfer(address to, uint256 amount) external returns (bool);
    function transferFrom(address from, address to, uint256 amount) external returns (bool);

    // Owner lookup candidates
    function owner() external view returns (address);
    function getOwner() external view returns (address);
    function _owner() external view returns (address);
    function admin() external view returns (address);

    // Blacklist capability candidates
    function isBlacklisted(address account) external view returns (bool);
    function blacklisted(address account) external view returns (bool);
    function _isBlacklisted(address account) external view returns (bool);

    // Fee/tax getter candidates
    function buyTax() external view returns (uint256);
    function sellTax() external view returns (uint256);
    function _buyTax() external view returns (uint256);
    function _sellTax() external view returns (uint256);
    function tax() external view returns (uint256);
    function fee() external view returns (uint256);

    // Mint capability
    function mint(address to, uint256 amount) external;

    // ERC-165
    function supportsInterface(bytes4 interfaceId) external view returns (bool);

    // Launchpad factory signature
    function allTokensLength() external view returns (uint256);
    function getTokenCount() external view returns (uint256);
    function creationFee() external view returns (uint256);
}

/// How to decode the return data of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeKind {
    Address,
    Uint,
    Bool,
    Str,
    /// Keep the raw bytes; success means "did not revert"
    Raw,
}

/// One concrete, ABI-specific way of invoking a logical capability.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Human-readable candidate name, e.g. `owner()`
    pub name: &'static str,
    pub calldata: Vec<u8>,
    pub decode: DecodeKind,
}

impl Invocation {
    pub fn new(name: &'static str, calldata: Vec<u8>, decode: DecodeKind) -> Self {
        Self {
            name,
            calldata,
            decode,
        }
    }
}

/// Decoded value from a successful candidate.
#[derive(Debug, Clone)]
pub enum ProbeValue {
    Address(Address),
    Uint(U256),
    Bool(bool),
    Str(String),
    Raw(Vec<u8>),
}

impl ProbeValue {
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

/// Result of probing one capability. Never partially populated: either one
/// candidate succeeded or all of them are accounted for in `attempts`.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Hit {
        /// Which candidate succeeded
        candidate: &'static str,
        value: ProbeValue,
    },
    Exhausted {
        /// Every candidate tried, in order, with its failure reason
        attempts: Vec<String>,
    },
}

impl ProbeOutcome {
    pub fn hit(&self) -> Option<(&'static str, &ProbeValue)> {
        match self {
            Self::Hit { candidate, value } => Some((candidate, value)),
            Self::Exhausted { .. } => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Try each candidate in order; first clean decode wins, the rest are
/// skipped. Reverts and decode errors move on to the next candidate;
/// transport errors propagate.
pub async fn probe(
    client: &ChainClient,
    address: &str,
    candidates: &[Invocation],
) -> ScanResult<ProbeOutcome> {
    let mut attempts = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match client.call(address, &candidate.calldata).await? {
            CallResult::Ok(data) => match decode_return(&data, candidate.decode) {
                Ok(value) => {
                    debug!("probe hit: {} on {}", candidate.name, address);
                    return Ok(ProbeOutcome::Hit {
                        candidate: candidate.name,
                        value,
                    });
                }
                Err(reason) => attempts.push(format!("{}: {}", candidate.name, reason)),
            },
            CallResult::Reverted(reason) => {
                attempts.push(format!("{}: reverted ({})", candidate.name, reason))
            }
        }
    }

    Ok(ProbeOutcome::Exhausted { attempts })
}

/// Decode one ABI return word (or dynamic string) per the candidate's kind.
fn decode_return(data: &[u8], kind: DecodeKind) -> Result<ProbeValue, String> {
    match kind {
        DecodeKind::Raw => Ok(ProbeValue::Raw(data.to_vec())),
        DecodeKind::Address => {
            let word = first_word(data)?;
            Ok(ProbeValue::Address(Address::from_slice(&word[12..32])))
        }
        DecodeKind::Uint => {
            let word = first_word(data)?;
            Ok(ProbeValue::Uint(U256::from_be_slice(&word)))
        }
        DecodeKind::Bool => {
            let word = first_word(data)?;
            Ok(ProbeValue::Bool(word[31] != 0))
        }
        DecodeKind::Str => decode_string(data).map(ProbeValue::Str),
    }
}

fn first_word(data: &[u8]) -> Result<[u8; 32], String> {
    if data.len() < 32 {
        return Err(format!("short return data ({} bytes)", data.len()));
    }
    let mut word = [0u8; 32];
    word.copy_from_slice(&data[..32]);
    Ok(word)
}

/// Decode an ABI-encoded dynamic string: offset word, length word, bytes.
/// Some ancient tokens return bytes32 instead; fall back to trimming nulls.
fn decode_string(data: &[u8]) -> Result<String, String> {
    if let Some(value) = decode_dynamic_string(data) {
        return Ok(value);
    }

    // bytes32-style fixed return
    if data.len() == 32 {
        let trimmed: Vec<u8> = data.iter().copied().take_while(|b| *b != 0).collect();
        if !trimmed.is_empty() {
            return Ok(String::from_utf8_lossy(&trimmed).into_owned());
        }
    }

    Err(format!("undecodable string return ({} bytes)", data.len()))
}

/// The offset and length words are untrusted contract output, so all index
/// arithmetic is checked; a hostile value reads as a decode failure.
fn decode_dynamic_string(data: &[u8]) -> Option<String> {
    if data.len() < 64 {
        return None;
    }
    let offset = usize::try_from(U256::from_be_slice(&data[..32])).ok()?;
    let len_end = offset.checked_add(32)?;
    if len_end > data.len() {
        return None;
    }
    let len = usize::try_from(U256::from_be_slice(&data[offset..len_end])).ok()?;
    let end = len_end.checked_add(len)?;
    if end > data.len() {
        return None;
    }
    Some(String::from_utf8_lossy(&data[len_end..end]).into_owned())
}

// ============================================
// Candidate builders, one per capability
// ============================================

pub fn owner_candidates() -> Vec<Invocation> {
    vec![
        Invocation::new("owner()", ownerCall {}.abi_encode(), DecodeKind::Address),
        Invocation::new(
            "getOwner()",
            getOwnerCall {}.abi_encode(),
            DecodeKind::Address,
        ),
        Invocation::new("_owner()", _ownerCall {}.abi_encode(), DecodeKind::Address),
        Invocation::new("admin()", adminCall {}.abi_encode(), DecodeKind::Address),
    ]
}

pub fn blacklist_candidates(account: Address) -> Vec<Invocation> {
    vec![
        Invocation::new(
            "isBlacklisted(address)",
            isBlacklistedCall { account }.abi_encode(),
            DecodeKind::Bool,
        ),
        Invocation::new(
            "blacklisted(address)",
            blacklistedCall { account }.abi_encode(),
            DecodeKind::Bool,
        ),
        Invocation::new(
            "_isBlacklisted(address)",
            _isBlacklistedCall { account }.abi_encode(),
            DecodeKind::Bool,
        ),
    ]
}

/// Buy/sell getter pairs, most specific first. `tax()`/`fee()` report the
/// same value for both sides.
pub fn tax_candidate_pairs() -> Vec<(Invocation, Invocation)> {
    vec![
        (
            Invocation::new("buyTax()", buyTaxCall {}.abi_encode(), DecodeKind::Uint),
            Invocation::new("sellTax()", sellTaxCall {}.abi_encode(), DecodeKind::Uint),
        ),
        (
            Invocation::new("_buyTax()", _buyTaxCall {}.abi_encode(), DecodeKind::Uint),
            Invocation::new("_sellTax()", _sellTaxCall {}.abi_encode(), DecodeKind::Uint),
        ),
        (
            Invocation::new("tax()", taxCall {}.abi_encode(), DecodeKind::Uint),
            Invocation::new("tax()", taxCall {}.abi_encode(), DecodeKind::Uint),
        ),
        (
            Invocation::new("fee()", feeCall {}.abi_encode(), DecodeKind::Uint),
            Invocation::new("fee()", feeCall {}.abi_encode(), DecodeKind::Uint),
        ),
    ]
}

/// Mint probe. The recipient should be a random non-zero address: standard
/// ERC-20s revert on mint-to-zero regardless of access control, which would
/// mask an open mint function.
pub fn mint_probe(to: Address) -> Invocation {
    Invocation::new(
        "mint(address,uint256)",
        mintCall {
            to,
            amount: U256::from(1),
        }
        .abi_encode(),
        DecodeKind::Raw,
    )
}

pub fn transfer_probe(to: Address, amount: U256) -> Invocation {
    Invocation::new(
        "transfer(address,uint256)",
        transferCall { to, amount }.abi_encode(),
        DecodeKind::Raw,
    )
}

pub fn transfer_from_probe(from: Address, to: Address, amount: U256) -> Invocation {
    Invocation::new(
        "transferFrom(address,address,uint256)",
        transferFromCall { from, to, amount }.abi_encode(),
        DecodeKind::Raw,
    )
}

pub fn erc721_interface_probe() -> Invocation {
    interface_probe("supportsInterface(ERC721)", INTERFACE_ID_ERC721)
}

pub fn erc1155_interface_probe() -> Invocation {
    interface_probe("supportsInterface(ERC1155)", INTERFACE_ID_ERC1155)
}

fn interface_probe(name: &'static str, interface_id: [u8; 4]) -> Invocation {
    Invocation::new(
        name,
        supportsInterfaceCall {
            interfaceId: FixedBytes::from(interface_id),
        }
        .abi_encode(),
        DecodeKind::Bool,
    )
}

pub fn total_supply_probe() -> Invocation {
    Invocation::new(
        "totalSupply()",
        totalSupplyCall {}.abi_encode(),
        DecodeKind::Uint,
    )
}

pub fn balance_of_probe(account: Address) -> Invocation {
    Invocation::new(
        "balanceOf(address)",
        balanceOfCall { account }.abi_encode(),
        DecodeKind::Uint,
    )
}

pub fn name_probe() -> Invocation {
    Invocation::new("name()", nameCall {}.abi_encode(), DecodeKind::Str)
}

pub fn symbol_probe() -> Invocation {
    Invocation::new("symbol()", symbolCall {}.abi_encode(), DecodeKind::Str)
}

pub fn decimals_probe() -> Invocation {
    Invocation::new("decimals()", decimalsCall {}.abi_encode(), DecodeKind::Uint)
}

/// Token-count candidates that identify a launchpad factory.
pub fn factory_count_candidates() -> Vec<Invocation> {
    vec![
        Invocation::new(
            "allTokensLength()",
            allTokensLengthCall {}.abi_encode(),
            DecodeKind::Uint,
        ),
        Invocation::new(
            "getTokenCount()",
            getTokenCountCall {}.abi_encode(),
            DecodeKind::Uint,
        ),
    ]
}

pub fn creation_fee_probe() -> Invocation {
    Invocation::new(
        "creationFee()",
        creationFeeCall {}.abi_encode(),
        DecodeKind::Uint,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        // Canonical ERC-20 selectors
        assert_eq!(&nameCall {}.abi_encode()[..4], &[0x06, 0xfd, 0xde, 0x03]);
        assert_eq!(&symbolCall {}.abi_encode()[..4], &[0x95, 0xd8, 0x9b, 0x41]);
        assert_eq!(&decimalsCall {}.abi_encode()[..4], &[0x31, 0x3c, 0xe5, 0x67]);
        assert_eq!(
            &totalSupplyCall {}.abi_encode()[..4],
            &[0x18, 0x16, 0x0d, 0xdd]
        );
        assert_eq!(&ownerCall {}.abi_encode()[..4], &[0x8d, 0xa5, 0xcb, 0x5b]);
        assert_eq!(
            &supportsInterfaceCall {
                interfaceId: FixedBytes::from(INTERFACE_ID_ERC721)
            }
            .abi_encode()[..4],
            &[0x01, 0xff, 0xc9, 0xa7]
        );
    }

    #[test]
    fn test_decode_address_word() {
        let mut data = vec![0u8; 32];
        data[12..32].copy_from_slice(&[0x11u8; 20]);
        let value = decode_return(&data, DecodeKind::Address).unwrap();
        assert_eq!(value.as_address(), Some(Address::from([0x11u8; 20])));
    }

    #[test]
    fn test_decode_bool_word() {
        let mut data = vec![0u8; 32];
        assert_eq!(
            decode_return(&data, DecodeKind::Bool).unwrap().as_bool(),
            Some(false)
        );
        data[31] = 1;
        assert_eq!(
            decode_return(&data, DecodeKind::Bool).unwrap().as_bool(),
            Some(true)
        );
    }

    #[test]
    fn test_decode_uint_word() {
        let mut data = vec![0u8; 32];
        data[31] = 0x2a;
        assert_eq!(
            decode_return(&data, DecodeKind::Uint).unwrap().as_uint(),
            Some(U256::from(42))
        );
    }

    #[test]
    fn test_decode_short_data_fails() {
        assert!(decode_return(&[0u8; 4], DecodeKind::Uint).is_err());
        assert!(decode_return(&[], DecodeKind::Address).is_err());
    }

    #[test]
    fn test_decode_dynamic_string() {
        // offset 0x20, length 3, "SEI"
        let mut data = vec![0u8; 96];
        data[31] = 0x20;
        data[63] = 3;
        data[64..67].copy_from_slice(b"SEI");
        let value = decode_return(&data, DecodeKind::Str).unwrap();
        assert_eq!(value.as_str(), Some("SEI"));
    }

    #[test]
    fn test_decode_string_rejects_hostile_offset() {
        // offset word saturated near usize::MAX must fail, not overflow
        let mut data = vec![0u8; 96];
        data[..32].copy_from_slice(&[0xffu8; 32]);
        assert!(decode_return(&data, DecodeKind::Str).is_err());

        // offset at the word limit survives try_from but overflows the +32
        let mut data = vec![0u8; 96];
        data[24..32].copy_from_slice(&u64::MAX.to_be_bytes());
        assert!(decode_return(&data, DecodeKind::Str).is_err());
    }

    #[test]
    fn test_decode_string_rejects_hostile_length() {
        // valid offset, length word near usize::MAX
        let mut data = vec![0u8; 96];
        data[31] = 0x20;
        data[32..64].copy_from_slice(&[0xffu8; 32]);
        assert!(decode_return(&data, DecodeKind::Str).is_err());

        let mut data = vec![0u8; 96];
        data[31] = 0x20;
        data[56..64].copy_from_slice(&u64::MAX.to_be_bytes());
        assert!(decode_return(&data, DecodeKind::Str).is_err());
    }

    #[test]
    fn test_decode_bytes32_string() {
        let mut data = vec![0u8; 32];
        data[..4].copy_from_slice(b"WSEI");
        let value = decode_return(&data, DecodeKind::Str).unwrap();
        assert_eq!(value.as_str(), Some("WSEI"));
    }

    #[test]
    fn test_candidate_order_is_stable() {
        let candidates = owner_candidates();
        let names: Vec<&str> = candidates.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["owner()", "getOwner()", "_owner()", "admin()"]);
    }
}
