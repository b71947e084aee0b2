//! Chain client - thin JSON-RPC wrapper over the Sei EVM endpoint
//!
//! One shared, stateless, concurrency-safe handle over an `RpcTransport`.
//! The production transport speaks HTTP with a primary endpoint and one
//! public fallback; if both fail the call surfaces as `CHAIN_UNREACHABLE`.
//! Tests swap in a scripted transport. Call-level reverts are NOT errors
//! here: `call` returns `CallResult::Reverted` so the probe library can
//! treat them as "this candidate failed, try next".

use alloy_primitives::U256;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::errors::{ScanError, ScanResult};
use crate::models::ScannerConfig;
use crate::utils::constants::USER_AGENT;

/// Timeout for a single RPC request
const RPC_TIMEOUT_SECS: u64 = 10;

/// Result of an `eth_call`: execution errors are data, not failures.
#[derive(Debug, Clone)]
pub enum CallResult {
    /// Returned data (may be empty)
    Ok(Vec<u8>),
    /// Execution reverted or the node rejected the call
    Reverted(String),
}

impl CallResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// Transport seam under the client. Production uses `HttpTransport`; tests
/// script replies per method without a network.
pub trait RpcTransport: Send + Sync {
    fn request<'a>(
        &'a self,
        method: &'static str,
        params: Value,
    ) -> BoxFuture<'a, ScanResult<RpcReply>>;
}

/// Shared JSON-RPC handle. Cheap to clone; no interior mutability.
#[derive(Clone)]
pub struct ChainClient {
    transport: Arc<dyn RpcTransport>,
}

impl ChainClient {
    pub fn new(config: &ScannerConfig) -> ScanResult<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Client over a custom transport.
    pub fn with_transport(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Contract bytecode as raw bytes; empty for EOAs.
    pub async fn get_code(&self, address: &str) -> ScanResult<Vec<u8>> {
        let hex_code: String = self
            .transport
            .request("eth_getCode", serde_json::json!([address, "latest"]))
            .await?
            .into_result()?;
        decode_hex(&hex_code)
    }

    /// Static call against a contract. Reverts come back as data.
    pub async fn call(&self, to: &str, calldata: &[u8]) -> ScanResult<CallResult> {
        let params = serde_json::json!([
            { "to": to, "data": format!("0x{}", hex::encode(calldata)) },
            "latest"
        ]);

        let reply = self.transport.request("eth_call", params).await?;
        match reply.result {
            Some(value) => {
                let hex_data: String = serde_json::from_value(value)?;
                Ok(CallResult::Ok(decode_hex(&hex_data)?))
            }
            None => {
                let msg = reply
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "empty response".to_string());
                debug!("eth_call to {} reverted: {}", to, msg);
                Ok(CallResult::Reverted(msg))
            }
        }
    }

    /// Native balance in wei.
    pub async fn get_balance(&self, address: &str) -> ScanResult<U256> {
        let hex_balance: String = self
            .transport
            .request("eth_getBalance", serde_json::json!([address, "latest"]))
            .await?
            .into_result()?;
        parse_quantity(&hex_balance)
    }

    /// Outbound transaction count (nonce).
    pub async fn get_transaction_count(&self, address: &str) -> ScanResult<u64> {
        let hex_nonce: String = self
            .transport
            .request(
                "eth_getTransactionCount",
                serde_json::json!([address, "latest"]),
            )
            .await?
            .into_result()?;
        Ok(parse_quantity(&hex_nonce)?.try_into().unwrap_or(u64::MAX))
    }

    /// Current block height; used to key the report cache.
    pub async fn block_number(&self) -> ScanResult<u64> {
        let hex_block: String = self
            .transport
            .request("eth_blockNumber", serde_json::json!([]))
            .await?
            .into_result()?;
        Ok(parse_quantity(&hex_block)?.try_into().unwrap_or(u64::MAX))
    }
}

/// Production transport: primary endpoint with one public fallback.
pub struct HttpTransport {
    client: reqwest::Client,
    primary_url: String,
    fallback_url: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ScannerConfig) -> ScanResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(RPC_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScanError::chain_unreachable(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            primary_url: config.rpc_url.clone(),
            fallback_url: config.rpc_fallback_url.clone(),
        })
    }

    /// Fire one JSON-RPC request, falling through to the public endpoint when
    /// the primary is unreachable. Both failing means the chain is down.
    async fn send(&self, method: &'static str, params: Value) -> ScanResult<RpcReply> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        match self.post(&self.primary_url, &payload).await {
            Ok(reply) => Ok(reply),
            Err(primary_err) => {
                let Some(fallback) = self.fallback_url.as_deref() else {
                    return Err(primary_err);
                };
                warn!(
                    "⚠️ Primary RPC failed ({}), trying fallback: {}",
                    method, primary_err
                );
                self.post(fallback, &payload).await.map_err(|fallback_err| {
                    ScanError::chain_unreachable(format!(
                        "All RPC endpoints failed for {method}: {fallback_err}"
                    ))
                })
            }
        }
    }

    async fn post(&self, url: &str, payload: &Value) -> ScanResult<RpcReply> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ScanError::chain_unreachable(format!("RPC request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::chain_unreachable(format!("HTTP error: {status}")));
        }

        let reply: RpcReply = response
            .json()
            .await
            .map_err(|e| ScanError::invalid_response(format!("Bad RPC response: {e}")))?;
        Ok(reply)
    }
}

impl RpcTransport for HttpTransport {
    fn request<'a>(
        &'a self,
        method: &'static str,
        params: Value,
    ) -> BoxFuture<'a, ScanResult<RpcReply>> {
        Box::pin(self.send(method, params))
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcReply {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

impl RpcReply {
    /// A successful reply carrying `result`.
    pub fn ok(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    /// An error reply, the shape a node uses for a revert.
    pub fn reverted(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(RpcErrorObject {
                code: 3,
                message: message.into(),
            }),
        }
    }

    /// For methods where an error object means the chain state read failed
    /// outright (getCode, getBalance, blockNumber), not a revert.
    fn into_result<T: DeserializeOwned>(self) -> ScanResult<T> {
        match self.result {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => {
                let msg = self
                    .error
                    .map(|e| format!("{} (code {})", e.message, e.code))
                    .unwrap_or_else(|| "no result in response".to_string());
                Err(ScanError::invalid_response(msg))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Decode a 0x-prefixed hex string into bytes.
pub fn decode_hex(data: &str) -> ScanResult<Vec<u8>> {
    let stripped = data.trim_start_matches("0x");
    hex::decode(stripped).map_err(|e| ScanError::invalid_response(format!("Bad hex data: {e}")))
}

/// Parse a 0x-prefixed hex quantity.
pub fn parse_quantity(data: &str) -> ScanResult<U256> {
    let stripped = data.trim_start_matches("0x");
    if stripped.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(stripped, 16)
        .map_err(|e| ScanError::invalid_response(format!("Bad hex quantity: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(fn(&'static str) -> ScanResult<RpcReply>);

    impl RpcTransport for Scripted {
        fn request<'a>(
            &'a self,
            method: &'static str,
            _params: Value,
        ) -> BoxFuture<'a, ScanResult<RpcReply>> {
            Box::pin(async move { (self.0)(method) })
        }
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x1329").unwrap(), U256::from(0x1329u64));
        assert_eq!(parse_quantity("0x").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_call_result() {
        assert!(CallResult::Ok(vec![]).is_ok());
        assert!(!CallResult::Reverted("execution reverted".to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_call_surfaces_revert_as_data() {
        let client = ChainClient::with_transport(Arc::new(Scripted(|_| {
            Ok(RpcReply::reverted("execution reverted"))
        })));
        let result = client.call("0xabc", &[0x12, 0x34, 0x56, 0x78]).await.unwrap();
        assert!(!result.is_ok());
    }

    #[tokio::test]
    async fn test_state_read_error_is_not_a_revert() {
        let client = ChainClient::with_transport(Arc::new(Scripted(|_| {
            Ok(RpcReply::reverted("internal error"))
        })));
        let err = client.get_code("0xabc").await.unwrap_err();
        assert_eq!(err.code_str(), "RPC_INVALID_RESPONSE");
    }
}
