//! Centralized error handling
//!
//! Every failure carries a unique string code for logging and monitoring.
//! Only two codes are fatal to a scan: `ADDR_INVALID` (rejected before any
//! network call) and `CHAIN_UNREACHABLE` (no report can be produced).
//! Everything else degrades into the report's data instead of raising:
//! exhausted probes become UNKNOWN tiers, unavailable market sources fall
//! through to the next strategy, an exceeded deadline yields a partial report.

use std::fmt;

/// Engine-wide error type.
#[derive(Debug)]
pub struct ScanError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ScanError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Fatal errors propagate out of `scan`; everything else degrades into
    /// the report.
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes, mirroring the scan failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed address; rejected before any network call
    InvalidAddress,
    /// Chain RPC unreachable on every endpoint; no report possible
    ChainUnreachable,
    /// Contract matched no classification profile
    ClassificationAmbiguous,
    /// Every probe candidate for a capability failed
    ProbeExhausted,
    /// One external HTTP source failed; next fallback is tried
    ExternalSourceUnavailable,
    /// Overall scan deadline exceeded; partial report returned
    DeadlineExceeded,
    /// RPC endpoint answered with something undecodable
    RpcInvalidResponse,
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "ADDR_INVALID",
            Self::ChainUnreachable => "CHAIN_UNREACHABLE",
            Self::ClassificationAmbiguous => "CLASSIFY_AMBIGUOUS",
            Self::ProbeExhausted => "PROBE_EXHAUSTED",
            Self::ExternalSourceUnavailable => "SOURCE_UNAVAILABLE",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::RpcInvalidResponse => "RPC_INVALID_RESPONSE",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidAddress | Self::ChainUnreachable)
    }
}

// Convenience constructors

impl ScanError {
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    pub fn chain_unreachable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ChainUnreachable, msg)
    }

    pub fn probe_exhausted(capability: &str, attempts: usize) -> Self {
        Self::new(
            ErrorCode::ProbeExhausted,
            format!("All {} candidates for '{}' failed", attempts, capability),
        )
    }

    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalSourceUnavailable, msg)
    }

    pub fn deadline_exceeded(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeadlineExceeded, msg)
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcInvalidResponse, msg)
    }
}

// Conversion from common error types

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ExternalSourceUnavailable, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::ChainUnreachable, "Connection failed")
        } else {
            Self::with_source(ErrorCode::Unknown, "HTTP request failed", err)
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::RpcInvalidResponse, "JSON parse error", err)
    }
}

/// Engine-wide Result type.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ScanError::invalid_address("not hex");
        assert_eq!(err.code, ErrorCode::InvalidAddress);
        assert_eq!(err.code_str(), "ADDR_INVALID");
    }

    #[test]
    fn test_fatal_split() {
        assert!(ErrorCode::InvalidAddress.is_fatal());
        assert!(ErrorCode::ChainUnreachable.is_fatal());
        assert!(!ErrorCode::ProbeExhausted.is_fatal());
        assert!(!ErrorCode::DeadlineExceeded.is_fatal());
        assert!(!ErrorCode::ExternalSourceUnavailable.is_fatal());
    }

    #[test]
    fn test_display_includes_code() {
        let err = ScanError::probe_exhausted("owner", 4);
        let text = err.to_string();
        assert!(text.contains("PROBE_EXHAUSTED"));
        assert!(text.contains("owner"));
    }
}
