//! Chain access: RPC client, capability probes, classification, metadata

pub mod classifier;
pub mod client;
pub mod metadata;
pub mod probe;

pub use classifier::{classify, is_native_denom, validate_address};
pub use client::{CallResult, ChainClient, RpcReply, RpcTransport};
