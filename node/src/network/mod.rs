// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod client;

use async_trait::async_trait;
use axiom_kernel::Fingerprint;
use thiserror::Error;

pub use client::JsonRpcLedgerClient;

/// Failure of a single ledger read attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// A read-only view of the anchor contract.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Performs one `CORE_AXIOM_HASH()` call against `contract` through `rpc_url`.
    async fn read_anchor_hash(&self, rpc_url: &str, contract: &str) -> Result<Fingerprint, LedgerError>;
}
