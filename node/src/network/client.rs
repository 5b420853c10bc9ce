// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use async_trait::async_trait;
use axiom_kernel::abi::{decode_bytes32, encode_call};
use axiom_kernel::config::ANCHOR_FUNCTION_SIGNATURE;
use axiom_kernel::Fingerprint;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{LedgerClient, LedgerError};

/// `eth_call` over JSON-RPC 2.0 / HTTP.
#[derive(Debug, Clone, Default)]
pub struct JsonRpcLedgerClient {
    client: Client,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl JsonRpcLedgerClient {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    async fn read_anchor_hash(&self, rpc_url: &str, contract: &str) -> Result<Fingerprint, LedgerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": contract, "data": encode_call(ANCHOR_FUNCTION_SIGNATURE) },
                "latest"
            ],
        });

        let resp = self.client.post(rpc_url).json(&body).send().await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LedgerError::Status(resp.status().as_u16()));
        }

        let rpc: RpcResponse = resp.json().await.map_err(|e| LedgerError::Malformed(e.to_string()))?;

        if let Some(err) = rpc.error {
            return Err(LedgerError::Rpc { code: err.code, message: err.message });
        }

        match rpc.result {
            Some(Value::String(word)) => decode_bytes32(&word).map_err(|e| LedgerError::Malformed(e.to_string())),
            Some(other) => Err(LedgerError::Malformed(format!("unexpected result: {}", other))),
            None => Err(LedgerError::Malformed("response has neither result nor error".into())),
        }
    }
}
