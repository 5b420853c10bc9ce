// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::{Arc, Mutex};

use axiom_kernel::abi::encode_call;
use axiom_kernel::config::ANCHOR_FUNCTION_SIGNATURE;
use axiom_node::network::{JsonRpcLedgerClient, LedgerClient, LedgerError};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

#[derive(Clone)]
struct Ledger {
    reply: (StatusCode, Value),
    seen: Arc<Mutex<Vec<Value>>>,
}

async fn rpc(State(ledger): State<Ledger>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    ledger.seen.lock().unwrap().push(body);
    (ledger.reply.0, Json(ledger.reply.1.clone()))
}

/// Serves one canned reply on an ephemeral port; returns its URL and the request log.
async fn spawn_ledger(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/", post(rpc)).with_state(Ledger {
        reply: (status, reply),
        seen: seen.clone(),
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/", addr), seen)
}

#[tokio::test]
async fn test_decodes_bytes32_result() {
    let word = format!("0x{}", "ab".repeat(32));
    let (url, seen) = spawn_ledger(StatusCode::OK, json!({ "jsonrpc": "2.0", "id": 1, "result": word })).await;

    let hash = JsonRpcLedgerClient::new().read_anchor_hash(&url, CONTRACT).await.unwrap();
    assert_eq!(hash.to_hex(), word);

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["method"], json!("eth_call"));
    assert_eq!(requests[0]["params"][0]["to"], json!(CONTRACT));
    assert_eq!(requests[0]["params"][0]["data"], json!(encode_call(ANCHOR_FUNCTION_SIGNATURE)));
    assert_eq!(requests[0]["params"][1], json!("latest"));
}

#[tokio::test]
async fn test_rpc_error_is_reported() {
    let (url, _) = spawn_ledger(
        StatusCode::OK,
        json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32000, "message": "execution reverted" } }),
    )
    .await;

    let err = JsonRpcLedgerClient::new().read_anchor_hash(&url, CONTRACT).await.unwrap_err();
    assert_eq!(
        err,
        LedgerError::Rpc {
            code: -32000,
            message: "execution reverted".into()
        }
    );
}

#[tokio::test]
async fn test_http_status_and_short_result() {
    let (url, _) = spawn_ledger(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
    let err = JsonRpcLedgerClient::new().read_anchor_hash(&url, CONTRACT).await.unwrap_err();
    assert_eq!(err, LedgerError::Status(503));

    let (url, _) = spawn_ledger(StatusCode::OK, json!({ "jsonrpc": "2.0", "id": 1, "result": "0x" })).await;
    let err = JsonRpcLedgerClient::new().read_anchor_hash(&url, CONTRACT).await.unwrap_err();
    assert!(matches!(err, LedgerError::Malformed(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = JsonRpcLedgerClient::new()
        .read_anchor_hash(&format!("http://{}/", addr), CONTRACT)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Transport(_)));
}
