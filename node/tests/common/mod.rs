// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axiom_kernel::{compute_fingerprint, AxiomConfiguration, Fingerprint};
use axiom_node::alerts::TracingNotifier;
use axiom_node::clock::ManualClock;
use axiom_node::config::NodeConfig;
use axiom_node::network::{LedgerClient, LedgerError};
use axiom_node::orchestrator::AuditOrchestrator;
use axiom_node::store::MemoryStore;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

pub const RPC_URL: &str = "http://ledger.invalid";
pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Ledger that fails a fixed number of times, then answers with `anchor`.
pub struct ScriptedLedger {
    anchor: Fingerprint,
    failures: AtomicU32,
    calls: AtomicU32,
}

impl ScriptedLedger {
    pub fn new(anchor: Fingerprint, failures: u32) -> Self {
        Self {
            anchor,
            failures: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn read_anchor_hash(&self, _rpc_url: &str, _contract: &str) -> Result<Fingerprint, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let left = self.failures.load(Ordering::SeqCst);
        if left > 0 {
            self.failures.store(left - 1, Ordering::SeqCst);
            return Err(LedgerError::Transport("connection refused".into()));
        }
        Ok(self.anchor)
    }
}

pub fn fingerprint_of(weights: &[f64]) -> Fingerprint {
    compute_fingerprint(&AxiomConfiguration::new(weights.to_vec()).unwrap())
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn test_config() -> NodeConfig {
    let mut cfg = NodeConfig::default();
    cfg.rpc_url = RPC_URL.to_string();
    cfg.contract_address = CONTRACT.to_string();
    cfg
}

/// Store seeded with the `[1, 2, 3]` configuration and an active protocol record.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.put_config("core_axioms", json!({ "weights": [1.0, 2.0, 3.0] }));
    store.put_protocol("core", json!({ "name": "Core Governance", "status": "ACTIVE" }));
    store
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub ledger: Arc<ScriptedLedger>,
    pub clock: Arc<ManualClock>,
    pub orchestrator: Arc<AuditOrchestrator>,
}

pub fn harness(cfg: &NodeConfig, store: Arc<MemoryStore>, anchor: Fingerprint, failures: u32) -> Harness {
    let ledger = Arc::new(ScriptedLedger::new(anchor, failures));
    let clock = Arc::new(ManualClock::new(start_time()));
    let orchestrator = Arc::new(AuditOrchestrator::new(
        cfg,
        store.clone(),
        ledger.clone(),
        clock.clone(),
        Arc::new(TracingNotifier),
    ));
    Harness {
        store,
        ledger,
        clock,
        orchestrator,
    }
}
