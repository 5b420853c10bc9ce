// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use axiom_kernel::config::collections;
use axiom_kernel::records::{AlertKind, AlertRecord, AuditRecord, ErrorRecord, ProtocolStatusUpdate};
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{status_patch, DocumentStore, StoreError, StoreResult};

/// Operations that can be forced to fail, for exercising error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ReadConfig,
    AppendAlert,
    RecentAlerts,
    UpdateProtocolStatus,
    AppendAudit,
    AppendError,
}

#[derive(Default)]
struct Inner {
    configs: HashMap<String, Value>,
    protocols: HashMap<String, Value>,
    alerts: Vec<AlertRecord>,
    audits: Vec<AuditRecord>,
    errors: Vec<ErrorRecord>,
    failing: HashSet<StoreOp>,
}

/// In-process store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn put_config(&self, key: &str, document: Value) {
        self.lock().configs.insert(key.to_string(), document);
    }

    pub fn put_protocol(&self, protocol_id: &str, document: Value) {
        self.lock().protocols.insert(protocol_id.to_string(), document);
    }

    pub fn protocol(&self, protocol_id: &str) -> Option<Value> {
        self.lock().protocols.get(protocol_id).cloned()
    }

    pub fn alerts(&self) -> Vec<AlertRecord> {
        self.lock().alerts.clone()
    }

    pub fn audits(&self) -> Vec<AuditRecord> {
        self.lock().audits.clone()
    }

    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.lock().errors.clone()
    }

    pub fn fail_on(&self, op: StoreOp) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: StoreOp) {
        self.lock().failing.remove(&op);
    }

    fn check(inner: &Inner, op: StoreOp) -> StoreResult<()> {
        if inner.failing.contains(&op) {
            return Err(StoreError::Backend(format!("injected failure on {:?}", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_config(&self, key: &str) -> StoreResult<Option<Value>> {
        let inner = self.lock();
        Self::check(&inner, StoreOp::ReadConfig)?;
        Ok(inner.configs.get(key).cloned())
    }

    async fn append_alert(&self, alert: &AlertRecord) -> StoreResult<()> {
        let mut inner = self.lock();
        Self::check(&inner, StoreOp::AppendAlert)?;
        inner.alerts.push(alert.clone());
        Ok(())
    }

    async fn recent_alerts(&self, kind: AlertKind, since: DateTime<Utc>) -> StoreResult<Vec<AlertRecord>> {
        let inner = self.lock();
        Self::check(&inner, StoreOp::RecentAlerts)?;
        Ok(inner
            .alerts
            .iter()
            .filter(|a| a.kind == kind && a.timestamp > since)
            .cloned()
            .collect())
    }

    async fn update_protocol_status(&self, protocol_id: &str, update: &ProtocolStatusUpdate) -> StoreResult<()> {
        let patch = status_patch(update)?;
        let mut inner = self.lock();
        Self::check(&inner, StoreOp::UpdateProtocolStatus)?;
        let doc = inner.protocols.get_mut(protocol_id).ok_or_else(|| StoreError::NotFound {
            collection: collections::GOVERNANCE_PROTOCOLS.to_string(),
            key: protocol_id.to_string(),
        })?;
        let fields = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::Backend(format!("protocol {} is not an object", protocol_id)))?;
        fields.extend(patch);
        Ok(())
    }

    async fn read_protocol_status(&self, protocol_id: &str) -> StoreResult<Option<Value>> {
        Ok(self.lock().protocols.get(protocol_id).cloned())
    }

    async fn append_audit(&self, record: &AuditRecord) -> StoreResult<()> {
        let mut inner = self.lock();
        Self::check(&inner, StoreOp::AppendAudit)?;
        inner.audits.push(record.clone());
        Ok(())
    }

    async fn recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditRecord>> {
        Ok(self.lock().audits.iter().rev().take(limit).cloned().collect())
    }

    async fn append_error(&self, record: &ErrorRecord) -> StoreResult<()> {
        let mut inner = self.lock();
        Self::check(&inner, StoreOp::AppendError)?;
        inner.errors.push(record.clone());
        Ok(())
    }
}
