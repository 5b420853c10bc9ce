// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axiom_kernel::config::collections;
use axiom_kernel::records::{AlertKind, AlertRecord, AuditRecord, ErrorRecord, ProtocolStatusUpdate};
use axiom_persistence::{FileStore, Stored};
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{status_patch, DocumentStore, StoreError, StoreResult};

/// [`DocumentStore`] over an on-disk [`FileStore`].
///
/// File I/O is blocking, so every call runs on the blocking pool.
#[derive(Clone)]
pub struct FileDocumentStore {
    inner: Arc<FileStore>,
}

impl FileDocumentStore {
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            inner: Arc::new(FileStore::open(root)?),
        })
    }

    pub fn file_store(&self) -> &FileStore {
        &self.inner
    }

    async fn blocking<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&FileStore) -> StoreResult<T> + Send + 'static,
    {
        let store = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| StoreError::Backend(format!("blocking task failed: {}", e)))?
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn read_config(&self, key: &str) -> StoreResult<Option<Value>> {
        let key = key.to_string();
        self.blocking(move |s| Ok(s.read_document(collections::SYSTEM_CONFIG, &key)?))
            .await
    }

    async fn append_alert(&self, alert: &AlertRecord) -> StoreResult<()> {
        let alert = alert.clone();
        self.blocking(move |s| Ok(s.append(collections::ALERTS, alert.timestamp.timestamp_millis(), &alert)?))
            .await
    }

    async fn recent_alerts(&self, kind: AlertKind, since: DateTime<Utc>) -> StoreResult<Vec<AlertRecord>> {
        self.blocking(move |s| {
            let rows: Vec<Stored<AlertRecord>> = s.scan(collections::ALERTS)?;
            Ok(rows
                .into_iter()
                .map(|r| r.value)
                .filter(|a| a.kind == kind && a.timestamp > since)
                .collect())
        })
        .await
    }

    async fn update_protocol_status(&self, protocol_id: &str, update: &ProtocolStatusUpdate) -> StoreResult<()> {
        let patch = status_patch(update)?;
        let protocol_id = protocol_id.to_string();
        let updated_at = update.last_divergence_check.timestamp_millis();
        self.blocking(move |s| {
            Ok(s.merge_document(collections::GOVERNANCE_PROTOCOLS, &protocol_id, &patch, updated_at)?)
        })
        .await
    }

    async fn read_protocol_status(&self, protocol_id: &str) -> StoreResult<Option<Value>> {
        let protocol_id = protocol_id.to_string();
        self.blocking(move |s| Ok(s.read_document(collections::GOVERNANCE_PROTOCOLS, &protocol_id)?))
            .await
    }

    async fn append_audit(&self, record: &AuditRecord) -> StoreResult<()> {
        let record = record.clone();
        self.blocking(move |s| {
            Ok(s.append(collections::AUDIT_HISTORY, record.timestamp.timestamp_millis(), &record)?)
        })
        .await
    }

    async fn recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditRecord>> {
        self.blocking(move |s| {
            let rows: Vec<Stored<AuditRecord>> = s.scan(collections::AUDIT_HISTORY)?;
            Ok(rows.into_iter().rev().take(limit).map(|r| r.value).collect())
        })
        .await
    }

    async fn append_error(&self, record: &ErrorRecord) -> StoreResult<()> {
        let record = record.clone();
        self.blocking(move |s| {
            Ok(s.append(collections::SYSTEM_ERRORS, record.timestamp.timestamp_millis(), &record)?)
        })
        .await
    }
}
