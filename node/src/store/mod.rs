// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Storage port of the auditor.
//!
//! Components receive a store handle explicitly; nothing reaches for a global client.

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use axiom_persistence::PersistenceError;
use axiom_kernel::records::{AlertKind, AlertRecord, AuditRecord, ErrorRecord, ProtocolStatusUpdate};
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

pub use file::FileDocumentStore;
pub use memory::{MemoryStore, StoreOp};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document {collection}/{key} not found")]
    NotFound { collection: String, key: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<PersistenceError> for StoreError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::NotFound { collection, key } => StoreError::NotFound { collection, key },
            PersistenceError::Serialization(e) => StoreError::Serialization(e),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The document-store operations the audit pipeline depends on.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Keyed read from `systemConfig`. `None` when the document does not exist.
    async fn read_config(&self, key: &str) -> StoreResult<Option<Value>>;

    async fn append_alert(&self, alert: &AlertRecord) -> StoreResult<()>;

    /// Alerts of `kind` whose timestamp is strictly after `since`.
    async fn recent_alerts(&self, kind: AlertKind, since: DateTime<Utc>) -> StoreResult<Vec<AlertRecord>>;

    /// Merges the alarm fields into the existing protocol singleton.
    /// Fails with [`StoreError::NotFound`] if the singleton does not exist.
    async fn update_protocol_status(&self, protocol_id: &str, update: &ProtocolStatusUpdate) -> StoreResult<()>;

    async fn read_protocol_status(&self, protocol_id: &str) -> StoreResult<Option<Value>>;

    async fn append_audit(&self, record: &AuditRecord) -> StoreResult<()>;

    /// Up to `limit` audit records, newest first.
    async fn recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditRecord>>;

    async fn append_error(&self, record: &ErrorRecord) -> StoreResult<()>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

pub(crate) fn status_patch(update: &ProtocolStatusUpdate) -> StoreResult<serde_json::Map<String, Value>> {
    match serde_json::to_value(update)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!("status update serialized to non-object: {}", other))),
    }
}
