// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::records::AuditRecord;

use crate::errors::AuditError;
use crate::store::DocumentStore;

/// Appends the per-tick audit trail entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditRecorder;

impl AuditRecorder {
    pub async fn record(&self, store: &dyn DocumentStore, record: &AuditRecord) -> Result<(), AuditError> {
        store.append_audit(record).await?;
        metrics::gauge!("axiom_divergence_score", record.divergence_score);
        tracing::info!(
            status = record.status.as_str(),
            score = record.divergence_score,
            "Audit recorded (local {}, anchor {})",
            record.local_hash,
            record.anchored_hash
        );
        Ok(())
    }
}
