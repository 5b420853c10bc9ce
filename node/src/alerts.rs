// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use async_trait::async_trait;
use axiom_kernel::records::{AlertRecord, AuditRecord, ProtocolStatusUpdate};

use crate::errors::AuditError;
use crate::store::DocumentStore;

/// Outbound human notification (email, SMS, chat).
///
/// Called once per emitted alert, after it is durably stored.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &AlertRecord);
}

/// Writes the alert to the log stream only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, alert: &AlertRecord) {
        tracing::error!(
            severity = ?alert.severity,
            score = alert.divergence_score,
            local_hash = %alert.local_hash,
            anchored_hash = %alert.anchored_hash,
            "CORE_DRIFT alert: {}",
            alert.message
        );
    }
}

pub struct AlertDispatcher {
    protocol_id: String,
    notifier: Arc<dyn Notifier>,
}

impl AlertDispatcher {
    pub fn new(protocol_id: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            protocol_id: protocol_id.into(),
            notifier,
        }
    }

    /// Raises the alarm for a drifted audit.
    ///
    /// The protocol status is flipped first and the alert appended second. A failed
    /// append leaves the status in alarm and no alert inside the cooldown window,
    /// so the next drifted tick dispatches again.
    pub async fn dispatch(&self, store: &dyn DocumentStore, audit: &AuditRecord) -> Result<AlertRecord, AuditError> {
        let alert = AlertRecord::core_drift(audit);

        store
            .update_protocol_status(&self.protocol_id, &ProtocolStatusUpdate::alarm(&alert))
            .await?;
        store.append_alert(&alert).await?;

        metrics::increment_counter!("axiom_alerts_emitted_total");
        self.notifier.notify(&alert).await;
        Ok(alert)
    }
}
