// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Records persisted by the auditor.
//!
//! Field names follow the document-store schema (camelCase), which dashboards
//! and operator tooling read directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::divergence::{AuditStatus, Divergence};

/// One audit outcome. Appended once per tick, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub local_hash: String,
    pub anchored_hash: String,
    pub divergence_score: f64,
    pub status: AuditStatus,
    pub hash_match: bool,
}

impl AuditRecord {
    pub fn new(timestamp: DateTime<Utc>, local_hash: String, anchored_hash: String, divergence: &Divergence) -> Self {
        Self {
            timestamp,
            local_hash,
            anchored_hash,
            divergence_score: divergence.score,
            status: divergence.status,
            hash_match: divergence.hash_match,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    #[serde(rename = "CORE_DRIFT")]
    CoreDrift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
}

/// A drift alert. `acknowledged` is only ever flipped by operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub divergence_score: f64,
    pub local_hash: String,
    pub anchored_hash: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
    pub message: String,
}

impl AlertRecord {
    pub fn core_drift(audit: &AuditRecord) -> Self {
        Self {
            kind: AlertKind::CoreDrift,
            severity: Severity::Critical,
            divergence_score: audit.divergence_score,
            local_hash: audit.local_hash.clone(),
            anchored_hash: audit.anchored_hash.clone(),
            timestamp: audit.timestamp,
            acknowledged: false,
            message: drift_message(&audit.local_hash, &audit.anchored_hash),
        }
    }
}

pub fn drift_message(local_hash: &str, anchored_hash: &str) -> String {
    format!(
        "Local axiom fingerprint {} diverges from ledger anchor {}",
        local_hash, anchored_hash
    )
}

/// Lifecycle states of the governance protocol singleton that this auditor writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtocolState {
    DivergenceDetected,
}

/// Fields merged into the protocol status singleton on alarm.
///
/// Other fields of the record belong to other writers and are left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolStatusUpdate {
    pub status: ProtocolState,
    pub divergence_score: f64,
    pub last_divergence_check: DateTime<Utc>,
    pub drift_details: String,
}

impl ProtocolStatusUpdate {
    pub fn alarm(alert: &AlertRecord) -> Self {
        Self {
            status: ProtocolState::DivergenceDetected,
            divergence_score: alert.divergence_score,
            last_divergence_check: alert.timestamp,
            drift_details: alert.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "AUDIT_FAILURE")]
    AuditFailure,
}

/// Written when a tick fails without recovering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorRecord {
    pub fn audit_failure(timestamp: DateTime<Utc>, error: String, stack: Option<String>) -> Self {
        Self {
            timestamp,
            kind: ErrorKind::AuditFailure,
            error,
            stack,
        }
    }
}
